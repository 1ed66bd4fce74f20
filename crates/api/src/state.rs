use std::sync::Arc;

use envelope_core::{ErrorCodeTable, Paginator, ResponseBuilder};

use crate::config::ServerConfig;
use crate::error::AppResult;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in here changes after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Envelope builder over the configured error code table.
    pub builder: ResponseBuilder,
    pub paginator: Paginator,
}

impl AppState {
    /// Build the state from configuration, loading `error_codes_file` if set.
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let mut codes = ErrorCodeTable::default();
        if let Some(path) = &config.error_codes_file {
            let raw = std::fs::read_to_string(path)?;
            codes = codes.merge_json(&raw)?;
            tracing::info!(path = %path.display(), entries = codes.len(), "Loaded error code table");
        }

        let paginator = Paginator::try_new(config.default_page_size)?;

        Ok(Self {
            config: Arc::new(config),
            builder: ResponseBuilder::new(Arc::new(codes)),
            paginator,
        })
    }
}
