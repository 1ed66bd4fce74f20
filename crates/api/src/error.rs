use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use envelope_core::codes::UNKNOWN_ERROR;
use envelope_core::error::CoreError;
use envelope_core::ResponseBuilder;

use crate::response::{emit, AxumChannel, ClientAgent};

/// Application-level error type for HTTP handlers and startup.
///
/// Answers with a `-1` envelope and a `500` status through the same
/// [`emit`] path as every handler; the underlying detail only goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `envelope_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An envelope or payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading configuration files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Render for the request's `agent`, taking the `-1` message from
    /// `builder`'s code table.
    pub fn render(self, builder: &ResponseBuilder, agent: ClientAgent) -> Response {
        tracing::error!(error = %self, "Internal error");

        let envelope = builder.error(UNKNOWN_ERROR);
        let channel = AxumChannel::with_status(agent, StatusCode::INTERNAL_SERVER_ERROR);

        match emit(&envelope, channel) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "Failed to emit error envelope");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Used where no request context is at hand: stock code table, unknown agent.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.render(&ResponseBuilder::default(), ClientAgent::default())
    }
}
