use axum::extract::State;
use serde_json::json;

use crate::response::{ClientAgent, Reply};
use crate::state::AppState;

/// GET /health
pub async fn health_check(agent: ClientAgent, State(state): State<AppState>) -> Reply {
    agent.reply(state.builder.success(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
