//! Envelope building for callers that only have untyped values.

use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use envelope_core::codes::UNKNOWN_ERROR;
use envelope_core::Input;

use crate::response::{ClientAgent, Reply};
use crate::state::AppState;

/// Message sent back when the request body cannot be read as JSON.
pub const UNREADABLE_BODY_MESSAGE: &str = "Request body is not valid JSON";

#[derive(Debug, Deserialize)]
pub struct LooseEnvelopeRequest {
    #[serde(default)]
    pub primary: Value,
    #[serde(default)]
    pub secondary: Option<Value>,
}

/// POST /api/v1/envelope
///
/// Classifies `primary` by shape (code, payload or message) and answers
/// with the resulting envelope. The body is read whatever its
/// `Content-Type`; one that does not parse answers a `-1` envelope instead
/// of a bare 400/415.
pub async fn build_envelope(
    agent: ClientAgent,
    State(state): State<AppState>,
    body: Bytes,
) -> Reply {
    let input = match serde_json::from_slice::<LooseEnvelopeRequest>(&body) {
        Ok(request) => Input::infer(request.primary, request.secondary),
        Err(err) => {
            tracing::debug!(error = %err, bytes = body.len(), "Unreadable envelope request");
            Input::code_with_message(UNKNOWN_ERROR, UNREADABLE_BODY_MESSAGE)
        }
    };
    tracing::debug!(?input, "Inferred envelope input");

    agent.reply(state.builder.build(input))
}
