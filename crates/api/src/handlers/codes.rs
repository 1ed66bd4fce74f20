//! Handlers exposing the configured error code table.
//!
//! Lets client developers look up what a code means and see exactly which
//! envelope a given code produces.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use envelope_core::coerce::coerce_str_int;
use envelope_core::{CodeKind, Input};
use serde::Serialize;

use crate::error::AppError;
use crate::query::{MessageParams, PageParams};
use crate::response::{ClientAgent, Reply};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CodeEntry {
    pub code: i64,
    pub message: String,
    pub kind: CodeKind,
}

/// GET /api/v1/codes
///
/// One page of the error code table, ascending by code. A query string that
/// does not deserialize is treated as absent.
pub async fn list_codes(
    agent: ClientAgent,
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Response {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let codes = state.builder.codes();
    let total = i64::try_from(codes.len()).unwrap_or(i64::MAX);

    // The block for an empty page yields the normalized page, size and offset.
    let window = state
        .paginator
        .paginate(total, params.page(), params.pagesize(), 0);
    let skip = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(window.pagesize).unwrap_or(usize::MAX);

    let entries: Vec<CodeEntry> = codes
        .iter()
        .skip(skip)
        .take(take)
        .map(|(code, message)| CodeEntry {
            code,
            message: message.to_string(),
            kind: CodeKind::of(code),
        })
        .collect();

    let count = i64::try_from(entries.len()).unwrap_or(i64::MAX);
    let block = state
        .paginator
        .paginate(total, window.page, window.pagesize, count);

    match serde_json::to_value(entries) {
        Ok(data) => agent
            .reply(state.builder.paginated(data, block))
            .into_response(),
        Err(err) => AppError::from(err).render(&state.builder, agent),
    }
}

/// GET /api/v1/codes/{code}
///
/// The error envelope for `code`, with an optional `?message=` override.
/// Code `10000` answers `401 Unauthorized`. A non-numeric code such as `abc`
/// casts to `0` and so answers `-1` with the message "SUCCESS".
pub async fn show_code(
    agent: ClientAgent,
    State(state): State<AppState>,
    raw: Result<Path<String>, PathRejection>,
    params: Result<Query<MessageParams>, QueryRejection>,
) -> Reply {
    let code = raw.map_or(0, |Path(raw)| coerce_str_int(&raw));
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let input = match params.message {
        Some(message) => Input::code_with_message(code, message),
        None => Input::code(code),
    };

    agent.reply(state.builder.build(input))
}
