use axum::routing::get;
use axum::Router;

use crate::handlers::codes;
use crate::state::AppState;

/// Error code routes mounted at `/codes`.
///
/// ```text
/// GET    /                  -> list_codes
/// GET    /{code}            -> show_code
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(codes::list_codes))
        .route("/{code}", get(codes::show_code))
}
