pub mod codes;
pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /codes                   error code table (see codes::router)
/// POST /envelope           envelope from untyped values
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/codes", codes::router())
        .route("/envelope", post(handlers::envelope::build_envelope))
}
