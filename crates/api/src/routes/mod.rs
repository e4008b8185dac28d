pub mod entourage;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /entourage                                       generate (POST)
/// /entourage/prompt                                compose only (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/entourage", entourage::router())
}
