//! Route definitions for entourage generation.
//!
//! ```text
//! POST   /                               generate_entourage
//! POST   /prompt                         preview_prompt
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::entourage;
use crate::state::AppState;

/// Routes mounted at `/entourage`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(entourage::generate_entourage))
        .route("/prompt", post(entourage::preview_prompt))
}
