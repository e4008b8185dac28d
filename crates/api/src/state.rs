use std::sync::Arc;

use entourage_replicate::pipeline::EntouragePipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Generation pipeline; `None` when no Replicate token is configured.
    pub pipeline: Option<Arc<EntouragePipeline>>,
}
