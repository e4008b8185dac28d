#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use entourage_api::config::{GenerationConfig, ServerConfig};
use entourage_api::router::build_app_router;
use entourage_api::state::AppState;
use entourage_replicate::api::{
    Prediction, PredictionBackend, PredictionStatus, ReplicateApiError,
};
use entourage_replicate::pipeline::{EntouragePipeline, PipelineConfig, RemovalRetryConfig};
use entourage_replicate::polling::PollConfig;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        generation: GenerationConfig::default(),
    }
}

/// Pipeline settings with every wait set to zero.
pub fn instant_pipeline_config() -> PipelineConfig {
    PipelineConfig {
        poll: PollConfig {
            interval: Duration::ZERO,
            max_attempts: 3,
        },
        removal: RemovalRetryConfig {
            max_retries: 2,
            first_delay: Duration::ZERO,
            retry_delay: Duration::ZERO,
        },
        ..PipelineConfig::default()
    }
}

/// Build the full application router, optionally with a generation pipeline.
///
/// Goes through the same `build_app_router` as `main.rs` so integration
/// tests exercise the production middleware stack.
pub fn build_test_app(pipeline: Option<Arc<EntouragePipeline>>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        pipeline,
    };
    build_app_router(state, &config)
}

/// Build a router whose pipeline talks to `backend`.
pub fn build_test_app_with_backend(backend: FakeBackend) -> Router {
    let pipeline = EntouragePipeline::new(Arc::new(backend), instant_pipeline_config());
    build_test_app(Some(Arc::new(pipeline)))
}

// ---------------------------------------------------------------------------
// Fake prediction backend
// ---------------------------------------------------------------------------

/// Scripted [`PredictionBackend`].
///
/// Each `create_prediction` pops the next scripted result. A created
/// prediction settles immediately to the status and output recorded for
/// its id.
#[derive(Default)]
pub struct FakeBackend {
    creates: Mutex<VecDeque<Result<Prediction, ReplicateApiError>>>,
    settled: Mutex<Vec<Prediction>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a create that settles with the given status and output.
    pub fn then_settles(self, id: &str, status: PredictionStatus, output: serde_json::Value) -> Self {
        self.creates.lock().unwrap().push_back(Ok(Prediction {
            id: id.to_string(),
            status: PredictionStatus::Starting,
            output: None,
            error: None,
        }));
        self.settled.lock().unwrap().push(Prediction {
            id: id.to_string(),
            status,
            output: Some(output),
            error: None,
        });
        self
    }

    /// Script a create that fails outright.
    pub fn then_fails(self, err: ReplicateApiError) -> Self {
        self.creates.lock().unwrap().push_back(Err(err));
        self
    }
}

#[async_trait]
impl PredictionBackend for FakeBackend {
    async fn create_prediction(
        &self,
        _version: &str,
        _input: serde_json::Value,
    ) -> Result<Prediction, ReplicateApiError> {
        self.creates
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ReplicateApiError::ApiError {
                status: 500,
                body: "no scripted prediction".to_string(),
            }))
    }

    async fn get_prediction(&self, id: &str) -> Result<Prediction, ReplicateApiError> {
        self.settled
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ReplicateApiError::ApiError {
                status: 404,
                body: format!("unknown prediction {id}"),
            })
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body through the router.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
