use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use entourage_core::error::CoreError;
use entourage_replicate::pipeline::PipelineError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`PipelineError`] for upstream
/// generation failures. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `entourage_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The image generation collaborator failed.
    #[error(transparent)]
    Generation(#[from] PipelineError),

    /// A required upstream service is not configured.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut retry_after = None;

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // --- Upstream generation errors ---
            AppError::Generation(err) => match err.retry_after_secs() {
                Some(secs) => {
                    tracing::warn!(retry_after_secs = secs, "Generation rate limited");
                    retry_after = Some(secs);
                    (
                        StatusCode::TOO_MANY_REQUESTS,
                        "RATE_LIMITED",
                        "Image generation is busy, please retry shortly".to_string(),
                    )
                }
                None => {
                    tracing::error!(error = %err, "Generation failed");
                    (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", err.to_string())
                }
            },

            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use entourage_replicate::api::ReplicateApiError;

    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = AppError::Core(CoreError::Validation("Prompt too short".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rate_limit_maps_to_429_with_retry_after() {
        let err = PipelineError::Create(ReplicateApiError::RateLimited { retry_after_secs: 8 });
        let response = AppError::Generation(err).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "8");
    }

    #[test]
    fn upstream_failure_maps_to_502() {
        let err = PipelineError::Create(ReplicateApiError::ApiError {
            status: 500,
            body: "oops".into(),
        });
        let response = AppError::Generation(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unconfigured_maps_to_503() {
        let response = AppError::ServiceUnavailable("no token".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
