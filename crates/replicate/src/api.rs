//! REST API client for the Replicate prediction endpoints.
//!
//! Wraps prediction creation and retrieval using [`reqwest`]. Rate limiting
//! is surfaced as a dedicated error variant so callers can decide whether to
//! retry.

use async_trait::async_trait;
use serde::Deserialize;

/// Default public API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.replicate.com";

/// Seconds to wait when a rate-limited response carries no `retry_after`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 8;

/// Lifecycle state of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    /// Whether the prediction is still running.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Starting | Self::Processing)
    }
}

/// A prediction as returned by create and get calls.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl Prediction {
    /// First URL-like string in the output.
    ///
    /// Models return either a single string or an array of strings.
    pub fn first_output(&self) -> Option<&str> {
        match self.output.as_ref()? {
            serde_json::Value::String(s) => Some(s.as_str()),
            serde_json::Value::Array(items) => items.first()?.as_str(),
            _ => None,
        }
    }

    /// Human-readable failure reason, if the model reported one.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Errors from the Replicate REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ReplicateApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expected.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Replicate asked us to slow down.
    #[error("Rate limited by Replicate (retry after {retry_after_secs}s)")]
    RateLimited {
        /// Suggested wait before retrying.
        retry_after_secs: u64,
    },

    /// Replicate returned a non-2xx status code.
    #[error("Replicate API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// The prediction operations the generation pipeline depends on.
///
/// Implemented by [`ReplicateApi`]; tests substitute an in-memory fake.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    /// Start a prediction for a model version with the given input.
    async fn create_prediction(
        &self,
        version: &str,
        input: serde_json::Value,
    ) -> Result<Prediction, ReplicateApiError>;

    /// Fetch the current state of a prediction.
    async fn get_prediction(&self, id: &str) -> Result<Prediction, ReplicateApiError>;
}

/// HTTP client for the Replicate API.
pub struct ReplicateApi {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
}

impl ReplicateApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base URL, e.g. `https://api.replicate.com`.
    /// * `api_token` - Account token sent as `Authorization: Token ...`.
    pub fn new(api_url: String, api_token: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_token)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, api_token: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.api_token)
    }

    // ---- private helpers ----

    /// Read a response body and turn it into a [`Prediction`], mapping
    /// rate limits and non-2xx statuses to errors.
    async fn parse_prediction(
        response: reqwest::Response,
    ) -> Result<Prediction, ReplicateApiError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        parse_prediction_body(status, &body)
    }
}

#[async_trait]
impl PredictionBackend for ReplicateApi {
    /// Sends `POST /v1/predictions` with `{version, input}`.
    async fn create_prediction(
        &self,
        version: &str,
        input: serde_json::Value,
    ) -> Result<Prediction, ReplicateApiError> {
        let body = serde_json::json!({
            "version": version,
            "input": input,
        });

        let response = self
            .client
            .post(format!("{}/v1/predictions", self.api_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await?;

        Self::parse_prediction(response).await
    }

    /// Sends `GET /v1/predictions/{id}`.
    async fn get_prediction(&self, id: &str) -> Result<Prediction, ReplicateApiError> {
        let response = self
            .client
            .get(format!("{}/v1/predictions/{id}", self.api_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        Self::parse_prediction(response).await
    }
}

/// Interpret a raw HTTP status and body.
///
/// A 429 status, or a JSON body whose numeric `status` is 429, is a rate
/// limit regardless of the HTTP status line.
pub fn parse_prediction_body(status: u16, body: &str) -> Result<Prediction, ReplicateApiError> {
    let json: Option<serde_json::Value> = serde_json::from_str(body).ok();

    let body_status = json
        .as_ref()
        .and_then(|v| v.get("status"))
        .and_then(serde_json::Value::as_u64);
    if status == 429 || body_status == Some(429) {
        let retry_after_secs = json
            .as_ref()
            .and_then(|v| v.get("retry_after"))
            .and_then(serde_json::Value::as_f64)
            .map(|secs| secs.ceil().max(0.0) as u64)
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(ReplicateApiError::RateLimited { retry_after_secs });
    }

    if !(200..300).contains(&status) {
        return Err(ReplicateApiError::ApiError {
            status,
            body: body.to_string(),
        });
    }

    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_successful_prediction() {
        let body = r#"{"id":"abc","status":"succeeded","output":["https://cdn/x.png"]}"#;
        let p = parse_prediction_body(201, body).unwrap();
        assert_eq!(p.id, "abc");
        assert_eq!(p.status, PredictionStatus::Succeeded);
        assert_eq!(p.first_output(), Some("https://cdn/x.png"));
    }

    #[test]
    fn http_429_is_rate_limited_with_retry_after() {
        let err = parse_prediction_body(429, r#"{"detail":"slow down","retry_after":3}"#)
            .unwrap_err();
        assert_matches!(err, ReplicateApiError::RateLimited { retry_after_secs: 3 });
    }

    #[test]
    fn body_status_429_is_rate_limited_with_default_wait() {
        let err = parse_prediction_body(200, r#"{"status":429,"detail":"throttled"}"#)
            .unwrap_err();
        assert_matches!(
            err,
            ReplicateApiError::RateLimited { retry_after_secs } if retry_after_secs == DEFAULT_RETRY_AFTER_SECS
        );
    }

    #[test]
    fn non_success_status_is_api_error() {
        let err = parse_prediction_body(422, r#"{"detail":"invalid version"}"#).unwrap_err();
        assert_matches!(err, ReplicateApiError::ApiError { status: 422, ref body } if body.contains("invalid version"));
    }

    #[test]
    fn missing_id_is_decode_error() {
        let err = parse_prediction_body(201, r#"{"status":"starting"}"#).unwrap_err();
        assert_matches!(err, ReplicateApiError::Decode(_));
    }

    #[test]
    fn unknown_status_deserializes() {
        let p = parse_prediction_body(200, r#"{"id":"a","status":"queued"}"#).unwrap();
        assert_eq!(p.status, PredictionStatus::Unknown);
        assert!(!p.status.is_pending());
    }

    #[test]
    fn first_output_handles_string_and_array() {
        let p = parse_prediction_body(200, r#"{"id":"a","status":"succeeded","output":"https://x"}"#)
            .unwrap();
        assert_eq!(p.first_output(), Some("https://x"));

        let p = parse_prediction_body(200, r#"{"id":"a","status":"succeeded","output":[]}"#).unwrap();
        assert_eq!(p.first_output(), None);

        let p = parse_prediction_body(200, r#"{"id":"a","status":"succeeded","output":null}"#)
            .unwrap();
        assert_eq!(p.first_output(), None);
    }

    #[test]
    fn error_message_formats() {
        let p = parse_prediction_body(200, r#"{"id":"a","status":"failed","error":"NSFW"}"#)
            .unwrap();
        assert_eq!(p.error_message().as_deref(), Some("NSFW"));

        let p = parse_prediction_body(200, r#"{"id":"a","status":"failed","error":null}"#).unwrap();
        assert_eq!(p.error_message(), None);
    }

    #[test]
    fn pending_statuses() {
        assert!(PredictionStatus::Starting.is_pending());
        assert!(PredictionStatus::Processing.is_pending());
        assert!(!PredictionStatus::Succeeded.is_pending());
        assert!(!PredictionStatus::Failed.is_pending());
    }
}
