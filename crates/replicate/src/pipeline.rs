//! Two-stage entourage generation: image model, then background removal.
//!
//! Image generation failures fail the request. Background removal is
//! best-effort: it is retried a bounded number of times and, if it never
//! succeeds, the original image is returned instead.

use std::sync::Arc;
use std::time::Duration;

use entourage_core::composer::ComposedPrompt;
use serde::Serialize;

use crate::api::{Prediction, PredictionBackend, PredictionStatus, ReplicateApiError};
use crate::polling::{wait_for_prediction, PollConfig, PollError};

/// Default image generation model version.
pub const DEFAULT_FLUX_VERSION: &str =
    "6e4a938f85952bdabcc15aa329178c4d681c52bf25a0342403287dc26944661d";

/// Default background removal model version.
pub const DEFAULT_REMBG_VERSION: &str =
    "fb8af171cfa1616ddcf1242c093f9c46bcada5ad4cf6f2fbe8b81b330ec5c003";

/// Query parameter appended to returned URLs so clients never reuse a stale
/// cached image.
pub const CACHE_BUSTER_PARAM: &str = "cb";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Retry schedule for the background removal stage.
#[derive(Debug, Clone)]
pub struct RemovalRetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wait before the first attempt.
    pub first_delay: Duration,
    /// Wait before every retry.
    pub retry_delay: Duration,
}

impl Default for RemovalRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            first_delay: Duration::from_secs(1),
            retry_delay: Duration::from_secs(8),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub flux_version: String,
    pub rembg_version: String,
    pub poll: PollConfig,
    pub removal: RemovalRetryConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            flux_version: DEFAULT_FLUX_VERSION.to_string(),
            rembg_version: DEFAULT_REMBG_VERSION.to_string(),
            poll: PollConfig::default(),
            removal: RemovalRetryConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// Input payload for the image generation model.
#[derive(Debug, Serialize)]
pub struct FluxInput<'a> {
    pub prompt: &'a str,
    pub go_fast: bool,
    pub num_outputs: u32,
    pub aspect_ratio: &'static str,
    pub output_format: &'static str,
}

impl<'a> FluxInput<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            go_fast: true,
            num_outputs: 1,
            aspect_ratio: "1:1",
            output_format: "png",
        }
    }
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedEntourage {
    /// Final image URL with cache-busting parameter.
    pub url: String,
    /// Image URL produced by the generation model, before background removal.
    pub source_url: String,
    /// Whether `url` points at the background-removed cutout.
    pub background_removed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to create image prediction: {0}")]
    Create(#[from] ReplicateApiError),

    #[error("Failed while waiting for image prediction: {0}")]
    Poll(#[from] PollError),

    #[error("Image generation failed with status {status:?}: {}", .error.as_deref().unwrap_or("no output"))]
    GenerationFailed {
        status: PredictionStatus,
        error: Option<String>,
    },
}

impl PipelineError {
    /// Suggested wait when the failure was an upstream rate limit.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Create(ReplicateApiError::RateLimited { retry_after_secs })
            | Self::Poll(PollError::Api(ReplicateApiError::RateLimited { retry_after_secs })) => {
                Some(*retry_after_secs)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Drives a [`PredictionBackend`] through generation and background removal.
pub struct EntouragePipeline {
    backend: Arc<dyn PredictionBackend>,
    config: PipelineConfig,
}

impl EntouragePipeline {
    pub fn new(backend: Arc<dyn PredictionBackend>, config: PipelineConfig) -> Self {
        Self { backend, config }
    }

    /// Generate an image for a composed prompt and strip its background.
    pub async fn generate(
        &self,
        composed: &ComposedPrompt,
    ) -> Result<GeneratedEntourage, PipelineError> {
        let source_url = self.generate_image(&composed.prompt).await?;
        tracing::info!(url = %source_url, "Image generated");

        let (final_url, background_removed) = match self.remove_background(&source_url).await {
            Some(cutout) => (cutout, true),
            None => {
                tracing::warn!("Background removal failed after retries, returning original image");
                (source_url.clone(), false)
            }
        };

        let url = append_cache_buster(&final_url, chrono::Utc::now().timestamp_millis());
        tracing::info!(%url, background_removed, "Entourage ready");

        Ok(GeneratedEntourage {
            url,
            source_url,
            background_removed,
        })
    }

    /// Run the image model and return the first output URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, PipelineError> {
        let input = serde_json::to_value(FluxInput::new(prompt))
            .map_err(ReplicateApiError::Decode)?;

        let created = self
            .backend
            .create_prediction(&self.config.flux_version, input)
            .await?;
        tracing::debug!(prediction_id = %created.id, "Image prediction created");

        let result = wait_for_prediction(self.backend.as_ref(), &created.id, &self.config.poll)
            .await?;

        match (result.status, result.first_output()) {
            (PredictionStatus::Succeeded, Some(url)) => Ok(url.to_string()),
            (status, _) => {
                tracing::error!(
                    prediction_id = %result.id,
                    ?status,
                    error = ?result.error_message(),
                    "Image generation failed",
                );
                Err(PipelineError::GenerationFailed {
                    status,
                    error: result.error_message(),
                })
            }
        }
    }

    /// Try to produce a background-removed version of `image_url`.
    ///
    /// Returns `None` once every attempt has failed.
    async fn remove_background(&self, image_url: &str) -> Option<String> {
        let retry = &self.config.removal;
        let total_attempts = retry.max_retries + 1;

        for attempt in 1..=total_attempts {
            let delay = if attempt == 1 {
                retry.first_delay
            } else {
                retry.retry_delay
            };
            tracing::debug!(
                attempt,
                total_attempts,
                delay_ms = delay.as_millis() as u64,
                "Waiting before background removal",
            );
            tokio::time::sleep(delay).await;

            match self.remove_background_once(image_url).await {
                Ok(url) => {
                    tracing::info!(attempt, %url, "Background removed");
                    return Some(url);
                }
                Err(reason) => {
                    tracing::warn!(attempt, total_attempts, %reason, "Background removal attempt failed");
                }
            }
        }

        None
    }

    /// A single background removal attempt. Errors are returned as log text.
    async fn remove_background_once(&self, image_url: &str) -> Result<String, String> {
        let input = serde_json::json!({ "image": image_url });

        let created = self
            .backend
            .create_prediction(&self.config.rembg_version, input)
            .await
            .map_err(|e| match e {
                ReplicateApiError::RateLimited { retry_after_secs } => {
                    format!("rate limited, retry after {retry_after_secs}s")
                }
                other => format!("failed to create prediction: {other}"),
            })?;

        let result: Prediction =
            wait_for_prediction(self.backend.as_ref(), &created.id, &self.config.poll)
                .await
                .map_err(|e| e.to_string())?;

        if result.status != PredictionStatus::Succeeded {
            return Err(format!(
                "prediction {} ended with status {:?}: {}",
                result.id,
                result.status,
                result.error_message().unwrap_or_default()
            ));
        }

        match result.first_output() {
            Some(url) if url.starts_with("http") => Ok(url.to_string()),
            other => Err(format!("unexpected output {other:?}")),
        }
    }
}

/// Append `cb=<millis>` to a URL, respecting any existing query string.
pub fn append_cache_buster(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{CACHE_BUSTER_PARAM}={millis}")
}
