//! Handlers for entourage prompt composition and image generation.
//!
//! Routes:
//! - `POST /entourage/prompt` -- compose a prompt without generating
//! - `POST /entourage`        -- compose, generate, and remove background

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use entourage_core::composer::{build_entourage_prompt_random, validate_prompt, ComposedPrompt};
use entourage_core::types::{RenderStyle, SubjectType};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body shared by both entourage endpoints.
///
/// Unknown fields are ignored so older clients that still send account
/// identifiers keep working.
#[derive(Debug, Deserialize)]
pub struct EntourageRequest {
    pub prompt: String,
    /// `realistic`, `illustration`, or `silhouette`; anything else is realistic.
    #[serde(default)]
    pub style: Option<String>,
}

/// Payload returned by `POST /entourage`.
#[derive(Debug, Serialize)]
pub struct EntourageResponse {
    pub url: String,
    pub subject_type: SubjectType,
    pub prompt: String,
    pub background_removed: bool,
}

/// Validate the request and compose the generation prompt.
fn compose(input: &EntourageRequest) -> AppResult<ComposedPrompt> {
    validate_prompt(&input.prompt)?;
    let style = RenderStyle::parse_or_default(input.style.as_deref());
    let composed = build_entourage_prompt_random(&input.prompt, style);

    tracing::info!(
        subject_type = %composed.subject_type,
        diversity_injected = composed.diversity_injected,
        style = %composed.style,
        "Composed entourage prompt",
    );
    tracing::debug!(prompt = %composed.prompt, "Full generation prompt");

    Ok(composed)
}

/// POST /api/v1/entourage/prompt
///
/// Returns the composed prompt and its classification. Makes no external
/// calls, so it works without a Replicate token.
pub async fn preview_prompt(Json(input): Json<EntourageRequest>) -> AppResult<impl IntoResponse> {
    let composed = compose(&input)?;
    Ok(Json(DataResponse { data: composed }))
}

/// POST /api/v1/entourage
///
/// Composes the prompt, runs image generation and background removal, and
/// returns the final image URL. Responses are marked uncacheable.
pub async fn generate_entourage(
    State(state): State<AppState>,
    Json(input): Json<EntourageRequest>,
) -> AppResult<impl IntoResponse> {
    let pipeline = state.pipeline.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("Replicate API token not configured".to_string())
    })?;

    let composed = compose(&input)?;
    let generated = pipeline.generate(&composed).await?;

    let headers = [
        (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
    ];

    Ok((
        headers,
        Json(DataResponse {
            data: EntourageResponse {
                url: generated.url,
                subject_type: composed.subject_type,
                prompt: composed.prompt,
                background_removed: generated.background_removed,
            },
        }),
    ))
}
