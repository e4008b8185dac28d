//! Final prompt assembly.
//!
//! Output layout, comma separated:
//!
//! ```text
//! framing, [diversity, ]user prompt[surface clause], style modifier[, safety], context
//! ```

use rand::Rng;
use serde::Serialize;

use crate::diversity::inject_diversity;
use crate::error::CoreError;
use crate::style::{safety_phrase, style_modifier, CONTEXT_PHRASE};
use crate::subject::{classify, refine_plant_framing};
use crate::surface::detect_surface;
use crate::types::{RenderStyle, SubjectType};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum prompt length in characters after trimming.
pub const MIN_PROMPT_LENGTH: usize = 3;

/// Maximum prompt length in characters.
pub const MAX_PROMPT_LENGTH: usize = 1_000;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject prompts too short to describe a subject, or unreasonably long.
///
/// The composer itself accepts anything; this runs at the request boundary.
pub fn validate_prompt(text: &str) -> Result<(), CoreError> {
    let len = text.trim().chars().count();
    if len < MIN_PROMPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt too short: must be at least {MIN_PROMPT_LENGTH} characters (got {len})"
        )));
    }
    if len > MAX_PROMPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt exceeds maximum length of {MAX_PROMPT_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// An elaborated generation prompt plus how it was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub subject_type: SubjectType,
    pub style: RenderStyle,
    pub diversity_injected: bool,
}

/// Build the full image-model prompt for a user description.
///
/// Total over all inputs. The only non-determinism is the diversity draw
/// for person subjects, which uses `rng`.
pub fn build_entourage_prompt<R: Rng + ?Sized>(
    user_prompt: &str,
    style: RenderStyle,
    rng: &mut R,
) -> ComposedPrompt {
    let subject_type = classify(user_prompt);

    let mut framing = subject_type.framing();
    if subject_type == SubjectType::Plant {
        framing = refine_plant_framing(user_prompt, framing);
    }

    let mut diversity_injected = false;
    let mut enhanced = user_prompt.to_string();
    if subject_type == SubjectType::Person {
        let additions = inject_diversity(user_prompt, rng);
        if !additions.is_empty() {
            enhanced = format!("{}, {user_prompt}", additions.join(", "));
            diversity_injected = true;
        }
    }

    // Detected on the original text so diversity words never look like props.
    let surface = detect_surface(user_prompt).unwrap_or_default();

    let mut prompt = format!(
        "{framing}, {enhanced}{surface}, {}",
        style_modifier(style, subject_type)
    );

    let safety = safety_phrase(subject_type);
    if !safety.is_empty() {
        prompt.push_str(", ");
        prompt.push_str(safety);
    }

    prompt.push_str(", ");
    prompt.push_str(CONTEXT_PHRASE);

    ComposedPrompt {
        prompt,
        subject_type,
        style,
        diversity_injected,
    }
}

/// [`build_entourage_prompt`] with the thread-local RNG.
pub fn build_entourage_prompt_random(user_prompt: &str, style: RenderStyle) -> ComposedPrompt {
    build_entourage_prompt(user_prompt, style, &mut rand::rng())
}
