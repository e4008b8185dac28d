//! Style modifier, safety, and context phrase tables.

use crate::types::{RenderStyle, SubjectType};

/// A per-style modifier table: explicit entries per subject plus a fallback.
pub struct StyleTable {
    pub entries: &'static [(SubjectType, &'static str)],
    pub default: &'static str,
}

impl StyleTable {
    pub fn lookup(&self, subject: SubjectType) -> &'static str {
        self.entries
            .iter()
            .find(|(s, _)| *s == subject)
            .map(|(_, phrase)| *phrase)
            .unwrap_or(self.default)
    }
}

pub const REALISTIC: StyleTable = StyleTable {
    entries: &[
        (
            SubjectType::Person,
            "photorealistic, authentic skin texture, crisp detail, sharp focus, professional \
             studio lighting, ultra detailed, high resolution, lifelike",
        ),
        (
            SubjectType::Animal,
            "photorealistic, detailed fur/feathers, crisp detail, sharp focus, professional \
             lighting, wildlife photography style, ultra detailed",
        ),
        (
            SubjectType::Vehicle,
            "photorealistic, automotive photography, detailed reflections, crisp detail, sharp \
             focus, studio lighting, ultra detailed",
        ),
        (
            SubjectType::Plant,
            "photorealistic, botanical photography, detailed textures, crisp detail, sharp \
             focus, natural lighting, ultra detailed",
        ),
        (
            SubjectType::Object,
            "photorealistic, product photography, detailed materials, crisp detail, sharp \
             focus, studio lighting, ultra detailed",
        ),
    ],
    default: "photorealistic, detailed texture, crisp detail, sharp focus, professional \
              lighting, ultra detailed",
};

pub const ILLUSTRATION: StyleTable = StyleTable {
    entries: &[
        (
            SubjectType::Person,
            "flat vector architectural entourage illustration, solid color blocks, no \
             gradients, muted pastel color palette, minimal detail, no facial features, clean \
             crisp edges, full body figure, contemporary clothing, diverse representation, \
             cutout people style, 2D flat illustration",
        ),
        (
            SubjectType::Animal,
            "flat vector illustration, solid color shapes, minimal detail, no gradients, clean \
             edges, architectural entourage style, 2D flat style",
        ),
        (
            SubjectType::Vehicle,
            "flat vector architectural entourage illustration, solid color blocks, no \
             gradients, minimal detail, clean crisp edges, isometric or side view, muted \
             colors, 2D flat illustration, not photorealistic",
        ),
        (
            SubjectType::Plant,
            "flat vector botanical illustration, solid color shapes, minimal detail, no \
             gradients, clean edges, architectural entourage style",
        ),
        (
            SubjectType::Object,
            "flat vector product illustration, solid color blocks, minimal detail, clean \
             edges, architectural entourage style, muted pastel colors",
        ),
    ],
    default: "flat vector architectural illustration, solid color blocks, minimal detail, no \
              gradients, muted pastel palette, clean crisp edges, 2D flat style",
};

/// Applied to every subject when the silhouette style is requested.
pub const SILHOUETTE_MODIFIER: &str = "pure black silhouette, vector graphic style, razor sharp \
    edges, absolutely no gradients, no blur, no texture, no interior details, no shading, flat \
    solid black fill, high contrast against white, clean cutout shape, no background elements, \
    no extra objects";

/// Mandatory disclaimers per subject. Subjects without an entry add nothing.
pub const SAFETY_PHRASES: &[(SubjectType, &str)] = &[
    (
        SubjectType::Person,
        "wearing complete everyday outfit, fully clothed, appropriate attire, modest clothing",
    ),
    (
        SubjectType::Vehicle,
        "empty vehicle, no driver, no passengers, no people inside or around",
    ),
];

/// Always appended last. A flat white backdrop keeps background removal clean.
pub const CONTEXT_PHRASE: &str = "isolated subject on solid pure white background, high key \
    lighting, minimal shadows, centered in frame, sharp focus";

/// Resolve the style modifier for a style and subject.
pub fn style_modifier(style: RenderStyle, subject: SubjectType) -> &'static str {
    match style {
        RenderStyle::Silhouette => SILHOUETTE_MODIFIER,
        RenderStyle::Realistic => REALISTIC.lookup(subject),
        RenderStyle::Illustration => ILLUSTRATION.lookup(subject),
    }
}

/// Safety phrase for a subject, or `""` when none applies.
pub fn safety_phrase(subject: SubjectType) -> &'static str {
    SAFETY_PHRASES
        .iter()
        .find(|(s, _)| *s == subject)
        .map(|(_, phrase)| *phrase)
        .unwrap_or("")
}
