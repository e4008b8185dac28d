//! Subject categories and render styles shared across the workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Subject type
// ---------------------------------------------------------------------------

pub const SUBJECT_PERSON: &str = "person";
pub const SUBJECT_ANIMAL: &str = "animal";
pub const SUBJECT_VEHICLE: &str = "vehicle";
pub const SUBJECT_PLANT: &str = "plant";
pub const SUBJECT_OBJECT: &str = "object";

/// Coarse classification bucket for a user's subject description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Person,
    Animal,
    Vehicle,
    Plant,
    Object,
}

impl SubjectType {
    /// Every category, highest tie-break priority first.
    pub const ALL: [SubjectType; 5] = [
        SubjectType::Person,
        SubjectType::Animal,
        SubjectType::Vehicle,
        SubjectType::Plant,
        SubjectType::Object,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => SUBJECT_PERSON,
            Self::Animal => SUBJECT_ANIMAL,
            Self::Vehicle => SUBJECT_VEHICLE,
            Self::Plant => SUBJECT_PLANT,
            Self::Object => SUBJECT_OBJECT,
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Render style
// ---------------------------------------------------------------------------

pub const STYLE_REALISTIC: &str = "realistic";
pub const STYLE_ILLUSTRATION: &str = "illustration";
pub const STYLE_SILHOUETTE: &str = "silhouette";

pub const VALID_STYLES: &[&str] = &[STYLE_REALISTIC, STYLE_ILLUSTRATION, STYLE_SILHOUETTE];

/// Rendering aesthetic applied as a fixed descriptive suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    #[default]
    Realistic,
    Illustration,
    Silhouette,
}

impl RenderStyle {
    /// Strict parse. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            STYLE_REALISTIC => Ok(Self::Realistic),
            STYLE_ILLUSTRATION => Ok(Self::Illustration),
            STYLE_SILHOUETTE => Ok(Self::Silhouette),
            _ => Err(format!(
                "Invalid style '{s}'. Must be one of: {}",
                VALID_STYLES.join(", ")
            )),
        }
    }

    /// Lenient parse used at the request boundary: a missing or unknown
    /// style falls back to [`RenderStyle::Realistic`].
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(|s| Self::parse(s).ok()).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Realistic => STYLE_REALISTIC,
            Self::Illustration => STYLE_ILLUSTRATION,
            Self::Silhouette => STYLE_SILHOUETTE,
        }
    }
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
