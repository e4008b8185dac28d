//! Surface and prop detection.
//!
//! A subject "sitting on a bench" should keep the bench after background
//! removal; a subject "standing on the street" should not keep the street.

use std::sync::LazyLock;

use regex::Regex;

/// Matches "sitting/standing/laying on (a|an|the) <one or two words>" and
/// bare "on <words>". Capture group 1 holds the surface words.
pub const SURFACE_PATTERN: &str =
    r"\b(?:laying?|sitting|standing|on)\s+(?:on\s+)?(?:(?:a|an|the)\s+)?(\w+(?:\s+\w+)?)";

static SURFACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SURFACE_PATTERN).expect("valid regex"));

/// Generic environment words that are never kept as props.
pub const EXCLUDED_SURFACES: &[&str] = &[
    "background", "street", "sidewalk", "floor", "ground", "pavement", "road", "grass",
];

/// Detect a surface or prop the subject rests on.
///
/// Only the first match is considered. Returns the clause to append to the
/// subject description, or `None` when there is no match or the surface is
/// generic background.
pub fn detect_surface(prompt: &str) -> Option<String> {
    let lower = prompt.to_lowercase();
    let surface = SURFACE_RE.captures(&lower)?.get(1)?.as_str();

    let head = surface.split_whitespace().next().unwrap_or(surface);
    if EXCLUDED_SURFACES.contains(&head) {
        return None;
    }

    Some(format!(
        ", including the {surface} they are on, subject plus all visible items"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn towel_is_kept() {
        let clause = detect_surface("dog sitting on a towel").unwrap();
        assert_eq!(
            clause,
            ", including the towel they are on, subject plus all visible items"
        );
    }

    #[test]
    fn street_is_excluded() {
        assert_eq!(detect_surface("dog sitting on the street"), None);
        assert_eq!(detect_surface("man standing on the street corner"), None);
    }

    #[test]
    fn every_excluded_surface_is_dropped() {
        for surface in EXCLUDED_SURFACES {
            assert_eq!(detect_surface(&format!("cat laying on {surface}")), None);
        }
    }

    #[test]
    fn captures_up_to_two_words() {
        let clause = detect_surface("woman sitting on a park bench").unwrap();
        assert!(clause.contains("the park bench they are on"));
    }

    #[test]
    fn on_inside_a_word_does_not_match() {
        assert_eq!(detect_surface("person walking"), None);
    }

    #[test]
    fn no_preposition_no_clause() {
        assert_eq!(detect_surface("red sports car"), None);
        assert_eq!(detect_surface(""), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let clause = detect_surface("Cat Laying On A Blanket").unwrap();
        assert!(clause.contains("blanket"));
    }
}
