//! Demographic variety for person prompts.
//!
//! When a prompt describing a single person leaves race, gender, or age
//! unspecified, a value is drawn at random for each missing attribute so
//! repeated generations of the same text do not converge on one default.
//! Body type and clothing style are added by independent coin flips.

use rand::seq::IndexedRandom;
use rand::Rng;

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

pub const RACES: &[&str] = &[
    "East Asian", "South Asian", "Black", "White", "Hispanic", "Latino", "Latina",
    "Middle Eastern", "Native American", "Indigenous", "Pacific Islander",
    "African", "European", "Mediterranean", "Scandinavian", "Celtic",
    "mixed race", "multiracial",
];

pub const GENDERS: &[&str] = &["man", "woman", "person"];

pub const AGES: &[&str] = &[
    "young adult", "adult", "middle-aged", "elderly", "senior", "teenager",
    "child", "young professional", "retired",
];

pub const BODY_TYPES: &[&str] = &[
    "average build", "athletic build", "slender", "curvy", "heavyset",
    "tall", "short", "petite", "plus-size",
];

pub const CLOTHING_STYLES: &[&str] = &[
    "casual clothing", "business casual", "professional attire", "streetwear",
    "bohemian style", "preppy", "athletic wear", "vintage clothing",
    "modern fashion", "classic style", "minimalist clothing",
];

/// Chance of adding a body type descriptor.
pub const BODY_TYPE_PROBABILITY: f64 = 0.3;
/// Chance of adding a clothing style descriptor.
pub const CLOTHING_STYLE_PROBABILITY: f64 = 0.5;

/// Descriptor prepended when a youth term is present and no addition
/// already implies a minor.
pub const YOUTH_REINFORCEMENT: &str = "young";

// ---------------------------------------------------------------------------
// Detection keywords
// ---------------------------------------------------------------------------

/// Race terms beyond [`RACES`] that also count as "already specified".
const EXTRA_RACE_KEYWORDS: &[&str] = &[
    "asian", "black", "white", "hispanic", "latino", "african", "european",
    "caucasian", "african-american", "afro", "latina", "indian", "chinese", "japanese", "korean",
];

const GENDER_KEYWORDS: &[&str] = &[
    "man", "woman", "male", "female", "boy", "girl", "guy", "lady", "gentleman", "gentlewoman",
    "men", "women", "child", "kid", "kids", "baby", "toddler", "infant",
];

const AGE_KEYWORDS: &[&str] = &[
    "young", "old", "elderly", "senior", "teen", "teenage", "teenager", "child", "kid", "kids",
    "adult", "middle-aged", "middle aged", "toddler", "baby", "infant", "children",
];

const YOUTH_KEYWORDS: &[&str] = &["kid", "kids", "child", "children", "toddler", "baby", "infant"];

const MULTIPLE_PEOPLE_KEYWORDS: &[&str] = &[
    "two", "couple", "group", "crowd", "people", "pair", "friends", "family",
];

/// Additions that already read as a minor, suppressing the youth reinforcement.
const YOUTH_MARKERS: &[&str] = &["young", "child", "kid"];

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Which demographic attributes a prompt already pins down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecifiedDiversity {
    pub has_race: bool,
    pub has_gender: bool,
    pub has_age: bool,
    pub has_youth_term: bool,
    pub has_multiple_people: bool,
}

/// Scan the prompt's whitespace tokens for demographic terms.
///
/// Matching is case-insensitive and a token counts if it contains the term,
/// so "women's" still registers as a gender mention.
pub fn detect_specified(prompt: &str) -> SpecifiedDiversity {
    let lower = prompt.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    let any_word_contains = |keywords: &[&str]| {
        keywords
            .iter()
            .map(|kw| kw.to_lowercase())
            .any(|kw| words.iter().any(|word| word.contains(kw.as_str())))
    };

    // Gender is checked on letters only so "man," and "woman's" both match.
    let has_gender = GENDER_KEYWORDS.iter().any(|kw| {
        words.iter().any(|word| {
            let clean: String = word.chars().filter(|c| c.is_ascii_lowercase()).collect();
            clean.contains(kw)
        })
    });

    SpecifiedDiversity {
        has_race: any_word_contains(RACES) || any_word_contains(EXTRA_RACE_KEYWORDS),
        has_gender,
        has_age: any_word_contains(AGE_KEYWORDS),
        has_youth_term: any_word_contains(YOUTH_KEYWORDS),
        has_multiple_people: any_word_contains(MULTIPLE_PEOPLE_KEYWORDS),
    }
}

// ---------------------------------------------------------------------------
// Injection
// ---------------------------------------------------------------------------

/// Compute the descriptors to prepend to a person prompt.
///
/// Returns an empty list for prompts about several people. Otherwise each
/// missing attribute gets one random value, in race, gender, age order,
/// followed by optional body type and clothing style draws.
pub fn inject_diversity<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> Vec<&'static str> {
    let specified = detect_specified(prompt);
    let mut additions = Vec::new();

    if specified.has_multiple_people {
        return additions;
    }

    let missing = [
        (specified.has_race, RACES),
        (specified.has_gender, GENDERS),
        (specified.has_age, AGES),
    ];
    for (present, values) in missing {
        if !present {
            additions.extend(values.choose(rng).copied());
        }
    }

    let implies_minor = additions
        .iter()
        .any(|a| YOUTH_MARKERS.iter().any(|marker| a.contains(marker)));
    if specified.has_youth_term && !implies_minor {
        additions.insert(0, YOUTH_REINFORCEMENT);
    }

    if rng.random_bool(BODY_TYPE_PROBABILITY) {
        additions.extend(BODY_TYPES.choose(rng).copied());
    }
    if rng.random_bool(CLOTHING_STYLE_PROBABILITY) {
        additions.extend(CLOTHING_STYLES.choose(rng).copied());
    }

    additions
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    // -- detect_specified --

    #[test]
    fn bare_person_specifies_nothing() {
        assert_eq!(detect_specified("person"), SpecifiedDiversity::default());
    }

    #[test]
    fn detects_race_gender_age() {
        let d = detect_specified("elderly Korean woman reading");
        assert!(d.has_race);
        assert!(d.has_gender);
        assert!(d.has_age);
        assert!(!d.has_multiple_people);
    }

    #[test]
    fn gender_ignores_punctuation() {
        assert!(detect_specified("a man, walking").has_gender);
    }

    #[test]
    fn youth_terms_detected() {
        let d = detect_specified("kid with a kite");
        assert!(d.has_youth_term);
        assert!(d.has_gender);
        assert!(d.has_age);
    }

    #[test]
    fn multiple_people_detected() {
        assert!(detect_specified("two people walking").has_multiple_people);
        assert!(detect_specified("a family picnic").has_multiple_people);
        assert!(!detect_specified("a jogger").has_multiple_people);
    }

    // -- inject_diversity --

    #[test]
    fn multiple_people_get_no_additions() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(inject_diversity("a group of friends", &mut rng).is_empty());
        }
    }

    #[test]
    fn unspecified_person_gets_race_gender_age_in_order() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let additions = inject_diversity("person", &mut rng);
            assert!(additions.len() >= 3 && additions.len() <= 5);
            assert!(RACES.contains(&additions[0]));
            assert!(GENDERS.contains(&additions[1]));
            assert!(AGES.contains(&additions[2]));
            for extra in &additions[3..] {
                assert!(BODY_TYPES.contains(extra) || CLOTHING_STYLES.contains(extra));
            }
        }
    }

    #[test]
    fn specified_attributes_are_not_overridden() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let additions = inject_diversity("elderly Korean woman", &mut rng);
            assert!(additions.iter().all(|a| !RACES.contains(a)));
            assert!(additions.iter().all(|a| !GENDERS.contains(a)));
            assert!(additions.iter().all(|a| !AGES.contains(a)));
        }
    }

    #[test]
    fn youth_term_prepends_young() {
        // "child" covers gender and age, so only race is drawn and "young" leads.
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let additions = inject_diversity("child", &mut rng);
            assert_eq!(additions[0], YOUTH_REINFORCEMENT);
            assert!(RACES.contains(&additions[1]));
        }
    }

    #[test]
    fn optional_draws_vary_across_calls() {
        let mut rng = StdRng::seed_from_u64(42);
        let lengths: std::collections::HashSet<usize> = (0..200)
            .map(|_| inject_diversity("Black man", &mut rng).len())
            .collect();
        // Age is the only mandatory draw; body type and clothing are optional.
        assert!(lengths.contains(&1));
        assert!(lengths.len() > 1);
    }
}
