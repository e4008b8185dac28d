//! Subject classification by weighted keyword scoring.
//!
//! Each category owns a keyword list and a framing phrase. A prompt is scored
//! against every list and the best-scoring category wins, with ties broken
//! by [`SubjectType::ALL`] order.

use crate::types::SubjectType;

// ---------------------------------------------------------------------------
// Scoring weights
// ---------------------------------------------------------------------------

/// Awarded when a whitespace token equals the keyword.
pub const WORD_MATCH_SCORE: u32 = 3;
/// Awarded when the keyword only appears as a substring of the prompt.
pub const SUBSTRING_MATCH_SCORE: u32 = 1;
/// Added on top of either award when the prompt starts with the keyword.
pub const PREFIX_BONUS: u32 = 2;

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

pub const PERSON_KEYWORDS: &[&str] = &[
    "person", "people", "human", "humans", "individual", "individuals", "figure", "figures",
    "man", "men", "woman", "women", "male", "female", "guy", "guys", "lady", "ladies",
    "gentleman", "gentlemen", "gentlewoman", "businessman", "businessmen", "businesswoman",
    "businesswomen", "child", "children", "kid", "kids", "boy", "boys", "girl", "girls", "teen",
    "teens", "teenager", "teenagers", "adolescent", "youth", "youngster", "toddler", "toddlers",
    "adult", "adults", "grown-up", "parent", "parents", "mother", "father", "mom", "dad",
    "grandmother", "grandfather", "grandma", "grandpa", "grandparent", "baby", "infant",
    "pedestrian", "pedestrians", "bystander", "onlooker", "passerby", "commuter",
    "crowd", "crowds", "group", "groups", "family", "families", "couple", "couples",
    "elderly", "senior", "seniors", "old", "older", "young", "younger", "middle-aged",
    // "sitting" is deliberately absent: animals sit too.
    "walking", "standing", "running", "jogging", "strolling", "wandering",
    "professional", "worker", "employee", "colleague", "student", "teacher", "doctor",
    "nurse", "police", "officer", "firefighter", "chef", "waiter", "waitress",
    "construction worker", "office worker", "business person",
];

pub const ANIMAL_KEYWORDS: &[&str] = &[
    "dog", "dogs", "puppy", "puppies", "pup", "canine", "retriever", "shepherd", "terrier",
    "poodle", "labrador", "beagle", "bulldog", "husky", "malamute", "collie", "greyhound",
    "dachshund", "rottweiler", "doberman", "boxer", "pug", "chihuahua", "shiba", "corgi",
    "dalmatian", "cat", "cats", "kitten", "kittens", "kitty", "feline", "tabby", "calico",
    "siamese", "persian", "maine coon", "ragdoll", "sphynx", "bengal", "bird", "birds", "avian",
    "animal", "animals", "pet", "pets", "horse", "horses", "pony", "mare", "stallion",
    "cow", "cows", "cattle", "bull", "ox", "sheep", "goat", "goats", "baby goat", "chicken",
    "hen", "rooster", "chick", "duck", "ducks", "duckling", "goose", "geese", "gosling",
    "pig", "pigs", "hog", "swine", "piglet", "boar", "rabbit", "rabbits", "bunny", "bunnies",
    "deer", "fawn", "buck", "doe", "stag", "elephant", "lion", "lions", "lioness", "tiger",
    "tigers", "bear", "bears", "wolf", "wolves", "fox", "foxes", "squirrel", "chipmunk",
    "mouse", "mice", "rat", "rats", "hamster", "gerbil", "guinea pig", "chinchilla",
    "parrot", "parakeet", "cockatiel", "macaw", "parrotlet", "pigeon", "pigeons", "dove",
    "doves", "seagull", "seagulls", "gull", "eagle", "eagles", "hawk", "hawks", "falcon",
    "owl", "owls", "butterfly", "butterflies", "moth", "bee", "bees", "wasp", "hornet",
    "insect", "insects", "bug", "bugs", "spider", "spiders", "tarantula", "scorpion",
    "fish", "fishes", "shark", "sharks", "dolphin", "dolphins", "whale", "whales",
    "turtle", "turtles", "tortoise", "snake", "snakes", "python", "cobra", "viper",
    "lizard", "lizards", "iguana", "gecko", "chameleon", "frog", "frogs", "toad", "toads",
    // Fantasy creatures and robots frame like animals.
    "alien", "aliens", "creature", "creatures", "monster", "monsters", "dragon", "dragons",
    "unicorn", "unicorns", "robot", "robots", "cyborg", "mutant", "beast", "beasts",
];

pub const VEHICLE_KEYWORDS: &[&str] = &[
    "car", "truck", "vehicle", "automobile", "van", "suv", "sedan", "hatchback",
    "convertible", "coupe", "wagon", "minivan", "pickup", "bus", "motorcycle",
    "scooter", "bicycle", "bike", "train", "locomotive", "airplane", "plane",
    "helicopter", "boat", "ship", "yacht", "sailboat", "canoe", "kayak", "jet ski",
    "tractor", "bulldozer", "crane", "forklift", "ambulance", "fire truck", "police car",
    "taxi", "limo", "cart", "wagon", "carriage", "wheelchair", "stroller", "skateboard",
];

pub const PLANT_KEYWORDS: &[&str] = &[
    "tree", "plant", "flower", "bush", "shrub", "palm", "fern", "succulent",
    "cactus", "rose", "tulip", "daisy", "sunflower", "lily", "orchid", "bamboo",
    "pine", "oak", "maple", "birch", "willow", "palm tree", "ficus", "monstera",
    "ivy", "vine", "grass", "hedge", "topiary", "bonsai", "potted plant",
    "apple tree", "cherry tree", "lemon tree", "fruit tree", "evergreen", "deciduous",
];

pub const OBJECT_KEYWORDS: &[&str] = &[
    "object", "item", "thing", "furniture", "chair", "table", "desk", "sofa", "couch",
    "lamp", "light", "fixture", "appliance", "machine", "equipment", "tool", "instrument",
    "device", "gadget", "electronics", "computer", "laptop", "phone", "tablet", "monitor",
    "tv", "television", "speaker", "camera", "lens", "tripod", "drone", "umbrella",
    "backpack", "bag", "suitcase", "luggage", "box", "container", "crate", "barrel",
    "basket", "bin", "bucket", "cage", "fence", "gate", "sign", "pole", "post",
    "bench", "trash can", "fire hydrant", "mailbox", "newspaper box", "parking meter",
    "street light", "traffic light", "stop sign", "billboard", "awning", "canopy",
    "tent", "canopy", "umbrella", "flag", "banner", "poster", "signage",
];

/// Tree terms; checked first when refining plant framing.
pub const TREE_KEYWORDS: &[&str] = &[
    "tree", "pine", "oak", "maple", "birch", "willow", "palm", "apple tree", "cherry tree",
    "lemon tree", "fruit tree", "evergreen", "deciduous", "branch", "branches", "leaf",
    "leaves", "foliage", "canopy",
];

pub const FERN_KEYWORDS: &[&str] = &[
    "fern", "ferns", "frond", "fronds", "maidenhair", "bracken", "pteridophyte",
];

// ---------------------------------------------------------------------------
// Framing phrases
// ---------------------------------------------------------------------------

pub const PERSON_FRAMING: &str =
    "full body person from head to toe, complete figure visible, natural candid pose";
pub const ANIMAL_FRAMING: &str =
    "complete creature fully visible, entire being in frame, natural pose";
pub const VEHICLE_FRAMING: &str =
    "complete vehicle, full object visible, all wheels/parts in frame";
pub const PLANT_FRAMING: &str =
    "complete plant specimen, full form visible, natural growth pattern";
pub const OBJECT_FRAMING: &str = "complete object, full item visible, all components in frame";

pub const TREE_FRAMING: &str = "full tree with visible trunk and complete branching structure, \
    entire tree from base to top, detailed bark texture, complete canopy with all branches and \
    foliage as described";
pub const FERN_FRAMING: &str = "full fern plant with multiple fronds, lush green foliage, \
    unfurling fronds visible, complete cluster of fern leaves, dense feathery leaves, healthy \
    vibrant green fern";

impl SubjectType {
    /// Detection keywords for this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Person => PERSON_KEYWORDS,
            Self::Animal => ANIMAL_KEYWORDS,
            Self::Vehicle => VEHICLE_KEYWORDS,
            Self::Plant => PLANT_KEYWORDS,
            Self::Object => OBJECT_KEYWORDS,
        }
    }

    /// Default framing phrase for this category.
    pub fn framing(self) -> &'static str {
        match self {
            Self::Person => PERSON_FRAMING,
            Self::Animal => ANIMAL_FRAMING,
            Self::Vehicle => VEHICLE_FRAMING,
            Self::Plant => PLANT_FRAMING,
            Self::Object => OBJECT_FRAMING,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Score a prompt against a single keyword list.
///
/// Per keyword: [`WORD_MATCH_SCORE`] if a token equals it (optionally after
/// dropping non-alphabetic characters), else [`SUBSTRING_MATCH_SCORE`] if it
/// appears anywhere, plus [`PREFIX_BONUS`] if the prompt starts with it.
pub fn score_keywords(prompt: &str, keywords: &[&str]) -> u32 {
    let lower = prompt.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let stripped: Vec<String> = words.iter().map(|w| alphabetic_only(w)).collect();

    let mut score = 0;
    for keyword in keywords {
        let word_match = words
            .iter()
            .zip(&stripped)
            .any(|(word, clean)| word == keyword || clean == keyword);

        if word_match {
            score += WORD_MATCH_SCORE;
        } else if lower.contains(keyword) {
            score += SUBSTRING_MATCH_SCORE;
        }

        if lower.starts_with(keyword) {
            score += PREFIX_BONUS;
        }
    }
    score
}

/// Classify a prompt into a [`SubjectType`].
///
/// Returns [`SubjectType::Object`] when nothing matches. Ties go to the
/// category listed first in [`SubjectType::ALL`].
pub fn classify(prompt: &str) -> SubjectType {
    let mut best = SubjectType::Object;
    let mut best_score = 0;

    // Strict `>` keeps the earliest (highest-priority) category on ties.
    for subject in SubjectType::ALL {
        let score = score_keywords(prompt, subject.keywords());
        if score > best_score {
            best_score = score;
            best = subject;
        }
    }

    best
}

/// Pick the plant framing phrase, preferring tree over fern over the
/// generic plant phrase. First match wins.
pub fn refine_plant_framing(prompt: &str, base_framing: &'static str) -> &'static str {
    let lower = prompt.to_lowercase();
    if TREE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        TREE_FRAMING
    } else if FERN_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        FERN_FRAMING
    } else {
        base_framing
    }
}

/// Keep only ASCII letters, matching how trailing punctuation is ignored.
fn alphabetic_only(word: &str) -> String {
    word.chars().filter(|c| c.is_ascii_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- classify --

    #[test]
    fn single_keyword_prompts_classify_to_their_category() {
        assert_eq!(classify("woman"), SubjectType::Person);
        assert_eq!(classify("dog"), SubjectType::Animal);
        assert_eq!(classify("bicycle"), SubjectType::Vehicle);
        assert_eq!(classify("sunflower"), SubjectType::Plant);
        assert_eq!(classify("laptop"), SubjectType::Object);
    }

    #[test]
    fn higher_score_wins() {
        // vehicle: car + truck word matches (6), animal: dog (3).
        assert_eq!(
            classify("a dog next to a car and a truck"),
            SubjectType::Vehicle
        );
    }

    #[test]
    fn animal_beats_vehicle_on_tie() {
        assert_eq!(score_keywords("the dog and the car", ANIMAL_KEYWORDS), 3);
        assert_eq!(score_keywords("the dog and the car", VEHICLE_KEYWORDS), 3);
        assert_eq!(classify("the dog and the car"), SubjectType::Animal);
    }

    #[test]
    fn empty_prompt_is_object() {
        assert_eq!(classify(""), SubjectType::Object);
        assert_eq!(classify("   \t\n"), SubjectType::Object);
    }

    #[test]
    fn unmatched_prompt_is_object() {
        assert_eq!(classify("xyzzy qwerty"), SubjectType::Object);
    }

    #[test]
    fn trailing_punctuation_still_counts_as_word_match() {
        assert_eq!(score_keywords("a horse!", &["horse"]), WORD_MATCH_SCORE);
    }

    #[test]
    fn substring_only_scores_one() {
        // "cat" inside "cathedral" is not a word match.
        assert_eq!(score_keywords("a cathedral", &["cat"]), SUBSTRING_MATCH_SCORE);
    }

    #[test]
    fn prefix_bonus_is_additive() {
        assert_eq!(
            score_keywords("dog on a leash", &["dog"]),
            WORD_MATCH_SCORE + PREFIX_BONUS
        );
        assert_eq!(
            score_keywords("doghouse", &["dog"]),
            SUBSTRING_MATCH_SCORE + PREFIX_BONUS
        );
    }

    #[test]
    fn multi_word_keyword_matches_as_substring() {
        assert_eq!(
            score_keywords("a construction worker", &["construction worker"]),
            SUBSTRING_MATCH_SCORE
        );
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(classify("Golden RETRIEVER"), SubjectType::Animal);
    }

    // -- refine_plant_framing --

    #[test]
    fn tree_prompt_uses_tree_framing() {
        assert_eq!(refine_plant_framing("oak tree", PLANT_FRAMING), TREE_FRAMING);
    }

    #[test]
    fn fern_prompt_uses_fern_framing() {
        assert_eq!(refine_plant_framing("potted fern", PLANT_FRAMING), FERN_FRAMING);
    }

    #[test]
    fn tree_wins_over_fern() {
        assert_eq!(
            refine_plant_framing("fern under a pine", PLANT_FRAMING),
            TREE_FRAMING
        );
    }

    #[test]
    fn other_plants_keep_base_framing() {
        assert_eq!(refine_plant_framing("red rose", PLANT_FRAMING), PLANT_FRAMING);
    }
}
