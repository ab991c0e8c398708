//! Rule-based English noun lemmatizer.
//!
//! Reduces plural nouns to their singular form. Words already in base form,
//! and words the rules don't recognize, pass through unchanged, so applying
//! the lemmatizer twice gives the same result as applying it once.

/// Irregular plurals and their singular forms.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("aliases", "alias"),
    ("analyses", "analysis"),
    ("atlases", "atlas"),
    ("axes", "axis"),
    ("bases", "base"),
    ("biases", "bias"),
    ("bonuses", "bonus"),
    ("buses", "bus"),
    ("cacti", "cactus"),
    ("campuses", "campus"),
    ("canvases", "canvas"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("diagnoses", "diagnosis"),
    ("echoes", "echo"),
    ("feet", "foot"),
    ("gases", "gas"),
    ("geese", "goose"),
    ("halves", "half"),
    ("heroes", "hero"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lenses", "lens"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oases", "oasis"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("potatoes", "potato"),
    ("quizzes", "quiz"),
    ("radii", "radius"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("statuses", "status"),
    ("syllabi", "syllabus"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("tomatoes", "tomato"),
    ("vertices", "vertex"),
    ("vetoes", "veto"),
    ("viruses", "virus"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Words ending in `s` that are not plurals, or whose plural is the same word.
static INVARIANT_NOUNS: &[&str] = &[
    "alias", "always", "analytics", "atlas", "aws", "bias", "bus", "canvas", "chaos", "cors",
    "css", "dns", "economics", "ethos", "gas", "gps", "graphics", "has", "his", "https", "ios",
    "is", "its", "kudos", "lens", "logistics", "mathematics", "means", "news", "os", "perhaps",
    "physics", "plus", "series", "sms", "species", "statistics", "this", "thus", "tls", "was",
    "whereas", "yes",
];

/// Singular nouns that end in `ie` or `e`, whose plurals the suffix rules would
/// otherwise cut too short.
static E_SINGULARS: &[&str] = &[
    "auntie", "avalanche", "boogie", "brownie", "budgie", "cache", "calorie", "cliche", "collie",
    "cookie", "creche", "freebie", "genie", "goalie", "headache", "hippie", "hoodie", "indie",
    "lie", "moustache", "movie", "newbie", "niche", "pie", "prairie", "psyche", "quiche", "rookie",
    "selfie", "smoothie", "sortie", "techie", "tie", "yuppie", "zombie",
];

/// Returns the singular form of a lowercase word.
pub fn lemmatize(word: &str) -> String {
    if let Some((_, singular)) = IRREGULAR_PLURALS.iter().find(|(plural, _)| *plural == word) {
        return (*singular).to_string();
    }

    if word.len() < 3 || INVARIANT_NOUNS.contains(&word) || !word.ends_with('s') {
        return word.to_string();
    }

    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    let without_s = &word[..word.len() - 1];
    if E_SINGULARS.contains(&without_s) {
        return without_s.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies")
        && stem.len() > 1
    {
        return format!("{stem}y");
    }

    if let Some(stem) = word.strip_suffix("es")
        && (stem.ends_with("ss")
            || stem.ends_with('x')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
            || stem.ends_with("zz"))
    {
        return stem.to_string();
    }

    without_s.to_string()
}

/// Lemmatizes every word of a space-separated phrase.
pub fn lemmatize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}
