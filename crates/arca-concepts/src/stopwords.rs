//! Stop word filtering for concept mining.
//!
//! Combines the function words of the `stop-words` English list with
//! identifier noise that shows up in every codebase regardless of language:
//! abbreviations such as `tmp` or `cb`, placeholder names, short language
//! keywords, and generic plumbing vocabulary that carries no domain meaning.
//!
//! The ISO English list also carries content nouns such as `order`, `id`,
//! `name` or `date`. Those are data vocabulary in code, so any entry the
//! built-in dictionary knows is left out.

use std::collections::HashSet;

use stop_words::LANGUAGE;

use crate::Dictionary;

/// A stop word set combining English and code-noise words.
///
/// All words are stored lowercase for case-insensitive matching.
#[derive(Debug, Clone)]
pub struct Stopwords {
    /// Lowercased stop words.
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Creates a stop word set with English function words and code-noise words.
    pub fn new() -> Self {
        let dictionary = Dictionary::builtin();
        let mut words: HashSet<String> = stop_words::get(LANGUAGE::English)
            .iter()
            .map(|w| w.to_lowercase())
            .filter(|w| !dictionary.is_word(w))
            .collect();

        let mut add_words = |slice: &[&str]| {
            for word in slice {
                words.insert(word.to_lowercase());
            }
        };

        add_words(IDENTIFIER_ABBREVIATIONS);
        add_words(SHORT_KEYWORDS);
        add_words(PLACEHOLDER_NAMES);
        add_words(PLUMBING_WORDS);

        Self { words }
    }

    /// Checks if a word is a stop word, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Checks if every word of a (possibly multi-word) concept is a stop word.
    pub fn covers(&self, concept: &str) -> bool {
        let mut words = concept.split_whitespace().peekable();
        words.peek().is_some() && words.all(|w| self.contains(w))
    }

    /// Returns the total number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no stop words are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Abbreviations programmers use for local variables and parameters.
static IDENTIFIER_ABBREVIATIONS: &[&str] = &[
    "arg", "args", "argv", "argc", "attr", "attrs", "buf", "cb", "cfg", "cmd", "ctx", "cur",
    "del", "dest", "dst", "elem", "env", "err", "evt", "fd", "fn", "func", "idx", "impl", "init",
    "iter", "len", "lhs", "msg", "num", "obj", "opt", "opts", "param", "params", "prev", "ptr",
    "rhs", "ret", "src", "str", "tmp", "temp", "util", "utils", "val", "var", "vars",
];

/// Language keywords too short to match inside concepts, dropped as whole words.
static SHORT_KEYWORDS: &[&str] = &[
    "as", "do", "fn", "go", "if", "in", "is", "ok", "or", "and", "any", "app", "cls", "def",
    "del", "dyn", "end", "fmt", "for", "get", "int", "let", "map", "mod", "mut", "new", "not",
    "out", "pub", "ref", "req", "res", "set", "try", "use", "vec", "xor",
];

/// Names used as placeholders in examples and tests.
static PLACEHOLDER_NAMES: &[&str] = &[
    "foo", "bar", "baz", "qux", "quux", "lorem", "ipsum", "dolor", "todo", "fixme", "xxx",
];

/// Generic plumbing vocabulary with no domain signal.
static PLUMBING_WORDS: &[&str] = &[
    "callback", "handler", "helper", "helpers", "wrapper", "instance", "prototype", "undefined",
    "null", "nil", "none", "true", "false", "self", "this", "console", "log", "debug", "main",
    "module", "exports", "require", "import", "default", "async", "await", "promise", "resolve",
    "reject",
];
