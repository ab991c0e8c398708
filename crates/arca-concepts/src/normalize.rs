//! Identifier and free-text normalization.
//!
//! Turns raw identifiers or code samples into lowercase, lemmatized concept
//! candidates. Each stage is a pure transform over a list of tokens:
//!
//! 1. Split on runs of characters that can't be part of an identifier
//! 2. Rewrite kebab-case and snake_case into CamelCase
//! 3. Replace anything left that isn't alphanumeric with spaces
//! 4. Split CamelCase into lowercase space-separated words
//! 5. Drop one-character candidates
//! 6. Lemmatize each word

use std::collections::HashSet;

use crate::lemma::lemmatize_phrase;

/// Normalizes raw text into concept candidates.
///
/// Returns one phrase per compound token in source order. Duplicates are kept.
/// `None` and empty input produce an empty list.
pub fn normalize(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };

    let tokens = split_identifiers(text);
    let phrases = separate_multiple_words_concepts(&tokens);
    let phrases = drop_single_characters(phrases);
    lemmatize_concepts(&phrases)
}

/// Splits text on runs of characters that are not alphanumeric, `_` or `-`.
pub fn split_identifiers(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits compound identifiers into lowercase space-separated words.
///
/// Handles kebab-case, snake_case, camelCase and PascalCase. Empty results are
/// dropped.
pub fn separate_multiple_words_concepts<S: AsRef<str>>(concepts: &[S]) -> Vec<String> {
    concepts
        .iter()
        .map(|c| split_camel_case(&strip_special_characters(&to_camel_case(c.as_ref()))))
        .filter(|c| !c.is_empty())
        .collect()
}

/// Rewrites `-` and `_` separated parts as CamelCase.
pub fn to_camel_case(token: &str) -> String {
    token
        .split(['-', '_'])
        .map(capitalize)
        .collect::<Vec<_>>()
        .concat()
}

/// Uppercases the first character of a word.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replaces every non-alphanumeric character with a space.
pub fn strip_special_characters(token: &str) -> String {
    token
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}

/// Splits CamelCase into lowercase words.
///
/// A boundary falls between a lowercase letter and an uppercase letter, and
/// between an uppercase letter and an uppercase-lowercase pair, so
/// `HTTPServerError` becomes `http server error`.
pub fn split_camel_case(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let mut out = String::with_capacity(token.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                out.push(' ');
            }
        }
        out.extend(c.to_lowercase());
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops candidates that are one character or shorter.
pub fn drop_single_characters(concepts: Vec<String>) -> Vec<String> {
    concepts
        .into_iter()
        .filter(|c| c.chars().count() > 1)
        .collect()
}

/// Lemmatizes every word of every concept.
pub fn lemmatize_concepts<S: AsRef<str>>(concepts: &[S]) -> Vec<String> {
    concepts
        .iter()
        .map(|c| lemmatize_phrase(c.as_ref()))
        .collect()
}

/// Removes duplicates, keeping the first occurrence of each concept.
pub fn remove_duplicates(concepts: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut concepts = concepts;
    concepts.retain(|c| seen.insert(c.clone()));
    concepts
}

/// Splits multi-word concepts into their individual words.
pub fn split_multi_word_concepts(concepts: &[String]) -> Vec<String> {
    concepts
        .iter()
        .flat_map(|c| c.split_whitespace().map(str::to_string))
        .collect()
}
