//! Per-language reserved-keyword tables.
//!
//! A table maps a file extension to the language's keywords plus the method and
//! type names of popular libraries for that language. An entry may name another
//! extension under `_extends_` to inherit its words, so `.ts` builds on `.js`.
//! Aliases are followed once, at lookup time, by [`KeywordTable::resolve`].

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fs,
    path::Path,
};

use serde::Deserialize;

use crate::{
    ConceptError,
    lemma::lemmatize_phrase,
    normalize::{split_camel_case, to_camel_case},
};

/// Built-in keyword table.
const BUILTIN_KEYWORDS: &str = include_str!("../data/keywords.json");

/// One extension's entry as written in the table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct KeywordEntry {
    /// Extension whose words this entry inherits.
    #[serde(rename = "_extends_")]
    extends: Option<String>,
    /// Language keywords and built-ins.
    language: Vec<String>,
    /// Library API names, keyed by library.
    libraries: BTreeMap<String, Vec<String>>,
}

/// A reserved-keyword table keyed by file extension.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    /// Entries keyed by lowercase extension with a leading dot.
    entries: HashMap<String, KeywordEntry>,
}

impl KeywordTable {
    /// Returns the built-in table.
    pub fn builtin() -> Result<Self, ConceptError> {
        Self::from_json(BUILTIN_KEYWORDS)
    }

    /// Loads a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConceptError> {
        let contents = fs::read_to_string(path).map_err(|source| ConceptError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses a table from JSON and checks every `_extends_` chain.
    pub fn from_json(json: &str) -> Result<Self, ConceptError> {
        let raw: HashMap<String, KeywordEntry> =
            serde_json::from_str(json).map_err(|e| ConceptError::ParseKeywords {
                message: e.to_string(),
            })?;

        let entries = raw
            .into_iter()
            .map(|(ext, entry)| (extension_key(&ext), entry))
            .collect();
        let table = Self { entries };

        for ext in table.entries.keys() {
            table.resolve(ext)?;
        }

        Ok(table)
    }

    /// Returns the extensions the table knows about, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Resolves the keywords for an extension, following `_extends_` aliases.
    ///
    /// The extension may be given with or without a leading dot, in any case.
    /// Returns `Ok(None)` for extensions the table doesn't cover.
    pub fn resolve(&self, extension: &str) -> Result<Option<ReservedKeywords>, ConceptError> {
        let key = extension_key(extension);
        let Some(mut entry) = self.entries.get(&key) else {
            return Ok(None);
        };

        let mut resolved = ReservedKeywords {
            extension: key.clone(),
            language: Vec::new(),
            libraries: BTreeMap::new(),
        };
        let mut visited = HashSet::from([key.clone()]);
        let mut current = key;

        loop {
            resolved.language.extend(entry.language.iter().cloned());
            for (library, names) in &entry.libraries {
                resolved
                    .libraries
                    .entry(library.clone())
                    .or_default()
                    .extend(names.iter().cloned());
            }

            let Some(parent) = &entry.extends else {
                break;
            };
            let parent = extension_key(parent);
            if !visited.insert(parent.clone()) {
                return Err(ConceptError::ParseKeywords {
                    message: format!("'{current}' extends '{parent}', which forms a cycle"),
                });
            }
            entry = self
                .entries
                .get(&parent)
                .ok_or_else(|| ConceptError::ParseKeywords {
                    message: format!("'{current}' extends unknown extension '{parent}'"),
                })?;
            current = parent;
        }

        Ok(Some(resolved))
    }
}

/// The resolved reserved words for one extension.
#[derive(Debug, Clone)]
pub struct ReservedKeywords {
    /// Extension the words were resolved for.
    pub extension: String,
    /// Language keywords, including inherited ones.
    pub language: Vec<String>,
    /// Library API names keyed by library, including inherited ones.
    pub libraries: BTreeMap<String, Vec<String>>,
}

impl ReservedKeywords {
    /// Returns every reserved word in concept form: lowercase, split into words
    /// and lemmatized, without duplicates.
    pub fn terms(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.language
            .iter()
            .chain(self.libraries.values().flatten())
            .map(|w| lemmatize_phrase(&split_camel_case(&to_camel_case(w))))
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect()
    }

    /// Builds a matcher over these keywords.
    pub fn matcher(&self) -> KeywordMatcher {
        KeywordMatcher {
            terms: self.terms(),
        }
    }
}

/// Tests concepts against a resolved keyword set.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    /// Keywords in concept form.
    terms: Vec<String>,
}

impl KeywordMatcher {
    /// Checks whether a concept contains any reserved keyword, ignoring case.
    pub fn is_reserved(&self, concept: &str) -> bool {
        let concept = concept.to_lowercase();
        self.terms.iter().any(|term| concept.contains(term.as_str()))
    }
}

/// Normalizes an extension to lowercase with a leading dot.
fn extension_key(extension: &str) -> String {
    let ext = extension.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
