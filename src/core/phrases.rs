/// Phrase store and inline option resolution.
///
/// A phrase store maps a category name (`character`, `goal`, ...) to an
/// ordered list of raw phrases. Raw phrases may carry option groups such
/// as `[red,blue]`, which are resolved to one alternative before use.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::random::RandomSource;

#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("unknown phrase category '{0}'")]
    CategoryNotFound(String),
    #[error("phrase category '{0}' is empty")]
    EmptyCategory(String),
    #[error("malformed option group: {0}")]
    MalformedOption(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Named pools of raw phrases. Read-only once generation starts, so a
/// single store can back any number of generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseStore {
    categories: FxHashMap<String, Vec<String>>,
}

impl PhraseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a category with the given phrases.
    pub fn insert(&mut self, name: impl Into<String>, phrases: Vec<String>) {
        self.categories.insert(name.into(), phrases);
    }

    /// Replace a category with the lines of `content`. Blank lines are
    /// skipped and Windows line endings are tolerated.
    pub fn insert_lines(&mut self, name: impl Into<String>, content: &str) {
        self.insert(name, split_phrase_lines(content));
    }

    /// The raw phrases of a category. Unknown and empty categories are
    /// data errors.
    pub fn category(&self, name: &str) -> Result<&[String], PhraseError> {
        let phrases = self
            .categories
            .get(name)
            .ok_or_else(|| PhraseError::CategoryNotFound(name.to_string()))?;
        if phrases.is_empty() {
            return Err(PhraseError::EmptyCategory(name.to_string()));
        }
        Ok(phrases)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Category names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, phrases)| (name.as_str(), phrases.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Merge another store into this one. Categories from `other`
    /// override categories in `self` with the same name.
    pub fn merge(&mut self, other: PhraseStore) {
        for (name, phrases) in other.categories {
            self.categories.insert(name, phrases);
        }
    }

    /// Load every `*.txt` file in a directory, one category per file
    /// named after the file stem.
    pub fn load_from_dir(dir: &Path) -> Result<PhraseStore, PhraseError> {
        let mut store = PhraseStore::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("txt") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let contents = std::fs::read_to_string(&path)?;
            store.insert_lines(name, &contents);
        }
        tracing::debug!(dir = %dir.display(), categories = store.len(), "loaded phrase directory");
        Ok(store)
    }

    /// Load a phrase store from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<PhraseStore, PhraseError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a phrase store from a RON map of category to phrase list.
    pub fn parse_ron(input: &str) -> Result<PhraseStore, PhraseError> {
        Ok(ron::from_str(input)?)
    }

    /// Load from either a directory of `.txt` files or a single `.ron` file.
    pub fn load(path: &Path) -> Result<PhraseStore, PhraseError> {
        if path.is_dir() {
            Self::load_from_dir(path)
        } else {
            Self::load_from_ron(path)
        }
    }
}

/// Split raw category content into phrases, one per non-blank line.
pub fn split_phrase_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve every `[a,b,c]` group in a raw phrase to one uniformly chosen
/// alternative. The leftmost group goes first; a chosen alternative may
/// itself contain groups, which later rounds pick up.
pub fn resolve_options(text: &str, rng: &mut dyn RandomSource) -> Result<String, PhraseError> {
    let mut resolved = text.to_string();
    while let Some((start, end)) = find_option_group(&resolved)? {
        let alternatives = split_alternatives(&resolved[start + 1..end]);
        let choice = alternatives[rng.next_index(alternatives.len())].to_string();
        resolved.replace_range(start..=end, &choice);
    }
    Ok(resolved)
}

/// Check that every `[` in a raw phrase has a matching `]`, without
/// resolving anything.
pub fn validate_options(text: &str) -> Result<(), PhraseError> {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => {
                return Err(PhraseError::MalformedOption(format!("stray ']' in '{text}'")));
            }
            ']' => depth -= 1,
            _ => {}
        }
    }
    if depth > 0 {
        return Err(PhraseError::MalformedOption(format!("unclosed '[' in '{text}'")));
    }
    Ok(())
}

/// Byte span of the leftmost option group, brackets included.
fn find_option_group(text: &str) -> Result<Option<(usize, usize)>, PhraseError> {
    let Some(start) = text.find('[') else {
        if text.contains(']') {
            return Err(PhraseError::MalformedOption(format!("stray ']' in '{text}'")));
        }
        return Ok(None);
    };
    if text[..start].contains(']') {
        return Err(PhraseError::MalformedOption(format!("stray ']' in '{text}'")));
    }

    let mut depth = 0usize;
    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some((start, start + offset)));
                }
            }
            _ => {}
        }
    }

    Err(PhraseError::MalformedOption(format!("unclosed '[' in '{text}'")))
}

/// Split a group body on commas that are not inside a nested group.
fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (i, c) in body.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[last..i]);
                last = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[last..]);
    parts
}
