/// The idea generator: template pick → expansion → formatting.
///
/// Owns the phrase store and the random source; every generated idea
/// gets its own `GenerationSession`.
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::format::format_output;
use crate::core::phrases::{PhraseError, PhraseStore};
use crate::core::random::RandomSource;
use crate::core::selection::Expansion;
use crate::core::session::GenerationSession;
use crate::core::template::{TemplateError, DEFAULT_MAX_REWRITES};

/// Category holding the root templates.
pub const TEMPLATE_CATEGORY: &str = "template";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("phrase error: {0}")]
    Phrase(#[from] PhraseError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// The top-level generator. Built via `IdeaGenerator::builder()`.
pub struct IdeaGenerator {
    phrases: PhraseStore,
    rng: StdRng,
    max_rewrites: usize,
}

/// Builder for constructing an `IdeaGenerator`.
pub struct IdeaGeneratorBuilder {
    seed: Option<u64>,
    phrases_dir: Option<PathBuf>,
    phrases_ron: Option<PathBuf>,
    phrases_path: Option<PathBuf>,
    /// Directly provided phrases (for testing without files).
    phrases: Option<PhraseStore>,
    max_rewrites: usize,
}

impl IdeaGenerator {
    pub fn builder() -> IdeaGeneratorBuilder {
        IdeaGeneratorBuilder {
            seed: None,
            phrases_dir: None,
            phrases_ron: None,
            phrases_path: None,
            phrases: None,
            max_rewrites: DEFAULT_MAX_REWRITES,
        }
    }

    /// Generate one idea.
    pub fn generate(&mut self) -> Result<String, GeneratorError> {
        generate_idea(&self.phrases, &mut self.rng, self.max_rewrites)
    }

    /// Generate one idea with a caller-supplied random source.
    pub fn generate_with(&self, rng: &mut dyn RandomSource) -> Result<String, GeneratorError> {
        generate_idea(&self.phrases, rng, self.max_rewrites)
    }

    /// Generate `count` independent ideas.
    pub fn generate_many(&mut self, count: usize) -> Result<Vec<String>, GeneratorError> {
        (0..count).map(|_| self.generate()).collect()
    }

    pub fn phrases(&self) -> &PhraseStore {
        &self.phrases
    }
}

/// One full generation pass with a fresh session.
fn generate_idea(
    phrases: &PhraseStore,
    rng: &mut dyn RandomSource,
    max_rewrites: usize,
) -> Result<String, GeneratorError> {
    let mut session = GenerationSession::new();
    let mut expansion = Expansion::new(phrases, &mut session, rng);

    let template = expansion.pick_random(TEMPLATE_CATEGORY)?;
    tracing::debug!(%template, "picked template");

    let expanded = expansion.fill_in_template(&template, max_rewrites)?;
    Ok(format_output(&expanded))
}

impl IdeaGeneratorBuilder {
    /// Seed the random source for reproducible ideas. Without a seed the
    /// generator seeds itself from system entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load phrases from a directory of `<category>.txt` files.
    pub fn phrases_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.phrases_dir = Some(path.into());
        self
    }

    /// Load phrases from a RON map of category to phrase list.
    pub fn phrases_ron(mut self, path: impl Into<PathBuf>) -> Self {
        self.phrases_ron = Some(path.into());
        self
    }

    /// Load phrases from either a directory or a RON file, decided by
    /// what `path` points at.
    pub fn phrases_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.phrases_path = Some(path.into());
        self
    }

    /// Provide phrases directly (for testing without files).
    pub fn with_phrases(mut self, phrases: PhraseStore) -> Self {
        self.phrases = Some(phrases);
        self
    }

    /// Cap on tag rewrites per idea, guarding against self-referencing data.
    pub fn max_rewrites(mut self, max_rewrites: usize) -> Self {
        self.max_rewrites = max_rewrites;
        self
    }

    /// Phrase sources layer in order: bundled data (only when nothing
    /// else is given), directory, RON file, generic path, then directly
    /// provided phrases.
    pub fn build(self) -> Result<IdeaGenerator, GeneratorError> {
        let custom = self.phrases_dir.is_some()
            || self.phrases_ron.is_some()
            || self.phrases_path.is_some()
            || self.phrases.is_some();
        let mut phrases = if custom {
            PhraseStore::new()
        } else {
            crate::data::bundled()
        };

        if let Some(ref dir) = self.phrases_dir {
            phrases.merge(PhraseStore::load_from_dir(dir)?);
        }
        if let Some(ref path) = self.phrases_ron {
            phrases.merge(PhraseStore::load_from_ron(path)?);
        }
        if let Some(ref path) = self.phrases_path {
            phrases.merge(PhraseStore::load(path)?);
        }
        if let Some(direct) = self.phrases {
            phrases.merge(direct);
        }
        tracing::debug!(categories = phrases.len(), "phrase store ready");

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(IdeaGenerator {
            phrases,
            rng,
            max_rewrites: self.max_rewrites,
        })
    }
}
