/// Phrase selection — random picks with best-effort repeat avoidance.
use crate::core::phrases::{resolve_options, PhraseError, PhraseStore};
use crate::core::random::RandomSource;
use crate::core::session::GenerationSession;

/// How many neighbouring phrases to try before accepting a repeat.
pub const MAX_PICK_ATTEMPTS: usize = 5;

/// Everything one expansion pass needs: the phrase pools, the session
/// being built up and the source of randomness.
pub struct Expansion<'a> {
    pub(crate) phrases: &'a PhraseStore,
    pub(crate) session: &'a mut GenerationSession,
    pub(crate) rng: &'a mut dyn RandomSource,
}

impl<'a> Expansion<'a> {
    pub fn new(
        phrases: &'a PhraseStore,
        session: &'a mut GenerationSession,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            phrases,
            session,
            rng,
        }
    }

    /// Pick and resolve a random phrase from `category`.
    ///
    /// If the resolved phrase was already used this session, the next
    /// phrase (wrapping around) is tried instead, up to
    /// `MAX_PICK_ATTEMPTS` times. After that the last candidate is
    /// accepted even if it repeats.
    pub fn pick_random(&mut self, category: &str) -> Result<String, PhraseError> {
        let phrases = self.phrases.category(category)?;
        let mut index = self.rng.next_index(phrases.len());

        let mut result = String::new();
        for _ in 0..MAX_PICK_ATTEMPTS {
            result = resolve_options(&phrases[index], self.rng)?;
            if !self.session.was_used(&result) {
                self.session.remember(&result);
                return Ok(result);
            }
            index = (index + 1) % phrases.len();
        }

        tracing::debug!(category, phrase = %result, "accepting repeated phrase");
        Ok(result)
    }

    /// `pick_random` with the given probability, otherwise an empty string.
    pub fn pick_random_or_none(
        &mut self,
        category: &str,
        probability: f32,
    ) -> Result<String, PhraseError> {
        if self.rng.roll(probability) {
            self.pick_random(category)
        } else {
            Ok(String::new())
        }
    }
}
