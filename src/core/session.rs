/// Per-generation state — recently used phrases and the grammatical
/// context that one tag hands to the tags after it.
use rustc_hash::FxHashSet;

/// Created fresh for every generated idea and dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct GenerationSession {
    /// Resolved phrases already emitted, in pick order.
    recently_used: Vec<String>,
    seen: FxHashSet<String>,
    character_is_group: bool,
    character_post_description: String,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_used(&self, phrase: &str) -> bool {
        self.seen.contains(phrase)
    }

    /// Record an accepted pick. Re-recording a phrase is a no-op.
    pub fn remember(&mut self, phrase: &str) {
        if self.seen.insert(phrase.to_string()) {
            self.recently_used.push(phrase.to_string());
        }
    }

    pub fn recently_used(&self) -> &[String] {
        &self.recently_used
    }

    /// Whether the player character is a plural group. Drives `(is,are)` tags.
    pub fn character_is_group(&self) -> bool {
        self.character_is_group
    }

    /// Only the player-character composer calls this; NPCs leave it alone.
    pub fn set_character_is_group(&mut self, is_group: bool) {
        self.character_is_group = is_group;
    }

    pub fn character_post_description(&self) -> &str {
        &self.character_post_description
    }

    pub fn set_character_post_description(&mut self, description: String) {
        self.character_post_description = description;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_empty() {
        let session = GenerationSession::new();
        assert!(session.recently_used().is_empty());
        assert!(!session.character_is_group());
        assert_eq!(session.character_post_description(), "");
    }

    #[test]
    fn remember_keeps_order_and_dedups() {
        let mut session = GenerationSession::new();
        session.remember("robot");
        session.remember("wizard");
        session.remember("robot");
        assert_eq!(session.recently_used(), ["robot", "wizard"]);
        assert!(session.was_used("wizard"));
        assert!(!session.was_used("knight"));
    }
}
