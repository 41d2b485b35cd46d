/// Template engine — tag parsing and the rewrite loop.
///
/// Tags, in the order they are expanded:
/// - `@name@` / `@name:flag1,flag2@` → generator tag, see [`GeneratorTag`]
/// - `<a>` → `a` or `an`, chosen from the word that follows
/// - `(singular,plural)` → verb form agreeing with the player character
///
/// Each rewrite replaces a single tag and rescans from the start, so an
/// article tag always sees the fully substituted text after it.
use std::ops::Range;
use thiserror::Error;

use crate::core::english::indefinite_article;
use crate::core::phrases::PhraseError;
use crate::core::selection::Expansion;

/// Rewrites allowed per template before expansion is considered runaway.
pub const DEFAULT_MAX_REWRITES: usize = 512;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Phrase(#[from] PhraseError),
    #[error("malformed tag: {0}")]
    MalformedTag(String),
    #[error("template still has tags after {0} rewrites (self-referencing phrase data?)")]
    RewriteLimit(usize),
}

/// Flags accepted by `@character@`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterFlags {
    /// `nopost`: never add a trailing descriptor.
    pub no_post: bool,
    /// `npc`: a side character; leaves the player's group state alone.
    pub npc: bool,
}

/// A parsed `@...@` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorTag {
    Character(CharacterFlags),
    Goal,
    /// `with_modifiers` is set by the `nomods` flag.
    Genre { with_modifiers: bool },
    Wildcard { always: bool },
    Mood,
    SettingDescription,
    /// Any other name is a plain pick from the category of that name.
    Category(String),
}

impl GeneratorTag {
    /// Parse the body of a generator tag. Unknown flags are ignored.
    pub fn parse(command: &str) -> Result<GeneratorTag, TemplateError> {
        let (name, flags): (&str, Vec<&str>) = match command.split_once(':') {
            Some((name, params)) => (name.trim(), params.split(',').map(str::trim).collect()),
            None => (command.trim(), Vec::new()),
        };
        if name.is_empty() {
            return Err(TemplateError::MalformedTag(format!("empty generator tag '@{command}@'")));
        }
        let has = |flag: &str| flags.iter().any(|f| *f == flag);

        Ok(match name {
            "character" => GeneratorTag::Character(CharacterFlags {
                no_post: has("nopost"),
                npc: has("npc"),
            }),
            "goal" => GeneratorTag::Goal,
            "genre" => GeneratorTag::Genre {
                with_modifiers: has("nomods"),
            },
            "wildcard" => GeneratorTag::Wildcard {
                always: has("always"),
            },
            "mood" => GeneratorTag::Mood,
            "setting_description" => GeneratorTag::SettingDescription,
            other => GeneratorTag::Category(other.to_string()),
        })
    }

    /// Every phrase category this tag may draw from.
    pub fn categories(&self) -> Vec<&str> {
        match self {
            GeneratorTag::Character(_) => vec![
                "character",
                "character_description",
                "character_description_post",
                "group_name",
            ],
            GeneratorTag::Goal => vec!["goal_prefix", "goal"],
            GeneratorTag::Genre { with_modifiers: true } => {
                vec!["perspective", "genre_modifier", "genre"]
            }
            GeneratorTag::Genre { with_modifiers: false } => vec!["genre"],
            GeneratorTag::Wildcard { .. } => vec!["wildcard"],
            GeneratorTag::Mood => vec!["mood"],
            GeneratorTag::SettingDescription => vec!["setting_description"],
            GeneratorTag::Category(name) => vec![name.as_str()],
        }
    }
}

/// All generator tags in a raw phrase, in order of appearance.
pub fn generator_tags(phrase: &str) -> Result<Vec<GeneratorTag>, TemplateError> {
    let mut tags = Vec::new();
    let mut rest = phrase;
    while let Some(start) = rest.find('@') {
        let after = &rest[start + 1..];
        let end = after
            .find('@')
            .ok_or_else(|| TemplateError::MalformedTag(format!("unclosed '@' in '{phrase}'")))?;
        tags.push(GeneratorTag::parse(&after[..end])?);
        rest = &after[end + 1..];
    }
    Ok(tags)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TagKind {
    Generator(String),
    Article(String),
    Verb(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FoundTag {
    span: Range<usize>,
    kind: TagKind,
}

/// The next tag to rewrite: any generator tag first, then articles,
/// then verb forms.
fn find_tag(text: &str) -> Result<Option<FoundTag>, TemplateError> {
    if let Some((span, body)) = delimited(text, '@', '@')? {
        return Ok(Some(FoundTag {
            span,
            kind: TagKind::Generator(body),
        }));
    }
    if let Some((span, body)) = delimited(text, '<', '>')? {
        return Ok(Some(FoundTag {
            span,
            kind: TagKind::Article(body),
        }));
    }
    if let Some((span, body)) = delimited(text, '(', ')')? {
        return Ok(Some(FoundTag {
            span,
            kind: TagKind::Verb(body),
        }));
    }
    if let Some(stray) = text.chars().find(|&c| matches!(c, '>' | ')')) {
        return Err(TemplateError::MalformedTag(format!("unmatched '{stray}' in '{text}'")));
    }
    Ok(None)
}

/// Span (delimiters included) and body of the leftmost `open…close` pair.
fn delimited(
    text: &str,
    open: char,
    close: char,
) -> Result<Option<(Range<usize>, String)>, TemplateError> {
    let Some(start) = text.find(open) else {
        return Ok(None);
    };
    let body_start = start + open.len_utf8();
    let end = text[body_start..]
        .find(close)
        .map(|i| body_start + i)
        .ok_or_else(|| TemplateError::MalformedTag(format!("unclosed '{open}' in '{text}'")))?;
    Ok(Some((
        start..end + close.len_utf8(),
        text[body_start..end].to_string(),
    )))
}

/// Resolve an article tag against the text that follows it.
///
/// When the next word is itself an article tag the outer one resolves to
/// nothing, so `<a> <a> owl` reads `an owl`.
fn article_for(body: &str, following: &str) -> Result<&'static str, TemplateError> {
    if !matches!(body, "a" | "an") {
        return Err(TemplateError::MalformedTag(format!("unknown article tag '<{body}>'")));
    }
    let word = following.split_whitespace().next().ok_or_else(|| {
        TemplateError::MalformedTag(format!("article tag '<{body}>' has no following word"))
    })?;
    if word.starts_with("<a>") || word.starts_with("<an>") {
        return Ok("");
    }
    Ok(indefinite_article(word))
}

impl Expansion<'_> {
    /// Expand every tag in `template`, rewriting one tag at a time.
    pub fn fill_in_template(
        &mut self,
        template: &str,
        max_rewrites: usize,
    ) -> Result<String, TemplateError> {
        let mut text = template.to_string();
        let mut rewrites = 0;

        while let Some(tag) = find_tag(&text)? {
            if rewrites == max_rewrites {
                return Err(TemplateError::RewriteLimit(max_rewrites));
            }
            let replacement = match &tag.kind {
                TagKind::Generator(body) => {
                    let generator = GeneratorTag::parse(body)?;
                    self.expand_generator(&generator)?
                }
                TagKind::Article(body) => article_for(body, &text[tag.span.end..])?.to_string(),
                TagKind::Verb(body) => self.verb_form(body)?,
            };
            tracing::trace!(tag = &text[tag.span.clone()], %replacement, "rewrote tag");
            text.replace_range(tag.span, &replacement);
            rewrites += 1;
        }

        Ok(text)
    }

    /// `(singular,plural)`: the plural form when the player character is a group.
    fn verb_form(&self, body: &str) -> Result<String, TemplateError> {
        let forms: Vec<&str> = body.split(',').map(str::trim).collect();
        let [singular, plural] = forms.as_slice() else {
            return Err(TemplateError::MalformedTag(format!(
                "verb tag '({body})' needs exactly two forms"
            )));
        };
        let form = if self.session.character_is_group() {
            plural
        } else {
            singular
        };
        Ok(form.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::phrases::PhraseStore;
    use crate::core::random::RandomSource;
    use crate::core::session::GenerationSession;

    /// First phrase of every category; every chance roll fails.
    struct FirstNever;

    impl RandomSource for FirstNever {
        fn next_index(&mut self, _len: usize) -> usize {
            0
        }

        fn next_unit(&mut self) -> f32 {
            0.999
        }
    }

    fn expand(
        phrases: &PhraseStore,
        session: &mut GenerationSession,
        template: &str,
    ) -> Result<String, TemplateError> {
        let mut rng = FirstNever;
        Expansion::new(phrases, session, &mut rng).fill_in_template(template, DEFAULT_MAX_REWRITES)
    }

    #[test]
    fn parse_plain_and_flagged_tags() {
        assert_eq!(GeneratorTag::parse("goal").unwrap(), GeneratorTag::Goal);
        assert_eq!(
            GeneratorTag::parse("character:npc,nopost").unwrap(),
            GeneratorTag::Character(CharacterFlags {
                no_post: true,
                npc: true,
            })
        );
        assert_eq!(
            GeneratorTag::parse("genre:nomods").unwrap(),
            GeneratorTag::Genre {
                with_modifiers: true
            }
        );
        assert_eq!(
            GeneratorTag::parse("wildcard:always").unwrap(),
            GeneratorTag::Wildcard { always: true }
        );
        assert_eq!(
            GeneratorTag::parse("theme").unwrap(),
            GeneratorTag::Category("theme".to_string())
        );
    }

    #[test]
    fn unknown_flags_are_ignored() {
        assert_eq!(
            GeneratorTag::parse("character:sparkly").unwrap(),
            GeneratorTag::Character(CharacterFlags::default())
        );
        assert_eq!(
            GeneratorTag::parse("mood:loud").unwrap(),
            GeneratorTag::Mood
        );
    }

    #[test]
    fn empty_tag_is_error() {
        assert!(GeneratorTag::parse("").is_err());
        assert!(GeneratorTag::parse(":npc").is_err());
    }

    #[test]
    fn lists_generator_tags_in_phrase() {
        let tags = generator_tags("you are @character:npc@ in @setting@").unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1], GeneratorTag::Category("setting".to_string()));
        assert!(generator_tags("broken @goal").is_err());
        assert!(generator_tags("no tags here").unwrap().is_empty());
    }

    #[test]
    fn verb_tag_follows_group_state() {
        let phrases = PhraseStore::new();

        let mut session = GenerationSession::new();
        session.set_character_is_group(true);
        assert_eq!(expand(&phrases, &mut session, "(is,are)").unwrap(), "are");

        let mut session = GenerationSession::new();
        assert_eq!(expand(&phrases, &mut session, "(is,are)").unwrap(), "is");
    }

    #[test]
    fn article_reads_the_following_word() {
        let phrases = PhraseStore::new();
        let mut session = GenerationSession::new();
        let out = expand(&phrases, &mut session, "<a> elephant and <a>  dragon").unwrap();
        assert_eq!(out, "an elephant and a  dragon");
    }

    #[test]
    fn stacked_articles_collapse_to_one() {
        let phrases = PhraseStore::new();
        let mut session = GenerationSession::new();
        let out = expand(&phrases, &mut session, "<a> <a> owl").unwrap();
        assert_eq!(out.trim(), "an owl");

        let mut phrases = PhraseStore::new();
        phrases.insert_lines("character", "robot");
        phrases.insert("character_description", Vec::new());
        phrases.insert("character_description_post", Vec::new());
        let mut session = GenerationSession::new();
        let out = expand(&phrases, &mut session, "you are <a> @character:npc@").unwrap();
        assert_eq!(out.split_whitespace().collect::<Vec<_>>(), ["you", "are", "a", "robot"]);
    }

    #[test]
    fn article_sees_substituted_text() {
        let mut phrases = PhraseStore::new();
        phrases.insert_lines("setting", "abandoned mall");
        let mut session = GenerationSession::new();
        let out = expand(&phrases, &mut session, "in <a> @setting@").unwrap();
        assert_eq!(out, "in an abandoned mall");
    }

    #[test]
    fn nested_generator_tags_expand() {
        let mut phrases = PhraseStore::new();
        phrases.insert_lines("setting", "@place@ under the sea");
        phrases.insert_lines("place", "[castle,tower]");
        let mut session = GenerationSession::new();
        let out = expand(&phrases, &mut session, "a @setting@").unwrap();
        assert_eq!(out, "a castle under the sea");
    }

    #[test]
    fn malformed_tags_are_errors() {
        let phrases = PhraseStore::new();
        for template in ["<a>", "<the> cat", "(is)", "(is,are", "<a cat", "smile :)", "a > b"] {
            let mut session = GenerationSession::new();
            assert!(
                matches!(
                    expand(&phrases, &mut session, template),
                    Err(TemplateError::MalformedTag(_))
                ),
                "expected malformed tag for {template:?}"
            );
        }
    }

    #[test]
    fn missing_category_is_error() {
        let phrases = PhraseStore::new();
        let mut session = GenerationSession::new();
        assert!(matches!(
            expand(&phrases, &mut session, "@theme@"),
            Err(TemplateError::Phrase(PhraseError::CategoryNotFound(_)))
        ));
    }

    #[test]
    fn self_reference_hits_rewrite_limit() {
        let mut phrases = PhraseStore::new();
        phrases.insert_lines("theme", "more @theme@");
        let mut session = GenerationSession::new();
        let mut rng = FirstNever;
        let result = Expansion::new(&phrases, &mut session, &mut rng).fill_in_template("@theme@", 32);
        assert!(matches!(result, Err(TemplateError::RewriteLimit(32))));
    }

    #[test]
    fn tag_free_text_is_untouched() {
        let phrases = PhraseStore::new();
        let mut session = GenerationSession::new();
        assert_eq!(expand(&phrases, &mut session, "just text").unwrap(), "just text");
    }
}
