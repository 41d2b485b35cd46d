/// Composers — generator tags that combine several picks into one phrase.
use crate::core::english::pluralize;
use crate::core::phrases::PhraseError;
use crate::core::selection::Expansion;
use crate::core::template::{CharacterFlags, GeneratorTag};

const GROUP_CHANCE: f32 = 0.2;
const PRE_DESCRIPTION_CHANCE: f32 = 0.6;
/// Post-descriptor chance when a pre-descriptor was already chosen.
const POST_AFTER_PRE_CHANCE: f32 = 0.25;
const POST_ALONE_CHANCE: f32 = 0.8;

const PERSPECTIVE_CHANCE: f32 = 0.2;
const GENRE_MODIFIER_CHANCE: f32 = 0.25;
const GENRE_CHANCE: f32 = 0.85;
const GENRE_AFTER_PERSPECTIVE_CHANCE: f32 = 0.25;

const WILDCARD_CHANCE: f32 = 0.4;
const MOOD_CHANCE: f32 = 0.3;
const SETTING_DESCRIPTION_CHANCE: f32 = 0.7;

impl Expansion<'_> {
    /// Produce the substitution for one generator tag.
    pub fn expand_generator(&mut self, tag: &GeneratorTag) -> Result<String, PhraseError> {
        match tag {
            GeneratorTag::Character(flags) => self.compose_character(*flags),
            GeneratorTag::Goal => self.compose_goal(),
            GeneratorTag::Genre { with_modifiers } => self.compose_genre(*with_modifiers),
            GeneratorTag::Wildcard { always } => self.compose_wildcard(*always),
            GeneratorTag::Mood => self.pick_random_or_none("mood", MOOD_CHANCE),
            GeneratorTag::SettingDescription => {
                self.pick_random_or_none("setting_description", SETTING_DESCRIPTION_CHANCE)
            }
            GeneratorTag::Category(name) => self.pick_random(name),
        }
    }

    /// `<a> [pre] character [post]`, or sometimes a whole group:
    /// `<a> group of [pre] characters [post]`.
    ///
    /// The `<a>` is left for the article pass. The post-descriptor is
    /// stored in the session (even when empty) for the goal composer.
    pub fn compose_character(&mut self, flags: CharacterFlags) -> Result<String, PhraseError> {
        let make_group = self.rng.roll(GROUP_CHANCE);
        let pre = self.pick_random_or_none("character_description", PRE_DESCRIPTION_CHANCE)?;

        let post_chance = if flags.no_post {
            0.0
        } else if pre.is_empty() {
            POST_ALONE_CHANCE
        } else {
            POST_AFTER_PRE_CHANCE
        };
        let post = self.pick_random_or_none("character_description_post", post_chance)?;
        self.session.set_character_post_description(post.clone());

        if !flags.npc {
            self.session.set_character_is_group(make_group);
        }

        if make_group {
            let group = self.pick_random("group_name")?;
            let character = pluralize(&self.pick_random("character")?);
            return Ok(format!("<a> {group} of {pre} {character} {post} "));
        }

        let character = self.pick_random("character")?;
        Ok(format!("<a> {pre} {character} {post}"))
    }

    /// `goal_prefix goal`. A prefix "who" becomes "and" when the character
    /// already ends in a relative clause, so the idea never reads
    /// "a zombie who loves brains who wants to ...".
    pub fn compose_goal(&mut self) -> Result<String, PhraseError> {
        let mut prefix = self.pick_random("goal_prefix")?;

        let post = self.session.character_post_description();
        if post.contains("who") || post.contains("that") {
            prefix = prefix.replace("who", "and");
        }

        let goal = self.pick_random("goal")?;
        Ok(format!("{prefix} {goal}"))
    }

    /// A plain genre, or perspective + modifier + genre when modifiers
    /// are requested. Any of the three parts may come out empty.
    pub fn compose_genre(&mut self, with_modifiers: bool) -> Result<String, PhraseError> {
        if !with_modifiers {
            return self.pick_random("genre");
        }

        let perspective = self.pick_random_or_none("perspective", PERSPECTIVE_CHANCE)?;
        let modifier = self.pick_random_or_none("genre_modifier", GENRE_MODIFIER_CHANCE)?;
        let genre_chance = if perspective.is_empty() {
            GENRE_CHANCE
        } else {
            GENRE_AFTER_PERSPECTIVE_CHANCE
        };
        let genre = self.pick_random_or_none("genre", genre_chance)?;
        Ok(format!("{perspective} {modifier} {genre}"))
    }

    /// An optional opening twist, followed by a comma when present.
    pub fn compose_wildcard(&mut self, always: bool) -> Result<String, PhraseError> {
        let chance = if always { 1.0 } else { WILDCARD_CHANCE };
        let wildcard = self.pick_random_or_none("wildcard", chance)?;
        if wildcard.is_empty() {
            return Ok(wildcard);
        }
        Ok(format!("{},", wildcard.trim()))
    }
}
