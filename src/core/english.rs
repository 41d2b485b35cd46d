/// English grammar helpers — indefinite articles and noun plurals.

/// Pick `a` or `an` for the word that follows the article.
///
/// `one…` and `uni…` sound consonant-initial and take `a`.
pub fn indefinite_article(word: &str) -> &'static str {
    let word = word.trim();
    if word.starts_with("one") || word.starts_with("uni") {
        return "a";
    }
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Pluralize a noun phrase by pluralizing its last word
/// (`space pirate` → `space pirates`).
pub fn pluralize(phrase: &str) -> String {
    let trimmed = phrase.trim_end();
    let split = trimmed.rfind(' ').map_or(0, |i| i + 1);
    let (head, last) = trimmed.split_at(split);
    format!("{head}{}", pluralize_word(last))
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    pluralizer::pluralize(word, 2, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articles() {
        assert_eq!(indefinite_article("elephant"), "an");
        assert_eq!(indefinite_article("unicorn"), "a");
        assert_eq!(indefinite_article("one-eyed"), "a");
        assert_eq!(indefinite_article("dragon"), "a");
        assert_eq!(indefinite_article("  owl hunting"), "an");
        assert_eq!(indefinite_article(""), "a");
    }

    #[test]
    fn article_exceptions_are_case_sensitive() {
        assert_eq!(indefinite_article("Elephant"), "a");
        assert_eq!(indefinite_article("oneiric"), "a");
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(pluralize("robot"), "robots");
        assert_eq!(pluralize("witch"), "witches");
        assert_eq!(pluralize("fox"), "foxes");
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("fairy"), "fairies");
        assert_eq!(pluralize("cowboy"), "cowboys");
        assert_eq!(pluralize("chef"), "chefs");
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("mouse"), "mice");
        assert_eq!(pluralize("wolf"), "wolves");
        assert_eq!(pluralize("werewolf"), "werewolves");
        assert_eq!(pluralize("snowman"), "snowmen");
        assert_eq!(pluralize("cactus"), "cacti");
        assert_eq!(pluralize("hero"), "heroes");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("jellyfish"), "jellyfish");
    }

    #[test]
    fn irregular_forms_are_whole_words() {
        assert_eq!(pluralize("mongoose"), "mongooses");
        assert_eq!(pluralize("bigfoot"), "bigfoots");
        assert_eq!(pluralize("quiz"), "quizzes");
        assert_eq!(pluralize("goose"), "geese");
    }

    #[test]
    fn phrases_pluralize_last_word() {
        assert_eq!(pluralize("space pirate"), "space pirates");
        assert_eq!(pluralize("retired police officer"), "retired police officers");
        assert_eq!(pluralize("sentient cactus "), "sentient cacti");
    }

    #[test]
    fn capitalization_is_kept() {
        assert_eq!(pluralize("Viking"), "Vikings");
        assert_eq!(pluralize("Woman"), "Women");
    }
}
