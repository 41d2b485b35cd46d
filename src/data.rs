/// Bundled phrase data, compiled into the binary.
///
/// One line-based file per category under `phrase_data/`.
use crate::core::phrases::PhraseStore;

/// `(category, file contents)` for every bundled category.
pub const BUNDLED: &[(&str, &str)] = &[
    ("template", include_str!("../phrase_data/template.txt")),
    ("character", include_str!("../phrase_data/character.txt")),
    (
        "character_description",
        include_str!("../phrase_data/character_description.txt"),
    ),
    (
        "character_description_post",
        include_str!("../phrase_data/character_description_post.txt"),
    ),
    ("group_name", include_str!("../phrase_data/group_name.txt")),
    ("goal_prefix", include_str!("../phrase_data/goal_prefix.txt")),
    ("goal", include_str!("../phrase_data/goal.txt")),
    ("genre", include_str!("../phrase_data/genre.txt")),
    ("genre_modifier", include_str!("../phrase_data/genre_modifier.txt")),
    ("perspective", include_str!("../phrase_data/perspective.txt")),
    ("mood", include_str!("../phrase_data/mood.txt")),
    ("setting", include_str!("../phrase_data/setting.txt")),
    (
        "setting_description",
        include_str!("../phrase_data/setting_description.txt"),
    ),
    ("theme", include_str!("../phrase_data/theme.txt")),
    ("wildcard", include_str!("../phrase_data/wildcard.txt")),
];

/// Category names of the bundled data.
pub fn category_names() -> Vec<&'static str> {
    BUNDLED.iter().map(|(name, _)| *name).collect()
}

/// A phrase store holding all bundled categories.
pub fn bundled() -> PhraseStore {
    let mut store = PhraseStore::new();
    for (name, contents) in BUNDLED {
        store.insert_lines(*name, contents);
    }
    store
}
