/// Output formatting — turns an expanded template into a tidy sentence.

/// Normalize whitespace and punctuation, capitalize, and terminate with
/// a period.
///
/// Expansion glues phrases together with spaces whether or not a phrase
/// was empty, so this collapses runs of whitespace, rejoins hyphenated
/// words (`red - eyed` → `red-eyed`), pulls commas onto the previous
/// word and drops a dangling trailing comma. Text that already ends in
/// `.`, `!` or `?` gets no extra period, which makes the function
/// idempotent.
pub fn format_output(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut result = collapsed
        .replace(" -", "-")
        .replace("- ", "-")
        .replace(" ,", ",");

    if result.is_empty() {
        return result;
    }

    result = capitalize_first(&result);
    if result.ends_with(',') {
        result.pop();
    }
    if !result.ends_with(['.', '!', '?']) {
        result.push('.');
    }
    result
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
