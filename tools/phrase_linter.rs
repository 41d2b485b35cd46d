/// Phrase Linter — validates phrase data before it ships.
///
/// Usage: phrase_linter [<phrase_dir|phrases.ron>]
///
/// Without a path the bundled data is checked.
use clap::Parser;
use ideagen::core::generator::TEMPLATE_CATEGORY;
use ideagen::core::phrases::{validate_options, PhraseStore};
use ideagen::core::template::{generator_tags, GeneratorTag};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "phrase_linter", about = "Validate ideagen phrase data")]
struct Cli {
    /// Directory of `<category>.txt` files or a `.ron` file.
    path: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let phrases = match cli.path {
        Some(ref path) => match PhraseStore::load(path) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("ERROR: Failed to load phrases from '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ideagen::data::bundled(),
    };

    println!("Loaded {} phrase categories", phrases.len());

    let (errors, warnings) = lint_phrases(&phrases);

    println!("\n=== Phrase Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_phrases(phrases: &PhraseStore) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut referenced = BTreeSet::new();

    if !phrases.contains(TEMPLATE_CATEGORY) {
        errors.push(format!("Missing root category '{}'", TEMPLATE_CATEGORY));
    }

    let names = phrases.names();

    for name in &names {
        let Ok(list) = phrases.category(name) else {
            errors.push(format!("Category '{}' has no phrases", name));
            continue;
        };

        // Low variety warning
        if list.len() < 3 {
            warnings.push(format!(
                "Category '{}' has only {} phrases (minimum 3 recommended)",
                name,
                list.len()
            ));
        }

        let mut self_referencing = 0;
        for phrase in list {
            if let Err(e) = validate_options(phrase) {
                errors.push(format!("Category '{}': {}", name, e));
            }

            let tags = match generator_tags(phrase) {
                Ok(tags) => tags,
                Err(e) => {
                    errors.push(format!("Category '{}': {}", name, e));
                    continue;
                }
            };

            if tags
                .iter()
                .any(|tag| matches!(tag, GeneratorTag::Category(c) if c == name))
            {
                self_referencing += 1;
            }

            for tag in &tags {
                for category in tag.categories() {
                    referenced.insert(category.to_string());
                    if let Err(e) = phrases.category(category) {
                        errors.push(format!(
                            "Category '{}' references '{}': {}",
                            name, category, e
                        ));
                    }
                }
            }
        }

        // Every alternative recursing into itself never terminates
        if self_referencing > 0 && self_referencing == list.len() {
            errors.push(format!(
                "Category '{}' has no non-recursive phrase (infinite recursion)",
                name
            ));
        }
    }

    for name in &names {
        if *name != TEMPLATE_CATEGORY && !referenced.contains(*name) {
            warnings.push(format!("Category '{}' is never referenced by a tag", name));
        }
    }

    // The same reference can be reported once per phrase
    errors.dedup();
    (errors, warnings)
}
