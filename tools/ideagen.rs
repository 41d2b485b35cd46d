/// Ideagen — print random game ideas.
///
/// Usage: ideagen [--seed <n>] [--count <n>] [--phrases <dir|file.ron>]
use clap::Parser;
use ideagen::core::generator::IdeaGenerator;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "ideagen", about = "Generate random game ideas")]
struct Cli {
    /// Seed for reproducible ideas.
    #[arg(long, env = "IDEAGEN_SEED")]
    seed: Option<u64>,

    /// Number of ideas to print.
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Phrase data to use instead of the bundled set: a directory of
    /// `<category>.txt` files or a `.ron` file.
    #[arg(long, env = "IDEAGEN_PHRASES")]
    phrases: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = IdeaGenerator::builder();
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if let Some(path) = cli.phrases {
        builder = builder.phrases_path(path);
    }

    let mut generator = match builder.build() {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("ERROR: Failed to load phrases: {}", e);
            process::exit(1);
        }
    };

    match generator.generate_many(cli.count) {
        Ok(ideas) => {
            for idea in ideas {
                println!("{}", idea);
            }
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    }
}
