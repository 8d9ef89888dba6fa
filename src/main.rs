//! Pagescout CLI
//!
//! Thin command-line surface over the core: parses arguments, loads
//! configuration, calls the search engines, and prints the results.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagescout::{decode_image, match_image, search_text, Config, Corpus, FeatureMatcher};

#[derive(Parser)]
#[command(name = "pagescout")]
#[command(version)]
#[command(about = "Locate source pages in a PDF corpus by text snippet or by photo", long_about = None)]
struct Cli {
    /// Corpus directory (overrides PAGESCOUT_CORPUS_DIR)
    #[arg(long, value_name = "DIR")]
    corpus: Option<PathBuf>,

    /// Print results as JSON instead of human-readable lines
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search page text for a substring, case-insensitively
    Search {
        /// Text to look for
        query: String,
    },

    /// Find the page whose imagery best matches a photo
    Locate {
        /// Path to the query image (any format the image crate decodes)
        image: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagescout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();
    let corpus_dir = cli.corpus.unwrap_or(config.corpus_dir);
    if !corpus_dir.is_dir() {
        bail!("corpus directory {:?} does not exist", corpus_dir);
    }
    let corpus = Corpus::new(corpus_dir);

    match cli.command {
        Commands::Search { query } => {
            let matches = search_text(&corpus, &query)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if matches.is_empty() {
                println!("No matching text found.");
            } else {
                for m in &matches {
                    println!(
                        "{} p.{}: {}",
                        m.document,
                        m.page,
                        mark_span(&m.snippet, m.match_span)
                    );
                }
            }
        }
        Commands::Locate { image } => {
            let bytes = std::fs::read(&image)
                .with_context(|| format!("cannot read image file {:?}", image))?;
            let query = decode_image(&bytes).context("cannot process image")?;
            let matcher = FeatureMatcher::new();

            let hit = match_image(&corpus, &query, &matcher)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hit)?);
            } else {
                match hit {
                    Some(hit) => println!(
                        "Image found in {} on page {} (score {})",
                        hit.document, hit.page, hit.score
                    ),
                    None => println!("No matching image found."),
                }
            }
        }
    }

    Ok(())
}

/// Bracket the matched span for terminal display. Highlighting markup
/// is a presentation concern; the core only hands back offsets.
fn mark_span(snippet: &str, (start, end): (usize, usize)) -> String {
    format!(
        "{}[{}]{}",
        &snippet[..start],
        &snippet[start..end],
        &snippet[end..]
    )
}
