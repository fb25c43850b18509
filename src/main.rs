use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use blake_bib::pipeline::segment;
use blake_bib::{extract, taxonomy, ExtractOptions};

#[derive(Parser)]
#[command(name = "blake_bib", about = "Bibliographic record extraction from scanned Blake bibliography text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full extraction pipeline and emit JSON
    Extract {
        /// Body text file (the numbered parts)
        #[arg(long)]
        body: PathBuf,
        /// Introduction text file
        #[arg(long)]
        intro: Option<PathBuf>,
        /// Minimum record count; synthesis tops up to this
        #[arg(short = 'n', long)]
        min_entries: Option<usize>,
        /// Enable the looser mining tiers and the every-remaining-paragraph
        /// pass when the count falls short
        #[arg(long)]
        force_full: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how the body text segments into part sections
    Sections {
        /// Body text file
        #[arg(long)]
        body: PathBuf,
    },
    /// List the canonical parts and their known subheadings
    Parts,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            body,
            intro,
            min_entries,
            force_full,
            pretty,
            output,
        } => {
            let body_text = fs::read_to_string(&body)
                .with_context(|| format!("reading body text {}", body.display()))?;
            let intro_text = match &intro {
                Some(p) => fs::read_to_string(p)
                    .with_context(|| format!("reading introduction {}", p.display()))?,
                None => String::new(),
            };

            let options = ExtractOptions {
                min_entries_threshold: min_entries,
                force_full_extraction: force_full,
                current_year: None,
            };
            let result = extract(&body_text, &intro_text, &options);

            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            match &output {
                Some(p) => {
                    fs::write(p, &json)
                        .with_context(|| format!("writing output {}", p.display()))?;
                    println!("Wrote {} records to {}", result.entries.len(), p.display());
                }
                None => println!("{json}"),
            }

            // Per-part counts to stderr-ish summary after the payload.
            if output.is_some() {
                for part in taxonomy::PARTS {
                    let n = result
                        .entries
                        .iter()
                        .filter(|r| r.chapter.as_deref() == Some(part))
                        .count();
                    if n > 0 {
                        println!("  {:<55} {:>5}", truncate(part, 55), n);
                    }
                }
            }
        }
        Commands::Sections { body } => {
            let body_text = fs::read_to_string(&body)
                .with_context(|| format!("reading body text {}", body.display()))?;
            let sections = segment::segment_parts(&body_text);
            if sections.is_empty() {
                println!("No sections retained.");
                return Ok(());
            }
            println!("{:>3} | {:<55} | {:>7} | {}", "#", "Part", "Chars", "Kind");
            println!("{}", "-".repeat(80));
            for (i, s) in sections.iter().enumerate() {
                let kind = if s.is_header { "header" } else { "body" };
                println!(
                    "{:>3} | {:<55} | {:>7} | {}",
                    i + 1,
                    truncate(&s.part, 55),
                    s.text.len(),
                    kind
                );
            }
        }
        Commands::Parts => {
            for part in taxonomy::PARTS {
                println!("{part}");
                let subs: &[&str] = if part == "INTRODUCTION" {
                    &taxonomy::INTRO_SUBHEADINGS
                } else {
                    taxonomy::known_subheadings(part)
                };
                for sub in subs {
                    println!("  - {sub}");
                }
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
