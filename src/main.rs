use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use marine_report::source::{extract_full_text, load_tables};
use marine_report::{process_report, ExtractionScope};

#[derive(Parser)]
#[command(about = "Reconstruct the structure of a marine accident report and extract its findings")]
struct Args {
    /// Report PDF, or a .txt file of already-extracted text
    #[arg(short, long)]
    input: PathBuf,
    /// Where to write the JSON result
    #[arg(short, long)]
    output: PathBuf,
    /// JSON table grids extracted from the same report
    #[arg(short, long)]
    tables: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ExtractionScope::Sections)]
    scope: ExtractionScope,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let text = extract_full_text(&args.input)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;
    let tables = match &args.tables {
        Some(path) => load_tables(path)?,
        None => Vec::new(),
    };

    let extraction = process_report(&text, &tables, args.scope);
    log::info!(
        "{} sentences reconstructed from {}",
        extraction.body.sentence_count(),
        args.input.display()
    );

    std::fs::write(&args.output, serde_json::to_string_pretty(&extraction)?)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Successfully processed {}", args.input.display());
    Ok(())
}
