//! Shared command-line front end for the `myst2md` binaries
//!
//! Both binaries take exactly two positional arguments and differ only in the
//! pipeline [`Variant`] they run.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use myst2md_core::{Variant, convert_file};

#[derive(Parser, Debug)]
#[command(about = "Convert MyST markdown to plain markdown")]
#[command(version)]
#[command(after_help = "Example:
  myst2md mccall_model.md mccall_model_plain.md")]
pub struct Cli {
    /// Input MyST markdown file
    pub input: PathBuf,

    /// Output markdown file (created or overwritten)
    pub output: PathBuf,
}

/// Parse arguments, convert the input file, and report the result
pub fn run(variant: Variant) -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let summary = convert_file(&cli.input, &cli.output, variant).with_context(|| {
        format!(
            "Failed to convert {} -> {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;
    tracing::debug!(
        input_bytes = summary.input_bytes,
        output_bytes = summary.output_bytes,
        "Wrote output"
    );

    println!(
        "Converted {} -> {}",
        cli.input.display(),
        cli.output.display()
    );

    Ok(())
}

/// Send diagnostics to stderr, filtered by `RUST_LOG` (default: warnings only)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
