//! lineweave - reconstruct paragraphs from positioned text lines
//!
//! A command line driver for the paragraph reconstruction engine. Reads a
//! JSON dump of positioned line primitives, as produced by an upstream
//! document parser, and writes the reconstructed paragraphs as plain text
//! or JSON records.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lineweave_core::high_level::{ExtractOptions, extract_paragraph_records, extract_paragraphs};
use lineweave_core::layout::{ClusterParams, Page};
use serde::Deserialize;

/// A document as emitted by the upstream parser: an ordered sequence of
/// pages, each a possibly-nested tree of line primitives.
#[derive(Debug, Deserialize)]
struct InputDocument {
    pages: Vec<Page>,
}

#[derive(Parser, Debug)]
#[command(name = "lineweave")]
#[command(version, about = "Reconstruct paragraphs from positioned text lines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract paragraphs from a JSON line-primitive dump
    Extract(ExtractArgs),
}

#[derive(clap::Args, Debug)]
struct ExtractArgs {
    /// Path to the input document
    input: PathBuf,

    /// Output file; stdout when omitted
    output: Option<PathBuf>,

    /// Emit JSON paragraph records instead of plain text
    #[arg(long)]
    records: bool,

    /// Abort extraction after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout_seconds: Option<f64>,

    /// Margin ratio for horizontal text, relative to line height
    #[arg(long, default_value_t = 3.0)]
    horizontal_margin_ratio: f64,

    /// Margin ratio for vertical text, relative to line width
    #[arg(long, default_value_t = 2.5)]
    vertical_margin_ratio: f64,

    /// Keep non-printable characters in the output
    #[arg(long)]
    keep_unprintable: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Extract(args) => run_extract(args),
    }
}

fn run_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let data = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let doc: InputDocument = serde_json::from_str(&data).context("parsing input document")?;

    let timeout = args
        .timeout_seconds
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid timeout")?;
    let options = ExtractOptions {
        params: ClusterParams {
            horizontal_margin_ratio: args.horizontal_margin_ratio,
            vertical_margin_ratio: args.vertical_margin_ratio,
            ..ClusterParams::default()
        },
        timeout,
        only_printable: !args.keep_unprintable,
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if args.records {
        let records = extract_paragraph_records(&doc.pages, &options)?;
        serde_json::to_writer_pretty(&mut out, &records)?;
        writeln!(out)?;
    } else {
        let paragraphs = extract_paragraphs(&doc.pages, &options)?;
        for (i, paragraph) in paragraphs.iter().enumerate() {
            writeln!(out, "------ Paragraph {i} ------\n")?;
            writeln!(out, "{paragraph}\n")?;
        }
    }
    out.flush()?;
    Ok(())
}
