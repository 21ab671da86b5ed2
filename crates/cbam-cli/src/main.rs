//! # cbam-cli
//!
//! Command-line interface for the customs-import CSV toolkit.
//!
//! This crate provides the `cbam` binary for parsing, validating, and
//! templating CBAM customs-import ledgers.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use cbam_imports::{ImportWriter, ParseResult, ParseSummary, parse_customs_imports};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cbam")]
#[command(about = "CBAM customs-import CSV toolkit")]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Parse a customs-import CSV and emit rows plus findings
    Parse {
        /// Input CSV file path
        input: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Validate a customs-import CSV and report findings
    Validate {
        /// Input CSV file path
        input: PathBuf,
    },

    /// Write a blank import template CSV
    Template {
        /// Output file path
        output: PathBuf,
    },
}

/// Output payload format for `parse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Rows, findings, and header as a JSON document
    Json,
    /// Normalized rows as CSV in canonical column order
    Csv,
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout is reserved for command payloads
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            output,
            format,
        } => run_parse(&input, output.as_deref(), format),
        Commands::Validate { input } => run_validate(&input),
        Commands::Template { output } => run_template(&output),
    }
}

fn run_parse(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let result = parse_file(input)?;
    let summary = ParseSummary::from_result(&result);
    tracing::info!(
        rows = summary.rows_total,
        errors = summary.error_total(),
        "parsed {}",
        input.display()
    );

    let payload = render_payload(&result, format)?;
    match output {
        Some(path) => {
            fs::write(path, payload)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
            println!("{summary}");
        }
        None => {
            std::io::stdout().write_all(&payload)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_validate(input: &std::path::Path) -> anyhow::Result<ExitCode> {
    let result = parse_file(input)?;
    let summary = ParseSummary::from_result(&result);

    println!("File: {}", input.display());
    println!("{summary}");
    for finding in &result.errors {
        println!("  {finding}");
    }

    if summary.file_rejected {
        println!("File rejected.");
        Ok(ExitCode::from(2))
    } else if result.has_errors() {
        println!("Validation completed with findings.");
        Ok(ExitCode::from(1))
    } else {
        println!("Validation passed.");
        Ok(ExitCode::SUCCESS)
    }
}

fn run_template(output: &std::path::Path) -> anyhow::Result<ExitCode> {
    let file = fs::File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    ImportWriter::new().write_template(file)?;
    println!("Wrote {}", output.display());
    Ok(ExitCode::SUCCESS)
}

fn parse_file(input: &std::path::Path) -> anyhow::Result<ParseResult> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    Ok(parse_customs_imports(&text))
}

fn render_payload(result: &ParseResult, format: OutputFormat) -> anyhow::Result<Vec<u8>> {
    match format {
        OutputFormat::Json => {
            let mut payload = serde_json::to_vec_pretty(result)?;
            payload.push(b'\n');
            Ok(payload)
        }
        OutputFormat::Csv => {
            let mut payload = Vec::new();
            ImportWriter::new().write_rows(&mut payload, &result.rows)?;
            Ok(payload)
        }
    }
}
