//! `loadshift` command-line surface.
//!
//! Parses arguments, reads one input document, runs a [`RelocationJob`] and
//! writes either status lines or a JSON report. The process exit code is
//! derived from the [`Verdict`], never from a location id.

pub mod render;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use loadshift_observability::LogFormat;
use loadshift_relocation::{
    RecordsDocument, RelocationDecision, RelocationJob, RelocationReport, Snapshot,
    SnapshotDocument,
};

#[derive(Debug, Parser)]
#[command(name = "loadshift")]
#[command(about = "Decide whether an overloaded inventory location should shed load, and where to")]
#[command(version)]
pub struct Cli {
    /// Output rendering on stdout.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log rendering on stderr (`json` or `pretty`); filter with RUST_LOG.
    #[arg(long, global = true, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Evaluate a snapshot document")]
    Evaluate(InputArgs),

    #[command(about = "Derive a snapshot from inventory records and evaluate it")]
    Records(InputArgs),
}

impl Commands {
    pub fn input(&self) -> &Path {
        match self {
            Commands::Evaluate(args) | Commands::Records(args) => &args.input,
        }
    }
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// JSON document to read; `-` reads standard input.
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable status lines.
    Text,
    /// The full report as JSON.
    Json,
}

/// Outward verdict of a run, mapped onto process exit codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    NoActionNeeded,
    Relocated,
    PartiallyRelocated,
    NoValidTarget,
}

impl Verdict {
    /// Exit code for fatal errors (bad input, missing attributes, IO).
    pub const FAILURE_CODE: u8 = 1;

    pub fn of(decision: &RelocationDecision) -> Self {
        match decision {
            RelocationDecision::NoActionNeeded { .. } => Verdict::NoActionNeeded,
            RelocationDecision::NoValidTarget { .. } => Verdict::NoValidTarget,
            RelocationDecision::Relocated(plan) if plan.partial => Verdict::PartiallyRelocated,
            RelocationDecision::Relocated(_) => Verdict::Relocated,
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::NoActionNeeded => 0,
            Verdict::NoValidTarget => 3,
            Verdict::Relocated => 10,
            Verdict::PartiallyRelocated => 11,
        }
    }
}

/// Read the whole input document from a file or, for `-`, from stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read input from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse `raw` according to `command` and run the relocation decision.
pub fn evaluate(command: &Commands, raw: &str) -> Result<RelocationReport> {
    let document = match command {
        Commands::Evaluate(_) => {
            SnapshotDocument::from_json_str(raw).context("invalid snapshot document")?
        }
        Commands::Records(_) => RecordsDocument::from_json_str(raw)
            .and_then(|records| records.to_snapshot_document())
            .context("invalid inventory records document")?,
    };

    let snapshot = Snapshot::from_document(&document).context("inconsistent snapshot")?;
    RelocationJob::new(snapshot)
        .run()
        .context("relocation decision failed")
}

/// Evaluate `raw` and write the result to `out` in the requested format.
pub fn run<W: Write>(cli: &Cli, raw: &str, out: &mut W) -> Result<Verdict> {
    let report = evaluate(&cli.command, raw)?;

    match cli.format {
        OutputFormat::Text => render::write_status_lines(out, &report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report).context("failed to encode report")?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(Verdict::of(&report.decision))
}
