//! CLI argument structs for all commands.

use clap::{Args, Parser};
use jilgraph_formats::Status;
use std::path::PathBuf;

use super::types::{parse_status_arg, ExportFormat};

/// Input files shared by commands that need the job definitions
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JIL definition script
    #[arg(long, value_name = "FILE")]
    pub jil: PathBuf,

    /// `autorep -J` status report
    ///
    /// Without a report every job's status is UNKNOWN.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Arguments for the `jobs` command
#[derive(Parser, Debug, Clone)]
pub struct JobsArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Job name
    pub job: String,

    #[command(flatten)]
    pub sources: SourceArgs,
}

/// Arguments for the `stats` command
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// `autorep -J` status report
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,
}

/// Arguments for the `impact` command
#[derive(Parser, Debug, Clone)]
pub struct ImpactArgs {
    /// Job to analyze (omit for every failed and running job)
    pub job: Option<String>,

    /// JIL definition script
    #[arg(long, value_name = "FILE")]
    pub jil: PathBuf,

    /// `autorep -J` status report
    #[arg(long, value_name = "FILE", required_unless_present = "as_status")]
    pub report: Option<PathBuf>,

    /// Assume this status instead of the reported one (e.g. FA, RU, FAILED)
    #[arg(
        long = "as",
        value_name = "STATUS",
        requires = "job",
        value_parser = parse_status_arg
    )]
    pub as_status: Option<Status>,
}

/// Arguments for the `export` command
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,
}
