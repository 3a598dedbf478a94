//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `jobs`: List defined jobs with type, machine and status
//! - `show`: Show one job's definition, status and neighbours
//! - `stats`: Show the status distribution of a report
//! - `impact`: Show which jobs a failed or running job affects
//! - `export`: Export the dependency graph as JSON or Graphviz DOT
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: Configuration file (default: `./jilgraph.yaml` if present)
//! - `-v`: Verbose logging to stderr (repeatable)
//!
//! # Example
//!
//! ```bash
//! jilgraph jobs --jil defs.jil --report autorep.txt
//! jilgraph impact --jil defs.jil --report autorep.txt
//! jilgraph impact daily_extract --jil defs.jil --as FA
//! jilgraph export --jil defs.jil --report autorep.txt --format dot > graph.dot
//! ```

mod args;
mod execute;
mod types;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputMode;

pub use args::{ExportArgs, ImpactArgs, JobsArgs, ShowArgs, SourceArgs, StatsArgs};
pub use execute::read_source;
pub use types::{parse_status_arg, ExportFormat};

/// Jilgraph - dependency and impact analysis for AutoSys workloads
///
/// Reads JIL job definitions and `autorep -J` status reports, builds the
/// job dependency graph, and reports which jobs a failure affects.
#[derive(Parser, Debug)]
#[command(name = "jilgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: ./jilgraph.yaml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List defined jobs
    ///
    /// Shows every job in the definition script with its type, machine and
    /// reported status.
    Jobs(JobsArgs),

    /// Show detailed information about a job
    ///
    /// Displays the definition, last run times, direct upstream and
    /// downstream jobs, and the jobs affected by its current status.
    Show(ShowArgs),

    /// Show the status distribution of a report
    Stats(StatsArgs),

    /// Show the impact of failed and running jobs
    ///
    /// With a job name, shows the jobs that job affects under its reported
    /// status (or the one given with `--as`). Without one, reports every
    /// failed, terminated and running job in the status report.
    Impact(ImpactArgs),

    /// Export the dependency graph
    Export(ExportArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Log filter selected by the `-v` count.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let config = Config::discover(self.config.as_deref(), &std::env::current_dir()?)?;

        match &self.command {
            Commands::Jobs(args) => execute::execute_jobs(args, &config, output_mode),
            Commands::Show(args) => execute::execute_show(args, &config, output_mode),
            Commands::Stats(args) => execute::execute_stats(args, &config, output_mode),
            Commands::Impact(args) => execute::execute_impact(args, &config, output_mode),
            Commands::Export(args) => execute::execute_export(args, &config),
        }
    }
}
