//! Command execution logic.
//!
//! Each command reads its input files, builds a [`Workload`] and hands the
//! result to the output module. Parse warnings go to stderr.

use anyhow::Result;
use jilgraph_formats::{parse_status_report_with, ParsedDefinitions};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::args::{ExportArgs, ImpactArgs, JobsArgs, ShowArgs, SourceArgs, StatsArgs};
use super::types::ExportFormat;
use crate::config::Config;
use crate::error::Error;
use crate::export::{to_dot, GraphExport};
use crate::output::{self, OutputMode};
use crate::workload::Workload;

/// Read an input file, replacing invalid UTF-8 rather than failing.
pub fn read_source(path: &Path) -> crate::error::Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load(jil: &Path, report: Option<&Path>, config: &Config) -> Result<Workload> {
    let jil_text = read_source(jil)?;
    let report_text = report.map(read_source).transpose()?;

    let workload = Workload::from_sources(&jil_text, report_text.as_deref(), config);

    output::print_warnings(&jil.display().to_string(), workload.definition_warnings())?;
    if let Some(path) = report {
        output::print_warnings(&path.display().to_string(), workload.status_warnings())?;
    }
    Ok(workload)
}

fn load_sources(sources: &SourceArgs, config: &Config) -> Result<Workload> {
    load(&sources.jil, sources.report.as_deref(), config)
}

/// Execute the jobs command
pub fn execute_jobs(args: &JobsArgs, config: &Config, output_mode: OutputMode) -> Result<()> {
    let workload = load_sources(&args.sources, config)?;
    output::print_jobs(&workload, output_mode)?;
    Ok(())
}

/// Execute the show command
pub fn execute_show(args: &ShowArgs, config: &Config, output_mode: OutputMode) -> Result<()> {
    let workload = load_sources(&args.sources, config)?;
    let detail = workload.job_detail(&args.job)?;
    output::print_job_detail(&detail, output_mode)?;
    Ok(())
}

/// Execute the stats command
pub fn execute_stats(args: &StatsArgs, config: &Config, output_mode: OutputMode) -> Result<()> {
    let text = read_source(&args.report)?;
    let report = parse_status_report_with(&text, &config.status_report_options());
    output::print_warnings(&args.report.display().to_string(), &report.warnings)?;

    let workload = Workload::from_parts(ParsedDefinitions::default(), report);
    output::print_stats(&workload.status_counts(), output_mode)?;
    Ok(())
}

/// Execute the impact command
pub fn execute_impact(args: &ImpactArgs, config: &Config, output_mode: OutputMode) -> Result<()> {
    let workload = load(&args.jil, args.report.as_deref(), config)?;
    let limit = config.display.impact_limit;

    match &args.job {
        Some(job) => {
            let entry = workload.impact_of(job, args.as_status.clone())?;
            output::print_impact(&entry, limit, output_mode)?;
        }
        None => {
            output::print_impact_report(&workload.impact_report(), limit, output_mode)?;
        }
    }
    Ok(())
}

/// Execute the export command
///
/// The format flag decides the document; `--json` has no further effect.
pub fn execute_export(args: &ExportArgs, config: &Config) -> Result<()> {
    let workload = load_sources(&args.sources, config)?;

    match args.format {
        ExportFormat::Json => output::print_json(&GraphExport::from_workload(&workload))?,
        ExportFormat::Dot => output::print_message(to_dot(&workload).trim_end())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_source_replaces_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defs.jil");
        fs::write(&path, b"insert_job: caf\xe9\n").unwrap();

        let text = read_source(&path).unwrap();
        assert!(text.starts_with("insert_job: caf"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn read_source_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.jil");

        let err = read_source(&path).unwrap_err();
        assert!(matches!(&err, Error::Read { path: p, .. } if p == &path));
        assert!(err.to_string().contains("missing.jil"));
    }

    #[test]
    fn load_builds_workload_from_files() {
        let dir = TempDir::new().unwrap();
        let jil = dir.path().join("defs.jil");
        let report = dir.path().join("status.txt");
        fs::write(&jil, "insert_job: a\ninsert_job: b\ncondition: success(a)\n").unwrap();
        fs::write(&report, "a FA\n").unwrap();

        let workload = load(&jil, Some(&report), &Config::default()).unwrap();
        assert_eq!(workload.graph().edge_count(), 1);
        assert_eq!(workload.impacted_by("a").len(), 1);
    }
}
