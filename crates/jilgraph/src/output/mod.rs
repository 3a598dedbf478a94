//! Output formatting for CLI commands.
//!
//! Every command prints either human-readable text or JSON for programmatic
//! use. Text renderers write to any [`Write`] so they can be tested against
//! a buffer; the public functions lock stdout.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers
//! - `json`: JSON documents for programmatic output

pub mod color;
mod json;

use crate::workload::{ImpactEntry, ImpactReport, JobDetail, Workload};
use jilgraph_formats::{Status, Warning};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};

use color::{bold, colorize_job, colorize_status, dimmed};
use json::{
    print_impact_json, print_impact_report_json, print_job_detail_json, print_jobs_json,
    print_stats_json,
};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_colors: bool) -> Self {
        Self {
            max_width,
            use_colors,
        }
    }

    /// Create an `OutputConfig` from the process environment.
    ///
    /// Reads:
    /// - `JILGRAPH_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `JILGRAPH_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create an `OutputConfig` from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_width = match lookup("JILGRAPH_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "JILGRAPH_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("JILGRAPH_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print the job list with type, machine and status.
pub fn print_jobs(workload: &Workload, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_jobs_text(&mut handle, workload, &config),
        OutputMode::Json => print_jobs_json(&mut handle, workload),
    }
}

/// Print everything known about one job.
pub fn print_job_detail(detail: &JobDetail, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_job_detail_text(&mut handle, detail, &config),
        OutputMode::Json => print_job_detail_json(&mut handle, detail),
    }
}

/// Print the status distribution.
pub fn print_stats(counts: &BTreeMap<Status, usize>, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_stats_text(&mut handle, counts, &config),
        OutputMode::Json => print_stats_json(&mut handle, counts),
    }
}

/// Print the impact of a single job.
pub fn print_impact(entry: &ImpactEntry, limit: usize, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_impact_text(&mut handle, entry, limit, &config),
        OutputMode::Json => print_impact_json(&mut handle, entry),
    }
}

/// Print the impact of every failed and running job.
pub fn print_impact_report(report: &ImpactReport, limit: usize, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_impact_report_text(&mut handle, report, limit, &config),
        OutputMode::Json => print_impact_report_json(&mut handle, report),
    }
}

/// Print parse warnings to stderr, labelled with their source.
pub fn print_warnings(source: &str, warnings: &[Warning]) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    let config = OutputConfig::from_env();
    print_warnings_text(&mut handle, source, warnings, &config)
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_jobs_text<W: Write>(w: &mut W, workload: &Workload, config: &OutputConfig) -> io::Result<()> {
    let jobs = workload.jobs();
    if jobs.is_empty() {
        writeln!(w, "No jobs defined.")?;
        return Ok(());
    }

    writeln!(
        w,
        "{} job(s), {} dependencies:",
        jobs.len(),
        workload.graph().edge_count()
    )?;
    writeln!(w)?;

    let name_width = jobs.keys().map(|n| n.chars().count()).max().unwrap_or(0);
    for job in jobs.values() {
        let padding = " ".repeat(name_width - job.name.chars().count());
        let machine = if job.machine.is_empty() {
            "-"
        } else {
            job.machine.as_str()
        };
        writeln!(
            w,
            "  {}{padding}  {:<6} {:<16} {}",
            colorize_job(&job.name, config),
            job.job_type,
            machine,
            colorize_status(&workload.status_of(&job.name), config)
        )?;
    }

    Ok(())
}

fn print_job_detail_text<W: Write>(
    w: &mut W,
    detail: &JobDetail,
    config: &OutputConfig,
) -> io::Result<()> {
    let content_width = get_terminal_width().min(config.max_width);
    let job = &detail.job;
    let status = detail
        .status
        .as_ref()
        .map_or(Status::Unknown, |s| s.status.clone());

    writeln!(
        w,
        "{} [{}]",
        bold(&colorize_job(&job.name, config), config),
        colorize_status(&status, config)
    )?;

    let fields = [
        ("Type", job.job_type.as_str()),
        ("Machine", job.machine.as_str()),
        ("Owner", job.owner.as_str()),
        ("Command", job.command.as_str()),
        ("Condition", job.condition.as_str()),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            writeln!(w, "  {} {value}", dimmed(&format!("{label}:"), config))?;
        }
    }

    if let Some(record) = &detail.status {
        writeln!(
            w,
            "  {} {}",
            dimmed("Last start:", config),
            record.last_start
        )?;
        writeln!(w, "  {} {}", dimmed("Last end:", config), record.last_end)?;
    }

    if !job.description.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Description", config))?;
        for line in wrap_text(&job.description, content_width.saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }

    writeln!(w)?;
    writeln!(w, "{}:", bold("Depends on", config))?;
    print_names(w, &detail.upstream, usize::MAX, "(none)", config)?;

    writeln!(w)?;
    writeln!(w, "{}:", bold("Depended on by", config))?;
    print_names(w, &detail.downstream, usize::MAX, "(none)", config)?;

    if !detail.impacted.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({}):",
            bold("Impacted by current status", config),
            detail.impacted.len()
        )?;
        print_names(w, &detail.impacted, usize::MAX, "(none)", config)?;
    }

    Ok(())
}

fn print_stats_text<W: Write>(
    w: &mut W,
    counts: &BTreeMap<Status, usize>,
    config: &OutputConfig,
) -> io::Result<()> {
    if counts.is_empty() {
        writeln!(w, "No job statuses reported.")?;
        return Ok(());
    }

    let total: usize = counts.values().sum();
    writeln!(w, "{} ({total} jobs):", bold("Job status distribution", config))?;

    let mut rows: Vec<_> = counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let label_width = rows
        .iter()
        .map(|(status, _)| status.as_str().len())
        .max()
        .unwrap_or(0);
    for (status, count) in rows {
        let padding = " ".repeat(label_width - status.as_str().len());
        writeln!(
            w,
            "  {}{padding}  {count:>5}  {:>5.1}%",
            colorize_status(status, config),
            percent(*count, total)
        )?;
    }

    Ok(())
}

fn print_impact_text<W: Write>(
    w: &mut W,
    entry: &ImpactEntry,
    limit: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} [{}] impacts {} job(s)",
        colorize_job(&entry.job, config),
        colorize_status(&entry.status, config),
        entry.impacted.len()
    )?;
    print_names(w, &entry.impacted, limit, "(none)", config)
}

fn print_impact_report_text<W: Write>(
    w: &mut W,
    report: &ImpactReport,
    limit: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    if report.is_clear() {
        writeln!(
            w,
            "{}",
            success("No failed or running jobs in the current report.", config)
        )?;
        return Ok(());
    }

    if !report.failed.is_empty() {
        writeln!(w, "{}", error("Failed/terminated jobs and their impact:", config))?;
        for entry in &report.failed {
            writeln!(
                w,
                "  {} [{}] - potentially impacts {} downstream job(s)",
                colorize_job(&entry.job, config),
                colorize_status(&entry.status, config),
                entry.impacted.len()
            )?;
            print_names(w, &entry.impacted, limit, "", config)?;
        }
    }

    if !report.running.is_empty() {
        if !report.failed.is_empty() {
            writeln!(w)?;
        }
        writeln!(w, "{}", warning("Currently running jobs:", config))?;
        for entry in &report.running {
            writeln!(
                w,
                "  {} - {} job(s) waiting for completion",
                colorize_job(&entry.job, config),
                entry.impacted.len()
            )?;
            print_names(w, &entry.impacted, limit, "", config)?;
        }
    }

    Ok(())
}

fn print_warnings_text<W: Write>(
    w: &mut W,
    source: &str,
    warnings: &[Warning],
    config: &OutputConfig,
) -> io::Result<()> {
    for item in warnings {
        writeln!(w, "{}: {source} {item}", warning("warning", config))?;
    }
    Ok(())
}

/// Print up to `limit` names as a bulleted list, then "... and N more".
///
/// Prints `empty_message` for an empty set, or nothing if it is empty too.
fn print_names<W: Write>(
    w: &mut W,
    names: &BTreeSet<String>,
    limit: usize,
    empty_message: &str,
    config: &OutputConfig,
) -> io::Result<()> {
    if names.is_empty() {
        if !empty_message.is_empty() {
            writeln!(w, "    {}", dimmed(empty_message, config))?;
        }
        return Ok(());
    }

    let bullet = dimmed("•", config);
    for name in names.iter().take(limit) {
        writeln!(w, "    {bullet} {name}")?;
    }
    if names.len() > limit {
        writeln!(w, "    {bullet} ... and {} more", names.len() - limit)?;
    }
    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}
