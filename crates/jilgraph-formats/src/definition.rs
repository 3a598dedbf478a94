//! JIL job-definition parsing.
//!
//! The scanner walks the script line by line with a two-state machine:
//!
//! ```text
//!            insert_job: NAME
//!   Idle ─────────────────────────► InJob(NAME)
//!                                      │  key: value  → update field
//!                                      │  insert_job: → InJob(OTHER)
//! ```
//!
//! Only `insert_job:` changes state; the active job stays active until the
//! next one or the end of input. Other JIL subcommands (`update_job:`,
//! `delete_job:`, ...) are unknown keys like any other and leave it alone.
//!
//! Every `condition:` line is scanned for dependencies as it is applied, so a
//! condition set twice contributes the edges of both values.

use crate::condition::extract_dependencies;
use crate::record::{DependencyEdge, Job, JobField};
use crate::warning::Warning;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Marker that opens a job definition.
pub const JOB_START: &str = "insert_job:";

/// Output of [`parse_definitions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDefinitions {
    /// Jobs keyed by name
    pub jobs: BTreeMap<String, Job>,

    /// Raw dependency edges in script order. Parents are not validated and
    /// the same pair may appear more than once.
    pub edges: Vec<DependencyEdge>,

    /// Lines that were ignored
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Idle,
    InJob(String),
}

/// Parse a JIL script into jobs and raw dependency edges.
///
/// Never fails; see [`ParsedDefinitions::warnings`] for ignored lines.
///
/// ```
/// use jilgraph_formats::parse_definitions;
///
/// let parsed = parse_definitions(
///     "insert_job: extract\n\
///      insert_job: load\n\
///      condition: success(extract)\n",
/// );
/// assert_eq!(parsed.jobs.len(), 2);
/// assert_eq!(parsed.edges[0].parent, "extract");
/// assert_eq!(parsed.edges[0].child, "load");
/// ```
#[must_use]
pub fn parse_definitions(text: &str) -> ParsedDefinitions {
    let mut jobs: BTreeMap<String, Job> = BTreeMap::new();
    let mut edges = Vec::new();
    let mut warnings = Vec::new();
    let mut state = ScanState::Idle;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();

        if line.is_empty() || is_comment(line) {
            continue;
        }

        if let Some(rest) = line.strip_prefix(JOB_START) {
            state = start_job(rest, line_number, &mut jobs, &mut edges, &mut warnings);
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            debug!(line_number, "ignoring definition line without a colon");
            warnings.push(Warning::SkippedLine {
                line_number,
                reason: "no 'key: value' separator".to_string(),
            });
            continue;
        };
        let key = key.trim();

        let ScanState::InJob(current) = &state else {
            debug!(line_number, key, "ignoring attribute outside a job definition");
            warnings.push(Warning::SkippedLine {
                line_number,
                reason: format!("attribute '{key}' outside a job definition"),
            });
            continue;
        };

        apply_attribute(&mut jobs, &mut edges, current, key, value.trim(), line_number);
    }

    ParsedDefinitions {
        jobs,
        edges,
        warnings,
    }
}

/// Handle the text after `insert_job:`.
///
/// JIL allows the first attribute on the same line as the job name
/// (`insert_job: load   job_type: CMD`), so only the first token is the name.
fn start_job(
    rest: &str,
    line_number: usize,
    jobs: &mut BTreeMap<String, Job>,
    edges: &mut Vec<DependencyEdge>,
    warnings: &mut Vec<Warning>,
) -> ScanState {
    let rest = rest.trim();
    let (name, inline) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, tail)| (name, tail.trim()));

    if name.is_empty() {
        warnings.push(Warning::SkippedLine {
            line_number,
            reason: "insert_job without a job name".to_string(),
        });
        return ScanState::Idle;
    }

    if jobs.insert(name.to_string(), Job::new(name)).is_some() {
        debug!(line_number, job = name, "job redefined");
        warnings.push(Warning::DuplicateJob {
            line_number,
            name: name.to_string(),
        });
    }
    trace!(line_number, job = name, "job definition started");

    if let Some((key, value)) = inline.split_once(':') {
        apply_attribute(jobs, edges, name, key.trim(), value.trim(), line_number);
    }

    ScanState::InJob(name.to_string())
}

fn apply_attribute(
    jobs: &mut BTreeMap<String, Job>,
    edges: &mut Vec<DependencyEdge>,
    current: &str,
    key: &str,
    value: &str,
    line_number: usize,
) {
    let Some(field) = JobField::from_key(key) else {
        trace!(line_number, key, "attribute not tracked");
        return;
    };
    if field == JobField::Condition {
        edges.extend(extract_dependencies(current, value));
    }
    if let Some(job) = jobs.get_mut(current) {
        job.set(field, value);
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with("/*") || line.starts_with('#')
}
