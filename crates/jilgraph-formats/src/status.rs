//! `autorep -J` status-report parsing.
//!
//! A report looks like this (name column padded to 60 characters):
//!
//! ```text
//! Job Name                                                     Last Start           Last End             ST Run/Ntry Pri/Xit
//! ____________________________________________________________ ____________________ ____________________ __ ________ _______
//! daily_extract                                                01/15/2024 10:00:00  01/15/2024 10:05:12  SU 812/1    0
//! daily_load                                                   01/15/2024 10:05:13  -----                RU 813/1
//! daily_report                                                 -----                -----                IN 0/0
//! ```
//!
//! Lines longer than the name column are read by position. Anything else is
//! read in fallback mode: first token is the name, last token the status.

use crate::record::{JobStatus, Status, NOT_COMPLETED, NOT_STARTED, UNKNOWN_TIME};
use crate::warning::Warning;
use std::collections::BTreeMap;
use std::iter::Peekable;
use tracing::{debug, trace};

/// Width of the job-name column in `autorep` output.
pub const DEFAULT_NAME_WIDTH: usize = 60;

/// Label of the job-name column in the report header.
pub const HEADER_LABEL: &str = "Job Name";

/// Token printed in place of an absent timestamp.
pub const PLACEHOLDER: &str = "-----";

/// Layout settings for [`parse_status_report_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReportOptions {
    /// Number of leading characters holding the job name
    pub name_width: usize,
}

impl Default for StatusReportOptions {
    fn default() -> Self {
        Self {
            name_width: DEFAULT_NAME_WIDTH,
        }
    }
}

/// Output of [`parse_status_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStatusReport {
    /// Status per job name; a later line for a name replaces an earlier one
    pub statuses: BTreeMap<String, JobStatus>,

    /// Lines read in fallback mode
    pub warnings: Vec<Warning>,
}

/// Parse a status report using the default 60-character name column.
///
/// ```
/// use jilgraph_formats::{parse_status_report, Status};
///
/// let parsed = parse_status_report("nightly_backup   FA\n");
/// assert_eq!(parsed.statuses["nightly_backup"].status, Status::Failed);
/// ```
#[must_use]
pub fn parse_status_report(text: &str) -> ParsedStatusReport {
    parse_status_report_with(text, &StatusReportOptions::default())
}

/// Parse a status report with an explicit column layout.
#[must_use]
pub fn parse_status_report_with(text: &str, options: &StatusReportOptions) -> ParsedStatusReport {
    let mut report = ParsedStatusReport::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        if line.trim().is_empty() || is_header(line) || is_separator(line) {
            continue;
        }

        let (name, status) = match read_fixed_width(line, options.name_width) {
            Some(entry) => entry,
            None => {
                let entry = read_fallback(line);
                debug!(line_number, job = %entry.0, "status line read in fallback mode");
                report.warnings.push(Warning::FallbackLine {
                    line_number,
                    name: entry.0.clone(),
                });
                entry
            }
        };

        trace!(line_number, job = %name, status = %status.status, "status recorded");
        report.statuses.insert(name, status);
    }

    report
}

fn is_header(line: &str) -> bool {
    line.trim_start()
        .strip_prefix(HEADER_LABEL)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

fn is_separator(line: &str) -> bool {
    line.chars()
        .all(|c| c == '_' || c == '-' || c == '=' || c.is_whitespace())
}

/// Read a line whose job name fills a fixed-width leading column.
///
/// Returns `None` when the line is too short or has too few fields after the
/// column, in which case the caller falls back.
fn read_fixed_width(line: &str, width: usize) -> Option<(String, JobStatus)> {
    let (split, _) = line.char_indices().nth(width)?;
    let (name_column, rest) = line.split_at(split);

    let name = name_column.trim();
    if name.is_empty() {
        return None;
    }

    let fields: Vec<&str> = rest.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }

    let mut tokens = fields.into_iter().peekable();
    let last_start = take_timestamp(&mut tokens, NOT_STARTED);
    let last_end = take_timestamp(&mut tokens, NOT_COMPLETED);
    let status = tokens.next().map_or(Status::Unknown, Status::from_code);

    Some((
        name.to_string(),
        JobStatus {
            status,
            last_start,
            last_end,
        },
    ))
}

/// Consume one timestamp: the placeholder, or a date optionally joined with
/// the following time token.
///
/// A token that is neither is left for the status column and the timestamp
/// reads as unknown, so `01/15/2024  SU` keeps `SU` as the status.
fn take_timestamp<'a, I>(tokens: &mut Peekable<I>, absent: &str) -> String
where
    I: Iterator<Item = &'a str>,
{
    match tokens.peek().copied() {
        Some(PLACEHOLDER) => {
            tokens.next();
            absent.to_string()
        }
        Some(date) if looks_like_date(date) => {
            tokens.next();
            match tokens.next_if(|t| looks_like_time(t)) {
                Some(time) => format!("{date} {time}"),
                None => date.to_string(),
            }
        }
        _ => UNKNOWN_TIME.to_string(),
    }
}

fn looks_like_date(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit()) && token.contains(['/', '-'])
}

fn looks_like_time(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit()) && token.contains(':')
}

fn read_fallback(line: &str) -> (String, JobStatus) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let name = tokens.first().copied().unwrap_or_default();
    let status = match tokens.as_slice() {
        [_, .., last] => Status::from_code(last),
        _ => Status::Unknown,
    };

    (
        name.to_string(),
        JobStatus {
            status,
            last_start: UNKNOWN_TIME.to_string(),
            last_end: UNKNOWN_TIME.to_string(),
        },
    )
}
