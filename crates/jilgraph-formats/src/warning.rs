//! Non-fatal findings reported while parsing.
//!
//! Both parsers are permissive: a malformed line never aborts a parse. Lines
//! that are skipped or parsed in a degraded mode are reported as [`Warning`]
//! values next to the parsed records, so callers can surface them without
//! the parsers having to decide how.
//!
//! # Examples
//!
//! ```
//! use jilgraph_formats::parse_definitions;
//!
//! let parsed = parse_definitions("owner: nobody\ninsert_job: a\n");
//! assert_eq!(parsed.warnings.len(), 1);
//! assert_eq!(parsed.warnings[0].line_number(), 1);
//! assert_eq!(parsed.warnings[0].kind(), "skipped_line");
//! ```

use serde::Serialize;

/// A non-fatal problem found on one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A line was ignored.
    SkippedLine {
        /// The 1-based line number.
        line_number: usize,
        /// Why the line was ignored.
        reason: String,
    },

    /// A job name was inserted a second time; the later block replaces the
    /// earlier one's fields. Edges from its conditions are kept.
    DuplicateJob {
        /// The 1-based line number of the second `insert_job:`.
        line_number: usize,
        /// The repeated job name.
        name: String,
    },

    /// A status-report line did not fit the fixed-width layout and was read
    /// in fallback mode.
    FallbackLine {
        /// The 1-based line number.
        line_number: usize,
        /// The job name taken from the line.
        name: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::SkippedLine { line_number, .. }
            | Self::DuplicateJob { line_number, .. }
            | Self::FallbackLine { line_number, .. } => *line_number,
        }
    }

    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::SkippedLine {
                line_number,
                reason,
            } => format!("line {line_number}: skipped: {reason}"),
            Self::DuplicateJob { line_number, name } => {
                format!("line {line_number}: job '{name}' redefined, earlier definition replaced")
            }
            Self::FallbackLine { line_number, name } => {
                format!("line {line_number}: status for '{name}' read without column layout")
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    ///
    /// ```
    /// use jilgraph_formats::Warning;
    ///
    /// let warning = Warning::DuplicateJob {
    ///     line_number: 7,
    ///     name: "load".to_string(),
    /// };
    /// assert_eq!(warning.kind(), "duplicate_job");
    /// ```
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SkippedLine { .. } => "skipped_line",
            Self::DuplicateJob { .. } => "duplicate_job",
            Self::FallbackLine { .. } => "fallback_line",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}
