//! Parsers for the two text artifacts of an AutoSys workload.
//!
//! - [`parse_definitions`] reads a JIL script into [`Job`] records and the raw
//!   [`DependencyEdge`]s found in their `condition:` attributes.
//! - [`parse_status_report`] reads `autorep -J` output into [`JobStatus`]
//!   records.
//!
//! The two parsers are independent and never fail: input comes from external
//! tools, so malformed lines are skipped and reported as [`Warning`]s.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod condition;
pub mod definition;
pub mod record;
pub mod status;
pub mod warning;

pub use definition::{parse_definitions, ParsedDefinitions};
pub use record::{ConditionKind, DependencyEdge, Job, JobField, JobStatus, Status};
pub use status::{
    parse_status_report, parse_status_report_with, ParsedStatusReport, StatusReportOptions,
};
pub use warning::Warning;
