//! Record types produced by the definition and status-report parsers.
//!
//! These are plain data: the parsers build them, everything downstream
//! reads them. None of the types here perform I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Job type assumed when a definition block has no `job_type:` line.
pub const DEFAULT_JOB_TYPE: &str = "cmd";

/// Display string for a start timestamp given as the `-----` placeholder.
pub const NOT_STARTED: &str = "Not Started";

/// Display string for an end timestamp given as the `-----` placeholder.
pub const NOT_COMPLETED: &str = "Not Completed";

/// Display string for timestamps on lines parsed in fallback mode.
pub const UNKNOWN_TIME: &str = "Unknown";

/// A job declared in a JIL definition script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job name
    pub name: String,

    /// Job type (`cmd`, `box`, `fw`, ...)
    pub job_type: String,

    /// Command line executed by the job
    pub command: String,

    /// Raw condition expression, as written
    pub condition: String,

    /// Free-text description
    pub description: String,

    /// Machine the job runs on
    pub machine: String,

    /// Owner of the job
    pub owner: String,
}

impl Job {
    /// Create a job with default field values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job_type: DEFAULT_JOB_TYPE.to_string(),
            command: String::new(),
            condition: String::new(),
            description: String::new(),
            machine: String::new(),
            owner: String::new(),
        }
    }

    /// Set the field selected by `field` to `value`.
    pub fn set(&mut self, field: JobField, value: impl Into<String>) {
        let value = value.into();
        match field {
            JobField::JobType => self.job_type = value,
            JobField::Command => self.command = value,
            JobField::Condition => self.condition = value,
            JobField::Description => self.description = value,
            JobField::Machine => self.machine = value,
            JobField::Owner => self.owner = value,
        }
    }
}

/// A JIL attribute the definition parser keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    /// `job_type:`
    JobType,
    /// `command:`
    Command,
    /// `condition:`
    Condition,
    /// `description:`
    Description,
    /// `machine:`
    Machine,
    /// `owner:`
    Owner,
}

impl JobField {
    /// Look up the field for a JIL attribute key. Keys are matched exactly.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "job_type" => Some(Self::JobType),
            "command" => Some(Self::Command),
            "condition" => Some(Self::Condition),
            "description" => Some(Self::Description),
            "machine" => Some(Self::Machine),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }
}

/// The predicate a dependency was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionKind {
    /// `success(JOB)`
    Success,
    /// `done(JOB)`
    Done,
    /// `failure(JOB)`
    Failure,
}

impl ConditionKind {
    /// Match a predicate name, ignoring ASCII case.
    #[must_use]
    pub fn from_predicate(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("success") {
            Some(Self::Success)
        } else if name.eq_ignore_ascii_case("done") {
            Some(Self::Done)
        } else if name.eq_ignore_ascii_case("failure") {
            Some(Self::Failure)
        } else {
            None
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Done => write!(f, "done"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// A raw dependency extracted from a condition expression.
///
/// `child` is the job whose condition mentions `parent`. Edges are not
/// validated here: `parent` may name a job that was never defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Job whose outcome is referenced
    pub parent: String,

    /// Job that carries the condition
    pub child: String,

    /// Predicate the reference came from
    pub kind: ConditionKind,
}

/// Canonical job status.
///
/// Two-letter autorep codes and canonical names both map onto the named
/// variants; anything else is kept uppercased in [`Status::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// `SU`
    Success,
    /// `RU`
    Running,
    /// `FA`
    Failed,
    /// `TE`
    Terminated,
    /// `IN`
    Inactive,
    /// `AC`
    Activated,
    /// `OH`
    OnHold,
    /// `ST`
    Starting,
    /// No status known for the job
    Unknown,
    /// Unrecognized code, uppercased
    Other(String),
}

impl Status {
    /// Map a status code or canonical status name.
    ///
    /// ```
    /// use jilgraph_formats::Status;
    ///
    /// assert_eq!(Status::from_code("su"), Status::Success);
    /// assert_eq!(Status::from_code("FAILED"), Status::Failed);
    /// assert_eq!(Status::from_code("xx").to_string(), "XX");
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let upper = code.trim().to_uppercase();
        match upper.as_str() {
            "SU" | "SUCCESS" => Self::Success,
            "RU" | "RUNNING" => Self::Running,
            "FA" | "FAILED" => Self::Failed,
            "TE" | "TERMINATED" => Self::Terminated,
            "IN" | "INACTIVE" => Self::Inactive,
            "AC" | "ACTIVATED" => Self::Activated,
            "OH" | "ON_HOLD" => Self::OnHold,
            "ST" | "STARTING" => Self::Starting,
            "UNKNOWN" => Self::Unknown,
            _ => Self::Other(upper),
        }
    }

    /// Canonical display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "SUCCESS",
            Self::Running => "RUNNING",
            Self::Failed => "FAILED",
            Self::Terminated => "TERMINATED",
            Self::Inactive => "INACTIVE",
            Self::Activated => "ACTIVATED",
            Self::OnHold => "ON_HOLD",
            Self::Starting => "STARTING",
            Self::Unknown => "UNKNOWN",
            Self::Other(raw) => raw,
        }
    }

    /// `FAILED` or `TERMINATED`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Terminated)
    }

    /// `RUNNING`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Self::from_code(&s)
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Self::from_code(s)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl std::str::FromStr for Status {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

/// Last known execution state of one job, from a status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Mapped status
    pub status: Status,

    /// Last start time as displayed by the report
    pub last_start: String,

    /// Last end time as displayed by the report
    pub last_end: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SU", Status::Success)]
    #[case("RU", Status::Running)]
    #[case("FA", Status::Failed)]
    #[case("TE", Status::Terminated)]
    #[case("IN", Status::Inactive)]
    #[case("AC", Status::Activated)]
    #[case("OH", Status::OnHold)]
    #[case("ST", Status::Starting)]
    #[case("fa", Status::Failed)]
    #[case(" ru ", Status::Running)]
    #[case("ON_HOLD", Status::OnHold)]
    #[case("unknown", Status::Unknown)]
    fn status_codes_map_to_canonical(#[case] code: &str, #[case] expected: Status) {
        assert_eq!(Status::from_code(code), expected);
    }

    #[rstest]
    #[case("XX", "XX")]
    #[case("pe", "PE")]
    #[case("Queued", "QUEUED")]
    fn unmapped_codes_pass_through_uppercased(#[case] code: &str, #[case] display: &str) {
        let status = Status::from_code(code);
        assert_eq!(status, Status::Other(display.to_string()));
        assert_eq!(status.to_string(), display);
    }

    #[test]
    fn failure_and_running_predicates() {
        assert!(Status::Failed.is_failure());
        assert!(Status::Terminated.is_failure());
        assert!(!Status::Running.is_failure());
        assert!(Status::Running.is_running());
        assert!(!Status::Other("RUNNING_LATE".to_string()).is_running());
    }

    #[test]
    fn status_serializes_as_canonical_name() {
        let json = serde_json::to_string(&Status::OnHold).unwrap();
        assert_eq!(json, "\"ON_HOLD\"");

        let back: Status = serde_json::from_str("\"TE\"").unwrap();
        assert_eq!(back, Status::Terminated);
    }

    #[test]
    fn new_job_has_defaults() {
        let job = Job::new("nightly_load");
        assert_eq!(job.name, "nightly_load");
        assert_eq!(job.job_type, "cmd");
        assert!(job.command.is_empty());
        assert!(job.condition.is_empty());
        assert!(job.owner.is_empty());
    }

    #[test]
    fn set_updates_selected_field() {
        let mut job = Job::new("a");
        job.set(JobField::Machine, "host01");
        job.set(JobField::JobType, "box");
        assert_eq!(job.machine, "host01");
        assert_eq!(job.job_type, "box");
    }

    #[rstest]
    #[case("job_type", Some(JobField::JobType))]
    #[case("condition", Some(JobField::Condition))]
    #[case("std_out_file", None)]
    #[case("Command", None)]
    fn field_lookup_is_exact(#[case] key: &str, #[case] expected: Option<JobField>) {
        assert_eq!(JobField::from_key(key), expected);
    }

    #[rstest]
    #[case("success", Some(ConditionKind::Success))]
    #[case("SUCCESS", Some(ConditionKind::Success))]
    #[case("Done", Some(ConditionKind::Done))]
    #[case("failure", Some(ConditionKind::Failure))]
    #[case("notrunning", None)]
    fn predicate_names_ignore_case(#[case] name: &str, #[case] expected: Option<ConditionKind>) {
        assert_eq!(ConditionKind::from_predicate(name), expected);
    }
}
