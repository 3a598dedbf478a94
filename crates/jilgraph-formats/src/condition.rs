//! Dependency extraction from JIL condition expressions.
//!
//! A condition such as `success(extract) & (done(load) | failure(audit))`
//! references other jobs through status predicates. Only `success`, `done`
//! and `failure` are recognised. The logical operators joining them are not
//! evaluated: every reference yields one edge, so the resulting graph says
//! which jobs *could* gate this one, not which are strictly required.

use crate::record::{ConditionKind, DependencyEdge};
use regex::Regex;
use std::sync::LazyLock;

static PREDICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(success|done|failure)\(([^)]+)\)").expect("predicate pattern is valid")
});

/// One predicate reference found in a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRef<'a> {
    /// Predicate kind
    pub kind: ConditionKind,
    /// Referenced job name, trimmed
    pub job: &'a str,
}

/// List the predicate references in `condition`, in order of appearance.
///
/// ```
/// use jilgraph_formats::condition::references;
/// use jilgraph_formats::ConditionKind;
///
/// let refs = references("SUCCESS(a) and done( b )");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].kind, ConditionKind::Success);
/// assert_eq!(refs[1].job, "b");
/// ```
#[must_use]
pub fn references(condition: &str) -> Vec<ConditionRef<'_>> {
    PREDICATE
        .captures_iter(condition)
        .filter_map(|caps| {
            let kind = ConditionKind::from_predicate(caps.get(1)?.as_str())?;
            let job = caps.get(2)?.as_str().trim();
            (!job.is_empty()).then_some(ConditionRef { kind, job })
        })
        .collect()
}

/// Extract the dependency edges of `job` from its condition.
///
/// References to `job` itself are dropped.
#[must_use]
pub fn extract_dependencies(job: &str, condition: &str) -> Vec<DependencyEdge> {
    references(condition)
        .into_iter()
        .filter(|r| r.job != job)
        .map(|r| DependencyEdge {
            parent: r.job.to_string(),
            child: job.to_string(),
            kind: r.kind,
        })
        .collect()
}
