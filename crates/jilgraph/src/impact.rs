//! Impact analysis: which jobs a job's current status affects.
//!
//! | Status | Policy | Impacted |
//! |--------|--------|----------|
//! | `FAILED`, `TERMINATED` | [`ImpactPolicy::Descendants`] | everything downstream |
//! | `RUNNING` | [`ImpactPolicy::Successors`] | jobs gated directly on it |
//! | anything else | [`ImpactPolicy::None`] | nothing |

use crate::graph::DependencyGraph;
use jilgraph_formats::Status;
use serde::Serialize;
use std::collections::BTreeSet;

/// How far an impact reaches from the job it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactPolicy {
    /// Full transitive closure
    Descendants,
    /// One hop
    Successors,
    /// No impact
    None,
}

impl ImpactPolicy {
    /// Select the policy for a job in `status`.
    #[must_use]
    pub fn for_status(status: &Status) -> Self {
        if status.is_failure() {
            Self::Descendants
        } else if status.is_running() {
            Self::Successors
        } else {
            Self::None
        }
    }
}

/// Jobs affected by `job_name` being in `status`, sorted by name.
///
/// An undefined job has no impact.
///
/// ```
/// use jilgraph::graph::DependencyGraph;
/// use jilgraph::impact::impacted_jobs;
/// use jilgraph_formats::{parse_definitions, Status};
///
/// let parsed = parse_definitions(
///     "insert_job: a\n\
///      insert_job: b\ncondition: success(a)\n\
///      insert_job: c\ncondition: success(b)\n",
/// );
/// let graph = DependencyGraph::build(&parsed.jobs, &parsed.edges);
///
/// let failed: Vec<_> = impacted_jobs(&graph, "a", &Status::Failed).into_iter().collect();
/// assert_eq!(failed, ["b", "c"]);
/// let running: Vec<_> = impacted_jobs(&graph, "a", &Status::Running).into_iter().collect();
/// assert_eq!(running, ["b"]);
/// ```
#[must_use]
pub fn impacted_jobs(graph: &DependencyGraph, job_name: &str, status: &Status) -> BTreeSet<String> {
    match ImpactPolicy::for_status(status) {
        ImpactPolicy::Descendants => graph.descendants(job_name),
        ImpactPolicy::Successors => graph.successors(job_name),
        ImpactPolicy::None => BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jilgraph_formats::parse_definitions;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    /// ```text
    ///   extract ──► load ──► report ──► publish
    ///                 │
    ///                 └────► audit
    ///   standalone
    /// ```
    #[fixture]
    fn graph() -> DependencyGraph {
        let parsed = parse_definitions(
            "insert_job: extract\n\
             insert_job: load\ncondition: success(extract)\n\
             insert_job: report\ncondition: success(load)\n\
             insert_job: audit\ncondition: done(load)\n\
             insert_job: publish\ncondition: success(report) | failure(report)\n\
             insert_job: standalone\n",
        );
        DependencyGraph::build(&parsed.jobs, &parsed.edges)
    }

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[rstest]
    #[case(Status::Failed)]
    #[case(Status::Terminated)]
    fn failure_reaches_all_descendants(graph: DependencyGraph, #[case] status: Status) {
        let impacted = impacted_jobs(&graph, "extract", &status);
        assert_eq!(names(&impacted), vec!["audit", "load", "publish", "report"]);
    }

    #[rstest]
    fn running_reaches_one_hop(graph: DependencyGraph) {
        let impacted = impacted_jobs(&graph, "load", &Status::Running);
        assert_eq!(names(&impacted), vec!["audit", "report"]);
    }

    #[rstest]
    #[case(Status::Success)]
    #[case(Status::Inactive)]
    #[case(Status::OnHold)]
    #[case(Status::Activated)]
    #[case(Status::Starting)]
    #[case(Status::Unknown)]
    #[case(Status::Other("PE".to_string()))]
    fn other_statuses_have_no_impact(graph: DependencyGraph, #[case] status: Status) {
        assert!(impacted_jobs(&graph, "extract", &status).is_empty());
    }

    #[rstest]
    #[case(Status::Failed)]
    #[case(Status::Running)]
    fn unknown_job_has_no_impact(graph: DependencyGraph, #[case] status: Status) {
        assert!(impacted_jobs(&graph, "not_defined", &status).is_empty());
    }

    #[rstest]
    fn leaf_and_isolated_jobs_have_no_impact(graph: DependencyGraph) {
        assert!(impacted_jobs(&graph, "publish", &Status::Failed).is_empty());
        assert!(impacted_jobs(&graph, "standalone", &Status::Failed).is_empty());
    }

    #[rstest]
    #[case(Status::Failed, ImpactPolicy::Descendants)]
    #[case(Status::Terminated, ImpactPolicy::Descendants)]
    #[case(Status::Running, ImpactPolicy::Successors)]
    #[case(Status::Success, ImpactPolicy::None)]
    fn policy_by_status(#[case] status: Status, #[case] policy: ImpactPolicy) {
        assert_eq!(ImpactPolicy::for_status(&status), policy);
    }

    proptest! {
        #[test]
        fn running_impact_is_subset_of_failed_impact(
            chain in proptest::collection::vec((0u8..6, 0u8..6), 0..20),
            start in 0u8..6,
        ) {
            let mut script = String::new();
            for job in 0..6u8 {
                script.push_str(&format!("insert_job: j{job}\n"));
                let parents: Vec<_> = chain
                    .iter()
                    .filter(|(_, child)| *child == job)
                    .map(|(parent, _)| format!("success(j{parent})"))
                    .collect();
                if !parents.is_empty() {
                    script.push_str(&format!("condition: {}\n", parents.join(" & ")));
                }
            }
            let parsed = parse_definitions(&script);
            let graph = DependencyGraph::build(&parsed.jobs, &parsed.edges);
            let start = format!("j{start}");

            let running = impacted_jobs(&graph, &start, &Status::Running);
            let failed = impacted_jobs(&graph, &start, &Status::Failed);
            prop_assert!(running.is_subset(&failed));
            prop_assert!(!failed.contains(&start));
        }
    }
}
