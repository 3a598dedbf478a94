//! A parsed workload: definitions, statuses and the graph joining them.
//!
//! [`Workload`] is the two-stage pipeline in one value. Both texts are parsed
//! into immutable records first, then the graph is built from the records.
//! Nothing is mutated afterwards, so every query is a pure read.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::impact::{impacted_jobs, ImpactPolicy};
use jilgraph_formats::{
    parse_definitions, parse_status_report_with, DependencyEdge, Job, JobStatus, ParsedDefinitions,
    ParsedStatusReport, Status, Warning,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Parsed definitions and statuses plus the dependency graph.
#[derive(Debug, Clone)]
pub struct Workload {
    definitions: ParsedDefinitions,
    report: ParsedStatusReport,
    graph: DependencyGraph,
}

/// Everything known about one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDetail {
    /// The definition
    pub job: Job,

    /// Status report entry, if the job appeared in the report
    pub status: Option<JobStatus>,

    /// Jobs this job's condition references
    pub upstream: BTreeSet<String>,

    /// Jobs whose conditions reference this job
    pub downstream: BTreeSet<String>,

    /// Jobs affected by this job's current status
    pub impacted: BTreeSet<String>,
}

/// Impact of one failed or running job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactEntry {
    /// The job
    pub job: String,

    /// Its reported status
    pub status: Status,

    /// Traversal used
    pub policy: ImpactPolicy,

    /// Affected jobs, sorted
    pub impacted: BTreeSet<String>,
}

/// Impact of every failed, terminated and running job in the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImpactReport {
    /// `FAILED` and `TERMINATED` jobs
    pub failed: Vec<ImpactEntry>,

    /// `RUNNING` jobs
    pub running: Vec<ImpactEntry>,
}

impl ImpactReport {
    /// No failed or running jobs.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.failed.is_empty() && self.running.is_empty()
    }
}

impl Workload {
    /// Parse both texts and build the graph.
    ///
    /// `report` is optional; without it every job's status is `UNKNOWN`.
    #[must_use]
    pub fn from_sources(jil: &str, report: Option<&str>, config: &Config) -> Self {
        let definitions = parse_definitions(jil);
        let report = report
            .map(|text| parse_status_report_with(text, &config.status_report_options()))
            .unwrap_or_default();
        Self::from_parts(definitions, report)
    }

    /// Build the graph from already-parsed records.
    #[must_use]
    pub fn from_parts(definitions: ParsedDefinitions, report: ParsedStatusReport) -> Self {
        let graph = DependencyGraph::build(&definitions.jobs, &definitions.edges);
        info!(
            jobs = graph.node_count(),
            dependencies = graph.edge_count(),
            dropped = graph.dropped_edges(),
            statuses = report.statuses.len(),
            "workload loaded"
        );
        Self {
            definitions,
            report,
            graph,
        }
    }

    /// Jobs keyed by name.
    #[must_use]
    pub fn jobs(&self) -> &BTreeMap<String, Job> {
        &self.definitions.jobs
    }

    /// Raw edges as extracted, before validation.
    #[must_use]
    pub fn raw_edges(&self) -> &[DependencyEdge] {
        &self.definitions.edges
    }

    /// Status records keyed by name. May name jobs that are not defined.
    #[must_use]
    pub fn statuses(&self) -> &BTreeMap<String, JobStatus> {
        &self.report.statuses
    }

    /// The dependency graph.
    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Warnings from the definition script.
    #[must_use]
    pub fn definition_warnings(&self) -> &[Warning] {
        &self.definitions.warnings
    }

    /// Warnings from the status report.
    #[must_use]
    pub fn status_warnings(&self) -> &[Warning] {
        &self.report.warnings
    }

    /// Reported status of `name`, `UNKNOWN` when absent from the report.
    #[must_use]
    pub fn status_of(&self, name: &str) -> Status {
        self.report
            .statuses
            .get(name)
            .map_or(Status::Unknown, |s| s.status.clone())
    }

    /// Jobs `name` depends on directly.
    #[must_use]
    pub fn upstream(&self, name: &str) -> BTreeSet<String> {
        self.graph.predecessors(name)
    }

    /// Jobs that depend on `name` directly.
    #[must_use]
    pub fn downstream(&self, name: &str) -> BTreeSet<String> {
        self.graph.successors(name)
    }

    /// Jobs affected by `name` under its reported status.
    #[must_use]
    pub fn impacted_by(&self, name: &str) -> BTreeSet<String> {
        impacted_jobs(&self.graph, name, &self.status_of(name))
    }

    /// Collect everything known about a defined job.
    pub fn job_detail(&self, name: &str) -> Result<JobDetail> {
        let job = self
            .definitions
            .jobs
            .get(name)
            .ok_or_else(|| Error::JobNotFound(name.to_string()))?;

        Ok(JobDetail {
            job: job.clone(),
            status: self.report.statuses.get(name).cloned(),
            upstream: self.upstream(name),
            downstream: self.downstream(name),
            impacted: self.impacted_by(name),
        })
    }

    /// Impact of a defined job, under `status` or else its reported status.
    pub fn impact_of(&self, name: &str, status: Option<Status>) -> Result<ImpactEntry> {
        if !self.graph.contains(name) {
            return Err(Error::JobNotFound(name.to_string()));
        }
        let status = status.unwrap_or_else(|| self.status_of(name));

        Ok(ImpactEntry {
            job: name.to_string(),
            policy: ImpactPolicy::for_status(&status),
            impacted: impacted_jobs(&self.graph, name, &status),
            status,
        })
    }

    /// Number of report entries per status.
    #[must_use]
    pub fn status_counts(&self) -> BTreeMap<Status, usize> {
        let mut counts = BTreeMap::new();
        for record in self.report.statuses.values() {
            *counts.entry(record.status.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Impact of every failed, terminated and running job in the report.
    #[must_use]
    pub fn impact_report(&self) -> ImpactReport {
        let mut report = ImpactReport::default();

        for (name, record) in &self.report.statuses {
            let policy = ImpactPolicy::for_status(&record.status);
            let entry = ImpactEntry {
                job: name.clone(),
                status: record.status.clone(),
                policy,
                impacted: impacted_jobs(&self.graph, name, &record.status),
            };
            match policy {
                ImpactPolicy::Descendants => report.failed.push(entry),
                ImpactPolicy::Successors => report.running.push(entry),
                ImpactPolicy::None => {}
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const JIL: &str = "\
insert_job: a
insert_job: b
condition: success(a)
insert_job: c
condition: success(b)
insert_job: d
condition: done(a) & failure(b)
";

    fn row(name: &str, rest: &str) -> String {
        format!("{name:<60}{rest}")
    }

    #[fixture]
    fn workload() -> Workload {
        let report = [
            row("a", "01/15/2024 10:00:00  01/15/2024 10:01:00  FA"),
            row("b", "01/15/2024 10:02:00  -----  RU"),
            row("c", "-----  -----  IN"),
            row("ghost", "-----  -----  TE"),
        ]
        .join("\n");
        Workload::from_sources(JIL, Some(&report), &Config::default())
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[rstest]
    fn graph_nodes_come_only_from_definitions(workload: Workload) {
        assert_eq!(workload.graph().node_count(), 4);
        assert!(!workload.graph().contains("ghost"));
        assert!(workload.statuses().contains_key("ghost"));
    }

    #[rstest]
    fn status_of_defaults_to_unknown(workload: Workload) {
        assert_eq!(workload.status_of("a"), Status::Failed);
        assert_eq!(workload.status_of("d"), Status::Unknown);
    }

    #[rstest]
    fn upstream_and_downstream(workload: Workload) {
        assert_eq!(workload.upstream("d"), set(&["a", "b"]));
        assert_eq!(workload.downstream("a"), set(&["b", "d"]));
        assert!(workload.upstream("a").is_empty());
    }

    #[rstest]
    fn job_detail_uses_reported_status(workload: Workload) {
        let detail = workload.job_detail("b").unwrap();

        assert_eq!(detail.job.condition, "success(a)");
        assert_eq!(detail.status.as_ref().map(|s| &s.status), Some(&Status::Running));
        assert_eq!(detail.upstream, set(&["a"]));
        assert_eq!(detail.downstream, set(&["c", "d"]));
        assert_eq!(detail.impacted, set(&["c", "d"]));
    }

    #[rstest]
    fn job_detail_for_unknown_job_fails(workload: Workload) {
        let err = workload.job_detail("ghost").unwrap_err();
        assert!(matches!(err, Error::JobNotFound(name) if name == "ghost"));
    }

    #[rstest]
    fn impact_of_uses_reported_or_assumed_status(workload: Workload) {
        let reported = workload.impact_of("a", None).unwrap();
        assert_eq!(reported.status, Status::Failed);
        assert_eq!(reported.impacted, set(&["b", "c", "d"]));

        let assumed = workload.impact_of("a", Some(Status::Running)).unwrap();
        assert_eq!(assumed.policy, ImpactPolicy::Successors);
        assert_eq!(assumed.impacted, set(&["b", "d"]));

        let none = workload.impact_of("d", None).unwrap();
        assert_eq!(none.status, Status::Unknown);
        assert!(none.impacted.is_empty());
    }

    #[rstest]
    fn impact_of_undefined_job_fails(workload: Workload) {
        assert!(matches!(
            workload.impact_of("ghost", None),
            Err(Error::JobNotFound(_))
        ));
    }

    #[rstest]
    fn counts_cover_the_whole_report(workload: Workload) {
        let counts = workload.status_counts();
        assert_eq!(counts[&Status::Failed], 1);
        assert_eq!(counts[&Status::Running], 1);
        assert_eq!(counts[&Status::Inactive], 1);
        assert_eq!(counts[&Status::Terminated], 1);
        assert_eq!(counts.values().sum::<usize>(), 4);
    }

    #[rstest]
    fn impact_report_groups_failed_and_running(workload: Workload) {
        let report = workload.impact_report();

        let failed: Vec<_> = report.failed.iter().map(|e| e.job.as_str()).collect();
        assert_eq!(failed, vec!["a", "ghost"]);
        assert_eq!(report.failed[0].impacted, set(&["b", "c", "d"]));
        assert!(report.failed[1].impacted.is_empty());

        assert_eq!(report.running.len(), 1);
        assert_eq!(report.running[0].job, "b");
        assert_eq!(report.running[0].policy, ImpactPolicy::Successors);
        assert_eq!(report.running[0].impacted, set(&["c", "d"]));
        assert!(!report.is_clear());
    }

    #[test]
    fn without_report_everything_is_unknown() {
        let workload = Workload::from_sources(JIL, None, &Config::default());

        assert!(workload.statuses().is_empty());
        assert_eq!(workload.status_of("a"), Status::Unknown);
        assert!(workload.impact_report().is_clear());
        assert!(workload.impacted_by("a").is_empty());
    }

    #[test]
    fn configured_column_width_is_used() {
        let mut config = Config::default();
        config.status_report.name_width = 10;

        let workload = Workload::from_sources(JIL, Some("a         -----  -----  FA"), &config);
        assert_eq!(workload.status_of("a"), Status::Failed);
        assert!(workload.status_warnings().is_empty());
    }
}
