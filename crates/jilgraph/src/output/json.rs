//! JSON documents for `--json` output.

use crate::workload::{ImpactEntry, ImpactReport, JobDetail, Workload};
use jilgraph_formats::{Job, Status};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

fn write_pretty<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

#[derive(Serialize)]
struct JobRow<'a> {
    #[serde(flatten)]
    job: &'a Job,
    status: Status,
}

pub(super) fn print_jobs_json<W: Write>(w: &mut W, workload: &Workload) -> io::Result<()> {
    let rows: Vec<_> = workload
        .jobs()
        .values()
        .map(|job| JobRow {
            job,
            status: workload.status_of(&job.name),
        })
        .collect();
    write_pretty(w, &rows)
}

pub(super) fn print_job_detail_json<W: Write>(w: &mut W, detail: &JobDetail) -> io::Result<()> {
    write_pretty(w, detail)
}

#[derive(Serialize)]
struct Stats<'a> {
    total: usize,
    counts: &'a BTreeMap<Status, usize>,
}

pub(super) fn print_stats_json<W: Write>(
    w: &mut W,
    counts: &BTreeMap<Status, usize>,
) -> io::Result<()> {
    let stats = Stats {
        total: counts.values().sum(),
        counts,
    };
    write_pretty(w, &stats)
}

pub(super) fn print_impact_json<W: Write>(w: &mut W, entry: &ImpactEntry) -> io::Result<()> {
    write_pretty(w, entry)
}

pub(super) fn print_impact_report_json<W: Write>(
    w: &mut W,
    report: &ImpactReport,
) -> io::Result<()> {
    write_pretty(w, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn workload() -> Workload {
        Workload::from_sources(
            "insert_job: a\nmachine: m1\ninsert_job: b\ncondition: success(a)\n",
            Some("a TE\n"),
            &Config::default(),
        )
    }

    fn render<F>(f: F) -> serde_json::Value
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn jobs_json_flattens_definition_and_status() {
        let value = render(|w| print_jobs_json(w, &workload()));

        assert_eq!(value[0]["name"], "a");
        assert_eq!(value[0]["machine"], "m1");
        assert_eq!(value[0]["status"], "TERMINATED");
        assert_eq!(value[1]["condition"], "success(a)");
        assert_eq!(value[1]["status"], "UNKNOWN");
    }

    #[test]
    fn stats_json_uses_status_keys() {
        let counts = BTreeMap::from([(Status::Success, 2), (Status::Failed, 1)]);
        let value = render(|w| print_stats_json(w, &counts));

        assert_eq!(value["total"], 3);
        assert_eq!(value["counts"]["SUCCESS"], 2);
        assert_eq!(value["counts"]["FAILED"], 1);
    }

    #[test]
    fn impact_report_json_lists_entries() {
        let report = workload().impact_report();
        let value = render(|w| print_impact_report_json(w, &report));

        assert_eq!(value["failed"][0]["job"], "a");
        assert_eq!(value["failed"][0]["policy"], "descendants");
        assert_eq!(value["failed"][0]["impacted"][0], "b");
        assert_eq!(value["running"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn job_detail_json_includes_neighbours() {
        let detail = workload().job_detail("b").unwrap();
        let value = render(|w| print_job_detail_json(w, &detail));

        assert_eq!(value["job"]["name"], "b");
        assert_eq!(value["status"], serde_json::Value::Null);
        assert_eq!(value["upstream"][0], "a");
    }
}
