//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A small ETL workload:
///
/// ```text
///   extract ──► transform ──► load ──► report
///                   │
///                   └──────► audit
///   cleanup
/// ```
pub const WORKLOAD_JIL: &str = "\
/* ----------------- nightly etl ----------------- */
insert_job: extract   job_type: cmd
command: /opt/etl/extract.sh
machine: etl01
owner: batch@etl01
description: Pull the nightly files

insert_job: transform
job_type: cmd
command: /opt/etl/transform.sh
machine: etl01
condition: success(extract)

insert_job: load
job_type: cmd
machine: db01
condition: success(transform) & done(missing_job)

insert_job: audit
machine: etl02
condition: done(transform)

insert_job: report
job_type: box
condition: s(load) | success(load)

insert_job: cleanup
machine: etl01
";

/// Pad `name` to the default 60-character column and append `rest`.
pub fn row(name: &str, rest: &str) -> String {
    format!("{name:<60}{rest}")
}

/// An `autorep -J` report where `extract` failed and `transform` is running.
pub fn workload_report() -> String {
    [
        row("Job Name", "Last Start           Last End             ST Run/Ntry Pri/Xit"),
        format!("{} {} {}", "_".repeat(59), "_".repeat(20), "_".repeat(20)),
        String::new(),
        row("extract", "01/15/2024 01:00:00  01/15/2024 01:04:10  FA 812/1   1"),
        row("transform", "01/15/2024 01:05:00  -----                RU 812/1"),
        row("load", "-----                -----                IN 0/0"),
        row("cleanup", "01/15/2024 00:30:00  01/15/2024 00:31:02  SU 811/1   0"),
        row("ghost_job", "-----                -----                OH 0/0"),
    ]
    .join("\n")
}

/// Path to the compiled binary
pub fn jilgraph_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_jilgraph"))
}

/// Write the standard fixtures into `dir`, returning (jil, report) paths
pub fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let jil = dir.join("workload.jil");
    let report = dir.join("autorep.txt");
    fs::write(&jil, WORKLOAD_JIL).expect("Failed to write JIL fixture");
    fs::write(&report, workload_report()).expect("Failed to write report fixture");
    (jil, report)
}

/// Run the jilgraph binary in the specified directory with colors disabled
pub fn run_jilgraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(jilgraph_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute jilgraph binary")
}
