//! Jilgraph - dependency and impact analysis for AutoSys workloads.
//!
//! Job definitions and status reports are parsed by [`jilgraph_formats`];
//! this crate joins them into a [`workload::Workload`], builds the dependency
//! graph, and answers impact queries. The `jilgraph` binary is a thin CLI
//! over the same API.
//!
//! ```
//! use jilgraph::config::Config;
//! use jilgraph::workload::Workload;
//!
//! let jil = "insert_job: A\n\
//!            insert_job: B\ncondition: success(A)\n\
//!            insert_job: C\ncondition: success(B)\n";
//! let workload = Workload::from_sources(jil, Some("A FA\n"), &Config::default());
//!
//! let impacted: Vec<_> = workload.impacted_by("A").into_iter().collect();
//! assert_eq!(impacted, ["B", "C"]);
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod impact;
pub mod workload;

// Public CLI module (needed by binary)
pub mod cli;
pub mod output;

pub use error::{Error, Result};
pub use graph::DependencyGraph;
pub use impact::{impacted_jobs, ImpactPolicy};
pub use workload::Workload;
