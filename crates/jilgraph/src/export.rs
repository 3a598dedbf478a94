//! Graph export for presentation tools.
//!
//! Two formats: a JSON document of nodes and edges, and Graphviz DOT text
//! with nodes colored by status.

use crate::workload::Workload;
use jilgraph_formats::{ConditionKind, Status};
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use serde::Serialize;

/// A job node in an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeExport {
    /// Job name
    pub name: String,
    /// Job type
    pub job_type: String,
    /// Machine
    pub machine: String,
    /// Reported status, `UNKNOWN` when absent
    pub status: Status,
}

/// A dependency in an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeExport {
    /// Upstream job
    pub parent: String,
    /// Downstream job
    pub child: String,
    /// Predicate the dependency came from
    pub kind: ConditionKind,
}

/// Nodes and edges of a workload graph, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphExport {
    /// Jobs, in name order
    pub nodes: Vec<NodeExport>,
    /// Dependencies, sorted by parent then child
    pub edges: Vec<EdgeExport>,
}

impl GraphExport {
    /// Snapshot the graph of `workload`.
    #[must_use]
    pub fn from_workload(workload: &Workload) -> Self {
        let nodes = workload
            .jobs()
            .values()
            .map(|job| NodeExport {
                name: job.name.clone(),
                job_type: job.job_type.clone(),
                machine: job.machine.clone(),
                status: workload.status_of(&job.name),
            })
            .collect();

        let edges = workload
            .graph()
            .edges()
            .into_iter()
            .map(|(parent, child, kind)| EdgeExport {
                parent: parent.to_string(),
                child: child.to_string(),
                kind,
            })
            .collect();

        Self { nodes, edges }
    }
}

/// Fill color for a status, matching the usual dashboard palette.
#[must_use]
pub fn status_color(status: &Status) -> &'static str {
    match status {
        Status::Success => "#28a745",
        Status::Running => "#ffc107",
        Status::Failed | Status::Terminated => "#dc3545",
        Status::Inactive => "#6c757d",
        Status::Activated | Status::OnHold => "#17a2b8",
        Status::Starting => "#fd7e14",
        Status::Unknown | Status::Other(_) => "#6f42c1",
    }
}

/// Render the workload graph as Graphviz DOT.
#[must_use]
pub fn to_dot(workload: &Workload) -> String {
    type Graph = DiGraph<String, ConditionKind>;

    let node_attrs = |_: &Graph, (_, name): (NodeIndex, &String)| -> String {
        let status = workload.status_of(name);
        format!(
            "style=filled fillcolor=\"{}\" tooltip=\"{status}\"",
            status_color(&status)
        )
    };
    let edge_attrs = |_: &Graph, edge: EdgeReference<'_, ConditionKind>| -> String {
        match edge.weight() {
            ConditionKind::Success => String::new(),
            ConditionKind::Done => "style=dashed".to_string(),
            ConditionKind::Failure => "style=dotted color=\"#dc3545\"".to_string(),
        }
    };

    let dot = Dot::with_attr_getters(workload.graph().as_petgraph(), &[], &edge_attrs, &node_attrs);
    format!("{dot}")
}
