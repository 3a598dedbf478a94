//! Job dependency graph built on petgraph.
//!
//! ## Edge Direction Convention
//!
//! Edges point from **parent -> child**: if `load` has
//! `condition: success(extract)`, the graph holds `extract -> load`. Outgoing
//! edges therefore lead downstream, toward the jobs a failure would reach.
//!
//! ## Invariants
//!
//! - Nodes are exactly the defined jobs, including jobs with no edges
//! - Both endpoints of every edge are defined jobs
//! - No self-edges
//! - At most one edge per `(parent, child)` pair; the first extracted
//!   predicate kind is kept as the weight

use jilgraph_formats::{ConditionKind, DependencyEdge, Job};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use tracing::debug;

/// Directed dependency graph over the defined jobs.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ConditionKind>,
    node_map: HashMap<String, NodeIndex>,
    dropped_edges: usize,
}

impl DependencyGraph {
    /// Build the graph from parsed jobs and raw edges.
    ///
    /// Raw edges naming an undefined job, and self-edges, are dropped rather
    /// than rejected; [`dropped_edges`](Self::dropped_edges) counts them.
    #[must_use]
    pub fn build(jobs: &BTreeMap<String, Job>, edges: &[DependencyEdge]) -> Self {
        let mut graph = DiGraph::with_capacity(jobs.len(), edges.len());
        let mut node_map = HashMap::with_capacity(jobs.len());

        for name in jobs.keys() {
            let node = graph.add_node(name.clone());
            node_map.insert(name.clone(), node);
        }

        let mut dropped_edges = 0;
        for edge in edges {
            let (Some(&parent), Some(&child)) =
                (node_map.get(&edge.parent), node_map.get(&edge.child))
            else {
                debug!(parent = %edge.parent, child = %edge.child, "dropping edge to undefined job");
                dropped_edges += 1;
                continue;
            };

            if parent == child {
                dropped_edges += 1;
                continue;
            }

            if graph.find_edge(parent, child).is_none() {
                graph.add_edge(parent, child, edge.kind);
            }
        }

        Self {
            graph,
            node_map,
            dropped_edges,
        }
    }

    /// Whether `name` is a node of the graph.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Number of jobs.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct dependencies.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Raw edges that were not added because an endpoint was undefined or
    /// the edge pointed at its own job.
    #[must_use]
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Job names in name order.
    pub fn job_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All edges as `(parent, child, kind)`, sorted by parent then child.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str, ConditionKind)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].as_str(),
                    self.graph[e.target()].as_str(),
                    *e.weight(),
                )
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Jobs whose conditions reference `name` directly.
    #[must_use]
    pub fn successors(&self, name: &str) -> BTreeSet<String> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Jobs referenced directly by `name`'s condition.
    #[must_use]
    pub fn predecessors(&self, name: &str) -> BTreeSet<String> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Every job reachable from `name` through one or more edges.
    ///
    /// `name` itself is excluded even when it sits on a cycle.
    #[must_use]
    pub fn descendants(&self, name: &str) -> BTreeSet<String> {
        let Some(&start) = self.node_map.get(name) else {
            return BTreeSet::new();
        };

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut result = BTreeSet::new();

        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if visited.insert(next) {
                    result.insert(self.graph[next].clone());
                    queue.push_back(next);
                }
            }
        }

        result
    }

    /// The underlying petgraph graph.
    #[must_use]
    pub fn as_petgraph(&self) -> &DiGraph<String, ConditionKind> {
        &self.graph
    }

    fn neighbors(&self, name: &str, direction: Direction) -> BTreeSet<String> {
        self.node_map
            .get(name)
            .map(|&node| {
                self.graph
                    .neighbors_directed(node, direction)
                    .map(|n| self.graph[n].clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
