//! Work graph model.
//!
//! A work graph is a DAG of works (tasks) linked by finish-to-start
//! precedence. Each node states its fixed duration and the typed workers it
//! needs, as a `[min_count, max_count]` range per worker kind.
//!
//! # Reference
//! Kolisch & Hartmann (1999), "Heuristic Algorithms for Solving the
//! Resource-Constrained Project Scheduling Problem"

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Time;

/// Worker requirement of a single work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReq {
    /// Worker kind (e.g., "driver", "fitter").
    pub kind: String,
    /// Fewest workers the work can be performed with.
    pub min_count: u32,
    /// Most workers the work can usefully absorb.
    pub max_count: u32,
}

impl WorkerReq {
    /// Creates a requirement for `[min_count, max_count]` workers of `kind`.
    pub fn new(kind: impl Into<String>, min_count: u32, max_count: u32) -> Self {
        Self {
            kind: kind.into(),
            min_count,
            max_count,
        }
    }
}

/// A node (work) in the work graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique work identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Processing time, independent of the assigned worker counts.
    pub duration: Time,
    /// IDs of works that must finish before this one starts.
    pub parents: Vec<String>,
    /// Typed worker requirements.
    pub worker_reqs: Vec<WorkerReq>,
}

impl GraphNode {
    /// Creates a zero-duration node with no parents or requirements.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration: Time::ZERO,
            parents: Vec::new(),
            worker_reqs: Vec::new(),
        }
    }

    /// Sets the node name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the duration.
    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = Time::new(duration);
        self
    }

    /// Adds a parent (predecessor) work ID.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parents.push(parent_id.into());
        self
    }

    /// Adds a worker requirement.
    pub fn with_worker_req(mut self, req: WorkerReq) -> Self {
        self.worker_reqs.push(req);
        self
    }

    /// Requirement for a worker kind, if any.
    pub fn worker_req(&self, kind: &str) -> Option<&WorkerReq> {
        self.worker_reqs.iter().find(|r| r.kind == kind)
    }
}

/// Directed acyclic graph of works.
///
/// Node order is insertion order; it defines nothing about execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkGraph {
    nodes: Vec<GraphNode>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

impl WorkGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from a node list.
    pub fn from_nodes(nodes: Vec<GraphNode>) -> Self {
        nodes.into_iter().fold(Self::new(), |g, n| g.with_node(n))
    }

    /// Adds a node.
    pub fn with_node(mut self, node: GraphNode) -> Self {
        self.add_node(node);
        self
    }

    /// Adds a node. A duplicate ID keeps the first node reachable by ID;
    /// [`crate::validation::validate_input`] reports the duplicate.
    pub fn add_node(&mut self, node: GraphNode) {
        self.by_id.entry(node.id.clone()).or_insert(self.nodes.len());
        self.nodes.push(node);
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Looks up a node by ID.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        match self.by_id.get(id) {
            Some(&idx) => self.nodes.get(idx),
            // Deserialized graphs have no lookup table yet.
            None => self.nodes.iter().find(|n| n.id == id),
        }
    }

    /// Number of works.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no works.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
