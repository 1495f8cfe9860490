//! Input validation for project scheduling problems.
//!
//! Checks structural integrity of the work graph and contractor catalog
//! before any index tables are built. Detects:
//! - Duplicate IDs
//! - Parent references to unknown works
//! - Circular precedence dependencies (DAG validation)
//! - Worker requirements with `min_count > max_count`
//! - Minimum worker demands no contractor can meet, alone or together
//! - Negative durations
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Contractor, Time, WorkGraph};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A work references a parent that doesn't exist.
    InvalidParent,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// A worker requirement has `min_count > max_count`.
    InvalidWorkerReq,
    /// No contractor supplies enough workers for a minimum requirement,
    /// or no single contractor meets all of a work's minimums at once.
    UnsuppliedWorker,
    /// A work has a negative duration.
    NegativeDuration,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a work graph against a contractor catalog.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(graph: &WorkGraph, contractors: &[Contractor]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut contractor_ids = HashSet::new();
    for c in contractors {
        if !contractor_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate contractor ID: {}", c.id),
            ));
        }
    }

    let mut work_ids = HashSet::new();
    for node in graph.nodes() {
        if !work_ids.insert(node.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate work ID: {}", node.id),
            ));
        }
    }

    for node in graph.nodes() {
        for parent in &node.parents {
            if !work_ids.contains(parent.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidParent,
                    format!("Work '{}' references unknown parent '{}'", node.id, parent),
                ));
            }
        }

        if node.duration < Time::ZERO {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!("Work '{}' has negative duration {}", node.id, node.duration),
            ));
        }

        let mut kind_unsupplied = false;
        for req in &node.worker_reqs {
            if req.min_count > req.max_count {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWorkerReq,
                    format!(
                        "Work '{}' requires {}..{} '{}' workers",
                        node.id, req.min_count, req.max_count, req.kind
                    ),
                ));
            }
            if req.min_count > 0
                && !contractors
                    .iter()
                    .any(|c| c.capacity(&req.kind) >= req.min_count)
            {
                kind_unsupplied = true;
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnsuppliedWorker,
                    format!(
                        "No contractor supplies {} '{}' workers for work '{}'",
                        req.min_count, req.kind, node.id
                    ),
                ));
            }
        }

        // One contractor performs the whole work.
        let capable = contractors.iter().any(|c| {
            node.worker_reqs
                .iter()
                .all(|r| c.capacity(&r.kind) >= r.min_count)
        });
        if !capable && !kind_unsupplied {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnsuppliedWorker,
                format!(
                    "No single contractor meets every worker requirement of work '{}'",
                    node.id
                ),
            ));
        }
    }

    if let Some(cycle_err) = detect_cycles(graph) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
fn detect_cycles(graph: &WorkGraph) -> Option<ValidationError> {
    // parent → children
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in graph.nodes() {
        for parent in &node.parents {
            adj.entry(parent.as_str()).or_default().push(node.id.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for node in graph.nodes() {
        let id = node.id.as_str();
        if !visited.contains(id) && has_cycle_dfs(id, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving work '{id}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(children) = adj.get(node) {
        for &next in children {
            if in_stack.contains(next) {
                return true;
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}
