//! Order/resource chromosome for RCPSP.
//!
//! # Encoding
//!
//! - **order**: Permutation of work indices; the execution order handed to
//!   the decoder.
//! - **quantities**: `worker_type_count × task_count` matrix; row `w`, column
//!   `t` is the number of `w` workers assigned to work `t`.
//! - **contractors**: Per-work contractor index (categorical).
//!
//! Quantities and contractors together form the resource matrix: the
//! contractor vector plays the role of its last row, and crossover and
//! mutation treat it exactly like a quantity row (see [`ResourceRow`]).
//!
//! Feasibility (topological order, capacity) is a derived predicate checked
//! by [`super::validator`]; the struct itself enforces nothing.

use serde::{Deserialize, Serialize};

use crate::error::{GaError, Result};
use crate::index::IndexTables;
use crate::models::WorkGraph;

/// Genome of one candidate schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    /// Work indices in execution order.
    pub order: Vec<usize>,
    /// `quantities[worker_type][task]`.
    pub quantities: Vec<Vec<u32>>,
    /// `contractors[task]`.
    pub contractors: Vec<usize>,
}

/// One row of the resource matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceRow {
    /// Quantity row of a worker type.
    Workers(usize),
    /// The contractor-index row.
    Contractor,
}

impl ResourceRow {
    /// Maps a flat row index of the `(worker_type_count + 1)`-row matrix.
    ///
    /// Index `worker_type_count` is the contractor row.
    pub fn from_index(index: usize, worker_type_count: usize) -> Result<Self> {
        match index.cmp(&worker_type_count) {
            std::cmp::Ordering::Less => Ok(Self::Workers(index)),
            std::cmp::Ordering::Equal => Ok(Self::Contractor),
            std::cmp::Ordering::Greater => Err(GaError::WorkerTypeOutOfRange {
                index,
                count: worker_type_count + 1,
            }),
        }
    }

    /// All rows of a matrix with `worker_type_count` quantity rows.
    pub fn all(worker_type_count: usize) -> impl Iterator<Item = ResourceRow> {
        (0..worker_type_count)
            .map(ResourceRow::Workers)
            .chain(std::iter::once(ResourceRow::Contractor))
    }
}

impl Chromosome {
    /// Creates a chromosome from its parts.
    pub fn new(order: Vec<usize>, quantities: Vec<Vec<u32>>, contractors: Vec<usize>) -> Self {
        Self {
            order,
            quantities,
            contractors,
        }
    }

    /// Chromosome of an empty work graph.
    pub fn empty(worker_type_count: usize) -> Self {
        Self::new(Vec::new(), vec![Vec::new(); worker_type_count], Vec::new())
    }

    /// Number of genes in `order`.
    pub fn task_count(&self) -> usize {
        self.order.len()
    }

    /// Number of quantity rows.
    pub fn worker_type_count(&self) -> usize {
        self.quantities.len()
    }

    /// Assigned quantity of `worker_type` for `task`.
    pub fn quantity(&self, worker_type: usize, task: usize) -> Option<u32> {
        self.quantities.get(worker_type)?.get(task).copied()
    }

    /// Checks array shapes against the index tables.
    ///
    /// Shape mismatches are integration bugs, not infeasibility.
    pub fn check_shape(&self, tables: &IndexTables) -> Result<()> {
        let tasks = tables.task_count();
        if self.order.len() != tasks {
            return Err(GaError::OrderLengthMismatch {
                expected: tasks,
                actual: self.order.len(),
            });
        }
        if self.quantities.len() != tables.worker_type_count() {
            return Err(GaError::RowCountMismatch {
                expected: tables.worker_type_count(),
                actual: self.quantities.len(),
            });
        }
        self.check_columns(tasks)
    }

    /// Checks that every resource row has `tasks` genes.
    pub(crate) fn check_columns(&self, tasks: usize) -> Result<()> {
        for (row, genes) in self.quantities.iter().enumerate() {
            if genes.len() != tasks {
                return Err(GaError::RowLengthMismatch {
                    row,
                    expected: tasks,
                    actual: genes.len(),
                });
            }
        }
        if self.contractors.len() != tasks {
            return Err(GaError::RowLengthMismatch {
                row: self.quantities.len(),
                expected: tasks,
                actual: self.contractors.len(),
            });
        }
        Ok(())
    }
}

/// Per-work `[low, up]` bounds on one worker type's quantity row.
///
/// Input of [`super::mutation::mutate_resources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBounds {
    pub low: Vec<u32>,
    pub up: Vec<u32>,
}

impl ResourceBounds {
    /// Derives bounds for `worker_type` from each node's worker requirement.
    ///
    /// Works that do not need the type are pinned to `[0, 0]`.
    pub fn for_worker_type(
        graph: &WorkGraph,
        tables: &IndexTables,
        worker_type: usize,
    ) -> Result<Self> {
        let name = tables
            .worker_name(worker_type)
            .ok_or(GaError::WorkerTypeOutOfRange {
                index: worker_type,
                count: tables.worker_type_count(),
            })?;
        let (low, up) = graph
            .nodes()
            .iter()
            .map(|node| {
                node.worker_req(name)
                    .map(|r| (r.min_count, r.max_count))
                    .unwrap_or((0, 0))
            })
            .unzip();
        Ok(Self { low, up })
    }

    /// Bounds for every worker type, indexed by worker type.
    pub fn for_all_worker_types(graph: &WorkGraph, tables: &IndexTables) -> Result<Vec<Self>> {
        (0..tables.worker_type_count())
            .map(|w| Self::for_worker_type(graph, tables, w))
            .collect()
    }
}
