//! Structural error taxonomy.
//!
//! Every variant indicates an integration bug upstream (malformed chromosome
//! shapes, out-of-range indices, inconsistent catalogs). Infeasible
//! solutions are never reported here; they receive an infinite makespan.

use crate::validation::ValidationError;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, GaError>;

/// Structural failure raised by the operator layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("order has {actual} genes, expected {expected}")]
    OrderLengthMismatch { expected: usize, actual: usize },

    #[error("resource matrix has {actual} worker rows, expected {expected}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("resource row {row} has {actual} genes, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("task index {index} out of range (task count {count})")]
    TaskIndexOutOfRange { index: usize, count: usize },

    #[error("worker type index {index} out of range (worker type count {count})")]
    WorkerTypeOutOfRange { index: usize, count: usize },

    #[error("contractor index {index} out of range (contractor count {count})")]
    ContractorIndexOutOfRange { index: usize, count: usize },

    #[error("bounds have {actual} entries, expected {expected}")]
    BoundsLengthMismatch { expected: usize, actual: usize },

    #[error("lower bound {low} exceeds upper bound {up} for task {task}")]
    InvertedBounds { task: usize, low: u32, up: u32 },

    #[error("unknown work id '{0}'")]
    UnknownWork(String),

    #[error("unknown worker kind '{0}'")]
    UnknownWorker(String),

    #[error("unknown contractor '{0}'")]
    UnknownContractor(String),

    #[error("no contractor can supply the workers required by '{0}'")]
    NoCapableContractor(String),

    #[error("task {task} demands {demand} '{worker}' but contractor {contractor} owns {capacity}")]
    DemandExceedsCapacity {
        task: usize,
        worker: String,
        contractor: usize,
        demand: u32,
        capacity: u32,
    },

    #[error("task {task} decoded before its parent {parent}")]
    UnscheduledParent { task: usize, parent: usize },

    #[error("schedule covers {actual} works, expected {expected}")]
    IncompleteSchedule { expected: usize, actual: usize },

    #[error("invalid scheduling input: {} issue(s)", .0.len())]
    InvalidInput(Vec<ValidationError>),

    #[error("invalid configuration value for {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },

    #[error("cannot select from an empty population")]
    EmptyPopulation,
}
