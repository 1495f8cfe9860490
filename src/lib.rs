//! Genetic-algorithm scheduling for resource-constrained projects (RCPSP).
//!
//! Works form a precedence DAG; each work needs workers of several kinds,
//! all supplied by one contractor with a finite pool. The GA searches over
//! work orders and resource assignments to minimize makespan.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `WorkGraph`, `GraphNode`, `Contractor`,
//!   `Worker`, `Schedule`, `Time`
//! - **`validation`**: Input integrity checks (duplicate IDs, DAG cycles, worker refs)
//! - **`index`**: Dense index tables over works, worker kinds and contractors
//! - **`ga`**: Chromosome encoding and genetic operators, plus a reference
//!   generational loop
//! - **`scheduler`**: Decoder and seed-scheduler interfaces with serial and
//!   randomized topological implementations
//!
//! # Logging
//!
//! Operators emit `tracing` events; install a subscriber in the binary to
//! see them.
//!
//! # References
//!
//! - Kolisch & Hartmann (2006), "Experimental investigation of heuristics for
//!   resource-constrained project scheduling: An update"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod ga;
pub mod index;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{GaError, Result};
