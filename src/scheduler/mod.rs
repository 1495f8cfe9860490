//! Decoding and seed schedulers.
//!
//! The genetic operators are generic over two collaborators:
//!
//! - [`Decoder`]: turns a chromosome into a timed [`Schedule`] (and back).
//! - [`HeuristicScheduler`]: produces a complete feasible schedule from
//!   scratch, used to seed the population.
//!
//! [`SerialDecoder`] and [`RandomizedTopologicalScheduler`] are the
//! implementations shipped with this crate.
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited"
//! - Kahn (1962), "Topological sorting of large networks"

mod serial;
mod topological;

pub use serial::SerialDecoder;
pub use topological::{random_topological_order, RandomizedTopologicalScheduler};

use crate::error::Result;
use crate::ga::Chromosome;
use crate::index::IndexTables;
use crate::models::{Contractor, Schedule, WorkGraph};

/// Read-only problem data shared by every decode call.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleContext<'a> {
    pub graph: &'a WorkGraph,
    pub contractors: &'a [Contractor],
    pub tables: &'a IndexTables,
}

impl<'a> ScheduleContext<'a> {
    pub fn new(graph: &'a WorkGraph, contractors: &'a [Contractor], tables: &'a IndexTables) -> Self {
        Self {
            graph,
            contractors,
            tables,
        }
    }
}

/// Chromosome ↔ schedule conversion.
///
/// Implementations must be deterministic given their inputs, and are shared
/// across threads during parallel fitness evaluation.
pub trait Decoder: Send + Sync {
    /// Simulates execution of `chromosome`.
    ///
    /// Callers only pass chromosomes that passed
    /// [`crate::ga::validator::is_correct`].
    fn decode(&self, chromosome: &Chromosome, ctx: &ScheduleContext<'_>) -> Result<Schedule>;

    /// Encodes a feasible schedule as a chromosome.
    fn encode(&self, schedule: &Schedule, tables: &IndexTables) -> Result<Chromosome>;
}

/// Builds a complete precedence- and resource-feasible schedule.
pub trait HeuristicScheduler: Send + Sync {
    /// Schedules every work; `seed` drives any randomized choices.
    fn schedule(&self, graph: &WorkGraph, contractors: &[Contractor], seed: u64)
        -> Result<Schedule>;
}
