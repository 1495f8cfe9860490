//! Randomized topological scheduler.
//!
//! # Algorithm
//!
//! 1. Kahn's algorithm, drawing the next work uniformly from the ready set.
//! 2. For each work, pick a contractor uniformly among those able to meet
//!    every minimum worker requirement; assign `min(max_count, capacity)`
//!    workers of each required kind.
//! 3. Time the result with the serial schedule-generation scheme.
//!
//! Different seeds give different (always feasible) schedules, which is
//! what the chromosome generator relies on for population diversity.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::error::{GaError, Result};
use crate::ga::Chromosome;
use crate::index::IndexTables;
use crate::models::{Contractor, Schedule, WorkGraph};

use super::{Decoder, HeuristicScheduler, ScheduleContext, SerialDecoder};

/// Seeded randomized topological-order scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomizedTopologicalScheduler {
    decoder: SerialDecoder,
}

impl RandomizedTopologicalScheduler {
    /// Creates a scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Random feasible resource assignment for every work.
    fn assign<R: Rng>(
        graph: &WorkGraph,
        tables: &IndexTables,
        rng: &mut R,
    ) -> Result<(Vec<Vec<u32>>, Vec<usize>)> {
        let tasks = tables.task_count();
        let mut quantities = vec![vec![0u32; tasks]; tables.worker_type_count()];
        let mut contractors = vec![0usize; tasks];

        for (task, node) in graph.nodes().iter().enumerate() {
            let mut capable = Vec::new();
            'contractors: for c in 0..tables.contractor_count() {
                for req in &node.worker_reqs {
                    let w = tables
                        .worker_index(&req.kind)
                        .ok_or_else(|| GaError::UnknownWorker(req.kind.clone()))?;
                    if tables.capacity(w, c)? < req.min_count {
                        continue 'contractors;
                    }
                }
                capable.push(c);
            }
            if capable.is_empty() {
                return Err(GaError::NoCapableContractor(node.id.clone()));
            }

            let contractor = capable[rng.random_range(0..capable.len())];
            contractors[task] = contractor;
            for req in &node.worker_reqs {
                if let Some(w) = tables.worker_index(&req.kind) {
                    quantities[w][task] = req.max_count.min(tables.capacity(w, contractor)?);
                }
            }
        }

        Ok((quantities, contractors))
    }
}

/// Random topological order of all works (Kahn's algorithm).
///
/// Every order compatible with the precedence DAG has a non-zero
/// probability of being drawn.
pub fn random_topological_order<R: Rng>(tables: &IndexTables, rng: &mut R) -> Result<Vec<usize>> {
    let tasks = tables.task_count();
    let mut in_degree = vec![0usize; tasks];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); tasks];
    for (task, degree) in in_degree.iter_mut().enumerate() {
        let parents = tables.parents(task)?;
        *degree = parents.len();
        for &p in parents {
            children[p].push(task);
        }
    }

    let mut ready: Vec<usize> = (0..tasks).filter(|&t| in_degree[t] == 0).collect();
    let mut order = Vec::with_capacity(tasks);
    while !ready.is_empty() {
        let task = ready.swap_remove(rng.random_range(0..ready.len()));
        order.push(task);
        for &child in &children[task] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                ready.push(child);
            }
        }
    }

    Ok(order)
}

impl HeuristicScheduler for RandomizedTopologicalScheduler {
    fn schedule(
        &self,
        graph: &WorkGraph,
        contractors: &[Contractor],
        seed: u64,
    ) -> Result<Schedule> {
        let tables = IndexTables::new(graph, contractors)?;
        let mut rng = StdRng::seed_from_u64(seed);

        let order = random_topological_order(&tables, &mut rng)?;
        let (quantities, assigned) = Self::assign(graph, &tables, &mut rng)?;
        trace!(seed, works = order.len(), "randomized topological order drawn");

        let chromosome = Chromosome::new(order, quantities, assigned);
        let ctx = ScheduleContext::new(graph, contractors, &tables);
        self.decoder.decode(&chromosome, &ctx)
    }
}
