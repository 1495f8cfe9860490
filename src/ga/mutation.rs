//! Mutation operators.
//!
//! Mutations act in place on a chromosome the caller owns exclusively
//! (a freshly produced child, never a parent still in the population).
//! Order mutation may break topological validity; it is not repaired.

use rand::Rng;

use crate::error::{GaError, Result};

use super::{Chromosome, ResourceBounds, ResourceRow};

/// Shuffle-indexes mutation.
///
/// Each position is, with independent probability `probability`, swapped
/// with a different position chosen uniformly.
pub fn mutate_order<R: Rng>(order: &mut [usize], probability: f64, rng: &mut R) {
    let size = order.len();
    if size < 2 {
        return;
    }
    for i in 0..size {
        if rng.random::<f64>() < probability {
            let mut j = rng.random_range(0..size - 1);
            if j >= i {
                j += 1;
            }
            order.swap(i, j);
        }
    }
}

/// Uniform-integer mutation of one resource row.
///
/// - Quantity row: gene `i` becomes uniform in `[low[i], up[i]]` with
///   probability `probability`.
/// - Contractor row: gene becomes uniform in `[0, contractor_count - 1]`
///   with probability `probability`; `low`/`up` are ignored.
pub fn mutate_resources<R: Rng>(
    chromosome: &mut Chromosome,
    low: &[u32],
    up: &[u32],
    row: ResourceRow,
    probability: f64,
    contractor_count: usize,
    rng: &mut R,
) -> Result<()> {
    let tasks = chromosome.contractors.len();
    chromosome.check_columns(tasks)?;

    match row {
        ResourceRow::Contractor => {
            if contractor_count == 0 && tasks > 0 {
                return Err(GaError::ContractorIndexOutOfRange { index: 0, count: 0 });
            }
            for gene in chromosome.contractors.iter_mut() {
                if rng.random::<f64>() < probability {
                    *gene = rng.random_range(0..contractor_count);
                }
            }
        }
        ResourceRow::Workers(worker_type) => {
            for bounds in [low, up] {
                if bounds.len() != tasks {
                    return Err(GaError::BoundsLengthMismatch {
                        expected: tasks,
                        actual: bounds.len(),
                    });
                }
            }
            if let Some(task) = (0..tasks).find(|&t| low[t] > up[t]) {
                return Err(GaError::InvertedBounds {
                    task,
                    low: low[task],
                    up: up[task],
                });
            }

            let worker_types = chromosome.quantities.len();
            let genes = chromosome
                .quantities
                .get_mut(worker_type)
                .ok_or(GaError::WorkerTypeOutOfRange {
                    index: worker_type,
                    count: worker_types,
                })?;
            for (gene, (&lo, &hi)) in genes.iter_mut().zip(low.iter().zip(up)) {
                if rng.random::<f64>() < probability {
                    *gene = rng.random_range(lo..=hi);
                }
            }
        }
    }
    Ok(())
}

/// Applies [`mutate_resources`] to every row, quantity rows first.
///
/// `bounds[w]` holds the bounds of worker type `w`.
pub fn mutate_all_resources<R: Rng>(
    chromosome: &mut Chromosome,
    bounds: &[ResourceBounds],
    probability: f64,
    contractor_count: usize,
    rng: &mut R,
) -> Result<()> {
    if bounds.len() != chromosome.quantities.len() {
        return Err(GaError::RowCountMismatch {
            expected: chromosome.quantities.len(),
            actual: bounds.len(),
        });
    }
    for row in ResourceRow::all(bounds.len()) {
        let (low, up): (&[u32], &[u32]) = match row {
            ResourceRow::Workers(w) => (bounds[w].low.as_slice(), bounds[w].up.as_slice()),
            ResourceRow::Contractor => (&[][..], &[][..]),
        };
        mutate_resources(chromosome, low, up, row, probability, contractor_count, rng)?;
    }
    Ok(())
}
