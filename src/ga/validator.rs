//! Feasibility predicates.
//!
//! A chromosome is feasible when its order is a topological permutation of
//! the works and no work is assigned more workers than its contractor owns.
//! Both checks are pure. `Ok(false)` means infeasible; `Err` means the
//! chromosome is malformed.

use crate::error::{GaError, Result};
use crate::index::IndexTables;

use super::Chromosome;

/// Whether the chromosome passes both the order and resource checks.
pub fn is_correct(chromosome: &Chromosome, tables: &IndexTables) -> Result<bool> {
    chromosome.check_shape(tables)?;
    Ok(is_order_correct(chromosome, tables)? && is_resources_correct(chromosome, tables)?)
}

/// Whether `order` visits every work once, each after all of its parents.
///
/// Single left-to-right scan; fails at the first work whose parent has not
/// been seen yet, or that repeats.
pub fn is_order_correct(chromosome: &Chromosome, tables: &IndexTables) -> Result<bool> {
    let count = tables.task_count();
    let mut seen = vec![false; count];
    for &task in &chromosome.order {
        let parents = tables.parents(task)?;
        if seen[task] || parents.iter().any(|&p| !seen[p]) {
            return Ok(false);
        }
        seen[task] = true;
    }
    Ok(chromosome.order.len() == count)
}

/// Whether every assigned quantity fits the chosen contractor's pool.
pub fn is_resources_correct(chromosome: &Chromosome, tables: &IndexTables) -> Result<bool> {
    if chromosome.quantities.len() != tables.worker_type_count() {
        return Err(GaError::RowCountMismatch {
            expected: tables.worker_type_count(),
            actual: chromosome.quantities.len(),
        });
    }
    chromosome.check_columns(tables.task_count())?;

    for (task, &contractor) in chromosome.contractors.iter().enumerate() {
        if contractor >= tables.contractor_count() {
            return Err(GaError::ContractorIndexOutOfRange {
                index: contractor,
                count: tables.contractor_count(),
            });
        }
        for (worker_type, row) in chromosome.quantities.iter().enumerate() {
            if row[task] > tables.capacity(worker_type, contractor)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}
