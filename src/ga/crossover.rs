//! Crossover operators.
//!
//! Both operators copy their parents and return independently owned
//! children. Neither repairs topological order or capacity violations;
//! infeasible children are penalized at evaluation time instead.
//!
//! # Reference
//! Hartmann (1998), "A competitive genetic algorithm for resource-constrained
//! project scheduling"

use std::collections::HashSet;

use rand::Rng;

use crate::error::{GaError, Result};

use super::Chromosome;

/// One-point order crossover at a random cut `k ∈ [1, len)`.
///
/// Each child keeps its own parent's head `[..k]` and appends the other
/// parent's remaining tasks in that parent's relative order, so both
/// children stay permutations of the same index universe.
pub fn mate_order<R: Rng>(
    p1: &[usize],
    p2: &[usize],
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)> {
    check_lengths(p1.len(), p2.len())?;
    if p1.len() < 2 {
        return Ok((p1.to_vec(), p2.to_vec()));
    }
    let cut = rng.random_range(1..p1.len());
    mate_order_at(p1, p2, cut)
}

/// Order crossover at a fixed cut point.
pub fn mate_order_at(p1: &[usize], p2: &[usize], cut: usize) -> Result<(Vec<usize>, Vec<usize>)> {
    check_lengths(p1.len(), p2.len())?;
    let cut = cut.min(p1.len());
    Ok((order_child(p1, p2, cut), order_child(p2, p1, cut)))
}

fn order_child(head: &[usize], donor: &[usize], cut: usize) -> Vec<usize> {
    let taken: HashSet<usize> = head[..cut].iter().copied().collect();
    head[..cut]
        .iter()
        .copied()
        .chain(donor.iter().copied().filter(|t| !taken.contains(t)))
        .collect()
}

/// Order crossover on whole chromosomes; each child inherits the resource
/// matrix of the parent that supplied its head.
pub fn mate_order_chromosomes<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> Result<(Chromosome, Chromosome)> {
    let (o1, o2) = mate_order(&p1.order, &p2.order, rng)?;
    Ok((
        Chromosome {
            order: o1,
            ..p1.clone()
        },
        Chromosome {
            order: o2,
            ..p2.clone()
        },
    ))
}

/// One-point resource crossover at a random column `k ∈ [1, task_count)`.
///
/// Columns `k..` of every quantity row and of the contractor row are
/// swapped between the parents. Orders are inherited unchanged.
pub fn mate_resources<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> Result<(Chromosome, Chromosome)> {
    check_resource_shapes(p1, p2)?;
    let tasks = p1.contractors.len();
    if tasks < 2 {
        return Ok((p1.clone(), p2.clone()));
    }
    let cut = rng.random_range(1..tasks);
    mate_resources_at(p1, p2, cut)
}

/// Resource crossover at a fixed column.
pub fn mate_resources_at(
    p1: &Chromosome,
    p2: &Chromosome,
    cut: usize,
) -> Result<(Chromosome, Chromosome)> {
    check_resource_shapes(p1, p2)?;
    let cut = cut.min(p1.contractors.len());

    let mut c1 = p1.clone();
    let mut c2 = p2.clone();
    for (r1, r2) in c1.quantities.iter_mut().zip(c2.quantities.iter_mut()) {
        r1[cut..].swap_with_slice(&mut r2[cut..]);
    }
    c1.contractors[cut..].swap_with_slice(&mut c2.contractors[cut..]);
    Ok((c1, c2))
}

fn check_lengths(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(GaError::OrderLengthMismatch { expected, actual });
    }
    Ok(())
}

fn check_resource_shapes(p1: &Chromosome, p2: &Chromosome) -> Result<()> {
    if p1.quantities.len() != p2.quantities.len() {
        return Err(GaError::RowCountMismatch {
            expected: p1.quantities.len(),
            actual: p2.quantities.len(),
        });
    }
    let tasks = p1.contractors.len();
    p1.check_columns(tasks)?;
    p2.check_columns(tasks)
}
