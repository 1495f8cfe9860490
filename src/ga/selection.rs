//! Tournament selection.
//!
//! Lower fitness is better. Ties go to the aspirant drawn first.

use rand::Rng;

use crate::error::{GaError, Result};
use crate::models::Time;

/// Index of the winner of one tournament.
///
/// Draws `tournament_size` aspirants uniformly with replacement. A
/// tournament at least as large as the population compares the whole
/// population instead, so it always returns the best individual.
pub fn tournament<R: Rng>(fitness: &[Time], tournament_size: usize, rng: &mut R) -> Result<usize> {
    if fitness.is_empty() {
        return Err(GaError::EmptyPopulation);
    }
    if tournament_size == 0 {
        return Err(GaError::InvalidConfig {
            key: "selection_size",
            message: "tournament size must be at least 1".into(),
        });
    }

    if tournament_size >= fitness.len() {
        return Ok(best_index(fitness));
    }

    let mut best = rng.random_range(0..fitness.len());
    for _ in 1..tournament_size {
        let candidate = rng.random_range(0..fitness.len());
        if fitness[candidate] < fitness[best] {
            best = candidate;
        }
    }
    Ok(best)
}

/// Fills a mating pool of `count` indices by repeated tournaments.
pub fn select_tournament<R: Rng>(
    fitness: &[Time],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    (0..count)
        .map(|_| tournament(fitness, tournament_size, rng))
        .collect()
}

/// Index of the lowest fitness (first on ties).
pub fn best_index(fitness: &[Time]) -> usize {
    fitness
        .iter()
        .enumerate()
        .min_by_key(|(_, f)| **f)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn fitness() -> Vec<Time> {
        vec![Time::new(30), Time::new(10), Time::inf(), Time::new(20)]
    }

    #[test]
    fn test_full_tournament_is_deterministic() {
        let f = fitness();
        let mut rng = SmallRng::seed_from_u64(42);
        let pool = select_tournament(&f, 100, f.len(), &mut rng).unwrap();
        assert!(pool.iter().all(|&i| i == 1));
    }

    #[test]
    fn test_unit_tournament_is_uniform() {
        let f = fitness();
        let mut rng = SmallRng::seed_from_u64(42);
        let pool = select_tournament(&f, 4000, 1, &mut rng).unwrap();

        let mut counts = [0usize; 4];
        for i in pool {
            counts[i] += 1;
        }
        // every individual, including the infeasible one, ~1000 times
        for c in counts {
            assert!((800..1200).contains(&c), "counts: {counts:?}");
        }
    }

    #[test]
    fn test_pressure_favours_better() {
        let f = fitness();
        let mut rng = SmallRng::seed_from_u64(42);
        let pool = select_tournament(&f, 2000, 3, &mut rng).unwrap();
        let best = pool.iter().filter(|&&i| i == 1).count();
        let worst = pool.iter().filter(|&&i| i == 2).count();
        assert!(best > worst);
    }

    #[test]
    fn test_errors() {
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(tournament(&[], 2, &mut rng), Err(GaError::EmptyPopulation));
        assert!(matches!(
            tournament(&fitness(), 0, &mut rng),
            Err(GaError::InvalidConfig { key: "selection_size", .. })
        ));
    }

    #[test]
    fn test_best_index_ties() {
        let f = vec![Time::new(5), Time::new(3), Time::new(3)];
        assert_eq!(best_index(&f), 1);
    }
}
