//! Generational GA loop.
//!
//! Each generation: tournament mating pool → paired crossover (order, then
//! resources, each with its own probability) → order and resource mutation
//! of every child → parallel evaluation → elitist replacement. The loop stops
//! after `GaConfig::generations` iterations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::Time;
use crate::scheduler::{Decoder, HeuristicScheduler};

use super::config::GaConfig;
use super::operators::GeneticOperators;
use super::selection::best_index;
use super::Chromosome;

/// A chromosome with its evaluated fitness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    pub chromosome: Chromosome,
    pub fitness: Time,
}

/// Outcome of a GA run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaResult {
    /// Best chromosome found.
    pub best: Chromosome,
    /// Its makespan ([`Time::inf`] if no feasible chromosome was found).
    pub best_fitness: Time,
    /// Generations executed.
    pub generations: usize,
    /// Best-so-far fitness after initialization and after each generation.
    pub history: Vec<Time>,
}

/// Runs the generational loop.
pub struct GaRunner;

impl GaRunner {
    /// Runs with a `StdRng` seeded from `config.seed`.
    pub fn run<S, D>(operators: &GeneticOperators<'_, S, D>, config: &GaConfig) -> Result<GaResult>
    where
        S: HeuristicScheduler,
        D: Decoder,
    {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self::run_with_rng(operators, config, &mut rng)
    }

    /// Runs with an injected random source.
    ///
    /// Mutation probabilities and the tournament size are those the
    /// operators were built with.
    pub fn run_with_rng<S, D, R>(
        operators: &GeneticOperators<'_, S, D>,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult>
    where
        S: HeuristicScheduler,
        D: Decoder,
        R: Rng,
    {
        config.validate()?;

        let size = config.population_size;
        let mut population = (0..size)
            .map(|_| operators.generate(rng))
            .collect::<Result<Vec<_>>>()?;
        let mut fitness = operators.evaluate_population(&population, config.parallel)?;

        let i = best_index(&fitness);
        let mut best = Individual {
            chromosome: population[i].clone(),
            fitness: fitness[i],
        };
        let mut history = Vec::with_capacity(config.generations + 1);
        history.push(best.fitness);
        info!(population = size, best = %best.fitness, "initial population evaluated");

        for generation in 0..config.generations {
            let pool = operators.select(&fitness, size, rng)?;

            let mut offspring = Vec::with_capacity(size);
            for pair in pool.chunks(2) {
                match *pair {
                    [a, b] => {
                        let (mut c1, mut c2) = (population[a].clone(), population[b].clone());
                        if rng.random::<f64>() < config.crossover_order {
                            (c1, c2) = operators.mate_order(&c1, &c2, rng)?;
                        }
                        if rng.random::<f64>() < config.crossover_resources {
                            (c1, c2) = operators.mate_resources(&c1, &c2, rng)?;
                        }
                        offspring.push(c1);
                        offspring.push(c2);
                    }
                    [a] => offspring.push(population[a].clone()),
                    _ => {}
                }
            }

            for child in offspring.iter_mut() {
                operators.mutate_order(child, rng);
                operators.mutate_resources(child, rng)?;
            }

            let mut child_fitness = operators.evaluate_population(&offspring, config.parallel)?;

            // elitism
            if let Some(worst) = worst_index(&child_fitness) {
                offspring[worst] = best.chromosome.clone();
                child_fitness[worst] = best.fitness;
            }
            population = offspring;
            fitness = child_fitness;

            let i = best_index(&fitness);
            if fitness[i] < best.fitness {
                best = Individual {
                    chromosome: population[i].clone(),
                    fitness: fitness[i],
                };
            }
            history.push(best.fitness);
            debug!(generation, best = %best.fitness, "generation complete");
        }

        info!(
            generations = config.generations,
            best = %best.fitness,
            "GA finished"
        );
        Ok(GaResult {
            best: best.chromosome,
            best_fitness: best.fitness,
            generations: config.generations,
            history,
        })
    }
}

fn worst_index(fitness: &[Time]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .max_by_key(|(_, f)| **f)
        .map(|(i, _)| i)
}
