//! Makespan fitness.
//!
//! Feasible chromosomes are decoded and scored by their makespan; every
//! infeasible chromosome scores [`Time::inf`], which is worse than any
//! feasible score. Population evaluation runs on a rayon parallel iterator:
//! each evaluation only reads the shared problem data and its own
//! chromosome.

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::models::Time;
use crate::scheduler::{Decoder, ScheduleContext};

use super::validator::is_correct;
use super::Chromosome;

/// Scores chromosomes against one problem instance.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a, D> {
    ctx: ScheduleContext<'a>,
    decoder: &'a D,
}

impl<'a, D: Decoder> FitnessEvaluator<'a, D> {
    /// Creates an evaluator.
    pub fn new(ctx: ScheduleContext<'a>, decoder: &'a D) -> Self {
        Self { ctx, decoder }
    }

    /// Makespan of the decoded schedule, or [`Time::inf`] if infeasible.
    ///
    /// # Errors
    /// Structural errors from the validator or decoder.
    pub fn evaluate(&self, chromosome: &Chromosome) -> Result<Time> {
        if !is_correct(chromosome, self.ctx.tables)? {
            return Ok(Time::inf());
        }
        let schedule = self.decoder.decode(chromosome, &self.ctx)?;
        Ok(schedule.makespan())
    }

    /// Evaluates a whole population, in parallel when `parallel` is set.
    ///
    /// Results are in population order. The first structural error aborts
    /// the evaluation.
    pub fn evaluate_population(
        &self,
        population: &[Chromosome],
        parallel: bool,
    ) -> Result<Vec<Time>> {
        let fitness: Vec<Time> = if parallel {
            population
                .par_iter()
                .map(|ch| self.evaluate(ch))
                .collect::<Result<_>>()?
        } else {
            population
                .iter()
                .map(|ch| self.evaluate(ch))
                .collect::<Result<_>>()?
        };

        let infeasible = fitness.iter().filter(|f| f.is_inf()).count();
        debug!(
            population = population.len(),
            infeasible, "population evaluated"
        );
        Ok(fitness)
    }
}
