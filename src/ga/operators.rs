//! Genetic operators bundled for one problem instance.
//!
//! [`GeneticOperators`] owns the collaborators and derived data every
//! operator needs (seed chromosomes, worker bounds, probabilities) and
//! exposes the operator set as plain methods. It is built once per run and
//! passed by reference into the generational loop.
//!
//! # Usage
//!
//! ```
//! use u_rcpsp::ga::{GeneticOperators, OperatorConfig, SeedChromosomes};
//! use u_rcpsp::index::IndexTables;
//! use u_rcpsp::models::{Contractor, GraphNode, WorkGraph, WorkerReq};
//! use u_rcpsp::scheduler::{HeuristicScheduler, RandomizedTopologicalScheduler, ScheduleContext, SerialDecoder};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let graph = WorkGraph::new()
//!     .with_node(GraphNode::new("A").with_duration(2).with_worker_req(WorkerReq::new("driver", 1, 2)))
//!     .with_node(GraphNode::new("B").with_duration(1).with_parent("A"));
//! let contractors = vec![Contractor::new("C1").with_workers("driver", 2)];
//! let tables = IndexTables::new(&graph, &contractors).unwrap();
//!
//! let heuristic = RandomizedTopologicalScheduler::new();
//! let seeds = SeedChromosomes::from_schedules(
//!     &heuristic.schedule(&graph, &contractors, 1).unwrap(),
//!     &heuristic.schedule(&graph, &contractors, 2).unwrap(),
//!     &SerialDecoder::new(),
//!     &tables,
//! ).unwrap();
//!
//! let ops = GeneticOperators::standard(
//!     ScheduleContext::new(&graph, &contractors, &tables),
//!     seeds,
//!     OperatorConfig::default(),
//! ).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let ch = ops.generate(&mut rng).unwrap();
//! assert!(ops.validate(&ch).unwrap());
//! assert_eq!(ops.evaluate(&ch).unwrap().value(), 3);
//! ```

use rand::Rng;

use crate::error::Result;
use crate::models::Time;
use crate::scheduler::{
    Decoder, HeuristicScheduler, RandomizedTopologicalScheduler, ScheduleContext, SerialDecoder,
};

use super::config::OperatorConfig;
use super::fitness::FitnessEvaluator;
use super::generator::{ChromosomeGenerator, SeedChromosomes};
use super::{crossover, mutation, selection, validator};
use super::{Chromosome, ResourceBounds};

/// Operator set of the scheduling GA.
#[derive(Debug, Clone)]
pub struct GeneticOperators<'a, S = RandomizedTopologicalScheduler, D = SerialDecoder> {
    ctx: ScheduleContext<'a>,
    seeds: SeedChromosomes,
    scheduler: S,
    decoder: D,
    config: OperatorConfig,
    bounds: Vec<ResourceBounds>,
}

impl<'a> GeneticOperators<'a> {
    /// Operators using the crate's randomized topological scheduler and
    /// serial decoder.
    pub fn standard(
        ctx: ScheduleContext<'a>,
        seeds: SeedChromosomes,
        config: OperatorConfig,
    ) -> Result<Self> {
        Self::new(
            ctx,
            seeds,
            RandomizedTopologicalScheduler::new(),
            SerialDecoder::new(),
            config,
        )
    }
}

impl<'a, S: HeuristicScheduler, D: Decoder> GeneticOperators<'a, S, D> {
    /// Validates `config` and derives per-worker-type mutation bounds.
    pub fn new(
        ctx: ScheduleContext<'a>,
        seeds: SeedChromosomes,
        scheduler: S,
        decoder: D,
        config: OperatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let bounds = ResourceBounds::for_all_worker_types(ctx.graph, ctx.tables)?;
        Ok(Self {
            ctx,
            seeds,
            scheduler,
            decoder,
            config,
            bounds,
        })
    }

    pub fn context(&self) -> &ScheduleContext<'a> {
        &self.ctx
    }

    pub fn config(&self) -> &OperatorConfig {
        &self.config
    }

    /// Quantity bounds, indexed by worker type.
    pub fn bounds(&self) -> &[ResourceBounds] {
        &self.bounds
    }

    /// Draws an initial chromosome.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Chromosome> {
        ChromosomeGenerator::new(self.ctx, &self.seeds, &self.scheduler, &self.decoder)
            .generate(rng)
    }

    /// Topological and capacity feasibility.
    pub fn validate(&self, chromosome: &Chromosome) -> Result<bool> {
        validator::is_correct(chromosome, self.ctx.tables)
    }

    /// Makespan, or [`Time::inf`] for an infeasible chromosome.
    pub fn evaluate(&self, chromosome: &Chromosome) -> Result<Time> {
        self.evaluator().evaluate(chromosome)
    }

    pub fn evaluate_population(&self, population: &[Chromosome], parallel: bool) -> Result<Vec<Time>> {
        self.evaluator().evaluate_population(population, parallel)
    }

    /// Order crossover; each child keeps its head parent's resources.
    pub fn mate_order<R: Rng>(
        &self,
        p1: &Chromosome,
        p2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        crossover::mate_order_chromosomes(p1, p2, rng)
    }

    /// One-point crossover over every resource row.
    pub fn mate_resources<R: Rng>(
        &self,
        p1: &Chromosome,
        p2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        crossover::mate_resources(p1, p2, rng)
    }

    pub fn mutate_order<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        mutation::mutate_order(&mut chromosome.order, self.config.mutate_order, rng);
    }

    /// Mutates every quantity row within its bounds, then the contractor row.
    pub fn mutate_resources<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) -> Result<()> {
        mutation::mutate_all_resources(
            chromosome,
            &self.bounds,
            self.config.mutate_resources,
            self.ctx.tables.contractor_count(),
            rng,
        )
    }

    /// Mating pool of `count` population indices.
    pub fn select<R: Rng>(&self, fitness: &[Time], count: usize, rng: &mut R) -> Result<Vec<usize>> {
        selection::select_tournament(fitness, count, self.config.selection_size, rng)
    }

    fn evaluator(&self) -> FitnessEvaluator<'_, D> {
        FitnessEvaluator::new(self.ctx, &self.decoder)
    }
}
