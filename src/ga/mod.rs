//! Genetic-algorithm operator layer for RCPSP.
//!
//! A candidate schedule is a [`Chromosome`]: a work order plus a resource
//! matrix (worker quantities per type and a contractor per work). The
//! operators below may each produce infeasible chromosomes; feasibility is
//! checked only at evaluation time, where infeasible chromosomes score
//! [`Time::inf`](crate::models::Time::inf).
//!
//! # Submodules
//!
//! - [`validator`]: order and capacity feasibility predicates
//! - [`fitness`]: makespan evaluation, parallel over a population
//! - [`crossover`] / [`mutation`] / [`selection`]: the variation operators
//! - [`generator`]: initial chromosomes from heuristic seeds and random schedules
//! - [`operators`]: [`GeneticOperators`], the operator set for one problem
//! - [`runner`]: [`GaRunner`], the generational loop
//!
//! # Reference
//! - Hartmann (1998), "A competitive genetic algorithm for resource-constrained
//!   project scheduling"

mod chromosome;
pub mod config;
pub mod crossover;
pub mod fitness;
pub mod generator;
pub mod mutation;
pub mod operators;
pub mod runner;
pub mod selection;
pub mod validator;

pub use chromosome::{Chromosome, ResourceBounds, ResourceRow};
pub use config::{GaConfig, OperatorConfig};
pub use fitness::FitnessEvaluator;
pub use generator::{ChromosomeGenerator, SeedChromosomes};
pub use operators::GeneticOperators;
pub use runner::{GaResult, GaRunner, Individual};
