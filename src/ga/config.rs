//! GA parameters.
//!
//! [`OperatorConfig`] belongs to the operator set
//! ([`GeneticOperators`](super::GeneticOperators)); [`GaConfig`] covers only
//! the generational loop around it.
//!
//! # Usage
//!
//! ```
//! use u_rcpsp::ga::{GaConfig, OperatorConfig};
//!
//! let operators = OperatorConfig::default().with_selection_size(2);
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_generations(10)
//!     .with_seed(42);
//! assert!(operators.validate().is_ok());
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GaError, Result};

/// Per-operator probabilities and the tournament size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Per-position swap probability of order mutation.
    pub mutate_order: f64,
    /// Per-gene probability of resource mutation.
    pub mutate_resources: f64,
    /// Tournament size.
    pub selection_size: usize,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            mutate_order: 0.05,
            mutate_resources: 0.05,
            selection_size: 3,
        }
    }
}

impl OperatorConfig {
    pub fn with_mutate_order(mut self, probability: f64) -> Self {
        self.mutate_order = probability;
        self
    }

    pub fn with_mutate_resources(mut self, probability: f64) -> Self {
        self.mutate_resources = probability;
        self
    }

    pub fn with_selection_size(mut self, size: usize) -> Self {
        self.selection_size = size;
        self
    }

    /// Rejects probabilities outside `[0, 1]` and an empty tournament.
    pub fn validate(&self) -> Result<()> {
        check_probability("mutate_order", self.mutate_order)?;
        check_probability("mutate_resources", self.mutate_resources)?;
        if self.selection_size == 0 {
            return Err(GaError::InvalidConfig {
                key: "selection_size",
                message: "tournament size must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Parameters of the generational loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    pub population_size: usize,
    /// Generation budget; the only termination criterion.
    pub generations: usize,
    /// Probability that a pair undergoes order crossover.
    pub crossover_order: f64,
    /// Probability that a pair undergoes resource crossover.
    pub crossover_resources: f64,
    /// Seed of the run's `StdRng`.
    pub seed: u64,
    /// Evaluate populations on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            crossover_order: 0.9,
            crossover_resources: 0.9,
            seed: 0,
            parallel: true,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_crossover_order(mut self, probability: f64) -> Self {
        self.crossover_order = probability;
        self
    }

    pub fn with_crossover_resources(mut self, probability: f64) -> Self {
        self.crossover_resources = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the loop parameters.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GaError::InvalidConfig {
                key: "population_size",
                message: "population must hold at least one individual".into(),
            });
        }
        check_probability("crossover_order", self.crossover_order)?;
        check_probability("crossover_resources", self.crossover_resources)
    }
}

fn check_probability(key: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GaError::InvalidConfig {
            key,
            message: format!("probability {value} outside [0, 1]"),
        });
    }
    Ok(())
}
