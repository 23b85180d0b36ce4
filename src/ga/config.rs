//! GA configuration.
//!
//! [`GaConfig`] holds the parameters that control the generational loop.
//! Operator choices (selection, mutation, fitness policy) live on the
//! strategy, see [`PermutationGa`](super::PermutationGa).

use crate::error::{GaError, Result};

/// How the elite is fitted back into the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElitismSizing {
    /// Offspring are truncated to `population_size - 1` before the elite is
    /// appended, so every generation holds at most `population_size`
    /// individuals.
    #[default]
    Constant,

    /// Offspring are truncated to `population_size` and the elite is
    /// appended on top, so generations hold `population_size + 1`
    /// individuals when crossover produced a full set.
    Faithful,
}

/// Configuration for the generational GA.
///
/// # Defaults
///
/// ```
/// use u_permga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.generation_count, 30);
/// assert!(config.elitism);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_permga::ga::{ElitismSizing, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_generation_count(100)
///     .with_elitism_sizing(ElitismSizing::Faithful)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Nominal number of individuals in the population. At least 2.
    pub population_size: usize,

    /// Number of generations to simulate. 0 returns the best initial state.
    pub generation_count: usize,

    /// Whether the best individual of each generation survives verbatim.
    pub elitism: bool,

    /// Population sizing when elitism is on.
    pub elitism_sizing: ElitismSizing,

    /// Stop as soon as an individual of cost 0 is present.
    ///
    /// Off by default: the loop then always runs `generation_count`
    /// generations.
    pub stop_at_zero_cost: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            generation_count: 30,
            elitism: true,
            elitism_sizing: ElitismSizing::default(),
            stop_at_zero_cost: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generation_count(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the elitism sizing policy.
    pub fn with_elitism_sizing(mut self, sizing: ElitismSizing) -> Self {
        self.elitism_sizing = sizing;
        self
    }

    /// Enables or disables early stop on a zero-cost individual.
    pub fn with_stop_at_zero_cost(mut self, stop: bool) -> Self {
        self.stop_at_zero_cost = stop;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick runs on small boards.
    ///
    /// - Population: 50, Generations: 10
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            generation_count: 10,
            ..Self::default()
        }
    }

    /// Preset for near-certain success on 8 queens.
    ///
    /// - Population: 50, Generations: 100
    pub fn thorough() -> Self {
        Self {
            population_size: 50,
            generation_count: 100,
            ..Self::default()
        }
    }

    /// Number of offspring kept before the elite is appended.
    pub(crate) fn offspring_quota(&self) -> usize {
        match (self.elitism, self.elitism_sizing) {
            (true, ElitismSizing::Constant) => self.population_size - 1,
            _ => self.population_size,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] if any parameter is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        Ok(())
    }
}
