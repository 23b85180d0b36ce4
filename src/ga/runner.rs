//! GA generational loop execution.
//!
//! [`GaRunner`] orchestrates the evolutionary process:
//! initialization → fitness → elite snapshot → selection → crossover →
//! mutation → truncation → elite re-entry → repeat.

use super::config::GaConfig;
use super::strategy::GeneticStrategy;
use super::types::{Permutation, PermutationProblem};
use crate::error::{GaError, Result};
use crate::random::rng_from_seed;
use rand::Rng;

/// Snapshot of one generation's population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 0 for the initial population, `g` after the `g`-th generation.
    pub generation: usize,

    /// Lowest cost in the population.
    pub best_cost: f64,

    /// Mean cost of the population.
    pub mean_cost: f64,

    /// Number of individuals in the population.
    pub population_size: usize,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Minimum-cost individual of the final population.
    pub best: Permutation,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run ended early on a zero-cost individual.
    pub stopped_early: bool,

    /// Per-generation statistics, starting with the initial population.
    pub history: Vec<GenerationStats>,
}

impl GaResult {
    /// Best cost of each recorded generation.
    pub fn best_cost_history(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.best_cost).collect()
    }

    /// Best cost of the initial population.
    pub fn initial_best_cost(&self) -> f64 {
        self.history.first().map_or(self.best_cost, |s| s.best_cost)
    }
}

/// Executes the generational GA.
///
/// # Usage
///
/// ```
/// use u_permga::ga::{GaConfig, GaRunner, PermutationGa};
/// use u_permga::nqueens::NQueens;
///
/// let config = GaConfig::thorough().with_seed(42);
/// let result = GaRunner::run(&NQueens::new(6), &PermutationGa::tournament(0.05), &config).unwrap();
/// assert!(result.best_cost <= result.initial_best_cost());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] for an invalid configuration or strategy;
    /// otherwise any error raised by the strategy's operators.
    pub fn run<P, S>(problem: &P, strategy: &S, config: &GaConfig) -> Result<GaResult>
    where
        P: PermutationProblem,
        S: GeneticStrategy,
    {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, strategy, config, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    #[tracing::instrument(level = "debug", skip_all, fields(strategy = %strategy.name()))]
    pub fn run_with_rng<P, S, R>(
        problem: &P,
        strategy: &S,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult>
    where
        P: PermutationProblem,
        S: GeneticStrategy,
        R: Rng,
    {
        config.validate()?;
        strategy.validate()?;

        tracing::info!(
            population_size = config.population_size,
            generation_count = config.generation_count,
            elitism = config.elitism,
            "GA run started"
        );

        let mut population: Vec<Permutation> = (0..config.population_size)
            .map(|_| problem.random_state(rng))
            .collect();
        let mut costs = evaluate_costs(problem, &population);
        let mut history = Vec::with_capacity(config.generation_count + 1);
        history.push(generation_stats(0, &costs));

        let mut generations = 0;
        let mut stopped_early = false;

        for gen in 0..config.generation_count {
            if config.stop_at_zero_cost && costs.iter().any(|&c| c == 0.0) {
                stopped_early = true;
                break;
            }

            let fitness = strategy.fitness_all(&costs);
            if fitness.len() != population.len() {
                return Err(GaError::InvariantViolation(format!(
                    "fitness vector has {} entries for {} individuals",
                    fitness.len(),
                    population.len()
                )));
            }

            let elite = if config.elitism {
                Some(population[best_index(&costs)?].clone())
            } else {
                None
            };

            let pairing = strategy.select(&fitness, rng)?;
            let offspring = strategy.crossover_all(&population, &pairing, rng)?;
            let mut next_gen = strategy.mutate_all(&offspring, rng);
            next_gen.truncate(config.offspring_quota());
            next_gen.extend(elite);

            population = next_gen;
            costs = evaluate_costs(problem, &population);
            generations = gen + 1;

            let stats = generation_stats(generations, &costs);
            tracing::debug!(
                generation = stats.generation,
                best_cost = stats.best_cost,
                mean_cost = stats.mean_cost,
                population_size = stats.population_size,
                "generation complete"
            );
            history.push(stats);
        }

        let idx = best_index(&costs)?;
        let best_cost = costs[idx];
        let best = population.swap_remove(idx);

        tracing::info!(generations, best_cost, stopped_early, "GA run finished");

        Ok(GaResult {
            best,
            best_cost,
            generations,
            stopped_early,
            history,
        })
    }
}

/// Runs the GA and returns only the best individual.
///
/// Equivalent to [`GaRunner::run_with_rng`] with a default [`GaConfig`]
/// carrying the given sizes and elitism flag.
///
/// # Errors
/// See [`GaRunner::run_with_rng`].
pub fn search<P, S, R>(
    problem: &P,
    strategy: &S,
    population_size: usize,
    generation_count: usize,
    elitism: bool,
    rng: &mut R,
) -> Result<Permutation>
where
    P: PermutationProblem,
    S: GeneticStrategy,
    R: Rng,
{
    let config = GaConfig::default()
        .with_population_size(population_size)
        .with_generation_count(generation_count)
        .with_elitism(elitism);
    GaRunner::run_with_rng(problem, strategy, &config, rng).map(|r| r.best)
}

fn evaluate_costs<P: PermutationProblem>(problem: &P, population: &[Permutation]) -> Vec<f64> {
    population.iter().map(|ind| problem.cost(ind)).collect()
}

/// Index of the lowest cost; the first one wins ties.
fn best_index(costs: &[f64]) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &c) in costs.iter().enumerate() {
        if best.map_or(true, |(_, b)| c < b) {
            best = Some((i, c));
        }
    }
    best.map(|(i, _)| i)
        .ok_or_else(|| GaError::InvariantViolation("population is empty".into()))
}

fn generation_stats(generation: usize, costs: &[f64]) -> GenerationStats {
    let best_cost = costs.iter().copied().fold(f64::INFINITY, f64::min);
    let mean_cost = if costs.is_empty() {
        f64::NAN
    } else {
        costs.iter().sum::<f64>() / costs.len() as f64
    };
    GenerationStats {
        generation,
        best_cost,
        mean_cost,
        population_size: costs.len(),
    }
}

// ============================================================================
// Tests
// ============================================================================
