//! Repeated, timed runs.
//!
//! [`run_trials`] runs one strategy many times on one problem with
//! consecutive seeds and aggregates the outcomes: mean cost, mean wall time,
//! success rate, and the best individual seen across all trials.

use crate::error::{GaError, Result};
use crate::ga::{GaConfig, GaRunner, GeneticStrategy, Permutation, PermutationProblem};
use crate::random::create_rng;
use std::time::{Duration, Instant};

/// Outcome of one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// Zero-based trial number.
    pub trial: usize,
    /// Seed the trial ran with.
    pub seed: u64,
    /// Best individual found.
    pub best: Permutation,
    /// Cost of `best`.
    pub cost: f64,
    /// Wall time of the run.
    pub elapsed: Duration,
}

/// Aggregate over all trials.
#[derive(Debug, Clone)]
pub struct TrialSummary {
    /// Name of the strategy that was run.
    pub strategy: String,
    /// Every trial, in order.
    pub outcomes: Vec<TrialOutcome>,
    /// Mean best cost.
    pub mean_cost: f64,
    /// Mean wall time.
    pub mean_elapsed: Duration,
    /// Fraction of trials that reached cost 0.
    pub success_rate: f64,
    /// Index into `outcomes` of the lowest-cost trial (first on ties).
    pub best_trial: usize,
}

impl TrialSummary {
    /// The lowest-cost trial.
    pub fn best(&self) -> &TrialOutcome {
        &self.outcomes[self.best_trial]
    }
}

/// Runs `trials` independent searches.
///
/// Trial `i` is seeded with `config.seed + i` (wrapping); a config without a
/// seed draws a random base seed.
///
/// # Errors
/// [`GaError::InvalidConfig`] if `trials` is 0, plus any error from
/// [`GaRunner::run_with_rng`].
pub fn run_trials<P, S>(
    problem: &P,
    strategy: &S,
    config: &GaConfig,
    trials: usize,
) -> Result<TrialSummary>
where
    P: PermutationProblem,
    S: GeneticStrategy,
{
    if trials == 0 {
        return Err(GaError::InvalidConfig("trials must be at least 1".into()));
    }

    let base_seed = config.seed.unwrap_or_else(rand::random::<u64>);
    let mut outcomes = Vec::with_capacity(trials);

    for trial in 0..trials {
        let seed = base_seed.wrapping_add(trial as u64);
        let mut rng = create_rng(seed);

        let started = Instant::now();
        let result = GaRunner::run_with_rng(problem, strategy, config, &mut rng)?;
        let elapsed = started.elapsed();

        tracing::debug!(trial, seed, cost = result.best_cost, ?elapsed, "trial finished");
        outcomes.push(TrialOutcome {
            trial,
            seed,
            best: result.best,
            cost: result.best_cost,
            elapsed,
        });
    }

    let n = outcomes.len() as f64;
    let mean_cost = outcomes.iter().map(|o| o.cost).sum::<f64>() / n;
    let mean_elapsed = mean_duration(outcomes.iter().map(|o| o.elapsed).sum(), outcomes.len());
    let success_rate = outcomes.iter().filter(|o| o.cost == 0.0).count() as f64 / n;

    let mut best_trial = 0;
    for (i, o) in outcomes.iter().enumerate() {
        if o.cost < outcomes[best_trial].cost {
            best_trial = i;
        }
    }

    let summary = TrialSummary {
        strategy: strategy.name(),
        outcomes,
        mean_cost,
        mean_elapsed,
        success_rate,
        best_trial,
    };
    tracing::info!(
        strategy = %summary.strategy,
        trials,
        mean_cost = summary.mean_cost,
        success_rate = summary.success_rate,
        "trials finished"
    );
    Ok(summary)
}

/// `total / count`, without narrowing `count` to `u32`.
fn mean_duration(total: Duration, count: usize) -> Duration {
    total.div_f64(count as f64)
}
