//! Selection strategies for the GA.
//!
//! Selection splits the population into two mating pools, "parents" and
//! "mothers", each of `floor(n / 2)` individuals. Pools are returned as
//! indices into the population; pairing them by position gives the
//! crossover couples.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::fitness::Orientation;
use crate::error::{GaError, Result};
use crate::random::shuffle;
use rand::Rng;

/// The two mating pools chosen for one generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pairing {
    /// Indices of the first member of each couple.
    pub parents: Vec<usize>,
    /// Indices of the second member of each couple.
    pub mothers: Vec<usize>,
}

impl Pairing {
    /// Number of couples.
    pub fn len(&self) -> usize {
        self.parents.len().min(self.mothers.len())
    }

    /// Whether there are no couples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(parent, mother)` index pairs.
    pub fn couples(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.parents.iter().copied().zip(self.mothers.iter().copied())
    }
}

/// Selection strategy for building the mating pools.
///
/// # Examples
///
/// ```
/// use u_permga::ga::{Orientation, Selection};
/// use u_permga::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let fitness = [0.2, 0.5, 1.0, 0.25];
/// let pools = Selection::Tournament
///     .select(&fitness, Orientation::Maximize, &mut rng)
///     .unwrap();
/// assert_eq!(pools.parents.len(), 2);
/// assert_eq!(pools.mothers.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Binary tournament over a shuffled bracket.
    ///
    /// Indices are shuffled and split into disjoint consecutive pairs; the
    /// first of a pair wins only when strictly better, otherwise the second
    /// wins. An odd trailing index sits the pass out. Two independent
    /// passes fill the two pools.
    ///
    /// # Complexity
    /// O(n) per generation
    #[default]
    Tournament,

    /// Fitness-proportionate (roulette wheel) selection, with replacement.
    ///
    /// Each individual gets an expected-value weight `f_i / mean(f)`; a draw
    /// samples `r` in `[0, W)` and walks the cumulative weights. Requires
    /// maximized, non-negative fitness with a positive sum.
    ///
    /// # Complexity
    /// O(n) per draw
    Roulette,
}

impl Selection {
    /// Chooses the parent and mother pools.
    ///
    /// # Errors
    /// [`GaError::InvalidFitnessDistribution`] when roulette receives a
    /// fitness vector it cannot turn into a wheel.
    pub fn select<R: Rng>(
        &self,
        fitness: &[f64],
        orientation: Orientation,
        rng: &mut R,
    ) -> Result<Pairing> {
        match self {
            Selection::Tournament => Ok(tournament(fitness, orientation, rng)),
            Selection::Roulette => roulette(fitness, orientation, rng),
        }
    }

    /// Whether this strategy can work with the given orientation.
    pub fn supports(&self, orientation: Orientation) -> bool {
        match self {
            Selection::Tournament => true,
            Selection::Roulette => orientation == Orientation::Maximize,
        }
    }
}

fn tournament<R: Rng>(fitness: &[f64], orientation: Orientation, rng: &mut R) -> Pairing {
    let mut bracket: Vec<usize> = (0..fitness.len()).collect();
    let parents = tournament_pass(&mut bracket, fitness, orientation, rng);
    let mothers = tournament_pass(&mut bracket, fitness, orientation, rng);
    Pairing { parents, mothers }
}

/// One shuffle-and-bracket pass, yielding `floor(n / 2)` winners.
fn tournament_pass<R: Rng>(
    bracket: &mut [usize],
    fitness: &[f64],
    orientation: Orientation,
    rng: &mut R,
) -> Vec<usize> {
    shuffle(bracket, rng);
    bracket
        .chunks_exact(2)
        .map(|pair| bracket_winner(pair[0], pair[1], fitness, orientation))
        .collect()
}

/// The first contender must be strictly better to win; ties go to the second.
fn bracket_winner(a: usize, b: usize, fitness: &[f64], orientation: Orientation) -> usize {
    if orientation.is_better(fitness[a], fitness[b]) {
        a
    } else {
        b
    }
}

fn roulette<R: Rng>(fitness: &[f64], orientation: Orientation, rng: &mut R) -> Result<Pairing> {
    let weights = expected_values(fitness, orientation)?;
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(GaError::InvalidFitnessDistribution(format!(
            "expected-value weights sum to {total}"
        )));
    }

    let pool = fitness.len() / 2;
    let parents = (0..pool).map(|_| spin(&weights, total, rng)).collect();
    let mothers = (0..pool).map(|_| spin(&weights, total, rng)).collect();
    Ok(Pairing { parents, mothers })
}

/// Expected-value weights `f_i / mean(f)`.
fn expected_values(fitness: &[f64], orientation: Orientation) -> Result<Vec<f64>> {
    if orientation != Orientation::Maximize {
        return Err(GaError::InvalidFitnessDistribution(
            "roulette selection needs maximized fitness".into(),
        ));
    }
    if fitness.is_empty() {
        return Err(GaError::InvalidFitnessDistribution(
            "empty population".into(),
        ));
    }
    if let Some(bad) = fitness.iter().find(|f| !f.is_finite() || **f < 0.0) {
        tracing::warn!(fitness = *bad, "roulette rejected fitness value");
        return Err(GaError::InvalidFitnessDistribution(format!(
            "fitness {bad} is negative or not finite"
        )));
    }

    let sum: f64 = fitness.iter().sum();
    if sum <= 0.0 {
        tracing::warn!(n = fitness.len(), "roulette rejected all-zero fitness");
        return Err(GaError::InvalidFitnessDistribution(
            "fitness values sum to zero".into(),
        ));
    }
    let mean = sum / fitness.len() as f64;
    Ok(fitness.iter().map(|f| f / mean).collect())
}

/// One spin of the wheel.
fn spin<R: Rng>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    // floating-point fallback: last individual with non-zero weight
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(weights.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_tournament_pool_sizes() {
        let mut rng = create_rng(42);
        for n in [2usize, 3, 4, 7, 10, 51] {
            let fitness: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let pools = Selection::Tournament
                .select(&fitness, Orientation::Maximize, &mut rng)
                .unwrap();
            assert_eq!(pools.parents.len(), n / 2);
            assert_eq!(pools.mothers.len(), n / 2);
            assert!(pools.couples().all(|(p, m)| p < n && m < n));
        }
    }

    #[test]
    fn test_tournament_winners_are_distinct_within_a_pass() {
        let mut rng = create_rng(3);
        let fitness: Vec<f64> = (0..20).map(|i| (i % 5) as f64).collect();
        let pools = Selection::Tournament
            .select(&fitness, Orientation::Maximize, &mut rng)
            .unwrap();
        let mut parents = pools.parents.clone();
        parents.sort_unstable();
        parents.dedup();
        assert_eq!(parents.len(), 10, "disjoint brackets cannot repeat a winner");
    }

    #[test]
    fn test_bracket_never_picks_strictly_worse() {
        let fitness = [0.1, 0.9, 0.5, 0.5];
        for orientation in [Orientation::Maximize, Orientation::Minimize] {
            for a in 0..4 {
                for b in 0..4 {
                    let w = bracket_winner(a, b, &fitness, orientation);
                    let l = if w == a { b } else { a };
                    assert!(
                        !orientation.is_better(fitness[l], fitness[w]),
                        "loser {l} beats winner {w} under {orientation:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_bracket_tie_goes_to_second() {
        let fitness = [0.5, 0.5];
        assert_eq!(bracket_winner(0, 1, &fitness, Orientation::Maximize), 1);
        assert_eq!(bracket_winner(1, 0, &fitness, Orientation::Minimize), 0);
    }

    #[test]
    fn test_tournament_minimize_excludes_worst() {
        // The single worst individual can only win a bracket against an equal,
        // and there is none.
        let fitness = [1.0, 2.0, 3.0, 100.0];
        let mut rng = create_rng(11);
        for _ in 0..200 {
            let pools = Selection::Tournament
                .select(&fitness, Orientation::Minimize, &mut rng)
                .unwrap();
            assert!(!pools.parents.contains(&3));
            assert!(!pools.mothers.contains(&3));
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let fitness = [0.01, 0.02, 1.0, 0.05];
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..2000 {
            let pools = Selection::Roulette
                .select(&fitness, Orientation::Maximize, &mut rng)
                .unwrap();
            for i in pools.parents.iter().chain(pools.mothers.iter()) {
                counts[*i] += 1;
            }
        }
        assert!(
            counts[2] > counts[0] + counts[1] + counts[3],
            "dominant fitness should dominate draws: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_equal_fitness_is_uniform() {
        let fitness = [0.5; 4];
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        let rounds = 5000;
        for _ in 0..rounds {
            let pools = Selection::Roulette
                .select(&fitness, Orientation::Maximize, &mut rng)
                .unwrap();
            for i in pools.parents.iter().chain(pools.mothers.iter()) {
                counts[*i] += 1;
            }
        }
        // 4 draws per round, expected 5000 per index
        for &c in &counts {
            assert!(
                (4500..5500).contains(&c),
                "expected roughly uniform, got counts: {counts:?}"
            );
        }
    }

    #[test]
    fn test_roulette_draws_ignore_previous_winner() {
        // Index 0 holds half the wheel; each spin restarts at index 0, so a
        // repeat of the previous winner keeps probability 1/2.
        let fitness = [3.0, 1.0, 1.0, 1.0];
        let mut rng = create_rng(17);
        let (mut after_zero, mut repeats) = (0u32, 0u32);
        for _ in 0..4000 {
            let pools = Selection::Roulette
                .select(&fitness, Orientation::Maximize, &mut rng)
                .unwrap();
            if pools.parents[0] == 0 {
                after_zero += 1;
                if pools.parents[1] == 0 {
                    repeats += 1;
                }
            }
        }
        let rate = f64::from(repeats) / f64::from(after_zero);
        assert!((0.45..0.55).contains(&rate), "repeat rate {rate}");
    }

    #[test]
    fn test_roulette_zero_weight_never_drawn() {
        let fitness = [0.0, 1.0, 0.0, 1.0];
        let mut rng = create_rng(5);
        for _ in 0..500 {
            let pools = Selection::Roulette
                .select(&fitness, Orientation::Maximize, &mut rng)
                .unwrap();
            assert!(pools.couples().all(|(p, m)| p % 2 == 1 && m % 2 == 1));
        }
    }

    #[test]
    fn test_roulette_rejects_degenerate_distributions() {
        let mut rng = create_rng(42);
        let cases: [(&[f64], Orientation); 5] = [
            (&[0.0, 0.0, 0.0], Orientation::Maximize),
            (&[], Orientation::Maximize),
            (&[1.0, -1.0], Orientation::Maximize),
            (&[1.0, f64::NAN], Orientation::Maximize),
            (&[1.0, 2.0], Orientation::Minimize),
        ];
        for (fitness, orientation) in cases {
            let err = Selection::Roulette
                .select(fitness, orientation, &mut rng)
                .unwrap_err();
            assert!(
                matches!(err, GaError::InvalidFitnessDistribution(_)),
                "{fitness:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_supports() {
        assert!(Selection::Tournament.supports(Orientation::Minimize));
        assert!(Selection::Roulette.supports(Orientation::Maximize));
        assert!(!Selection::Roulette.supports(Orientation::Minimize));
    }

    #[test]
    fn test_single_individual_yields_empty_pools() {
        let mut rng = create_rng(42);
        for sel in [Selection::Tournament, Selection::Roulette] {
            let pools = sel.select(&[0.5], Orientation::Maximize, &mut rng).unwrap();
            assert!(pools.is_empty());
        }
    }
}
