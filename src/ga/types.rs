//! Core type definitions for the GA framework.
//!
//! [`Permutation`] is the individual representation and
//! [`PermutationProblem`] is the contract between the generic GA engine and
//! a domain-specific problem.

use crate::error::{GaError, Result};
use crate::random::shuffle;
use rand::Rng;
use std::collections::HashSet;

/// A candidate solution: an ordered sequence of distinct symbols.
///
/// Immutable once constructed; the engine produces new permutations from
/// crossover and mutation instead of editing existing ones. Equality and
/// hashing are by sequence content.
///
/// The symbol set is arbitrary (`{0..n}` is the common case but `{1..=4}`
/// is just as valid); the only requirement is that no symbol repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation {
    genes: Vec<usize>,
}

impl Permutation {
    /// Creates a permutation, rejecting sequences with repeated symbols.
    ///
    /// # Errors
    /// [`GaError::InvariantViolation`] if `genes` contains a duplicate.
    pub fn new(genes: Vec<usize>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(genes.len());
        if let Some(dup) = genes.iter().find(|&&g| !seen.insert(g)) {
            return Err(GaError::InvariantViolation(format!(
                "symbol {dup} appears more than once in {genes:?}"
            )));
        }
        Ok(Self { genes })
    }

    /// The identity permutation `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            genes: (0..n).collect(),
        }
    }

    /// A uniformly random permutation of `0..n`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut genes: Vec<usize> = (0..n).collect();
        shuffle(&mut genes, rng);
        Self { genes }
    }

    /// Wraps genes already known to be distinct.
    pub(crate) fn from_valid(genes: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&genes), "not a permutation: {genes:?}");
        Self { genes }
    }

    /// The symbols in order.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the permutation has no symbols.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Consumes the permutation and returns its symbols.
    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    /// Whether `other` contains exactly the same symbols (in any order).
    pub fn same_symbols(&self, other: &Permutation) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mine: HashSet<usize> = self.genes.iter().copied().collect();
        other.genes.iter().all(|g| mine.contains(g))
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.genes
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = GaError;

    fn try_from(genes: Vec<usize>) -> Result<Self> {
        Self::new(genes)
    }
}

/// Returns `true` when `genes` has no repeated symbol.
pub(crate) fn is_permutation(genes: &[usize]) -> bool {
    let mut seen = HashSet::with_capacity(genes.len());
    genes.iter().all(|&g| seen.insert(g))
}

/// Defines a permutation-encoded optimization problem.
///
/// The GA engine treats implementations as pure function providers: neither
/// method is expected to mutate state during a run.
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use u_permga::ga::{Permutation, PermutationProblem};
///
/// /// Cost = number of positions not holding their own index.
/// struct Sort(usize);
///
/// impl PermutationProblem for Sort {
///     fn random_state<R: Rng>(&self, rng: &mut R) -> Permutation {
///         Permutation::random(self.0, rng)
///     }
///
///     fn cost(&self, state: &Permutation) -> f64 {
///         state.genes().iter().enumerate().filter(|(i, &g)| *i != g).count() as f64
///     }
/// }
/// ```
pub trait PermutationProblem {
    /// Creates a random valid state.
    ///
    /// Called `population_size` times to seed the initial population.
    fn random_state<R: Rng>(&self, rng: &mut R) -> Permutation;

    /// Non-negative penalty of `state`; 0 denotes an optimal solution.
    fn cost(&self, state: &Permutation) -> f64;
}
