//! The N-queens placement problem.
//!
//! A state is a permutation where `genes[col]` is the row of the queen in
//! column `col`. The permutation encoding rules out row and column clashes,
//! so the cost counts only diagonal attacks.

use crate::ga::{Permutation, PermutationProblem};
use rand::Rng;

/// N queens on an `n × n` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NQueens {
    n: usize,
}

impl NQueens {
    /// Creates the problem for an `n × n` board.
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Board size.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Whether no two queens attack each other.
    pub fn is_solution(&self, state: &Permutation) -> bool {
        state.len() == self.n && attacking_pairs(state.genes()) == 0
    }
}

impl PermutationProblem for NQueens {
    fn random_state<R: Rng>(&self, rng: &mut R) -> Permutation {
        Permutation::random(self.n, rng)
    }

    fn cost(&self, state: &Permutation) -> f64 {
        attacking_pairs(state.genes()) as f64
    }
}

/// Number of queen pairs sharing a diagonal.
///
/// # Complexity
/// O(n²)
pub fn attacking_pairs(rows: &[usize]) -> usize {
    let mut count = 0;
    for i in 0..rows.len() {
        for j in i + 1..rows.len() {
            if rows[i].abs_diff(rows[j]) == j - i {
                count += 1;
            }
        }
    }
    count
}
