//! Genetic algorithm engine for permutation-encoded problems.
//!
//! Provides a generational GA specialized for individuals that are
//! permutations of a fixed symbol set:
//!
//! - **Fitness policies**: cost-as-fitness (minimize) and inverse-cost
//!   (maximize), with the orientation carried alongside the values.
//! - **Selection**: binary tournament brackets and roulette-wheel
//!   (fitness-proportionate) sampling, each yielding "parents" and "mothers".
//! - **Crossover**: two-point mapped crossover that repairs conflicts through
//!   the donor segment, so children stay valid permutations.
//! - **Mutation**: per-position swap-with-random and swap-with-next.
//! - **Elitism**: the best individual of each generation survives verbatim.
//!
//! # Architecture
//!
//! Problems plug in through [`ga::PermutationProblem`] (a random state and a
//! non-negative cost, 0 = optimal). Algorithm variants implement
//! [`ga::GeneticStrategy`]; [`ga::PermutationGa`] is the stock
//! implementation. [`nqueens`] supplies the classic N-queens adapter and
//! [`trials`] repeats seeded runs to gather statistics.

pub mod error;
pub mod ga;
pub mod nqueens;
pub mod random;
pub mod trials;

pub use error::{GaError, Result};
