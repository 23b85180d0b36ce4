//! Genetic Algorithm framework for permutation-encoded problems.
//!
//! Users define their problem by implementing [`PermutationProblem`]
//! (a random state and a non-negative cost) and pick or implement a
//! [`GeneticStrategy`] that binds fitness, selection, crossover, and
//! mutation.
//!
//! # Core Traits
//!
//! - [`PermutationProblem`]: Problem definition (random state and cost)
//! - [`GeneticStrategy`]: Algorithm variant (fitness, selection, operators)
//!
//! # Key Types
//!
//! - [`Permutation`]: An individual
//! - [`PermutationGa`]: Stock strategy with tournament and roulette presets
//! - [`GaConfig`]: Loop parameters (population size, generations, elitism)
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Final result with per-generation statistics
//!
//! # Submodules
//!
//! - [`operators`]: Mapped two-point crossover and swap mutations
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod fitness;
pub mod operators;
mod runner;
mod selection;
mod strategy;
mod types;

pub use config::{ElitismSizing, GaConfig};
pub use fitness::{FitnessPolicy, Orientation};
pub use operators::Mutation;
pub use runner::{search, GaResult, GaRunner, GenerationStats};
pub use selection::{Pairing, Selection};
pub use strategy::{GeneticStrategy, PermutationGa};
pub use types::{Permutation, PermutationProblem};
