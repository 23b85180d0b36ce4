//! Error type shared by every fallible operation in the crate.

/// Errors raised by the GA engine.
///
/// A "bad" generation is never an error; only malformed input or
/// configuration is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// Fitness values cannot drive proportional selection
    /// (empty, all zero, negative, non-finite, or minimizing).
    #[error("invalid fitness distribution: {0}")]
    InvalidFitnessDistribution(String),

    /// An internal contract was broken by the caller, e.g. a population
    /// and fitness vector of different lengths, or crossover parents that
    /// are not permutations of the same symbol set.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
