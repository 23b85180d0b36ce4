//! Fitness evaluation policies.
//!
//! A policy maps a non-negative cost to a scalar fitness and declares the
//! orientation selection must honor.

/// Whether higher or lower fitness is preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Lower fitness wins.
    Minimize,
    /// Higher fitness wins.
    Maximize,
}

impl Orientation {
    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Orientation::Minimize => a < b,
            Orientation::Maximize => a > b,
        }
    }
}

/// How cost becomes fitness.
///
/// # Examples
///
/// ```
/// use u_permga::ga::{FitnessPolicy, Orientation};
///
/// assert_eq!(FitnessPolicy::CostProxy.fitness(3.0), 3.0);
/// assert_eq!(FitnessPolicy::InverseCost.fitness(0.0), 1.0);
/// assert_eq!(FitnessPolicy::InverseCost.orientation(), Orientation::Maximize);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessPolicy {
    /// Fitness equals raw cost. Minimized.
    CostProxy,

    /// Fitness is `1 / (1 + cost)`, in `(0, 1]` for non-negative cost.
    /// Maximized. Defined at cost 0 and suitable for roulette selection.
    #[default]
    InverseCost,
}

impl FitnessPolicy {
    /// Converts one cost to fitness.
    pub fn fitness(self, cost: f64) -> f64 {
        match self {
            FitnessPolicy::CostProxy => cost,
            FitnessPolicy::InverseCost => 1.0 / (1.0 + cost),
        }
    }

    /// The orientation paired selectors must use.
    pub fn orientation(self) -> Orientation {
        match self {
            FitnessPolicy::CostProxy => Orientation::Minimize,
            FitnessPolicy::InverseCost => Orientation::Maximize,
        }
    }
}
