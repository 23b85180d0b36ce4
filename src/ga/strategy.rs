//! Algorithm variants.
//!
//! [`GeneticStrategy`] is the capability set the generational loop drives:
//! fitness evaluation, selection, crossover, and mutation. Every required
//! method must be bound by the implementor, so an incomplete variant fails
//! to compile rather than at call time.

use super::fitness::{FitnessPolicy, Orientation};
use super::operators::{mapped_crossover, Mutation};
use super::selection::{Pairing, Selection};
use super::types::Permutation;
use crate::error::{GaError, Result};
use rand::Rng;

/// The pluggable parts of a generational GA over permutations.
pub trait GeneticStrategy {
    /// Human-readable variant name, used in logs and trial reports.
    fn name(&self) -> String;

    /// Orientation of the values returned by
    /// [`evaluate_fitness`](GeneticStrategy::evaluate_fitness).
    fn orientation(&self) -> Orientation;

    /// Fitness of one individual given its cost.
    fn evaluate_fitness(&self, cost: f64) -> f64;

    /// Chooses the parent and mother pools.
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> Result<Pairing>;

    /// Combines one parent and one mother into exactly two children.
    fn crossover<R: Rng>(
        &self,
        parent: &Permutation,
        mother: &Permutation,
        rng: &mut R,
    ) -> Result<(Permutation, Permutation)>;

    /// Returns a probabilistically perturbed copy of `individual`.
    fn mutate<R: Rng>(&self, individual: &Permutation, rng: &mut R) -> Permutation;

    /// Checks that the bound operators can work together.
    ///
    /// The default accepts every configuration.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Fitness for a whole population, aligned with `costs`.
    fn fitness_all(&self, costs: &[f64]) -> Vec<f64> {
        costs.iter().map(|&c| self.evaluate_fitness(c)).collect()
    }

    /// Crosses the selected couples in order, concatenating their children.
    ///
    /// # Errors
    /// [`GaError::InvariantViolation`] if the pools reference individuals
    /// outside `population`, or if crossover fails.
    fn crossover_all<R: Rng>(
        &self,
        population: &[Permutation],
        pairing: &Pairing,
        rng: &mut R,
    ) -> Result<Vec<Permutation>> {
        let mut offspring = Vec::with_capacity(pairing.len() * 2);
        for (p, m) in pairing.couples() {
            let (parent, mother) = match (population.get(p), population.get(m)) {
                (Some(parent), Some(mother)) => (parent, mother),
                _ => {
                    return Err(GaError::InvariantViolation(format!(
                        "selected couple ({p}, {m}) outside population of {}",
                        population.len()
                    )))
                }
            };
            let (c1, c2) = self.crossover(parent, mother, rng)?;
            offspring.push(c1);
            offspring.push(c2);
        }
        Ok(offspring)
    }

    /// Mutates every individual of `population`.
    fn mutate_all<R: Rng>(&self, population: &[Permutation], rng: &mut R) -> Vec<Permutation> {
        population.iter().map(|ind| self.mutate(ind, rng)).collect()
    }
}

/// Stock permutation GA: mapped two-point crossover plus a configurable
/// fitness policy, selector, and mutation.
///
/// # Examples
///
/// ```
/// use u_permga::ga::{GeneticStrategy, Mutation, PermutationGa, Selection};
///
/// let ga = PermutationGa::tournament(0.01);
/// assert_eq!(ga.selection, Selection::Tournament);
///
/// let ga = PermutationGa::roulette(0.05);
/// assert_eq!(ga.mutation, Mutation::SwapNext);
/// assert!(ga.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermutationGa {
    /// How cost becomes fitness.
    pub fitness: FitnessPolicy,

    /// Mating pool selection.
    pub selection: Selection,

    /// Per-position mutation.
    pub mutation: Mutation,

    /// Per-position mutation probability (0.0–1.0).
    ///
    /// Typical range: 0.001–0.05.
    pub mutation_probability: f64,
}

impl Default for PermutationGa {
    fn default() -> Self {
        Self::tournament(0.01)
    }
}

impl PermutationGa {
    /// Tournament selection with swap-with-random mutation.
    pub fn tournament(mutation_probability: f64) -> Self {
        Self {
            fitness: FitnessPolicy::InverseCost,
            selection: Selection::Tournament,
            mutation: Mutation::SwapRandom,
            mutation_probability,
        }
    }

    /// Roulette selection with swap-with-next mutation.
    pub fn roulette(mutation_probability: f64) -> Self {
        Self {
            fitness: FitnessPolicy::InverseCost,
            selection: Selection::Roulette,
            mutation: Mutation::SwapNext,
            mutation_probability,
        }
    }

    /// Sets the fitness policy.
    pub fn with_fitness(mut self, fitness: FitnessPolicy) -> Self {
        self.fitness = fitness;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the per-position mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }
}

impl GeneticStrategy for PermutationGa {
    fn name(&self) -> String {
        format!(
            "{:?}/{:?}/{:?} p={}",
            self.selection, self.fitness, self.mutation, self.mutation_probability
        )
    }

    fn orientation(&self) -> Orientation {
        self.fitness.orientation()
    }

    /// Validates the variant.
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] if the probability is outside `[0, 1]` or
    /// the selector cannot honor the fitness orientation.
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(GaError::InvalidConfig(format!(
                "mutation_probability must be in [0, 1], got {}",
                self.mutation_probability
            )));
        }
        let orientation = self.fitness.orientation();
        if !self.selection.supports(orientation) {
            return Err(GaError::InvalidConfig(format!(
                "{:?} selection cannot use {:?} fitness ({orientation:?})",
                self.selection, self.fitness
            )));
        }
        Ok(())
    }

    fn evaluate_fitness(&self, cost: f64) -> f64 {
        self.fitness.fitness(cost)
    }

    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> Result<Pairing> {
        self.selection.select(fitness, self.orientation(), rng)
    }

    fn crossover<R: Rng>(
        &self,
        parent: &Permutation,
        mother: &Permutation,
        rng: &mut R,
    ) -> Result<(Permutation, Permutation)> {
        let (c1, c2) = mapped_crossover(parent.genes(), mother.genes(), rng)?;
        Ok((Permutation::from_valid(c1), Permutation::from_valid(c2)))
    }

    fn mutate<R: Rng>(&self, individual: &Permutation, rng: &mut R) -> Permutation {
        let mut genes = individual.genes().to_vec();
        self.mutation.apply(&mut genes, self.mutation_probability, rng);
        Permutation::from_valid(genes)
    }
}
