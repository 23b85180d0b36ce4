//! Permutation-preserving genetic operators.
//!
//! Crossover and mutation operators for permutation-encoded chromosomes.
//! These operate on `&[usize]` symbol vectors; the symbol set is arbitrary
//! as long as no symbol repeats.
//!
//! # Crossover
//!
//! - [`mapped_crossover`]: two-point crossover that keeps each parent's cut
//!   window in place and repairs the swapped tails through the window's
//!   position mapping (the PMX repair rule of Goldberg & Lingle)
//!
//! # Mutation
//!
//! - [`swap_random_mutation`]: per position, swap with a random position
//! - [`swap_next_mutation`]: per position, swap with the next (cyclic)
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::error::{GaError, Result};
use rand::Rng;
use std::collections::HashMap;

// ============================================================================
// Crossover
// ============================================================================

/// Two-point mapped crossover with random cut points.
///
/// Draws `cut1` uniformly from `0..len` and `cut2` uniformly from
/// `cut1 + 1..=len`, then delegates to [`mapped_crossover_with_cuts`].
///
/// # Errors
/// Same as [`mapped_crossover_with_cuts`].
pub fn mapped_crossover<R: Rng>(
    parent: &[usize],
    mother: &[usize],
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if parent.is_empty() {
        return Err(GaError::InvariantViolation(
            "crossover parents must not be empty".into(),
        ));
    }
    let (cut1, cut2) = random_cuts(parent.len(), rng);
    tracing::trace!(cut1, cut2, "crossover cut window");
    mapped_crossover_with_cuts(parent, mother, cut1, cut2)
}

/// Two-point mapped crossover with fixed cut points.
///
/// Child 1 starts as `parent`, child 2 as `mother`. Every position outside
/// the window `[cut1, cut2)` is exchanged between the children and then
/// repaired: while child 1's new value also occurs in `parent`'s window at
/// position `j`, it is replaced by `mother[j]`; child 2 is repaired the same
/// way against `mother`'s window with `parent` as the donor. The windows are
/// never written, so each repair chain ends after at most `cut2 - cut1`
/// steps and both children remain permutations.
///
/// # Example
///
/// ```
/// use u_permga::ga::operators::mapped_crossover_with_cuts;
///
/// let (c1, c2) = mapped_crossover_with_cuts(&[1, 2, 3, 4], &[4, 3, 2, 1], 1, 3).unwrap();
/// assert_eq!(c1, vec![4, 2, 3, 1]);
/// assert_eq!(c2, vec![1, 3, 2, 4]);
/// ```
///
/// # Errors
/// [`GaError::InvariantViolation`] when the parents differ in length, are
/// empty, are not permutations of one symbol set, or when the cuts do not
/// satisfy `cut1 < cut2 <= len`.
pub fn mapped_crossover_with_cuts(
    parent: &[usize],
    mother: &[usize],
    cut1: usize,
    cut2: usize,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let n = parent.len();
    if n != mother.len() {
        return Err(GaError::InvariantViolation(format!(
            "parents must have equal length ({n} vs {})",
            mother.len()
        )));
    }
    if n == 0 {
        return Err(GaError::InvariantViolation(
            "crossover parents must not be empty".into(),
        ));
    }
    if cut1 >= cut2 || cut2 > n {
        return Err(GaError::InvariantViolation(format!(
            "invalid cut window [{cut1}, {cut2}) for length {n}"
        )));
    }

    let parent_pos = positions(parent)?;
    let mother_pos = positions(mother)?;
    if parent.iter().any(|v| !mother_pos.contains_key(v)) {
        return Err(GaError::InvariantViolation(
            "parents are not permutations of the same symbols".into(),
        ));
    }

    let mut child1 = parent.to_vec();
    let mut child2 = mother.to_vec();
    let window = cut1..cut2;

    for i in (0..n).filter(|i| !window.contains(i)) {
        child1[i] = repair(mother[i], &parent_pos, mother, cut1, cut2)?;
        child2[i] = repair(parent[i], &mother_pos, parent, cut1, cut2)?;
    }

    Ok((child1, child2))
}

/// Chases `value` through `keeper`'s cut window until it falls outside.
///
/// `keeper_pos` maps each symbol to its index in the parent whose window is
/// kept; `donor` supplies the replacement at that index.
fn repair(
    mut value: usize,
    keeper_pos: &HashMap<usize, usize>,
    donor: &[usize],
    cut1: usize,
    cut2: usize,
) -> Result<usize> {
    for _ in 0..=(cut2 - cut1) {
        match keeper_pos.get(&value) {
            Some(&j) if (cut1..cut2).contains(&j) => value = donor[j],
            _ => return Ok(value),
        }
    }
    Err(GaError::InvariantViolation(format!(
        "crossover repair for symbol {value} did not terminate"
    )))
}

/// Maps each symbol to its index, rejecting repeats.
fn positions(genes: &[usize]) -> Result<HashMap<usize, usize>> {
    let mut map = HashMap::with_capacity(genes.len());
    for (i, &g) in genes.iter().enumerate() {
        if map.insert(g, i).is_some() {
            return Err(GaError::InvariantViolation(format!(
                "symbol {g} repeats in crossover parent"
            )));
        }
    }
    Ok(map)
}

/// Picks `cut1` in `0..n` and `cut2` in `cut1 + 1..=n`.
fn random_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let cut1 = rng.random_range(0..n);
    let cut2 = rng.random_range(cut1 + 1..=n);
    (cut1, cut2)
}

// ============================================================================
// Mutation
// ============================================================================

/// Per-position mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// See [`swap_random_mutation`].
    #[default]
    SwapRandom,
    /// See [`swap_next_mutation`].
    SwapNext,
}

impl Mutation {
    /// Mutates `perm` in place with per-position probability `probability`.
    pub fn apply<R: Rng>(&self, perm: &mut [usize], probability: f64, rng: &mut R) {
        match self {
            Mutation::SwapRandom => swap_random_mutation(perm, probability, rng),
            Mutation::SwapNext => swap_next_mutation(perm, probability, rng),
        }
    }
}

/// Swap-with-random mutation.
///
/// Each position `i` is, with probability `probability`, exchanged with a
/// uniformly drawn position `k` (a no-op when `k == i`).
///
/// # Complexity
/// O(n)
pub fn swap_random_mutation<R: Rng>(perm: &mut [usize], probability: f64, rng: &mut R) {
    let n = perm.len();
    for i in 0..n {
        if rng.random::<f64>() < probability {
            let k = rng.random_range(0..n);
            perm.swap(i, k);
        }
    }
}

/// Swap-with-next mutation.
///
/// Each position `i` is, with probability `probability`, exchanged with its
/// successor; the last position wraps around to 0. The swap is anchored at
/// the visited position `i`.
///
/// # Complexity
/// O(n)
pub fn swap_next_mutation<R: Rng>(perm: &mut [usize], probability: f64, rng: &mut R) {
    let n = perm.len();
    for i in 0..n {
        if rng.random::<f64>() < probability {
            perm.swap(i, (i + 1) % n);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Check that `perm` holds exactly the symbols of `reference`.
    fn same_symbols(perm: &[usize], reference: &[usize]) -> bool {
        let set: HashSet<usize> = perm.iter().copied().collect();
        perm.len() == reference.len()
            && set.len() == perm.len()
            && reference.iter().all(|v| set.contains(v))
    }

    // ---- Mapped crossover ----

    #[test]
    fn test_crossover_scenario_fixed_cuts() {
        let parent = [1, 2, 3, 4];
        let mother = [4, 3, 2, 1];
        let (c1, c2) = mapped_crossover_with_cuts(&parent, &mother, 1, 3).unwrap();

        assert!(same_symbols(&c1, &parent));
        assert!(same_symbols(&c2, &parent));
        // the window keeps each child's own donor segment
        assert_eq!(&c1[1..3], &parent[1..3]);
        assert_eq!(&c2[1..3], &mother[1..3]);
        assert_eq!(c1, vec![4, 2, 3, 1]);
        assert_eq!(c2, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_crossover_repair_chain() {
        // mother's tail values collide with parent's window and must be chased
        let parent = [0, 1, 2, 3, 4, 5];
        let mother = [2, 4, 0, 5, 1, 3];
        let (c1, c2) = mapped_crossover_with_cuts(&parent, &mother, 1, 4).unwrap();
        assert_eq!(&c1[1..4], &[1, 2, 3]);
        assert_eq!(&c2[1..4], &[4, 0, 5]);
        // c1[0]: 2 -> mother[2]=0 ; c1[4]: 1 -> mother[1]=4 ; c1[5]: 3 -> mother[3]=5
        assert_eq!(c1, vec![0, 1, 2, 3, 4, 5]);
        // c2[0]: 0 -> parent[2]=2 ; c2[4]: 4 -> parent[1]=1 ; c2[5]: 5 -> parent[3]=3
        assert_eq!(c2, vec![2, 4, 0, 5, 1, 3]);
    }

    #[test]
    fn test_crossover_is_deterministic_for_fixed_cuts() {
        let parent = [3, 7, 5, 1, 6, 0, 2, 4];
        let mother = [0, 1, 2, 3, 4, 5, 6, 7];
        let first = mapped_crossover_with_cuts(&parent, &mother, 2, 6).unwrap();
        for _ in 0..10 {
            assert_eq!(mapped_crossover_with_cuts(&parent, &mother, 2, 6).unwrap(), first);
        }
    }

    #[test]
    fn test_crossover_full_window_copies_parents() {
        let parent = [0, 1, 2, 3];
        let mother = [3, 2, 1, 0];
        let (c1, c2) = mapped_crossover_with_cuts(&parent, &mother, 0, 4).unwrap();
        assert_eq!(c1, parent.to_vec());
        assert_eq!(c2, mother.to_vec());
    }

    #[test]
    fn test_crossover_random_cuts_valid() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..8).collect();
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];
        for _ in 0..100 {
            let (c1, c2) = mapped_crossover(&p1, &p2, &mut rng).unwrap();
            assert!(same_symbols(&c1, &p1), "child1 not valid: {c1:?}");
            assert!(same_symbols(&c2, &p1), "child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_crossover_single_element() {
        let mut rng = create_rng(42);
        let (c1, c2) = mapped_crossover(&[0], &[0], &mut rng).unwrap();
        assert_eq!(c1, vec![0]);
        assert_eq!(c2, vec![0]);
    }

    #[test]
    fn test_crossover_identical_parents() {
        let mut rng = create_rng(42);
        let p = [4, 0, 3, 1, 2];
        for _ in 0..20 {
            let (c1, c2) = mapped_crossover(&p, &p, &mut rng).unwrap();
            assert_eq!(c1, p.to_vec());
            assert_eq!(c2, p.to_vec());
        }
    }

    #[test]
    fn test_crossover_rejects_malformed_input() {
        let cases: [(&[usize], &[usize], usize, usize); 6] = [
            (&[0, 1, 2], &[0, 1], 0, 1),
            (&[], &[], 0, 1),
            (&[0, 1, 2], &[2, 1, 0], 2, 2),
            (&[0, 1, 2], &[2, 1, 0], 1, 4),
            (&[0, 0, 2], &[2, 1, 0], 0, 1),
            (&[0, 1, 2], &[2, 1, 9], 0, 1),
        ];
        for (p, m, c1, c2) in cases {
            let err = mapped_crossover_with_cuts(p, m, c1, c2).unwrap_err();
            assert!(matches!(err, GaError::InvariantViolation(_)), "{p:?} {m:?}");
        }
    }

    #[test]
    fn test_random_cuts_bounds() {
        let mut rng = create_rng(42);
        for n in 1..12 {
            for _ in 0..200 {
                let (c1, c2) = random_cuts(n, &mut rng);
                assert!(c1 < c2 && c2 <= n, "bad cuts ({c1}, {c2}) for {n}");
            }
        }
    }

    // ---- Mutation ----

    #[test]
    fn test_swap_random_preserves_permutation() {
        let mut rng = create_rng(42);
        let reference: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            let mut perm = reference.clone();
            swap_random_mutation(&mut perm, 0.3, &mut rng);
            assert!(same_symbols(&perm, &reference));
        }
    }

    #[test]
    fn test_swap_next_preserves_permutation() {
        let mut rng = create_rng(42);
        let reference: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            let mut perm = reference.clone();
            swap_next_mutation(&mut perm, 0.3, &mut rng);
            assert!(same_symbols(&perm, &reference));
        }
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = create_rng(42);
        let reference: Vec<usize> = (0..10).collect();
        for m in [Mutation::SwapRandom, Mutation::SwapNext] {
            let mut perm = reference.clone();
            m.apply(&mut perm, 0.0, &mut rng);
            assert_eq!(perm, reference);
        }
    }

    #[test]
    fn test_swap_next_certain_rotates() {
        // with p = 1 each position swaps with its successor in turn, which
        // carries the first symbol to the end, then the wrap swap brings the
        // last symbol back to the front
        let mut rng = create_rng(42);
        let mut perm = vec![0, 1, 2, 3];
        swap_next_mutation(&mut perm, 1.0, &mut rng);
        assert_eq!(perm, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_swap_next_wraps_last_position() {
        let mut rng = create_rng(42);
        let mut perm = vec![0, 1];
        // i=0 swaps (0,1) -> [1,0]; i=1 swaps (1,0) -> [0,1]
        swap_next_mutation(&mut perm, 1.0, &mut rng);
        assert_eq!(perm, vec![0, 1]);
    }

    #[test]
    fn test_mutation_single_element() {
        let mut rng = create_rng(42);
        for m in [Mutation::SwapRandom, Mutation::SwapNext] {
            let mut perm = vec![5];
            m.apply(&mut perm, 1.0, &mut rng);
            assert_eq!(perm, vec![5]);
        }
    }

    #[test]
    fn test_mutation_changes_something_eventually() {
        let mut rng = create_rng(42);
        let reference: Vec<usize> = (0..8).collect();
        let mut perm = reference.clone();
        for _ in 0..50 {
            swap_random_mutation(&mut perm, 0.2, &mut rng);
        }
        assert_ne!(perm, reference);
    }

    // ---- Properties ----

    fn permutation_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
        (1usize..24).prop_flat_map(|n| {
            let base: Vec<usize> = (0..n).collect();
            (
                Just(base.clone()).prop_shuffle(),
                Just(base).prop_shuffle(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_crossover_children_are_permutations(
            (parent, mother) in permutation_pair(),
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let (c1, c2) = mapped_crossover(&parent, &mother, &mut rng).unwrap();
            prop_assert!(same_symbols(&c1, &parent));
            prop_assert!(same_symbols(&c2, &parent));
        }

        #[test]
        fn prop_crossover_keeps_windows(
            (parent, mother) in permutation_pair(),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let n = parent.len();
            let cut1 = a.index(n);
            let cut2 = cut1 + 1 + b.index(n - cut1);
            let (c1, c2) = mapped_crossover_with_cuts(&parent, &mother, cut1, cut2).unwrap();
            prop_assert_eq!(&c1[cut1..cut2], &parent[cut1..cut2]);
            prop_assert_eq!(&c2[cut1..cut2], &mother[cut1..cut2]);
        }

        #[test]
        fn prop_mutation_preserves_symbols(
            (perm, _) in permutation_pair(),
            p in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            for m in [Mutation::SwapRandom, Mutation::SwapNext] {
                let mut mutated = perm.clone();
                m.apply(&mut mutated, p, &mut rng);
                prop_assert!(same_symbols(&mutated, &perm));
            }
        }
    }
}
