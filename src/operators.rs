//! Reference genetic operators for positionally structured candidates.
//!
//! The engine treats candidates as opaque; structural knowledge is
//! permitted only to operators, through the [`Genome`] trait. The two
//! operators here reproduce the classic pairing of recombination and
//! point mutation:
//!
//! - [`UniformCrossover`]: per-position fair coin flip between two
//!   roulette-selected parents — Syswerda (1989)
//! - [`PointMutation`]: clone one parent, redraw a single position from
//!   the initialization domain
//!
//! Candidates without a positional structure can skip this module
//! entirely and implement [`Operator`](crate::Operator) directly.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

use crate::types::{Elite, Operator};
use rand::{Rng, RngCore};

/// Positional access to a candidate's genes.
///
/// Gives operators just enough structure to recombine and perturb:
/// a gene count, per-position get/set, and a fresh draw from the same
/// domain the environment used to initialize the position.
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use u_evolve::operators::Genome;
///
/// #[derive(Clone)]
/// struct Weights(Vec<f64>);
///
/// impl Genome for Weights {
///     type Gene = f64;
///     fn len(&self) -> usize { self.0.len() }
///     fn gene(&self, index: usize) -> f64 { self.0[index] }
///     fn set_gene(&mut self, index: usize, gene: f64) { self.0[index] = gene; }
///     fn random_gene<R: Rng + ?Sized>(&self, _index: usize, rng: &mut R) -> f64 {
///         rng.random_range(-1.0..1.0)
///     }
/// }
/// ```
pub trait Genome {
    /// The per-position value type.
    type Gene;

    /// Number of gene positions.
    fn len(&self) -> usize;

    /// Whether the genome has no positions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the gene at `index`.
    fn gene(&self, index: usize) -> Self::Gene;

    /// Writes the gene at `index`.
    fn set_gene(&mut self, index: usize, gene: Self::Gene);

    /// Draws a fresh gene for `index` from the initialization domain.
    ///
    /// The draw may legitimately equal the current value.
    fn random_gene<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Self::Gene;
}

/// Remaps a duplicated parent pair to a distinct mate, deterministically:
/// `0 -> 1`, `len - 1 -> len - 2`, interior `k -> k + 1`.
fn remap_duplicate(index: usize, len: usize) -> usize {
    if index == 0 {
        1
    } else if index == len - 1 {
        len - 2
    } else {
        index + 1
    }
}

/// Uniform crossover over two roulette-selected elite parents.
///
/// Draws two parent indices independently; if both draws coincide the
/// mate is remapped deterministically rather than redrawn. The offspring
/// starts as a clone of the first parent and takes the mate's gene at
/// each position on a fair coin flip.
///
/// With fewer than two elites the offspring degenerates to a plain clone.
#[derive(Debug, Clone)]
pub struct UniformCrossover {
    weight: f64,
}

impl UniformCrossover {
    /// Default dispatch weight for crossover.
    pub const DEFAULT_WEIGHT: f64 = 0.8;

    pub fn new() -> Self {
        Self {
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    /// Overrides the dispatch weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Operator<C> for UniformCrossover
where
    C: Genome + Clone + Send + Sync,
{
    fn weight(&self) -> f64 {
        self.weight
    }

    fn mutate(&self, elite: &Elite<'_, C>, slot: &mut C, rng: &mut dyn RngCore) {
        let parents = elite.candidates();
        if parents.len() < 2 {
            *slot = parents[0].clone();
            return;
        }

        let first = elite.select(rng);
        let mut mate = elite.select(rng);
        if mate == first {
            mate = remap_duplicate(first, parents.len());
        }

        let father = &parents[first];
        let mother = &parents[mate];
        assert_eq!(
            father.len(),
            mother.len(),
            "crossover parents must have equal gene counts"
        );

        let mut child = father.clone();
        for i in 0..child.len() {
            if rng.random_bool(0.5) {
                child.set_gene(i, mother.gene(i));
            }
        }
        *slot = child;
    }
}

/// Point mutation of one roulette-selected elite parent.
///
/// Clones the parent into the slot, then replaces one uniformly chosen
/// position with a fresh draw from the initialization domain. Empty
/// genomes are left as the plain clone.
#[derive(Debug, Clone)]
pub struct PointMutation {
    weight: f64,
}

impl PointMutation {
    /// Default dispatch weight for point mutation.
    pub const DEFAULT_WEIGHT: f64 = 0.3;

    pub fn new() -> Self {
        Self {
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    /// Overrides the dispatch weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl Default for PointMutation {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Operator<C> for PointMutation
where
    C: Genome + Clone + Send + Sync,
{
    fn weight(&self) -> f64 {
        self.weight
    }

    fn mutate(&self, elite: &Elite<'_, C>, slot: &mut C, rng: &mut dyn RngCore) {
        let parent = &elite.candidates()[elite.select(rng)];
        let mut child = parent.clone();
        if !child.is_empty() {
            let locus = rng.random_range(0..child.len());
            let fresh = child.random_gene(locus, rng);
            child.set_gene(locus, fresh);
        }
        *slot = child;
    }
}
