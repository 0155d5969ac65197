//! Core trait definitions for the evolution engine.
//!
//! Three collaborator traits connect the generic engine to domain code:
//! [`Environment`] owns candidate lifecycle and fitness, [`Operator`]
//! produces offspring from the current elite, and [`Visitor`] observes
//! each generation. The engine itself never inspects candidate internals —
//! it only moves candidates around and hands them to collaborators.

use crate::selection::roulette;
use rand::{Rng, RngCore};

/// Marker trait for fitness scores.
///
/// Scores must support comparison and be cheaply copyable.
/// Lower scores are considered better (minimization); no upper or lower
/// bound is assumed.
///
/// Built-in implementations exist for `f64` and `f32`.
/// For maximization problems, negate the score or use a wrapper type.
pub trait Score: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the score to `f64` for weight bookkeeping and statistics.
    fn to_f64(self) -> f64;
}

impl Score for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Score for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Defines the world a population evolves in.
///
/// The environment owns the candidate lifecycle: it creates the initial
/// population, scores candidates, deep-copies survivors into the caller's
/// result buffer, and releases the working population when training ends.
///
/// # Contract
///
/// All methods are assumed infallible. A panic in any of them aborts the
/// in-progress [`train`](crate::Engine::train) call; the engine never
/// retries or substitutes defaults.
///
/// # Thread Safety
///
/// `Environment` must be `Send + Sync` because the engine evaluates
/// candidates in parallel using rayon.
pub trait Environment: Send + Sync {
    /// The candidate (solution) type. Opaque to the engine.
    type Candidate: Send + Sync;

    /// The fitness score type. Must implement [`Score`].
    type Score: Score;

    /// Creates `count` freshly, independently randomized candidates.
    ///
    /// Called once per training run. Must return exactly `count`
    /// candidates; the engine asserts this.
    fn reserve<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Self::Candidate>;

    /// Evaluates a candidate and returns its score.
    ///
    /// This is typically the most expensive operation. The engine may
    /// call this in parallel across the population.
    ///
    /// Lower scores are considered better (minimization).
    fn evaluate(&self, candidate: &Self::Candidate) -> Self::Score;

    /// Deep-copies a candidate into an independent lifetime.
    ///
    /// Used to extract the best candidates into the result buffer.
    fn clone_candidate(&self, candidate: &Self::Candidate) -> Self::Candidate;

    /// Releases the working population before `train` returns.
    ///
    /// The default implementation simply drops the vector, which is
    /// sufficient for candidates whose resources are plain Rust values.
    fn release(&self, population: Vec<Self::Candidate>) {
        drop(population);
    }
}

/// Per-generation inspection hook.
///
/// Called once per generation after ranking and before regeneration, with
/// the elite candidates and their scores in ascending (best-first) order.
/// Not called on the iteration that ends the run.
///
/// The borrowed slices enforce the contract: a visitor may not mutate the
/// elite and cannot retain references beyond the call, since the engine
/// overwrites that memory in the next generation.
pub trait Visitor<C, S> {
    fn visit(&mut self, elite: &[C], scores: &[S]);
}

/// No-op visitor, used by [`Engine::train`](crate::Engine::train).
impl<C, S> Visitor<C, S> for () {
    fn visit(&mut self, _elite: &[C], _scores: &[S]) {}
}

/// A weighted offspring-producing operator.
///
/// Each regeneration slot picks one operator via a sequential threshold
/// scan (see [`Engine`](crate::Engine)) and invokes it to write exactly
/// one offspring into the slot, using only the frozen elite as source
/// material.
///
/// Two reference operators live in the [`operators`](crate::operators)
/// module; custom operators only need this trait.
pub trait Operator<C>: Send + Sync {
    /// Relative selection weight, in `[0, ∞)`.
    ///
    /// Tested against a fresh uniform draw in `[0, 1)` during dispatch.
    /// Weights are deliberately not normalized across operators: list
    /// order and individual weights jointly determine effective
    /// probability, and the last operator in the list is the
    /// unconditional fallback.
    fn weight(&self) -> f64;

    /// Writes one offspring into `slot`.
    ///
    /// `elite` is read-only and shared across concurrently regenerated
    /// slots; `rng` is owned by this slot's task.
    fn mutate(&self, elite: &Elite<'_, C>, slot: &mut C, rng: &mut dyn RngCore);
}

/// Read-only view of the current generation's elite, handed to operators.
///
/// Bundles the ranked elite candidates (best first), the reverse-weight
/// table, and the total selection weight. [`select`](Elite::select) runs
/// the roulette-wheel walk over the table, so most operators never touch
/// the weights directly.
#[derive(Clone, Copy)]
pub struct Elite<'a, C> {
    candidates: &'a [C],
    reverse_weights: &'a [f64],
    total_weight: f64,
}

impl<'a, C> Elite<'a, C> {
    /// Builds an elite view from its parts.
    ///
    /// Public so custom operators can be unit-tested without running the
    /// engine.
    ///
    /// # Panics
    /// Panics if the candidate and weight slices differ in length.
    pub fn new(candidates: &'a [C], reverse_weights: &'a [f64], total_weight: f64) -> Self {
        assert_eq!(
            candidates.len(),
            reverse_weights.len(),
            "elite candidates and reverse weights must be index-aligned"
        );
        Self {
            candidates,
            reverse_weights,
            total_weight,
        }
    }

    /// The elite candidates, best (lowest score) first.
    pub fn candidates(&self) -> &'a [C] {
        self.candidates
    }

    /// Number of elite candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the elite is empty. Never true inside a running engine.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The reverse-weight table: the elite scores in reverse rank order,
    /// so that the walk favors better (lower-scored) candidates.
    pub fn reverse_weights(&self) -> &'a [f64] {
        self.reverse_weights
    }

    /// Sum of the raw elite scores.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Selects a parent index via the roulette-wheel walk.
    ///
    /// Falls back to uniform selection when the total weight is not
    /// positive (all-zero elite scores).
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        roulette(self.reverse_weights, self.total_weight, rng)
    }
}
