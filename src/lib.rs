//! Generic generational genetic-algorithm engine.
//!
//! Evolves a fixed-size pool of opaque candidates toward minimizing a
//! caller-supplied error score. The engine owns the population lifecycle,
//! parallel fitness evaluation, in-place rank sorting, elitism, and
//! weighted parent selection; everything domain-specific — candidate
//! representation, genome encoding, fitness semantics — stays behind the
//! collaborator traits.
//!
//! # Core Traits
//!
//! - [`Environment`]: candidate lifecycle — create, evaluate, clone, release
//! - [`Operator`]: weighted offspring production from the current elite
//! - [`Visitor`]: optional read-only per-generation inspection
//!
//! # Key Types
//!
//! - [`Engine`]: fixed pool size, drives the generation loop
//! - [`TrainConfig`]: termination, elitism, parallelism, seeding
//! - [`TrainResult`]: best candidates, final score, statistics
//! - [`Elite`]: the frozen elite view operators breed from
//!
//! # Example
//!
//! ```
//! use rand::{Rng, RngCore};
//! use u_evolve::{Elite, Engine, Environment, Operator, TrainConfig};
//!
//! // Search for the value 42 in [0, 100).
//! struct Target;
//!
//! impl Environment for Target {
//!     type Candidate = i64;
//!     type Score = f64;
//!
//!     fn reserve<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<i64> {
//!         (0..count).map(|_| rng.random_range(0..100)).collect()
//!     }
//!
//!     fn evaluate(&self, candidate: &i64) -> f64 {
//!         (candidate - 42).abs() as f64
//!     }
//!
//!     fn clone_candidate(&self, candidate: &i64) -> i64 {
//!         *candidate
//!     }
//! }
//!
//! // Nudge a selected elite by one step.
//! struct Step;
//!
//! impl Operator<i64> for Step {
//!     fn weight(&self) -> f64 {
//!         1.0
//!     }
//!
//!     fn mutate(&self, elite: &Elite<'_, i64>, slot: &mut i64, rng: &mut dyn RngCore) {
//!         let parent = elite.candidates()[elite.select(rng)];
//!         *slot = parent + if rng.random_bool(0.5) { 1 } else { -1 };
//!     }
//! }
//!
//! let engine = Engine::new(16);
//! let config = TrainConfig::default()
//!     .with_max_generations(200)
//!     .with_min_error(0.0)
//!     .with_elite_fraction(0.25)
//!     .with_seed(42);
//!
//! let result = engine.train(&Target, &[&Step], &config);
//! assert_eq!(result.best[0], 42);
//! ```
//!
//! # Candidates with positional structure
//!
//! The [`operators`] module adds a [`Genome`](operators::Genome) trait and
//! the two reference operators, [`UniformCrossover`](operators::UniformCrossover)
//! and [`PointMutation`](operators::PointMutation), for candidates that
//! expose per-position gene access.

mod config;
pub mod operators;
mod runner;
mod selection;
mod sort;
mod types;

pub use config::TrainConfig;
pub use runner::{Engine, TrainResult};
pub use selection::roulette;
pub use types::{Elite, Environment, Operator, Score, Visitor};
