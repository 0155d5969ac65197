//! The generational training loop.
//!
//! [`Engine`] drives the evaluate → sort → elect → visit → regenerate
//! cycle: score every candidate in parallel, rank the pool with the
//! co-permuting sort, freeze the elite prefix, show it to the visitor,
//! then refill every non-elite slot with one offspring chosen by the
//! operator dispatch protocol.

use crate::config::TrainConfig;
use crate::selection::elite_weights;
use crate::sort::co_sort;
use crate::types::{Elite, Environment, Operator, Score, Visitor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainResult<C, S> {
    /// Clones of the best-ranked candidates of the final generation,
    /// best first. Holds `min(elite_count, result_capacity)` entries.
    pub best: Vec<C>,

    /// Score of the best candidate at the last evaluation pass.
    pub best_score: S,

    /// Number of completed regeneration cycles.
    ///
    /// Equals `max_generations` on generation exhaustion; smaller only
    /// when the error threshold ended the run.
    pub generations: usize,

    /// Best score recorded at every evaluation pass.
    pub score_history: Vec<f64>,
}

/// Executes the generational loop over a fixed-size candidate pool.
///
/// The pool size is fixed at construction; everything else about a run is
/// supplied per call through [`TrainConfig`], the [`Environment`], and
/// the ordered operator list.
///
/// # Operator dispatch
///
/// Each offspring slot scans the operator list in order, testing a fresh
/// uniform draw in `[0, 1)` against each operator's weight; the first
/// operator whose weight exceeds its draw produces the offspring, and the
/// last operator is invoked unconditionally when no earlier one accepted.
/// This is deliberately not a normalized distribution — list order and
/// weights jointly shape the effective probabilities.
///
/// # Usage
///
/// ```ignore
/// let engine = Engine::new(256);
/// let config = TrainConfig::default().with_min_error(0.08).with_seed(42);
/// let crossover = UniformCrossover::new();
/// let mutation = PointMutation::new();
/// let result = engine.train(&env, &[&mutation, &crossover], &config);
/// println!("best score {:?} after {} generations", result.best_score, result.generations);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    pool_size: usize,
}

impl Engine {
    /// Creates an engine with a fixed pool size.
    pub fn new(pool_size: usize) -> Self {
        Self { pool_size }
    }

    /// The fixed pool size.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Validates a train call against this engine's pool.
    ///
    /// Composes [`TrainConfig::validate`] with the call-shaped checks:
    /// non-zero pool, non-empty operator list, well-formed operator
    /// weights, and an elite fraction that floors to at least one
    /// candidate.
    pub fn validate<C>(
        &self,
        operators: &[&dyn Operator<C>],
        config: &TrainConfig,
    ) -> Result<(), String> {
        config.validate()?;
        if self.pool_size == 0 {
            return Err("pool_size must be at least 1".into());
        }
        if operators.is_empty() {
            return Err("operator list must not be empty".into());
        }
        for (i, op) in operators.iter().enumerate() {
            if !(op.weight() >= 0.0) {
                return Err(format!(
                    "operator {i} has invalid weight {}",
                    op.weight()
                ));
            }
        }
        if self.elite_count(config) == 0 {
            return Err(format!(
                "elite_fraction {} yields zero elite candidates for pool size {}",
                config.elite_fraction, self.pool_size
            ));
        }
        Ok(())
    }

    /// Runs the training loop without a visitor.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`validate`](Self::validate) first to get a descriptive error), or
    /// if a collaborator violates its contract.
    pub fn train<E>(
        &self,
        env: &E,
        operators: &[&dyn Operator<E::Candidate>],
        config: &TrainConfig,
    ) -> TrainResult<E::Candidate, E::Score>
    where
        E: Environment,
    {
        self.train_with_visitor(env, None::<&mut ()>, operators, config)
    }

    /// Runs the training loop, showing the elite to `visitor` once per
    /// generation before regeneration.
    ///
    /// The visitor is not called on the iteration that ends the run.
    pub fn train_with_visitor<E, V>(
        &self,
        env: &E,
        mut visitor: Option<&mut V>,
        operators: &[&dyn Operator<E::Candidate>],
        config: &TrainConfig,
    ) -> TrainResult<E::Candidate, E::Score>
    where
        E: Environment,
        V: Visitor<E::Candidate, E::Score>,
    {
        self.validate(operators, config)
            .expect("invalid train configuration");

        let elite_count = self.elite_count(config);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        // 1. Initial population, owned by the engine until release.
        let mut pool = env.reserve(self.pool_size, &mut rng);
        assert_eq!(
            pool.len(),
            self.pool_size,
            "Environment::reserve must return exactly the requested count"
        );
        let mut scores: Vec<E::Score> = Vec::with_capacity(self.pool_size);
        let mut score_history = Vec::with_capacity(config.max_generations);

        // 2. Generation loop: evaluate and rank, then either stop or
        //    regenerate the non-elite slots from the frozen elite.
        let mut generation = 0usize;
        let best_score = loop {
            evaluate_pool(env, &pool, &mut scores, config.parallel);
            co_sort(&mut pool, &mut scores);

            let best = scores[0];
            score_history.push(best.to_f64());
            if best.to_f64() <= config.min_error {
                break best;
            }

            let (reverse, total_weight) = elite_weights(&scores[..elite_count]);
            let (elite_slots, offspring) = pool.split_at_mut(elite_count);
            if let Some(ref mut v) = visitor {
                v.visit(elite_slots, &scores[..elite_count]);
            }
            let elite = Elite::new(&*elite_slots, &reverse, total_weight);

            // One seed per slot, drawn sequentially from the master RNG,
            // so results are identical across thread schedules and the
            // parallel flag.
            let slot_seeds: Vec<u64> = (0..offspring.len()).map(|_| rng.random()).collect();
            if config.parallel {
                offspring
                    .par_iter_mut()
                    .zip(slot_seeds.par_iter())
                    .for_each(|(slot, &seed)| {
                        let mut slot_rng = StdRng::seed_from_u64(seed);
                        breed(operators, &elite, slot, &mut slot_rng);
                    });
            } else {
                for (slot, &seed) in offspring.iter_mut().zip(&slot_seeds) {
                    let mut slot_rng = StdRng::seed_from_u64(seed);
                    breed(operators, &elite, slot, &mut slot_rng);
                }
            }

            generation += 1;
            if generation == config.max_generations {
                // The freshly regenerated slots are left unevaluated; the
                // elite prefix they were bred from is still ranked and is
                // all that result extraction reads.
                break best;
            }
        };

        // 3. Result extraction and release.
        let stored = elite_count.min(config.result_capacity);
        let best: Vec<E::Candidate> = pool[..stored]
            .iter()
            .map(|candidate| env.clone_candidate(candidate))
            .collect();
        env.release(pool);

        TrainResult {
            best,
            best_score,
            generations: generation,
            score_history,
        }
    }

    fn elite_count(&self, config: &TrainConfig) -> usize {
        (self.pool_size as f64 * config.elite_fraction) as usize
    }
}

/// Scores every pool slot, refilling the score table in place.
fn evaluate_pool<E: Environment>(
    env: &E,
    pool: &[E::Candidate],
    scores: &mut Vec<E::Score>,
    parallel: bool,
) {
    if parallel {
        pool.par_iter()
            .map(|candidate| env.evaluate(candidate))
            .collect_into_vec(scores);
    } else {
        scores.clear();
        scores.extend(pool.iter().map(|candidate| env.evaluate(candidate)));
    }
}

/// Operator dispatch for one offspring slot: sequential threshold scan
/// with a fresh draw per operator, last operator as unconditional
/// fallback.
fn breed<C>(
    operators: &[&dyn Operator<C>],
    elite: &Elite<'_, C>,
    slot: &mut C,
    rng: &mut StdRng,
) {
    let (fallback, gated) = operators
        .split_last()
        .expect("operator list checked non-empty at call entry");
    for op in gated {
        if rng.random_range(0.0..1.0) < op.weight() {
            op.mutate(elite, slot, rng);
            return;
        }
    }
    fallback.mutate(elite, slot, rng);
}

// ============================================================================
// Tests
// ============================================================================
