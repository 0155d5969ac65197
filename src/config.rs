//! Training configuration.
//!
//! [`TrainConfig`] holds all per-call parameters of the evolutionary loop.
//! The pool size is not here: it is fixed at [`Engine`](crate::Engine)
//! construction.

/// Configuration for a training run.
///
/// Controls termination, elitism, result extraction, parallelism, and
/// reproducibility.
///
/// # Defaults
///
/// ```
/// use u_evolve::TrainConfig;
///
/// let config = TrainConfig::default();
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.result_capacity, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::TrainConfig;
///
/// let config = TrainConfig::default()
///     .with_max_generations(200)
///     .with_min_error(0.05)
///     .with_elite_fraction(0.25)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainConfig {
    /// Maximum number of generations before termination. Must be at least 1.
    pub max_generations: usize,

    /// Inclusive error threshold: the run stops once the best score drops
    /// to this value or below.
    ///
    /// The default of `f64::NEG_INFINITY` disables threshold-based
    /// termination.
    pub min_error: f64,

    /// Fraction of the pool preserved as elites, in `(0, 1]`.
    ///
    /// The elite count is `floor(pool_size * elite_fraction)` and must
    /// come out to at least one candidate. With a fraction of `1.0` the
    /// whole pool is elite and regeneration is a no-op.
    pub elite_fraction: f64,

    /// Capacity of the result buffer. Must be at least 1.
    ///
    /// At the end of a run, `min(elite_count, result_capacity)` clones of
    /// the best-ranked candidates are returned, best first.
    pub result_capacity: usize,

    /// Whether to evaluate and regenerate in parallel using rayon.
    ///
    /// For a given seed, parallel and sequential runs produce identical
    /// results; this flag only trades threads for determinism of timing.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            max_generations: 500,
            min_error: f64::NEG_INFINITY,
            elite_fraction: 0.1,
            result_capacity: 1,
            parallel: true,
            seed: None,
        }
    }
}

impl TrainConfig {
    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the inclusive error threshold.
    pub fn with_min_error(mut self, min_error: f64) -> Self {
        self.min_error = min_error;
        self
    }

    /// Sets the elite fraction.
    ///
    /// Out-of-range values are kept as given and rejected by
    /// [`validate`](Self::validate), never silently clamped.
    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    /// Sets the result buffer capacity.
    pub fn with_result_capacity(mut self, capacity: usize) -> Self {
        self.result_capacity = capacity;
        self
    }

    /// Enables or disables parallel evaluation and regeneration.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    /// Pool-dependent checks (elite count, operator list) live in
    /// [`Engine::validate`](crate::Engine::validate).
    pub fn validate(&self) -> Result<(), String> {
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if !(self.elite_fraction > 0.0 && self.elite_fraction <= 1.0) {
            return Err("elite_fraction must be in (0, 1]".into());
        }
        if self.min_error.is_nan() {
            return Err("min_error must not be NaN".into());
        }
        if self.result_capacity == 0 {
            return Err("result_capacity must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainConfig::default();
        assert_eq!(config.max_generations, 500);
        assert_eq!(config.min_error, f64::NEG_INFINITY);
        assert!((config.elite_fraction - 0.1).abs() < 1e-10);
        assert_eq!(config.result_capacity, 1);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TrainConfig::default()
            .with_max_generations(1000)
            .with_min_error(0.08)
            .with_elite_fraction(0.25)
            .with_result_capacity(8)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.max_generations, 1000);
        assert!((config.min_error - 0.08).abs() < 1e-10);
        assert!((config.elite_fraction - 0.25).abs() < 1e-10);
        assert_eq!(config.result_capacity, 8);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = TrainConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elite_fraction_bounds() {
        assert!(TrainConfig::default()
            .with_elite_fraction(0.0)
            .validate()
            .is_err());
        assert!(TrainConfig::default()
            .with_elite_fraction(1.1)
            .validate()
            .is_err());
        assert!(TrainConfig::default()
            .with_elite_fraction(-0.5)
            .validate()
            .is_err());
        assert!(TrainConfig::default()
            .with_elite_fraction(f64::NAN)
            .validate()
            .is_err());
        assert!(TrainConfig::default()
            .with_elite_fraction(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_nan_min_error() {
        let config = TrainConfig::default().with_min_error(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_result_capacity() {
        let config = TrainConfig::default().with_result_capacity(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builders_do_not_clamp() {
        // Invalid values are reported by validate, not papered over.
        let config = TrainConfig::default().with_elite_fraction(2.0);
        assert!((config.elite_fraction - 2.0).abs() < 1e-10);
        assert!(config.validate().is_err());
    }
}
