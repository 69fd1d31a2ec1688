//! GRASP configuration.

/// Configuration for GRASP.
///
/// # Examples
///
/// ```
/// use u_facility::grasp::GraspConfig;
///
/// let config = GraspConfig::default()
///     .with_alpha(0.3)
///     .with_iterations(25)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraspConfig {
    /// Width of the restricted candidate list in [0, 1].
    ///
    /// 0 is pure greedy (only the cheapest candidate), 1 is uniform over all
    /// improving candidates.
    pub alpha: f64,

    /// Number of construct + local-search trials.
    pub iterations: usize,

    /// Whether to evaluate construction candidates in parallel using rayon.
    ///
    /// Ignored when the crate is built without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            iterations: 10,
            parallel: true,
            seed: None,
        }
    }
}

impl GraspConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(format!("alpha must be in [0, 1], got {}", self.alpha));
        }
        if self.iterations == 0 {
            return Err("iterations must be at least 1".into());
        }
        Ok(())
    }
}
