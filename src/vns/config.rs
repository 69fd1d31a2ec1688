//! Variable Neighborhood Search configuration.

/// Configuration parameters for Variable Neighborhood Search.
///
/// # Examples
///
/// ```
/// use u_facility::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_max_iterations(1000)
///     .with_k_max(3);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.k_max, 3);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VnsConfig {
    /// Number of outer iterations. An iteration ends at the first improving
    /// shake or after a full pass over `k = 1..=k_max`.
    pub max_iterations: usize,
    /// Largest shake size (warehouse flips).
    pub k_max: usize,
    /// Random seed (None for a fresh seed).
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            k_max: 5,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the number of outer iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the largest shake size.
    pub fn with_k_max(mut self, k: usize) -> Self {
        self.k_max = k;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.k_max == 0 {
            return Err("k_max must be at least 1".into());
        }
        Ok(())
    }
}
