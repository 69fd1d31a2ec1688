//! SA configuration.

/// How the annealing chain is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitialAssignment {
    /// Every customer to a uniformly random warehouse.
    #[default]
    Random,
    /// Every customer to its cheapest warehouse by allocation cost.
    Greedy,
}

/// How an inner iteration derives a neighbor from the current assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NeighborMove {
    /// Reassign `min(C / 10, 25)` distinct customers (at least one) to
    /// random warehouses.
    #[default]
    PerturbSubset,
    /// Move one random customer to a different warehouse.
    SingleReassign,
}

/// Configuration for Simulated Annealing with tabu refinement.
///
/// The cooling schedule is geometric: `T_{k+1} = cooling_rate * T_k`, with
/// `iterations_per_temperature` inner iterations per level, until
/// `T <= final_temperature`.
///
/// # Examples
///
/// ```
/// use u_facility::sa::{InitialAssignment, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.8)
///     .with_iterations_per_temperature(50)
///     .with_initial_assignment(InitialAssignment::Greedy)
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.temperature_levels(), 39);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// The run stops once the temperature drops to or below this.
    pub final_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_rate: f64,

    /// Inner iterations at each temperature level.
    pub iterations_per_temperature: usize,

    /// Consecutive non-improving sweeps that end a tabu refinement.
    pub max_stagnation_sweeps: usize,

    /// Tabu list length of the refinement.
    pub tabu_tenure: usize,

    /// Every this many temperature levels, the chain restarts from a
    /// perturbation of the best assignment. 0 disables restarts.
    pub perturbation_interval: usize,

    pub initial_assignment: InitialAssignment,

    pub neighbor_move: NeighborMove,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            final_temperature: 0.1,
            cooling_rate: 0.9,
            iterations_per_temperature: 200,
            max_stagnation_sweeps: 20,
            tabu_tenure: 6,
            perturbation_interval: 30,
            initial_assignment: InitialAssignment::default(),
            neighbor_move: NeighborMove::default(),
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_stagnation_sweeps(mut self, n: usize) -> Self {
        self.max_stagnation_sweeps = n;
        self
    }

    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    pub fn with_perturbation_interval(mut self, n: usize) -> Self {
        self.perturbation_interval = n;
        self
    }

    pub fn with_initial_assignment(mut self, initial: InitialAssignment) -> Self {
        self.initial_assignment = initial;
        self
    }

    pub fn with_neighbor_move(mut self, neighbor: NeighborMove) -> Self {
        self.neighbor_move = neighbor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of temperature levels the schedule runs.
    pub fn temperature_levels(&self) -> usize {
        let mut levels = 0;
        let mut t = self.initial_temperature;
        while t > self.final_temperature {
            t *= self.cooling_rate;
            levels += 1;
        }
        levels
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0) || !self.initial_temperature.is_finite() {
            return Err("initial_temperature must be positive and finite".into());
        }
        if !(self.final_temperature > 0.0) {
            return Err("final_temperature must be positive".into());
        }
        if self.final_temperature >= self.initial_temperature {
            return Err("final_temperature must be less than initial_temperature".into());
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err("iterations_per_temperature must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_temperature, 1000.0);
        assert_eq!(config.final_temperature, 0.1);
        assert_eq!(config.cooling_rate, 0.9);
        assert_eq!(config.iterations_per_temperature, 200);
        assert_eq!(config.max_stagnation_sweeps, 20);
        assert_eq!(config.tabu_tenure, 6);
        assert_eq!(config.perturbation_interval, 30);
    }

    #[test]
    fn test_default_schedule_length() {
        // 1000 * 0.9^k <= 0.1  <=>  k >= ln(1e-4) / ln(0.9) ~ 87.4
        assert_eq!(SaConfig::default().temperature_levels(), 88);
    }

    #[test]
    fn test_validation_errors() {
        let base = SaConfig::default();
        assert!(base.clone().with_initial_temperature(0.0).validate().is_err());
        assert!(base.clone().with_final_temperature(0.0).validate().is_err());
        assert!(base.clone().with_final_temperature(5000.0).validate().is_err());
        assert!(base.clone().with_cooling_rate(1.0).validate().is_err());
        assert!(base.clone().with_cooling_rate(0.0).validate().is_err());
        assert!(base.clone().with_iterations_per_temperature(0).validate().is_err());
    }
}
