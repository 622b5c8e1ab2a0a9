//! LNS configuration.

/// When a round stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Acceptance {
    /// End the round at the first accepted trial.
    FirstImprovement,
    /// Run every trial of the round, keeping the best baseline seen.
    #[default]
    BestOfN,
}

/// Configuration for the LNS algorithm.
///
/// A run consists of `rounds` sequential rounds of up to `iterations`
/// destroy/repair trials each. Every round starts from the best solution
/// of the previous one, so the carried cost never increases.
///
/// # Examples
///
/// ```
/// use u_binpack::lns::{Acceptance, LnsConfig};
///
/// let config = LnsConfig::default()
///     .with_rounds(20)
///     .with_iterations(50)
///     .with_destroy_rate(0.25)
///     .with_acceptance(Acceptance::FirstImprovement)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LnsConfig {
    /// Number of sequential rounds.
    pub rounds: usize,

    /// Maximum trials per round.
    pub iterations: usize,

    /// Nominal fraction of placed items removed per trial, in (0, 1].
    ///
    /// At least one item is always drawn.
    pub destroy_rate: f64,

    /// Round stopping rule.
    pub acceptance: Acceptance,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            rounds: 50,
            iterations: 100,
            destroy_rate: 0.3,
            acceptance: Acceptance::BestOfN,
            seed: None,
        }
    }
}

impl LnsConfig {
    pub fn with_rounds(mut self, n: usize) -> Self {
        self.rounds = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_destroy_rate(mut self, rate: f64) -> Self {
        self.destroy_rate = rate;
        self
    }

    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.iterations == 0 {
            return Err("iterations must be positive".into());
        }
        if !(self.destroy_rate > 0.0 && self.destroy_rate <= 1.0) {
            return Err(format!(
                "destroy_rate must be in (0, 1], got {}",
                self.destroy_rate
            ));
        }
        Ok(())
    }
}
