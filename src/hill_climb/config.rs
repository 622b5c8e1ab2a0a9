//! Hill climbing configuration.

/// Configuration parameters for relocation hill climbing.
///
/// # Examples
///
/// ```
/// use u_binpack::hill_climb::HillClimbConfig;
///
/// let config = HillClimbConfig::default().with_max_improvements(10);
/// assert_eq!(config.max_improvements, Some(10));
/// ```
#[derive(Debug, Clone)]
pub struct HillClimbConfig {
    /// Stop after this many accepted moves (None for no limit).
    pub max_improvements: Option<usize>,

    /// Evaluate destination containers in parallel. Only effective with
    /// the `parallel` feature; results are identical either way.
    pub parallel: bool,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            max_improvements: None,
            parallel: true,
        }
    }
}

impl HillClimbConfig {
    /// Sets a cap on accepted moves.
    pub fn with_max_improvements(mut self, n: usize) -> Self {
        self.max_improvements = Some(n);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
