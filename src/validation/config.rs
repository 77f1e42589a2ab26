//! Configuration for the validation engine.

/// Numeric knobs for the validation engine. Per-puzzle tolerances live in
/// the arrangement metadata; these are engine-wide thresholds.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// AABB intersection area above which a piece pair counts as
    /// overlapping, in unit².
    pub overlap_area_epsilon: f64,

    /// A corner constraint missing by less than this factor times the
    /// position tolerance gets a near-miss hint.
    pub near_miss_factor: f64,

    /// Placeholder for the edge projected-overlap ratio. The real
    /// computation is unimplemented; this fixed estimate is compared
    /// against a constraint's `min_overlap_ratio`.
    pub projected_overlap_estimate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overlap_area_epsilon: 0.001,
            near_miss_factor: 3.0,
            projected_overlap_estimate: 1.0,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overlap area threshold.
    pub fn with_overlap_epsilon(mut self, epsilon: f64) -> Self {
        self.overlap_area_epsilon = epsilon;
        self
    }

    /// Set the near-miss hint factor.
    pub fn with_near_miss_factor(mut self, factor: f64) -> Self {
        self.near_miss_factor = factor;
        self
    }

    /// Set the fixed projected-overlap estimate. Mostly useful for
    /// forcing the min-overlap check to fail until the real computation
    /// replaces the placeholder.
    pub fn with_projected_overlap_estimate(mut self, estimate: f64) -> Self {
        self.projected_overlap_estimate = estimate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.overlap_area_epsilon, 0.001);
        assert_eq!(config.near_miss_factor, 3.0);
        assert_eq!(config.projected_overlap_estimate, 1.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .with_overlap_epsilon(0.01)
            .with_near_miss_factor(2.0)
            .with_projected_overlap_estimate(0.5);
        assert_eq!(config.overlap_area_epsilon, 0.01);
        assert_eq!(config.near_miss_factor, 2.0);
        assert_eq!(config.projected_overlap_estimate, 0.5);
    }
}
