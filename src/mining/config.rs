//! Mining run configuration.

use crate::fitness::{FitnessConfig, Orientation};
use crate::rule::DecoderConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything a mining run needs besides the data and the optimizer.
///
/// # Examples
///
/// ```
/// use numarm::fitness::{FitnessConfig, Orientation};
/// use numarm::mining::MiningConfig;
///
/// let config = MiningConfig::default()
///     .with_inclusion_threshold(0.6)
///     .with_fitness(FitnessConfig::classic())
///     .with_orientation(Orientation::Minimize)
///     .with_parallel(false);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MiningConfig {
    /// Decoding thresholds.
    pub decoder: DecoderConfig,

    /// Metric blend and orientation.
    pub fitness: FitnessConfig,

    /// Whether batch evaluation fans out over rayon's thread pool.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            decoder: DecoderConfig::default(),
            fitness: FitnessConfig::default(),
            parallel: true,
        }
    }
}

impl MiningConfig {
    pub fn with_decoder(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }

    /// Sets the inclusion threshold of the decoder.
    pub fn with_inclusion_threshold(mut self, t: f64) -> Self {
        self.decoder = self.decoder.with_inclusion_threshold(t);
        self
    }

    pub fn with_fitness(mut self, fitness: FitnessConfig) -> Self {
        self.fitness = fitness;
        self
    }

    /// Sets the orientation of the fitness returned to the optimizer.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.fitness = self.fitness.with_orientation(orientation);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.decoder.validate()?;
        self.fitness.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::Metric;

    #[test]
    fn test_default_config() {
        let config = MiningConfig::default();
        assert!(config.parallel);
        assert_eq!(config.fitness.orientation, Orientation::Maximize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MiningConfig::default()
            .with_inclusion_threshold(0.3)
            .with_fitness(FitnessConfig::empty().with_weight(Metric::Lift, 2.0))
            .with_orientation(Orientation::Minimize)
            .with_parallel(false);
        assert!((config.decoder.inclusion_threshold - 0.3).abs() < 1e-12);
        assert_eq!(config.fitness.weight(Metric::Lift), 2.0);
        assert_eq!(config.fitness.orientation, Orientation::Minimize);
        assert!(!config.parallel);
    }

    #[test]
    fn test_validate_propagates() {
        assert!(MiningConfig::default()
            .with_fitness(FitnessConfig::empty())
            .validate()
            .is_err());
        assert!(MiningConfig::default()
            .with_inclusion_threshold(1.0)
            .validate()
            .is_err());
    }
}
