//! Decoder configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thresholds that turn continuous scalars into discrete rule structure.
///
/// # Tie-breaking
///
/// An attribute participates iff its inclusion scalar is strictly greater
/// than `inclusion_threshold`; a scalar exactly at the threshold is left
/// out. A participating attribute goes to the antecedent iff its side
/// scalar is strictly less than `side_threshold`, otherwise to the
/// consequent.
///
/// # Examples
///
/// ```
/// use numarm::rule::DecoderConfig;
///
/// let config = DecoderConfig::default().with_inclusion_threshold(0.7);
/// assert!((config.side_threshold - 0.5).abs() < 1e-12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoderConfig {
    /// Inclusion probability threshold in `[0, 1)`.
    pub inclusion_threshold: f64,

    /// Antecedent/consequent split point in `(0, 1]`.
    pub side_threshold: f64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            inclusion_threshold: 0.5,
            side_threshold: 0.5,
        }
    }
}

impl DecoderConfig {
    pub fn with_inclusion_threshold(mut self, t: f64) -> Self {
        self.inclusion_threshold = t.clamp(0.0, 1.0);
        self
    }

    pub fn with_side_threshold(mut self, t: f64) -> Self {
        self.side_threshold = t.clamp(0.0, 1.0);
        self
    }

    /// Validates the configuration.
    ///
    /// A threshold of 1.0 for inclusion (or 0.0 for side) would make every
    /// vector decode to the same degenerate outcome.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.inclusion_threshold) {
            return Err(format!(
                "inclusion_threshold ({}) must be in [0, 1)",
                self.inclusion_threshold
            ));
        }
        if !(self.side_threshold > 0.0 && self.side_threshold <= 1.0) {
            return Err(format!(
                "side_threshold ({}) must be in (0, 1]",
                self.side_threshold
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DecoderConfig::default();
        assert!((config.inclusion_threshold - 0.5).abs() < 1e-12);
        assert!((config.side_threshold - 0.5).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp() {
        let config = DecoderConfig::default()
            .with_inclusion_threshold(-1.0)
            .with_side_threshold(3.0);
        assert_eq!(config.inclusion_threshold, 0.0);
        assert_eq!(config.side_threshold, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unreachable_thresholds() {
        assert!(DecoderConfig::default()
            .with_inclusion_threshold(1.0)
            .validate()
            .is_err());
        assert!(DecoderConfig::default()
            .with_side_threshold(0.0)
            .validate()
            .is_err());
    }
}
