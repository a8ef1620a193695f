//! Fitness blend configuration.
//!
//! [`FitnessConfig`] decides how the metrics of a rule collapse into the
//! single scalar the optimizer sees, and in which direction it points.

use super::metrics::{Metric, Metrics};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction the external optimizer optimizes in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Higher fitness is better; the blend is returned as-is.
    #[default]
    Maximize,
    /// Lower fitness is better; the blend is negated.
    Minimize,
}

impl Orientation {
    /// A value worse than any achievable score in this orientation.
    pub fn worst(self) -> f64 {
        match self {
            Orientation::Maximize => f64::NEG_INFINITY,
            Orientation::Minimize => f64::INFINITY,
        }
    }

    /// Converts a "higher is better" score into this orientation.
    pub fn orient(self, score: f64) -> f64 {
        match self {
            Orientation::Maximize => score,
            Orientation::Minimize => -score,
        }
    }

    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Orientation::Maximize => a > b,
            Orientation::Minimize => a < b,
        }
    }
}

/// Weights of the metric blend plus the optimizer orientation.
///
/// Fitness is the weighted mean `Σ wᵢ·mᵢ / Σ wᵢ` over all metrics, then
/// oriented. Metrics with weight 0 do not contribute.
///
/// # Examples
///
/// ```
/// use numarm::fitness::{FitnessConfig, Metric, Orientation};
///
/// let config = FitnessConfig::default()
///     .with_weight(Metric::Inclusion, 0.5)
///     .with_orientation(Orientation::Minimize);
///
/// assert_eq!(config.weight(Metric::Support), 1.0);
/// assert_eq!(config.weight(Metric::Inclusion), 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitnessConfig {
    weights: [f64; Metric::COUNT],

    /// Orientation of the returned fitness.
    pub orientation: Orientation,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self::support_confidence()
    }
}

impl FitnessConfig {
    /// All weights zero; add metrics with [`with_weight`](Self::with_weight).
    pub fn empty() -> Self {
        Self {
            weights: [0.0; Metric::COUNT],
            orientation: Orientation::default(),
        }
    }

    /// Support and confidence, equally weighted (the default).
    pub fn support_confidence() -> Self {
        Self::empty()
            .with_weight(Metric::Support, 1.0)
            .with_weight(Metric::Confidence, 1.0)
    }

    /// Support, confidence, inclusion, and amplitude, equally weighted.
    ///
    /// Rewards rules that also span a moderate number of attributes with
    /// tight numeric intervals.
    pub fn classic() -> Self {
        Self::support_confidence()
            .with_weight(Metric::Inclusion, 1.0)
            .with_weight(Metric::Amplitude, 1.0)
    }

    /// Sets the weight of `metric`. Negative or NaN weights become 0.
    pub fn with_weight(mut self, metric: Metric, weight: f64) -> Self {
        self.weights[metric.index()] = if weight.is_nan() { 0.0 } else { weight.max(0.0) };
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Weight of `metric`.
    pub fn weight(&self, metric: Metric) -> f64 {
        self.weights[metric.index()]
    }

    /// Metrics with non-zero weight.
    pub fn active_metrics(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL
            .into_iter()
            .map(|m| (m, self.weight(m)))
            .filter(|&(_, w)| w > 0.0)
    }

    /// The un-oriented weighted mean ("higher is better").
    pub fn blend(&self, metrics: &Metrics) -> f64 {
        let (sum, total) = self
            .active_metrics()
            .fold((0.0, 0.0), |(s, t), (m, w)| (s + w * metrics.get(m), t + w));
        if total > 0.0 {
            sum / total
        } else {
            0.0
        }
    }

    /// The blend in the configured orientation.
    pub fn fitness(&self, metrics: &Metrics) -> f64 {
        self.orientation.orient(self.blend(metrics))
    }

    /// Worst fitness in the configured orientation.
    pub fn worst(&self) -> f64 {
        self.orientation.worst()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(m) = Metric::ALL.into_iter().find(|&m| !self.weight(m).is_finite()) {
            return Err(format!("weight of {m} must be finite"));
        }
        if self.active_metrics().next().is_none() {
            return Err("at least one metric weight must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> Metrics {
        Metrics {
            support: 0.2,
            confidence: 0.8,
            inclusion: 0.5,
            amplitude: 0.1,
            ..Metrics::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = FitnessConfig::default();
        assert_eq!(config.orientation, Orientation::Maximize);
        assert_eq!(config.active_metrics().count(), 2);
        assert!((config.fitness(&metrics()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_classic_preset() {
        let config = FitnessConfig::classic();
        assert!((config.fitness(&metrics()) - 1.6 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_mean() {
        let config = FitnessConfig::empty()
            .with_weight(Metric::Support, 3.0)
            .with_weight(Metric::Confidence, 1.0);
        assert!((config.blend(&metrics()) - (0.6 + 0.8) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_minimize_negates() {
        let config = FitnessConfig::default().with_orientation(Orientation::Minimize);
        assert!((config.fitness(&metrics()) + 0.5).abs() < 1e-12);
        assert_eq!(config.worst(), f64::INFINITY);
    }

    #[test]
    fn test_worst_is_beyond_any_score() {
        for orientation in [Orientation::Maximize, Orientation::Minimize] {
            let score = orientation.orient(-1e300);
            assert!(orientation.is_better(score, orientation.worst()));
        }
    }

    #[test]
    fn test_negative_weight_clamped() {
        let config = FitnessConfig::default().with_weight(Metric::Lift, -2.0);
        assert_eq!(config.weight(Metric::Lift), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(FitnessConfig::default().validate().is_ok());
        assert!(FitnessConfig::empty().validate().is_err());
        assert!(FitnessConfig::default()
            .with_weight(Metric::Lift, f64::INFINITY)
            .validate()
            .is_err());
    }
}
