//! Archive entry.

use crate::fitness::{Metric, Metrics};
use crate::rule::Rule;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A distinct valid rule with the metrics it was first scored with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArchiveEntry {
    /// The rule.
    pub rule: Rule,

    /// Metrics computed on first sight.
    pub metrics: Metrics,

    /// Oriented fitness computed on first sight.
    pub fitness: f64,
}

impl ArchiveEntry {
    /// Shortcut for `self.metrics.get(metric)`.
    pub fn metric(&self, metric: Metric) -> f64 {
        self.metrics.get(metric)
    }
}
