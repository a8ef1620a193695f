//! Rule quality measures.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Guards the denominators of conviction, netconf, and Yule's Q.
const EPS: f64 = f64::EPSILON;

/// A named rule quality measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Metric {
    /// Fraction of transactions matching the whole rule.
    Support,
    /// Fraction of antecedent matches that also match the consequent.
    Confidence,
    /// How much more often both sides co-occur than under independence.
    Lift,
    /// Fraction of transactions matching the antecedent.
    Coverage,
    /// Fraction of transactions matching the consequent.
    RhsSupport,
    /// `(1 - rhs_support) / (1 - confidence)`.
    Conviction,
    /// One minus the mean width of the numeric intervals relative to the
    /// observed spread of their columns.
    Amplitude,
    /// Fraction of the dataset's attributes used by the rule.
    Inclusion,
    /// Product of both conditional probabilities, damped by
    /// `support / transactions`.
    Interestingness,
    /// Favours short antecedents relative to the consequent.
    Comprehensibility,
    /// Support deviation from independence, normalized by coverage.
    Netconf,
    /// Yule's Q from the smoothed odds ratio, in `[-1, 1]`.
    YulesQ,
}

impl Metric {
    /// Number of metrics.
    pub const COUNT: usize = 12;

    /// Every metric, in declaration order.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Support,
        Metric::Confidence,
        Metric::Lift,
        Metric::Coverage,
        Metric::RhsSupport,
        Metric::Conviction,
        Metric::Amplitude,
        Metric::Inclusion,
        Metric::Interestingness,
        Metric::Comprehensibility,
        Metric::Netconf,
        Metric::YulesQ,
    ];

    /// Snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
            Metric::Coverage => "coverage",
            Metric::RhsSupport => "rhs_support",
            Metric::Conviction => "conviction",
            Metric::Amplitude => "amplitude",
            Metric::Inclusion => "inclusion",
            Metric::Interestingness => "interestingness",
            Metric::Comprehensibility => "comprehensibility",
            Metric::Netconf => "netconf",
            Metric::YulesQ => "yulesq",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown metric '{s}'"))
    }
}

/// Transaction counts from one scan of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchCounts {
    /// Transactions matching every antecedent selector.
    pub antecedent: usize,
    /// Transactions matching every consequent selector.
    pub consequent: usize,
    /// Transactions matching the whole rule.
    pub both: usize,
    /// Transactions in the table.
    pub total: usize,
}

/// Structural facts about a rule that some metrics need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleShape {
    /// Antecedent length.
    pub antecedent: usize,
    /// Consequent length.
    pub consequent: usize,
    /// Attributes in the dataset.
    pub attributes: usize,
    /// Sum over numeric selectors of `(hi - lo) / (max - min)`, where
    /// `min` and `max` are the column's observed extremes.
    pub width_ratio_sum: f64,
}

/// All quality measures of one rule.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metrics {
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub coverage: f64,
    pub rhs_support: f64,
    pub conviction: f64,
    pub amplitude: f64,
    pub inclusion: f64,
    pub interestingness: f64,
    pub comprehensibility: f64,
    pub netconf: f64,
    pub yulesq: f64,
    /// The raw counts the ratios were derived from.
    pub counts: MatchCounts,
}

impl Metrics {
    /// Derives every measure from the match counts and rule shape.
    ///
    /// Ratios with a zero denominator are defined as 0. An empty table
    /// yields all-zero count-based measures.
    pub fn from_counts(counts: MatchCounts, shape: RuleShape) -> Self {
        let len = shape.antecedent + shape.consequent;
        let inclusion = ratio(len as f64, shape.attributes as f64);
        let amplitude = if len == 0 {
            0.0
        } else {
            1.0 - shape.width_ratio_sum / len as f64
        };
        let comprehensibility = ratio(
            (1.0 + shape.consequent as f64).ln(),
            (1.0 + len as f64).ln(),
        );

        if counts.total == 0 {
            return Self {
                amplitude,
                inclusion,
                comprehensibility,
                counts,
                ..Self::default()
            };
        }

        let n = counts.total as f64;
        let support = counts.both as f64 / n;
        let coverage = counts.antecedent as f64 / n;
        let rhs_support = counts.consequent as f64 / n;
        let confidence = ratio(counts.both as f64, counts.antecedent as f64);

        let lift = ratio(support, coverage * rhs_support);
        let conviction = (1.0 - rhs_support) / (1.0 - confidence + EPS);
        let interestingness = ratio(support, rhs_support)
            * ratio(support, coverage)
            * (1.0 - support / n);
        let netconf = ratio(
            support - coverage * rhs_support,
            coverage * (1.0 - coverage + EPS),
        );

        // Both factors of the denominator are non-positive, so the odds
        // ratio is never negative.
        let full = counts.both as f64;
        let odds = full * (n - full)
            / ((full - counts.consequent as f64) * (full - counts.antecedent as f64) + EPS);
        let yulesq = (odds - 1.0) / (odds + 1.0);

        Self {
            support,
            confidence,
            lift,
            coverage,
            rhs_support,
            conviction,
            amplitude,
            inclusion,
            interestingness,
            comprehensibility,
            netconf,
            yulesq,
            counts,
        }
    }

    /// Value of `metric`.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Support => self.support,
            Metric::Confidence => self.confidence,
            Metric::Lift => self.lift,
            Metric::Coverage => self.coverage,
            Metric::RhsSupport => self.rhs_support,
            Metric::Conviction => self.conviction,
            Metric::Amplitude => self.amplitude,
            Metric::Inclusion => self.inclusion,
            Metric::Interestingness => self.interestingness,
            Metric::Comprehensibility => self.comprehensibility,
            Metric::Netconf => self.netconf,
            Metric::YulesQ => self.yulesq,
        }
    }
}

#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> RuleShape {
        RuleShape {
            antecedent: 1,
            consequent: 1,
            attributes: 4,
            width_ratio_sum: 0.5,
        }
    }

    #[test]
    fn test_basic_ratios() {
        let counts = MatchCounts {
            antecedent: 4,
            consequent: 5,
            both: 3,
            total: 10,
        };
        let m = Metrics::from_counts(counts, shape());
        assert!((m.support - 0.3).abs() < 1e-12);
        assert!((m.confidence - 0.75).abs() < 1e-12);
        assert!((m.coverage - 0.4).abs() < 1e-12);
        assert!((m.rhs_support - 0.5).abs() < 1e-12);
        assert!((m.lift - 0.3 / (0.4 * 0.5)).abs() < 1e-12);
        assert!((m.inclusion - 0.5).abs() < 1e-12);
        assert!((m.amplitude - 0.75).abs() < 1e-12);
        assert!((m.comprehensibility - 2f64.ln() / 3f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_interestingness_damps_by_support_per_transaction() {
        let counts = MatchCounts {
            antecedent: 4,
            consequent: 5,
            both: 3,
            total: 10,
        };
        let m = Metrics::from_counts(counts, shape());
        // (0.3 / 0.5) * (0.3 / 0.4) * (1 - 0.3 / 10)
        assert!((m.interestingness - 0.4365).abs() < 1e-12);
    }

    #[test]
    fn test_yulesq_from_odds_ratio() {
        let counts = MatchCounts {
            antecedent: 4,
            consequent: 5,
            both: 3,
            total: 10,
        };
        let m = Metrics::from_counts(counts, shape());
        // odds = 3 * 7 / ((3 - 5) * (3 - 4)) = 10.5
        assert!((m.yulesq - 9.5 / 11.5).abs() < 1e-12);

        // No co-occurrence at all.
        let disjoint = MatchCounts {
            antecedent: 4,
            consequent: 5,
            both: 0,
            total: 10,
        };
        assert_eq!(Metrics::from_counts(disjoint, shape()).yulesq, -1.0);

        // Antecedent and consequent always together: odds ratio blows up.
        let nested = MatchCounts {
            antecedent: 4,
            consequent: 4,
            both: 4,
            total: 10,
        };
        assert!((Metrics::from_counts(nested, shape()).yulesq - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_antecedent_matches() {
        let counts = MatchCounts {
            antecedent: 0,
            consequent: 5,
            both: 0,
            total: 10,
        };
        let m = Metrics::from_counts(counts, shape());
        assert_eq!(m.support, 0.0);
        assert_eq!(m.confidence, 0.0);
        assert_eq!(m.lift, 0.0);
        assert_eq!(m.netconf, 0.0);
        assert_eq!(m.interestingness, 0.0);
        assert!(m.conviction.is_finite());
    }

    #[test]
    fn test_empty_table() {
        let m = Metrics::from_counts(MatchCounts::default(), shape());
        assert_eq!(m.support, 0.0);
        assert_eq!(m.confidence, 0.0);
        assert!((m.inclusion - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_values_finite() {
        for (ante, cons, both) in [(10, 10, 10), (10, 0, 0), (0, 0, 0), (3, 10, 3)] {
            let counts = MatchCounts {
                antecedent: ante,
                consequent: cons,
                both,
                total: 10,
            };
            let m = Metrics::from_counts(counts, shape());
            for metric in Metric::ALL {
                assert!(m.get(metric).is_finite(), "{metric} not finite");
            }
        }
    }

    #[test]
    fn test_metric_names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.name().parse::<Metric>(), Ok(metric));
        }
        assert!("nope".parse::<Metric>().is_err());
    }
}
