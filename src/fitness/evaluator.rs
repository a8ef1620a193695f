//! Scores rules against the transaction table.

use super::config::FitnessConfig;
use super::metrics::{MatchCounts, Metrics, RuleShape};
use crate::attribute::AttributeModel;
use crate::error::{Error, Result};
use crate::rule::{Condition, Decoded, Rule, Selector};
use crate::transaction::{Column, TransactionTable};

/// A selector resolved against its column.
enum Matcher<'t> {
    Category(&'t [u32], u32),
    Interval(&'t [f64], f64, f64),
    /// Selector kind does not fit the column; matches nothing.
    Never,
}

impl Matcher<'_> {
    #[inline]
    fn matches(&self, row: usize) -> bool {
        match *self {
            Matcher::Category(cells, value) => cells[row] == value,
            Matcher::Interval(cells, lo, hi) => {
                let v = cells[row];
                lo <= v && v <= hi
            }
            Matcher::Never => false,
        }
    }
}

/// Stateless rule scorer.
///
/// Every call scans the full table once, costing
/// `O(transactions × rule length)`; nothing is cached between calls, so any
/// number of threads can share one evaluator.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    ranges: Vec<Option<(f64, f64)>>,
    config: FitnessConfig,
}

impl FitnessEvaluator {
    /// Creates an evaluator for rules over `model`.
    pub fn new(model: &AttributeModel, config: FitnessConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self {
            ranges: model.attributes().iter().map(|a| a.kind.bounds()).collect(),
            config,
        })
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    /// Counts antecedent, consequent, and full-rule matches in one pass.
    pub fn count(&self, rule: &Rule, table: &TransactionTable) -> MatchCounts {
        let antecedent: Vec<Matcher<'_>> = rule.antecedent.iter().map(|s| matcher(s, table)).collect();
        let consequent: Vec<Matcher<'_>> = rule.consequent.iter().map(|s| matcher(s, table)).collect();

        let mut counts = MatchCounts {
            total: table.len(),
            ..MatchCounts::default()
        };
        for row in 0..table.len() {
            let a = antecedent.iter().all(|p| p.matches(row));
            let c = consequent.iter().all(|p| p.matches(row));
            counts.antecedent += a as usize;
            counts.consequent += c as usize;
            counts.both += (a && c) as usize;
        }
        counts
    }

    /// Computes all metrics of `rule`.
    pub fn metrics(&self, rule: &Rule, table: &TransactionTable) -> Metrics {
        let counts = self.count(rule, table);
        let width_ratio_sum = rule
            .selectors()
            .filter_map(|s| {
                let Condition::Interval { lo, hi } = s.condition else {
                    return None;
                };
                // An empty table has no observed spread; fall back to the
                // declared range.
                let (min, max) = table
                    .observed_range(s.attribute)
                    .or_else(|| self.ranges.get(s.attribute).copied().flatten())?;
                // A column holding one value can only be selected whole.
                Some(if max > min { (hi - lo) / (max - min) } else { 1.0 })
            })
            .sum();
        Metrics::from_counts(
            counts,
            RuleShape {
                antecedent: rule.antecedent.len(),
                consequent: rule.consequent.len(),
                attributes: self.ranges.len(),
                width_ratio_sum,
            },
        )
    }

    /// Oriented scalar fitness of already-computed metrics.
    pub fn fitness(&self, metrics: &Metrics) -> f64 {
        let f = self.config.fitness(metrics);
        if f.is_nan() {
            self.worst()
        } else {
            f
        }
    }

    /// Scores a decoding outcome: metrics and fitness for a rule, the worst
    /// fitness and no metrics for an invalid outcome.
    pub fn score(&self, decoded: &Decoded, table: &TransactionTable) -> (f64, Option<Metrics>) {
        match decoded.rule() {
            Some(rule) if rule.is_valid() => {
                let metrics = self.metrics(rule, table);
                (self.fitness(&metrics), Some(metrics))
            }
            _ => (self.worst(), None),
        }
    }

    /// The worst-fitness sentinel.
    pub fn worst(&self) -> f64 {
        self.config.worst()
    }
}

fn matcher<'t>(selector: &Selector, table: &'t TransactionTable) -> Matcher<'t> {
    match (table.column(selector.attribute), selector.condition) {
        (Some(Column::Categorical(cells)), Condition::Category(idx)) => match u32::try_from(idx) {
            Ok(value) => Matcher::Category(cells, value),
            Err(_) => Matcher::Never,
        },
        (Some(Column::Numeric(cells)), Condition::Interval { lo, hi }) => {
            Matcher::Interval(cells, lo, hi)
        }
        _ => Matcher::Never,
    }
}
