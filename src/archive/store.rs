//! Thread-safe, deduplicating rule store.

use super::types::ArchiveEntry;
use crate::fitness::{Metric, Metrics};
use crate::rule::Rule;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    seen: HashSet<Rule>,
    entries: Vec<ArchiveEntry>,
}

/// Every distinct valid rule seen during one mining run.
///
/// The archive only grows. [`record`](Self::record) performs the duplicate
/// check and the insert under one lock, so two threads recording the same
/// new rule at once still produce a single entry. The first metrics
/// recorded for a rule are kept.
///
/// # Examples
///
/// ```
/// use numarm::archive::RuleArchive;
/// use numarm::fitness::Metrics;
/// use numarm::rule::{Rule, Selector};
///
/// let archive = RuleArchive::new();
/// let rule = Rule::new(vec![Selector::category(0, 1)], vec![Selector::interval(1, 0.0, 2.0)]);
///
/// assert!(archive.record(&rule, Metrics::default(), 0.4));
/// assert!(!archive.record(&rule, Metrics::default(), 0.9));
/// assert_eq!(archive.len(), 1);
/// assert_eq!(archive.all()[0].fitness, 0.4);
/// ```
#[derive(Debug, Default)]
pub struct RuleArchive {
    inner: Mutex<Inner>,
}

impl RuleArchive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Inserts leave `Inner` consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `rule` unless it is invalid or already present.
    ///
    /// Returns `true` if a new entry was inserted.
    pub fn record(&self, rule: &Rule, metrics: Metrics, fitness: f64) -> bool {
        if !rule.is_valid() {
            return false;
        }
        let mut inner = self.lock();
        if inner.seen.contains(rule) {
            return false;
        }
        inner.seen.insert(rule.clone());
        inner.entries.push(ArchiveEntry {
            rule: rule.clone(),
            metrics,
            fitness,
        });
        tracing::trace!(
            entries = inner.entries.len(),
            support = metrics.support,
            confidence = metrics.confidence,
            "archived new rule"
        );
        true
    }

    /// Returns `true` if an equal rule has been recorded.
    pub fn contains(&self, rule: &Rule) -> bool {
        self.lock().seen.contains(rule)
    }

    /// Number of distinct rules.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all entries in insertion order.
    pub fn all(&self) -> Vec<ArchiveEntry> {
        self.lock().entries.clone()
    }

    /// Consumes the archive, returning its entries in insertion order.
    pub fn into_entries(self) -> Vec<ArchiveEntry> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
    }

    /// Snapshot sorted by `metric`, best (highest) first. Ties keep
    /// insertion order.
    pub fn sorted_by(&self, metric: Metric) -> Vec<ArchiveEntry> {
        let mut entries = self.all();
        entries.sort_by(|a, b| b.metric(metric).total_cmp(&a.metric(metric)));
        entries
    }

    /// The entry with the highest `metric`, earliest on ties.
    pub fn best_by(&self, metric: Metric) -> Option<ArchiveEntry> {
        self.sorted_by(metric).into_iter().next()
    }

    /// Mean of `metric` over all entries, 0 when empty.
    pub fn mean(&self, metric: Metric) -> f64 {
        let inner = self.lock();
        if inner.entries.is_empty() {
            return 0.0;
        }
        inner.entries.iter().map(|e| e.metric(metric)).sum::<f64>() / inner.entries.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Selector;
    use std::sync::Arc;

    fn rule(category: usize) -> Rule {
        Rule::new(
            vec![Selector::category(0, category)],
            vec![Selector::interval(1, 0.0, 1.0)],
        )
    }

    fn with_support(support: f64) -> Metrics {
        Metrics {
            support,
            ..Metrics::default()
        }
    }

    #[test]
    fn test_record_dedups() {
        let archive = RuleArchive::new();
        assert!(archive.record(&rule(0), with_support(0.1), 0.1));
        assert!(archive.record(&rule(1), with_support(0.2), 0.2));
        assert!(!archive.record(&rule(0), with_support(0.9), 0.9));
        assert_eq!(archive.len(), 2);
        assert!((archive.all()[0].metrics.support - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_order_independent_equality() {
        let archive = RuleArchive::new();
        let a = Rule::new(
            vec![Selector::category(0, 0), Selector::category(2, 1)],
            vec![Selector::interval(1, 0.0, 1.0)],
        );
        let b = Rule::new(
            vec![Selector::category(2, 1), Selector::category(0, 0)],
            vec![Selector::interval(1, 0.0, 1.0)],
        );
        assert!(archive.record(&a, Metrics::default(), 0.0));
        assert!(!archive.record(&b, Metrics::default(), 0.0));
        assert!(archive.contains(&b));
    }

    #[test]
    fn test_invalid_rule_is_ignored() {
        let archive = RuleArchive::new();
        let invalid = Rule::new(vec![], vec![Selector::category(0, 0)]);
        assert!(!archive.record(&invalid, Metrics::default(), 0.0));
        assert!(archive.is_empty());
    }

    #[test]
    fn test_insertion_order_and_sorting() {
        let archive = RuleArchive::new();
        archive.record(&rule(0), with_support(0.2), 0.0);
        archive.record(&rule(1), with_support(0.5), 0.0);
        archive.record(&rule(2), with_support(0.2), 0.0);

        let inserted: Vec<f64> = archive.all().iter().map(|e| e.metrics.support).collect();
        assert_eq!(inserted, vec![0.2, 0.5, 0.2]);

        let sorted = archive.sorted_by(Metric::Support);
        assert_eq!(sorted[0].rule, rule(1));
        assert_eq!(sorted[1].rule, rule(0));
        assert_eq!(sorted[2].rule, rule(2));

        assert_eq!(archive.best_by(Metric::Support).unwrap().rule, rule(1));
        assert!((archive.mean(Metric::Support) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_empty_archive() {
        let archive = RuleArchive::new();
        assert!(archive.best_by(Metric::Confidence).is_none());
        assert_eq!(archive.mean(Metric::Confidence), 0.0);
        assert!(archive.into_entries().is_empty());
    }

    #[test]
    fn test_concurrent_record_same_rule() {
        let archive = Arc::new(RuleArchive::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let archive = Arc::clone(&archive);
                std::thread::spawn(move || {
                    (0..100)
                        .filter(|i| archive.record(&rule(i % 5), Metrics::default(), 0.0))
                        .count()
                })
            })
            .collect();
        let inserted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(inserted, 5);
        assert_eq!(archive.len(), 5);
    }
}
