//! Fitness evaluation.
//!
//! Counts how many transactions a rule's antecedent, consequent, and whole
//! body match, derives support, confidence, and a set of interestingness
//! measures from those counts, and blends them into one scalar.
//!
//! # References
//!
//! - Fister, Iglesias, Galvez & Fister Jr. (2018), "Differential evolution
//!   for association rule mining using categorical and numerical attributes"
//! - Tan, Kumar & Srivastava (2004), "Selecting the right objective measure
//!   for association analysis"

mod config;
mod evaluator;
mod metrics;

pub use config::{FitnessConfig, Orientation};
pub use evaluator::FitnessEvaluator;
pub use metrics::{MatchCounts, Metric, Metrics, RuleShape};
