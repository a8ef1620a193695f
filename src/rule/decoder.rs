//! Candidate vector → rule.

use super::config::DecoderConfig;
use super::types::{Rule, Selector};
use crate::attribute::{AttributeKind, AttributeModel, SLOTS_PER_ATTRIBUTE};
use crate::error::{Error, Result};

/// Why a vector decoded to no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Fewer than two attributes passed the inclusion threshold.
    TooFewAttributes,
    /// Every participating attribute landed in the consequent.
    EmptyAntecedent,
    /// Every participating attribute landed in the antecedent.
    EmptyConsequent,
}

/// Outcome of decoding a candidate vector.
///
/// `Invalid` is an ordinary result of searching a continuous space, not an
/// error; it is scored with the worst fitness.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A structurally valid rule.
    Rule(Rule),
    /// No rule; the reason is kept for diagnostics and tests.
    Invalid(InvalidReason),
}

impl Decoded {
    /// The decoded rule, if valid.
    pub fn rule(&self) -> Option<&Rule> {
        match self {
            Decoded::Rule(rule) => Some(rule),
            Decoded::Invalid(_) => None,
        }
    }

    /// Consumes `self`, returning the rule if valid.
    pub fn into_rule(self) -> Option<Rule> {
        match self {
            Decoded::Rule(rule) => Some(rule),
            Decoded::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Decoded::Rule(_))
    }
}

/// Per-attribute decode strategy, resolved once from the attribute kind.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SlotStrategy {
    Category { size: usize },
    Interval { min: f64, max: f64, integral: bool },
}

impl SlotStrategy {
    pub(crate) fn from_kind(kind: &AttributeKind) -> Self {
        match *kind {
            AttributeKind::Categorical { ref categories } => SlotStrategy::Category {
                size: categories.len(),
            },
            AttributeKind::Integer { min, max } => SlotStrategy::Interval {
                min: min as f64,
                max: max as f64,
                integral: true,
            },
            AttributeKind::Real { min, max } => SlotStrategy::Interval {
                min,
                max,
                integral: false,
            },
        }
    }

    /// Builds the selector for attribute `idx` from its shape scalars.
    fn selector(&self, idx: usize, shape: &[f64]) -> Selector {
        match *self {
            SlotStrategy::Category { size } => {
                let pos = (unit(shape[0]) * size as f64).floor() as usize;
                Selector::category(idx, pos.min(size - 1))
            }
            SlotStrategy::Interval { min, max, integral } => {
                let (a, b) = (unit(shape[0]), unit(shape[1]));
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let mut lo = scale(min, max, lo);
                let mut hi = scale(min, max, hi);
                if integral {
                    lo = lo.round();
                    hi = hi.round();
                }
                Selector::interval(idx, lo.clamp(min, max), hi.clamp(min, max))
            }
        }
    }
}

/// Position `t` of the range `[min, max]`.
#[inline]
pub(crate) fn scale(min: f64, max: f64, t: f64) -> f64 {
    min + t * (max - min)
}

/// Maps a scalar into `[0, 1]`; NaN counts as 0.
#[inline]
pub(crate) fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Deterministic decoder from candidate vectors to rules.
///
/// Each attribute owns [`SLOTS_PER_ATTRIBUTE`] consecutive scalars:
///
/// | slot | meaning |
/// |------|---------|
/// | 0 | inclusion: participates iff `> inclusion_threshold` |
/// | 1 | side: antecedent iff `< side_threshold` |
/// | 2 | categorical: category position; numeric: first interval end |
/// | 3 | numeric: second interval end |
/// | 4 | unused |
///
/// Selectors appear in dataset attribute order on both sides. Identical
/// vectors always decode to identical rules.
///
/// # Examples
///
/// ```
/// use numarm::attribute::{Attribute, AttributeModel};
/// use numarm::rule::{Decoded, DecoderConfig, RuleDecoder};
///
/// let model = AttributeModel::new(vec![
///     Attribute::categorical("kind", ["A", "B"]),
///     Attribute::real("x", 0.0, 10.0),
/// ])
/// .unwrap();
/// let decoder = RuleDecoder::new(&model, DecoderConfig::default()).unwrap();
///
/// let v = [0.9, 0.1, 0.2, 0.0, 0.0, 0.9, 0.9, 0.5, 1.0, 0.0];
/// let Decoded::Rule(rule) = decoder.decode(&v).unwrap() else { panic!() };
/// assert_eq!(rule.display(&model).to_string(), "[kind = A] => [x in [5, 10]]");
/// ```
#[derive(Debug, Clone)]
pub struct RuleDecoder {
    strategies: Vec<SlotStrategy>,
    config: DecoderConfig,
}

impl RuleDecoder {
    /// Creates a decoder for `model`.
    pub fn new(model: &AttributeModel, config: DecoderConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self {
            strategies: model
                .attributes()
                .iter()
                .map(|a| SlotStrategy::from_kind(&a.kind))
                .collect(),
            config,
        })
    }

    /// Required candidate vector length.
    pub fn dimension(&self) -> usize {
        self.strategies.len() * SLOTS_PER_ATTRIBUTE
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes `vector` into a rule or an [`Decoded::Invalid`] marker.
    ///
    /// Only a wrong vector length is an error. Scalars outside `[0, 1]` are
    /// clamped.
    pub fn decode(&self, vector: &[f64]) -> Result<Decoded> {
        if vector.len() != self.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.dimension(),
                actual: vector.len(),
            });
        }

        let mut antecedent = Vec::new();
        let mut consequent = Vec::new();

        for (idx, (strategy, slots)) in self
            .strategies
            .iter()
            .zip(vector.chunks_exact(SLOTS_PER_ATTRIBUTE))
            .enumerate()
        {
            if unit(slots[0]) <= self.config.inclusion_threshold {
                continue;
            }
            let selector = strategy.selector(idx, &slots[2..]);
            if unit(slots[1]) < self.config.side_threshold {
                antecedent.push(selector);
            } else {
                consequent.push(selector);
            }
        }

        let decoded = if antecedent.len() + consequent.len() < 2 {
            Decoded::Invalid(InvalidReason::TooFewAttributes)
        } else if antecedent.is_empty() {
            Decoded::Invalid(InvalidReason::EmptyAntecedent)
        } else if consequent.is_empty() {
            Decoded::Invalid(InvalidReason::EmptyConsequent)
        } else {
            Decoded::Rule(Rule::new(antecedent, consequent))
        };
        Ok(decoded)
    }
}
