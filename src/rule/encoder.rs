//! Rule → candidate vector.

use super::config::DecoderConfig;
use super::decoder::{scale, SlotStrategy};
use super::types::{Condition, Rule, Selector};
use crate::attribute::{AttributeModel, SLOTS_PER_ATTRIBUTE};
use crate::error::{Error, Result};

/// Produces a canonical candidate vector for a known rule.
///
/// The vector decodes back to an equal rule under the same
/// [`DecoderConfig`]. Categorical and integer selectors come back exactly.
/// A real bound comes back exactly when some scalar decodes onto it;
/// otherwise it comes back as the nearest decodable value, one rounding step
/// away, and the seeded rule will not compare equal to the one passed in. Useful for seeding an optimizer with
/// rules a domain expert already knows.
#[derive(Debug, Clone)]
pub struct RuleEncoder<'a> {
    model: &'a AttributeModel,
    strategies: Vec<SlotStrategy>,
    config: DecoderConfig,
}

impl<'a> RuleEncoder<'a> {
    pub fn new(model: &'a AttributeModel, config: DecoderConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self {
            model,
            strategies: model
                .attributes()
                .iter()
                .map(|a| SlotStrategy::from_kind(&a.kind))
                .collect(),
            config,
        })
    }

    /// Encodes `rule`, failing if it is invalid or does not fit the model.
    pub fn encode(&self, rule: &Rule) -> Result<Vec<f64>> {
        if rule.antecedent.is_empty() {
            return Err(Error::InvalidRule("empty antecedent"));
        }
        if rule.consequent.is_empty() {
            return Err(Error::InvalidRule("empty consequent"));
        }
        if !rule.is_valid() {
            return Err(Error::InvalidRule("attribute used more than once"));
        }

        let mut vector = vec![0.0; self.model.vector_len()];
        let included = (self.config.inclusion_threshold + 1.0) / 2.0;
        let antecedent_side = self.config.side_threshold / 2.0;
        let consequent_side = (self.config.side_threshold + 1.0) / 2.0;

        for (selector, side) in rule
            .antecedent
            .iter()
            .map(|s| (s, antecedent_side))
            .chain(rule.consequent.iter().map(|s| (s, consequent_side)))
        {
            let base = selector.attribute * SLOTS_PER_ATTRIBUTE;
            let slots = vector
                .get_mut(base..base + SLOTS_PER_ATTRIBUTE)
                .ok_or(Error::UnknownAttribute(selector.attribute))?;
            slots[0] = included;
            slots[1] = side;
            self.encode_shape(selector, &mut slots[2..])?;
        }

        Ok(vector)
    }

    fn encode_shape(&self, selector: &Selector, shape: &mut [f64]) -> Result<()> {
        let name = || self.model.attributes()[selector.attribute].name.clone();
        match (self.strategies[selector.attribute], selector.condition) {
            (SlotStrategy::Category { size }, Condition::Category(idx)) => {
                if idx >= size {
                    return Err(Error::CategoryOutOfDomain(name()));
                }
                // Bucket midpoint, so floor(t * size) lands back on idx.
                shape[0] = (idx as f64 + 0.5) / size as f64;
            }
            (SlotStrategy::Interval { min, max, integral }, Condition::Interval { lo, hi }) => {
                if !(min <= lo && lo <= hi && hi <= max) {
                    return Err(Error::IntervalOutOfRange(name()));
                }
                if integral && (lo.fract() != 0.0 || hi.fract() != 0.0) {
                    return Err(Error::IntervalOutOfRange(name()));
                }
                shape[0] = position(min, max, lo);
                shape[1] = position(min, max, hi);
            }
            (SlotStrategy::Category { .. }, Condition::Interval { .. }) => {
                return Err(Error::IntervalOutOfRange(name()));
            }
            (SlotStrategy::Interval { .. }, Condition::Category(_)) => {
                return Err(Error::CategoryOutOfDomain(name()));
            }
        }
        Ok(())
    }
}

/// The scalar `t` in `[0, 1]` whose decoded position lies closest to `x`.
///
/// Exact whenever some `t` maps onto `x`.
fn position(min: f64, max: f64, x: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    // Bit patterns of non-negative floats sort like the floats themselves,
    // and `scale` is monotone in `t`.
    let (mut lo, mut hi) = (0u64, 1f64.to_bits());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if scale(min, max, f64::from_bits(mid)) < x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    let t = f64::from_bits(lo);
    if lo > 0 {
        let below = f64::from_bits(lo - 1);
        if x - scale(min, max, below) < scale(min, max, t) - x {
            return below;
        }
    }
    t
}
