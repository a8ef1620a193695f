//! Selectors and rules.

use crate::attribute::{AttributeKind, AttributeModel};
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The condition one selector places on its attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Condition {
    /// Exact match on the category at this index of the attribute's
    /// (sorted) domain.
    Category(usize),

    /// Closed interval `[lo, hi]` on a numeric attribute.
    Interval {
        /// Lower bound, inclusive.
        lo: f64,
        /// Upper bound, inclusive.
        hi: f64,
    },
}

/// One attribute's condition within a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Selector {
    /// Attribute index in the model.
    pub attribute: usize,
    /// The condition on that attribute.
    pub condition: Condition,
}

impl Selector {
    /// Selects category `index` of attribute `attribute`.
    pub fn category(attribute: usize, index: usize) -> Self {
        Self {
            attribute,
            condition: Condition::Category(index),
        }
    }

    /// Selects values of `attribute` within `[lo, hi]`.
    pub fn interval(attribute: usize, lo: f64, hi: f64) -> Self {
        Self {
            attribute,
            condition: Condition::Interval { lo, hi },
        }
    }

    /// Order-independent identity of this selector.
    fn key(&self) -> SelectorKey {
        match self.condition {
            Condition::Category(idx) => (self.attribute, 0, idx as u64, 0),
            // `+ 0.0` folds -0.0 into 0.0 so equal bounds hash equally.
            Condition::Interval { lo, hi } => {
                (self.attribute, 1, (lo + 0.0).to_bits(), (hi + 0.0).to_bits())
            }
        }
    }
}

type SelectorKey = (usize, u8, u64, u64);

/// An association rule `antecedent => consequent`.
///
/// Selector order is kept for display. Equality and hashing ignore order:
/// two rules are equal iff their antecedent selector sets are equal and
/// their consequent selector sets are equal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// The "if" side.
    pub antecedent: Vec<Selector>,
    /// The "then" side.
    pub consequent: Vec<Selector>,
}

impl Rule {
    /// Creates a rule. Use [`Rule::is_valid`] to check its structure.
    pub fn new(antecedent: Vec<Selector>, consequent: Vec<Selector>) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    /// Total number of selectors.
    pub fn len(&self) -> usize {
        self.antecedent.len() + self.consequent.len()
    }

    /// Returns `true` if the rule has no selectors at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All selectors, antecedent first.
    pub fn selectors(&self) -> impl Iterator<Item = &Selector> {
        self.antecedent.iter().chain(self.consequent.iter())
    }

    /// A rule is valid when both sides are non-empty and no attribute
    /// appears more than once across them.
    pub fn is_valid(&self) -> bool {
        if self.antecedent.is_empty() || self.consequent.is_empty() {
            return false;
        }
        // Pairwise; rules are short and this runs once per evaluation.
        self.selectors()
            .enumerate()
            .all(|(i, a)| self.selectors().skip(i + 1).all(|b| b.attribute != a.attribute))
    }

    /// Formats the rule with attribute names and category labels.
    pub fn display<'a>(&'a self, model: &'a AttributeModel) -> RuleDisplay<'a> {
        RuleDisplay { rule: self, model }
    }

    fn canonical(&self) -> (Vec<SelectorKey>, Vec<SelectorKey>) {
        let side = |selectors: &[Selector]| {
            let mut keys: Vec<SelectorKey> = selectors.iter().map(Selector::key).collect();
            keys.sort_unstable();
            keys
        };
        (side(&self.antecedent), side(&self.consequent))
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.antecedent.len() == other.antecedent.len()
            && self.consequent.len() == other.consequent.len()
            && self.canonical() == other.canonical()
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

/// [`fmt::Display`] adapter returned by [`Rule::display`].
pub struct RuleDisplay<'a> {
    rule: &'a Rule,
    model: &'a AttributeModel,
}

impl RuleDisplay<'_> {
    fn write_side(&self, f: &mut fmt::Formatter<'_>, side: &[Selector]) -> fmt::Result {
        f.write_str("[")?;
        for (i, sel) in side.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let Some(attr) = self.model.attribute(sel.attribute) else {
                write!(f, "#{}(?)", sel.attribute)?;
                continue;
            };
            match (&attr.kind, sel.condition) {
                (AttributeKind::Categorical { categories }, Condition::Category(idx)) => {
                    match categories.get(idx) {
                        Some(label) => write!(f, "{} = {}", attr.name, label)?,
                        None => write!(f, "{} = #{}", attr.name, idx)?,
                    }
                }
                (_, Condition::Category(idx)) => write!(f, "{} = #{}", attr.name, idx)?,
                (_, Condition::Interval { lo, hi }) => {
                    write!(f, "{} in [{}, {}]", attr.name, lo, hi)?
                }
            }
        }
        f.write_str("]")
    }
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_side(f, &self.rule.antecedent)?;
        f.write_str(" => ")?;
        self.write_side(f, &self.rule.consequent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_order() {
        let a = Rule::new(
            vec![Selector::category(0, 1), Selector::interval(2, 1.0, 3.0)],
            vec![Selector::category(1, 0)],
        );
        let b = Rule::new(
            vec![Selector::interval(2, 1.0, 3.0), Selector::category(0, 1)],
            vec![Selector::category(1, 0)],
        );
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_sides_are_not_interchangeable() {
        let a = Rule::new(vec![Selector::category(0, 0)], vec![Selector::category(1, 0)]);
        let b = Rule::new(vec![Selector::category(1, 0)], vec![Selector::category(0, 0)]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_signed_zero_bounds_are_equal() {
        let a = Rule::new(vec![Selector::interval(0, -0.0, 1.0)], vec![Selector::category(1, 0)]);
        let b = Rule::new(vec![Selector::interval(0, 0.0, 1.0)], vec![Selector::category(1, 0)]);
        assert_eq!(a, b);
        let set: HashSet<Rule> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_validity() {
        assert!(Rule::new(vec![Selector::category(0, 0)], vec![Selector::category(1, 0)]).is_valid());
        assert!(!Rule::new(vec![], vec![Selector::category(1, 0)]).is_valid());
        assert!(!Rule::new(vec![Selector::category(0, 0)], vec![]).is_valid());
        assert!(!Rule::new(vec![Selector::category(0, 0)], vec![Selector::category(0, 1)]).is_valid());
    }

    #[test]
    fn test_display() {
        let model = AttributeModel::new(vec![
            Attribute::categorical("kind", ["A", "B"]),
            Attribute::real("x", 0.0, 10.0),
        ])
        .unwrap();
        let rule = Rule::new(
            vec![Selector::category(0, 0)],
            vec![Selector::interval(1, 5.0, 10.0)],
        );
        assert_eq!(rule.display(&model).to_string(), "[kind = A] => [x in [5, 10]]");
    }
}
