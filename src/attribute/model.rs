//! Validated, immutable attribute model.

use super::types::{Attribute, AttributeKind};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Number of scalars each attribute occupies in a candidate vector.
///
/// Slot 0 is the inclusion threshold, slot 1 the side assignment, and
/// slots 2..5 are shape scalars. Categorical attributes read one shape
/// scalar, numeric attributes read two; the third shape slot is not read by
/// any kind.
pub const SLOTS_PER_ATTRIBUTE: usize = 5;

/// The validated set of attributes a mining run works over.
///
/// Built once and shared read-only by the decoder, the evaluator, and the
/// transaction table. Construction fails for an empty attribute list,
/// duplicate names, empty domains, non-finite bounds, or inverted ranges.
///
/// # Examples
///
/// ```
/// use numarm::attribute::{Attribute, AttributeModel};
///
/// let model = AttributeModel::new(vec![
///     Attribute::categorical("outlook", ["sunny", "rain"]),
///     Attribute::real("temperature", -10.0, 40.0),
/// ])
/// .unwrap();
///
/// assert_eq!(model.len(), 2);
/// assert_eq!(model.vector_len(), 10);
/// assert_eq!(model.index_of("temperature"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct AttributeModel {
    attributes: Vec<Attribute>,
    by_name: HashMap<String, usize>,
}

impl AttributeModel {
    /// Validates and normalizes the attributes.
    ///
    /// Category labels are sorted and deduplicated.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        if attributes.is_empty() {
            return Err(Error::NoAttributes);
        }

        let mut by_name = HashMap::with_capacity(attributes.len());
        let mut normalized = Vec::with_capacity(attributes.len());

        for (idx, mut attr) in attributes.into_iter().enumerate() {
            match &mut attr.kind {
                AttributeKind::Categorical { categories } => {
                    categories.sort();
                    categories.dedup();
                    if categories.is_empty() {
                        return Err(Error::EmptyDomain(attr.name));
                    }
                }
                AttributeKind::Integer { min, max } => {
                    if min > max {
                        return Err(Error::InvalidRange {
                            name: attr.name,
                            min: *min as f64,
                            max: *max as f64,
                        });
                    }
                }
                AttributeKind::Real { min, max } => {
                    if !min.is_finite() || !max.is_finite() {
                        return Err(Error::NonFiniteBound(attr.name));
                    }
                    if min > max {
                        return Err(Error::InvalidRange {
                            name: attr.name,
                            min: *min,
                            max: *max,
                        });
                    }
                }
            }

            if by_name.insert(attr.name.clone(), idx).is_some() {
                return Err(Error::DuplicateAttribute(attr.name));
            }
            normalized.push(attr);
        }

        tracing::debug!(
            attributes = normalized.len(),
            numeric = normalized.iter().filter(|a| a.kind.is_numeric()).count(),
            "attribute model built"
        );

        Ok(Self {
            attributes: normalized,
            by_name,
        })
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Always `false`; an empty model cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The attribute at `idx`, if any.
    pub fn attribute(&self, idx: usize) -> Option<&Attribute> {
        self.attributes.get(idx)
    }

    /// All attributes in canonical (dataset) order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Index of the attribute called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Index of `label` within categorical attribute `idx`.
    pub fn category_index(&self, idx: usize, label: &str) -> Option<usize> {
        self.attributes
            .get(idx)?
            .kind
            .categories()?
            .binary_search_by(|c| c.as_str().cmp(label))
            .ok()
    }

    /// Length of a candidate vector encoding a rule over this model.
    pub fn vector_len(&self) -> usize {
        self.attributes.len() * SLOTS_PER_ATTRIBUTE
    }
}
