//! Attribute descriptions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The type of a dataset column, together with its domain or range.
///
/// This is a closed set: every consumer matches on it once (the decoder
/// turns it into a per-attribute strategy at construction time) instead of
/// inspecting values at runtime.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeKind {
    /// A finite set of category labels.
    ///
    /// Order is irrelevant to callers; [`super::AttributeModel`] sorts and
    /// deduplicates the labels so decoding does not depend on the order they
    /// were supplied in.
    Categorical {
        /// Category labels.
        categories: Vec<String>,
    },

    /// Integers in `[min, max]`, both inclusive.
    Integer {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },

    /// Reals in `[min, max]`, both inclusive.
    Real {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl AttributeKind {
    /// Returns `true` for integer and real attributes.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, AttributeKind::Categorical { .. })
    }

    /// Numeric bounds as `f64`, or `None` for categorical attributes.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            AttributeKind::Categorical { .. } => None,
            AttributeKind::Integer { min, max } => Some((min as f64, max as f64)),
            AttributeKind::Real { min, max } => Some((min, max)),
        }
    }

    /// Category labels, or `None` for numeric attributes.
    pub fn categories(&self) -> Option<&[String]> {
        match self {
            AttributeKind::Categorical { categories } => Some(categories),
            _ => None,
        }
    }

    /// Short name of the kind, used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::Categorical { .. } => "categorical",
            AttributeKind::Integer { .. } => "integer",
            AttributeKind::Real { .. } => "real",
        }
    }
}

/// One column of the transaction database.
///
/// # Examples
///
/// ```
/// use numarm::attribute::Attribute;
///
/// let colour = Attribute::categorical("colour", ["red", "green"]);
/// let age = Attribute::integer("age", 0, 120);
/// let height = Attribute::real("height", 1.2, 2.3);
///
/// assert!(!colour.kind.is_numeric());
/// assert_eq!(age.kind.bounds(), Some((0.0, 120.0)));
/// assert!(height.kind.is_numeric());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// Column name, unique within a model.
    pub name: String,

    /// Column kind with its domain or range.
    pub kind: AttributeKind,
}

impl Attribute {
    /// Creates a categorical attribute.
    pub fn categorical<I, S>(name: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: AttributeKind::Categorical {
                categories: categories.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Creates an integer attribute over `[min, max]`.
    pub fn integer(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Integer { min, max },
        }
    }

    /// Creates a real attribute over `[min, max]`.
    pub fn real(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Real { min, max },
        }
    }
}
