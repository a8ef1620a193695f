//! Error types for numarm.
//!
//! Only construction-time problems are errors. A candidate vector that
//! decodes to a degenerate rule is a normal outcome (see
//! [`crate::rule::Decoded::Invalid`]) and never surfaces here.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building models, tables, problems, or encodings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The model was built from an empty attribute list.
    #[error("attribute model needs at least one attribute")]
    NoAttributes,

    /// A categorical attribute has no categories.
    #[error("categorical attribute '{0}' has an empty domain")]
    EmptyDomain(String),

    /// A numeric attribute has `min > max`.
    #[error("attribute '{name}' has an inverted range [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },

    /// A numeric attribute bound is NaN or infinite.
    #[error("attribute '{0}' has a non-finite range bound")]
    NonFiniteBound(String),

    /// Two attributes share a name.
    #[error("duplicate attribute name '{0}'")]
    DuplicateAttribute(String),

    /// A transaction does not carry one value per attribute.
    #[error("row {row} has {actual} values, expected {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A cell's value kind does not match its attribute's kind.
    #[error("row {row}, attribute '{attribute}': expected a {expected} value")]
    ValueKind {
        row: usize,
        attribute: String,
        expected: &'static str,
    },

    /// A categorical cell holds a value outside the attribute's domain.
    #[error("row {row}, attribute '{attribute}': category '{value}' is not in the domain")]
    CategoryNotInDomain {
        row: usize,
        attribute: String,
        value: String,
    },

    /// A numeric cell lies outside the attribute's range.
    #[error("row {row}, attribute '{attribute}': value {value} is outside the range")]
    ValueOutOfRange {
        row: usize,
        attribute: String,
        value: f64,
    },

    /// A candidate vector has the wrong length.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A transaction table was built from a different attribute model.
    #[error("transaction table does not match the attribute model: {0}")]
    TableModelMismatch(String),

    /// A rule references an attribute index the model does not have.
    #[error("unknown attribute index {0}")]
    UnknownAttribute(usize),

    /// A rule selects a category index beyond the attribute's domain, or
    /// uses the wrong selector kind for the attribute.
    #[error("selector on attribute '{0}' does not fit its domain")]
    CategoryOutOfDomain(String),

    /// A rule interval is inverted or leaves the attribute's range.
    #[error("interval on attribute '{0}' lies outside its range")]
    IntervalOutOfRange(String),

    /// A rule is structurally invalid: an empty side, or an attribute used
    /// more than once.
    #[error("invalid rule: {0}")]
    InvalidRule(&'static str),

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
