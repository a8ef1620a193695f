//! Cell values and column storage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single typed cell of a transaction, as supplied by the loader.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A category label.
    Category(String),
    /// An integer.
    Integer(i64),
    /// A real number.
    Real(f64),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Category(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Category(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

/// Column-major storage of one attribute's values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Indices into the attribute's sorted category list.
    Categorical(Vec<u32>),
    /// Numeric values; integers are stored exactly as `f64`.
    Numeric(Vec<f64>),
}

impl Column {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Column::Categorical(v) => v.len(),
            Column::Numeric(v) => v.len(),
        }
    }

    /// Returns `true` if the column holds no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
