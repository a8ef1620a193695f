//! Immutable, typed transaction table.

use super::types::{Column, Value};
use crate::attribute::{Attribute, AttributeKind, AttributeModel};
use crate::error::{Error, Result};

/// The transaction database a mining run scores rules against.
///
/// Rows are validated against the [`AttributeModel`] once, then stored
/// column-major so that a rule's selectors scan contiguous memory. The table
/// is never mutated afterwards and can be shared across threads freely.
///
/// The table remembers the attributes it was validated against, and the
/// observed minimum and maximum of every numeric column.
///
/// # Examples
///
/// ```
/// use numarm::attribute::{Attribute, AttributeModel};
/// use numarm::transaction::{TransactionTable, Value};
///
/// let model = AttributeModel::new(vec![
///     Attribute::categorical("kind", ["A", "B"]),
///     Attribute::integer("count", 0, 10),
/// ])
/// .unwrap();
///
/// let table = TransactionTable::from_rows(
///     &model,
///     vec![
///         vec![Value::from("A"), Value::from(3)],
///         vec![Value::from("B"), Value::from(9)],
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionTable {
    schema: Vec<Attribute>,
    columns: Vec<Column>,
    observed: Vec<Option<(f64, f64)>>,
    rows: usize,
}

impl TransactionTable {
    /// Builds a table from row-major values.
    ///
    /// Each row must carry exactly one value per attribute. Real attributes
    /// accept integer cells (widened); integer attributes reject real cells.
    pub fn from_rows<I>(model: &AttributeModel, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let mut columns: Vec<Column> = model
            .attributes()
            .iter()
            .map(|attr| match attr.kind {
                AttributeKind::Categorical { .. } => Column::Categorical(Vec::new()),
                _ => Column::Numeric(Vec::new()),
            })
            .collect();

        let mut count = 0usize;
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != model.len() {
                return Err(Error::RowArity {
                    row: row_idx,
                    expected: model.len(),
                    actual: row.len(),
                });
            }

            for (col_idx, value) in row.into_iter().enumerate() {
                let attr = &model.attributes()[col_idx];
                match (&attr.kind, &mut columns[col_idx]) {
                    (AttributeKind::Categorical { .. }, Column::Categorical(cells)) => {
                        let Value::Category(label) = value else {
                            return Err(kind_error(row_idx, &attr.name, "categorical"));
                        };
                        let Some(pos) = model.category_index(col_idx, &label) else {
                            return Err(Error::CategoryNotInDomain {
                                row: row_idx,
                                attribute: attr.name.clone(),
                                value: label,
                            });
                        };
                        cells.push(pos as u32);
                    }
                    (kind, Column::Numeric(cells)) => {
                        let v = match (kind, value) {
                            (AttributeKind::Integer { .. }, Value::Integer(i)) => i as f64,
                            (AttributeKind::Real { .. }, Value::Integer(i)) => i as f64,
                            (AttributeKind::Real { .. }, Value::Real(r)) => r,
                            _ => return Err(kind_error(row_idx, &attr.name, kind.label())),
                        };
                        // Bounds always exist for numeric kinds.
                        let (min, max) = kind.bounds().unwrap_or((f64::MIN, f64::MAX));
                        if !(min..=max).contains(&v) {
                            return Err(Error::ValueOutOfRange {
                                row: row_idx,
                                attribute: attr.name.clone(),
                                value: v,
                            });
                        }
                        cells.push(v);
                    }
                    _ => unreachable!("column storage follows attribute kind"),
                }
            }
            count += 1;
        }

        let observed = columns.iter().map(observed_range).collect();

        tracing::debug!(rows = count, columns = columns.len(), "transaction table built");

        Ok(Self {
            schema: model.attributes().to_vec(),
            columns,
            observed,
            rows: count,
        })
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns `true` if the table has no transactions.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of attributes (columns).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The column for attribute `idx`.
    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    /// All columns in attribute order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The attributes the rows were validated against.
    pub fn attributes(&self) -> &[Attribute] {
        &self.schema
    }

    /// Observed `(min, max)` of numeric column `idx`.
    ///
    /// `None` for categorical columns and for an empty table.
    pub fn observed_range(&self, idx: usize) -> Option<(f64, f64)> {
        self.observed.get(idx).copied().flatten()
    }

    /// Checks that the table was built from `model`.
    pub fn check_model(&self, model: &AttributeModel) -> Result<()> {
        if self.schema.len() != model.len() {
            return Err(Error::TableModelMismatch(format!(
                "table has {} columns, model has {} attributes",
                self.schema.len(),
                model.len()
            )));
        }
        match self
            .schema
            .iter()
            .zip(model.attributes())
            .find(|(ours, theirs)| ours != theirs)
        {
            Some((ours, _)) => Err(Error::TableModelMismatch(format!(
                "attribute '{}' differs",
                ours.name
            ))),
            None => Ok(()),
        }
    }
}

fn observed_range(column: &Column) -> Option<(f64, f64)> {
    let Column::Numeric(cells) = column else {
        return None;
    };
    cells.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn kind_error(row: usize, attribute: &str, expected: &'static str) -> Error {
    Error::ValueKind {
        row,
        attribute: attribute.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    fn model() -> AttributeModel {
        AttributeModel::new(vec![
            Attribute::categorical("c", ["B", "A"]),
            Attribute::integer("i", 0, 10),
            Attribute::real("r", 0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_columns_are_typed() {
        let table = TransactionTable::from_rows(
            &model(),
            vec![
                vec![Value::from("A"), Value::from(4), Value::from(0.5)],
                vec![Value::from("B"), Value::from(10), Value::from(1)],
            ],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.width(), 3);
        // Categories are sorted, so "A" is index 0.
        assert_eq!(table.column(0), Some(&Column::Categorical(vec![0, 1])));
        assert_eq!(table.column(1), Some(&Column::Numeric(vec![4.0, 10.0])));
        assert_eq!(table.column(2), Some(&Column::Numeric(vec![0.5, 1.0])));
    }

    #[test]
    fn test_empty_table() {
        let table = TransactionTable::from_rows(&model(), Vec::new()).unwrap();
        assert!(table.is_empty());
        assert!(table.columns().iter().all(Column::is_empty));
        assert_eq!(table.observed_range(1), None);
    }

    #[test]
    fn test_observed_ranges() {
        let table = TransactionTable::from_rows(
            &model(),
            vec![
                vec![Value::from("A"), Value::from(4), Value::from(0.5)],
                vec![Value::from("B"), Value::from(7), Value::from(0.25)],
                vec![Value::from("A"), Value::from(5), Value::from(0.75)],
            ],
        )
        .unwrap();
        assert_eq!(table.observed_range(0), None);
        assert_eq!(table.observed_range(1), Some((4.0, 7.0)));
        assert_eq!(table.observed_range(2), Some((0.25, 0.75)));
        assert_eq!(table.observed_range(3), None);
    }

    #[test]
    fn test_check_model() {
        let model = model();
        let table = TransactionTable::from_rows(&model, Vec::new()).unwrap();
        assert!(table.check_model(&model).is_ok());

        let same_width = AttributeModel::new(vec![
            Attribute::categorical("c", ["A", "B"]),
            Attribute::real("i", 0.0, 10.0),
            Attribute::real("r", 0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(
            table.check_model(&same_width),
            Err(Error::TableModelMismatch("attribute 'i' differs".into()))
        );

        let narrower = AttributeModel::new(vec![Attribute::categorical("c", ["A", "B"])]).unwrap();
        assert!(matches!(
            table.check_model(&narrower),
            Err(Error::TableModelMismatch(_))
        ));
    }

    #[test]
    fn test_row_arity() {
        let err = TransactionTable::from_rows(&model(), vec![vec![Value::from("A")]]).unwrap_err();
        assert_eq!(
            err,
            Error::RowArity {
                row: 0,
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_unknown_category() {
        let err = TransactionTable::from_rows(
            &model(),
            vec![vec![Value::from("Z"), Value::from(1), Value::from(0.1)]],
        )
        .unwrap_err();
        assert!(matches!(err, Error::CategoryNotInDomain { .. }));
    }

    #[test]
    fn test_kind_mismatch() {
        let err = TransactionTable::from_rows(
            &model(),
            vec![vec![Value::from("A"), Value::from(1.5), Value::from(0.1)]],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ValueKind { .. }));
    }

    #[test]
    fn test_value_out_of_range() {
        let err = TransactionTable::from_rows(
            &model(),
            vec![vec![Value::from("A"), Value::from(11), Value::from(0.1)]],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ValueOutOfRange { .. }));
    }
}
