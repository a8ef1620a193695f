//! Transaction table.
//!
//! An already-typed, in-memory row collection. Loading files is left to the
//! caller; this module only validates rows against the attribute model and
//! stores them for fast scanning.

mod table;
mod types;

pub use table::TransactionTable;
pub use types::{Column, Value};
