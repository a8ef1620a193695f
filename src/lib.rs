//! Numerical association rule mining as continuous optimization.
//!
//! Classic rule miners enumerate a combinatorial rule space and need numeric
//! columns cut into fixed bins first. This crate instead maps every
//! fixed-length real vector to an association rule over categorical,
//! integer, and real attributes, and scores it against the transaction
//! database, so that any population-based metaheuristic can search the rule
//! space directly.
//!
//! - **Attribute model** ([`attribute`]): typed column metadata; fixes the
//!   candidate vector length.
//! - **Transactions** ([`transaction`]): an immutable, typed table.
//! - **Rules** ([`rule`]): selectors, rules, and the deterministic
//!   vector → rule decoder (plus an encoder for seeding).
//! - **Fitness** ([`fitness`]): support, confidence, and interestingness
//!   measures blended into one configurable scalar.
//! - **Archive** ([`archive`]): every distinct valid rule seen in a run.
//! - **Mining** ([`mining`]): the objective handed to an external
//!   [`Optimizer`](mining::Optimizer), and the run driver.
//!
//! # Architecture
//!
//! The optimizer is a pluggable capability; this crate contains no search
//! algorithm. Model and table are shared read-only, and the archive is the
//! only mutable state, owned by one run, so evaluations may run on any
//! number of threads.
//!
//! # Example
//!
//! ```
//! use numarm::attribute::{Attribute, AttributeModel};
//! use numarm::mining::{MiningConfig, RuleMiningProblem};
//! use numarm::transaction::{TransactionTable, Value};
//!
//! let model = AttributeModel::new(vec![
//!     Attribute::categorical("kind", ["A", "B"]),
//!     Attribute::real("x", 0.0, 10.0),
//! ])?;
//! let table = TransactionTable::from_rows(
//!     &model,
//!     vec![
//!         vec![Value::from("A"), Value::from(7.0)],
//!         vec![Value::from("B"), Value::from(2.0)],
//!     ],
//! )?;
//!
//! let problem = RuleMiningProblem::new(&model, &table, &MiningConfig::default())?;
//! let fitness = problem.evaluate(&[0.9, 0.1, 0.2, 0.0, 0.0, 0.9, 0.9, 0.5, 1.0, 0.0]);
//!
//! assert!(fitness > 0.0);
//! assert_eq!(problem.archive().len(), 1);
//! # Ok::<(), numarm::Error>(())
//! ```

pub mod archive;
pub mod attribute;
mod error;
pub mod fitness;
pub mod mining;
pub mod rule;
pub mod transaction;

pub use error::{Error, Result};
