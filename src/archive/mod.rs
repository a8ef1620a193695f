//! Rule archive.
//!
//! Accumulates the distinct valid rules found across every fitness
//! evaluation of a run. It is the run's final output.

mod store;
mod types;

pub use store::RuleArchive;
pub use types::ArchiveEntry;
