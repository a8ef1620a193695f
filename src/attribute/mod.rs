//! Attribute model.
//!
//! Describes each dataset column as categorical (a finite domain) or numeric
//! (an inclusive integer or real range), and fixes the length of the
//! candidate vectors the optimizer works with.

mod model;
mod types;

pub use model::{AttributeModel, SLOTS_PER_ATTRIBUTE};
pub use types::{Attribute, AttributeKind};
