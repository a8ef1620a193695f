//! Rule representation and the vector ↔ rule bridge.
//!
//! The optimizer only sees fixed-length real vectors; this module turns each
//! one into an association rule over mixed-type attributes. Decoding is a
//! pure function of the vector and the attribute model, so the same vector
//! always yields the same rule.
//!
//! Degenerate vectors (fewer than two participating attributes, or an empty
//! side) decode to [`Decoded::Invalid`] rather than failing.

mod config;
mod decoder;
mod encoder;
mod types;

pub use config::DecoderConfig;
pub use decoder::{Decoded, InvalidReason, RuleDecoder};
pub use encoder::RuleEncoder;
pub use types::{Condition, Rule, RuleDisplay, Selector};
