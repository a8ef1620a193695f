//! Optimization adapter.
//!
//! Exposes rule mining as a black-box objective `f(vector) -> fitness` for
//! any population-based optimizer, and collects every distinct valid rule
//! the optimizer stumbles upon along the way.
//!
//! The optimizer itself is external: implement [`Optimizer`] for it and
//! hand it to [`Miner::run`].

mod config;
mod runner;
mod types;

pub use config::MiningConfig;
pub use runner::{Miner, MiningResult, RuleMiningProblem};
pub use types::{Optimizer, SearchBounds};
