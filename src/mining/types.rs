//! The optimizer capability.

use crate::fitness::Orientation;

/// Per-dimension box constraint of the search space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    /// Lower bound of every dimension.
    pub lower: f64,
    /// Upper bound of every dimension.
    pub upper: f64,
}

impl SearchBounds {
    /// The unit interval `[0, 1]`.
    pub fn unit() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

/// Any stochastic optimizer over fixed-length real vectors.
///
/// The library ships no algorithm; differential evolution, particle swarm,
/// BRKGA and friends plug in by implementing this trait. The objective may
/// be called from several threads at once, and values outside `bounds` are
/// accepted (they are clamped during decoding).
///
/// # Examples
///
/// ```ignore
/// struct RandomSearch { samples: usize, rng: StdRng }
///
/// impl Optimizer for RandomSearch {
///     fn optimize(
///         &mut self,
///         objective: &(dyn Fn(&[f64]) -> f64 + Sync),
///         dimension: usize,
///         bounds: SearchBounds,
///         orientation: Orientation,
///     ) -> Vec<Vec<f64>> {
///         let mut best: Option<(f64, Vec<f64>)> = None;
///         for _ in 0..self.samples {
///             let v: Vec<f64> = (0..dimension)
///                 .map(|_| self.rng.random_range(bounds.lower..=bounds.upper))
///                 .collect();
///             let f = objective(&v);
///             if best.as_ref().map_or(true, |(b, _)| orientation.is_better(f, *b)) {
///                 best = Some((f, v));
///             }
///         }
///         best.map(|(_, v)| vec![v]).unwrap_or_default()
///     }
/// }
/// ```
pub trait Optimizer {
    /// Searches for good vectors and returns the best ones found, best
    /// first. Stopping (iteration, evaluation, or time budgets) is the
    /// optimizer's own decision.
    fn optimize(
        &mut self,
        objective: &(dyn Fn(&[f64]) -> f64 + Sync),
        dimension: usize,
        bounds: SearchBounds,
        orientation: Orientation,
    ) -> Vec<Vec<f64>>;
}
