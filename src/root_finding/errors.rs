//! Root-finding configuration errors.
//!
//! Algorithm-specific failures (bad bracket, bad initial guess) live next to
//! each algorithm and wrap [`RootFindingError`] transparently.


use thiserror::Error;


/// Invalid shared configuration.
///
/// ┌ Tolerance not finite or <= 0
/// ├ `max_iter` < 1
/// └ Safety threshold (zero guard, derivative/denominator floor) out of range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootFindingError {
    #[error("invalid tolerance: must be finite and > 0. got {got}")]
    InvalidTolerance { got: f64 },

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter   { got: usize },

    #[error("invalid `{name}` threshold: must be finite and {bound}. got {got}")]
    InvalidThreshold { name: &'static str, bound: &'static str, got: f64 },
}
