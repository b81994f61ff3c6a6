//! Convergence tracking shared by every root-finding algorithm.
//!
//! All three methods measure error and decide when to stop through the same
//! functions, so their error curves are directly comparable.
//!
//! - [`absolute_error`] : `|current - previous|`
//! - [`relative_error`] : absolute error over `|current|`, guarded near zero
//! - [`has_converged`]  : `absolute_error < tolerance`


/// `|current - previous|`
#[inline]
pub fn absolute_error(previous: f64, current: f64) -> f64 {
    (current - previous).abs()
}


/// Absolute error normalized by `|current|`.
///
/// When `|current| < zero_guard` the quotient is unstable, so the absolute
/// error is returned unchanged.
#[inline]
pub fn relative_error(previous: f64, current: f64, zero_guard: f64) -> f64 {
    let abs_err = absolute_error(previous, current);
    if current.abs() < zero_guard {
        abs_err
    } else {
        abs_err / current.abs()
    }
}


/// `absolute_error < tolerance`
#[inline]
pub fn has_converged(absolute_error: f64, tolerance: f64) -> bool {
    absolute_error < tolerance
}


/// Tolerance and zero guard of one run, bundled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConvergenceTracker {
    tolerance:  f64,
    zero_guard: f64,
}

impl ConvergenceTracker {
    pub fn new(tolerance: f64, zero_guard: f64) -> Self {
        Self { tolerance, zero_guard }
    }

    pub fn tolerance(&self) -> f64 { self.tolerance }

    /// `(absolute, relative)` error between two successive iterates.
    #[inline]
    pub fn errors(&self, previous: f64, current: f64) -> (f64, f64) {
        (
            absolute_error(previous, current),
            relative_error(previous, current, self.zero_guard),
        )
    }

    #[inline]
    pub fn has_converged(&self, absolute_error: f64) -> bool {
        has_converged(absolute_error, self.tolerance)
    }
}
