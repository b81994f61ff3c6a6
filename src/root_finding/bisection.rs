//! Bisection on a sign-changing bracket `[a, b]`.
//!
//! Each step records the midpoint and stops once the half-width of the
//! bracket it came from is `<= tolerance`. The open methods stop on the
//! strict `abs_error < tolerance` of
//! [`ConvergenceTracker::has_converged`](super::convergence::ConvergenceTracker::has_converged);
//! bisection does not, so that a run never takes more than
//! [`bisection_iteration_bound`] steps, including when `(b - a) / tolerance`
//! is a power of two.
use super::algorithms::Method;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::RootFindingError;
use super::report::{SolveResult, Termination};
use super::signs::opposite_signs;
use super::trace::Run;
use crate::expression::EvaluationError;
use thiserror::Error;

const METHOD: Method = Method::Bisection;

#[derive(Debug, Error)]
pub enum BisectionError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error("invalid bounds: a and b must be finite with a < b. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },

    #[error("no sign change on [{a}, {b}]: f(a)={fa}, f(b)={fb}")]
    NoSignChange  { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("cannot evaluate bracket endpoint: {0}")]
    Endpoint(#[from] EvaluationError),
}

/// Bisection Configuration
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerance, `max_iter` and zero guard.
///
/// # Construction
/// - Use [`BisectionCfg::new`] then optional setters; each setter validates.
#[derive(Debug, Copy, Clone, Default)]
pub struct BisectionCfg {
    common: CommonCfg,
}
impl BisectionCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub(crate) fn from_common(common: CommonCfg) -> Self { Self { common } }
}
impl_common_cfg!(BisectionCfg);


/// Calculates midpoint of [a, b]
#[inline]
fn midpoint(a: f64, b: f64) -> f64 {
    a + (b - a) * 0.5
}


/// Theoretical number of bisections needed to bring the bracket
/// half-width down to `tolerance`: `ceil(log2((b - a) / tolerance))`.
///
/// # Errors
/// [`RootFindingError::InvalidTolerance`] if `tolerance` <= 0 or non-finite.
pub fn bisection_iteration_bound(
    a: f64,
    b: f64,
    tolerance: f64
) -> Result<usize, RootFindingError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(RootFindingError::InvalidTolerance { got: tolerance });
    }
    let w0 = (b - a).abs();
    let bound = if w0 <= tolerance { 0 } else {
        (w0 / tolerance).log2().ceil() as usize
    };

    Ok(bound)
}


/// Finds a root of a function using the
/// [bisection method](https://en.wikipedia.org/wiki/Bisection_method).
///
/// # Arguments
///
/// ┌ `func` - The function whose root is to be found; may fail per point.
/// ├ `a`    - Lower bound of the search interval. Must be finite and less than `b`.
/// ├ `b`    - Upper bound of the search interval. Must be finite and greater than `a`.
/// └ `cfg`  - [`BisectionCfg`] (tolerance, `max_iter`, zero guard)
///
/// # Returns
///
/// [`SolveResult`] whose iterates are the successive midpoints.
/// ├ `abs_errors` : change between successive midpoints
/// ├ `final_error`: half-width of the bracket that produced the last midpoint
/// └ `termination`:
///    ├ [`Termination::ExactRoot`]         - f(a), f(b) or f(m) is exactly 0
///    ├ [`Termination::ToleranceReached`]  - half-width <= tolerance
///    ├ [`Termination::IterationLimit`]    - `max_iter` midpoints without meeting tolerance
///    └ [`Termination::EvaluationFailed`]  - f undefined at a midpoint; partial trace kept
///
/// # Errors
///
/// ┌ [`BisectionError::InvalidBounds`] - `a` or `b` is NaN/inf or `a >= b`.
/// ├ [`BisectionError::NoSignChange`]  - `f(a)` and `f(b)` share a sign.
/// └ [`BisectionError::Endpoint`]      - f undefined at `a` or `b`.
///
/// # Notes
/// ├ If f(a) or f(b) is exactly zero that endpoint is returned with zero iterations.
/// └ Midpoint `k` comes from a bracket of half-width `(b - a) / 2^k`, so
///   tolerance is met within [`bisection_iteration_bound`] iterations.
pub fn bisection<F>(
    mut func: F,
    a: f64,
    b: f64,
    cfg: BisectionCfg
) -> Result<SolveResult, BisectionError>
where F: FnMut(f64) -> Result<f64, EvaluationError> {
    let run = Run::start(METHOD, cfg.common.tracker());

    if !(a.is_finite() && b.is_finite()) || a >= b {
        return Err(BisectionError::InvalidBounds { a, b });
    }

    // immediate bounds are roots
    let fa = func(a)?;
    if fa == 0.0 {
        return Ok(run.finish_at(a, fa, Termination::ExactRoot));
    }
    let fb = func(b)?;
    if fb == 0.0 {
        return Ok(run.finish_at(b, fb, Termination::ExactRoot));
    }

    if !opposite_signs(fa, fb) {
        return Err(BisectionError::NoSignChange { a, b, fa, fb });
    }

    Ok(bisection_loop(func, a, b, fa, cfg.common.max_iter(), run))
}


fn bisection_loop<F>(
    mut func: F,
    mut a: f64,
    mut b: f64,
    mut fa: f64,
    max_iter: usize,
    mut run: Run,
) -> SolveResult
where F: FnMut(f64) -> Result<f64, EvaluationError> {
    let tracker = run.tracker();
    let mut half_width = None;

    for _ in 0..max_iter {
        let m  = midpoint(a, b);
        let fm = match func(m) {
            Ok(fm) => fm,
            Err(e) => {
                let termination = Termination::EvaluationFailed { x: m, reason: e.to_string() };
                return run.finish(termination, half_width);
            }
        };
        let hw = (b - a) * 0.5;
        half_width = Some(hw);
        run.record(m, fm);

        if fm == 0.0 {
            return run.finish(Termination::ExactRoot, half_width);
        }
        // half-width bounds the distance to the root, so reaching the
        // tolerance exactly is enough
        if hw <= tracker.tolerance() {
            return run.finish(Termination::ToleranceReached, half_width);
        }

        // shrink interval
        if opposite_signs(fa, fm) {
            b = m;
        } else {
            a = m;
            fa = fm;
        }
    }

    run.finish(Termination::IterationLimit, half_width)
}
