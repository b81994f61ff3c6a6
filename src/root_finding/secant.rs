use super::algorithms::Method;
use super::config::{CommonCfg, impl_common_cfg, positive_threshold};
use super::errors::RootFindingError;
use super::report::{SolveResult, Termination};
use super::trace::Run;
use crate::expression::EvaluationError;
use thiserror::Error;

const METHOD: Method = Method::Secant;

pub const DEFAULT_DENOMINATOR_FLOOR: f64 = 1e-12;


#[derive(Debug, Error)]
pub enum SecantError{
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error("invalid initial guesses: x0={x0} and x1={x1} must be finite")]
    InvalidGuess { x0: f64, x1: f64 },
}


/// Secant configuration
///
/// # Fields
/// - `common`            : [`CommonCfg`] with tolerance, `max_iter` and zero guard.
/// - `denominator_floor` : |f(x1) - f(x0)| below this stops the run (default: 1e-12).
///
/// # Construction
/// - Use [`SecantCfg::new`] then optional setters.
#[derive(Debug, Copy, Clone)]
pub struct SecantCfg {
    common: CommonCfg,
    denominator_floor: f64,
}
impl SecantCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
            denominator_floor: DEFAULT_DENOMINATOR_FLOOR,
        }
    }
    pub(crate) fn from_common(common: CommonCfg, denominator_floor: f64) -> Self {
        Self { common, denominator_floor }
    }
    pub fn set_denominator_floor(mut self, v: f64) -> Result<Self, SecantError> {
        self.denominator_floor = positive_threshold("denominator_floor", v)?;
        Ok(self)
    }
    #[inline] #[must_use]
    pub fn denominator_floor(&self) -> f64 { self.denominator_floor }
}
impl Default for SecantCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(SecantCfg);


/// Calculates the secant x-intercept for the line
/// connecting `(x0, fx0)` and `(x1, fx1)`
///
/// Returns `None` if `|fx1 - fx0| < floor`.
#[inline]
fn secant_intercept(x0: f64, fx0: f64, x1: f64, fx1: f64, floor: f64) -> Option<f64> {
    let denom = fx1 - fx0;
    if denom.abs() < floor {
        return None;
    }
    Some(x1 - fx1 * (x1 - x0) / denom)
}


fn secant_loop<F>(
    mut f: F,
    x0: f64,
    x1: f64,
    cfg: SecantCfg,
    mut run: Run,
) -> SolveResult
where F: FnMut(f64) -> Result<f64, EvaluationError> {
    let tracker  = run.tracker();
    let max_iter = cfg.common.max_iter();
    let floor    = cfg.denominator_floor;

    let eval_failed = |x: f64, e: EvaluationError| {
        Termination::EvaluationFailed { x, reason: e.to_string() }
    };

    // x0 seeds the first secant but is not part of the trace
    let mut prev  = x0;
    let mut fprev = match f(x0) {
        Ok(v)  => v,
        Err(e) => return run.finish(eval_failed(x0, e), None),
    };
    let mut x  = x1;
    let mut fx = match f(x1) {
        Ok(v)  => v,
        Err(e) => return run.finish(eval_failed(x1, e), None),
    };
    let mut last_err = run.record(x, fx);

    loop {
        if fx == 0.0 {
            return run.finish(Termination::ExactRoot, last_err);
        }
        if last_err.is_some_and(|e| tracker.has_converged(e)) {
            return run.finish(Termination::ToleranceReached, last_err);
        }
        if run.iterations() >= max_iter {
            return run.finish(Termination::IterationLimit, last_err);
        }

        let Some(x_next) = secant_intercept(prev, fprev, x, fx, floor) else {
            return run.finish(Termination::DenominatorNearZero { x0: prev, x1: x }, last_err);
        };
        if !x_next.is_finite() {
            return run.finish(Termination::NonFiniteStep { x }, last_err);
        }

        let fx_next = match f(x_next) {
            Ok(v)  => v,
            Err(e) => return run.finish(eval_failed(x_next, e), last_err),
        };

        prev  = x;
        fprev = fx;
        x     = x_next;
        fx    = fx_next;
        last_err = run.record(x, fx);
    }
}


/// Finds a root of `func` using the
/// [secant method](https://en.wikipedia.org/wiki/Secant_method).
///
/// # Arguments
/// - `func`   : function whose root is sought
/// - `x0, x1` : two finite initial guesses
/// - `cfg`    : [`SecantCfg`] (tolerance, `max_iter`, zero guard, denominator floor)
///
/// # Returns
/// [`SolveResult`] whose first iterate is `x1`; `x0` only seeds the first
/// secant line. Each later iterate is
/// `x_{k+1} = x_k - f(x_k) * (x_k - x_{k-1}) / (f(x_k) - f(x_{k-1}))`.
/// Terminations:
/// - [`Termination::ExactRoot`]           : `f(x)` is exactly 0
/// - [`Termination::ToleranceReached`]    : `|x_k - x_{k-1}| < tolerance`
/// - [`Termination::IterationLimit`]      : `max_iter` iterates recorded
/// - [`Termination::DenominatorNearZero`] : `|f(x_k) - f(x_{k-1})| < denominator_floor`
/// - [`Termination::NonFiniteStep`]       : next iterate NaN/inf
/// - [`Termination::EvaluationFailed`]    : `f` undefined at an iterate
///
/// # Errors
/// - [`SecantError::InvalidGuess`] : `x0` or `x1` non-finite
///
/// Equal guesses are not an error: the first secant is flat, so the run ends
/// with [`Termination::DenominatorNearZero`] after one iterate.
///
/// # Notes
/// - Superlinear local convergence (order ≈ 1.618) near simple roots.
/// - No bracketing: iterates can leave any interval around the guesses.
pub fn secant<F> (
    func: F,
    x0: f64,
    x1: f64,
    cfg: SecantCfg
) -> Result<SolveResult, SecantError>
where F: FnMut(f64) -> Result<f64, EvaluationError> {
    let run = Run::start(METHOD, cfg.common.tracker());

    if !x0.is_finite() || !x1.is_finite() {
        return Err(SecantError::InvalidGuess { x0, x1 });
    }

    Ok(secant_loop(func, x0, x1, cfg, run))
}
