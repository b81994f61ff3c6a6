//! Newton-Raphson method

use super::algorithms::Method;
use super::config::{CommonCfg, impl_common_cfg, positive_threshold};
use super::errors::RootFindingError;
use super::report::{SolveResult, Termination};
use super::trace::Run;
use crate::expression::EvaluationError;
use thiserror::Error;

const METHOD: Method = Method::NewtonRaphson;

pub const DEFAULT_DERIVATIVE_FLOOR: f64 = 1e-12;


#[derive(Debug, Error)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },
}


/// Newton configuration.
///
/// # Fields
/// - `common`           : [`CommonCfg`] with tolerance, `max_iter` and zero guard.
/// - `derivative_floor` : |f'(x)| below this stops the run (default: 1e-12).
///
/// # Construction
/// - Use [`NewtonCfg::new`] then optional setters.
/// - Set the floor via [`NewtonCfg::set_derivative_floor`] (must be > 0).
#[derive(Debug, Copy, Clone)]
pub struct NewtonCfg {
    common: CommonCfg,
    derivative_floor: f64,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
            derivative_floor: DEFAULT_DERIVATIVE_FLOOR,
        }
    }
    pub(crate) fn from_common(common: CommonCfg, derivative_floor: f64) -> Self {
        Self { common, derivative_floor }
    }
    pub fn set_derivative_floor(mut self, v: f64) -> Result<Self, NewtonError> {
        self.derivative_floor = positive_threshold("derivative_floor", v)?;
        Ok(self)
    }
    #[inline] #[must_use]
    pub fn derivative_floor(&self) -> f64 { self.derivative_floor }
}
impl Default for NewtonCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(NewtonCfg);


/// Central finite-difference step, `h = eps^{1/3} * max(|x|, 1)`
#[inline]
fn fd_step(x: f64) -> f64 {
    f64::EPSILON.cbrt() * x.abs().max(1.0)
}


/// Why a derivative could not be produced at `x`.
enum DerivativeFailure {
    Evaluation(EvaluationError),
    NonFinite,
}

/// Helpers
/// - `eval_dfx_analytic` : evaluates user-supplied derivative `df(x)`
/// - `eval_dfx_fd`       : central finite-difference on `f`
#[inline]
fn eval_dfx_analytic<G>(df: &mut G, x: f64) -> Result<f64, DerivativeFailure>
where G: FnMut(f64) -> Result<f64, EvaluationError> {
    let dfx = df(x).map_err(DerivativeFailure::Evaluation)?;
    if !dfx.is_finite() {
        return Err(DerivativeFailure::NonFinite);
    }

    Ok(dfx)
}
#[inline]
fn eval_dfx_fd<F>(f: &mut F, x: f64) -> Result<f64, DerivativeFailure>
where F: FnMut(f64) -> Result<f64, EvaluationError> {
    let h  = fd_step(x);
    let xp = x + h;
    let xm = x - h;
    if !xp.is_finite() || !xm.is_finite() || xp == x || xm == x {
        return Err(DerivativeFailure::NonFinite);
    }

    let fxp = f(xp).map_err(DerivativeFailure::Evaluation)?;
    let fxm = f(xm).map_err(DerivativeFailure::Evaluation)?;
    let dfx = (fxp - fxm) / (xp - xm);
    if !dfx.is_finite() {
        return Err(DerivativeFailure::NonFinite);
    }

    Ok(dfx)
}


fn newton_loop<F, G>(
    mut f: F,
    mut df: Option<G>,
    x0: f64,
    cfg: NewtonCfg,
    mut run: Run,
) -> SolveResult
where
    F: FnMut(f64) -> Result<f64, EvaluationError>,
    G: FnMut(f64) -> Result<f64, EvaluationError>,
{
    let tracker  = run.tracker();
    let max_iter = cfg.common.max_iter();
    let floor    = cfg.derivative_floor;

    let mut x  = x0;
    let mut fx = match f(x) {
        Ok(v)  => v,
        Err(e) => return run.finish(
            Termination::EvaluationFailed { x, reason: e.to_string() }, None
        ),
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

        // compute derivative
        let derivative = match df.as_mut() {
            Some(g) => eval_dfx_analytic(g, x),
            None    => eval_dfx_fd(&mut f, x),
        };
        let dfx = match derivative {
            Ok(v) => v,
            Err(DerivativeFailure::NonFinite) => {
                return run.finish(Termination::NonFiniteStep { x }, last_err);
            }
            Err(DerivativeFailure::Evaluation(e)) => {
                let termination = Termination::EvaluationFailed { x, reason: e.to_string() };
                return run.finish(termination, last_err);
            }
        };
        if dfx.abs() < floor {
            return run.finish(Termination::DerivativeNearZero { x, derivative: dfx }, last_err);
        }

        let x_next = x - fx / dfx;
        if !x_next.is_finite() {
            return run.finish(Termination::NonFiniteStep { x }, last_err);
        }

        fx = match f(x_next) {
            Ok(v)  => v,
            Err(e) => {
                let termination = Termination::EvaluationFailed { x: x_next, reason: e.to_string() };
                return run.finish(termination, last_err);
            }
        };
        x = x_next;
        last_err = run.record(x, fx);
    }
}


/// Finds a root of `func` using the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton_method).
/// Supports analytic derivatives or a central finite-difference fallback.
///
/// # Arguments
/// - `func`  : function whose root is sought
/// - `dfunc` : optional analytic derivative; if `None`, use finite-difference
/// - `x0`    : finite initial guess
/// - `cfg`   : [`NewtonCfg`] (tolerance, `max_iter`, zero guard, derivative floor)
///
/// # Returns
/// [`SolveResult`] whose first iterate is `x0`; every later iterate is one
/// Newton step `x - f(x)/f'(x)`, so `max_iter` bounds the trace length.
/// Terminations:
/// - [`Termination::ExactRoot`]          : `f(x)` is exactly 0
/// - [`Termination::ToleranceReached`]   : `|x_k - x_{k-1}| < tolerance`
/// - [`Termination::IterationLimit`]     : `max_iter` iterates recorded
/// - [`Termination::DerivativeNearZero`] : `|f'(x)| < derivative_floor`
/// - [`Termination::NonFiniteStep`]      : derivative or next iterate NaN/inf
/// - [`Termination::EvaluationFailed`]   : `f` or `f'` undefined at an iterate
///
/// # Errors
/// - [`NewtonError::InvalidGuess`] : `x0` non-finite
///
/// # Notes
/// - Convergence is *local only* and depends on a good initial guess `x0` and
///   smoothness of `f`. Divergence and oscillation are reported, never hidden.
///   For guaranteed convergence, use a **bracketed method** (e.g. bisection)
pub fn newton<F, G>(
    func: F,
    dfunc: Option<G>,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<SolveResult, NewtonError>
where
    F: FnMut(f64) -> Result<f64, EvaluationError>,
    G: FnMut(f64) -> Result<f64, EvaluationError> {
    let run = Run::start(METHOD, cfg.common.tracker());

    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    Ok(newton_loop(func, dfunc, x0, cfg, run))
}
