use approx::assert_abs_diff_eq;
use eqtrace::{EvaluableFunction, EvaluationError, Termination};
use eqtrace::root_finding::errors::RootFindingError;
use eqtrace::root_finding::newton::{newton, NewtonCfg, NewtonError};

type TestResult = Result<(), NewtonError>;
type Derivative = fn(f64) -> Result<f64, EvaluationError>;

fn plain(f: impl Fn(f64) -> f64) -> impl Fn(f64) -> Result<f64, EvaluationError> {
    move |x| Ok(f(x))
}

#[test]
fn x_squared_minus_4_from_3() -> TestResult {
    let res = newton(plain(|x| x * x - 4.0), Some(plain(|x| 2.0 * x)), 3.0, NewtonCfg::new())?;

    // the sixth iterate lands on 2.0 exactly
    assert!(res.converged());
    assert!(res.iterations <= 6);
    assert_eq!(res.iterates[0], 3.0);
    assert_abs_diff_eq!(res.root.unwrap(), 2.0, epsilon = 1e-6);
    assert!(res.final_abs_error().unwrap() < 1e-6);
    Ok(())
}

#[test]
fn finds_sqrt_2_with_fd_derivative() -> TestResult {
    let tol = 1e-12;
    let cfg = NewtonCfg::new().set_tolerance(tol)?.set_max_iter(60)?;

    let res = newton(plain(|x| x * x - 2.0), None::<Derivative>, 1.0, cfg)?;

    assert!(res.converged());
    assert_abs_diff_eq!(res.root.unwrap(), 2.0_f64.sqrt(), epsilon = 1e-10);
    Ok(())
}

#[test]
fn parsed_function_with_fd_derivative() -> TestResult {
    let func = EvaluableFunction::parse("exp(x) - 2").unwrap();
    let res  = newton(|x| func.evaluate(x), None::<Derivative>, 0.0, NewtonCfg::new())?;

    assert!(res.converged());
    assert_abs_diff_eq!(res.root.unwrap(), 2.0_f64.ln(), epsilon = 1e-6);
    assert_eq!(res.abs_errors.len(), res.iterates.len() - 1);
    Ok(())
}

#[test]
fn zero_derivative_is_reported() -> TestResult {
    let res = newton(plain(|x| x * x - 4.0), Some(plain(|x| 2.0 * x)), 0.0, NewtonCfg::new())?;

    assert!(matches!(
        res.termination,
        Termination::DerivativeNearZero { x, derivative } if x == 0.0 && derivative == 0.0
    ));
    assert!(!res.converged());
    assert_eq!(res.iterations, 1);
    assert!(res.verdict().message.starts_with("Did not converge: derivative near zero"));
    Ok(())
}

#[test]
fn derivative_floor_is_configurable() -> TestResult {
    // f'(x0) = 1e-6 passes the default floor but not a raised one
    let f   = plain(|x| x * x * x - 1.0);
    let df  = plain(|x| 3.0 * x * x);
    let x0  = (1e-6_f64 / 3.0).sqrt();
    let cfg = NewtonCfg::new().set_derivative_floor(1e-4)?;

    let res = newton(f, Some(df), x0, cfg)?;

    assert!(matches!(res.termination, Termination::DerivativeNearZero { .. }));
    Ok(())
}

#[test]
fn divergence_is_reported_not_hidden() -> TestResult {
    // Newton on cbrt(x) maps x to -2x
    let f   = plain(|x| x.cbrt());
    let df  = plain(|x| 1.0 / (3.0 * x.cbrt().powi(2)));
    let cfg = NewtonCfg::new().set_max_iter(20)?;

    let res = newton(f, Some(df), 1.0, cfg)?;

    assert_eq!(res.termination, Termination::IterationLimit);
    assert_eq!(res.iterations, 20);
    assert!(res.iterates[19].abs() > 1e5);
    assert!(res.final_abs_error().unwrap() > 1.0);
    assert_eq!(
        res.verdict().message,
        "Did not converge: maximum iterations reached or error not below tolerance."
    );
    Ok(())
}

#[test]
fn single_iterate_has_no_error() -> TestResult {
    let cfg = NewtonCfg::new().set_max_iter(1)?;
    let res = newton(plain(|x| x * x - 4.0), None::<Derivative>, 3.0, cfg)?;

    assert_eq!(res.termination, Termination::IterationLimit);
    assert_eq!(res.iterates, vec![3.0]);
    assert!(res.abs_errors.is_empty());
    assert_eq!(res.final_error, None);
    assert_eq!(res.verdict().message, "Did not converge: the error could not be computed.");
    Ok(())
}

#[test]
fn initial_guess_is_exact_root() -> TestResult {
    let res = newton(plain(|x| x - 1.0), None::<Derivative>, 1.0, NewtonCfg::new())?;

    assert_eq!(res.termination, Termination::ExactRoot);
    assert_eq!(res.iterations, 1);
    assert_eq!(res.root, Some(1.0));
    Ok(())
}

#[test]
fn leaves_domain_mid_run() -> TestResult {
    // first step from 3 lands at 3 - 3 ln 3 < 0
    let func = EvaluableFunction::parse("log(x)").unwrap();
    let res  = newton(|x| func.evaluate(x), None::<Derivative>, 3.0, NewtonCfg::new())?;

    assert!(matches!(res.termination, Termination::EvaluationFailed { x, .. } if x < 0.0));
    assert!(!res.converged());
    assert_eq!(res.iterates, vec![3.0]);
    assert_eq!(res.root, Some(3.0));
    Ok(())
}

#[test]
fn invalid_guess() {
    let err = newton(plain(|x| x), None::<Derivative>, f64::NAN, NewtonCfg::new()).unwrap_err();
    assert!(matches!(err, NewtonError::InvalidGuess { x0 } if x0.is_nan()));
}

#[test]
fn rejects_bad_floor() {
    let err = NewtonCfg::new().set_derivative_floor(0.0).unwrap_err();
    assert!(matches!(
        err,
        NewtonError::RootFinding(RootFindingError::InvalidThreshold { name: "derivative_floor", .. })
    ));
}
