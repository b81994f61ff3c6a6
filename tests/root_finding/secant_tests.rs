use approx::assert_abs_diff_eq;
use eqtrace::{EvaluableFunction, EvaluationError, Termination};
use eqtrace::root_finding::secant::{secant, SecantCfg, SecantError};

type TestResult = Result<(), SecantError>;

fn plain(f: impl Fn(f64) -> f64) -> impl Fn(f64) -> Result<f64, EvaluationError> {
    move |x| Ok(f(x))
}

#[test]
fn x_squared_minus_4_from_1_and_3() -> TestResult {
    let res = secant(plain(|x| x * x - 4.0), 1.0, 3.0, SecantCfg::new())?;

    assert_eq!(res.termination, Termination::ToleranceReached);
    assert_abs_diff_eq!(res.root.unwrap(), 2.0, epsilon = 1e-6);
    // x1 opens the trace; x0 only seeds the first secant
    assert_eq!(res.iterates[0], 3.0);
    assert_eq!(res.iterates[1], 1.75);
    assert_eq!(res.abs_errors.len(), res.iterations - 1);
    Ok(())
}

#[test]
fn finds_sqrt_2() -> TestResult {
    let tol = 1e-12;
    let cfg = SecantCfg::new().set_tolerance(tol)?;
    let res = secant(plain(|x| x * x - 2.0), 1.0, 2.0, cfg)?;

    assert!(res.converged());
    assert_abs_diff_eq!(res.root.unwrap(), 2.0_f64.sqrt(), epsilon = 1e-10);
    Ok(())
}

#[test]
fn parsed_trig_function() -> TestResult {
    let func = EvaluableFunction::parse("cos(x) - x").unwrap();
    let res  = secant(|x| func.evaluate(x), 0.0, 1.0, SecantCfg::new())?;

    assert!(res.converged());
    assert_abs_diff_eq!(res.root.unwrap(), 0.739_085_133_215_160_6, epsilon = 1e-6);
    Ok(())
}

#[test]
fn linear_function_hits_root_exactly() -> TestResult {
    let res = secant(plain(|x| x - 1.0), 0.0, 5.0, SecantCfg::new())?;

    assert_eq!(res.termination, Termination::ExactRoot);
    assert_eq!(res.iterates, vec![5.0, 1.0]);
    assert_eq!(res.abs_errors, vec![4.0]);
    Ok(())
}

#[test]
fn flat_secant_is_reported() -> TestResult {
    // f(-1) == f(1)
    let res = secant(plain(|x| x * x - 4.0), -1.0, 1.0, SecantCfg::new())?;

    assert!(matches!(
        res.termination,
        Termination::DenominatorNearZero { x0, x1 } if x0 == -1.0 && x1 == 1.0
    ));
    assert!(!res.converged());
    assert_eq!(res.iterations, 1);
    Ok(())
}

#[test]
fn equal_guesses_end_on_flat_secant() -> TestResult {
    let res = secant(plain(|x| x * x - 4.0), 2.5, 2.5, SecantCfg::new())?;

    assert!(matches!(
        res.termination,
        Termination::DenominatorNearZero { x0, x1 } if x0 == 2.5 && x1 == 2.5
    ));
    assert!(!res.converged());
    assert_eq!(res.iterates, vec![2.5]);
    assert_eq!(res.root, Some(2.5));
    Ok(())
}

#[test]
fn uses_max_iter() -> TestResult {
    let cfg = SecantCfg::new().set_max_iter(2)?;
    let res = secant(plain(|x| x * x - 4.0), 1.0, 3.0, cfg)?;

    assert_eq!(res.termination, Termination::IterationLimit);
    assert_eq!(res.iterates, vec![3.0, 1.75]);
    assert_eq!(res.final_error, Some(1.25));
    Ok(())
}

#[test]
fn undefined_seed() -> TestResult {
    let func = EvaluableFunction::parse("sqrt(x)").unwrap();
    let res  = secant(|x| func.evaluate(x), -1.0, 1.0, SecantCfg::new())?;

    assert!(matches!(res.termination, Termination::EvaluationFailed { x, .. } if x == -1.0));
    assert!(res.iterates.is_empty());
    assert!(!res.verdict().converged);
    Ok(())
}

#[test]
fn invalid_guesses() {
    let cfg = SecantCfg::new();
    for (x0, x1) in [(f64::NAN, 1.0), (0.0, f64::NEG_INFINITY), (f64::NAN, f64::NAN)] {
        let err = secant(plain(|x| x), x0, x1, cfg).unwrap_err();
        assert!(matches!(err, SecantError::InvalidGuess { .. }), "({x0}, {x1})");
    }
}

#[test]
fn rejects_bad_floor() {
    assert!(SecantCfg::new().set_denominator_floor(-1e-9).is_err());
    assert!(SecantCfg::new().set_denominator_floor(f64::NAN).is_err());
}
