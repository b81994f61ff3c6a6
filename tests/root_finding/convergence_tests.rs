use approx::assert_relative_eq;
use eqtrace::root_finding::convergence::{absolute_error, has_converged, relative_error, ConvergenceTracker};
use eqtrace::root_finding::config::{CommonCfg, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE, DEFAULT_ZERO_GUARD};
use eqtrace::root_finding::errors::RootFindingError;
use eqtrace::SolveOptions;

#[test]
fn absolute_and_relative_errors() {
    assert_eq!(absolute_error(2.5, 2.0), 0.5);
    assert_eq!(absolute_error(-1.0, 1.0), 2.0);
    assert_relative_eq!(relative_error(2.5, 2.0, DEFAULT_ZERO_GUARD), 0.25);
    assert_relative_eq!(relative_error(-2.0, -4.0, DEFAULT_ZERO_GUARD), 0.5);
}

#[test]
fn relative_error_guards_zero() {
    // current iterate at zero: fall back to the absolute error
    assert_eq!(relative_error(1e-3, 0.0, 1e-12), 1e-3);
    assert_eq!(relative_error(1e-3, 1e-14, 1e-12), (1e-14_f64 - 1e-3).abs());
    assert!(relative_error(1.0, 0.0, 0.0).is_infinite());
}

#[test]
fn converged_is_strict() {
    assert!(has_converged(9.9e-7, 1e-6));
    assert!(!has_converged(1e-6, 1e-6));
    assert!(!has_converged(f64::NAN, 1e-6));
}

#[test]
fn tracker_bundles_both_errors() {
    let tracker = ConvergenceTracker::new(1e-3, 1e-12);
    let (abs, rel) = tracker.errors(1.0, 1.0005);

    assert_relative_eq!(abs, 5e-4, max_relative = 1e-9);
    assert_relative_eq!(rel, 5e-4 / 1.0005, max_relative = 1e-9);
    assert!(tracker.has_converged(abs));
    assert_eq!(tracker.tolerance(), 1e-3);
}

#[test]
fn defaults() {
    let cfg = CommonCfg::new();
    assert_eq!(cfg.tolerance(), DEFAULT_TOLERANCE);
    assert_eq!(cfg.max_iter(), DEFAULT_MAX_ITER);
    assert_eq!(cfg.zero_guard(), DEFAULT_ZERO_GUARD);
    assert_eq!(DEFAULT_TOLERANCE, 1e-6);
    assert_eq!(DEFAULT_MAX_ITER, 100);
}

#[test]
fn options_validate() {
    assert!(matches!(
        SolveOptions::new().set_tolerance(0.0),
        Err(RootFindingError::InvalidTolerance { got }) if got == 0.0
    ));
    assert!(matches!(
        SolveOptions::new().set_tolerance(f64::INFINITY),
        Err(RootFindingError::InvalidTolerance { .. })
    ));
    assert!(matches!(SolveOptions::new().set_max_iter(0), Err(RootFindingError::InvalidMaxIter { got: 0 })));
    assert!(matches!(
        SolveOptions::new().set_zero_guard(-1.0),
        Err(RootFindingError::InvalidThreshold { name: "zero_guard", .. })
    ));
    assert!(SolveOptions::new().set_zero_guard(0.0).is_ok());
}
