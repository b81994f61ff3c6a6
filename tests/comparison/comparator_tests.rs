//! tests for running several methods on one equation
use eqtrace::{compare, compare_named, FailureKind, Method, MethodParams, SolveError, SolveOptions};

type TestResult = Result<(), SolveError>;

fn all_three(a: f64, b: f64) -> [MethodParams; 3] {
    [
        MethodParams::Bisection { a, b },
        MethodParams::NewtonRaphson { x0: 3.0 },
        MethodParams::Secant { x0: 1.0, x1: 3.0 },
    ]
}

#[test]
fn bad_bracket_does_not_abort_others() -> TestResult {
    // no sign change on [3, 5]
    let cmp = compare("x^2 - 4", &all_three(3.0, 5.0), &SolveOptions::new())?;

    assert_eq!(cmp.outcomes.len(), 3);
    let failure = cmp.get(Method::Bisection).and_then(|o| o.failure()).unwrap();
    assert_eq!(failure.kind, FailureKind::InvalidBracket);

    for method in [Method::NewtonRaphson, Method::Secant] {
        let res = cmp.get(method).and_then(|o| o.result()).unwrap();
        assert!(res.converged(), "{method}");
        assert!((res.root.unwrap() - 2.0).abs() < 1e-6);
    }
    Ok(())
}

#[test]
fn all_methods_agree() -> TestResult {
    let cmp = compare("x^2 - 4", &all_three(0.0, 3.0), &SolveOptions::new())?;

    assert_eq!(cmp.results().count(), 3);
    assert!(cmp.results().all(|r| r.converged() && (r.root.unwrap() - 2.0).abs() < 1e-6));
    let methods: Vec<Method> = cmp.outcomes.keys().copied().collect();
    assert_eq!(methods, [Method::Bisection, Method::NewtonRaphson, Method::Secant]);
    Ok(())
}

#[test]
fn fastest_and_error_curves() -> TestResult {
    let cmp = compare("x^2 - 4", &all_three(0.0, 3.0), &SolveOptions::new())?;

    // newton needs 6 iterates, secant 7, bisection about 22
    assert_eq!(cmp.fastest(), Some(Method::NewtonRaphson));

    let curves = cmp.error_curves();
    assert_eq!(curves.len(), 3);
    let newton = &curves[&Method::NewtonRaphson];
    assert_eq!(newton.len(), 5);
    assert_eq!(newton[0].0, 2);
    assert!((newton[0].1 - 5.0 / 6.0).abs() < 1e-12);
    Ok(())
}

fn named(values: &'static [(&'static str, f64)]) -> impl Fn(&str) -> Option<f64> {
    move |name| values.iter().find(|(key, _)| *key == name).map(|&(_, v)| v)
}

#[test]
fn named_requests_fail_per_entry() -> TestResult {
    let requests = [
        ("bisection", named(&[("a", 0.0), ("b", 3.0)])),
        ("Newton", named(&[("x0", 3.0)])),
        ("secant", named(&[("x0", 1.0)])),
        ("brent", named(&[("a", 0.0), ("b", 3.0)])),
    ];
    let cmp = compare_named("x^2 - 4", &requests, &SolveOptions::new())?;

    assert!(cmp.get(Method::Bisection).and_then(|o| o.result()).unwrap().converged());
    assert!(cmp.get(Method::NewtonRaphson).and_then(|o| o.result()).unwrap().converged());

    let missing = cmp.get(Method::Secant).and_then(|o| o.failure()).unwrap();
    assert_eq!(missing.kind, FailureKind::MissingParameter);
    assert!(missing.message.contains("x1"));

    assert_eq!(cmp.unresolved.len(), 1);
    assert_eq!(cmp.unresolved["brent"].kind, FailureKind::UnknownMethod);
    assert!(cmp.to_table().contains("brent"));
    Ok(())
}

#[test]
fn named_request_that_resolves_wins() -> TestResult {
    let requests = [
        ("secant", named(&[("x0", 1.0)])),
        ("secant", named(&[("x0", 1.0), ("x1", 3.0)])),
    ];
    let cmp = compare_named("x^2 - 4", &requests, &SolveOptions::new())?;

    assert!(cmp.get(Method::Secant).and_then(|o| o.result()).is_some());
    assert!(cmp.unresolved.is_empty());
    Ok(())
}

#[test]
fn positional_compare_leaves_nothing_unresolved() -> TestResult {
    let cmp = compare("x^2 - 4", &all_three(0.0, 3.0), &SolveOptions::new())?;
    assert!(cmp.unresolved.is_empty());
    Ok(())
}

#[test]
fn invalid_expression_fails_whole_comparison() {
    let err = compare("x +* 2", &all_three(0.0, 3.0), &SolveOptions::new()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidExpression);
}

#[test]
fn summary_table_has_a_row_per_method() -> TestResult {
    let cmp   = compare("x^2 - 4", &all_three(3.0, 5.0), &SolveOptions::new())?;
    let table = cmp.to_table();

    assert!(table.contains("bisection"));
    assert!(table.contains("newton-raphson"));
    assert!(table.contains("secant"));
    assert!(table.contains("invalid_bracket"));
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn serializes_for_transport() -> TestResult {
    let cmp  = compare("x^2 - 4", &all_three(3.0, 5.0), &SolveOptions::new())?;
    let json = serde_json::to_value(&cmp).unwrap();

    let outcomes = &json["outcomes"];
    assert_eq!(outcomes["bisection"]["outcome"], "failed");
    assert_eq!(outcomes["bisection"]["detail"]["kind"], "invalid_bracket");
    assert_eq!(outcomes["newton-raphson"]["outcome"], "solved");
    assert_eq!(outcomes["newton-raphson"]["detail"]["method"], "newton-raphson");
    assert_eq!(outcomes["secant"]["detail"]["termination"]["kind"], "tolerance_reached");
    assert_eq!(json["equation"], "x^2 - 4");
    Ok(())
}
