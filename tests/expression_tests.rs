use approx::assert_abs_diff_eq;
use function_chart::expr::{EvalError, Expression, MAX_DEPTH, MAX_SOURCE_LEN, evaluate};

#[test]
fn js_style_math_calls_evaluate_like_bare_names() {
    let x = 1.3;
    let prefixed = evaluate("Math.sin(x) + Math.cos(x)", x).expect("evaluates");
    let bare = evaluate("sin(x) + cos(x)", x).expect("evaluates");
    assert_abs_diff_eq!(prefixed, x.sin() + x.cos(), epsilon = 1e-12);
    assert_abs_diff_eq!(prefixed, bare, epsilon = 0.0);
}

#[test]
fn operator_precedence_and_associativity() {
    assert_eq!(evaluate("1 + 2 * 3", 0.0), Ok(7.0));
    assert_eq!(evaluate("(1 + 2) * 3", 0.0), Ok(9.0));
    assert_eq!(evaluate("10 - 4 - 3", 0.0), Ok(3.0));
    assert_eq!(evaluate("2 ^ 3 ^ 2", 0.0), Ok(512.0));
    assert_eq!(evaluate("2 ** 10", 0.0), Ok(1024.0));
    assert_eq!(evaluate("7 % 4", 0.0), Ok(3.0));
}

#[test]
fn unary_minus_binds_looser_than_power() {
    assert_eq!(evaluate("-x^2", 3.0), Ok(-9.0));
    assert_eq!(evaluate("(-x)^2", 3.0), Ok(9.0));
    assert_eq!(evaluate("2^-1", 0.0), Ok(0.5));
    assert_eq!(evaluate("--x", 4.0), Ok(4.0));
}

#[test]
fn numeric_literal_forms() {
    assert_eq!(evaluate(".5 + 2.5", 0.0), Ok(3.0));
    assert_abs_diff_eq!(evaluate("1e-3 * x", 2.0).expect("evaluates"), 0.002, epsilon = 1e-15);
    assert_eq!(evaluate("2E2", 0.0), Ok(200.0));
}

#[test]
fn constants_resolve_without_ambient_scope() {
    assert_abs_diff_eq!(
        evaluate("Math.PI", 0.0).expect("pi"),
        std::f64::consts::PI,
        epsilon = 0.0
    );
    assert_abs_diff_eq!(
        evaluate("tau / 2 - pi", 0.0).expect("tau"),
        0.0,
        epsilon = 1e-15
    );
    assert_abs_diff_eq!(evaluate("log(e)", 0.0).expect("e"), 1.0, epsilon = 1e-15);
    assert_abs_diff_eq!(
        evaluate("Math.SQRT2 ^ 2", 0.0).expect("sqrt2"),
        2.0,
        epsilon = 1e-12
    );
}

#[test]
fn multi_argument_functions() {
    assert_eq!(evaluate("max(1, x, 3)", 7.0), Ok(7.0));
    assert_eq!(evaluate("min(4, x)", -1.0), Ok(-1.0));
    assert_eq!(evaluate("hypot(3, 4)", 0.0), Ok(5.0));
    assert_eq!(evaluate("pow(2, 5)", 0.0), Ok(32.0));
    assert_abs_diff_eq!(
        evaluate("atan2(1, 1)", 0.0).expect("atan2"),
        std::f64::consts::FRAC_PI_4,
        epsilon = 1e-15
    );
}

#[test]
fn round_sends_halves_toward_positive_infinity() {
    assert_eq!(evaluate("round(x)", 2.5), Ok(3.0));
    assert_eq!(evaluate("round(x)", -2.5), Ok(-2.0));
    assert_eq!(evaluate("round(x)", -2.6), Ok(-3.0));
}

#[test]
fn non_finite_results_are_errors() {
    assert_eq!(evaluate("1 / x", 0.0), Err(EvalError::NonFinite { x: 0.0 }));
    assert_eq!(evaluate("sqrt(x)", -1.0), Err(EvalError::NonFinite { x: -1.0 }));
    assert_eq!(evaluate("log(x)", 0.0), Err(EvalError::NonFinite { x: 0.0 }));
}

#[test]
fn host_objects_and_unknown_names_are_rejected() {
    assert_eq!(
        Expression::compile("window"),
        Err(EvalError::UnknownIdentifier("window".to_owned()))
    );
    assert_eq!(
        Expression::compile("alert(1)"),
        Err(EvalError::UnknownFunction("alert".to_owned()))
    );
    assert_eq!(
        Expression::compile("y + 1"),
        Err(EvalError::UnknownIdentifier("y".to_owned()))
    );
    assert!(matches!(
        Expression::compile("x; 1"),
        Err(EvalError::UnexpectedChar { ch: ';', .. })
    ));
    assert!(matches!(
        Expression::compile("\"text\""),
        Err(EvalError::UnexpectedChar { ch: '"', .. })
    ));
}

#[test]
fn arity_is_checked_at_compile_time() {
    let err = Expression::compile("sin(x, 2)").expect_err("two args to sin");
    assert!(matches!(err, EvalError::Arity { function: "sin", found: 2, .. }));
    let err = Expression::compile("atan2(x)").expect_err("one arg to atan2");
    assert!(matches!(err, EvalError::Arity { function: "atan2", found: 1, .. }));
    assert!(err.is_compile_error());
}

#[test]
fn malformed_sources_fail_to_compile() {
    assert_eq!(Expression::compile(""), Err(EvalError::Empty));
    assert!(matches!(
        Expression::compile("(x + 1"),
        Err(EvalError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        Expression::compile("x x"),
        Err(EvalError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        Expression::compile("2 *"),
        Err(EvalError::UnexpectedToken { .. })
    ));
}

#[test]
fn cost_limits_are_enforced() {
    let long = format!("x{}", " + 1".repeat(MAX_SOURCE_LEN));
    assert_eq!(
        Expression::compile(&long),
        Err(EvalError::SourceTooLong {
            len: long.len(),
            limit: MAX_SOURCE_LEN
        })
    );

    let deep = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
    assert_eq!(
        Expression::compile(&deep),
        Err(EvalError::TooDeep { limit: MAX_DEPTH })
    );

    let shallow = format!("{}x{}", "(".repeat(8), ")".repeat(8));
    assert_eq!(evaluate(&shallow, 2.0), Ok(2.0));
}

#[test]
fn compiled_expression_is_reusable_and_displays_source() {
    let expression: Expression = "x^2 - 1".parse().expect("compiles");
    assert_eq!(expression.eval(0.0), Ok(-1.0));
    assert_eq!(expression.eval(3.0), Ok(8.0));
    assert_eq!(expression.source(), "x^2 - 1");
    assert_eq!(expression.to_string(), "x^2 - 1");
    assert!(!EvalError::NonFinite { x: 1.0 }.is_compile_error());
}
