use crate::evaluator::operations::{arithmetic_operation, finite, percentage_of, square_root};
use crate::{parse_line, BinaryOperator, Evaluator, ResourceLimits, Scope, TallyError};

fn eval_in(input: &str, scope: &Scope) -> (Result<f64, TallyError>, Scope) {
    let expr = parse_line(input, &ResourceLimits::default())
        .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", input, e))
        .unwrap_or_else(|| panic!("Expected an expression for {:?}", input));
    Evaluator::new().evaluate(&expr, scope)
}

fn eval(input: &str) -> Result<f64, TallyError> {
    eval_in(input, &Scope::new()).0
}

#[test]
fn test_basic_arithmetic() {
    let cases = vec![
        ("1 + 2", 3.0),
        ("10 - 4 - 3", 3.0),
        ("2 * 3 + 4", 10.0),
        ("2 * (3 + 4)", 14.0),
        ("7 / 2", 3.5),
        ("2^10", 1024.0),
        ("2^3^2", 512.0),
        ("-2^2", 4.0),
        ("-(2^2)", -4.0),
        ("--3", 3.0),
        ("0^0", 1.0),
        ("sqrt(16)", 4.0),
        ("SQRT(2 * 8) + 1", 5.0),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), Ok(expected), "input {:?}", input);
    }
}

#[test]
fn test_percentages() {
    let cases = vec![
        ("100 + 10%", 110.0),
        ("200 - 25%", 150.0),
        ("100 * 10%", 10.0),
        ("50 + 50 + 10%", 110.0),
        ("50%", 0.5),
        ("(100 + 10%) * 2", 220.0),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), Ok(expected), "input {:?}", input);
    }
}

#[test]
fn test_percent_base_uses_variable_value() {
    let scope = Scope::new().with_variable("price", 80.0);
    let (result, _) = eval_in("$price + 25%", &scope);
    assert_eq!(result, Ok(100.0));
}

#[test]
fn test_division_by_zero_messages() {
    let cases = vec![("1 / 0", "∞"), ("-5 / 0", "-∞"), ("0 / 0", "NaN")];
    for (input, message) in cases {
        let err = eval(input).expect_err(input);
        assert!(matches!(err, TallyError::DivisionByZero { .. }));
        assert_eq!(err.line_message(), message, "input {:?}", input);
    }
}

#[test]
fn test_negative_zero_divisor_is_still_zero() {
    let err = eval("3 / -0").unwrap_err();
    assert_eq!(err.line_message(), "∞");
}

#[test]
fn test_not_a_number() {
    let err = eval("sqrt(-4)").unwrap_err();
    assert_eq!(err, TallyError::NotANumber);
    assert_eq!(err.line_message(), "NaN");

    let err = eval("(-8)^0.5").unwrap_err();
    assert_eq!(err, TallyError::NotANumber);
}

#[test]
fn test_overflow() {
    let err = eval("10^400").unwrap_err();
    assert_eq!(err, TallyError::Overflow { negative: false });
    assert_eq!(err.line_message(), "∞");

    let err = eval("-(10^200) * 10^200").unwrap_err();
    assert_eq!(err.line_message(), "-∞");
}

#[test]
fn test_number_literal_too_large_for_f64() {
    let literal = format!("1{}", "0".repeat(400));
    let err = eval(&literal).unwrap_err();
    assert_eq!(err, TallyError::Overflow { negative: false });
}

#[test]
fn test_assignment_binds_into_scope() {
    let (result, scope) = eval_in("$rate = 0.2", &Scope::new());
    assert_eq!(result, Ok(0.2));
    assert_eq!(scope.variable("rate"), Some(0.2));
}

#[test]
fn test_assignment_inside_expression_is_visible_to_the_right() {
    let (result, scope) = eval_in("($a = 5) * $a", &Scope::new());
    assert_eq!(result, Ok(25.0));
    assert_eq!(scope.variable("a"), Some(5.0));
}

#[test]
fn test_reassignment_replaces_value() {
    let scope = Scope::new().with_variable("x", 1.0);
    let (result, scope) = eval_in("$x = $x + 1", &scope);
    assert_eq!(result, Ok(2.0));
    assert_eq!(scope.variable("x"), Some(2.0));
}

#[test]
fn test_undefined_references() {
    let err = eval("$missing * 2").unwrap_err();
    assert_eq!(err, TallyError::UndefinedVariable("missing".to_string()));
    assert_eq!(err.line_message(), "? $missing");

    let err = eval("$4 + 1").unwrap_err();
    assert_eq!(err, TallyError::UndefinedLine(4));
    assert_eq!(err.line_message(), "? $4");
}

#[test]
fn test_line_reference_reads_recorded_result() {
    let scope = Scope::new().with_line_result(1, 40.0);
    let (result, _) = eval_in("$1 * 2", &scope);
    assert_eq!(result, Ok(80.0));
}

#[test]
fn test_failed_evaluation_returns_assignments_made_before_failure() {
    let scope = Scope::new().with_variable("keep", 1.0);
    let (result, after) = eval_in("($new = 5) / 0", &scope);
    assert!(result.is_err());
    assert_eq!(after.variable("keep"), Some(1.0));
    assert_eq!(after.variable("new"), Some(5.0));
    assert_eq!(scope.variable("new"), None);
}

#[test]
fn test_failed_evaluation_without_assignment_returns_same_scope() {
    let scope = Scope::new().with_variable("keep", 1.0);
    let (result, after) = eval_in("$keep / 0", &scope);
    assert!(result.is_err());
    assert_eq!(after, scope);
}

#[test]
fn test_evaluation_does_not_touch_input_scope() {
    let scope = Scope::new();
    let (_, after) = eval_in("$a = 1", &scope);
    assert!(scope.is_empty());
    assert_eq!(after.variable("a"), Some(1.0));
}

#[test]
fn test_left_to_right_error_order() {
    // The left operand fails first
    let err = eval("$a + $b").unwrap_err();
    assert_eq!(err, TallyError::UndefinedVariable("a".to_string()));
}

#[test]
fn test_operations_directly() {
    assert_eq!(
        arithmetic_operation(6.0, &BinaryOperator::Divide, 4.0),
        Ok(1.5)
    );
    assert_eq!(
        arithmetic_operation(1.0, &BinaryOperator::Divide, 0.0),
        Err(TallyError::DivisionByZero { dividend: 1.0 })
    );
    assert_eq!(percentage_of(200.0, 10.0), Ok(20.0));
    assert_eq!(square_root(9.0), Ok(3.0));
    assert_eq!(finite(f64::NAN), Err(TallyError::NotANumber));
    assert_eq!(
        finite(f64::NEG_INFINITY),
        Err(TallyError::Overflow { negative: true })
    );
}
