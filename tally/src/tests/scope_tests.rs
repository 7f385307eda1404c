use crate::Scope;

#[test]
fn test_empty_scope() {
    let scope = Scope::new();
    assert!(scope.is_empty());
    assert_eq!(scope.variable("x"), None);
    assert_eq!(scope.line_result(1), None);
}

#[test]
fn test_with_variable_returns_new_scope() {
    let original = Scope::new();
    let extended = original.with_variable("rate", 0.25);

    assert!(original.is_empty());
    assert_eq!(extended.variable("rate"), Some(0.25));
}

#[test]
fn test_with_line_result_returns_new_scope() {
    let original = Scope::new().with_line_result(1, 10.0);
    let extended = original.with_line_result(2, 20.0);

    assert_eq!(original.line_result(2), None);
    assert_eq!(extended.line_result(1), Some(10.0));
    assert_eq!(extended.line_result(2), Some(20.0));
}

#[test]
fn test_rebinding_replaces_value() {
    let scope = Scope::new().with_variable("x", 1.0).with_variable("x", 2.0);
    assert_eq!(scope.variable("x"), Some(2.0));
    assert_eq!(scope.variables().len(), 1);
}

#[test]
fn test_variable_names_are_sorted() {
    let scope = Scope::new()
        .with_variable("tax", 0.2)
        .with_variable("price", 40.0)
        .with_variable("discount", 5.0);
    let names: Vec<&str> = scope.variable_names().collect();
    assert_eq!(names, vec!["discount", "price", "tax"]);
}

#[test]
fn test_variables_and_lines_are_separate() {
    let scope = Scope::new().with_variable("1", 5.0);
    assert_eq!(scope.line_result(1), None);
    assert!(scope.line_results().is_empty());
}

#[test]
fn test_scope_serializes_as_maps() {
    let scope = Scope::new()
        .with_variable("a", 1.5)
        .with_line_result(1, 1.5);
    let value = serde_json::to_value(&scope).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "variables": { "a": 1.5 },
            "line_results": { "1": 1.5 }
        })
    );
}
