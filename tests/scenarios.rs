use symcalc_rs::{CalcError, EvalConfig, Expression, LookupPolicy};

fn evaluate_with(text: &str, values: &str) -> f32 {
    let mut expression = Expression::new(text);
    assert!(expression.is_legally_matched(), "{} should be legally matched", text);
    expression.build_symbols();
    expression.load_symbol_values(values.as_bytes()).unwrap();
    expression.evaluate().unwrap()
}

#[test]
fn pending_addition_defers_to_multiplication() {
    assert_eq!(evaluate_with("2+3*4", ""), 14.0);
}

#[test]
fn array_element_plus_literal() {
    assert_eq!(evaluate_with("A[2]+3", "A 3 (0,10) (1,20) (2,30)"), 33.0);
}

#[test]
fn parenthesized_group_then_product() {
    assert_eq!(evaluate_with("(1+2)*3", ""), 9.0);
}

#[test]
fn unbound_scalar_reads_zero() {
    assert_eq!(evaluate_with("x+5", ""), 5.0);
}

#[test]
fn unbalanced_text_is_not_evaluated() {
    let mut expression = Expression::new("(1+2");
    assert!(!expression.is_legally_matched());
    assert!(matches!(expression.evaluate(), Err(CalcError::unbalanced_brackets)));
}

#[test]
fn mixed_expression_with_unrelated_values() {
    let values = "\
varx 3
arrayA 5 (0,3) (2,7) (4,1)
unused 99
b 2
";
    let result = evaluate_with("varx + arrayA[b] * (varx - arrayA[4 - b * 2])", values);
    // arrayA[0] = 3, so the group is 0 and the product vanishes
    assert_eq!(result, 3.0);
}

#[test]
fn subscripts_hold_groups_and_arrays() {
    let values = "a 3\nb 2\nA 5 (0,3) (1,2) (2,4) (3,5) (4,6)\nB 3 (0,1) (1,4) (2,0)";
    assert_eq!(evaluate_with("A[B[(a-b)*2]]", values), 3.0);
    assert_eq!(evaluate_with("(a + A[a - b]) / B[1]", values), 1.25);
}

#[test]
fn reevaluation_after_rebinding() {
    let mut expression = Expression::new("n * 2");
    expression.build_symbols();
    expression.load_symbol_values("n 3".as_bytes()).unwrap();
    assert_eq!(expression.evaluate().unwrap(), 6.0);
    expression.load_symbol_values("n 5".as_bytes()).unwrap();
    assert_eq!(expression.evaluate().unwrap(), 10.0);
}

#[test]
fn strict_lookup_reports_the_bad_subscript() {
    let config = EvalConfig::default().with_lookup(LookupPolicy::strict);
    let mut expression = Expression::with_config("A[3]", config);
    expression.load_symbol_values("A 3 (0,1)".as_bytes()).unwrap();
    let error = expression.evaluate().unwrap_err();
    assert_eq!(error.to_string(), "index 3 is out of range for 'A' of size 3");
}

#[test]
fn bad_value_line_names_its_line() {
    let mut expression = Expression::new("a + b");
    let error = expression.load_symbol_values("a 1\nb two".as_bytes()).unwrap_err();
    assert_eq!(error.to_string(), "line 2: 'two' is not a valid number");
}
