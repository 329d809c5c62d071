mod common;

use common::{run_script, stderr_of};

#[test]
fn integer_subtraction_underflow_is_a_fatal_error() {
    let output = run_script(
        "new int n; n := 3; new int m; m := 5; new int d; d := n - m; output d;",
    );

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("ERR! Line 1:"));
    assert!(stderr.contains("The answer cannot be negative!"));
}

#[test]
fn looking_up_an_undeclared_variable_is_a_fatal_error() {
    let output = run_script("output missing;");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Variable not found: missing"));
}

#[test]
fn redeclaring_a_variable_is_a_fatal_error() {
    let output = run_script("new int x; new int x;");

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("already declared"));
}

#[test]
fn text_subtraction_with_a_longer_operand_is_a_fatal_error() {
    let output = run_script("new text a; a := \"hi\"; new text b; b := \"hello\"; new text c; c := a - b;");

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Cannot subtract a longer string"));
}
