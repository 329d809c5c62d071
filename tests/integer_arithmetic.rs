mod common;

use common::{run_script, stdout_of};

#[test]
fn adds_two_declared_integers() {
    let output = run_script(
        "new int x; x := 5; new int y; y := 7; new int z; z := x + y; output z;",
    );

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "12\n");
}

#[test]
fn addition_wraps_at_the_u32_boundary() {
    let output = run_script(
        "new int x; x := 4294967295; new int y; y := 2; new int z; z := x + y; output z;",
    );

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "1\n");
}

#[test]
fn subtraction_of_equal_operands_yields_zero() {
    let output = run_script("new int a; a := 9; new int b; b := 9; new int d; d := a - b; output d;");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0\n");
}
