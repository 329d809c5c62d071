mod common;

use common::{run_script, stdout_of, unique_temp_path};

#[test]
fn write_then_read_round_trips_a_text_value() {
    let base = unique_temp_path("tj-file-io", "");
    let base = base.to_str().unwrap().trim_end_matches('.');

    let src = format!(
        "new text payload; payload := \"round trip\"; new text f; f := \"{base}\"; write payload to f; new text back; read back from f; output back;"
    );

    let output = run_script(&src);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "round trip\n");

    let _ = std::fs::remove_file(format!("{base}.txt"));
}

#[test]
fn reading_a_missing_file_is_a_fatal_error() {
    let base = unique_temp_path("tj-file-io-missing", "");
    let base = base.to_str().unwrap().trim_end_matches('.');

    let src = format!("new text f; f := \"{base}\"; new text x; read x from f;");

    let output = run_script(&src);

    assert!(!output.status.success());
}
