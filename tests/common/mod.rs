use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

const TJ_PATH: &str = env!("CARGO_BIN_EXE_tj");

/// Writes `src` to a fresh `.tj` file under the OS temp directory and runs
/// the compiled interpreter against it.
pub fn run_script(src: &str) -> Output {
    let path = unique_temp_path("tj-integration", "tj");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(src.as_bytes())
        .unwrap();

    let output = Command::new(TJ_PATH).arg(&path).output().unwrap();
    let _ = std::fs::remove_file(&path);
    output
}

/// A process-unique path under the OS temp directory, so parallel tests
/// never collide on the same source or data file.
pub fn unique_temp_path(prefix: &str, extension: &str) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "{prefix}-{}-{id}.{extension}",
        std::process::id()
    ))
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}
