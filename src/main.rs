//! `tj`: runs a `.tj` script, printing `ERR! Line <n>:  <message>` and
//! exiting with status 1 on any lexical, parse, runtime, or I/O failure.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use log::error;

use cli::Cli;
use tj_lang::interpreter::Interpreter;

fn main() -> ExitCode {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).expect("logger already initialized");

    let file: PathBuf = args.file.unwrap_or_else(|| PathBuf::from("myprog.tj"));

    let mut interpreter = Interpreter::new();
    match interpreter.run_file(&file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
