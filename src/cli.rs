//! Command-line argument parsing for the `tj` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for `tj`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The `.tj` source file to run. Defaults to `myprog.tj` in the current
    /// directory when omitted.
    #[arg(index = 1)]
    pub file: Option<PathBuf>,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of `tj`.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only `ERR!` failures are reported.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also logs warnings.
    #[value(alias("1"))]
    Warn,

    /// Also logs which file is being run and which files it reads or writes.
    #[value(alias("2"))]
    Info,

    /// Logs every statement as it executes.
    #[value(alias("3"))]
    Debug,

    /// Logs every token produced by the lexer.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
