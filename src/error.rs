//! Error types for every pipeline stage: one small `Display` + `Error`
//! struct per stage, so the driver can print `ERR! Line <n>:  <message>`
//! uniformly regardless of which stage failed.

use std::fmt::{self, Display, Formatter};
use std::io;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ERR! Line {}:  {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ERR! Line {}:  {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeError {
    pub line: usize,
    pub message: String,
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ERR! Line {}:  {}", self.line, self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Unifies the three fatal pipeline errors and file-system failures so the
/// driver can convert any of them into an exit code instead of each stage
/// exiting the process directly.
#[derive(Debug)]
pub enum InterpError {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
    Io(io::Error),
}

impl Display for InterpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InterpError::Lex(e) => write!(f, "{e}"),
            InterpError::Parse(e) => write!(f, "{e}"),
            InterpError::Runtime(e) => write!(f, "{e}"),
            InterpError::Io(e) => write!(f, "ERR!  {e}"),
        }
    }
}

impl std::error::Error for InterpError {}

impl From<LexError> for InterpError {
    fn from(value: LexError) -> Self {
        InterpError::Lex(value)
    }
}

impl From<ParseError> for InterpError {
    fn from(value: ParseError) -> Self {
        InterpError::Parse(value)
    }
}

impl From<RuntimeError> for InterpError {
    fn from(value: RuntimeError) -> Self {
        InterpError::Runtime(value)
    }
}

impl From<io::Error> for InterpError {
    fn from(value: io::Error) -> Self {
        InterpError::Io(value)
    }
}
