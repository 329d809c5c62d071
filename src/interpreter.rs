//! Execution engine: owns the variable environment, drives the
//! lex → assemble → dispatch loop, and implements statement semantics.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use log::{debug, info, trace};

use crate::builtins::{self, Builtin};
use crate::char_source::CharSource;
use crate::environment::{Environment, VarType};
use crate::error::{InterpError, RuntimeError};
use crate::lexer::Lexer;
use crate::statement::{parse_statement, ArithOp, Operand, Statement};
use crate::token::Token;

/// Minimum capacity for a line buffer: the longest statement shape in the
/// grammar (a three-argument builtin call) fits in 11 tokens including its
/// `NoType` sentinel.
const LINE_BUFFER_CAPACITY: usize = 11;

/// `input` truncates to this many bytes before assigning.
const MAX_INPUT_BYTES: usize = 99;

pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Runs a whole program from `path`: opens the source, then repeatedly
    /// lexes, assembles, and dispatches one `;`-terminated line at a time
    /// with no intermediate representation persisted across statements.
    pub fn run_file(&mut self, path: &Path) -> Result<(), InterpError> {
        info!("Running program '{}'", path.display());

        let bytes = fs::read(path)?;
        let mut lexer = Lexer::new(CharSource::new(bytes));
        let mut buffer: Vec<Token> = Vec::with_capacity(LINE_BUFFER_CAPACITY);

        loop {
            let token = lexer.next_token()?;
            trace!("token: {token:?}");

            if token.is_end_of_line() {
                buffer.push(Token::NoType { line: token.line() });
                let statement = parse_statement(&buffer)?;
                debug!("statement: {statement:?}");
                self.execute(&statement, token.line())?;
                buffer.clear();
                continue;
            }

            if token.is_end_of_file() {
                // A non-empty buffer here means the file ended mid-statement;
                // the grammar requires every statement to be `;`-terminated,
                // so any partial line is discarded rather than executed.
                break;
            }

            buffer.push(token);
        }

        Ok(())
    }

    fn execute(&mut self, statement: &Statement, line: usize) -> Result<(), RuntimeError> {
        match statement {
            Statement::Declaration { name, var_type } => self.env.declare(name, *var_type, line),
            Statement::Output { name } => self.execute_output(name, line),
            Statement::Input { name, prompt } => self.execute_input(name, prompt, line),
            Statement::ReadFile { name, file } => self.execute_read_file(name, file, line),
            Statement::WriteFile { name, file } => self.execute_write_file(name, file, line),
            Statement::PlainAssign { name, rhs } => self.execute_plain_assign(name, rhs, line),
            Statement::BuiltinCallAssign { name, builtin, args } => {
                self.execute_builtin_call_assign(name, *builtin, args, line)
            }
            Statement::ArithmeticAssign { name, lhs, op, rhs } => {
                self.execute_arithmetic_assign(name, lhs, *op, rhs, line)
            }
        }
    }

    fn execute_output(&self, name: &str, line: usize) -> Result<(), RuntimeError> {
        let var = self.env.lookup(name, line)?;
        let mut stdout = io::stdout();
        stdout.write_all(&var.value).and_then(|()| stdout.write_all(b"\n")).map_err(|e| RuntimeError {
            line,
            message: format!("Failed to write output: {e}"),
        })
    }

    fn execute_input(&mut self, name: &str, prompt_name: &str, line: usize) -> Result<(), RuntimeError> {
        let prompt = self.env.lookup(prompt_name, line)?.value.clone();

        let mut stdout = io::stdout();
        stdout
            .write_all(&prompt)
            .and_then(|()| stdout.write_all(b": "))
            .and_then(|()| stdout.flush())
            .map_err(|e| RuntimeError {
                line,
                message: format!("Failed to write prompt: {e}"),
            })?;

        let mut raw = Vec::new();
        io::stdin().lock().read_until(b'\n', &mut raw).map_err(|e| RuntimeError {
            line,
            message: format!("Failed to read input: {e}"),
        })?;

        if raw.last() == Some(&b'\n') {
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
        }
        raw.truncate(MAX_INPUT_BYTES);

        // `input` never type-checks against the destination: a value
        // assigned to an INT variable may contain non-digit bytes.
        self.env.set_value(name, raw, line)
    }

    fn execute_read_file(&mut self, name: &str, file_var: &str, line: usize) -> Result<(), RuntimeError> {
        let base = self.env.lookup(file_var, line)?.value.clone();
        let path = text_file_path(&base);

        info!("Reading file '{path}'");

        let contents = fs::read(&path).map_err(|e| RuntimeError {
            line,
            message: format!("File not found: {path} ({e})"),
        })?;

        self.env.set_value(name, contents, line)
    }

    fn execute_write_file(&mut self, name: &str, file_var: &str, line: usize) -> Result<(), RuntimeError> {
        let base = self.env.lookup(file_var, line)?.value.clone();
        let path = text_file_path(&base);
        let contents = self.env.lookup(name, line)?.value.clone();

        info!("Writing file '{path}'");

        fs::write(&path, contents).map_err(|e| RuntimeError {
            line,
            message: format!("Could not write file: {path} ({e})"),
        })
    }

    fn execute_plain_assign(&mut self, name: &str, rhs: &Operand, line: usize) -> Result<(), RuntimeError> {
        let dest_type = self.env.lookup(name, line)?.var_type;

        let value = match rhs {
            Operand::Int(value) => {
                expect_type(dest_type, VarType::Int, name, line)?;
                value.to_string().into_bytes()
            }
            Operand::Str(value) => {
                expect_type(dest_type, VarType::Text, name, line)?;
                value.clone()
            }
            Operand::Ident(source_name) => {
                let source = self.env.lookup(source_name, line)?;
                if source.var_type != dest_type {
                    return Err(RuntimeError {
                        line,
                        message: format!(
                            "Type mismatch: cannot assign {} to {} variable '{name}'",
                            source.var_type.name(),
                            dest_type.name()
                        ),
                    });
                }
                source.value.clone()
            }
        };

        self.env.set_value(name, value, line)
    }

    fn execute_builtin_call_assign(
        &mut self,
        name: &str,
        builtin: Builtin,
        args: &[Operand],
        line: usize,
    ) -> Result<(), RuntimeError> {
        let dest_type = self.env.lookup(name, line)?.var_type;
        expect_type(dest_type, builtin.result_type(), name, line)?;

        let value = builtins::call(&self.env, builtin, args, line)?;
        self.env.set_value(name, value, line)
    }

    fn execute_arithmetic_assign(
        &mut self,
        name: &str,
        lhs: &Operand,
        op: ArithOp,
        rhs: &Operand,
        line: usize,
    ) -> Result<(), RuntimeError> {
        let dest_type = self.env.lookup(name, line)?.var_type;

        let value = match dest_type {
            VarType::Int => {
                let a = self.resolve_int(lhs, line)?;
                let b = self.resolve_int(rhs, line)?;
                match op {
                    ArithOp::Plus => a.wrapping_add(b).to_string().into_bytes(),
                    ArithOp::Minus => {
                        if a < b {
                            return Err(RuntimeError {
                                line,
                                message: "The answer cannot be negative!".to_owned(),
                            });
                        }
                        (a - b).to_string().into_bytes()
                    }
                }
            }
            VarType::Text => {
                let a = self.resolve_text(lhs, line)?;
                let b = self.resolve_text(rhs, line)?;
                match op {
                    ArithOp::Plus => {
                        let mut result = a;
                        result.extend_from_slice(&b);
                        result
                    }
                    ArithOp::Minus => {
                        if b.len() > a.len() {
                            return Err(RuntimeError {
                                line,
                                message: "Cannot subtract a longer string".to_owned(),
                            });
                        }
                        match builtins::find_subsequence(&a, &b) {
                            Some(pos) => {
                                let mut result = Vec::with_capacity(a.len() - b.len());
                                result.extend_from_slice(&a[..pos]);
                                result.extend_from_slice(&a[pos + b.len()..]);
                                result
                            }
                            None => a,
                        }
                    }
                }
            }
        };

        self.env.set_value(name, value, line)
    }

    fn resolve_int(&self, operand: &Operand, line: usize) -> Result<u32, RuntimeError> {
        match operand {
            Operand::Int(value) => Ok(*value),
            Operand::Ident(name) => {
                let var = self.env.lookup(name, line)?;
                if var.var_type != VarType::Int {
                    return Err(RuntimeError {
                        line,
                        message: format!("Expected an INT operand, '{name}' is {}", var.var_type.name()),
                    });
                }
                std::str::from_utf8(&var.value)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| RuntimeError {
                        line,
                        message: format!("Variable '{name}' does not hold a valid integer"),
                    })
            }
            Operand::Str(_) => Err(RuntimeError {
                line,
                message: "Expected an INT operand, found a string literal".to_owned(),
            }),
        }
    }

    fn resolve_text(&self, operand: &Operand, line: usize) -> Result<Vec<u8>, RuntimeError> {
        match operand {
            Operand::Str(value) => Ok(value.clone()),
            Operand::Ident(name) => {
                let var = self.env.lookup(name, line)?;
                if var.var_type != VarType::Text {
                    return Err(RuntimeError {
                        line,
                        message: format!("Expected a TEXT operand, '{name}' is {}", var.var_type.name()),
                    });
                }
                Ok(var.value.clone())
            }
            Operand::Int(_) => Err(RuntimeError {
                line,
                message: "Expected a TEXT operand, found an integer literal".to_owned(),
            }),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn expect_type(actual: VarType, expected: VarType, name: &str, line: usize) -> Result<(), RuntimeError> {
    if actual == expected {
        Ok(())
    } else {
        Err(RuntimeError {
            line,
            message: format!(
                "Type mismatch: '{name}' is {} but expected {}",
                actual.name(),
                expected.name()
            ),
        })
    }
}

/// Builds the `<base>.txt` path for `read`/`write`, in a fresh `String`
/// rather than mutating any token or variable buffer in place. `base` is
/// lossily converted if it isn't valid UTF-8: file names are a narrower
/// concern than TEXT content in general, and the OS path APIs this crate
/// targets expect a `str`.
fn text_file_path(base: &[u8]) -> String {
    format!("{}.txt", String::from_utf8_lossy(base))
}
