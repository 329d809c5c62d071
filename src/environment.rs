//! The flat, insertion-ordered variable store.

use crate::error::RuntimeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
    Text,
}

impl VarType {
    pub fn name(&self) -> &'static str {
        match self {
            VarType::Int => "int",
            VarType::Text => "text",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "int" => Some(VarType::Int),
            "text" => Some(VarType::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub var_type: VarType,
    /// Raw bytes rather than a `String`: TEXT values are arbitrary byte
    /// sequences, not necessarily valid UTF-8, and INT values are their
    /// canonical decimal digits stored the same way.
    pub value: Vec<u8>,
}

/// An append-mostly ordered sequence of variables, live for the duration of
/// the program. Lookup is linear by name; first insertion wins.
#[derive(Debug, Default)]
pub struct Environment {
    vars: Vec<Variable>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new variable with an empty initial value. Redeclaring an
    /// existing name is a fatal error: silently shadowing it would make the
    /// first declaration permanently unreachable under first-insertion-wins
    /// lookup.
    pub fn declare(&mut self, name: &str, var_type: VarType, line: usize) -> Result<(), RuntimeError> {
        if self.vars.iter().any(|v| v.name == name) {
            return Err(RuntimeError {
                line,
                message: format!("Variable already declared: {name}"),
            });
        }

        self.vars.push(Variable {
            name: name.to_owned(),
            var_type,
            value: Vec::new(),
        });

        Ok(())
    }

    pub fn lookup(&self, name: &str, line: usize) -> Result<&Variable, RuntimeError> {
        self.vars.iter().find(|v| v.name == name).ok_or_else(|| RuntimeError {
            line,
            message: format!("Variable not found: {name}"),
        })
    }

    pub fn lookup_mut(&mut self, name: &str, line: usize) -> Result<&mut Variable, RuntimeError> {
        self.vars
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| RuntimeError {
                line,
                message: format!("Variable not found: {name}"),
            })
    }

    pub fn set_value(&mut self, name: &str, value: Vec<u8>, line: usize) -> Result<(), RuntimeError> {
        self.lookup_mut(name, line)?.value = value;
        Ok(())
    }
}
