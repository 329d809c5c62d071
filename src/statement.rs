//! The statement parser (dispatcher): consumes one `;`-delimited, `NoType`-
//! terminated token line and builds the [`Statement`] it denotes.

use crate::builtins::Builtin;
use crate::environment::VarType;
use crate::error::ParseError;
use crate::token::Token;

/// An arithmetic operator recognized inside `ArithmeticAssign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Plus,
    Minus,
}

/// A value appearing on the right-hand side of `:=`, as an argument to a
/// builtin, or as an operand of an arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Int(u32),
    Str(Vec<u8>),
    Ident(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Declaration {
        name: String,
        var_type: VarType,
    },
    Output {
        name: String,
    },
    Input {
        name: String,
        prompt: String,
    },
    ReadFile {
        name: String,
        file: String,
    },
    WriteFile {
        name: String,
        file: String,
    },
    PlainAssign {
        name: String,
        rhs: Operand,
    },
    BuiltinCallAssign {
        name: String,
        builtin: Builtin,
        args: Vec<Operand>,
    },
    ArithmeticAssign {
        name: String,
        lhs: Operand,
        op: ArithOp,
        rhs: Operand,
    },
}

fn line_of(tokens: &[Token]) -> usize {
    tokens.first().map(Token::line).unwrap_or(0)
}

fn parse_error(tokens: &[Token], message: impl Into<String>) -> ParseError {
    ParseError {
        line: line_of(tokens),
        message: message.into(),
    }
}

fn operand_of(token: &Token) -> Option<Operand> {
    match token {
        Token::IntConst { value, .. } => Some(Operand::Int(*value)),
        Token::StrConst { value, .. } => Some(Operand::Str(value.clone())),
        Token::Identifier { name, .. } => Some(Operand::Ident(name.clone())),
        _ => None,
    }
}

/// Parses one complete, `NoType`-terminated token line into a [`Statement`].
pub fn parse_statement(tokens: &[Token]) -> Result<Statement, ParseError> {
    match (tokens.first(), tokens.get(1)) {
        (Some(first), Some(second)) if first.is_keyword("new") => {
            parse_declaration(tokens, second)
        }
        (Some(first), Some(_)) if first.is_keyword("output") => parse_output(tokens),
        (Some(first), Some(_)) if first.is_keyword("input") => parse_input(tokens),
        (Some(first), Some(_)) if first.is_keyword("read") => parse_read_file(tokens),
        (Some(first), Some(_)) if first.is_keyword("write") => parse_write_file(tokens),
        (Some(first), Some(second)) if first.as_identifier().is_some() && second.is_operator("=") => {
            parse_assign(tokens)
        }
        _ => Err(parse_error(tokens, "Parsing error")),
    }
}

fn parse_declaration(tokens: &[Token], type_token: &Token) -> Result<Statement, ParseError> {
    let var_type = type_token
        .as_keyword()
        .and_then(VarType::from_keyword)
        .ok_or_else(|| parse_error(tokens, "Expected 'int' or 'text' after 'new'"))?;

    let name = tokens
        .get(2)
        .and_then(Token::as_identifier)
        .ok_or_else(|| parse_error(tokens, "Expected an identifier in declaration"))?
        .to_owned();

    expect_no_type(tokens, 3)?;

    Ok(Statement::Declaration { name, var_type })
}

fn parse_output(tokens: &[Token]) -> Result<Statement, ParseError> {
    let name = tokens
        .get(1)
        .and_then(Token::as_identifier)
        .ok_or_else(|| parse_error(tokens, "Expected an identifier after 'output'"))?
        .to_owned();

    expect_no_type(tokens, 2)?;

    Ok(Statement::Output { name })
}

fn parse_input(tokens: &[Token]) -> Result<Statement, ParseError> {
    let name = tokens
        .get(1)
        .and_then(Token::as_identifier)
        .ok_or_else(|| parse_error(tokens, "Expected an identifier after 'input'"))?
        .to_owned();

    let has_prompt = tokens.get(2).map(Token::is_prompt_pseudo_keyword).unwrap_or(false);
    if !has_prompt {
        return Err(parse_error(tokens, "Expected 'prompt' in input statement"));
    }

    let prompt = tokens
        .get(3)
        .and_then(Token::as_identifier)
        .ok_or_else(|| parse_error(tokens, "Expected an identifier after 'prompt'"))?
        .to_owned();

    expect_no_type(tokens, 4)?;

    Ok(Statement::Input { name, prompt })
}

fn parse_read_file(tokens: &[Token]) -> Result<Statement, ParseError> {
    let name = tokens
        .get(1)
        .and_then(Token::as_identifier)
        .ok_or_else(|| parse_error(tokens, "Expected an identifier after 'read'"))?
        .to_owned();

    if !tokens.get(2).map(|t| t.is_keyword("from")).unwrap_or(false) {
        return Err(parse_error(tokens, "Expected 'from' in read statement"));
    }

    let file = tokens
        .get(3)
        .and_then(Token::as_identifier)
        .ok_or_else(|| parse_error(tokens, "Expected an identifier after 'from'"))?
        .to_owned();

    expect_no_type(tokens, 4)?;

    Ok(Statement::ReadFile { name, file })
}

fn parse_write_file(tokens: &[Token]) -> Result<Statement, ParseError> {
    let name = tokens
        .get(1)
        .and_then(Token::as_identifier)
        .ok_or_else(|| parse_error(tokens, "Expected an identifier after 'write'"))?
        .to_owned();

    if !tokens.get(2).map(|t| t.is_keyword("to")).unwrap_or(false) {
        return Err(parse_error(tokens, "Expected 'to' in write statement"));
    }

    let file = tokens
        .get(3)
        .and_then(Token::as_identifier)
        .ok_or_else(|| parse_error(tokens, "Expected an identifier after 'to'"))?
        .to_owned();

    expect_no_type(tokens, 4)?;

    Ok(Statement::WriteFile { name, file })
}

/// Parses the three `IDENT := ...` shapes: plain assignment, a builtin call,
/// or an arithmetic expression.
fn parse_assign(tokens: &[Token]) -> Result<Statement, ParseError> {
    let name = tokens[0].as_identifier().unwrap().to_owned();

    match tokens.get(2) {
        Some(token) if token.as_keyword().and_then(Builtin::from_keyword).is_some() => {
            parse_builtin_call_assign(tokens, name)
        }
        Some(_) => {
            if tokens.get(3).map(Token::is_no_type).unwrap_or(false) {
                parse_plain_assign(tokens, name)
            } else {
                parse_arithmetic_assign(tokens, name)
            }
        }
        None => Err(parse_error(tokens, "Expected a value after ':='")),
    }
}

fn parse_plain_assign(tokens: &[Token], name: String) -> Result<Statement, ParseError> {
    let rhs = operand_of(&tokens[2]).ok_or_else(|| parse_error(tokens, "Invalid right-hand side in assignment"))?;

    Ok(Statement::PlainAssign { name, rhs })
}

fn parse_builtin_call_assign(tokens: &[Token], name: String) -> Result<Statement, ParseError> {
    let builtin = tokens[2].as_keyword().and_then(Builtin::from_keyword).unwrap();

    if !tokens.get(3).map(Token::is_paren_open).unwrap_or(false) {
        return Err(parse_error(tokens, "Expected '(' after builtin name"));
    }

    let mut args = vec![];
    let mut idx = 4;

    loop {
        match tokens.get(idx) {
            Some(token) if token.is_paren_close() => {
                idx += 1;
                break;
            }
            Some(token) => {
                let operand = operand_of(token)
                    .ok_or_else(|| parse_error(tokens, "Invalid argument in builtin call"))?;
                args.push(operand);
                idx += 1;

                match tokens.get(idx) {
                    Some(t) if t.is_comma() => idx += 1,
                    Some(t) if t.is_paren_close() => {}
                    _ => return Err(parse_error(tokens, "Expected ',' or ')' in argument list")),
                }
            }
            None => return Err(parse_error(tokens, "Unterminated argument list")),
        }
    }

    expect_no_type(tokens, idx)?;

    Ok(Statement::BuiltinCallAssign { name, builtin, args })
}

fn parse_arithmetic_assign(tokens: &[Token], name: String) -> Result<Statement, ParseError> {
    let lhs = operand_of(&tokens[2]).ok_or_else(|| parse_error(tokens, "Invalid left operand in expression"))?;

    let op = match tokens.get(3).and_then(Token::as_operator) {
        Some("+") => ArithOp::Plus,
        Some("-") => ArithOp::Minus,
        _ => return Err(parse_error(tokens, "Expected '+' or '-' in expression")),
    };

    let rhs = tokens
        .get(4)
        .and_then(operand_of)
        .ok_or_else(|| parse_error(tokens, "Invalid right operand in expression"))?;

    expect_no_type(tokens, 5)?;

    Ok(Statement::ArithmeticAssign { name, lhs, op, rhs })
}

fn expect_no_type(tokens: &[Token], index: usize) -> Result<(), ParseError> {
    if tokens.get(index).map(Token::is_no_type).unwrap_or(false) {
        Ok(())
    } else {
        Err(parse_error(tokens, "Parsing error"))
    }
}
