//! The seven built-in operations callable as `name(args)` on the right-hand
//! side of `:=`.
//!
//! TEXT is an arbitrary byte sequence, not necessarily valid UTF-8, so every
//! operation here works on `&[u8]`/`Vec<u8>` and slices by byte offset. This
//! is both correct for non-ASCII content and panic-free: indexing a `String`
//! at a byte offset that isn't on a UTF-8 character boundary panics, but
//! indexing a byte slice never does.

use crate::environment::{Environment, VarType};
use crate::error::RuntimeError;
use crate::statement::Operand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Size,
    Subs,
    Locate,
    Insert,
    Override,
    AsText,
    AsString,
}

impl Builtin {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "size" => Some(Builtin::Size),
            "subs" => Some(Builtin::Subs),
            "locate" => Some(Builtin::Locate),
            "insert" => Some(Builtin::Insert),
            "override" => Some(Builtin::Override),
            "asText" => Some(Builtin::AsText),
            "asString" => Some(Builtin::AsString),
            _ => None,
        }
    }

    pub fn arg_count(&self) -> usize {
        match self {
            Builtin::Size => 1,
            Builtin::Subs => 3,
            Builtin::Locate => 3,
            Builtin::Insert => 3,
            Builtin::Override => 3,
            Builtin::AsText => 1,
            Builtin::AsString => 1,
        }
    }

    pub fn result_type(&self) -> VarType {
        match self {
            Builtin::Size => VarType::Int,
            Builtin::Subs => VarType::Text,
            Builtin::Locate => VarType::Int,
            Builtin::Insert => VarType::Text,
            Builtin::Override => VarType::Text,
            Builtin::AsText => VarType::Text,
            Builtin::AsString => VarType::Text,
        }
    }
}

/// Resolves an [`Operand`] that must be TEXT: a string literal, or an
/// identifier naming a TEXT variable.
fn resolve_text(env: &Environment, operand: &Operand, line: usize) -> Result<Vec<u8>, RuntimeError> {
    match operand {
        Operand::Str(value) => Ok(value.clone()),
        Operand::Ident(name) => {
            let var = env.lookup(name, line)?;
            if var.var_type != VarType::Text {
                return Err(RuntimeError {
                    line,
                    message: format!("Expected TEXT argument, '{name}' is {}", var.var_type.name()),
                });
            }
            Ok(var.value.clone())
        }
        Operand::Int(_) => Err(RuntimeError {
            line,
            message: "Expected TEXT argument, found an integer literal".to_owned(),
        }),
    }
}

/// Resolves an [`Operand`] that must be INT, accepting either a variable of
/// type INT or an integer literal (used for `asText`/`asString`'s operand).
fn resolve_int(env: &Environment, operand: &Operand, line: usize) -> Result<u32, RuntimeError> {
    match operand {
        Operand::Int(value) => Ok(*value),
        Operand::Ident(name) => {
            let var = env.lookup(name, line)?;
            if var.var_type != VarType::Int {
                return Err(RuntimeError {
                    line,
                    message: format!("Expected INT argument, '{name}' is {}", var.var_type.name()),
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
            message: "Expected INT argument, found a string literal".to_owned(),
        }),
    }
}

/// `subs`/`locate`/`insert`/`override` index and position arguments must be
/// literal integer constants, not identifiers (a faithfully-preserved quirk:
/// these were never resolved through variable lookup).
fn resolve_int_literal(operand: &Operand, line: usize) -> Result<u32, RuntimeError> {
    match operand {
        Operand::Int(value) => Ok(*value),
        _ => Err(RuntimeError {
            line,
            message: "Expected an integer literal argument".to_owned(),
        }),
    }
}

/// Runs a builtin call and returns its raw-byte result (callers decide which
/// variable type to assign it into, per [`Builtin::result_type`]).
pub fn call(
    env: &Environment,
    builtin: Builtin,
    args: &[Operand],
    line: usize,
) -> Result<Vec<u8>, RuntimeError> {
    if args.len() != builtin.arg_count() {
        return Err(RuntimeError {
            line,
            message: format!(
                "Expected {} argument(s), found {}",
                builtin.arg_count(),
                args.len()
            ),
        });
    }

    match builtin {
        Builtin::Size => {
            let s = resolve_text(env, &args[0], line)?;
            Ok(s.len().to_string().into_bytes())
        }
        Builtin::Subs => {
            let s = resolve_text(env, &args[0], line)?;
            let i = resolve_int_literal(&args[1], line)? as usize;
            let j = resolve_int_literal(&args[2], line)? as usize;
            let len = s.len();
            let i = i.min(len);
            let j = j.clamp(i, len);
            Ok(s[i..j].to_vec())
        }
        Builtin::Locate => {
            let big = resolve_text(env, &args[0], line)?;
            let small = resolve_text(env, &args[1], line)?;
            let start = resolve_int_literal(&args[2], line)? as usize;
            if start > big.len() {
                return Ok(b"0".to_vec());
            }
            let found = find_subsequence(&big[start..], &small).map(|offset| offset + start);
            Ok(found.unwrap_or(0).to_string().into_bytes())
        }
        Builtin::Insert => {
            let s = resolve_text(env, &args[0], line)?;
            let pos = resolve_int_literal(&args[1], line)? as usize;
            let ins = resolve_text(env, &args[2], line)?;
            if pos > s.len() {
                return Ok(s);
            }
            let mut result = Vec::with_capacity(s.len() + ins.len());
            result.extend_from_slice(&s[..pos]);
            result.extend_from_slice(&ins);
            result.extend_from_slice(&s[pos..]);
            Ok(result)
        }
        Builtin::Override => {
            let s = resolve_text(env, &args[0], line)?;
            let pos = (resolve_int_literal(&args[1], line)? as usize).min(s.len());
            let ovr = resolve_text(env, &args[2], line)?;
            let result_len = (pos + ovr.len()).min(s.len());
            let ovr_len = result_len - pos;
            let mut result = Vec::with_capacity(result_len);
            result.extend_from_slice(&s[..pos]);
            result.extend_from_slice(&ovr[..ovr_len]);
            Ok(result)
        }
        Builtin::AsText | Builtin::AsString => {
            let x = resolve_int(env, &args[0], line)?;
            Ok(x.to_string().into_bytes())
        }
    }
}

/// Byte-wise substring search. An empty `needle` never matches, matching the
/// convention used by [`call`]'s `ArithOp::Minus` handling for TEXT.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::VarType;

    fn env_with(name: &str, var_type: VarType, value: &[u8]) -> Environment {
        let mut env = Environment::new();
        env.declare(name, var_type, 1).unwrap();
        env.set_value(name, value.to_vec(), 1).unwrap();
        env
    }

    #[test]
    fn size_counts_bytes() {
        let env = env_with("s", VarType::Text, b"abcdef");
        let result = call(&env, Builtin::Size, &[Operand::Ident("s".into())], 1).unwrap();
        assert_eq!(result, b"6");
    }

    #[test]
    fn size_counts_raw_bytes_not_unicode_scalar_values() {
        let env = env_with("s", VarType::Text, "café".as_bytes());
        let result = call(&env, Builtin::Size, &[Operand::Ident("s".into())], 1).unwrap();
        assert_eq!(result, b"5");
    }

    #[test]
    fn subs_extracts_a_range() {
        let env = env_with("s", VarType::Text, b"hello world");
        let result = call(
            &env,
            Builtin::Subs,
            &[Operand::Ident("s".into()), Operand::Int(6), Operand::Int(11)],
            1,
        )
        .unwrap();
        assert_eq!(result, b"world");
    }

    #[test]
    fn subs_clamps_out_of_range_indices() {
        let env = env_with("s", VarType::Text, b"abc");
        let result = call(
            &env,
            Builtin::Subs,
            &[Operand::Ident("s".into()), Operand::Int(1), Operand::Int(99)],
            1,
        )
        .unwrap();
        assert_eq!(result, b"bc");
    }

    #[test]
    fn subs_on_a_multi_byte_index_never_panics() {
        let env = env_with("s", VarType::Text, "café".as_bytes());
        let result = call(
            &env,
            Builtin::Subs,
            &[Operand::Ident("s".into()), Operand::Int(3), Operand::Int(5)],
            1,
        )
        .unwrap();
        assert_eq!(result, &"café".as_bytes()[3..5]);
    }

    #[test]
    fn locate_finds_first_match_at_or_after_start() {
        let env = env_with("s", VarType::Text, b"abcdef");
        let result = call(
            &env,
            Builtin::Locate,
            &[
                Operand::Ident("s".into()),
                Operand::Str(b"cd".to_vec()),
                Operand::Int(0),
            ],
            1,
        )
        .unwrap();
        assert_eq!(result, b"2");
    }

    #[test]
    fn locate_returns_zero_when_not_found() {
        let env = env_with("s", VarType::Text, b"abcdef");
        let result = call(
            &env,
            Builtin::Locate,
            &[
                Operand::Ident("s".into()),
                Operand::Str(b"zz".to_vec()),
                Operand::Int(0),
            ],
            1,
        )
        .unwrap();
        assert_eq!(result, b"0");
    }

    #[test]
    fn insert_at_start_and_end() {
        let env = env_with("s", VarType::Text, b"abc");
        let at_start = call(
            &env,
            Builtin::Insert,
            &[Operand::Ident("s".into()), Operand::Int(0), Operand::Str(b"X".to_vec())],
            1,
        )
        .unwrap();
        assert_eq!(at_start, b"Xabc");

        let at_end = call(
            &env,
            Builtin::Insert,
            &[Operand::Ident("s".into()), Operand::Int(3), Operand::Str(b"X".to_vec())],
            1,
        )
        .unwrap();
        assert_eq!(at_end, b"abcX");
    }

    #[test]
    fn insert_at_a_multi_byte_index_never_panics() {
        let env = env_with("s", VarType::Text, "café".as_bytes());
        let result = call(
            &env,
            Builtin::Insert,
            &[Operand::Ident("s".into()), Operand::Int(4), Operand::Str(b"X".to_vec())],
            1,
        )
        .unwrap();
        let mut expected = "café".as_bytes()[..4].to_vec();
        expected.push(b'X');
        expected.extend_from_slice(&"café".as_bytes()[4..]);
        assert_eq!(result, expected);
    }

    #[test]
    fn insert_out_of_range_position_is_unchanged() {
        let env = env_with("s", VarType::Text, b"abc");
        let result = call(
            &env,
            Builtin::Insert,
            &[Operand::Ident("s".into()), Operand::Int(99), Operand::Str(b"X".to_vec())],
            1,
        )
        .unwrap();
        assert_eq!(result, b"abc");
    }

    #[test]
    fn override_at_zero_with_full_length_is_identity() {
        let env = env_with("s", VarType::Text, b"abc");
        let result = call(
            &env,
            Builtin::Override,
            &[Operand::Ident("s".into()), Operand::Int(0), Operand::Str(b"abc".to_vec())],
            1,
        )
        .unwrap();
        assert_eq!(result, b"abc");
    }

    #[test]
    fn override_truncates_to_the_original_length() {
        let env = env_with("s", VarType::Text, b"abcde");
        let result = call(
            &env,
            Builtin::Override,
            &[
                Operand::Ident("s".into()),
                Operand::Int(3),
                Operand::Str(b"XYZW".to_vec()),
            ],
            1,
        )
        .unwrap();
        assert_eq!(result, b"abcXY");
    }

    #[test]
    fn as_text_and_as_string_render_canonical_decimal() {
        let env = Environment::new();
        let a = call(&env, Builtin::AsText, &[Operand::Int(42)], 1).unwrap();
        let b = call(&env, Builtin::AsString, &[Operand::Int(42)], 1).unwrap();
        assert_eq!(a, b"42");
        assert_eq!(b, b"42");
    }
}
