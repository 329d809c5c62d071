//! Lexical tokens produced by the [`crate::lexer::Lexer`].
//!
//! Each variant carries its own well-typed payload instead of a single
//! untyped lexeme buffer with an integer tag, and its source line for
//! diagnostics.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// The closed, case-sensitive set of reserved words. An identifier lexeme
/// equal to one of these is retagged `Keyword` instead of `Identifier`.
pub static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "new", "int", "text", "size", "subs", "locate", "insert", "override", "read", "write",
        "from", "to", "input", "output", "asText", "asString",
    ]
    .into_iter()
    .collect()
});

/// `prompt` is recognized only positionally inside `input` statements; it is
/// never retagged by the lexer, so it stays an `Identifier` lexeme.
pub const PROMPT_PSEUDO_KEYWORD: &str = "prompt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Identifier { name: String, line: usize },
    IntConst { value: u32, line: usize },
    Operator { op: String, line: usize },
    StrConst { value: Vec<u8>, line: usize },
    Keyword { word: String, line: usize },
    EndOfLine { line: usize },
    ParenOpen { line: usize },
    ParenClose { line: usize },
    Comma { line: usize },
    EndOfFile { line: usize },
    /// Sentinel written past the last real token of a line.
    NoType { line: usize },
}

impl Token {
    pub fn line(&self) -> usize {
        match self {
            Token::Identifier { line, .. }
            | Token::IntConst { line, .. }
            | Token::Operator { line, .. }
            | Token::StrConst { line, .. }
            | Token::Keyword { line, .. }
            | Token::EndOfLine { line }
            | Token::ParenOpen { line }
            | Token::ParenClose { line }
            | Token::Comma { line }
            | Token::EndOfFile { line }
            | Token::NoType { line } => *line,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        match self {
            Token::IntConst { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_str_const(&self) -> Option<&[u8]> {
        match self {
            Token::StrConst { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Token::Keyword { word, .. } => Some(word),
            _ => None,
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.as_keyword() == Some(word)
    }

    pub fn as_operator(&self) -> Option<&str> {
        match self {
            Token::Operator { op, .. } => Some(op),
            _ => None,
        }
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.as_operator() == Some(op)
    }

    pub fn is_paren_open(&self) -> bool {
        matches!(self, Token::ParenOpen { .. })
    }

    pub fn is_paren_close(&self) -> bool {
        matches!(self, Token::ParenClose { .. })
    }

    pub fn is_comma(&self) -> bool {
        matches!(self, Token::Comma { .. })
    }

    pub fn is_end_of_line(&self) -> bool {
        matches!(self, Token::EndOfLine { .. })
    }

    pub fn is_end_of_file(&self) -> bool {
        matches!(self, Token::EndOfFile { .. })
    }

    pub fn is_no_type(&self) -> bool {
        matches!(self, Token::NoType { .. })
    }

    /// `input X prompt P` checks this positionally rather than via the
    /// keyword set, since `prompt` is a pseudo-keyword.
    pub fn is_prompt_pseudo_keyword(&self) -> bool {
        self.as_identifier() == Some(PROMPT_PSEUDO_KEYWORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_set_has_sixteen_members() {
        assert_eq!(KEYWORDS.len(), 16);
    }

    #[test]
    fn prompt_is_not_a_keyword() {
        assert!(!KEYWORDS.contains(PROMPT_PSEUDO_KEYWORD));
    }

    #[test]
    fn line_accessor_covers_every_variant() {
        let tok = Token::Comma { line: 3 };
        assert_eq!(tok.line(), 3);
    }
}
