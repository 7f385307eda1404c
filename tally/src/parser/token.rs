use crate::ast::Span;
use std::fmt;

/// Kinds of tokens recognized by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Multiply,
    Divide,
    Percent,
    Power,
    Equals,
    LParen,
    RParen,
    /// `$name`; the token text is the name without `$`
    Variable,
    /// `$n`; the token text is the digits only
    LineRef,
    Sqrt,
    Eof,
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Multiply => "'*'",
            TokenKind::Divide => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Power => "'^'",
            TokenKind::Equals => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Variable => "variable",
            TokenKind::LineRef => "line reference",
            TokenKind::Sqrt => "'sqrt'",
            TokenKind::Eof => "end of line",
            TokenKind::Error => "invalid input",
        };
        f.write_str(name)
    }
}

/// A token borrowed from the line it was scanned from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token's first character (including a leading `$`)
    pub offset: usize,
    /// Byte length of the whole token in the source, `$` included
    pub len: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, offset: usize, len: usize) -> Self {
        Self {
            kind,
            text,
            offset,
            len,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.offset + self.len)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
