//! Scans one line of input into tokens.
//!
//! The lexer never fails: anything it does not recognize becomes a single
//! `Error` token. `tokenize` stops right after the first such token, while a
//! `Lexer` driven by hand keeps scanning past it.

use super::token::{Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

/// Tokenize a whole line.
///
/// The result always ends with an `Eof` token. If an `Error` token is
/// produced, it is followed directly by `Eof` and the rest of the line is not
/// scanned.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Eof => {
                tokens.push(token);
                break;
            }
            TokenKind::Error => {
                let end = token.offset + token.len;
                tokens.push(token);
                tokens.push(Token::new(TokenKind::Eof, "", end, 0));
                break;
            }
            _ => tokens.push(token),
        }
    }

    tokens
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    /// Advances the lexer and returns the next token.
    ///
    /// Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.bump() else {
            return Token::new(TokenKind::Eof, "", start, 0);
        };

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' | '−' => TokenKind::Minus,
            '*' | '×' => TokenKind::Multiply,
            '/' | '÷' => TokenKind::Divide,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Power,
            '=' => TokenKind::Equals,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '$' => return self.read_reference(start),
            c if c.is_ascii_digit() => return self.read_number(start, false),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                return self.read_number(start, true)
            }
            c if is_identifier_start(c) => return self.read_identifier(start),
            _ => TokenKind::Error,
        };

        self.token_from(kind, start)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn bump_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        self.bump_while(char::is_whitespace);
    }

    fn token_from(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token::new(kind, &self.input[start..self.pos], start, self.pos - start)
    }

    /// Digits with at most one `.`; the first character is already consumed.
    fn read_number(&mut self, start: usize, seen_dot: bool) -> Token<'a> {
        let mut seen_dot = seen_dot;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.pos += 1;
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        self.token_from(TokenKind::Number, start)
    }

    /// `$12` is a line reference, `$total` a variable; the `$` is consumed.
    fn read_reference(&mut self, start: usize) -> Token<'a> {
        let name_start = self.pos;
        let kind = match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                self.bump_while(|c| c.is_ascii_digit());
                TokenKind::LineRef
            }
            Some(c) if c.is_alphabetic() => {
                self.bump_while(is_identifier_continue);
                TokenKind::Variable
            }
            _ => return self.token_from(TokenKind::Error, start),
        };

        Token::new(
            kind,
            &self.input[name_start..self.pos],
            start,
            self.pos - start,
        )
    }

    /// Bare words: only `sqrt` is known, anything else is an error token.
    fn read_identifier(&mut self, start: usize) -> Token<'a> {
        self.bump_while(is_identifier_continue);
        let word = &self.input[start..self.pos];
        let kind = if word.eq_ignore_ascii_case("sqrt") {
            TokenKind::Sqrt
        } else {
            TokenKind::Error
        };
        self.token_from(kind, start)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    /// Yields every token up to, but not including, `Eof`. Error tokens do
    /// not stop iteration.
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
