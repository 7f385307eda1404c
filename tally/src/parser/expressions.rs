//! Recursive descent over the tokens of one line.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! line           := expression EOF
//! expression     := VARIABLE "=" additive | additive
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := percent (("*" | "/") percent)*
//! percent        := power "%"*
//! power          := unary ("^" power)?
//! unary          := "-" unary | primary
//! primary        := NUMBER | VARIABLE | LINE_REF
//!                 | SQRT "(" expression ")" | "(" expression ")"
//! ```
//!
//! A bare percentage on the right of `+` or `-` takes the left operand as its
//! base, so `100 + 10%` is `100 + 100 * 10 / 100`.

use crate::ast::{BinaryOperator, Expression, MathFunction};
use crate::error::TallyError;
use crate::parser::token::{Token, TokenKind};
use crate::TallyResult;
use std::sync::Arc;

pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    /// `tokens` must end with `Eof` and contain no `Error` tokens.
    pub fn new(tokens: &'t [Token<'a>], max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parse a complete line; everything up to `Eof` must be consumed.
    pub fn parse_line(&mut self) -> TallyResult<Expression> {
        let expr = self.expression()?;

        let token = self.current();
        if !token.is(TokenKind::Eof) {
            return Err(self.unexpected_trailing(token));
        }

        Ok(expr)
    }

    fn current(&self) -> Token<'a> {
        match self.tokens.get(self.pos) {
            Some(token) => *token,
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + t.len)
                    .unwrap_or_default();
                Token::new(TokenKind::Eof, "", end, 0)
            }
        }
    }

    fn peek_kind(&self, ahead: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + ahead).map(|t| t.kind)
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Run `f` one nesting level deeper, failing once the depth limit is hit
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> TallyResult<T>) -> TallyResult<T> {
        if self.depth >= self.max_depth {
            let token = self.current();
            return Err(TallyError::parse_with_suggestion(
                format!(
                    "Expression is nested more than {} levels deep",
                    self.max_depth
                ),
                token.span(),
                "Split the calculation over several lines",
            ));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expression(&mut self) -> TallyResult<Expression> {
        let is_assignment = self.peek_kind(0) == Some(TokenKind::Variable)
            && self.peek_kind(1) == Some(TokenKind::Equals);

        if !is_assignment {
            return self.additive();
        }

        let name = self.advance().text.to_string();
        self.advance();
        let value = self.additive()?;
        Ok(Expression::Assignment(name, Arc::new(value)))
    }

    fn additive(&mut self) -> TallyResult<Expression> {
        let mut left = self.multiplicative()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            self.advance();

            let right = self.multiplicative()?;
            let left_shared = Arc::new(left);
            let right = match right {
                Expression::Percent {
                    operand,
                    base: None,
                } => Expression::Percent {
                    operand,
                    base: Some(Arc::clone(&left_shared)),
                },
                other => other,
            };

            left = Expression::BinaryOp(left_shared, op, Arc::new(right));
        }

        Ok(left)
    }

    fn multiplicative(&mut self) -> TallyResult<Expression> {
        let mut left = self.percent()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Multiply => BinaryOperator::Multiply,
                TokenKind::Divide => BinaryOperator::Divide,
                _ => break,
            };
            self.advance();

            let right = self.percent()?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    fn percent(&mut self) -> TallyResult<Expression> {
        let mut expr = self.power()?;
        while self.current().is(TokenKind::Percent) {
            self.advance();
            expr = Expression::percent(expr);
        }
        Ok(expr)
    }

    fn power(&mut self) -> TallyResult<Expression> {
        let base = self.unary()?;

        if !self.current().is(TokenKind::Power) {
            return Ok(base);
        }
        self.advance();

        let exponent = self.nested(|p| p.power())?;
        Ok(Expression::binary(base, BinaryOperator::Power, exponent))
    }

    fn unary(&mut self) -> TallyResult<Expression> {
        if self.current().is(TokenKind::Minus) {
            self.advance();
            let operand = self.nested(|p| p.unary())?;
            return Ok(Expression::UnaryMinus(Arc::new(operand)));
        }

        self.primary()
    }

    fn primary(&mut self) -> TallyResult<Expression> {
        let token = self.current();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = token.text.parse::<f64>().map_err(|_| {
                    TallyError::parse(format!("Invalid number '{}'", token.text), token.span())
                })?;
                Ok(Expression::Number(value))
            }
            TokenKind::Variable => {
                self.advance();
                Ok(Expression::Variable(token.text.to_string()))
            }
            TokenKind::LineRef => {
                self.advance();
                let line = token.text.parse::<usize>().map_err(|_| {
                    TallyError::parse(
                        format!("Line reference ${} is out of range", token.text),
                        token.span(),
                    )
                })?;
                if line == 0 {
                    return Err(TallyError::parse_with_suggestion(
                        "Line reference $0 does not exist",
                        token.span(),
                        "Lines are numbered from $1",
                    ));
                }
                Ok(Expression::LineRef(line))
            }
            TokenKind::Sqrt => {
                self.advance();
                let open = self.current();
                if !open.is(TokenKind::LParen) {
                    return Err(TallyError::parse_with_suggestion(
                        "Expected '(' after sqrt",
                        open.span(),
                        "Write sqrt(16)",
                    ));
                }
                self.advance();
                let argument = self.nested(|p| p.expression())?;
                self.expect_closing(open)?;
                Ok(Expression::Function(MathFunction::Sqrt, Arc::new(argument)))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.nested(|p| p.expression())?;
                self.expect_closing(token)?;
                Ok(inner)
            }
            TokenKind::Eof => Err(TallyError::parse(
                "Expected a value at end of line",
                token.span(),
            )),
            TokenKind::RParen => Err(TallyError::parse(
                "Unexpected ')' without matching '('",
                token.span(),
            )),
            _ => Err(TallyError::parse(
                format!("Expected a value but found {}", token.kind),
                token.span(),
            )),
        }
    }

    fn expect_closing(&mut self, open: Token<'a>) -> TallyResult<()> {
        let token = self.current();
        if token.is(TokenKind::RParen) {
            self.advance();
            return Ok(());
        }

        if token.is(TokenKind::Eof) {
            return Err(TallyError::parse_with_suggestion(
                format!("Missing ')' for '(' at offset {}", open.offset),
                token.span(),
                "Add a closing ')'",
            ));
        }

        Err(TallyError::parse(
            format!("Expected ')' but found {}", token.kind),
            token.span(),
        ))
    }

    fn unexpected_trailing(&self, token: Token<'a>) -> TallyError {
        match token.kind {
            TokenKind::RParen => TallyError::parse(
                "Unexpected ')' without matching '('",
                token.span(),
            ),
            TokenKind::Equals => TallyError::parse_with_suggestion(
                "Unexpected '='",
                token.span(),
                "Only a single $name = ... assignment is allowed per line",
            ),
            _ => TallyError::parse(
                format!("Unexpected {} after the end of the expression", token.kind),
                token.span(),
            ),
        }
    }
}
