use crate::ast::{Expression, Span};
use crate::error::TallyError;
use crate::resource_limits::ResourceLimits;
use crate::TallyResult;

pub mod expressions;
pub mod lexer;
pub mod token;

use token::{Token, TokenKind};

/// Parse a token stream produced by [`lexer::tokenize`].
///
/// Returns `Ok(None)` when the stream holds nothing but `Eof`, i.e. the line
/// was blank.
pub fn parse(tokens: &[Token<'_>], limits: &ResourceLimits) -> TallyResult<Option<Expression>> {
    if tokens.iter().all(|t| t.is(TokenKind::Eof)) {
        return Ok(None);
    }

    if let Some(bad) = tokens.iter().find(|t| t.is(TokenKind::Error)) {
        return Err(lex_error(bad));
    }

    expressions::Parser::new(tokens, limits.max_expression_depth)
        .parse_line()
        .map(Some)
}

/// Tokenize and parse a single line of input
pub fn parse_line(input: &str, limits: &ResourceLimits) -> TallyResult<Option<Expression>> {
    if input.len() > limits.max_line_length_bytes {
        return Err(TallyError::ResourceLimitExceeded {
            limit_name: "max_line_length_bytes".to_string(),
            limit_value: limits.max_line_length_bytes.to_string(),
            actual_value: input.len().to_string(),
            suggestion: "Split the calculation over several lines".to_string(),
        });
    }

    let tokens = lexer::tokenize(input);
    parse(&tokens, limits)
}

fn lex_error(token: &Token<'_>) -> TallyError {
    let span = Span::new(token.offset, token.offset + token.len);
    let text = token.text;

    if text == "$" {
        TallyError::lex_with_suggestion(
            "Expected a line number or variable name after '$'",
            span,
            "Use $1 to refer to line 1, or $name for a variable",
        )
    } else if text.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        TallyError::lex_with_suggestion(
            format!("Unknown name '{}'", text),
            span,
            format!("Variables start with '$', as in ${}", text),
        )
    } else {
        TallyError::lex(format!("Unexpected character '{}'", text), span)
    }
}
