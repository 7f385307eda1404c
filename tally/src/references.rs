//! Renumbering of `$n` line references when lines move
//!
//! The rewrite works on tokens: each line-reference token found by the lexer
//! has its digits replaced in place, and every other byte of the line is kept
//! as typed.

use crate::parser::lexer::Lexer;
use crate::parser::token::TokenKind;
use std::borrow::Cow;

/// Adjust references after a line is inserted at 1-based `inserted_line`.
///
/// `$k` with `k >= inserted_line` becomes `$(k+1)`.
pub fn shift_for_insert(input: &str, inserted_line: usize) -> Cow<'_, str> {
    rewrite_line_references(input, |k| (k >= inserted_line).then(|| k.saturating_add(1)))
}

/// Adjust references after 1-based `removed_line` is deleted.
///
/// `$k` with `k > removed_line` becomes `$(k-1)`. References to the removed
/// line itself are left alone and stop resolving.
pub fn shift_for_removal(input: &str, removed_line: usize) -> Cow<'_, str> {
    rewrite_line_references(input, |k| (k > removed_line).then(|| k - 1))
}

/// All line numbers referenced in `input`, in order of appearance
pub fn line_references(input: &str) -> Vec<usize> {
    Lexer::new(input)
        .filter(|token| token.is(TokenKind::LineRef))
        .filter_map(|token| token.text.parse().ok())
        .collect()
}

/// Replace each `$k` for which `renumber(k)` returns a new number
fn rewrite_line_references(input: &str, renumber: impl Fn(usize) -> Option<usize>) -> Cow<'_, str> {
    let mut output = String::new();
    let mut copied_up_to = 0;

    for token in Lexer::new(input) {
        if !token.is(TokenKind::LineRef) {
            continue;
        }
        // Digit runs too long for usize are left as written
        let Some(new_number) = token.text.parse::<usize>().ok().and_then(&renumber) else {
            continue;
        };

        let digits_start = token.offset + 1;
        output.push_str(&input[copied_up_to..digits_start]);
        output.push_str(&new_number.to_string());
        copied_up_to = token.offset + token.len;
    }

    if copied_up_to == 0 {
        return Cow::Borrowed(input);
    }

    output.push_str(&input[copied_up_to..]);
    Cow::Owned(output)
}
