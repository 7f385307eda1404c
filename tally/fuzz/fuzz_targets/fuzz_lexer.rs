#![no_main]

use libfuzzer_sys::fuzz_target;
use tally::parser::lexer::tokenize;
use tally::parser::token::TokenKind;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let tokens = tokenize(s);

        assert!(tokens.last().is_some_and(|t| t.is(TokenKind::Eof)));
        for token in &tokens {
            assert!(token.offset + token.len <= s.len());
        }
    }
});
