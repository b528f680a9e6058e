#![no_main]

use libfuzzer_sys::fuzz_target;
use muriel::frontend::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 never reaches the lexer
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s, "fuzz") {
            let _ = parser::parse(&tokens, "fuzz");
        }
    }
});
