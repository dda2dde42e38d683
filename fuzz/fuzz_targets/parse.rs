#![no_main]

use libfuzzer_sys::fuzz_target;
use nodelang::{lexer, parser, serialize};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the lexer
        let _ = lexer::lex(s);
        // Whatever parses must serialize to text that parses again
        if let Ok(module) = parser::parse(s) {
            let text = serialize::serialize_module(&module);
            assert!(parser::parse(&text).is_ok(), "serialized output failed to parse:\n{text}");
        }
    }
});
