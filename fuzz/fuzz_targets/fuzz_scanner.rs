#![no_main]

use libfuzzer_sys::fuzz_target;
use rotor_core::intern::StringTable;
use rotor_core::parser::scanner::{Scanner, TokenKind};

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };

    let mut strings = StringTable::new();
    let mut scanner = Scanner::new(src);
    let mut last_line = 0u32;
    loop {
        match scanner.next_token(&mut strings) {
            // A lexical error ends the stream; it must never panic.
            Err(err) => {
                assert!(!err.msg.is_empty(), "error without a message");
                break;
            }
            Ok(tok) => {
                // Lines never move backwards.
                assert!(
                    tok.loc.line >= last_line,
                    "token at {} after line {}",
                    tok.loc,
                    last_line
                );
                last_line = tok.loc.line;
                if tok.kind == TokenKind::Eof {
                    break;
                }
                // Every token's text handle must resolve.
                let _ = strings.resolve(tok.text);
            }
        }
    }
});
