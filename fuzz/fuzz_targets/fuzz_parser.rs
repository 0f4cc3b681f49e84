#![no_main]

use libfuzzer_sys::fuzz_target;
use rotor_core::Parser;

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing arbitrary input must either produce a module or a located
    // error, never panic.  Verify mode runs too, checking that every tree
    // the parser builds is structurally sound.
    let mut parser = Parser::new(src);
    let _ = parser.parse(true);
});
