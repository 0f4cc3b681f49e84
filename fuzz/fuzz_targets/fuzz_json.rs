#![no_main]

use libfuzzer_sys::fuzz_target;
use rotor_core::Parser;
use rotor_core::ast::json::to_json;

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };

    let mut parser = Parser::new(src);
    let Ok(root) = parser.parse(false) else {
        return;
    };

    // Serialization of any successfully parsed tree must not panic and
    // always yields a module object.
    let json = to_json(parser.ast(), root);
    assert!(json.starts_with("{\"type\": \"module\", \"stmts\": ["));
    assert!(json.ends_with("]}") || json.ends_with('}'));
});
