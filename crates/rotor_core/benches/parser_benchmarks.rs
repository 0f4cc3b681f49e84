//! Criterion benchmarks for the scanner and parser.
//!
//! Run with: `cargo bench --package rotor_core`

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use rotor_core::intern::StringTable;
use rotor_core::parser::Parser;
use rotor_core::parser::scanner::{Scanner, TokenKind};

/// A small but representative chunk of JavaScript, repeated to build the
/// benchmark corpus.
const SNIPPET: &str = r#"
function fib(n) {
    if (n < 2) return n;
    let a = 0, b = 1;
    for (let i = 2; i <= n; ++i) {
        let t = a + b;
        a = b;
        b = t;
    }
    return b;
}
let table = {kind: 'memo', values: [1, 2, 3, ...extra]};
for (let key in table) console.log(`${key}: ${table[key]}`);
let classify = (n) => n % 2 == 0 ? 'even' : 'odd';
try { fib(classify(10)); } catch (e) { throw e; }
"#;

fn corpus(repeats: usize) -> String {
    SNIPPET.repeat(repeats)
}

fn bench_scan(c: &mut Criterion) {
    let source = corpus(16);
    c.bench_function("scan_tokens", |b| {
        b.iter(|| {
            let mut strings = StringTable::new();
            let mut scanner = Scanner::new(black_box(&source));
            let mut count = 0usize;
            loop {
                let tok = scanner.next_token(&mut strings).unwrap();
                if tok.kind == TokenKind::Eof {
                    break;
                }
                count += 1;
            }
            black_box(count);
        });
    });
}

fn bench_parse(c: &mut Criterion) {
    let source = corpus(16);
    c.bench_function("parse_module", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(&source));
            let root = parser.parse(false).unwrap();
            black_box(root);
        });
    });
}

fn bench_parse_and_serialize(c: &mut Criterion) {
    let source = corpus(4);
    c.bench_function("parse_and_serialize", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(&source));
            let root = parser.parse(false).unwrap();
            black_box(rotor_core::ast::json::to_json(parser.ast(), root));
        });
    });
}

criterion_group!(benches, bench_scan, bench_parse, bench_parse_and_serialize);
criterion_main!(benches);
