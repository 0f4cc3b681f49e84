//! `rotor_core` — a JavaScript front-end.
//!
//! Rotor turns JavaScript source text into a typed abstract syntax tree:
//! a hand-written scanner feeds a recursive-descent parser with one-token
//! look-ahead, a rewind stack, and precedence climbing for expressions.
//! The tree lives in an index-based arena and can be serialized to JSON
//! for tests and tooling.
//!
//! # Crate layout
//!
//! - [`loc`] — line/column source locations.
//! - [`error`] — [`error::LexError`] and [`error::ParseError`].
//! - [`intern`] — the deduplicating string table behind all token text.
//! - [`parser`] — the scanner and the parser itself.
//! - [`ast`] — node definitions, the arena, `isa`, and the JSON serializer.
//! - [`analysis`] — post-parse structural verification (`verify` mode).
//!
//! # Example
//!
//! ```
//! use rotor_core::Parser;
//! use rotor_core::ast::json::to_json;
//!
//! let mut parser = Parser::new("let answer = 42;");
//! let root = parser.parse(false).unwrap();
//! let json = to_json(parser.ast(), root);
//! assert!(json.contains("\"var_decl\""));
//! ```

/// Post-parse structural verification.
pub mod analysis;
/// AST node definitions, arena storage, and JSON serialization.
pub mod ast;
/// Lexer and parser error types.
pub mod error;
/// String interning.
pub mod intern;
/// Line/column source locations.
pub mod loc;
/// Scanner and recursive-descent parser.
pub mod parser;

pub use ast::{Ast, Kind, Node, NodeId, NodeKind, isa};
pub use error::{LexError, ParseError};
pub use loc::SrcLoc;
pub use parser::Parser;
