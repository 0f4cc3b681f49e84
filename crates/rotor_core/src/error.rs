//! Error types for the Rotor front-end.

use thiserror::Error;

use crate::loc::SrcLoc;

/// A lexical error produced by the scanner.
///
/// The parser forwards these as a [`ParseError`] with the message prefixed
/// by `"Lexer Error: "`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}")]
pub struct LexError {
    /// Human-readable description of the problem.
    pub msg: String,
    /// Position of the offending character.
    pub loc: SrcLoc,
}

/// The sole error value produced by [`crate::parser::Parser::parse`].
///
/// Covers unexpected tokens, unexpected end of input, forwarded lexer
/// errors, and (in `verify` mode) verification reports. Unexpected-EOF and
/// verification errors carry the unknown location `0:0`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}")]
pub struct ParseError {
    /// Human-readable description of the problem.
    pub msg: String,
    /// Source position the error points at (`0:0` when unknown).
    pub loc: SrcLoc,
}

impl ParseError {
    /// Create an error at a known source position.
    pub fn new(msg: impl Into<String>, loc: SrcLoc) -> Self {
        Self {
            msg: msg.into(),
            loc,
        }
    }
}
