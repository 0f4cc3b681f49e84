//! Source locations.
//!
//! Every token and every AST node carries a [`SrcLoc`] naming the line and
//! column of the construct's first character.

use std::fmt;

/// A 1-based line/column pair in JavaScript source text.
///
/// The default value `0:0` is reserved for diagnostics that have no single
/// source position (unexpected end of input, verification reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SrcLoc {
    /// 1-based line number (0 when unknown).
    pub line: u32,
    /// 1-based column number, measured in Unicode scalar values.
    pub col: u32,
}

impl SrcLoc {
    /// Create a location from a line/column pair.
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for SrcLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
