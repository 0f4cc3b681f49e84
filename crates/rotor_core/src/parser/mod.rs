//! Recursive-descent JavaScript parser.
//!
//! - [`scanner`] — the lexer feeding the parser.
//! - [`Parser`] — the parser itself; see [`Parser::parse`].
//!
//! The parser keeps a single current token plus a LIFO *rewind stack*:
//! [`Parser::rewind`] pushes the current token and installs an older one,
//! which is how every look-ahead decision (statement terminators, `else`,
//! arrow heads, `for` heads, postfix chains) backs out.  Expressions are
//! parsed by precedence climbing: a unary-or-atomic prefix, then
//! [`Parser::parse_bin_op`] absorbing operators by their tabulated
//! precedence and associativity.
//!
//! Error handling is first-error-wins: every helper returns
//! `Result<NodeId, ParseError>` and unwinds with `?`; no recovery is
//! attempted.  Lexer errors are forwarded with a `"Lexer Error: "` prefix,
//! and unexpected end of input reports the location `0:0`.

pub mod scanner;

use smallvec::SmallVec;

use crate::analysis;
use crate::ast::{Ast, Kind, NodeId, NodeKind};
use crate::error::ParseError;
use crate::loc::SrcLoc;
use crate::parser::scanner::{Keyword, Scanner, Token, TokenKind};

type PResult = Result<NodeId, ParseError>;

// ─────────────────────────────────────────────────────────────────────────────
// Token classification
// ─────────────────────────────────────────────────────────────────────────────

/// Tokens that may legally follow a complete statement.  `)` and `}` are
/// rewound for the enclosing construct; `;` is consumed.
fn is_stmt_end(t: &Token) -> bool {
    matches!(
        t.kind,
        TokenKind::Semicolon | TokenKind::RightParen | TokenKind::RightBrace
    )
}

/// Tokens that may legally follow a number or string literal.
fn is_follow_expression(t: &Token) -> bool {
    if t.kind == TokenKind::Keyword {
        return matches!(
            t.kw,
            Some(Keyword::Typeof) | Some(Keyword::Instanceof) | Some(Keyword::In)
        );
    }
    matches!(
        t.kind,
        TokenKind::Semicolon
            | TokenKind::Dot
            | TokenKind::Comma
            | TokenKind::RightParen
            | TokenKind::RightBracket
            | TokenKind::RightBrace
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::StarStar
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Equal
            | TokenKind::EqualEqual
            | TokenKind::EqualEqualEqual
            | TokenKind::BangEqual
            | TokenKind::BangEqualEqual
            | TokenKind::Greater
            | TokenKind::Less
            | TokenKind::GreaterEqual
            | TokenKind::LessEqual
            | TokenKind::LessLess
            | TokenKind::GreaterGreater
            | TokenKind::GreaterGreaterGreater
            | TokenKind::Ampersand
            | TokenKind::Pipe
            | TokenKind::Caret
            | TokenKind::Question
            | TokenKind::Colon
            | TokenKind::AmpersandAmpersand
            | TokenKind::PipePipe
            | TokenKind::PlusEqual
            | TokenKind::MinusEqual
            | TokenKind::PercentEqual
            | TokenKind::StarEqual
            | TokenKind::SlashEqual
            | TokenKind::StarStarEqual
            | TokenKind::LessLessEqual
            | TokenKind::GreaterGreaterEqual
            | TokenKind::GreaterGreaterGreaterEqual
            | TokenKind::AmpersandEqual
            | TokenKind::PipeEqual
            | TokenKind::CaretEqual
            | TokenKind::TemplateMiddle
            | TokenKind::TemplateEnd
    )
}

/// Tokens that terminate an expression.  A comma only terminates when it is
/// acting as a list separator rather than the comma operator.
fn is_expression_end(t: &Token, comma_is_operator: bool) -> bool {
    match t.kind {
        TokenKind::Semicolon
        | TokenKind::RightParen
        | TokenKind::RightBrace
        | TokenKind::RightBracket
        | TokenKind::TemplateMiddle
        | TokenKind::TemplateEnd
        | TokenKind::Colon => true,
        TokenKind::Comma => !comma_is_operator,
        _ => false,
    }
}

/// Unary prefix operators, including the keyword-shaped ones.
fn is_unary_prefix_op(t: &Token) -> bool {
    if t.kind == TokenKind::Keyword {
        return matches!(
            t.kw,
            Some(Keyword::Typeof) | Some(Keyword::Void) | Some(Keyword::Delete)
        );
    }
    matches!(
        t.kind,
        TokenKind::PlusPlus
            | TokenKind::MinusMinus
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Bang
            | TokenKind::Tilde
    )
}

/// Binary infix operators, including `? :`, the assignment family, and the
/// keyword-shaped `in`/`instanceof`.
fn is_binary_operator(t: &Token, comma_is_operator: bool) -> bool {
    if t.kind == TokenKind::Comma {
        return comma_is_operator;
    }
    if t.kind == TokenKind::Keyword {
        return matches!(t.kw, Some(Keyword::Instanceof) | Some(Keyword::In));
    }
    precedence(t) > 0
}

/// Infix operator precedence, higher binds tighter.  Returns `-1` for
/// non-operators.
fn precedence(t: &Token) -> i32 {
    match t.kind {
        TokenKind::Comma => 1,
        TokenKind::Equal
        | TokenKind::PlusEqual
        | TokenKind::MinusEqual
        | TokenKind::StarEqual
        | TokenKind::SlashEqual
        | TokenKind::PercentEqual
        | TokenKind::StarStarEqual
        | TokenKind::LessLessEqual
        | TokenKind::GreaterGreaterEqual
        | TokenKind::GreaterGreaterGreaterEqual
        | TokenKind::AmpersandEqual
        | TokenKind::PipeEqual
        | TokenKind::CaretEqual => 3,
        TokenKind::Question => 4,
        TokenKind::PipePipe => 5,
        TokenKind::AmpersandAmpersand => 6,
        TokenKind::Pipe => 7,
        TokenKind::Caret => 8,
        TokenKind::Ampersand => 9,
        TokenKind::EqualEqual
        | TokenKind::EqualEqualEqual
        | TokenKind::BangEqual
        | TokenKind::BangEqualEqual => 10,
        TokenKind::Less | TokenKind::LessEqual | TokenKind::Greater | TokenKind::GreaterEqual => 11,
        TokenKind::LessLess | TokenKind::GreaterGreater | TokenKind::GreaterGreaterGreater => 12,
        TokenKind::Plus | TokenKind::Minus => 13,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 14,
        TokenKind::StarStar => 15,
        TokenKind::Keyword => match t.kw {
            Some(Keyword::In) | Some(Keyword::Instanceof) => 11,
            _ => -1,
        },
        _ => -1,
    }
}

/// Grouping direction for same-precedence operator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    LeftToRight,
    RightToLeft,
}

fn associativity(t: &Token) -> Assoc {
    match t.kind {
        TokenKind::Equal
        | TokenKind::PlusEqual
        | TokenKind::MinusEqual
        | TokenKind::StarEqual
        | TokenKind::SlashEqual
        | TokenKind::PercentEqual
        | TokenKind::StarStarEqual
        | TokenKind::LessLessEqual
        | TokenKind::GreaterGreaterEqual
        | TokenKind::GreaterGreaterGreaterEqual
        | TokenKind::AmpersandEqual
        | TokenKind::PipeEqual
        | TokenKind::CaretEqual
        | TokenKind::Question
        | TokenKind::StarStar => Assoc::RightToLeft,
        _ => Assoc::LeftToRight,
    }
}

/// Tokens usable as an object-literal key.
fn is_possible_object_key(t: &Token) -> bool {
    t.kind.is_number_literal()
        || matches!(t.kind, TokenKind::StringLiteral | TokenKind::Identifier)
}

fn is_var_decl_kw(t: &Token) -> bool {
    matches!(
        t.kw,
        Some(Keyword::Var) | Some(Keyword::Let) | Some(Keyword::Const)
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Parser
// ─────────────────────────────────────────────────────────────────────────────

/// Recursive-descent parser producing a [`crate::ast::Kind::Module`] tree.
///
/// A parser can be reused: [`Parser::parse`] resets all internal state
/// (arena included) and re-scans the source from the beginning.
///
/// # Example
///
/// ```
/// use rotor_core::ast::json::to_json;
/// use rotor_core::parser::Parser;
///
/// let mut parser = Parser::new("1 + 2");
/// let root = parser.parse(false).unwrap();
/// assert!(to_json(parser.ast(), root).starts_with("{\"type\": \"module\""));
/// ```
pub struct Parser<'src> {
    source: &'src str,
    scanner: Scanner<'src>,
    ast: Ast,
    current: Token,
    rewind_stack: SmallVec<[Token; 2]>,
}

impl<'src> Parser<'src> {
    /// Create a parser over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            scanner: Scanner::new(source),
            ast: Ast::new(),
            current: Token::eof(SrcLoc::default()),
            rewind_stack: SmallVec::new(),
        }
    }

    /// The arena holding the most recent parse's nodes and strings.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Consume the parser, keeping the arena.
    pub fn into_ast(self) -> Ast {
        self.ast
    }

    /// Parse the source to end of input, returning the module root.
    ///
    /// With `verify` set, a successful parse is followed by the structural
    /// verification pass; a non-empty report becomes a [`ParseError`] whose
    /// message is the newline-prefixed report, at location `0:0`.
    pub fn parse(&mut self, verify: bool) -> PResult {
        self.reset();
        let mut stmts = Vec::new();
        while self.advance()? {
            stmts.push(self.parse_statement()?);
        }
        let root = self.ast.alloc(SrcLoc::default(), NodeKind::Module { stmts });
        if verify
            && let Some(report) = analysis::verify_ast(&self.ast, root)
        {
            return Err(ParseError::new(format!("\n{report}"), SrcLoc::default()));
        }
        Ok(root)
    }

    fn reset(&mut self) {
        self.scanner = Scanner::new(self.source);
        self.ast.clear();
        self.current = Token::eof(SrcLoc::default());
        self.rewind_stack.clear();
    }

    // ── Token plumbing ──────────────────────────────────────────────────────

    /// Install the next token as current.  Pops the rewind stack first;
    /// otherwise pulls the next non-comment token from the scanner.
    /// `Ok(false)` means end of input.
    fn advance(&mut self) -> Result<bool, ParseError> {
        if let Some(tok) = self.rewind_stack.pop() {
            self.current = tok;
            return Ok(true);
        }
        loop {
            let tok = self
                .scanner
                .next_token(self.ast.strings_mut())
                .map_err(|e| ParseError::new(format!("Lexer Error: {}", e.msg), e.loc))?;
            match tok.kind {
                TokenKind::Eof => return Ok(false),
                TokenKind::LineComment | TokenKind::BlockComment => continue,
                _ => {
                    self.current = tok;
                    return Ok(true);
                }
            }
        }
    }

    /// [`Parser::advance`], but end of input is an error carrying `msg`.
    fn advance_or(&mut self, msg: &str) -> Result<(), ParseError> {
        if self.advance()? {
            Ok(())
        } else {
            Err(ParseError::new(msg, SrcLoc::default()))
        }
    }

    /// Push the current token back and make `tok` current again.
    fn rewind(&mut self, tok: Token) {
        self.rewind_stack.push(self.current);
        self.current = tok;
    }

    fn expect(&self, kind: TokenKind) -> Result<(), ParseError> {
        if self.current.kind == kind {
            Ok(())
        } else {
            Err(self.error_here(&format!(
                "Unexpected token. Expected: {:?}. Was: {:?}",
                kind, self.current.kind
            )))
        }
    }

    fn expect_any(&self, kinds: &[TokenKind]) -> Result<(), ParseError> {
        if kinds.contains(&self.current.kind) {
            Ok(())
        } else {
            Err(self.error_here(&format!(
                "Unexpected token. Expected one of: {:?}. Was: {:?}",
                kinds, self.current.kind
            )))
        }
    }

    fn error_here(&self, msg: &str) -> ParseError {
        ParseError::new(msg, self.current.loc)
    }

    fn text(&self, tok: &Token) -> &str {
        self.ast.strings().resolve(tok.text)
    }

    // ── Statements ──────────────────────────────────────────────────────────

    fn parse_statement(&mut self) -> PResult {
        let stmt = match self.current.kind {
            TokenKind::Semicolon => {
                return Ok(self.ast.alloc(self.current.loc, NodeKind::EmptyStmt {}));
            }
            TokenKind::LeftBrace => return self.parse_block_or_object(false),
            TokenKind::Keyword => self.parse_keyword_stmt()?,
            TokenKind::Identifier => {
                let ident = self.current;
                if !self.advance()? {
                    // Lone trailing identifier.
                    self.parse_expression(true)?
                } else if self.current.kind == TokenKind::Colon {
                    let loc = self.current.loc;
                    self.advance_or("Unexpected EOF after label")?;
                    let body = self.parse_statement()?;
                    self.ast.alloc(
                        loc,
                        NodeKind::LabelStmt {
                            label: ident.text,
                            stmt: body,
                        },
                    )
                } else {
                    self.rewind(ident);
                    self.parse_expression(true)?
                }
            }
            _ => self.parse_expression(true)?,
        };
        // Statement terminator: `)`/`}` belong to the enclosing construct
        // and are rewound; a bare `;` is consumed.
        let final_tok = self.current;
        if self.advance()? {
            if !is_stmt_end(&self.current) {
                return Err(self.error_here(&format!(
                    "Unexpected token after statement: {:?}",
                    self.current.kind
                )));
            }
            if self.current.kind != TokenKind::Semicolon {
                self.rewind(final_tok);
            }
        }
        Ok(stmt)
    }

    fn parse_keyword_stmt(&mut self) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::Keyword);
        match self.current.kw {
            Some(Keyword::Function) => self.parse_function_stmt(),
            Some(Keyword::If) => self.parse_if_stmt(),
            Some(Keyword::Do) => self.parse_do_while(),
            Some(Keyword::While) => self.parse_while_stmt(),
            Some(Keyword::For) => self.parse_for_stmt(),
            Some(Keyword::Switch) => self.parse_switch_stmt(),
            Some(Keyword::Break) => {
                let loc = self.current.loc;
                self.skip_jump_label()?;
                Ok(self.ast.alloc(loc, NodeKind::BreakStmt { label: None }))
            }
            Some(Keyword::Continue) => {
                let loc = self.current.loc;
                self.skip_jump_label()?;
                Ok(self.ast.alloc(loc, NodeKind::ContinueStmt { label: None }))
            }
            Some(Keyword::Return) => self.parse_return_stmt(),
            Some(Keyword::Throw) => self.parse_throw_stmt(),
            Some(Keyword::Try) => self.parse_try_stmt(),
            Some(Keyword::Import) => Err(self.error_here("Not implemented (import statement)")),
            Some(Keyword::Export) => Err(self.error_here("Not implemented (export statement)")),
            Some(Keyword::Class) => Err(self.error_here("Not implemented (class statement)")),
            Some(Keyword::Super) => {
                let id = self.ast.alloc(
                    self.current.loc,
                    NodeKind::IdentifierExpr {
                        str: self.current.text,
                    },
                );
                self.advance_or("Unexpected EOF after super")?;
                self.expect(TokenKind::LeftParen)?;
                self.parse_call(id)
            }
            _ if is_var_decl_kw(&self.current) => self.parse_var_decl(),
            _ => self.parse_keyword_expr(),
        }
    }

    /// Consume the optional label after `break`/`continue`.  The label is
    /// accepted but not attached to the statement.
    fn skip_jump_label(&mut self) -> Result<(), ParseError> {
        let kw_tok = self.current;
        if self.advance()? && self.current.kind != TokenKind::Identifier {
            self.rewind(kw_tok);
        }
        Ok(())
    }

    fn parse_keyword_expr(&mut self) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::Keyword);
        if is_unary_prefix_op(&self.current) {
            self.parse_unary_or_atomic_expr()
        } else {
            self.parse_atomic_keyword_expr()
        }
    }

    fn parse_if_stmt(&mut self) -> PResult {
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after if")?;
        self.expect(TokenKind::LeftParen)?;
        self.advance_or("Unexpected EOF after if (")?;
        let condition = self.parse_expression(true)?;
        self.advance_or("Unexpected EOF after if condition")?;
        self.expect(TokenKind::RightParen)?;
        self.advance_or("Unexpected EOF, expected if body")?;
        let body = self.parse_statement()?;
        let mut else_stmt = None;
        let last = self.current;
        if self.advance()? {
            if self.current.kw == Some(Keyword::Else) {
                self.advance_or("Unexpected EOF after else")?;
                else_stmt = Some(self.parse_statement()?);
            } else {
                self.rewind(last);
            }
        }
        Ok(self.ast.alloc(
            loc,
            NodeKind::IfStmt {
                condition,
                body,
                else_stmt,
            },
        ))
    }

    fn parse_do_while(&mut self) -> PResult {
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after do")?;
        let body = self.parse_statement()?;
        self.advance_or("Unexpected EOF, expected 'while'")?;
        if self.current.kw != Some(Keyword::While) {
            return Err(self.error_here("Expected while after do"));
        }
        self.advance_or("Unexpected EOF after do...while")?;
        self.expect(TokenKind::LeftParen)?;
        self.advance_or("Unexpected EOF after do...while (")?;
        let condition = self.parse_expression(true)?;
        self.advance_or("Unexpected EOF after do...while condition")?;
        self.expect(TokenKind::RightParen)?;
        Ok(self.ast.alloc(loc, NodeKind::DoWhile { condition, body }))
    }

    fn parse_while_stmt(&mut self) -> PResult {
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after while")?;
        self.expect(TokenKind::LeftParen)?;
        self.advance_or("Unexpected EOF after while (")?;
        let condition = self.parse_expression(true)?;
        self.advance_or("Unexpected EOF after while condition")?;
        self.expect(TokenKind::RightParen)?;
        self.advance_or("Unexpected EOF, expected while body")?;
        let body = self.parse_statement()?;
        Ok(self.ast.alloc(loc, NodeKind::WhileStmt { condition, body }))
    }

    fn parse_for_stmt(&mut self) -> PResult {
        let for_loc = self.current.loc;
        self.advance_or("Unexpected EOF after for")?;
        self.expect(TokenKind::LeftParen)?;
        self.advance_or("Unexpected EOF after for (")?;

        let mut decl_kw: Option<Token> = None;
        if self.current.kind == TokenKind::Keyword && is_var_decl_kw(&self.current) {
            decl_kw = Some(self.current);
            self.advance_or("Unexpected EOF after variable declaration keyword")?;
            self.expect(TokenKind::Identifier)?;
        }
        // `for (… in …)` / `for (… of …)` — `of` is a contextual keyword,
        // detected by spelling.
        if self.current.kind == TokenKind::Identifier {
            let var = self.current;
            self.advance_or("Unexpected EOF in for head")?;
            let is_of =
                self.current.kind == TokenKind::Identifier && self.text(&self.current) == "of";
            let is_in = self.current.kw == Some(Keyword::In);
            if is_of || is_in {
                self.advance_or("Unexpected EOF in for (… in/of")?;
                let iterable = self.parse_expression(true)?;
                self.advance_or("Unexpected EOF after for (… in/of <iterable>")?;
                self.expect(TokenKind::RightParen)?;
                self.advance_or("Unexpected EOF after for (… in/of <iterable>)")?;
                let body = self.parse_statement()?;
                let keyword = decl_kw.map(|t| t.text);
                let kind = if is_of {
                    NodeKind::ForOf {
                        keyword,
                        var: var.text,
                        iterable,
                        body,
                    }
                } else {
                    NodeKind::ForIn {
                        keyword,
                        var: var.text,
                        iterable,
                        body,
                    }
                };
                return Ok(self.ast.alloc(for_loc, kind));
            }
            self.rewind(var);
        }
        if let Some(kw) = decl_kw {
            self.rewind(kw);
        }
        // C-style `for (init; condition; latch) body`.
        let pre_stmt = self.parse_statement()?;
        self.expect(TokenKind::Semicolon)?;
        self.advance_or("Unexpected EOF after for-loop init statement")?;
        let condition = self.parse_expression(true)?;
        self.advance_or("Unexpected EOF after for-loop condition")?;
        self.expect(TokenKind::Semicolon)?;
        self.advance_or("Unexpected EOF after for-loop condition;")?;
        let latch_stmt = self.parse_statement()?;
        self.advance_or("Unexpected EOF after for-loop latch statement")?;
        self.expect(TokenKind::RightParen)?;
        self.advance_or("Unexpected EOF after for (…)")?;
        let body = self.parse_statement()?;
        Ok(self.ast.alloc(
            for_loc,
            NodeKind::ForStmt {
                pre_stmt,
                condition,
                latch_stmt,
                body,
            },
        ))
    }

    fn parse_switch_stmt(&mut self) -> PResult {
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after switch")?;
        self.expect(TokenKind::LeftParen)?;
        self.advance_or("Unexpected EOF after switch (")?;
        let value = self.parse_expression(true)?;
        self.advance_or("Unexpected EOF after switch value")?;
        self.expect(TokenKind::RightParen)?;
        self.advance_or("Unexpected EOF after switch (value)")?;
        self.expect(TokenKind::LeftBrace)?;
        self.advance_or("Unexpected EOF after switch (value) {")?;
        let mut clauses = Vec::new();
        let mut has_default = false;
        loop {
            self.expect_any(&[TokenKind::Keyword, TokenKind::RightBrace])?;
            if self.current.kind == TokenKind::RightBrace {
                break;
            }
            let clause_loc = self.current.loc;
            let condition = match self.current.kw {
                Some(Keyword::Default) => {
                    if has_default {
                        return Err(
                            self.error_here("Switch statement already has a default clause")
                        );
                    }
                    has_default = true;
                    self.advance_or("Unexpected EOF after default")?;
                    None
                }
                Some(Keyword::Case) => {
                    self.advance_or("Unexpected EOF after case")?;
                    let condition = self.parse_expression(true)?;
                    self.advance_or("Unexpected EOF after case condition")?;
                    Some(condition)
                }
                _ => return Err(self.error_here("Unexpected keyword in switch")),
            };
            self.expect(TokenKind::Colon)?;
            self.advance_or("Unexpected EOF after colon (switch clause)")?;
            let mut stmts = Vec::new();
            loop {
                if matches!(self.current.kw, Some(Keyword::Case) | Some(Keyword::Default))
                    || self.current.kind == TokenKind::RightBrace
                {
                    break;
                }
                stmts.push(self.parse_statement()?);
                self.advance_or("Unexpected EOF in switch clause body")?;
            }
            let clause = match condition {
                Some(condition) => self
                    .ast
                    .alloc(clause_loc, NodeKind::Case { stmts, condition }),
                None => self.ast.alloc(clause_loc, NodeKind::SwitchClause { stmts }),
            };
            clauses.push(clause);
        }
        Ok(self.ast.alloc(loc, NodeKind::SwitchStmt { value, clauses }))
    }

    fn parse_return_stmt(&mut self) -> PResult {
        let loc = self.current.loc;
        let mut value = None;
        if self.advance()? && !is_stmt_end(&self.current) {
            value = Some(self.parse_expression(true)?);
        }
        Ok(self.ast.alloc(loc, NodeKind::ReturnStmt { value }))
    }

    fn parse_throw_stmt(&mut self) -> PResult {
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after throw")?;
        let value = self.parse_expression(true)?;
        Ok(self.ast.alloc(loc, NodeKind::ThrowStmt { value }))
    }

    fn parse_try_stmt(&mut self) -> PResult {
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after try")?;
        self.expect(TokenKind::LeftBrace)?;
        let body = self.parse_block()?;
        let mut catch_block = None;
        let mut finally = None;
        self.advance_or("Unexpected EOF after try {}")?;
        if self.current.kw == Some(Keyword::Catch) {
            let catch_loc = self.current.loc;
            self.advance_or("Unexpected EOF after catch")?;
            self.expect(TokenKind::LeftParen)?;
            self.advance_or("Unexpected EOF after catch (")?;
            self.expect(TokenKind::Identifier)?;
            let var = self.current.text;
            self.advance_or("Unexpected EOF after catch variable")?;
            self.expect(TokenKind::RightParen)?;
            self.advance_or("Unexpected EOF after catch (…)")?;
            self.expect(TokenKind::LeftBrace)?;
            let catch_body = self.parse_block()?;
            catch_block = Some(self.ast.alloc(
                catch_loc,
                NodeKind::Catch {
                    var,
                    body: catch_body,
                },
            ));
            if !self.advance()? {
                return Ok(self.ast.alloc(
                    loc,
                    NodeKind::TryStmt {
                        body,
                        catch_block,
                        finally,
                    },
                ));
            }
        }
        if self.current.kw == Some(Keyword::Finally) {
            self.advance_or("Unexpected EOF after finally")?;
            self.expect(TokenKind::LeftBrace)?;
            finally = Some(self.parse_block()?);
        }
        if catch_block.is_none() && finally.is_none() {
            return Err(self.error_here("Encountered try without any catch or finally block"));
        }
        Ok(self.ast.alloc(
            loc,
            NodeKind::TryStmt {
                body,
                catch_block,
                finally,
            },
        ))
    }

    fn parse_function_stmt(&mut self) -> PResult {
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF while parsing function")?;
        self.expect(TokenKind::Identifier)?;
        let name = self.current.text;
        self.advance_or("Unexpected EOF while parsing function")?;
        self.expect(TokenKind::LeftParen)?;
        let params = self.parse_param_list()?;
        self.advance_or("Unexpected EOF while parsing function")?;
        self.expect(TokenKind::LeftBrace)?;
        let body = self.parse_block()?;
        Ok(self
            .ast
            .alloc(loc, NodeKind::FunctionStmt { name, params, body }))
    }

    fn parse_function_expr(&mut self) -> PResult {
        let loc = self.current.loc;
        let mut name = None;
        self.advance_or("Unexpected EOF while parsing function")?;
        if self.current.kind == TokenKind::Identifier {
            name = Some(self.current.text);
            self.advance_or("Unexpected EOF while parsing function")?;
        }
        self.expect(TokenKind::LeftParen)?;
        let params = self.parse_param_list()?;
        self.advance_or("Unexpected EOF while parsing function")?;
        self.expect(TokenKind::LeftBrace)?;
        let body = self.parse_block()?;
        Ok(self
            .ast
            .alloc(loc, NodeKind::FunctionExpr { name, params, body }))
    }

    fn parse_param_list(&mut self) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::LeftParen);
        let loc = self.current.loc;
        let mut names = Vec::new();
        let mut rest = None;
        loop {
            self.advance_or("Unexpected EOF while parsing parameter list")?;
            if self.current.kind == TokenKind::Identifier {
                names.push(self.current.text);
                self.advance_or("Unexpected EOF while parsing parameter list")?;
            }
            if self.current.kind != TokenKind::Comma {
                break;
            }
        }
        if self.current.kind == TokenKind::DotDotDot {
            self.advance_or("Unexpected EOF while parsing parameter list")?;
            if self.current.kind == TokenKind::Identifier {
                rest = Some(self.current.text);
                self.advance_or("Unexpected EOF while parsing parameter list")?;
            }
        }
        if self.current.kind == TokenKind::RightParen {
            Ok(self.ast.alloc(loc, NodeKind::ParamList { names, rest }))
        } else {
            Err(self.error_here("Unexpected token in parameter list"))
        }
    }

    fn parse_block(&mut self) -> PResult {
        self.expect(TokenKind::LeftBrace)?;
        let loc = self.current.loc;
        let mut stmts = Vec::new();
        self.advance_or("Unexpected EOF while parsing block")?;
        while self.current.kind != TokenKind::RightBrace {
            stmts.push(self.parse_statement()?);
            self.advance_or("Unexpected EOF while parsing block")?;
        }
        Ok(self.ast.alloc(loc, NodeKind::Block { stmts }))
    }

    /// A `{` at statement position always opens a block.  Telling object
    /// literals apart from blocks here is not possible with standard
    /// parsing techniques, and the grammar resolves the ambiguity the same
    /// way; object literals are only parsed in expression position.
    fn parse_block_or_object(&mut self, _prefer_block_over_obj: bool) -> PResult {
        self.expect(TokenKind::LeftBrace)?;
        self.parse_block()
    }

    fn parse_var_decl(&mut self) -> PResult {
        debug_assert!(is_var_decl_kw(&self.current));
        let loc = self.current.loc;
        let keyword = self.current.text;
        self.advance_or("Unexpected EOF while parsing variable declaration")?;
        self.expect(TokenKind::Identifier)?;
        let mut parts = Vec::new();
        let mut name = self.current.text;
        let mut part_loc = self.current.loc;
        let mut init = None;
        loop {
            let end_tok = self.current;
            if !self.advance()? {
                break;
            }
            if self.current.kind == TokenKind::Equal {
                self.advance_or("Unexpected EOF in variable initialization, expected expression")?;
                init = Some(self.parse_expression(false)?);
            } else if self.current.kind == TokenKind::Comma {
                parts.push(self.ast.alloc(
                    part_loc,
                    NodeKind::VarDeclPart {
                        name,
                        init: init.take(),
                    },
                ));
                self.advance_or("Unexpected EOF in variable declaration")?;
                self.expect(TokenKind::Identifier)?;
                name = self.current.text;
                part_loc = self.current.loc;
            } else {
                self.rewind(end_tok);
                break;
            }
        }
        parts.push(
            self.ast
                .alloc(part_loc, NodeKind::VarDeclPart { name, init }),
        );
        Ok(self.ast.alloc(loc, NodeKind::VarDecl { keyword, parts }))
    }

    // ── Expressions ─────────────────────────────────────────────────────────

    fn parse_expression(&mut self, comma_is_operator: bool) -> PResult {
        let expr = self.parse_unary_or_atomic_expr()?;
        let final_tok = self.current;
        if !self.advance()? {
            return Ok(expr);
        }
        if is_expression_end(&self.current, comma_is_operator) {
            self.rewind(final_tok);
            return Ok(expr);
        }
        if is_binary_operator(&self.current, comma_is_operator) {
            return self.parse_bin_op(expr, comma_is_operator);
        }
        self.rewind(final_tok);
        Ok(expr)
    }

    /// Parses prefix-operator applications and everything that binds
    /// tighter.
    fn parse_unary_or_atomic_expr(&mut self) -> PResult {
        if !is_unary_prefix_op(&self.current) {
            return self.parse_atomic_expr();
        }
        let op = self.current;
        self.advance_or("Unexpected EOF after unary prefix operator")?;
        let value = self.parse_atomic_expr()?;
        let kind = match (op.kind, op.kw) {
            (TokenKind::PlusPlus, _) => NodeKind::PrefixIncrement { value },
            (TokenKind::MinusMinus, _) => NodeKind::PrefixDecrement { value },
            (TokenKind::Plus, _) => NodeKind::PrefixPlus { value },
            (TokenKind::Minus, _) => NodeKind::PrefixMinus { value },
            (TokenKind::Bang, _) => NodeKind::NotExpr { value },
            (TokenKind::Tilde, _) => NodeKind::BinverseExpr { value },
            (TokenKind::Keyword, Some(Keyword::Typeof)) => NodeKind::TypeofExpr { value },
            (TokenKind::Keyword, Some(Keyword::Void)) => NodeKind::VoidExpr { value },
            (TokenKind::Keyword, Some(Keyword::Delete)) => NodeKind::DeleteExpr { value },
            _ => return Err(ParseError::new("Expected unary prefix operator", op.loc)),
        };
        Ok(self.ast.alloc(op.loc, kind))
    }

    /// Parses atomic expressions plus their postfix chains: `.member`,
    /// `(args)`, `[index]`, and one trailing `++`/`--`.
    fn parse_atomic_expr(&mut self) -> PResult {
        let mut expr = match self.current.kind {
            TokenKind::Keyword => self.parse_atomic_keyword_expr()?,
            TokenKind::Identifier => self.ast.alloc(
                self.current.loc,
                NodeKind::IdentifierExpr {
                    str: self.current.text,
                },
            ),
            k if k.is_number_literal() => self.parse_number_literal()?,
            TokenKind::StringLiteral | TokenKind::TemplateString => self.parse_string_literal()?,
            TokenKind::TemplateHead => self.parse_template_literal()?,
            TokenKind::RegexLiteral => self.ast.alloc(
                self.current.loc,
                NodeKind::RegexLiteral {
                    val: self.current.text,
                },
            ),
            TokenKind::LeftBracket => self.parse_array_literal()?,
            TokenKind::LeftBrace => self.parse_object_literal()?,
            TokenKind::LeftParen => self.parse_parens_expr()?,
            k => {
                return Err(self.error_here(&format!(
                    "Unexpected token: {k:?}. Expected atomic expression"
                )));
            }
        };
        // Member/call/index chains.
        loop {
            let prev = self.current;
            if !self.advance()? {
                return Ok(expr);
            }
            expr = match self.current.kind {
                TokenKind::Dot => self.parse_member_access(expr)?,
                TokenKind::LeftParen => self.parse_call(expr)?,
                TokenKind::LeftBracket => self.parse_computed_access(expr)?,
                _ => {
                    self.rewind(prev);
                    break;
                }
            };
        }
        // A single postfix increment/decrement.
        let prev = self.current;
        if self.advance()? {
            match self.current.kind {
                TokenKind::PlusPlus => {
                    expr = self
                        .ast
                        .alloc(self.current.loc, NodeKind::PostfixIncrement { value: expr });
                }
                TokenKind::MinusMinus => {
                    expr = self
                        .ast
                        .alloc(self.current.loc, NodeKind::PostfixDecrement { value: expr });
                }
                _ => self.rewind(prev),
            }
        }
        Ok(expr)
    }

    fn parse_atomic_keyword_expr(&mut self) -> PResult {
        self.expect(TokenKind::Keyword)?;
        match self.current.kw {
            Some(Keyword::Function) => self.parse_function_expr(),
            Some(Keyword::New) => self.parse_new_keyword(),
            Some(Keyword::True) => Ok(self.ast.alloc(self.current.loc, NodeKind::TrueLiteral {})),
            Some(Keyword::False) => Ok(self.ast.alloc(self.current.loc, NodeKind::FalseLiteral {})),
            Some(Keyword::Null) => Ok(self.ast.alloc(self.current.loc, NodeKind::NullLiteral {})),
            Some(Keyword::Class) => Err(self.error_here("Not implemented (class expression)")),
            _ => Err(self.error_here("Not implemented (keyword expression)")),
        }
    }

    fn parse_new_keyword(&mut self) -> PResult {
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after new")?;
        if self.current.kind == TokenKind::Dot {
            self.advance_or("Unexpected EOF after new.")?;
            self.expect(TokenKind::Identifier)?;
            if self.text(&self.current) != "target" {
                return Err(self.error_here("Expected new.target after new."));
            }
            return Ok(self.ast.alloc(loc, NodeKind::NewTarget {}));
        }
        let constructor = self.parse_atomic_expr()?;
        // `new Foo(1, 2)` parses as a call first; lift its pieces so the
        // node stores the constructor and arguments directly.
        let kind = match self.ast.node(constructor).kind {
            NodeKind::CallExpr { callee, args } => NodeKind::NewExpr {
                constructor: callee,
                args: Some(args),
            },
            _ => NodeKind::NewExpr {
                constructor,
                args: None,
            },
        };
        Ok(self.ast.alloc(loc, kind))
    }

    fn parse_number_literal(&mut self) -> PResult {
        let literal = self.current;
        let kind = if literal.kind == TokenKind::IntLiteral {
            NodeKind::IntLiteral { val: literal.text }
        } else {
            // Hex, octal, and binary spellings land in `float_literal`.
            NodeKind::FloatLiteral { val: literal.text }
        };
        let res = self.ast.alloc(literal.loc, kind);
        if !self.advance()? {
            return Ok(res);
        }
        if is_follow_expression(&self.current) {
            self.rewind(literal);
            return Ok(res);
        }
        Err(self.error_here("Unexpected token after number literal"))
    }

    fn parse_string_literal(&mut self) -> PResult {
        let literal = self.current;
        let res = self
            .ast
            .alloc(literal.loc, NodeKind::StringLiteral { val: literal.text });
        if !self.advance()? {
            return Ok(res);
        }
        if is_follow_expression(&self.current) {
            self.rewind(literal);
            return Ok(res);
        }
        Err(self.error_here("Unexpected token after string literal"))
    }

    fn parse_template_literal(&mut self) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::TemplateHead);
        let loc = self.current.loc;
        let mut strs = vec![self.current.text];
        let mut exprs = Vec::new();
        loop {
            self.advance_or("Unexpected EOF in template literal")?;
            exprs.push(self.parse_expression(true)?);
            self.advance_or("Unexpected EOF after interpolated expression in template literal")?;
            self.expect_any(&[TokenKind::TemplateMiddle, TokenKind::TemplateEnd])?;
            strs.push(self.current.text);
            if self.current.kind != TokenKind::TemplateMiddle {
                break;
            }
        }
        debug_assert_eq!(strs.len(), exprs.len() + 1);
        Ok(self.ast.alloc(loc, NodeKind::TemplateLiteral { strs, exprs }))
    }

    fn parse_array_literal(&mut self) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::LeftBracket);
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF inside array literal")?;
        let mut values = Vec::new();
        if self.current.kind != TokenKind::RightBracket {
            loop {
                let value = if self.current.kind == TokenKind::DotDotDot {
                    let spread_loc = self.current.loc;
                    self.advance_or("Unexpected EOF after spread operator")?;
                    let list = self.parse_expression(false)?;
                    self.ast.alloc(spread_loc, NodeKind::SpreadExpr { list })
                } else {
                    self.parse_expression(false)?
                };
                values.push(value);
                self.advance_or("Unexpected EOF inside array literal")?;
                self.expect_any(&[TokenKind::RightBracket, TokenKind::Comma])?;
                if self.current.kind == TokenKind::RightBracket {
                    break;
                }
                self.advance_or("Unexpected EOF inside array literal")?;
            }
        }
        Ok(self.ast.alloc(loc, NodeKind::ArrayLiteral { values }))
    }

    fn parse_object_literal(&mut self) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::LeftBrace);
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF in object literal")?;
        let mut entries = Vec::new();
        loop {
            if self.current.kind == TokenKind::RightBrace {
                break;
            } else if self.current.kind == TokenKind::DotDotDot {
                let spread_loc = self.current.loc;
                self.advance_or("Unexpected EOF after spread operator")?;
                let list = self.parse_expression(false)?;
                entries.push(self.ast.alloc(spread_loc, NodeKind::SpreadExpr { list }));
            } else if is_possible_object_key(&self.current) {
                let key_tok = self.current;
                self.advance_or("Unexpected EOF in object literal")?;
                if self.current.kind != TokenKind::Colon {
                    // Shorthand `{a}` — the key is its own value.
                    entries.push(self.ast.alloc(
                        key_tok.loc,
                        NodeKind::IdentifierExpr { str: key_tok.text },
                    ));
                    self.rewind(key_tok);
                } else {
                    self.advance_or("Unexpected EOF in object literal")?;
                    let val = self.parse_expression(false)?;
                    entries.push(self.ast.alloc(
                        key_tok.loc,
                        NodeKind::ObjectEntry {
                            key: key_tok.text,
                            val,
                        },
                    ));
                }
            } else {
                return Err(self.error_here("Unexpected token"));
            }
            self.advance_or("Unexpected EOF in object literal")?;
            self.expect_any(&[TokenKind::RightBrace, TokenKind::Comma])?;
            if self.current.kind == TokenKind::Comma {
                self.advance_or("Unexpected EOF in object literal")?;
            }
        }
        self.expect(TokenKind::RightBrace)?;
        Ok(self.ast.alloc(loc, NodeKind::ObjectLiteral { entries }))
    }

    fn parse_parens_expr(&mut self) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::LeftParen);
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after opening parenthesis")?;
        // Collected entries may turn out to be an arrow-function parameter
        // list; remember the first entry that rules that out.
        let mut not_param_list: Option<Token> = None;
        let mut rest_param: Option<Token> = None;
        let mut exprs: Vec<NodeId> = Vec::new();
        if self.current.kind != TokenKind::RightParen {
            loop {
                let begin = self.current;
                if self.current.kind == TokenKind::DotDotDot {
                    self.advance_or("Unexpected EOF after rest operator")?;
                    self.expect(TokenKind::Identifier)?;
                    let mut rest = self.current;
                    rest.loc = begin.loc;
                    rest_param = Some(rest);
                    self.advance_or("Unexpected EOF in parameter list")?;
                    self.expect(TokenKind::RightParen)?;
                    break;
                }
                let expr = self.parse_expression(false)?;
                if not_param_list.is_none()
                    && self.ast.node(expr).kind.kind() != Kind::IdentifierExpr
                {
                    not_param_list = Some(begin);
                }
                exprs.push(expr);
                self.advance_or("Unexpected EOF before closing parenthesis")?;
                self.expect_any(&[TokenKind::RightParen, TokenKind::Comma])?;
                if self.current.kind == TokenKind::RightParen {
                    break;
                }
                self.advance_or("Unexpected EOF before closing parenthesis")?;
            }
        }
        self.expect(TokenKind::RightParen)?;
        let paren_close = self.current;
        if self.advance()? {
            if self.current.kind == TokenKind::Arrow {
                if let Some(bad) = not_param_list {
                    return Err(ParseError::new(
                        "Invalid entry in arrow function param list",
                        bad.loc,
                    ));
                }
                let mut names = Vec::with_capacity(exprs.len());
                for &e in &exprs {
                    if let NodeKind::IdentifierExpr { str } = &self.ast.node(e).kind {
                        names.push(*str);
                    }
                }
                let params = self.ast.alloc(
                    loc,
                    NodeKind::ParamList {
                        names,
                        rest: rest_param.map(|t| t.text),
                    },
                );
                self.advance_or("Unexpected EOF after arrow")?;
                let body = if self.current.kind == TokenKind::LeftBrace {
                    self.parse_block_or_object(true)?
                } else {
                    self.parse_expression(false)?
                };
                return Ok(self.ast.alloc(loc, NodeKind::ArrowFunction { params, body }));
            }
            self.rewind(paren_close);
        }
        if let Some(rest) = rest_param {
            return Err(ParseError::new("Unexpected token", rest.loc));
        }
        // Plain parentheses: fold the entries left-to-right with comma
        // operators.
        let mut it = exprs.into_iter();
        let Some(mut expr) = it.next() else {
            return Err(ParseError::new(
                "Unexpected token: RightParen. Expected atomic expression",
                loc,
            ));
        };
        for next in it {
            let comma_loc = self.ast.node(expr).loc;
            expr = self.ast.alloc(
                comma_loc,
                NodeKind::CommaOperator {
                    lhs: expr,
                    rhs: next,
                },
            );
        }
        Ok(expr)
    }

    fn parse_member_access(&mut self, base: NodeId) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::Dot);
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF while parsing member access")?;
        self.expect(TokenKind::Identifier)?;
        Ok(self.ast.alloc(
            loc,
            NodeKind::MemberAccess {
                base,
                member: self.current.text,
            },
        ))
    }

    fn parse_computed_access(&mut self, base: NodeId) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::LeftBracket);
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF inside computed member access")?;
        let member = self.parse_expression(true)?;
        self.advance_or("Unexpected EOF inside computed member access")?;
        self.expect(TokenKind::RightBracket)?;
        Ok(self
            .ast
            .alloc(loc, NodeKind::ComputedMemberAccess { base, member }))
    }

    fn parse_call(&mut self, callee: NodeId) -> PResult {
        debug_assert_eq!(self.current.kind, TokenKind::LeftParen);
        let loc = self.current.loc;
        self.advance_or("Unexpected EOF after begin of argument list")?;
        let mut values = Vec::new();
        if self.current.kind != TokenKind::RightParen {
            loop {
                values.push(self.parse_expression(false)?);
                self.advance_or("Unexpected EOF in argument list")?;
                if self.current.kind == TokenKind::Comma {
                    self.advance_or("Unexpected EOF in argument list")?;
                } else if self.current.kind == TokenKind::RightParen {
                    break;
                } else {
                    return Err(self.error_here("Unexpected token in argument list"));
                }
            }
        }
        let args = self.ast.alloc(loc, NodeKind::ArgumentList { values });
        Ok(self.ast.alloc(loc, NodeKind::CallExpr { callee, args }))
    }

    // ── Binary-operator climbing ────────────────────────────────────────────

    /// Extend `lhs` with binary operators of increasing binding power.
    ///
    /// The ternary `? :` is handled as a right-associative special case
    /// whose middle operand is parsed with `comma_is_operator = false` so it
    /// stops at the `:`.  For everything else the right-hand side is a
    /// unary-or-atomic expression, then the following operator's precedence
    /// decides whether to extend that right-hand side or to absorb the
    /// whole node as a new left-hand side.
    fn parse_bin_op(&mut self, lhs: NodeId, comma_is_operator: bool) -> PResult {
        let op = self.current;
        debug_assert!(is_binary_operator(&op, comma_is_operator));
        self.advance_or("Unexpected EOF, expected right-hand side of binary operator")?;
        let (mut rhs, mid) = if op.kind == TokenKind::Question {
            let mid = self.parse_expression(false)?;
            self.advance_or("Unexpected EOF, expected colon of conditional operator")?;
            self.expect(TokenKind::Colon)?;
            self.advance_or("Unexpected EOF, expected third operand of conditional operator")?;
            let rhs = self.parse_expression(false)?;
            (rhs, Some(mid))
        } else {
            (self.parse_unary_or_atomic_expr()?, None)
        };

        let prev = self.current;
        if !self.advance()? {
            return self.make_binary_expr(&op, lhs, rhs, mid);
        }
        if is_expression_end(&self.current, comma_is_operator) {
            self.rewind(prev);
            return self.make_binary_expr(&op, lhs, rhs, mid);
        }
        if is_binary_operator(&self.current, comma_is_operator) {
            let cur_prec = precedence(&op);
            let next_prec = precedence(&self.current);
            if next_prec > cur_prec
                || (next_prec == cur_prec && associativity(&op) == Assoc::RightToLeft)
            {
                rhs = self.parse_bin_op(rhs, comma_is_operator)?;
                return self.make_binary_expr(&op, lhs, rhs, mid);
            }
            let node = self.make_binary_expr(&op, lhs, rhs, mid)?;
            return self.parse_bin_op(node, comma_is_operator);
        }
        Err(self.error_here("Unexpected token after binary operator expression"))
    }

    fn make_binary_expr(
        &mut self,
        op: &Token,
        lhs: NodeId,
        rhs: NodeId,
        mid: Option<NodeId>,
    ) -> PResult {
        if let Some(mid) = mid {
            return Ok(self
                .ast
                .alloc(op.loc, NodeKind::TernaryOperator { lhs, rhs, mid }));
        }
        let kind = match (op.kind, op.kw) {
            (TokenKind::Plus, _) => NodeKind::Add { lhs, rhs },
            (TokenKind::Minus, _) => NodeKind::Subtract { lhs, rhs },
            (TokenKind::Star, _) => NodeKind::Multiply { lhs, rhs },
            (TokenKind::Slash, _) => NodeKind::Divide { lhs, rhs },
            (TokenKind::StarStar, _) => NodeKind::PowExpr { lhs, rhs },
            (TokenKind::Percent, _) => NodeKind::ModuloExpr { lhs, rhs },
            (TokenKind::Less, _) => NodeKind::LessExpr { lhs, rhs },
            (TokenKind::LessEqual, _) => NodeKind::LessEqExpr { lhs, rhs },
            (TokenKind::Greater, _) => NodeKind::GreaterExpr { lhs, rhs },
            (TokenKind::GreaterEqual, _) => NodeKind::GreaterEqExpr { lhs, rhs },
            (TokenKind::EqualEqual, _) => NodeKind::EqualsExpr { lhs, rhs },
            (TokenKind::EqualEqualEqual, _) => NodeKind::StrongEqualsExpr { lhs, rhs },
            (TokenKind::BangEqual, _) => NodeKind::NotEqualsExpr { lhs, rhs },
            (TokenKind::BangEqualEqual, _) => NodeKind::StrongNotEqualsExpr { lhs, rhs },
            (TokenKind::AmpersandAmpersand, _) => NodeKind::LogAndExpr { lhs, rhs },
            (TokenKind::PipePipe, _) => NodeKind::LogOrExpr { lhs, rhs },
            (TokenKind::LessLess, _) => NodeKind::LshiftExpr { lhs, rhs },
            (TokenKind::GreaterGreater, _) => NodeKind::RshiftExpr { lhs, rhs },
            (TokenKind::GreaterGreaterGreater, _) => NodeKind::LogRshiftExpr { lhs, rhs },
            (TokenKind::Ampersand, _) => NodeKind::BitwiseAndExpr { lhs, rhs },
            (TokenKind::Pipe, _) => NodeKind::BitwiseOrExpr { lhs, rhs },
            (TokenKind::Caret, _) => NodeKind::BitwiseXorExpr { lhs, rhs },
            (TokenKind::Equal, _) => NodeKind::Assign { lhs, rhs },
            (TokenKind::PlusEqual, _) => NodeKind::AddAssign { lhs, rhs },
            (TokenKind::MinusEqual, _) => NodeKind::SubtractAssign { lhs, rhs },
            (TokenKind::StarEqual, _) => NodeKind::MultiplyAssign { lhs, rhs },
            (TokenKind::SlashEqual, _) => NodeKind::DivideAssign { lhs, rhs },
            (TokenKind::PercentEqual, _) => NodeKind::ModuloAssign { lhs, rhs },
            (TokenKind::StarStarEqual, _) => NodeKind::PowAssign { lhs, rhs },
            (TokenKind::LessLessEqual, _) => NodeKind::LshiftAssign { lhs, rhs },
            (TokenKind::GreaterGreaterEqual, _) => NodeKind::RshiftAssign { lhs, rhs },
            (TokenKind::GreaterGreaterGreaterEqual, _) => NodeKind::LogRshiftAssign { lhs, rhs },
            (TokenKind::AmpersandEqual, _) => NodeKind::AndAssign { lhs, rhs },
            (TokenKind::PipeEqual, _) => NodeKind::OrAssign { lhs, rhs },
            (TokenKind::CaretEqual, _) => NodeKind::XorAssign { lhs, rhs },
            (TokenKind::Comma, _) => NodeKind::CommaOperator { lhs, rhs },
            (TokenKind::Keyword, Some(Keyword::Instanceof)) => {
                NodeKind::InstanceofExpr { lhs, rhs }
            }
            (TokenKind::Keyword, Some(Keyword::In)) => NodeKind::InExpr { lhs, rhs },
            _ => return Err(ParseError::new("Expected binary operator", op.loc)),
        };
        Ok(self.ast.alloc(op.loc, kind))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::json::to_json;

    fn parse_json(src: &str) -> Result<String, ParseError> {
        let mut parser = Parser::new(src);
        let root = parser.parse(false)?;
        Ok(to_json(parser.ast(), root))
    }

    fn wrap(stmts: &str) -> String {
        format!("{{\"type\": \"module\", \"stmts\": [{stmts}]}}")
    }

    /// Assert that `src` parses into a module whose statement list
    /// serializes exactly to `stmts`.
    #[track_caller]
    fn assert_parses(src: &str, stmts: &str) {
        match parse_json(src) {
            Ok(json) => assert_eq!(json, wrap(stmts), "for input {src:?}"),
            Err(err) => panic!("parse of {src:?} failed: {} at {}", err.msg, err.loc),
        }
    }

    #[track_caller]
    fn assert_error(src: &str) {
        assert!(parse_json(src).is_err(), "expected {src:?} to fail");
    }

    #[track_caller]
    fn assert_ok(src: &str) {
        assert!(parse_json(src).is_ok(), "expected {src:?} to parse");
    }

    // ── Literals ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty() {
        assert_parses("", "");
    }

    #[test]
    fn test_number_literals() {
        assert_parses("1", r#"{"type": "int_literal", "val": "1"}"#);
        assert_parses("1.5", r#"{"type": "float_literal", "val": "1.5"}"#);
        assert_parses("0x1F", r#"{"type": "float_literal", "val": "0x1F"}"#);
        assert_error("1.window");
    }

    #[test]
    fn test_string_literals() {
        assert_parses(
            "'use strict'",
            r#"{"type": "string_literal", "val": "'use strict'"}"#,
        );
        assert_parses(
            "let s = \"text\"",
            r#"{"type": "var_decl", "keyword": "let", "parts": [{"type": "var_decl_part", "name": "s", "init": {"type": "string_literal", "val": "\"text\""}}]}"#,
        );
    }

    #[test]
    fn test_template_literals() {
        assert_parses(
            "`1${2}3${4}5`",
            r#"{"type": "template_literal", "strs": ["`1${", "}3${", "}5`"], "exprs": [{"type": "int_literal", "val": "2"}, {"type": "int_literal", "val": "4"}]}"#,
        );
        assert_error("let o = {``: 0}");
    }

    #[test]
    fn test_regex_literals() {
        assert_parses(
            "/.*/.test('abc')",
            r#"{"type": "call_expr", "callee": {"type": "member_access", "base": {"type": "regex_literal", "val": "/.*/"}, "member": "test"}, "args": {"type": "argument_list", "values": [{"type": "string_literal", "val": "'abc'"}]}}"#,
        );
    }

    #[test]
    fn test_keyword_literals() {
        assert_parses("null", r#"{"type": "null_literal"}"#);
        assert_parses("true", r#"{"type": "true_literal"}"#);
        assert_parses("false", r#"{"type": "false_literal"}"#);
    }

    #[test]
    fn test_array_literals() {
        assert_parses(
            "let arr = [1, ...a, 3, ...b]",
            r#"{"type": "var_decl", "keyword": "let", "parts": [{"type": "var_decl_part", "name": "arr", "init": {"type": "array_literal", "values": [{"type": "int_literal", "val": "1"}, {"type": "spread_expr", "list": {"type": "identifier_expr", "str": "a"}}, {"type": "int_literal", "val": "3"}, {"type": "spread_expr", "list": {"type": "identifier_expr", "str": "b"}}]}}]}"#,
        );
        // Trailing commas in array literals are rejected.
        assert_error("[a,b,]");
    }

    #[test]
    fn test_object_literals() {
        assert_parses(
            "let x = {a, b, ...c, i: 5}",
            r#"{"type": "var_decl", "keyword": "let", "parts": [{"type": "var_decl_part", "name": "x", "init": {"type": "object_literal", "entries": [{"type": "identifier_expr", "str": "a"}, {"type": "identifier_expr", "str": "b"}, {"type": "spread_expr", "list": {"type": "identifier_expr", "str": "c"}}, {"type": "object_entry", "key": "i", "val": {"type": "int_literal", "val": "5"}}]}}]}"#,
        );
        // Trailing commas in object literals are fine.
        assert_parses(
            "let x = {a,}",
            r#"{"type": "var_decl", "keyword": "let", "parts": [{"type": "var_decl_part", "name": "x", "init": {"type": "object_literal", "entries": [{"type": "identifier_expr", "str": "a"}]}}]}"#,
        );
    }

    // ── Blocks and statements ──────────────────────────────────────────────

    #[test]
    fn test_block_vs_object() {
        // `{…}` at statement position is always a block, never an object.
        assert_parses("{}", r#"{"type": "block", "stmts": []}"#);
        assert_parses(
            "{ label: window, console }",
            r#"{"type": "block", "stmts": [{"type": "label_stmt", "label": "label", "stmt": {"type": "comma_operator", "lhs": {"type": "identifier_expr", "str": "window"}, "rhs": {"type": "identifier_expr", "str": "console"}}}]}"#,
        );
        assert_parses(
            "{ label: window, console.log(1) }",
            r#"{"type": "block", "stmts": [{"type": "label_stmt", "label": "label", "stmt": {"type": "comma_operator", "lhs": {"type": "identifier_expr", "str": "window"}, "rhs": {"type": "call_expr", "callee": {"type": "member_access", "base": {"type": "identifier_expr", "str": "console"}, "member": "log"}, "args": {"type": "argument_list", "values": [{"type": "int_literal", "val": "1"}]}}}}]}"#,
        );
    }

    #[test]
    fn test_parenthesis() {
        assert_parses("(((1)))", r#"{"type": "int_literal", "val": "1"}"#);
        assert_error("(((1))");
        assert_error("()");
    }

    #[test]
    fn test_empty_statement() {
        assert_parses(";", r#"{"type": "empty_stmt"}"#);
    }

    // ── Unary operators ────────────────────────────────────────────────────

    #[test]
    fn test_postfix_ops() {
        assert_parses(
            "i++",
            r#"{"type": "postfix_increment", "value": {"type": "identifier_expr", "str": "i"}}"#,
        );
        assert_parses(
            "i--",
            r#"{"type": "postfix_decrement", "value": {"type": "identifier_expr", "str": "i"}}"#,
        );
        assert_error("i----");
        assert_error("i++++");
    }

    #[test]
    fn test_prefix_ops() {
        let cases = [
            ("++i", "prefix_increment"),
            ("--i", "prefix_decrement"),
            ("+i", "prefix_plus"),
            ("-i", "prefix_minus"),
            ("~i", "binverse_expr"),
            ("!i", "not_expr"),
            ("typeof i", "typeof_expr"),
            ("void i", "void_expr"),
            ("delete i", "delete_expr"),
        ];
        for (src, kind) in cases {
            assert_parses(
                src,
                &format!(
                    r#"{{"type": "{kind}", "value": {{"type": "identifier_expr", "str": "i"}}}}"#
                ),
            );
        }
        assert_parses(
            "+i++",
            r#"{"type": "prefix_plus", "value": {"type": "postfix_increment", "value": {"type": "identifier_expr", "str": "i"}}}"#,
        );
        assert_error("----i");
        assert_error("++++i");
    }

    // ── Declarations ───────────────────────────────────────────────────────

    #[test]
    fn test_var_decl() {
        assert_parses(
            "let x;",
            r#"{"type": "var_decl", "keyword": "let", "parts": [{"type": "var_decl_part", "name": "x", "init": null}]}"#,
        );
        assert_parses(
            "{let i = 0;}",
            r#"{"type": "block", "stmts": [{"type": "var_decl", "keyword": "let", "parts": [{"type": "var_decl_part", "name": "i", "init": {"type": "int_literal", "val": "0"}}]}]}"#,
        );
        assert_parses(
            "let i, j, k",
            r#"{"type": "var_decl", "keyword": "let", "parts": [{"type": "var_decl_part", "name": "i", "init": null}, {"type": "var_decl_part", "name": "j", "init": null}, {"type": "var_decl_part", "name": "k", "init": null}]}"#,
        );
        assert_parses(
            "let i = 0, j = 1, k = 2",
            r#"{"type": "var_decl", "keyword": "let", "parts": [{"type": "var_decl_part", "name": "i", "init": {"type": "int_literal", "val": "0"}}, {"type": "var_decl_part", "name": "j", "init": {"type": "int_literal", "val": "1"}}, {"type": "var_decl_part", "name": "k", "init": {"type": "int_literal", "val": "2"}}]}"#,
        );
        assert_error("var");
        assert_error("var i = var j = var k");
    }

    // ── Binary operators ───────────────────────────────────────────────────

    #[test]
    fn test_binary_ops() {
        assert_parses(
            "1 + 1",
            r#"{"type": "add", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "int_literal", "val": "1"}}"#,
        );
        // Precedence: the division binds tighter than the addition.
        assert_parses(
            "1 + 4 / 2",
            r#"{"type": "add", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "divide", "lhs": {"type": "int_literal", "val": "4"}, "rhs": {"type": "int_literal", "val": "2"}}}"#,
        );
        assert_parses(
            "1 + 4 / 2; 6 + 7",
            concat!(
                r#"{"type": "add", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "divide", "lhs": {"type": "int_literal", "val": "4"}, "rhs": {"type": "int_literal", "val": "2"}}}, "#,
                r#"{"type": "add", "lhs": {"type": "int_literal", "val": "6"}, "rhs": {"type": "int_literal", "val": "7"}}"#
            ),
        );
        assert_parses(
            "a instanceof A",
            r#"{"type": "instanceof_expr", "lhs": {"type": "identifier_expr", "str": "a"}, "rhs": {"type": "identifier_expr", "str": "A"}}"#,
        );
        assert_parses(
            "a in A",
            r#"{"type": "in_expr", "lhs": {"type": "identifier_expr", "str": "a"}, "rhs": {"type": "identifier_expr", "str": "A"}}"#,
        );
        for src in [
            "1=1", "1==1", "1===1", "1!=1", "1!==1", "1<<1", "1>>1", "1>>>1", "1**1", "1%1",
            "1<1", "1<=1", "1>1", "1>=1", "1&1", "1&&1", "1|1", "1^1", "1+=1", "1-=1", "1*=1",
            "1/=1", "1%=1", "1|=1", "1&=1", "1^=1", "1,1",
        ] {
            assert_ok(src);
        }
    }

    #[test]
    fn test_mixed_precedence_shapes() {
        assert_parses(
            "1 * 3 + 2",
            r#"{"type": "add", "lhs": {"type": "multiply", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "int_literal", "val": "3"}}, "rhs": {"type": "int_literal", "val": "2"}}"#,
        );
        // `**` groups right.
        assert_parses(
            "2 ** 3 ** 4",
            r#"{"type": "pow_expr", "lhs": {"type": "int_literal", "val": "2"}, "rhs": {"type": "pow_expr", "lhs": {"type": "int_literal", "val": "3"}, "rhs": {"type": "int_literal", "val": "4"}}}"#,
        );
    }

    #[test]
    fn test_ternary_op() {
        assert_parses(
            "a ? b ? c ? 1 : 2 : 3 : 4",
            r#"{"type": "ternary_operator", "lhs": {"type": "identifier_expr", "str": "a"}, "rhs": {"type": "int_literal", "val": "4"}, "mid": {"type": "ternary_operator", "lhs": {"type": "identifier_expr", "str": "b"}, "rhs": {"type": "int_literal", "val": "3"}, "mid": {"type": "ternary_operator", "lhs": {"type": "identifier_expr", "str": "c"}, "rhs": {"type": "int_literal", "val": "2"}, "mid": {"type": "int_literal", "val": "1"}}}}"#,
        );
    }

    #[test]
    fn test_assignment() {
        // Assignment groups right.
        assert_parses(
            "a = b = c = 1 * 3",
            r#"{"type": "assign", "lhs": {"type": "identifier_expr", "str": "a"}, "rhs": {"type": "assign", "lhs": {"type": "identifier_expr", "str": "b"}, "rhs": {"type": "assign", "lhs": {"type": "identifier_expr", "str": "c"}, "rhs": {"type": "multiply", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "int_literal", "val": "3"}}}}}"#,
        );
        assert_parses(
            "a[i].x = b[j].y",
            r#"{"type": "assign", "lhs": {"type": "member_access", "base": {"type": "computed_member_access", "base": {"type": "identifier_expr", "str": "a"}, "member": {"type": "identifier_expr", "str": "i"}}, "member": "x"}, "rhs": {"type": "member_access", "base": {"type": "computed_member_access", "base": {"type": "identifier_expr", "str": "b"}, "member": {"type": "identifier_expr", "str": "j"}}, "member": "y"}}"#,
        );
        // Destructuring is not supported: `[a] = arr` parses as a plain
        // assignment to an array literal, and declarator patterns fail.
        assert_ok("[a] = arr");
        assert_error("let [a] = arr");
        assert_error("let {a} = obj");
    }

    // ── Functions ──────────────────────────────────────────────────────────

    #[test]
    fn test_function_stmt() {
        assert_parses(
            "function test(arg1, arg2) { return arg1 + arg2; }",
            r#"{"type": "function_stmt", "name": "test", "params": {"type": "param_list", "names": ["arg1", "arg2"], "rest": null}, "body": {"type": "block", "stmts": [{"type": "return_stmt", "value": {"type": "add", "lhs": {"type": "identifier_expr", "str": "arg1"}, "rhs": {"type": "identifier_expr", "str": "arg2"}}}]}}"#,
        );
        assert_parses(
            "(function() {})",
            r#"{"type": "function_expr", "name": null, "params": {"type": "param_list", "names": [], "rest": null}, "body": {"type": "block", "stmts": []}}"#,
        );
        assert_error("function() {}");
        // Default parameter values are not supported.
        assert_error("function test(arg1, arg2 = 5) {}");
    }

    #[test]
    fn test_arrow_function() {
        assert_parses(
            "() => {}",
            r#"{"type": "arrow_function", "params": {"type": "param_list", "names": [], "rest": null}, "body": {"type": "block", "stmts": []}}"#,
        );
        assert_parses(
            "(test) => console.log(test)",
            r#"{"type": "arrow_function", "params": {"type": "param_list", "names": ["test"], "rest": null}, "body": {"type": "call_expr", "callee": {"type": "member_access", "base": {"type": "identifier_expr", "str": "console"}, "member": "log"}, "args": {"type": "argument_list", "values": [{"type": "identifier_expr", "str": "test"}]}}}"#,
        );
        assert_parses(
            "() => ({})",
            r#"{"type": "arrow_function", "params": {"type": "param_list", "names": [], "rest": null}, "body": {"type": "object_literal", "entries": []}}"#,
        );
        assert_parses(
            "(...args) => null",
            r#"{"type": "arrow_function", "params": {"type": "param_list", "names": [], "rest": "args"}, "body": {"type": "null_literal"}}"#,
        );
        // A non-identifier entry poisons the parameter list.
        assert_error("(a, 1) => {}");
        // A rest marker without a following arrow is an error.
        assert_error("(...args)");
    }

    // ── Accesses and calls ─────────────────────────────────────────────────

    #[test]
    fn test_member_access() {
        assert_parses(
            "a.b.c.d",
            r#"{"type": "member_access", "base": {"type": "member_access", "base": {"type": "member_access", "base": {"type": "identifier_expr", "str": "a"}, "member": "b"}, "member": "c"}, "member": "d"}"#,
        );
    }

    #[test]
    fn test_call() {
        assert_parses(
            "console.log(1 + 2);",
            r#"{"type": "call_expr", "callee": {"type": "member_access", "base": {"type": "identifier_expr", "str": "console"}, "member": "log"}, "args": {"type": "argument_list", "values": [{"type": "add", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "int_literal", "val": "2"}}]}}"#,
        );
        // Spread arguments are not supported.
        assert_error("console.log(...[1,2,3])");
    }

    #[test]
    fn test_computed_member_access() {
        assert_parses(
            "a[1]",
            r#"{"type": "computed_member_access", "base": {"type": "identifier_expr", "str": "a"}, "member": {"type": "int_literal", "val": "1"}}"#,
        );
        assert_parses(
            "a[1+4/2]",
            r#"{"type": "computed_member_access", "base": {"type": "identifier_expr", "str": "a"}, "member": {"type": "add", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "divide", "lhs": {"type": "int_literal", "val": "4"}, "rhs": {"type": "int_literal", "val": "2"}}}}"#,
        );
    }

    #[test]
    fn test_comma_operator() {
        assert_parses(
            "window[1,'console'].log(4)",
            r#"{"type": "call_expr", "callee": {"type": "member_access", "base": {"type": "computed_member_access", "base": {"type": "identifier_expr", "str": "window"}, "member": {"type": "comma_operator", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "string_literal", "val": "'console'"}}}, "member": "log"}, "args": {"type": "argument_list", "values": [{"type": "int_literal", "val": "4"}]}}"#,
        );
    }

    #[test]
    fn test_super_call() {
        assert_parses(
            "super(1)",
            r#"{"type": "call_expr", "callee": {"type": "identifier_expr", "str": "super"}, "args": {"type": "argument_list", "values": [{"type": "int_literal", "val": "1"}]}}"#,
        );
    }

    // ── Control flow ───────────────────────────────────────────────────────

    #[test]
    fn test_if_stmt() {
        // The dangling else binds to the inner if.
        assert_parses(
            "if (false) if (false) 1; else 2;",
            r#"{"type": "if_stmt", "condition": {"type": "false_literal"}, "body": {"type": "if_stmt", "condition": {"type": "false_literal"}, "body": {"type": "int_literal", "val": "1"}, "else_stmt": {"type": "int_literal", "val": "2"}}, "else_stmt": null}"#,
        );
    }

    #[test]
    fn test_do_while() {
        assert_parses(
            "do 1; while (false);",
            r#"{"type": "do_while", "condition": {"type": "false_literal"}, "body": {"type": "int_literal", "val": "1"}}"#,
        );
    }

    #[test]
    fn test_while_stmt() {
        assert_parses(
            "while(false) { 1; }",
            r#"{"type": "while_stmt", "condition": {"type": "false_literal"}, "body": {"type": "block", "stmts": [{"type": "int_literal", "val": "1"}]}}"#,
        );
    }

    #[test]
    fn test_for_stmts() {
        assert_parses(
            "for (var i = 0; i < 10; ++i) 1;",
            r#"{"type": "for_stmt", "pre_stmt": {"type": "var_decl", "keyword": "var", "parts": [{"type": "var_decl_part", "name": "i", "init": {"type": "int_literal", "val": "0"}}]}, "condition": {"type": "less_expr", "lhs": {"type": "identifier_expr", "str": "i"}, "rhs": {"type": "int_literal", "val": "10"}}, "latch_stmt": {"type": "prefix_increment", "value": {"type": "identifier_expr", "str": "i"}}, "body": {"type": "int_literal", "val": "1"}}"#,
        );
        assert_parses(
            "for (let i in [1, 2, 3]) 1;",
            r#"{"type": "for_in", "keyword": "let", "var": "i", "iterable": {"type": "array_literal", "values": [{"type": "int_literal", "val": "1"}, {"type": "int_literal", "val": "2"}, {"type": "int_literal", "val": "3"}]}, "body": {"type": "int_literal", "val": "1"}}"#,
        );
        assert_parses(
            "for (let i of [1, 2, 3]) 1;",
            r#"{"type": "for_of", "keyword": "let", "var": "i", "iterable": {"type": "array_literal", "values": [{"type": "int_literal", "val": "1"}, {"type": "int_literal", "val": "2"}, {"type": "int_literal", "val": "3"}]}, "body": {"type": "int_literal", "val": "1"}}"#,
        );
        assert_parses(
            "for (i of [1, 2, 3]) 1;",
            r#"{"type": "for_of", "keyword": null, "var": "i", "iterable": {"type": "array_literal", "values": [{"type": "int_literal", "val": "1"}, {"type": "int_literal", "val": "2"}, {"type": "int_literal", "val": "3"}]}, "body": {"type": "int_literal", "val": "1"}}"#,
        );
    }

    #[test]
    fn test_throw_stmt() {
        assert_parses(
            "throw {a}",
            r#"{"type": "throw_stmt", "value": {"type": "object_literal", "entries": [{"type": "identifier_expr", "str": "a"}]}}"#,
        );
    }

    #[test]
    fn test_break_and_continue() {
        assert_parses(
            "while (true) break loop1;",
            r#"{"type": "while_stmt", "condition": {"type": "true_literal"}, "body": {"type": "break_stmt", "label": null}}"#,
        );
        assert_parses(
            "while (true) continue;",
            r#"{"type": "while_stmt", "condition": {"type": "true_literal"}, "body": {"type": "continue_stmt", "label": null}}"#,
        );
    }

    #[test]
    fn test_new() {
        assert_parses("new.target", r#"{"type": "new_target"}"#);
        assert_parses(
            "new target",
            r#"{"type": "new_expr", "constructor": {"type": "identifier_expr", "str": "target"}, "args": null}"#,
        );
        assert_parses(
            "new target()",
            r#"{"type": "new_expr", "constructor": {"type": "identifier_expr", "str": "target"}, "args": {"type": "argument_list", "values": []}}"#,
        );
        assert_parses(
            "new target(1, 2)",
            r#"{"type": "new_expr", "constructor": {"type": "identifier_expr", "str": "target"}, "args": {"type": "argument_list", "values": [{"type": "int_literal", "val": "1"}, {"type": "int_literal", "val": "2"}]}}"#,
        );
        assert_error("new.notTarget");
    }

    #[test]
    fn test_try_catch() {
        assert_parses(
            "try {} catch(e) {} finally {}",
            r#"{"type": "try_stmt", "body": {"type": "block", "stmts": []}, "catch_block": {"type": "catch", "var": "e", "body": {"type": "block", "stmts": []}}, "finally": {"type": "block", "stmts": []}}"#,
        );
        assert_parses(
            "try {} catch(e) {}",
            r#"{"type": "try_stmt", "body": {"type": "block", "stmts": []}, "catch_block": {"type": "catch", "var": "e", "body": {"type": "block", "stmts": []}}, "finally": null}"#,
        );
        assert_parses(
            "try {} finally {}",
            r#"{"type": "try_stmt", "body": {"type": "block", "stmts": []}, "catch_block": null, "finally": {"type": "block", "stmts": []}}"#,
        );
        assert_error("try {}");
        assert_error("try {} catch(e1) {} catch(e2) {}");
        assert_error("try {} finally {} catch(e) {}");
        assert_error("try {} finally {} finally {}");
    }

    #[test]
    fn test_switch_stmt() {
        assert_parses(
            "switch(1) {}",
            r#"{"type": "switch_stmt", "value": {"type": "int_literal", "val": "1"}, "clauses": []}"#,
        );
        assert_parses(
            "switch(1) {case 2: 3; break; 4; break; default: 5;}",
            r#"{"type": "switch_stmt", "value": {"type": "int_literal", "val": "1"}, "clauses": [{"type": "case", "stmts": [{"type": "int_literal", "val": "3"}, {"type": "break_stmt", "label": null}, {"type": "int_literal", "val": "4"}, {"type": "break_stmt", "label": null}], "condition": {"type": "int_literal", "val": "2"}}, {"type": "switch_clause", "stmts": [{"type": "int_literal", "val": "5"}]}]}"#,
        );
        assert_parses(
            "switch(val) {case void function() {return 1;}(): console.log(1)}",
            r#"{"type": "switch_stmt", "value": {"type": "identifier_expr", "str": "val"}, "clauses": [{"type": "case", "stmts": [{"type": "call_expr", "callee": {"type": "member_access", "base": {"type": "identifier_expr", "str": "console"}, "member": "log"}, "args": {"type": "argument_list", "values": [{"type": "int_literal", "val": "1"}]}}], "condition": {"type": "void_expr", "value": {"type": "call_expr", "callee": {"type": "function_expr", "name": null, "params": {"type": "param_list", "names": [], "rest": null}, "body": {"type": "block", "stmts": [{"type": "return_stmt", "value": {"type": "int_literal", "val": "1"}}]}}, "args": {"type": "argument_list", "values": []}}}}]}"#,
        );
        assert_error("switch(){}");
        assert_error("switch(1){default: 2; default: 3;}");
    }

    // ── Intentional gaps ───────────────────────────────────────────────────

    #[test]
    fn test_classes_are_not_supported() {
        assert_error("class test {}");
        assert_error("class test { constructor() {} }");
        assert_error("class test { static foo() {} }");
    }

    #[test]
    fn test_import_is_not_supported() {
        assert_error("import * as Test from 'test'");
        assert_error("import Test from 'test'");
        assert_error("import { Test } from 'test'");
        assert_error("import { Test as tseT } from 'test'");
    }

    #[test]
    fn test_export_is_not_supported() {
        assert_error("export * from 'test'");
        assert_error("export { Test as tseT }");
        assert_error("export { Test } from 'test'");
        assert_error("export var i = 0");
        assert_error("export default class test {}");
    }

    // ── Comments, errors, verify mode ──────────────────────────────────────

    #[test]
    fn test_comments_are_filtered() {
        assert_parses(
            "1 // one\n+ /* plus */ 2",
            r#"{"type": "add", "lhs": {"type": "int_literal", "val": "1"}, "rhs": {"type": "int_literal", "val": "2"}}"#,
        );
    }

    #[test]
    fn test_lexer_errors_are_forwarded() {
        let err = parse_json("'unterminated").unwrap_err();
        assert!(err.msg.starts_with("Lexer Error: "), "got {:?}", err.msg);
    }

    #[test]
    fn test_unexpected_eof_has_unknown_location() {
        let err = parse_json("if (").unwrap_err();
        assert_eq!(err.loc, SrcLoc::default());
        assert!(err.msg.contains("EOF"), "got {:?}", err.msg);
    }

    #[test]
    fn test_error_location_points_at_token() {
        let err = parse_json("switch(1){default: 2; default: 3;}").unwrap_err();
        assert_eq!(err.loc, SrcLoc::new(1, 23));
    }

    #[test]
    fn test_verify_mode_accepts_clean_trees() {
        for src in ["", "1 + 1", "try {} catch(e) {}", "(x) => x ? 1 : 2"] {
            let mut parser = Parser::new(src);
            assert!(parser.parse(true).is_ok(), "verify failed for {src:?}");
        }
    }

    #[test]
    fn test_parser_is_reusable() {
        let mut parser = Parser::new("1 + 1");
        let first = parser.parse(false).unwrap();
        let first_json = to_json(parser.ast(), first);
        let second = parser.parse(false).unwrap();
        assert_eq!(first_json, to_json(parser.ast(), second));
    }

    #[test]
    fn test_node_locations() {
        let mut parser = Parser::new("let x = 1;\nfoo(x)");
        let root = parser.parse(false).unwrap();
        let NodeKind::Module { stmts } = &parser.ast().node(root).kind else {
            panic!("root is not a module");
        };
        assert_eq!(parser.ast().node(stmts[0]).loc, SrcLoc::new(1, 1));
        // The call node carries the position of its opening parenthesis.
        assert_eq!(parser.ast().node(stmts[1]).loc, SrcLoc::new(2, 4));
    }
}
