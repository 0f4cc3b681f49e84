//! Post-parse structural verification.
//!
//! [`verify_ast`] walks a finished tree and checks the invariants the node
//! schema promises but the type system cannot express — which kinds may sit
//! in which child slots, template-literal arity, `try` handler presence.
//! The parser runs this pass in `verify` mode and converts a non-empty
//! report into its error value.
//!
//! A clean tree produced by the parser always passes; the checks exist to
//! catch trees corrupted by downstream rewriters and to guard the parser
//! itself under fuzzing.

use crate::ast::{Ast, Kind, NodeId, NodeKind};

/// Verify the subtree rooted at `root`.  Returns `None` when every check
/// passes, otherwise a report with one `line:col: message` diagnostic per
/// line, in tree order.
pub fn verify_ast(ast: &Ast, root: NodeId) -> Option<String> {
    if ast.get(root).is_none() {
        return Some("0:0: root id does not resolve in this arena".to_string());
    }
    let mut v = Verifier {
        ast,
        diags: Vec::new(),
    };
    v.check(root);
    if v.diags.is_empty() {
        None
    } else {
        Some(v.diags.join("\n"))
    }
}

struct Verifier<'a> {
    ast: &'a Ast,
    diags: Vec<String>,
}

impl Verifier<'_> {
    fn report(&mut self, id: NodeId, msg: &str) {
        let loc = self.ast.node(id).loc;
        self.diags.push(format!("{loc}: {msg}"));
    }

    /// `true` when `id` resolves in this arena; reports and returns `false`
    /// otherwise.
    fn resolves(&mut self, parent: NodeId, id: NodeId) -> bool {
        if self.ast.get(id).is_some() {
            return true;
        }
        self.report(parent, "child id does not resolve in this arena");
        false
    }

    fn expect_kind(&mut self, parent: NodeId, child: NodeId, expected: Kind, slot: &str) {
        let actual = self.ast.node(child).kind.kind();
        if !actual.is_a(expected) {
            self.report(
                parent,
                &format!(
                    "{slot} holds {} where {} is required",
                    actual.name(),
                    expected.name()
                ),
            );
        }
    }

    /// Check one node (the caller guarantees `id` resolves) and recurse
    /// over its children.
    fn check(&mut self, id: NodeId) {
        match &self.ast.node(id).kind {
            NodeKind::Module { stmts } => {
                for &s in stmts {
                    if self.resolves(id, s) {
                        self.expect_kind(id, s, Kind::Statement, "module statement");
                    }
                }
            }
            NodeKind::Block { stmts } | NodeKind::SwitchClause { stmts } => {
                for &s in stmts {
                    if self.resolves(id, s) {
                        self.expect_kind(id, s, Kind::Statement, "statement list entry");
                    }
                }
            }
            NodeKind::Case { stmts, condition } => {
                for &s in stmts {
                    if self.resolves(id, s) {
                        self.expect_kind(id, s, Kind::Statement, "case body entry");
                    }
                }
                if self.resolves(id, *condition) {
                    self.expect_kind(id, *condition, Kind::Expression, "case condition");
                }
            }
            NodeKind::SwitchStmt { value, clauses } => {
                if self.resolves(id, *value) {
                    self.expect_kind(id, *value, Kind::Expression, "switch value");
                }
                let mut defaults = 0;
                for &c in clauses {
                    if !self.resolves(id, c) {
                        continue;
                    }
                    self.expect_kind(id, c, Kind::SwitchClause, "switch clause");
                    if self.ast.node(c).kind.kind() == Kind::SwitchClause {
                        defaults += 1;
                    }
                }
                if defaults > 1 {
                    self.report(id, "switch statement has more than one default clause");
                }
            }
            NodeKind::VarDecl { parts, .. } => {
                if parts.is_empty() {
                    self.report(id, "variable declaration without declarators");
                }
                for &p in parts {
                    if self.resolves(id, p) {
                        self.expect_kind(id, p, Kind::VarDeclPart, "declarator");
                    }
                }
            }
            NodeKind::TryStmt {
                body,
                catch_block,
                finally,
            } => {
                if self.resolves(id, *body) {
                    self.expect_kind(id, *body, Kind::Block, "try body");
                }
                if let Some(c) = catch_block
                    && self.resolves(id, *c)
                {
                    self.expect_kind(id, *c, Kind::Catch, "catch clause");
                }
                if let Some(f) = finally
                    && self.resolves(id, *f)
                {
                    self.expect_kind(id, *f, Kind::Block, "finally block");
                }
                if catch_block.is_none() && finally.is_none() {
                    self.report(id, "try statement without catch or finally");
                }
            }
            NodeKind::Catch { body, .. } => {
                if self.resolves(id, *body) {
                    self.expect_kind(id, *body, Kind::Block, "catch body");
                }
            }
            NodeKind::CallExpr { callee, args } => {
                if self.resolves(id, *callee) {
                    self.expect_kind(id, *callee, Kind::Expression, "callee");
                }
                if self.resolves(id, *args) {
                    self.expect_kind(id, *args, Kind::ArgumentList, "call arguments");
                }
            }
            NodeKind::NewExpr { constructor, args } => {
                if self.resolves(id, *constructor) {
                    self.expect_kind(id, *constructor, Kind::Expression, "constructor");
                }
                if let Some(a) = args
                    && self.resolves(id, *a)
                {
                    self.expect_kind(id, *a, Kind::ArgumentList, "constructor arguments");
                }
            }
            NodeKind::FunctionStmt { params, body, .. }
            | NodeKind::FunctionExpr { params, body, .. } => {
                if self.resolves(id, *params) {
                    self.expect_kind(id, *params, Kind::ParamList, "parameter list");
                }
                if self.resolves(id, *body) {
                    self.expect_kind(id, *body, Kind::Block, "function body");
                }
            }
            NodeKind::ArrowFunction { params, body } => {
                if self.resolves(id, *params) {
                    self.expect_kind(id, *params, Kind::ParamList, "parameter list");
                }
                if self.resolves(id, *body) {
                    self.expect_kind(id, *body, Kind::Statement, "arrow body");
                }
            }
            NodeKind::TemplateLiteral { strs, exprs } => {
                if strs.len() != exprs.len() + 1 {
                    self.report(
                        id,
                        "template literal must hold one more string part than expressions",
                    );
                }
                for &e in exprs {
                    if self.resolves(id, e) {
                        self.expect_kind(id, e, Kind::Expression, "template expression");
                    }
                }
            }
            NodeKind::LabelStmt { stmt, .. } => {
                if self.resolves(id, *stmt) {
                    self.expect_kind(id, *stmt, Kind::Statement, "labeled statement");
                }
            }
            NodeKind::IfStmt {
                condition,
                body,
                else_stmt,
            } => {
                if self.resolves(id, *condition) {
                    self.expect_kind(id, *condition, Kind::Expression, "if condition");
                }
                if self.resolves(id, *body) {
                    self.expect_kind(id, *body, Kind::Statement, "if body");
                }
                if let Some(e) = else_stmt
                    && self.resolves(id, *e)
                {
                    self.expect_kind(id, *e, Kind::Statement, "else body");
                }
            }
            NodeKind::DoWhile { condition, body } | NodeKind::WhileStmt { condition, body } => {
                if self.resolves(id, *condition) {
                    self.expect_kind(id, *condition, Kind::Expression, "loop condition");
                }
                if self.resolves(id, *body) {
                    self.expect_kind(id, *body, Kind::Statement, "loop body");
                }
            }
            NodeKind::ForIn { iterable, body, .. } | NodeKind::ForOf { iterable, body, .. } => {
                if self.resolves(id, *iterable) {
                    self.expect_kind(id, *iterable, Kind::Expression, "loop iterable");
                }
                if self.resolves(id, *body) {
                    self.expect_kind(id, *body, Kind::Statement, "loop body");
                }
            }
            _ => {}
        }
        // Recurse over every child, including slots with no targeted check.
        let mut children = Vec::new();
        self.ast.node(id).kind.child_nodes(&mut children);
        for child in children {
            if self.ast.get(child).is_some() {
                self.check(child);
            } else {
                self.report(id, "child id does not resolve in this arena");
            }
        }
    }
}
