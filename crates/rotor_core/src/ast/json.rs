//! JSON serialization of the AST.
//!
//! Every node emits `{"type": "<kind>", "field": …}` with its fields in
//! canonical order — inherited fields before the kind's own, each preceded
//! by `", "`.  Sequences become arrays, absent optionals become `null`, and
//! string payloads are emitted verbatim except that `"` gains a backslash.
//!
//! The format (including the space after each comma and the minimal
//! escaping) is part of the wire contract the test suite pins down; do not
//! "fix" it without migrating every consumer.

use crate::ast::{Ast, NodeId};
use crate::intern::Istr;

/// Serialize the subtree rooted at `id`.
pub fn to_json(ast: &Ast, id: NodeId) -> String {
    let mut out = String::new();
    write_node(ast, &mut out, id);
    out
}

/// Append one node object to `out`.
pub(crate) fn write_node(ast: &Ast, out: &mut String, id: NodeId) {
    let node = ast.node(id);
    out.push_str("{\"type\": \"");
    out.push_str(node.kind.kind().name());
    out.push('"');
    ast.write_fields(id, out);
    out.push('}');
}

/// Append a string with `"` escaped; everything else passes through as-is.
fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
}

fn push_key(out: &mut String, name: &str) {
    out.push_str(", \"");
    out.push_str(name);
    out.push_str("\": ");
}

pub(crate) fn emit_many(ast: &Ast, out: &mut String, name: &str, ids: &[NodeId]) {
    push_key(out, name);
    out.push('[');
    for (i, &id) in ids.iter().enumerate() {
        if i != 0 {
            out.push_str(", ");
        }
        write_node(ast, out, id);
    }
    out.push(']');
}

pub(crate) fn emit_one(ast: &Ast, out: &mut String, name: &str, id: NodeId) {
    push_key(out, name);
    write_node(ast, out, id);
}

pub(crate) fn emit_maybe(ast: &Ast, out: &mut String, name: &str, id: Option<NodeId>) {
    push_key(out, name);
    match id {
        Some(id) => write_node(ast, out, id),
        None => out.push_str("null"),
    }
}

pub(crate) fn emit_text(ast: &Ast, out: &mut String, name: &str, sym: Istr) {
    push_key(out, name);
    out.push('"');
    push_escaped(out, ast.strings().resolve(sym));
    out.push('"');
}

pub(crate) fn emit_opt_text(ast: &Ast, out: &mut String, name: &str, sym: Option<Istr>) {
    push_key(out, name);
    match sym {
        Some(sym) => {
            out.push('"');
            push_escaped(out, ast.strings().resolve(sym));
            out.push('"');
        }
        None => out.push_str("null"),
    }
}

pub(crate) fn emit_texts(ast: &Ast, out: &mut String, name: &str, syms: &[Istr]) {
    push_key(out, name);
    out.push('[');
    for (i, &sym) in syms.iter().enumerate() {
        if i != 0 {
            out.push_str(", ");
        }
        out.push('"');
        push_escaped(out, ast.strings().resolve(sym));
        out.push('"');
    }
    out.push(']');
}
