//! AST node definitions and storage.
//!
//! - [`NodeKind`] — one variant per concrete node kind, fields in canonical
//!   serialization order (inherited fields first).
//! - [`Kind`] — fieldless discriminant with the kind hierarchy behind
//!   [`Kind::parent`] and the [`Kind::is_a`] test.
//! - [`Ast`] — index-based arena owning every node plus the string table;
//!   [`NodeId`]s stay valid for the arena's lifetime regardless of growth.
//! - [`json`] — the JSON serializer over a finished tree.
//!
//! The whole node schema lives in the single [`ast_nodes!`] invocation at
//! the bottom of this file; the macro derives the payload enum, the
//! discriminant table, and the serializer's field emission from it, so the
//! three can never drift apart.

pub mod json;

use crate::intern::{Istr, StringTable};
use crate::loc::SrcLoc;

// ─────────────────────────────────────────────────────────────────────────────
// NodeId / Node
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to a node inside an [`Ast`] arena.
///
/// Ids are plain indices: they remain valid as the arena grows and are only
/// invalidated by [`Ast::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The index into the arena's node table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single AST node: source location plus kind-specific payload.
///
/// The location is fixed at construction and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Position of the construct's first character.
    pub loc: SrcLoc,
    /// Kind tag and children.
    pub kind: NodeKind,
}

// ─────────────────────────────────────────────────────────────────────────────
// Arena
// ─────────────────────────────────────────────────────────────────────────────

/// Arena owning every node of one parse, plus the interned strings the
/// nodes reference.
///
/// Nodes are never freed individually; [`Ast::clear`] drops the whole tree
/// (the parser calls it between parses).  Handing out [`NodeId`] indices
/// instead of references keeps child links valid while the parse keeps
/// allocating.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    strings: StringTable,
}

impl Ast {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            strings: StringTable::new(),
        }
    }

    /// Allocate a node and return its id.
    pub fn alloc(&mut self, loc: SrcLoc, kind: NodeKind) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("AST node count overflow"));
        self.nodes.push(Node { loc, kind });
        id
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this arena generation.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The node behind `id`, or `None` for a stale/foreign id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when no nodes have been allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The string table backing the nodes' text fields.
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Mutable access to the string table (the scanner interns through this).
    pub fn strings_mut(&mut self) -> &mut StringTable {
        &mut self.strings
    }

    /// Drop every node and every interned string.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.strings.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// isa
// ─────────────────────────────────────────────────────────────────────────────

impl Kind {
    /// `true` when `self` is `ancestor` or derives from it.
    pub fn is_a(self, ancestor: Kind) -> bool {
        let mut k = self;
        loop {
            if k == ancestor {
                return true;
            }
            match k.parent() {
                Some(p) => k = p,
                None => return false,
            }
        }
    }

    /// `true` for every kind usable in statement position (includes all
    /// expressions).
    pub fn is_statement(self) -> bool {
        self.is_a(Kind::Statement)
    }

    /// `true` for every expression kind.
    pub fn is_expression(self) -> bool {
        self.is_a(Kind::Expression)
    }
}

/// `true` when the node behind `id` is of kind `kind` or a kind derived
/// from it.
pub fn isa(ast: &Ast, id: NodeId, kind: Kind) -> bool {
    ast.node(id).kind.kind().is_a(kind)
}

// ─────────────────────────────────────────────────────────────────────────────
// Schema machinery
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a schema field class to its Rust storage type.
macro_rules! node_field_ty {
    (many) => { Vec<NodeId> };
    (one) => { NodeId };
    (maybe) => { Option<NodeId> };
    (text) => { Istr };
    (opt_text) => { Option<Istr> };
    (texts) => { Vec<Istr> };
}

/// Emits one JSON field for [`Ast::write_fields`].
macro_rules! write_json_field {
    ($ast:expr, $out:expr, many, $field:ident) => {
        json::emit_many($ast, $out, stringify!($field), $field)
    };
    ($ast:expr, $out:expr, one, $field:ident) => {
        json::emit_one($ast, $out, stringify!($field), *$field)
    };
    ($ast:expr, $out:expr, maybe, $field:ident) => {
        json::emit_maybe($ast, $out, stringify!($field), *$field)
    };
    ($ast:expr, $out:expr, text, $field:ident) => {
        json::emit_text($ast, $out, stringify!($field), *$field)
    };
    ($ast:expr, $out:expr, opt_text, $field:ident) => {
        json::emit_opt_text($ast, $out, stringify!($field), *$field)
    };
    ($ast:expr, $out:expr, texts, $field:ident) => {
        json::emit_texts($ast, $out, stringify!($field), $field)
    };
}

/// Collects one field's node children for [`NodeKind::child_nodes`].
macro_rules! collect_children {
    ($out:expr, many, $field:ident) => {
        $out.extend_from_slice($field)
    };
    ($out:expr, one, $field:ident) => {
        $out.push(*$field)
    };
    ($out:expr, maybe, $field:ident) => {
        if let Some(id) = $field {
            $out.push(*id);
        }
    };
    ($out:expr, text, $field:ident) => {
        let _ = $field;
    };
    ($out:expr, opt_text, $field:ident) => {
        let _ = $field;
    };
    ($out:expr, texts, $field:ident) => {
        let _ = $field;
    };
}

/// Declares the complete node schema: `Variant("json_name") [: Parent]
/// { field_class field_name, … }`.  Field order is canonical serialization
/// order — inherited fields listed before the kind's own.
macro_rules! ast_nodes {
    (
        $(
            $variant:ident($name:literal) $(: $parent:ident)? {
                $( $fclass:ident $field:ident ),* $(,)?
            }
        ),* $(,)?
    ) => {
        /// Payload of an AST node: one variant per concrete node kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum NodeKind {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant { $( $field: node_field_ty!($fclass) ),* },
            )*
        }

        /// Fieldless node-kind discriminant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Kind {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl Kind {
            /// Every node kind, in schema order.
            pub const ALL: &'static [Kind] = &[ $( Kind::$variant ),* ];

            /// The serialized name of this kind (the JSON `"type"` tag).
            pub fn name(self) -> &'static str {
                match self {
                    $( Kind::$variant => $name ),*
                }
            }

            /// The kind this kind derives from, if any.
            pub fn parent(self) -> Option<Kind> {
                match self {
                    $( Kind::$variant => ast_nodes!(@parent $($parent)?) ),*
                }
            }
        }

        impl NodeKind {
            /// The discriminant of this payload.
            pub fn kind(&self) -> Kind {
                match self {
                    $( NodeKind::$variant { .. } => Kind::$variant ),*
                }
            }

            /// Append every direct node child, in schema order.
            pub fn child_nodes(&self, out: &mut Vec<NodeId>) {
                match self {
                    $(
                        NodeKind::$variant { $( $field ),* } => {
                            $( collect_children!(out, $fclass, $field); )*
                        }
                    ),*
                }
            }
        }

        impl Ast {
            /// Emit the `, "field": …` tail of a node's JSON object, in
            /// canonical order.
            pub(crate) fn write_fields(&self, id: NodeId, out: &mut String) {
                match &self.node(id).kind {
                    $(
                        NodeKind::$variant { $( $field ),* } => {
                            $( write_json_field!(self, out, $fclass, $field); )*
                        }
                    ),*
                }
            }
        }
    };
    (@parent) => { None };
    (@parent $parent:ident) => { Some(Kind::$parent) };
}

// ─────────────────────────────────────────────────────────────────────────────
// The node schema
// ─────────────────────────────────────────────────────────────────────────────

ast_nodes! {
    // Root and category bases.
    Module("module") { many stmts },
    Statement("statement") {},
    Expression("expression"): Statement {},

    // Helper nodes.
    ParamList("param_list") { texts names, opt_text rest },
    ArgumentList("argument_list") { many values },
    VarDeclPart("var_decl_part") { text name, maybe init },
    Catch("catch") { text var, one body },
    SwitchClause("switch_clause") { many stmts },
    Case("case"): SwitchClause { many stmts, one condition },

    // Statements.
    EmptyStmt("empty_stmt"): Statement {},
    Block("block"): Statement { many stmts },
    LabelStmt("label_stmt"): Statement { text label, one stmt },
    VarDecl("var_decl"): Statement { text keyword, many parts },
    IfStmt("if_stmt"): Statement { one condition, one body, maybe else_stmt },
    DoWhile("do_while"): Statement { one condition, one body },
    WhileStmt("while_stmt"): Statement { one condition, one body },
    ForStmt("for_stmt"): Statement { one pre_stmt, one condition, one latch_stmt, one body },
    ForIn("for_in"): Statement { opt_text keyword, text var, one iterable, one body },
    ForOf("for_of"): Statement { opt_text keyword, text var, one iterable, one body },
    SwitchStmt("switch_stmt"): Statement { one value, many clauses },
    ReturnStmt("return_stmt"): Statement { maybe value },
    ThrowStmt("throw_stmt"): Statement { one value },
    TryStmt("try_stmt"): Statement { one body, maybe catch_block, maybe finally },
    BreakStmt("break_stmt"): Statement { opt_text label },
    ContinueStmt("continue_stmt"): Statement { opt_text label },
    FunctionStmt("function_stmt"): Statement { text name, one params, one body },

    // Literal expressions.
    NumberLiteral("number_literal"): Expression { text val },
    IntLiteral("int_literal"): NumberLiteral { text val },
    FloatLiteral("float_literal"): NumberLiteral { text val },
    StringLiteral("string_literal"): Expression { text val },
    RegexLiteral("regex_literal"): Expression { text val },
    TemplateLiteral("template_literal"): Expression { texts strs, many exprs },
    NullLiteral("null_literal"): Expression {},
    TrueLiteral("true_literal"): Expression {},
    FalseLiteral("false_literal"): Expression {},
    ArrayLiteral("array_literal"): Expression { many values },
    ObjectLiteral("object_literal"): Expression { many entries },
    ObjectEntry("object_entry"): Expression { text key, one val },
    SpreadExpr("spread_expr"): Expression { one list },

    // Names, accesses, calls.
    IdentifierExpr("identifier_expr"): Expression { text str },
    MemberAccess("member_access"): Expression { one base, text member },
    ComputedMemberAccess("computed_member_access"): Expression { one base, one member },
    CallExpr("call_expr"): Expression { one callee, one args },
    NewExpr("new_expr"): Expression { one constructor, maybe args },
    NewTarget("new_target"): Expression {},
    FunctionExpr("function_expr"): Expression { opt_text name, one params, one body },
    ArrowFunction("arrow_function"): Expression { one params, one body },

    // Unary operators.
    UnaryExpr("unary_expr"): Expression { one value },
    PrefixIncrement("prefix_increment"): UnaryExpr { one value },
    PrefixDecrement("prefix_decrement"): UnaryExpr { one value },
    PrefixPlus("prefix_plus"): UnaryExpr { one value },
    PrefixMinus("prefix_minus"): UnaryExpr { one value },
    NotExpr("not_expr"): UnaryExpr { one value },
    BinverseExpr("binverse_expr"): UnaryExpr { one value },
    TypeofExpr("typeof_expr"): UnaryExpr { one value },
    VoidExpr("void_expr"): UnaryExpr { one value },
    DeleteExpr("delete_expr"): UnaryExpr { one value },
    PostfixIncrement("postfix_increment"): UnaryExpr { one value },
    PostfixDecrement("postfix_decrement"): UnaryExpr { one value },

    // Binary operators.
    BinOpExpr("bin_op_expr"): Expression { one lhs, one rhs },
    Add("add"): BinOpExpr { one lhs, one rhs },
    Subtract("subtract"): BinOpExpr { one lhs, one rhs },
    Multiply("multiply"): BinOpExpr { one lhs, one rhs },
    Divide("divide"): BinOpExpr { one lhs, one rhs },
    PowExpr("pow_expr"): BinOpExpr { one lhs, one rhs },
    ModuloExpr("modulo_expr"): BinOpExpr { one lhs, one rhs },
    LessExpr("less_expr"): BinOpExpr { one lhs, one rhs },
    LessEqExpr("less_eq_expr"): BinOpExpr { one lhs, one rhs },
    GreaterExpr("greater_expr"): BinOpExpr { one lhs, one rhs },
    GreaterEqExpr("greater_eq_expr"): BinOpExpr { one lhs, one rhs },
    EqualsExpr("equals_expr"): BinOpExpr { one lhs, one rhs },
    StrongEqualsExpr("strong_equals_expr"): BinOpExpr { one lhs, one rhs },
    NotEqualsExpr("not_equals_expr"): BinOpExpr { one lhs, one rhs },
    StrongNotEqualsExpr("strong_not_equals_expr"): BinOpExpr { one lhs, one rhs },
    LogAndExpr("log_and_expr"): BinOpExpr { one lhs, one rhs },
    LogOrExpr("log_or_expr"): BinOpExpr { one lhs, one rhs },
    LshiftExpr("lshift_expr"): BinOpExpr { one lhs, one rhs },
    RshiftExpr("rshift_expr"): BinOpExpr { one lhs, one rhs },
    LogRshiftExpr("log_rshift_expr"): BinOpExpr { one lhs, one rhs },
    BitwiseAndExpr("bitwise_and_expr"): BinOpExpr { one lhs, one rhs },
    BitwiseOrExpr("bitwise_or_expr"): BinOpExpr { one lhs, one rhs },
    BitwiseXorExpr("bitwise_xor_expr"): BinOpExpr { one lhs, one rhs },
    Assign("assign"): BinOpExpr { one lhs, one rhs },
    AddAssign("add_assign"): BinOpExpr { one lhs, one rhs },
    SubtractAssign("subtract_assign"): BinOpExpr { one lhs, one rhs },
    MultiplyAssign("multiply_assign"): BinOpExpr { one lhs, one rhs },
    DivideAssign("divide_assign"): BinOpExpr { one lhs, one rhs },
    ModuloAssign("modulo_assign"): BinOpExpr { one lhs, one rhs },
    PowAssign("pow_assign"): BinOpExpr { one lhs, one rhs },
    LshiftAssign("lshift_assign"): BinOpExpr { one lhs, one rhs },
    RshiftAssign("rshift_assign"): BinOpExpr { one lhs, one rhs },
    LogRshiftAssign("log_rshift_assign"): BinOpExpr { one lhs, one rhs },
    AndAssign("and_assign"): BinOpExpr { one lhs, one rhs },
    OrAssign("or_assign"): BinOpExpr { one lhs, one rhs },
    XorAssign("xor_assign"): BinOpExpr { one lhs, one rhs },
    CommaOperator("comma_operator"): BinOpExpr { one lhs, one rhs },
    InstanceofExpr("instanceof_expr"): BinOpExpr { one lhs, one rhs },
    InExpr("in_expr"): BinOpExpr { one lhs, one rhs },
    TernaryOperator("ternary_operator"): BinOpExpr { one lhs, one rhs, one mid },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
