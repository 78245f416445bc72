use std::fmt;

/// Identifies the syntactic construct an [`AstNode`] represents.
///
/// Every node in the tree carries exactly one of these kinds. The set is
/// closed: the parser never produces a kind outside this enum, and the
/// evaluator dispatches exhaustively over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A sequence of declarations: types, variables, classes, functions.
    /// The root of every parsed program and the body of every class.
    PragmaticBlock,
    /// A sequence of executable statements. The body of every function.
    FunctionalBlock,
    /// A wrapper around a single value expression.
    Expression,

    /// `=` (right-associative).
    SimpleAssignment,
    /// `||`
    LogicalOr,
    /// `&&`
    LogicalAnd,
    /// `==`
    Equality,
    /// `!=`
    Inequality,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `+`
    Addition,
    /// `-`; two children when binary, one child when used as unary minus.
    Subtraction,
    /// `*`
    Multiplication,
    /// `/`
    Division,
    /// `%`
    Modulo,
    /// Prefix `!`; always one child.
    Negation,
    /// `.` member access (left-associative).
    Period,

    /// A call suffix; children are `[callee, Arguments]`.
    FunctionCall,
    /// The argument list of a call; one child per argument expression.
    Arguments,

    /// An identifier.
    Alnumus,
    /// `42`
    NumberLiteral,
    /// `42.42`
    RealLiteral,
    /// `'text'` including the surrounding quotes.
    StringLiteral,
    /// `42c`
    OctetLiteral,
    /// `1b`
    BitLiteral,
    /// `42u`
    UnsignedLiteral,
    /// `none` / `#none`
    NoneLiteral,

    /// `#var name;` children: `[name]`.
    AnonVariableDefinition,
    /// `#var name = expr;` children: `[name, expr]`.
    AnonVariableDefinitionAssignment,
    /// `#var [constraints] name;` or `#var [constraints] name = expr;`
    /// children: `[TypeConstraints, name]` plus the initializer when present.
    ConstrainedVariableDefinition,
    /// The bracketed constraint list of a constrained definition.
    TypeConstraints,
    /// `#type Name = type-expression;` children: `[name, type-expression]`.
    TypeDefinition,

    /// `#func name (args) {body};` children: `[name, Arguments,
    /// FunctionalBlock]`, preceded by a `TypeConstraints` child for the
    /// constrained form.
    MethodDefinition,
    /// `#func name {body};` children: `[name, FunctionalBlock]`.
    ShorthandVoidMethodDefinition,
    /// `#func [constraints] name {body};` children: `[TypeConstraints, name,
    /// FunctionalBlock]`.
    ShorthandConstrainedVoidMethodDefinition,
    /// `#class Name { ... };` children: `[name, PragmaticBlock]`.
    ClassDefinition,

    /// `#if (cond) {block}` with an optional trailing `If` (from `#elif`) or
    /// `FunctionalBlock` (from `#else`) child.
    If,
    /// `#while (cond) {block};` children: `[cond, FunctionalBlock]`.
    While,
    /// `#for (selector) {block};` children: `[selector, FunctionalBlock]`.
    For,
    /// `#on (selector) {block};` children: `[selector, FunctionalBlock]`.
    On,
    /// `#return expr;` child: `[Expression]`.
    Return,
    /// `#print expr;` child: `[Expression]`.
    Print,

    /// `&int`, optionally with two bound children.
    AInt,
    /// `&uint`, optionally with two bound children.
    AUint,
    /// `&real`
    AReal,
    /// `&octet`
    AOctet,
    /// `&bit`
    ABit,
    /// `&str`
    AStr,
    /// `&type`
    AType,
    /// `&value`
    AValue,
    /// `&identity`
    AIdentity,
    /// `&pointer[inner]`; the pointee child is required.
    APointer,
    /// `&array[inner, count]`; both children are required.
    AArray,

    /// Marker for a node that failed to parse.
    Invalid,
    /// Marker for an absent optional node.
    Pass,
}

impl NodeKind {
    /// A short lowercase name used by the tree printer and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PragmaticBlock => "pragmatic_block",
            Self::FunctionalBlock => "functional_block",
            Self::Expression => "expression",
            Self::SimpleAssignment => "simple_assignment",
            Self::LogicalOr => "logical_or",
            Self::LogicalAnd => "logical_and",
            Self::Equality => "equality",
            Self::Inequality => "inequality",
            Self::Less => "less",
            Self::LessEq => "less_eq",
            Self::Greater => "greater",
            Self::GreaterEq => "greater_eq",
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
            Self::Modulo => "modulo",
            Self::Negation => "negation",
            Self::Period => "period",
            Self::FunctionCall => "function_call",
            Self::Arguments => "arguments",
            Self::Alnumus => "alnumus",
            Self::NumberLiteral => "number_literal",
            Self::RealLiteral => "real_literal",
            Self::StringLiteral => "string_literal",
            Self::OctetLiteral => "octet_literal",
            Self::BitLiteral => "bit_literal",
            Self::UnsignedLiteral => "unsigned_literal",
            Self::NoneLiteral => "none_literal",
            Self::AnonVariableDefinition => "anon_variable_definition",
            Self::AnonVariableDefinitionAssignment => "anon_variable_definition_assignment",
            Self::ConstrainedVariableDefinition => "constrained_variable_definition",
            Self::TypeConstraints => "type_constraints",
            Self::TypeDefinition => "type_definition",
            Self::MethodDefinition => "method_definition",
            Self::ShorthandVoidMethodDefinition => "shorthand_void_method_definition",
            Self::ShorthandConstrainedVoidMethodDefinition => {
                "shorthand_constrained_void_method_definition"
            },
            Self::ClassDefinition => "class_definition",
            Self::If => "if",
            Self::While => "while",
            Self::For => "for",
            Self::On => "on",
            Self::Return => "return",
            Self::Print => "print",
            Self::AInt => "aint",
            Self::AUint => "auint",
            Self::AReal => "areal",
            Self::AOctet => "aoctet",
            Self::ABit => "abit",
            Self::AStr => "astr",
            Self::AType => "atype",
            Self::AValue => "avalue",
            Self::AIdentity => "aidentity",
            Self::APointer => "apointer",
            Self::AArray => "aarray",
            Self::Invalid => "invalid",
            Self::Pass => "pass",
        }
    }
}

/// A node of the abstract syntax tree.
///
/// Nodes exclusively own their children; there are no parent back-references,
/// so the tree is finite and acyclic by construction. The order of children
/// is semantic: a binary operator holds `[left, right]`, a function call holds
/// `[callee, arguments]`, a class definition holds `[name, body]`.
///
/// `line` and `column` locate the token that introduced the node, and
/// `literal` is that token's exact source text (or a fixed spelling such as
/// `"()"` for synthesized nodes like argument lists).
///
/// ## Example
/// ```
/// use candi::ast::{AstNode, NodeKind};
///
/// let mut sum = AstNode::new(NodeKind::Addition, "+", 1, 3);
/// sum.push(AstNode::new(NodeKind::NumberLiteral, "1", 1, 1));
/// sum.push(AstNode::new(NodeKind::NumberLiteral, "2", 1, 5));
///
/// assert_eq!(sum.children.len(), 2);
/// assert_eq!(sum.children[0].literal, "1");
/// ```
#[derive(Debug, Clone)]
pub struct AstNode {
    /// The syntactic construct this node represents.
    pub kind:     NodeKind,
    /// The exact source slice of the introducing token.
    pub literal:  String,
    /// Source line of the introducing token (1-based).
    pub line:     usize,
    /// Source column of the introducing token (1-based).
    pub column:   usize,
    /// Ordered, exclusively owned child nodes.
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// Creates a leaf node.
    #[must_use]
    pub fn new(kind: NodeKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        Self { kind,
               literal: literal.into(),
               line,
               column,
               children: Vec::new() }
    }

    /// Creates a node with the given children already attached.
    #[must_use]
    pub fn with_children(kind: NodeKind,
                         literal: impl Into<String>,
                         line: usize,
                         column: usize,
                         children: Vec<Self>)
                         -> Self {
        Self { kind,
               literal: literal.into(),
               line,
               column,
               children }
    }

    /// Appends a child node.
    pub fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Tests the node kind.
    #[must_use]
    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }
}

/// Structural equality: kind, literal, and children, in order.
///
/// Source positions are metadata and deliberately excluded, so expected trees
/// in tests can be written without fabricating line and column numbers.
impl PartialEq for AstNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.literal == other.literal && self.children == other.children
    }
}

impl Eq for AstNode {}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(node: &AstNode, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            writeln!(f,
                     "{:indent$}[{}] {}",
                     "",
                     node.kind.name(),
                     node.literal,
                     indent = depth * 2)?;
            for child in &node.children {
                write_node(child, depth + 1, f)?;
            }
            Ok(())
        }
        write_node(self, 0, f)
    }
}
