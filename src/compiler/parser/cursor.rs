use crate::{
    ast::{AstNode, NodeKind},
    compiler::tokenizer::{Token, TokenKind},
    error::ParseError,
};

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// Groups leftward: `a - b - c` is `(a - b) - c`.
    Left,
    /// Groups rightward: `a = b = c` is `a = (b = c)`.
    Right,
}

/// Returns the binding importance of a binary operator token.
///
/// Higher importance binds tighter. Returns `None` for tokens that are not
/// binary operators. Member access (`.`) carries the highest importance;
/// assignment the lowest.
#[must_use]
pub const fn importance(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::SimpleAssignment => Some(1),
        TokenKind::LogicalOr => Some(2),
        TokenKind::LogicalAnd => Some(3),
        TokenKind::Equality | TokenKind::Inequality => Some(4),
        TokenKind::Less | TokenKind::LessEq | TokenKind::Greater | TokenKind::GreaterEq => Some(5),
        TokenKind::Addition | TokenKind::Subtraction => Some(6),
        TokenKind::Multiplication | TokenKind::Division | TokenKind::Modulo => Some(7),
        TokenKind::Period => Some(9),
        _ => None,
    }
}

/// Returns the associativity of a binary operator token.
///
/// Only assignment is right-associative; every other binary operator groups
/// leftward.
#[must_use]
pub const fn associativity(kind: TokenKind) -> Associativity {
    match kind {
        TokenKind::SimpleAssignment => Associativity::Right,
        _ => Associativity::Left,
    }
}

/// Maps an operand or operator token kind to the node kind a single-token
/// AST node carries. Returns `None` for tokens with no node form (brackets,
/// separators, keywords).
#[must_use]
pub const fn node_kind_of(kind: TokenKind) -> Option<NodeKind> {
    match kind {
        TokenKind::SimpleAssignment => Some(NodeKind::SimpleAssignment),
        TokenKind::LogicalOr => Some(NodeKind::LogicalOr),
        TokenKind::LogicalAnd => Some(NodeKind::LogicalAnd),
        TokenKind::Equality => Some(NodeKind::Equality),
        TokenKind::Inequality => Some(NodeKind::Inequality),
        TokenKind::Less => Some(NodeKind::Less),
        TokenKind::LessEq => Some(NodeKind::LessEq),
        TokenKind::Greater => Some(NodeKind::Greater),
        TokenKind::GreaterEq => Some(NodeKind::GreaterEq),
        TokenKind::Addition => Some(NodeKind::Addition),
        TokenKind::Subtraction => Some(NodeKind::Subtraction),
        TokenKind::Multiplication => Some(NodeKind::Multiplication),
        TokenKind::Division => Some(NodeKind::Division),
        TokenKind::Modulo => Some(NodeKind::Modulo),
        TokenKind::Negation => Some(NodeKind::Negation),
        TokenKind::Period => Some(NodeKind::Period),
        TokenKind::Alnumus => Some(NodeKind::Alnumus),
        TokenKind::NumberLiteral => Some(NodeKind::NumberLiteral),
        TokenKind::RealLiteral => Some(NodeKind::RealLiteral),
        TokenKind::StringLiteral => Some(NodeKind::StringLiteral),
        TokenKind::OctetLiteral => Some(NodeKind::OctetLiteral),
        TokenKind::BitLiteral => Some(NodeKind::BitLiteral),
        TokenKind::UnsignedLiteral => Some(NodeKind::UnsignedLiteral),
        TokenKind::NoneLiteral => Some(NodeKind::NoneLiteral),
        TokenKind::AInt => Some(NodeKind::AInt),
        TokenKind::AUint => Some(NodeKind::AUint),
        TokenKind::AReal => Some(NodeKind::AReal),
        TokenKind::AOctet => Some(NodeKind::AOctet),
        TokenKind::ABit => Some(NodeKind::ABit),
        TokenKind::AStr => Some(NodeKind::AStr),
        TokenKind::AType => Some(NodeKind::AType),
        TokenKind::AValue => Some(NodeKind::AValue),
        TokenKind::AIdentity => Some(NodeKind::AIdentity),
        TokenKind::APointer => Some(NodeKind::APointer),
        TokenKind::AArray => Some(NodeKind::AArray),
        _ => None,
    }
}

/// A non-owning cursor over a token slice.
///
/// The cursor is the parser's view of the token stream: it exposes the
/// current token, bounded lookahead, and the operator classification of the
/// current position (importance, associativity, unary-ness), plus
/// [`Cursor::to_node`] for turning the current token into a single-token AST
/// node.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos:    usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `tokens`.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Creates a cursor positioned at `pos`.
    #[must_use]
    pub const fn at(tokens: &'a [Token], pos: usize) -> Self {
        Self { tokens, pos }
    }

    /// The current position as an index into the underlying slice.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// The underlying token slice.
    #[must_use]
    pub const fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// Whether the cursor has consumed every token.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The current token, if any.
    #[must_use]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// The token `offset` positions ahead of the current one.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    /// The kind of the current token, if any.
    #[must_use]
    pub fn kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Advances past the current token.
    pub const fn advance(&mut self) {
        self.pos += 1;
    }

    /// Moves the cursor to an absolute position.
    pub const fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// The binding importance of the current token, when it is a binary
    /// operator.
    #[must_use]
    pub fn importance(&self) -> Option<u8> {
        self.kind().and_then(importance)
    }

    /// The associativity of the current token. Meaningful only when the
    /// current token is a binary operator.
    #[must_use]
    pub fn associativity(&self) -> Associativity {
        self.kind().map_or(Associativity::Left, associativity)
    }

    /// Whether the current token is a prefix unary operator (`!` or `-`).
    #[must_use]
    pub fn is_unary_operator(&self) -> bool {
        matches!(self.kind(), Some(TokenKind::Negation | TokenKind::Subtraction))
    }

    /// Builds a single-token AST node from the current token.
    ///
    /// # Errors
    /// Fails when the cursor is at the end of input or the current token has
    /// no node form (brackets, separators, keywords).
    pub fn to_node(&self) -> Result<AstNode, ParseError> {
        let token = self.current().ok_or(self.end_of_input())?;
        let kind = node_kind_of(token.kind).ok_or_else(|| ParseError::InvalidOperand {
            literal: token.literal.clone(),
            line: token.line,
            column: token.column,
        })?;
        Ok(AstNode::new(kind, token.literal.clone(), token.line, token.column))
    }

    /// Consumes the current token, requiring it to be of `kind`.
    ///
    /// # Errors
    /// Fails with [`ParseError::UnexpectedToken`] when a different token is
    /// found, or [`ParseError::UnexpectedEndOfInput`] at the end of input.
    pub fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&'a Token, ParseError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(token)
            },
            Some(token) => Err(ParseError::UnexpectedToken { expected: expected.to_string(),
                                                             found:    token.literal.clone(),
                                                             line:     token.line,
                                                             column:   token.column, }),
            None => Err(self.end_of_input()),
        }
    }

    /// An end-of-input error at the position of the last available token.
    #[must_use]
    pub fn end_of_input(&self) -> ParseError {
        let (line, column) = self.tokens
                                 .last()
                                 .map_or((1, 1), |t| (t.line, t.column));
        ParseError::UnexpectedEndOfInput { line, column }
    }
}
