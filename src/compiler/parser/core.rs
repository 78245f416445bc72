use crate::{
    ast::AstNode,
    compiler::{
        parser::block::parse_pragmatic_block,
        tokenizer::{Token, TokenKind},
    },
    error::ParseError,
};

/// The outcome of a parsing step: on success, the produced node and the
/// index one past the last consumed token; on failure, a [`ParseError`]
/// whose rendered message accumulates the chain of productions from the
/// outermost entry point to the leaf failure.
pub type ParseOutcome = Result<(AstNode, usize), ParseError>;

/// Parses a complete token stream into a program.
///
/// The root of every program is a pragmatic block; the trailing `Eof` token
/// is not part of it.
///
/// # Errors
/// Fails when any statement in the stream fails to parse.
///
/// ## Example
/// ```
/// use candi::{
///     ast::NodeKind,
///     compiler::{parser::core::parse_program, tokenizer::tokenize},
/// };
///
/// let tokens = tokenize("#var x = 1 + 2;").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.kind, NodeKind::PragmaticBlock);
/// assert_eq!(program.children[0].kind, NodeKind::AnonVariableDefinitionAssignment);
/// ```
pub fn parse_program(tokens: &[Token]) -> Result<AstNode, ParseError> {
    let end = tokens.iter()
                    .position(|t| t.kind == TokenKind::Eof)
                    .unwrap_or(tokens.len());
    parse_pragmatic_block(&tokens[..end]).map_err(|e| e.within("parse_program"))
}
