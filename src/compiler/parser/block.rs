use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        parser::{
            control::{parse_directive_for, parse_directive_if, parse_directive_on,
                      parse_directive_while},
            directive::{parse_directive_class, parse_directive_func, parse_directive_print,
                        parse_directive_return, parse_directive_type, parse_directive_var},
            expression::parse_value_statement,
        },
        tokenizer::{Token, TokenKind},
    },
    error::ParseError,
};

/// Parses a pragmatic block: a sequence of declarations.
///
/// The whole slice is consumed; parsing stops at the end of the slice or at
/// an `Eof` token. Every statement must begin with an identifier or one of
/// `#type`, `#var`, `#class`, `#func`, `#print`; any other leading token
/// aborts the block.
///
/// # Errors
/// Fails when a statement has an invalid leading token or any statement
/// fails to parse; the failure carries the inner parser's diagnostic chain.
pub fn parse_pragmatic_block(tokens: &[Token]) -> Result<AstNode, ParseError> {
    let within = |e: ParseError| e.within("parse_pragmatic_block");
    let (line, column) = tokens.first().map_or((1, 1), |t| (t.line, t.column));
    let mut node = AstNode::new(NodeKind::PragmaticBlock, "", line, column);

    let mut at = 0;
    while at < tokens.len() && tokens[at].kind != TokenKind::Eof {
        let (statement, next) = match tokens[at].kind {
            TokenKind::Alnumus => parse_value_statement(tokens, at).map_err(within)?,
            TokenKind::Type => parse_directive_type(tokens, at).map_err(within)?,
            TokenKind::Var => parse_directive_var(tokens, at).map_err(within)?,
            TokenKind::Class => parse_directive_class(tokens, at).map_err(within)?,
            TokenKind::Func => parse_directive_func(tokens, at).map_err(within)?,
            TokenKind::Print => parse_directive_print(tokens, at).map_err(within)?,
            _ => {
                return Err(within(ParseError::UnexpectedToken {
                    expected: "a declaration (identifier, #type, #var, #class, #func, #print)"
                        .to_string(),
                    found: tokens[at].literal.clone(),
                    line: tokens[at].line,
                    column: tokens[at].column,
                }));
            },
        };
        node.push(statement);
        at = next;
    }

    Ok(node)
}

/// Parses a functional block: a sequence of executable statements.
///
/// The whole slice is consumed; parsing stops at the end of the slice or at
/// an `Eof` token. Every statement must begin with an identifier or one of
/// `#var`, `#return`, `#print`, `#if`, `#while`, `#for`, `#on`; any other
/// leading token aborts the block.
///
/// # Errors
/// Fails when a statement has an invalid leading token or any statement
/// fails to parse; the failure carries the inner parser's diagnostic chain.
pub fn parse_functional_block(tokens: &[Token]) -> Result<AstNode, ParseError> {
    let within = |e: ParseError| e.within("parse_functional_block");
    let (line, column) = tokens.first().map_or((1, 1), |t| (t.line, t.column));
    let mut node = AstNode::new(NodeKind::FunctionalBlock, "", line, column);

    let mut at = 0;
    while at < tokens.len() && tokens[at].kind != TokenKind::Eof {
        let (statement, next) = match tokens[at].kind {
            TokenKind::Alnumus => parse_value_statement(tokens, at).map_err(within)?,
            TokenKind::Var => parse_directive_var(tokens, at).map_err(within)?,
            TokenKind::Return => parse_directive_return(tokens, at).map_err(within)?,
            TokenKind::Print => parse_directive_print(tokens, at).map_err(within)?,
            TokenKind::If => parse_directive_if(tokens, at).map_err(within)?,
            TokenKind::While => parse_directive_while(tokens, at).map_err(within)?,
            TokenKind::For => parse_directive_for(tokens, at).map_err(within)?,
            TokenKind::On => parse_directive_on(tokens, at).map_err(within)?,
            _ => {
                return Err(within(ParseError::UnexpectedToken {
                    expected: "a statement (identifier, #var, #return, #print, #if, #while, \
                               #for, #on)"
                        .to_string(),
                    found: tokens[at].literal.clone(),
                    line: tokens[at].line,
                    column: tokens[at].column,
                }));
            },
        };
        node.push(statement);
        at = next;
    }

    Ok(node)
}
