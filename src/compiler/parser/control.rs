use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        parser::{
            block::parse_functional_block,
            core::ParseOutcome,
            cursor::Cursor,
            expression::parse_expression,
            scope::{find_list_scope, find_paren_scope},
        },
        tokenizer::{Token, TokenKind},
    },
    error::ParseError,
};

/// Parses one `<keyword> (<expr>) {<block>}` clause.
///
/// Returns the clause node with `[condition, block]` children and the
/// position one past the closing `}`.
fn parse_condition_clause(tokens: &[Token],
                          begin: usize,
                          keyword: TokenKind,
                          kind: NodeKind,
                          production: &'static str)
                          -> ParseOutcome {
    let within = move |e: ParseError| e.within(production);
    let mut cursor = Cursor::at(tokens, begin);
    let keyword_token = cursor.expect(keyword, "a control directive").map_err(within)?;

    let condition_scope = find_paren_scope(tokens, cursor.pos()).map_err(within)?;
    if condition_scope.is_empty() {
        return Err(within(ParseError::EmptyParenthesis {
            line: tokens[condition_scope.scope_begin].line,
            column: tokens[condition_scope.scope_begin].column,
        }));
    }
    let condition =
        parse_expression(&tokens[condition_scope.inner_begin..condition_scope.inner_end])
            .map_err(within)?;

    let body_scope = find_list_scope(tokens, condition_scope.scope_end).map_err(within)?;
    let body = parse_functional_block(&tokens[body_scope.inner_begin..body_scope.inner_end])
        .map_err(within)?;

    let node = AstNode::with_children(kind,
                                      keyword_token.literal.clone(),
                                      keyword_token.line,
                                      keyword_token.column,
                                      vec![condition, body]);
    Ok((node, body_scope.scope_end))
}

/// Parses an `#if` chain recursively: the leading clause, then an optional
/// `#elif` chain or `#else` block as a trailing child.
fn parse_if_chain(tokens: &[Token], begin: usize, keyword: TokenKind) -> ParseOutcome {
    let (mut node, after) =
        parse_condition_clause(tokens, begin, keyword, NodeKind::If, "parse_directive_if")?;

    match tokens.get(after).map(|t| t.kind) {
        Some(TokenKind::Elif) => {
            let (tail, next) = parse_if_chain(tokens, after, TokenKind::Elif)?;
            node.push(tail);
            Ok((node, next))
        },
        Some(TokenKind::Else) => {
            let body_scope = find_list_scope(tokens, after + 1)
                .map_err(|e| e.within("parse_directive_if"))?;
            let body =
                parse_functional_block(&tokens[body_scope.inner_begin..body_scope.inner_end])
                    .map_err(|e| e.within("parse_directive_if"))?;
            node.push(body);
            Ok((node, body_scope.scope_end))
        },
        _ => Ok((node, after)),
    }
}

/// Parses a conditional statement:
/// `#if (<expr>) {<block>}` with optional `#elif` clauses and a final
/// optional `#else {<block>}`, terminated by `;`.
///
/// Each `#elif` becomes a nested `If` child of the clause before it; an
/// `#else` block becomes a trailing `FunctionalBlock` child. The returned
/// cursor points one past the terminating `;`.
///
/// # Errors
/// Fails when a condition or block is missing or malformed, or the
/// terminating `;` is missing.
pub fn parse_directive_if(tokens: &[Token], begin: usize) -> ParseOutcome {
    let (node, after) = parse_if_chain(tokens, begin, TokenKind::If)?;
    let mut cursor = Cursor::at(tokens, after);
    cursor.expect(TokenKind::Eos, "';' after the conditional")
          .map_err(|e| e.within("parse_directive_if"))?;
    Ok((node, cursor.pos()))
}

fn parse_condition_statement(tokens: &[Token],
                             begin: usize,
                             keyword: TokenKind,
                             kind: NodeKind,
                             production: &'static str)
                             -> ParseOutcome {
    let (node, after) = parse_condition_clause(tokens, begin, keyword, kind, production)?;
    let mut cursor = Cursor::at(tokens, after);
    cursor.expect(TokenKind::Eos, "';' after the block")
          .map_err(|e| e.within(production))?;
    Ok((node, cursor.pos()))
}

/// Parses a while loop: `#while (<expr>) {<block>};`.
///
/// # Errors
/// Fails when the condition, block, or terminating `;` is missing.
pub fn parse_directive_while(tokens: &[Token], begin: usize) -> ParseOutcome {
    parse_condition_statement(tokens,
                              begin,
                              TokenKind::While,
                              NodeKind::While,
                              "parse_directive_while")
}

/// Parses a for loop: `#for (<selector>) {<block>};`.
///
/// # Errors
/// Fails when the selector, block, or terminating `;` is missing.
pub fn parse_directive_for(tokens: &[Token], begin: usize) -> ParseOutcome {
    parse_condition_statement(tokens,
                              begin,
                              TokenKind::For,
                              NodeKind::For,
                              "parse_directive_for")
}

/// Parses a switch statement: `#on (<selector>) {<block>};`.
///
/// # Errors
/// Fails when the selector, block, or terminating `;` is missing.
pub fn parse_directive_on(tokens: &[Token], begin: usize) -> ParseOutcome {
    parse_condition_statement(tokens,
                              begin,
                              TokenKind::On,
                              NodeKind::On,
                              "parse_directive_on")
}
