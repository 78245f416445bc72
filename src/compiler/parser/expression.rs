use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        parser::{
            core::ParseOutcome,
            cursor::{Associativity, Cursor, associativity},
            scope::{find_open_statement, find_paren_scope, find_separated_scopes},
        },
        tokenizer::{Token, TokenKind},
    },
    error::ParseError,
};

/// Parses `tokens` as one complete value expression.
///
/// The whole slice must form a single expression; trailing tokens are an
/// error. Operators are combined by binding importance, left-to-right, with
/// assignment grouping rightward; member access and call suffixes bind
/// tightest.
///
/// # Errors
/// Fails on an empty slice, an operator with no operand, an operand that
/// cannot start a value, empty `()`, or mismatched brackets. All failures
/// are fatal for the expression.
///
/// ## Example
/// ```
/// use candi::{
///     ast::NodeKind,
///     compiler::{parser::expression::parse_expression, tokenizer::tokenize},
/// };
///
/// let tokens = tokenize("1 + 1 * 1").unwrap();
/// let expr = parse_expression(&tokens[..tokens.len() - 1]).unwrap();
///
/// assert_eq!(expr.kind, NodeKind::Addition);
/// assert_eq!(expr.children[1].kind, NodeKind::Multiplication);
/// ```
pub fn parse_expression(tokens: &[Token]) -> Result<AstNode, ParseError> {
    let mut cursor = Cursor::new(tokens);
    if cursor.at_end() {
        return Err(cursor.end_of_input());
    }
    let node = parse_binary(&mut cursor, 0)?;
    match cursor.current() {
        None => Ok(node),
        Some(token) => Err(ParseError::UnexpectedToken { expected:
                                                             "end of expression".to_string(),
                                                         found:    token.literal.clone(),
                                                         line:     token.line,
                                                         column:   token.column, }),
    }
}

/// Parses binary operator chains at or above `min_importance`.
///
/// Classic importance climb: parse a unary-or-postfix operand, then while
/// the next token is a binary operator binding at least as tight as
/// `min_importance`, parse its right side with the operator's own importance
/// as the new floor (unchanged for right-associative operators, one tighter
/// for left-associative ones) and fold.
fn parse_binary(cursor: &mut Cursor<'_>, min_importance: u8) -> Result<AstNode, ParseError> {
    let mut left = parse_unary(cursor)?;

    while let Some(imp) = cursor.importance() {
        if imp < min_importance {
            break;
        }
        let token = cursor.current().expect("importance implies a current token");
        let mut operation = cursor.to_node()?;
        cursor.advance();

        if cursor.at_end() {
            return Err(ParseError::OperatorWithoutOperand { literal: token.literal.clone(),
                                                            line:    token.line,
                                                            column:  token.column, });
        }

        let floor = match associativity(token.kind) {
            Associativity::Right => imp,
            Associativity::Left => imp + 1,
        };
        let right = parse_binary(cursor, floor)?;
        operation.push(left);
        operation.push(right);
        left = operation;
    }

    Ok(left)
}

/// Parses prefix unary operators.
///
/// `!` and `-` are right-associative, so `!!1` nests and `!-x` is
/// `!(-x)`. A unary operator at the end of input, or followed by a token
/// that cannot start an operand, is an error.
fn parse_unary(cursor: &mut Cursor<'_>) -> Result<AstNode, ParseError> {
    if cursor.is_unary_operator() {
        let token = cursor.current().expect("unary implies a current token");
        let mut operation = cursor.to_node()?;
        cursor.advance();
        if cursor.at_end() {
            return Err(ParseError::OperatorWithoutOperand { literal: token.literal.clone(),
                                                            line:    token.line,
                                                            column:  token.column, });
        }
        let operand = parse_unary(cursor)?;
        operation.push(operand);
        Ok(operation)
    } else {
        parse_postfix(cursor)
    }
}

/// Parses a primary operand followed by any number of member-access and
/// call suffixes.
///
/// Both suffixes group leftward, and a call binds to everything built so
/// far: `a.b().c` is `((a.b)()).c`.
fn parse_postfix(cursor: &mut Cursor<'_>) -> Result<AstNode, ParseError> {
    let mut node = parse_primary(cursor)?;

    loop {
        match cursor.kind() {
            Some(TokenKind::Period) => {
                let token = cursor.current().expect("peeked");
                let mut access = cursor.to_node()?;
                cursor.advance();
                if cursor.at_end() {
                    return Err(ParseError::OperatorWithoutOperand {
                        literal: token.literal.clone(),
                        line: token.line,
                        column: token.column,
                    });
                }
                let member = parse_primary(cursor)?;
                access.push(node);
                access.push(member);
                node = access;
            },
            Some(TokenKind::OpenScope) => {
                let open = cursor.current().expect("peeked");
                let (arguments, next) = parse_arguments(cursor.tokens(), cursor.pos())?;
                let mut call =
                    AstNode::new(NodeKind::FunctionCall, "()", open.line, open.column);
                call.push(node);
                call.push(arguments);
                node = call;
                cursor.set_pos(next);
            },
            _ => break,
        }
    }

    Ok(node)
}

/// Parses a primary operand: a literal, an identifier, or a parenthesized
/// subexpression.
fn parse_primary(cursor: &mut Cursor<'_>) -> Result<AstNode, ParseError> {
    let token = cursor.current().ok_or(cursor.end_of_input())?;
    match token.kind {
        TokenKind::NumberLiteral
        | TokenKind::RealLiteral
        | TokenKind::StringLiteral
        | TokenKind::OctetLiteral
        | TokenKind::BitLiteral
        | TokenKind::UnsignedLiteral
        | TokenKind::NoneLiteral
        | TokenKind::Alnumus => {
            let node = cursor.to_node()?;
            cursor.advance();
            Ok(node)
        },
        TokenKind::OpenScope => {
            let bounds = find_paren_scope(cursor.tokens(), cursor.pos())?;
            if bounds.is_empty() {
                return Err(ParseError::EmptyParenthesis { line:   token.line,
                                                          column: token.column, });
            }
            let inner = parse_expression(&cursor.tokens()[bounds.inner_begin..bounds.inner_end])?;
            cursor.set_pos(bounds.scope_end);
            Ok(inner)
        },
        _ => Err(ParseError::InvalidOperand { literal: token.literal.clone(),
                                              line:    token.line,
                                              column:  token.column, }),
    }
}

/// Parses a single operand token into its AST node.
///
/// Accepts the literal kinds (number, real, string, octet, bit, unsigned,
/// none) and identifiers. The returned cursor points one past the operand.
///
/// # Errors
/// Fails when the token at `begin` is not an operand.
pub fn parse_operand(tokens: &[Token], begin: usize) -> ParseOutcome {
    let cursor = Cursor::at(tokens, begin);
    let token = cursor.current().ok_or(cursor.end_of_input())?;
    match token.kind {
        TokenKind::NumberLiteral
        | TokenKind::RealLiteral
        | TokenKind::StringLiteral
        | TokenKind::OctetLiteral
        | TokenKind::BitLiteral
        | TokenKind::UnsignedLiteral
        | TokenKind::NoneLiteral
        | TokenKind::Alnumus => Ok((cursor.to_node()?, begin + 1)),
        _ => Err(ParseError::InvalidOperand { literal: token.literal.clone(),
                                              line:    token.line,
                                              column:  token.column, }
                 .within("parse_operand")),
    }
}

/// Parses a parenthesized argument list starting at the `(` at `begin`.
///
/// The contents are split at depth-zero commas; each piece is parsed as a
/// full expression and becomes one child of the returned `Arguments` node.
/// `()` yields an empty argument list. The returned cursor points one past
/// the closing `)`.
///
/// # Errors
/// Fails on a missing or mismatched `)`, an empty piece between commas, or
/// an invalid argument expression.
pub fn parse_arguments(tokens: &[Token], begin: usize) -> ParseOutcome {
    let bounds =
        find_paren_scope(tokens, begin).map_err(|e| e.within("parse_arguments"))?;
    let open = &tokens[begin];
    let mut node = AstNode::new(NodeKind::Arguments, "()", open.line, open.column);

    for (piece_begin, piece_end) in
        find_separated_scopes(tokens, bounds.inner_begin, bounds.inner_end, TokenKind::Comma)?
    {
        if piece_begin >= piece_end {
            let at = tokens.get(piece_begin).unwrap_or(open);
            return Err(ParseError::UnexpectedToken { expected:
                                                         "an argument expression".to_string(),
                                                     found:    at.literal.clone(),
                                                     line:     at.line,
                                                     column:   at.column, }
                       .within("parse_arguments"));
        }
        let argument = parse_expression(&tokens[piece_begin..piece_end])
            .map_err(|e| e.within("parse_arguments"))?;
        node.push(argument);
    }

    Ok((node, bounds.scope_end))
}

/// Parses a value statement: an expression terminated by `;`.
///
/// The statement is delimited with the open-statement finder (the leading
/// token's kind may recur in the body, as in `a = a + a;`), then handed to
/// the expression builder whole. The returned cursor points one past the
/// terminating `;`.
///
/// # Errors
/// Fails when no terminating `;` exists or the expression is invalid.
pub fn parse_value_statement(tokens: &[Token], begin: usize) -> ParseOutcome {
    let first = tokens.get(begin)
                      .ok_or(ParseError::UnexpectedEndOfInput { line: 1, column: 1 })?;
    let bounds = find_open_statement(tokens, begin, first.kind, TokenKind::Eos)
        .map_err(|e| e.within("parse_value_statement"))?;
    let expression = parse_expression(&tokens[begin..bounds.inner_end])
        .map_err(|e| e.within("parse_value_statement"))?;
    Ok((expression, bounds.scope_end))
}
