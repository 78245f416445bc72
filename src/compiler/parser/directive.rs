use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        parser::{
            block::{parse_functional_block, parse_pragmatic_block},
            core::ParseOutcome,
            cursor::Cursor,
            expression::{parse_arguments, parse_expression},
            intrinsic::parse_intrinsic,
            scope::{find_frame_scope, find_list_scope, find_separated_scopes, find_statement},
        },
        tokenizer::{Token, TokenKind},
    },
    error::ParseError,
};

/// Builds an `Alnumus` node from an identifier token.
fn alnumus_node(token: &Token) -> AstNode {
    AstNode::new(NodeKind::Alnumus, token.literal.clone(), token.line, token.column)
}

/// Parses a type alias: `#type Name = <type-expression>;`.
///
/// The right-hand side is either an identifier or an intrinsic type
/// construction. The returned cursor points one past the terminating `;`.
///
/// # Errors
/// Fails when any required piece is missing or the type expression is
/// invalid.
pub fn parse_directive_type(tokens: &[Token], begin: usize) -> ParseOutcome {
    let within = |e: ParseError| e.within("parse_directive_type");
    let mut cursor = Cursor::at(tokens, begin);

    let keyword = cursor.expect(TokenKind::Type, "'#type'").map_err(within)?;
    let name = cursor.expect(TokenKind::Alnumus, "a type alias name")
                     .map_err(within)?;

    cursor.expect(TokenKind::SimpleAssignment, "'=' after the alias name")
          .map_err(within)?;

    let aliased = match cursor.kind() {
        Some(TokenKind::Alnumus) => {
            let node = cursor.to_node().map_err(within)?;
            cursor.advance();
            node
        },
        Some(kind) if kind.is_intrinsic() => {
            let (node, next) = parse_intrinsic(cursor.tokens(), cursor.pos()).map_err(within)?;
            cursor.set_pos(next);
            node
        },
        _ => {
            let found = cursor.current();
            return Err(within(ParseError::UnexpectedToken {
                expected: "a type expression".to_string(),
                found: found.map_or_else(String::new, |t| t.literal.clone()),
                line: found.map_or(keyword.line, |t| t.line),
                column: found.map_or(keyword.column, |t| t.column),
            }));
        },
    };

    cursor.expect(TokenKind::Eos, "';' after the type alias")
          .map_err(within)?;

    let node = AstNode::with_children(NodeKind::TypeDefinition,
                                      keyword.literal.clone(),
                                      keyword.line,
                                      keyword.column,
                                      vec![alnumus_node(name), aliased]);
    Ok((node, cursor.pos()))
}

/// Parses the bracketed constraint list of a constrained declaration.
///
/// Each comma-separated piece is an identifier or an intrinsic type
/// construction; the list must not be empty.
fn parse_type_constraints(tokens: &[Token], begin: usize) -> ParseOutcome {
    let within = |e: ParseError| e.within("parse_type_constraints");
    let frame = find_frame_scope(tokens, begin).map_err(within)?;
    let open = &tokens[begin];

    if frame.is_empty() {
        return Err(within(ParseError::UnexpectedToken {
            expected: "at least one type constraint".to_string(),
            found: tokens[frame.scope_end - 1].literal.clone(),
            line: open.line,
            column: open.column,
        }));
    }

    let mut node = AstNode::new(NodeKind::TypeConstraints, "[]", open.line, open.column);
    for (piece_begin, piece_end) in
        find_separated_scopes(tokens, frame.inner_begin, frame.inner_end, TokenKind::Comma)
            .map_err(within)?
    {
        let first = tokens.get(piece_begin).filter(|_| piece_begin < piece_end);
        let constraint = match first.map(|t| t.kind) {
            Some(TokenKind::Alnumus) if piece_end - piece_begin == 1 => {
                alnumus_node(&tokens[piece_begin])
            },
            Some(kind) if kind.is_intrinsic() => {
                let (inner, next) = parse_intrinsic(tokens, piece_begin).map_err(within)?;
                if next != piece_end {
                    let stray = &tokens[next];
                    return Err(within(ParseError::UnexpectedToken {
                        expected: "',' or ']'".to_string(),
                        found: stray.literal.clone(),
                        line: stray.line,
                        column: stray.column,
                    }));
                }
                inner
            },
            _ => {
                let at = first.unwrap_or(open);
                return Err(within(ParseError::UnexpectedToken {
                    expected: "an identifier or intrinsic type".to_string(),
                    found: at.literal.clone(),
                    line: at.line,
                    column: at.column,
                }));
            },
        };
        node.push(constraint);
    }

    Ok((node, frame.scope_end))
}

/// Parses a variable declaration.
///
/// Four syntactic forms are accepted:
///
/// 1. `#var name;`
/// 2. `#var name = <expr>;`
/// 3. `#var [<constraints>] name;`
/// 4. `#var [<constraints>] name = <expr>;`
///
/// Forms 1 and 2 produce anonymous definitions; forms 3 and 4 produce
/// constrained definitions carrying their constraint list. The returned
/// cursor points one past the terminating `;`.
///
/// # Errors
/// Fails when the directive is not followed by a name or constraint frame,
/// when the terminating `;` is missing, or when the initializer is invalid.
pub fn parse_directive_var(tokens: &[Token], begin: usize) -> ParseOutcome {
    let within = |e: ParseError| e.within("parse_directive_var");
    let bounds =
        find_statement(tokens, begin, TokenKind::Var, TokenKind::Eos).map_err(within)?;
    let keyword = &tokens[begin];

    match tokens.get(begin + 1).map(|t| t.kind) {
        Some(TokenKind::Alnumus) => {
            let name = alnumus_node(&tokens[begin + 1]);
            match tokens.get(begin + 2).map(|t| t.kind) {
                Some(TokenKind::Eos) => {
                    let node = AstNode::with_children(NodeKind::AnonVariableDefinition,
                                                      keyword.literal.clone(),
                                                      keyword.line,
                                                      keyword.column,
                                                      vec![name]);
                    Ok((node, begin + 3))
                },
                Some(TokenKind::SimpleAssignment) => {
                    let assign = &tokens[begin + 2];
                    if begin + 3 >= bounds.inner_end {
                        return Err(within(ParseError::OperatorWithoutOperand {
                            literal: assign.literal.clone(),
                            line: assign.line,
                            column: assign.column,
                        }));
                    }
                    let value = parse_expression(&tokens[begin + 3..bounds.inner_end])
                        .map_err(within)?;
                    let node =
                        AstNode::with_children(NodeKind::AnonVariableDefinitionAssignment,
                                               keyword.literal.clone(),
                                               keyword.line,
                                               keyword.column,
                                               vec![name, value]);
                    Ok((node, bounds.scope_end))
                },
                _ => {
                    let at = tokens.get(begin + 2).unwrap_or(keyword);
                    Err(within(ParseError::UnexpectedToken {
                        expected: "';' or '=' after the variable name".to_string(),
                        found: at.literal.clone(),
                        line: at.line,
                        column: at.column,
                    }))
                },
            }
        },
        Some(TokenKind::OpenFrame) => {
            let (constraints, after_frame) = parse_type_constraints(tokens, begin + 1)
                .map_err(within)?;
            let name_token = tokens.get(after_frame).ok_or_else(|| {
                within(ParseError::MissingEos { line:   keyword.line,
                                                column: keyword.column, })
            })?;
            if name_token.kind != TokenKind::Alnumus {
                return Err(within(ParseError::UnexpectedToken {
                    expected: "a variable name after the constraints".to_string(),
                    found: name_token.literal.clone(),
                    line: name_token.line,
                    column: name_token.column,
                }));
            }
            let name = alnumus_node(name_token);

            match tokens.get(after_frame + 1).map(|t| t.kind) {
                Some(TokenKind::Eos) => {
                    let node = AstNode::with_children(NodeKind::ConstrainedVariableDefinition,
                                                      keyword.literal.clone(),
                                                      keyword.line,
                                                      keyword.column,
                                                      vec![constraints, name]);
                    Ok((node, after_frame + 2))
                },
                Some(TokenKind::SimpleAssignment) => {
                    let assign = &tokens[after_frame + 1];
                    if after_frame + 2 >= bounds.inner_end {
                        return Err(within(ParseError::OperatorWithoutOperand {
                            literal: assign.literal.clone(),
                            line: assign.line,
                            column: assign.column,
                        }));
                    }
                    let value = parse_expression(&tokens[after_frame + 2..bounds.inner_end])
                        .map_err(within)?;
                    let node = AstNode::with_children(NodeKind::ConstrainedVariableDefinition,
                                                      keyword.literal.clone(),
                                                      keyword.line,
                                                      keyword.column,
                                                      vec![constraints, name, value]);
                    Ok((node, bounds.scope_end))
                },
                _ => {
                    let at = tokens.get(after_frame + 1).unwrap_or(name_token);
                    Err(within(ParseError::UnexpectedToken {
                        expected: "';' or '=' after the variable name".to_string(),
                        found: at.literal.clone(),
                        line: at.line,
                        column: at.column,
                    }))
                },
            }
        },
        _ => {
            let at = tokens.get(begin + 1).unwrap_or(keyword);
            Err(within(ParseError::UnexpectedToken {
                expected: "a variable name or '[' after the directive".to_string(),
                found: at.literal.clone(),
                line: at.line,
                column: at.column,
            }))
        },
    }
}

/// Parses a function definition.
///
/// Four syntactic forms are accepted:
///
/// 1. `#func name {body};` — shorthand for a function taking no arguments;
/// 2. `#func name (args) {body};`
/// 3. `#func [<constraints>] name {body};`
/// 4. `#func [<constraints>] name (args) {body};`
///
/// The body is parsed as a functional block. The returned cursor points one
/// past the terminating `;`.
///
/// # Errors
/// Fails when the name, body, or terminating `;` is missing, or when the
/// body fails to parse.
pub fn parse_directive_func(tokens: &[Token], begin: usize) -> ParseOutcome {
    let within = |e: ParseError| e.within("parse_directive_func");
    let mut cursor = Cursor::at(tokens, begin);
    let keyword = cursor.expect(TokenKind::Func, "'#func'").map_err(within)?;

    let constraints = if cursor.kind() == Some(TokenKind::OpenFrame) {
        let (node, next) = parse_type_constraints(tokens, cursor.pos()).map_err(within)?;
        cursor.set_pos(next);
        Some(node)
    } else {
        None
    };

    let name_token = cursor.expect(TokenKind::Alnumus, "a function name")
                           .map_err(within)?;
    let name = alnumus_node(name_token);

    let arguments = match cursor.kind() {
        Some(TokenKind::OpenScope) => {
            let (node, next) = parse_arguments(tokens, cursor.pos()).map_err(within)?;
            cursor.set_pos(next);
            Some(node)
        },
        Some(TokenKind::OpenList) => None,
        _ => {
            let at = cursor.current().unwrap_or(name_token);
            return Err(within(ParseError::UnexpectedToken {
                expected: "'(' or '{' after the function name".to_string(),
                found: at.literal.clone(),
                line: at.line,
                column: at.column,
            }));
        },
    };

    let body_scope = find_list_scope(tokens, cursor.pos()).map_err(within)?;
    let body = parse_functional_block(&tokens[body_scope.inner_begin..body_scope.inner_end])
        .map_err(within)?;
    cursor.set_pos(body_scope.scope_end);
    cursor.expect(TokenKind::Eos, "';' after the function body")
          .map_err(within)?;

    let (kind, children) = match (constraints, arguments) {
        (None, None) => (NodeKind::ShorthandVoidMethodDefinition, vec![name, body]),
        (None, Some(args)) => (NodeKind::MethodDefinition, vec![name, args, body]),
        (Some(cons), None) => {
            (NodeKind::ShorthandConstrainedVoidMethodDefinition, vec![cons, name, body])
        },
        (Some(cons), Some(args)) => (NodeKind::MethodDefinition, vec![cons, name, args, body]),
    };

    let node = AstNode::with_children(kind,
                                      keyword.literal.clone(),
                                      keyword.line,
                                      keyword.column,
                                      children);
    Ok((node, cursor.pos()))
}

/// Parses a class definition: `#class Name { <pragmatic-block> };`.
///
/// The body is a pragmatic block; its declarations become the class's
/// members. The returned cursor points one past the terminating `;`.
///
/// # Errors
/// Fails when the name, body, or terminating `;` is missing, or when the
/// body fails to parse.
pub fn parse_directive_class(tokens: &[Token], begin: usize) -> ParseOutcome {
    let within = |e: ParseError| e.within("parse_directive_class");
    let mut cursor = Cursor::at(tokens, begin);
    let keyword = cursor.expect(TokenKind::Class, "'#class'").map_err(within)?;
    let name_token = cursor.expect(TokenKind::Alnumus, "a class name")
                           .map_err(within)?;

    let body_scope = find_list_scope(tokens, cursor.pos()).map_err(within)?;
    let body = parse_pragmatic_block(&tokens[body_scope.inner_begin..body_scope.inner_end])
        .map_err(within)?;
    cursor.set_pos(body_scope.scope_end);
    cursor.expect(TokenKind::Eos, "';' after the class body")
          .map_err(within)?;

    let node = AstNode::with_children(NodeKind::ClassDefinition,
                                      keyword.literal.clone(),
                                      keyword.line,
                                      keyword.column,
                                      vec![alnumus_node(name_token), body]);
    Ok((node, cursor.pos()))
}

/// Parses a `<keyword> <expr>;` statement into a node wrapping a single
/// `Expression` child. Shared by the return and print directives.
fn parse_expression_statement(tokens: &[Token],
                              begin: usize,
                              keyword_kind: TokenKind,
                              kind: NodeKind,
                              production: &'static str)
                              -> ParseOutcome {
    let within = move |e: ParseError| e.within(production);
    let bounds =
        find_statement(tokens, begin, keyword_kind, TokenKind::Eos).map_err(within)?;
    let keyword = &tokens[begin];

    if bounds.inner_begin >= bounds.inner_end {
        return Err(within(ParseError::UnexpectedToken {
            expected: "an expression after the directive".to_string(),
            found: tokens[bounds.inner_end].literal.clone(),
            line: keyword.line,
            column: keyword.column,
        }));
    }

    let value =
        parse_expression(&tokens[bounds.inner_begin..bounds.inner_end]).map_err(within)?;
    let expression = AstNode::with_children(NodeKind::Expression,
                                            "",
                                            value.line,
                                            value.column,
                                            vec![value]);
    let node = AstNode::with_children(kind,
                                      keyword.literal.clone(),
                                      keyword.line,
                                      keyword.column,
                                      vec![expression]);
    Ok((node, bounds.scope_end))
}

/// Parses a return statement: `#return <expr>;`.
///
/// The value is wrapped in an `Expression` node under the `Return` node.
/// The returned cursor points one past the terminating `;`.
///
/// # Errors
/// Fails when the expression is missing or invalid, or the `;` is missing.
pub fn parse_directive_return(tokens: &[Token], begin: usize) -> ParseOutcome {
    parse_expression_statement(tokens,
                               begin,
                               TokenKind::Return,
                               NodeKind::Return,
                               "parse_directive_return")
}

/// Parses a print statement: `#print <expr>;`.
///
/// The value is wrapped in an `Expression` node under the `Print` node.
/// The returned cursor points one past the terminating `;`.
///
/// # Errors
/// Fails when the expression is missing or invalid, or the `;` is missing.
pub fn parse_directive_print(tokens: &[Token], begin: usize) -> ParseOutcome {
    parse_expression_statement(tokens,
                               begin,
                               TokenKind::Print,
                               NodeKind::Print,
                               "parse_directive_print")
}

/// Parses the `#none` literal as a statement-position node.
///
/// # Errors
/// Fails when the token at `begin` is not the none literal.
pub fn parse_directive_none(tokens: &[Token], begin: usize) -> ParseOutcome {
    let cursor = Cursor::at(tokens, begin);
    match cursor.current() {
        Some(token) if token.kind == TokenKind::NoneLiteral => {
            Ok((AstNode::new(NodeKind::NoneLiteral, token.literal.clone(), token.line,
                             token.column),
                begin + 1))
        },
        Some(token) => Err(ParseError::UnexpectedToken { expected: "'#none'".to_string(),
                                                         found:    token.literal.clone(),
                                                         line:     token.line,
                                                         column:   token.column, }
                           .within("parse_directive_none")),
        None => Err(cursor.end_of_input().within("parse_directive_none")),
    }
}
