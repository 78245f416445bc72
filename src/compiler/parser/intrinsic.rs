use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        parser::{core::ParseOutcome, cursor::Cursor},
        tokenizer::{Token, TokenKind},
    },
    error::ParseError,
};

/// Parses an intrinsic type construction starting at an intrinsic token.
///
/// Unconstrained intrinsics (`&real`, `&octet`, `&bit`, `&str`, `&type`,
/// `&value`, `&identity`) are single-token nodes. The remaining intrinsics
/// accept or require a bracketed constraint:
///
/// - `&int[lo...hi]` — two signed integer bounds, either with an optional
///   leading `-`;
/// - `&uint[lo...hi]` — two unsigned bounds;
/// - `&pointer[inner]` — a required pointee type, an identifier or another
///   intrinsic;
/// - `&array[inner, count]` — a required element type and element count.
///
/// A malformed constraint (missing separator, missing bound, unparseable
/// inner type) is a fatal error; there is no fallback to the unconstrained
/// form once the `[` is seen.
///
/// The returned cursor points one past the last consumed token.
///
/// # Errors
/// Fails when `begin` is not an intrinsic token or a constraint is
/// malformed.
pub fn parse_intrinsic(tokens: &[Token], begin: usize) -> ParseOutcome {
    let mut cursor = Cursor::at(tokens, begin);
    let token = cursor.current().ok_or(cursor.end_of_input())?;

    if !token.kind.is_intrinsic() {
        return Err(ParseError::UnexpectedToken { expected: "an intrinsic type".to_string(),
                                                 found:    token.literal.clone(),
                                                 line:     token.line,
                                                 column:   token.column, }
                   .within("parse_intrinsic"));
    }

    let mut node = cursor.to_node().map_err(|e| e.within("parse_intrinsic"))?;
    cursor.advance();

    match token.kind {
        TokenKind::AInt if cursor.kind() == Some(TokenKind::OpenFrame) => {
            cursor.advance();
            node.push(parse_signed_bound(&mut cursor)?);
            cursor.expect(TokenKind::Ellipsis, "'...' between bounds")
                  .map_err(|e| e.within("parse_intrinsic"))?;
            node.push(parse_signed_bound(&mut cursor)?);
            cursor.expect(TokenKind::CloseFrame, "']' after bounds")
                  .map_err(|e| e.within("parse_intrinsic"))?;
        },
        TokenKind::AUint if cursor.kind() == Some(TokenKind::OpenFrame) => {
            cursor.advance();
            node.push(parse_unsigned_bound(&mut cursor)?);
            cursor.expect(TokenKind::Ellipsis, "'...' between bounds")
                  .map_err(|e| e.within("parse_intrinsic"))?;
            node.push(parse_unsigned_bound(&mut cursor)?);
            cursor.expect(TokenKind::CloseFrame, "']' after bounds")
                  .map_err(|e| e.within("parse_intrinsic"))?;
        },
        TokenKind::APointer => {
            cursor.expect(TokenKind::OpenFrame, "'[' with a pointee type")
                  .map_err(|e| e.within("parse_intrinsic"))?;
            node.push(parse_inner_type(&mut cursor)?);
            cursor.expect(TokenKind::CloseFrame, "']' after the pointee type")
                  .map_err(|e| e.within("parse_intrinsic"))?;
        },
        TokenKind::AArray => {
            cursor.expect(TokenKind::OpenFrame, "'[' with an element type")
                  .map_err(|e| e.within("parse_intrinsic"))?;
            node.push(parse_inner_type(&mut cursor)?);
            cursor.expect(TokenKind::Comma, "',' before the element count")
                  .map_err(|e| e.within("parse_intrinsic"))?;
            node.push(parse_unsigned_bound(&mut cursor)?);
            cursor.expect(TokenKind::CloseFrame, "']' after the element count")
                  .map_err(|e| e.within("parse_intrinsic"))?;
        },
        _ => {},
    }

    Ok((node, cursor.pos()))
}

/// Parses one signed range bound: a number literal with an optional leading
/// unary minus. The minus becomes a one-child `Subtraction` node.
fn parse_signed_bound(cursor: &mut Cursor<'_>) -> Result<AstNode, ParseError> {
    if cursor.kind() == Some(TokenKind::Subtraction) {
        let mut minus = cursor.to_node()?;
        cursor.advance();
        let bound = cursor.expect(TokenKind::NumberLiteral, "a number bound")
                          .map_err(|e| e.within("parse_intrinsic"))?;
        minus.push(AstNode::new(NodeKind::NumberLiteral,
                                bound.literal.clone(),
                                bound.line,
                                bound.column));
        Ok(minus)
    } else {
        let bound = cursor.expect(TokenKind::NumberLiteral, "a number bound")
                          .map_err(|e| e.within("parse_intrinsic"))?;
        Ok(AstNode::new(NodeKind::NumberLiteral,
                        bound.literal.clone(),
                        bound.line,
                        bound.column))
    }
}

/// Parses one unsigned bound: a plain or `u`-suffixed number literal.
fn parse_unsigned_bound(cursor: &mut Cursor<'_>) -> Result<AstNode, ParseError> {
    match cursor.kind() {
        Some(TokenKind::NumberLiteral | TokenKind::UnsignedLiteral) => {
            let node = cursor.to_node()?;
            cursor.advance();
            Ok(node)
        },
        _ => {
            let found = cursor.current()
                              .map_or_else(String::new, |t| t.literal.clone());
            let (line, column) = cursor.current().map_or((1, 1), |t| (t.line, t.column));
            Err(ParseError::UnexpectedToken { expected: "an unsigned bound".to_string(),
                                              found,
                                              line,
                                              column }
                .within("parse_intrinsic"))
        },
    }
}

/// Parses the inner type of a `&pointer` or `&array` constraint: an
/// identifier or a nested intrinsic construction.
fn parse_inner_type(cursor: &mut Cursor<'_>) -> Result<AstNode, ParseError> {
    match cursor.kind() {
        Some(TokenKind::Alnumus) => {
            let node = cursor.to_node()?;
            cursor.advance();
            Ok(node)
        },
        Some(kind) if kind.is_intrinsic() => {
            let (node, next) = parse_intrinsic(cursor.tokens(), cursor.pos())?;
            cursor.set_pos(next);
            Ok(node)
        },
        _ => {
            let found = cursor.current()
                              .map_or_else(String::new, |t| t.literal.clone());
            let (line, column) = cursor.current().map_or((1, 1), |t| (t.line, t.column));
            Err(ParseError::UnexpectedToken { expected:
                                                  "an identifier or intrinsic type".to_string(),
                                              found,
                                              line,
                                              column }
                .within("parse_intrinsic"))
        },
    }
}
