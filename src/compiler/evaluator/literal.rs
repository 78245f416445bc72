use crate::{
    ast::{AstNode, NodeKind},
    compiler::{evaluator::core::EvalResult, value::Value},
    error::RuntimeError,
};

fn malformed(node: &AstNode) -> RuntimeError {
    RuntimeError::MalformedLiteral { literal: node.literal.clone(),
                                     line:    node.line,
                                     column:  node.column, }
}

/// Evaluates a number literal into a [`Value::Number`].
///
/// # Errors
/// Fails when the text does not fit a 64-bit signed number.
pub fn eval_number(node: &AstNode) -> EvalResult<Value> {
    node.literal
        .parse::<i64>()
        .map(Value::Number)
        .map_err(|_| malformed(node))
}

/// Evaluates a real literal into a [`Value::Real`].
///
/// # Errors
/// Fails when the text is not a valid real.
pub fn eval_real(node: &AstNode) -> EvalResult<Value> {
    node.literal
        .parse::<f64>()
        .map(Value::Real)
        .map_err(|_| malformed(node))
}

/// Evaluates a `u`-suffixed literal into a [`Value::Unsigned`].
///
/// # Errors
/// Fails when the digits do not fit a 64-bit unsigned number.
pub fn eval_unsigned(node: &AstNode) -> EvalResult<Value> {
    node.literal
        .strip_suffix('u')
        .ok_or_else(|| malformed(node))?
        .parse::<u64>()
        .map(Value::Unsigned)
        .map_err(|_| malformed(node))
}

/// Evaluates an octet into a [`Value::Octet`].
///
/// Two literal forms produce an octet: a `c`-suffixed number (`42c`) and a
/// single-character string (`'a'`), which yields the character's byte.
///
/// # Errors
/// Fails when the number does not fit an octet or the string is not exactly
/// one byte long.
pub fn eval_octet(node: &AstNode) -> EvalResult<Value> {
    if node.kind == NodeKind::StringLiteral {
        let Value::Str(text) = eval_string(node)? else {
            return Err(malformed(node));
        };
        return match text.as_bytes() {
            [byte] => Ok(Value::Octet(*byte)),
            _ => Err(malformed(node)),
        };
    }
    node.literal
        .strip_suffix('c')
        .ok_or_else(|| malformed(node))?
        .parse::<u8>()
        .map(Value::Octet)
        .map_err(|_| malformed(node))
}

/// Evaluates a `b`-suffixed literal into a [`Value::Bit`].
///
/// # Errors
/// Fails unless the digits are exactly `0` or `1`.
pub fn eval_bit(node: &AstNode) -> EvalResult<Value> {
    match node.literal.strip_suffix('b') {
        Some("0") => Ok(Value::Bit(false)),
        Some("1") => Ok(Value::Bit(true)),
        _ => Err(malformed(node)),
    }
}

/// Evaluates a string literal into a [`Value::Str`], stripping the quotes
/// and processing backslash escapes (`\'`, `\\`, `\n`, `\t`).
///
/// # Errors
/// Fails when the literal is not quoted.
pub fn eval_string(node: &AstNode) -> EvalResult<Value> {
    let inner = node.literal
                    .strip_prefix('\'')
                    .and_then(|rest| rest.strip_suffix('\''))
                    .ok_or_else(|| malformed(node))?;

    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some(escaped) => text.push(escaped),
                None => return Err(malformed(node)),
            }
        } else {
            text.push(c);
        }
    }
    Ok(Value::Str(text))
}

/// Evaluates a string literal in value position.
///
/// A string whose decoded contents are exactly one byte is an octet
/// spelling (`'a'` is the byte 97) and is routed through [`eval_octet`];
/// anything longer evaluates to a [`Value::Str`].
///
/// # Errors
/// Fails when the literal is not quoted.
pub fn eval_text(node: &AstNode) -> EvalResult<Value> {
    let value = eval_string(node)?;
    if matches!(&value, Value::Str(text) if text.len() == 1) {
        return eval_octet(node);
    }
    Ok(value)
}

/// Evaluates the none literal into [`Value::None`].
#[must_use]
pub const fn eval_none() -> Value {
    Value::None
}
