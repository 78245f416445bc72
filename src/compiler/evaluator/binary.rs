use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        evaluator::{core::{EvalResult, evaluate}, env::Environment},
        value::Value,
    },
    error::RuntimeError,
    util::num::{i64_to_f64_checked, i64_to_u64_checked, u64_to_f64_checked},
};

/// Evaluates a binary operation node.
///
/// Both children are evaluated left to right, then the operator is applied
/// with C-like promotion inside the number/real/unsigned lattice: a real
/// operand promotes the other side to real, otherwise an unsigned operand
/// promotes the other side to unsigned, and octets and bits widen to
/// numbers. `&&` and `||` short-circuit and never evaluate their right side
/// unnecessarily.
///
/// # Errors
/// Fails on operand types the operator does not accept, division or modulo
/// by zero, and overflow in number or unsigned arithmetic.
pub fn eval_binary(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    if matches!(node.kind, NodeKind::LogicalAnd | NodeKind::LogicalOr) {
        return eval_logical(node, env);
    }

    let left = evaluate(&node.children[0], env)?;
    let right = evaluate(&node.children[1], env)?;

    match node.kind {
        NodeKind::Addition
        | NodeKind::Subtraction
        | NodeKind::Multiplication
        | NodeKind::Division
        | NodeKind::Modulo => eval_arithmetic(node, left, right),
        NodeKind::Equality | NodeKind::Inequality => eval_equality(node, &left, &right),
        NodeKind::Less | NodeKind::LessEq | NodeKind::Greater | NodeKind::GreaterEq => {
            eval_relational(node, left, right)
        },
        _ => Err(RuntimeError::UnsupportedNode { kind:   node.kind.name(),
                                                 line:   node.line,
                                                 column: node.column, }),
    }
}

fn eval_logical(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let as_bit = |value: Value| match value {
        Value::Bit(b) => Ok(b),
        other => Err(RuntimeError::TypeMismatch {
            details: format!("'{}' expects bits, found {}", node.literal, other.type_name()),
            line: node.line,
            column: node.column,
        }),
    };

    let left = as_bit(evaluate(&node.children[0], env)?)?;
    let done = match node.kind {
        NodeKind::LogicalAnd => !left,
        _ => left,
    };
    if done {
        return Ok(Value::Bit(left));
    }
    let right = as_bit(evaluate(&node.children[1], env)?)?;
    Ok(Value::Bit(right))
}

/// Widens octets and bits to numbers; other values pass through.
fn widen(value: Value) -> Value {
    match value {
        Value::Octet(v) => Value::Number(v as i64),
        Value::Bit(v) => Value::Number(v as i64),
        other => other,
    }
}

/// Promotes two numeric operands to a common type.
fn promote_pair(node: &AstNode, left: Value, right: Value) -> EvalResult<(Value, Value)> {
    let mismatch = |l: &Value, r: &Value| RuntimeError::TypeMismatch {
        details: format!("'{}' cannot combine {} and {}",
                         node.literal,
                         l.type_name(),
                         r.type_name()),
        line: node.line,
        column: node.column,
    };
    let overflow = RuntimeError::Overflow { line:   node.line,
                                            column: node.column, };

    let left = widen(left);
    let right = widen(right);
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((Value::Number(a), Value::Number(b))),
        (Value::Unsigned(a), Value::Unsigned(b)) => Ok((Value::Unsigned(a), Value::Unsigned(b))),
        (Value::Real(a), Value::Real(b)) => Ok((Value::Real(a), Value::Real(b))),
        (Value::Real(a), Value::Number(b)) => {
            Ok((Value::Real(a), Value::Real(i64_to_f64_checked(b, overflow)?)))
        },
        (Value::Number(a), Value::Real(b)) => {
            Ok((Value::Real(i64_to_f64_checked(a, overflow)?), Value::Real(b)))
        },
        (Value::Real(a), Value::Unsigned(b)) => {
            Ok((Value::Real(a), Value::Real(u64_to_f64_checked(b, overflow)?)))
        },
        (Value::Unsigned(a), Value::Real(b)) => {
            Ok((Value::Real(u64_to_f64_checked(a, overflow)?), Value::Real(b)))
        },
        (Value::Unsigned(a), Value::Number(b)) => {
            Ok((Value::Unsigned(a), Value::Unsigned(i64_to_u64_checked(b, overflow)?)))
        },
        (Value::Number(a), Value::Unsigned(b)) => {
            Ok((Value::Unsigned(i64_to_u64_checked(a, overflow)?), Value::Unsigned(b)))
        },
        (l, r) => Err(mismatch(&l, &r)),
    }
}

fn eval_arithmetic(node: &AstNode, left: Value, right: Value) -> EvalResult<Value> {
    // String concatenation is the one non-numeric arithmetic form.
    if let (Value::Str(a), Value::Str(b)) = (&left, &right) {
        if node.kind == NodeKind::Addition {
            return Ok(Value::Str(format!("{a}{b}")));
        }
        return Err(RuntimeError::TypeMismatch {
            details: format!("'{}' is not defined for strings", node.literal),
            line: node.line,
            column: node.column,
        });
    }

    let overflow = || RuntimeError::Overflow { line:   node.line,
                                               column: node.column, };
    let zero_division = || RuntimeError::DivisionByZero { line:   node.line,
                                                          column: node.column, };

    match promote_pair(node, left, right)? {
        (Value::Number(a), Value::Number(b)) => {
            let result = match node.kind {
                NodeKind::Addition => a.checked_add(b).ok_or_else(overflow)?,
                NodeKind::Subtraction => a.checked_sub(b).ok_or_else(overflow)?,
                NodeKind::Multiplication => a.checked_mul(b).ok_or_else(overflow)?,
                NodeKind::Division => {
                    if b == 0 {
                        return Err(zero_division());
                    }
                    a.checked_div(b).ok_or_else(overflow)?
                },
                _ => {
                    if b == 0 {
                        return Err(zero_division());
                    }
                    a.checked_rem(b).ok_or_else(overflow)?
                },
            };
            Ok(Value::Number(result))
        },
        (Value::Unsigned(a), Value::Unsigned(b)) => {
            let result = match node.kind {
                NodeKind::Addition => a.checked_add(b).ok_or_else(overflow)?,
                NodeKind::Subtraction => a.checked_sub(b).ok_or_else(overflow)?,
                NodeKind::Multiplication => a.checked_mul(b).ok_or_else(overflow)?,
                NodeKind::Division => a.checked_div(b).ok_or_else(zero_division)?,
                _ => a.checked_rem(b).ok_or_else(zero_division)?,
            };
            Ok(Value::Unsigned(result))
        },
        (Value::Real(a), Value::Real(b)) => {
            if b == 0.0 && matches!(node.kind, NodeKind::Division | NodeKind::Modulo) {
                return Err(zero_division());
            }
            let result = match node.kind {
                NodeKind::Addition => a + b,
                NodeKind::Subtraction => a - b,
                NodeKind::Multiplication => a * b,
                NodeKind::Division => a / b,
                _ => a % b,
            };
            Ok(Value::Real(result))
        },
        _ => unreachable!("promote_pair yields matching numeric pairs"),
    }
}

fn eval_equality(node: &AstNode, left: &Value, right: &Value) -> EvalResult<Value> {
    let equal = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::None, Value::None) => true,
        // Reals compare under total ordering so the result is deterministic
        // even against NaN.
        (Value::Real(a), Value::Real(b)) => OrderedFloat(*a) == OrderedFloat(*b),
        _ => {
            let (l, r) = promote_pair(node, left.clone(), right.clone())?;
            match (l, r) {
                (Value::Number(a), Value::Number(b)) => a == b,
                (Value::Unsigned(a), Value::Unsigned(b)) => a == b,
                (Value::Real(a), Value::Real(b)) => OrderedFloat(a) == OrderedFloat(b),
                _ => unreachable!("promote_pair yields matching numeric pairs"),
            }
        },
    };
    Ok(Value::Bit(if node.kind == NodeKind::Equality { equal } else { !equal }))
}

fn eval_relational(node: &AstNode, left: Value, right: Value) -> EvalResult<Value> {
    let ordering = match promote_pair(node, left, right)? {
        (Value::Number(a), Value::Number(b)) => a.cmp(&b),
        (Value::Unsigned(a), Value::Unsigned(b)) => a.cmp(&b),
        (Value::Real(a), Value::Real(b)) => OrderedFloat(a).cmp(&OrderedFloat(b)),
        _ => unreachable!("promote_pair yields matching numeric pairs"),
    };
    let holds = match node.kind {
        NodeKind::Less => ordering == Ordering::Less,
        NodeKind::LessEq => ordering != Ordering::Greater,
        NodeKind::Greater => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::Bit(holds))
}
