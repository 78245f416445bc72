use crate::{
    ast::AstNode,
    compiler::{
        evaluator::{core::{EvalResult, evaluate}, env::Environment},
        value::Value,
    },
    error::RuntimeError,
};

/// Evaluates logical negation: `!operand`.
///
/// # Errors
/// Fails unless the operand evaluates to a bit.
pub fn eval_negation(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let operand = evaluate(&node.children[0], env)?;
    match operand {
        Value::Bit(b) => Ok(Value::Bit(!b)),
        other => Err(RuntimeError::TypeMismatch {
            details: format!("'!' expects a bit, found {}", other.type_name()),
            line: node.line,
            column: node.column,
        }),
    }
}

/// Evaluates unary minus: `-operand`.
///
/// # Errors
/// Fails on non-numeric operands and on negating the minimum number.
pub fn eval_minus(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let operand = evaluate(&node.children[0], env)?;
    match operand {
        Value::Number(n) => n.checked_neg()
                             .map(Value::Number)
                             .ok_or(RuntimeError::Overflow { line:   node.line,
                                                             column: node.column, }),
        Value::Real(r) => Ok(Value::Real(-r)),
        other => Err(RuntimeError::TypeMismatch {
            details: format!("'-' expects a number or real, found {}", other.type_name()),
            line: node.line,
            column: node.column,
        }),
    }
}
