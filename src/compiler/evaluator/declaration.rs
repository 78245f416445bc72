use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        evaluator::{core::{EvalResult, evaluate}, env::Environment},
        value::Value,
    },
    error::RuntimeError,
};

/// Evaluates a variable definition.
///
/// Handles all four syntactic forms. The initializer, when present, is
/// evaluated in the current environment; without one the name is bound to
/// none. Type constraints are carried by the tree but not enforced under
/// constant evaluation. The bound value is returned.
///
/// # Errors
/// Fails when the name is already bound in the current environment or the
/// initializer fails to evaluate.
pub fn eval_variable_definition(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let (name_node, initializer) = match node.kind {
        NodeKind::AnonVariableDefinition => (&node.children[0], None),
        NodeKind::AnonVariableDefinitionAssignment => {
            (&node.children[0], Some(&node.children[1]))
        },
        _ => (&node.children[1], node.children.get(2)),
    };

    let value = match initializer {
        Some(expr) => evaluate(expr, env)?,
        None => Value::None,
    };

    if !env.define(&name_node.literal, value.clone()) {
        return Err(RuntimeError::Redeclaration { name:   name_node.literal.clone(),
                                                 line:   name_node.line,
                                                 column: name_node.column, });
    }
    Ok(value)
}

/// Evaluates a simple assignment.
///
/// The left side must be a plain name with an existing binding; the nearest
/// binding is replaced. The assigned value is returned, so chained
/// assignments thread it rightward.
///
/// # Errors
/// Fails when the left side is not a name, or names nothing bound.
pub fn eval_assignment(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let target = &node.children[0];
    if target.kind != NodeKind::Alnumus {
        return Err(RuntimeError::TypeMismatch {
            details: format!("cannot assign to a {}", target.kind.name()),
            line: target.line,
            column: target.column,
        });
    }

    let value = evaluate(&node.children[1], env)?;
    if !env.assign(&target.literal, value.clone()) {
        return Err(RuntimeError::AssignmentToUndefined { name:   target.literal.clone(),
                                                         line:   target.line,
                                                         column: target.column, });
    }
    Ok(value)
}

/// Evaluates a type alias.
///
/// Aliases are erased under constant evaluation; the statement yields none.
pub const fn eval_type_definition() -> Value {
    Value::None
}
