use std::rc::Rc;

use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        evaluator::{core::{EvalResult, evaluate}, env::Environment},
        value::{FunctionValue, Value},
    },
    error::RuntimeError,
};

/// Evaluates a function definition.
///
/// The definition binds its name to a function value capturing the
/// parameter names, the body block, and the current environment. Constraint
/// lists are carried by the tree but not enforced under constant
/// evaluation. The function value is returned.
///
/// # Errors
/// Fails when the name is already bound in the current environment or a
/// parameter is not a plain name.
pub fn eval_function_definition(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let constrained = node.children[0].kind == NodeKind::TypeConstraints;
    let name_node = &node.children[usize::from(constrained)];
    let (arguments, body) = match node.kind {
        NodeKind::MethodDefinition => {
            let base = usize::from(constrained) + 1;
            (Some(&node.children[base]), &node.children[base + 1])
        },
        _ => (None, node.children.last().expect("definitions carry a body")),
    };

    let mut params = Vec::new();
    if let Some(arguments) = arguments {
        for argument in &arguments.children {
            if argument.kind != NodeKind::Alnumus {
                return Err(RuntimeError::TypeMismatch {
                    details: format!("parameter must be a name, found {}", argument.kind.name()),
                    line: argument.line,
                    column: argument.column,
                });
            }
            params.push(argument.literal.clone());
        }
    }

    let function = Value::Function(Rc::new(FunctionValue { name: name_node.literal.clone(),
                                                           params,
                                                           body: body.clone(),
                                                           env: env.clone() }));
    if !env.define(&name_node.literal, function.clone()) {
        return Err(RuntimeError::Redeclaration { name:   name_node.literal.clone(),
                                                 line:   name_node.line,
                                                 column: name_node.column, });
    }
    Ok(function)
}

/// Evaluates a function call.
///
/// The callee and the arguments are evaluated left to right in the calling
/// environment. A child of the function's captured environment is created,
/// the parameters are bound positionally, and the body runs in it; the
/// value of the body's `#return` statement is the call's result, or none
/// when the body finishes without returning.
///
/// # Errors
/// Fails when the callee is not a function, the argument count differs
/// from the parameter count, or the body fails to evaluate.
pub fn eval_function_call(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let callee = evaluate(&node.children[0], env)?;
    let Value::Function(function) = callee else {
        return Err(RuntimeError::NotCallable { value:  callee.to_string(),
                                               line:   node.line,
                                               column: node.column, });
    };

    let arguments = &node.children[1];
    if arguments.children.len() != function.params.len() {
        return Err(RuntimeError::ArgumentCountMismatch {
            name:     function.name.clone(),
            expected: function.params.len(),
            found:    arguments.children.len(),
            line:     node.line,
            column:   node.column,
        });
    }

    let mut values = Vec::with_capacity(arguments.children.len());
    for argument in &arguments.children {
        values.push(evaluate(argument, env)?);
    }

    let frame = function.env.child();
    for (param, value) in function.params.iter().zip(values) {
        frame.define(param, value);
    }

    eval_body(&function.body, &frame)
}

/// Runs a functional block as a function body.
///
/// Statements execute in order; the first `#return` ends the call with its
/// value. A body that runs off the end yields none.
fn eval_body(body: &AstNode, frame: &Environment) -> EvalResult<Value> {
    for statement in &body.children {
        if statement.kind == NodeKind::Return {
            return evaluate(&statement.children[0], frame);
        }
        evaluate(statement, frame)?;
    }
    Ok(Value::None)
}
