use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::AstNode,
    compiler::{
        evaluator::{core::{EvalResult, evaluate}, env::Environment},
        value::Value,
    },
    error::RuntimeError,
};

/// Evaluates a class definition.
///
/// The body's declarations are evaluated into a child environment whose
/// bindings become the member table of an object template. The class name
/// is bound to that object; member reads through `.` observe the shared
/// table. The object value is returned.
///
/// # Errors
/// Fails when the class name is already bound in the current environment or
/// a member declaration fails to evaluate.
pub fn eval_class_definition(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let name_node = &node.children[0];
    let body = &node.children[1];

    let member_env = env.child();
    for declaration in &body.children {
        evaluate(declaration, &member_env)?;
    }

    let object = Value::Object(Rc::new(RefCell::new(member_env.bindings())));
    if !env.define(&name_node.literal, object.clone()) {
        return Err(RuntimeError::Redeclaration { name:   name_node.literal.clone(),
                                                 line:   name_node.line,
                                                 column: name_node.column, });
    }
    Ok(object)
}
