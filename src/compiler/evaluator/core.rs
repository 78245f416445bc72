use crate::{
    ast::{AstNode, NodeKind},
    compiler::{
        evaluator::{binary, class, declaration, env::Environment, function, literal, unary},
        value::Value,
    },
    error::RuntimeError,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Evaluates an AST node against an environment.
///
/// This is the main entry point for constant evaluation. The evaluator
/// dispatches on the node kind: literals, name lookups, unary and binary
/// operations, member access, variable and function and class definitions,
/// function calls, print statements, and blocks. Blocks evaluate their
/// children in order and yield the last produced value. A print statement
/// writes its value to standard output and yields it unchanged.
///
/// # Errors
/// Returns a [`RuntimeError`] for unresolved names, redeclarations, type
/// mismatches, overflow, division by zero, and node kinds with no meaning
/// under constant evaluation (control flow, intrinsic type constructions).
///
/// ## Example
/// ```
/// use candi::compiler::{
///     evaluator::{core::evaluate, env::Environment},
///     parser::expression::parse_expression,
///     tokenizer::tokenize,
///     value::Value,
/// };
///
/// let tokens = tokenize("1 + 1").unwrap();
/// let expr = parse_expression(&tokens[..tokens.len() - 1]).unwrap();
/// let value = evaluate(&expr, &Environment::global()).unwrap();
///
/// assert_eq!(value, Value::Number(2));
/// ```
pub fn evaluate(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    match node.kind {
        NodeKind::NumberLiteral => literal::eval_number(node),
        NodeKind::RealLiteral => literal::eval_real(node),
        NodeKind::UnsignedLiteral => literal::eval_unsigned(node),
        NodeKind::OctetLiteral => literal::eval_octet(node),
        NodeKind::BitLiteral => literal::eval_bit(node),
        NodeKind::StringLiteral => literal::eval_text(node),
        NodeKind::NoneLiteral => Ok(literal::eval_none()),

        NodeKind::Alnumus => {
            env.get(&node.literal)
               .ok_or_else(|| RuntimeError::UndefinedName { name:   node.literal.clone(),
                                                            line:   node.line,
                                                            column: node.column, })
        },

        NodeKind::Negation => unary::eval_negation(node, env),
        NodeKind::Subtraction if node.children.len() == 1 => unary::eval_minus(node, env),

        NodeKind::Addition
        | NodeKind::Subtraction
        | NodeKind::Multiplication
        | NodeKind::Division
        | NodeKind::Modulo
        | NodeKind::Equality
        | NodeKind::Inequality
        | NodeKind::Less
        | NodeKind::LessEq
        | NodeKind::Greater
        | NodeKind::GreaterEq
        | NodeKind::LogicalAnd
        | NodeKind::LogicalOr => binary::eval_binary(node, env),

        NodeKind::SimpleAssignment => declaration::eval_assignment(node, env),
        NodeKind::Period => eval_member_access(node, env),

        NodeKind::AnonVariableDefinition
        | NodeKind::AnonVariableDefinitionAssignment
        | NodeKind::ConstrainedVariableDefinition => {
            declaration::eval_variable_definition(node, env)
        },
        NodeKind::TypeDefinition => Ok(declaration::eval_type_definition()),

        NodeKind::MethodDefinition
        | NodeKind::ShorthandVoidMethodDefinition
        | NodeKind::ShorthandConstrainedVoidMethodDefinition => {
            function::eval_function_definition(node, env)
        },
        NodeKind::FunctionCall => function::eval_function_call(node, env),
        NodeKind::ClassDefinition => class::eval_class_definition(node, env),

        NodeKind::Expression => evaluate(&node.children[0], env),
        NodeKind::Return => evaluate(&node.children[0], env),
        NodeKind::Print => {
            let value = evaluate(&node.children[0], env)?;
            println!("{value}");
            Ok(value)
        },
        NodeKind::PragmaticBlock | NodeKind::FunctionalBlock => eval_block(node, env),

        _ => Err(RuntimeError::UnsupportedNode { kind:   node.kind.name(),
                                                 line:   node.line,
                                                 column: node.column, }),
    }
}

/// Evaluates a block's children in order and yields the last value.
///
/// An empty block yields none. A `#return` statement ends the block early
/// with its value.
fn eval_block(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let mut last = Value::None;
    for child in &node.children {
        if child.kind == NodeKind::Return {
            return evaluate(&child.children[0], env);
        }
        last = evaluate(child, env)?;
    }
    Ok(last)
}

/// Evaluates member access: `object.member`.
///
/// The left side must evaluate to an object; the right side names a member
/// of its table.
fn eval_member_access(node: &AstNode, env: &Environment) -> EvalResult<Value> {
    let target = evaluate(&node.children[0], env)?;
    let member = &node.children[1];

    if member.kind != NodeKind::Alnumus {
        return Err(RuntimeError::TypeMismatch {
            details: format!("member access expects a name, found {}", member.kind.name()),
            line: member.line,
            column: member.column,
        });
    }

    let Value::Object(table) = target else {
        return Err(RuntimeError::NotAnObject { value:  target.to_string(),
                                               line:   node.line,
                                               column: node.column, });
    };
    let value = table.borrow().get(&member.literal).cloned();
    value.ok_or_else(|| RuntimeError::UnknownMember { name:   member.literal.clone(),
                                                      line:   member.line,
                                                      column: member.column, })
}
