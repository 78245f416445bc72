/// Core evaluation dispatch.
///
/// Contains the [`core::evaluate`] entry point that walks an AST node
/// against an environment, plus block and member-access evaluation.
pub mod core;

/// Lexical environments.
///
/// Nested name-to-value tables with parent pointers, shared so function
/// values can capture the environment they were declared in.
pub mod env;

/// Literal evaluators.
///
/// One evaluator per literal kind, parsing the literal's source text into
/// the corresponding runtime value.
pub mod literal;

/// Unary operator evaluation.
///
/// Logical negation and numeric minus.
pub mod unary;

/// Binary operator evaluation.
///
/// Arithmetic with C-like numeric promotion, comparisons, and
/// short-circuiting logical operators.
pub mod binary;

/// Declaration evaluation.
///
/// Variable definitions, assignments, and type aliases.
pub mod declaration;

/// Function evaluation.
///
/// Function definitions capturing their environment, and calls binding
/// positional arguments in a fresh child frame.
pub mod function;

/// Class evaluation.
///
/// Class definitions whose bodies build shared member tables.
pub mod class;
