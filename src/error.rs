/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing, preprocessing,
/// or parsing source code: lexical mistakes, bracket mismatches, malformed
/// expressions and statements, and preprocessor failures. Parse errors carry
/// the offending token's position and accumulate the chain of productions
/// they passed through.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during constant evaluation:
/// unresolved names, redeclarations, type mismatches, division by zero, and
/// overflow.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
