#[derive(Debug)]
/// Represents all errors that can be raised while constant-evaluating a
/// program.
pub enum RuntimeError {
    /// Tried to read a name with no binding in any enclosing environment.
    UndefinedName {
        /// The name that failed to resolve.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Tried to declare a name that is already bound in the same environment.
    Redeclaration {
        /// The name that was declared twice.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// An operator was applied to values it does not accept.
    TypeMismatch {
        /// Details about the mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A literal's text does not fit the literal's value type.
    MalformedLiteral {
        /// The literal text at fault.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// Called a value that is not a function.
    NotCallable {
        /// Display form of the value that was called.
        value:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// Member access on a value that is not an object.
    NotAnObject {
        /// Display form of the value that was accessed.
        value:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Member access named a member the object does not have.
    UnknownMember {
        /// The member name.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Assigned to a name with no existing binding.
    AssignmentToUndefined {
        /// The name at fault.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The node kind has no meaning under constant evaluation.
    UnsupportedNode {
        /// Name of the node kind.
        kind:   &'static str,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedName { name, line, column } => {
                write!(f, "Error on line {line}, column {column}: Undefined name '{name}'.")
            },
            Self::Redeclaration { name, line, column } => write!(f,
                "Error on line {line}, column {column}: '{name}' is already declared in this \
                 scope."),
            Self::TypeMismatch { details, line, column } => {
                write!(f, "Error on line {line}, column {column}: Type mismatch: {details}.")
            },
            Self::DivisionByZero { line, column } => {
                write!(f, "Error on line {line}, column {column}: Division by zero.")
            },
            Self::Overflow { line, column } => {
                write!(f, "Error on line {line}, column {column}: Arithmetic overflow.")
            },
            Self::MalformedLiteral { literal, line, column } => {
                write!(f, "Error on line {line}, column {column}: Malformed literal '{literal}'.")
            },
            Self::NotCallable { value, line, column } => {
                write!(f, "Error on line {line}, column {column}: '{value}' is not callable.")
            },
            Self::ArgumentCountMismatch { name, expected, found, line, column } => write!(f,
                "Error on line {line}, column {column}: '{name}' takes {expected} argument(s), \
                 found {found}."),
            Self::NotAnObject { value, line, column } => {
                write!(f, "Error on line {line}, column {column}: '{value}' is not an object.")
            },
            Self::UnknownMember { name, line, column } => {
                write!(f, "Error on line {line}, column {column}: Unknown member '{name}'.")
            },
            Self::AssignmentToUndefined { name, line, column } => write!(f,
                "Error on line {line}, column {column}: Assignment to undefined name '{name}'."),
            Self::UnsupportedNode { kind, line, column } => write!(f,
                "Error on line {line}, column {column}: '{kind}' cannot be constant-evaluated."),
        }
    }
}

impl std::error::Error for RuntimeError {}
