#[derive(Debug)]
/// Represents all errors that can occur during tokenization, preprocessing,
/// or parsing.
///
/// Variants carry the offending literal and its source position. The
/// [`ParseError::Context`] variant wraps an inner error with the name of the
/// production that was being parsed, so the rendered message shows the whole
/// chain from the outermost production down to the leaf failure.
pub enum ParseError {
    /// A character that begins no token.
    UnknownCharacter {
        /// The unrecognized source slice.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// A `#`-prefixed word that is not a recognized directive keyword.
    UnknownDirective {
        /// The full `#word` slice.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// An `&`-prefixed word that is not a recognized intrinsic type.
    UnknownIntrinsic {
        /// The full `&word` slice.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// Bare and directive keyword spellings were mixed in one file.
    KeywordModeMixed {
        /// The keyword that broke the established spelling.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// Found a token other than the one the grammar requires.
    UnexpectedToken {
        /// What the parser required at this position.
        expected: String,
        /// The token that was actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// The token stream ended in the middle of a production.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// An opening bracket with no matching closer, or a closer of the wrong
    /// kind.
    MismatchedScope {
        /// The bracket token at fault.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// `()` with nothing inside where a value was required.
    EmptyParenthesis {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A binary or unary operator with no operand after it.
    OperatorWithoutOperand {
        /// The operator token at fault.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// A token that cannot begin an operand.
    InvalidOperand {
        /// The token at fault.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// A statement with no terminating `;`.
    MissingEos {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// An included file could not be read.
    IncludeFailed {
        /// The path as written in the source.
        path:   String,
        /// The underlying I/O failure.
        reason: String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A file included itself, directly or through other files.
    IncludeCycle {
        /// The path that closed the cycle.
        path:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Macro expansion exceeded the substitution depth limit.
    MacroRecursionLimit {
        /// The macro whose expansion did not terminate.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A macro call with the wrong number of arguments.
    MacroArgumentMismatch {
        /// The macro name.
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
    /// A failure inside a named production; wraps the inner error so the
    /// rendered message accumulates the parsing path.
    Context {
        /// The production that was being parsed.
        production: &'static str,
        /// The underlying failure.
        source:     Box<ParseError>,
    },
}

impl ParseError {
    /// Wraps the error with the name of the production that was being parsed
    /// when it occurred.
    #[must_use]
    pub fn within(self, production: &'static str) -> Self {
        Self::Context { production,
                        source: Box::new(self) }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCharacter { literal, line, column } => {
                write!(f, "Error on line {line}, column {column}: Unknown character: {literal}.")
            },

            Self::UnknownDirective { literal, line, column } => write!(f,
                "Error on line {line}, column {column}: Unknown directive '{literal}'."),

            Self::UnknownIntrinsic { literal, line, column } => write!(f,
                "Error on line {line}, column {column}: Unknown intrinsic type '{literal}'."),

            Self::KeywordModeMixed { literal, line, column } => write!(f,
                "Error on line {line}, column {column}: Keyword '{literal}' mixes bare and \
                 directive spellings; a file must use one spelling throughout."),

            Self::UnexpectedToken { expected, found, line, column } => write!(f,
                "Error on line {line}, column {column}: Expected {expected}, found '{found}'."),

            Self::UnexpectedEndOfInput { line, column } => {
                write!(f, "Error on line {line}, column {column}: Unexpected end of input.")
            },

            Self::MismatchedScope { literal, line, column } => write!(f,
                "Error on line {line}, column {column}: Mismatched bracket '{literal}'."),

            Self::EmptyParenthesis { line, column } => {
                write!(f, "Error on line {line}, column {column}: Empty parenthesis.")
            },

            Self::OperatorWithoutOperand { literal, line, column } => write!(f,
                "Error on line {line}, column {column}: Operator '{literal}' must be followed by \
                 an operand."),

            Self::InvalidOperand { literal, line, column } => write!(f,
                "Error on line {line}, column {column}: '{literal}' cannot begin an operand."),

            Self::MissingEos { line, column } => write!(f,
                "Error on line {line}, column {column}: Statement is missing its terminating ';'."),

            Self::IncludeFailed { path, reason, line, column } => write!(f,
                "Error on line {line}, column {column}: Could not include '{path}': {reason}."),

            Self::IncludeCycle { path, line, column } => write!(f,
                "Error on line {line}, column {column}: Include cycle through '{path}'."),

            Self::MacroRecursionLimit { name, line, column } => write!(f,
                "Error on line {line}, column {column}: Macro '{name}' expands beyond the \
                 substitution depth limit."),

            Self::MacroArgumentMismatch { name, expected, found, line, column } => write!(f,
                "Error on line {line}, column {column}: Macro '{name}' takes {expected} \
                 argument(s), found {found}."),

            Self::Context { production, source } => {
                write!(f, "[{production}] {source}")
            },
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
