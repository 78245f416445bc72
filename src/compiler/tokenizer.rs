use logos::Logos;

use crate::error::ParseError;

/// Represents the kind of a lexical token in Candi source input.
///
/// Keywords are recognized in two spellings: the bare form (`var`) and the
/// directive form (`#var`). Both spellings map to the same kind; which
/// spelling a file uses is validated by [`tokenize`], not here. The intrinsic
/// type words additionally have an ampersand form (`&int`) that is exempt
/// from the spelling rule.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    OpenScope,
    /// `)`
    #[token(")")]
    CloseScope,
    /// `{`
    #[token("{")]
    OpenList,
    /// `}`
    #[token("}")]
    CloseList,
    /// `[`
    #[token("[")]
    OpenFrame,
    /// `]`
    #[token("]")]
    CloseFrame,
    /// `,`
    #[token(",")]
    Comma,
    /// `;` terminates a statement.
    #[token(";")]
    Eos,
    /// `...` separates range bounds in constrained intrinsic types.
    #[token("...")]
    Ellipsis,
    /// `.`
    #[token(".")]
    Period,

    /// `=`
    #[token("=")]
    SimpleAssignment,
    /// `+`
    #[token("+")]
    Addition,
    /// `-`
    #[token("-")]
    Subtraction,
    /// `*`
    #[token("*")]
    Multiplication,
    /// `/`
    #[token("/")]
    Division,
    /// `%`
    #[token("%")]
    Modulo,
    /// `&&`
    #[token("&&")]
    LogicalAnd,
    /// `||`
    #[token("||")]
    LogicalOr,
    /// `!`
    #[token("!")]
    Negation,
    /// `==`
    #[token("==")]
    Equality,
    /// `!=`
    #[token("!=")]
    Inequality,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEq,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEq,

    /// `include` / `#include`
    #[token("include")]
    #[token("#include")]
    Include,
    /// `macro` / `#macro`
    #[token("macro")]
    #[token("#macro")]
    Macro,
    /// `enter` / `#enter`
    #[token("enter")]
    #[token("#enter")]
    Enter,
    /// `start` / `#start`
    #[token("start")]
    #[token("#start")]
    Start,
    /// `type` / `#type`
    #[token("type")]
    #[token("#type")]
    Type,
    /// `var` / `#var`
    #[token("var")]
    #[token("#var")]
    Var,
    /// `class` / `#class`
    #[token("class")]
    #[token("#class")]
    Class,
    /// `obj` / `#obj`
    #[token("obj")]
    #[token("#obj")]
    Obj,
    /// `private` / `#private`
    #[token("private")]
    #[token("#private")]
    Private,
    /// `public` / `#public`
    #[token("public")]
    #[token("#public")]
    Public,
    /// `func` / `#func`
    #[token("func")]
    #[token("#func")]
    Func,
    /// `const` / `#const`
    #[token("const")]
    #[token("#const")]
    Const,
    /// `static` / `#static`
    #[token("static")]
    #[token("#static")]
    Static,
    /// `if` / `#if`
    #[token("if")]
    #[token("#if")]
    If,
    /// `else` / `#else`
    #[token("else")]
    #[token("#else")]
    Else,
    /// `elif` / `#elif`
    #[token("elif")]
    #[token("#elif")]
    Elif,
    /// `while` / `#while`
    #[token("while")]
    #[token("#while")]
    While,
    /// `for` / `#for`
    #[token("for")]
    #[token("#for")]
    For,
    /// `on` / `#on`
    #[token("on")]
    #[token("#on")]
    On,
    /// `break` / `#break`
    #[token("break")]
    #[token("#break")]
    Break,
    /// `continue` / `#continue`
    #[token("continue")]
    #[token("#continue")]
    Continue,
    /// `return` / `#return`
    #[token("return")]
    #[token("#return")]
    Return,
    /// `print` / `#print`
    #[token("print")]
    #[token("#print")]
    Print,
    /// `none` / `#none`
    #[token("none")]
    #[token("#none")]
    NoneLiteral,

    /// `int` / `#int` / `&int`
    #[token("int")]
    #[token("#int")]
    #[token("&int")]
    AInt,
    /// `uint` / `#uint` / `&uint`
    #[token("uint")]
    #[token("#uint")]
    #[token("&uint")]
    AUint,
    /// `real` / `#real` / `&real`
    #[token("real")]
    #[token("#real")]
    #[token("&real")]
    AReal,
    /// `octet` / `#octet` / `&octet`
    #[token("octet")]
    #[token("#octet")]
    #[token("&octet")]
    AOctet,
    /// `bit` / `#bit` / `&bit`
    #[token("bit")]
    #[token("#bit")]
    #[token("&bit")]
    ABit,
    /// `str` / `#str` / `&str`
    #[token("str")]
    #[token("#str")]
    #[token("&str")]
    AStr,
    /// `&type`
    #[token("&type")]
    AType,
    /// `&value`
    #[token("&value")]
    AValue,
    /// `&identity`
    #[token("&identity")]
    AIdentity,
    /// `&pointer`
    #[token("&pointer")]
    APointer,
    /// `&array`
    #[token("&array")]
    AArray,

    /// Real literal tokens, such as `42.42`.
    #[regex(r"[0-9]+\.[0-9]+")]
    RealLiteral,
    /// Unsigned literal tokens, such as `42u`.
    #[regex(r"[0-9]+u")]
    UnsignedLiteral,
    /// Octet literal tokens, such as `42c`.
    #[regex(r"[0-9]+c")]
    OctetLiteral,
    /// Bit literal tokens: `0b` or `1b`.
    #[regex(r"[0-9]+b")]
    BitLiteral,
    /// Number literal tokens, such as `42`.
    #[regex(r"[0-9]+")]
    NumberLiteral,
    /// String literal tokens: single-quoted with backslash escapes.
    #[regex(r"'(\\[^\n]|[^'\\\n])*'")]
    StringLiteral,
    /// Identifier tokens: letters, digits, underscore, not starting with a
    /// digit and not a keyword.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Alnumus,

    /// A `#`-word that is not a recognized directive. Never emitted;
    /// converted into a lexical error by [`tokenize`].
    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_]*")]
    UnknownDirective,
    /// An `&`-word that is not a recognized intrinsic type. Never emitted;
    /// converted into a lexical error by [`tokenize`].
    #[regex(r"&[a-zA-Z_][a-zA-Z0-9_]*")]
    UnknownIntrinsic,

    /// NUL input sentinel; ends tokenization.
    #[token("\0")]
    Nul,
    /// Line feeds update the position bookkeeping and are skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    Newline,

    /// Appended by [`tokenize`] as the final token of every stream.
    Eof,
}

impl TokenKind {
    /// Whether this kind is a keyword with bare and directive spellings.
    ///
    /// Intrinsic type kinds are included: `int` and `#int` take part in the
    /// spelling rule, while the `&int` spelling is exempt.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(self,
                 Self::Include
                 | Self::Macro
                 | Self::Enter
                 | Self::Start
                 | Self::Type
                 | Self::Var
                 | Self::Class
                 | Self::Obj
                 | Self::Private
                 | Self::Public
                 | Self::Func
                 | Self::Const
                 | Self::Static
                 | Self::If
                 | Self::Else
                 | Self::Elif
                 | Self::While
                 | Self::For
                 | Self::On
                 | Self::Break
                 | Self::Continue
                 | Self::Return
                 | Self::Print
                 | Self::NoneLiteral
                 | Self::AInt
                 | Self::AUint
                 | Self::AReal
                 | Self::AOctet
                 | Self::ABit
                 | Self::AStr)
    }

    /// Whether this kind is an intrinsic type token.
    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        matches!(self,
                 Self::AInt
                 | Self::AUint
                 | Self::AReal
                 | Self::AOctet
                 | Self::ABit
                 | Self::AStr
                 | Self::AType
                 | Self::AValue
                 | Self::AIdentity
                 | Self::APointer
                 | Self::AArray)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset of the current line's
/// first character, so token columns can be derived from spans.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

/// A single lexical token: kind, exact source slice, and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind:    TokenKind,
    /// The exact source slice this token was read from.
    pub literal: String,
    /// Source line (1-based).
    pub line:    usize,
    /// Source column (1-based).
    pub column:  usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        Self { kind,
               literal: literal.into(),
               line,
               column }
    }
}

/// The keyword spelling a file has committed to.
///
/// The first recognized keyword decides the mode; every later keyword must
/// use the same spelling. Ampersand intrinsics never participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum KeywordMode {
    #[default]
    Undecided,
    Bare,
    Directive,
}

impl KeywordMode {
    /// Records the spelling of one keyword occurrence, failing if it
    /// contradicts the established mode.
    fn commit(&mut self, directive: bool, token: &Token) -> Result<(), ParseError> {
        let seen = if directive { Self::Directive } else { Self::Bare };
        match *self {
            Self::Undecided => {
                *self = seen;
                Ok(())
            },
            mode if mode == seen => Ok(()),
            _ => Err(ParseError::KeywordModeMixed { literal: token.literal.clone(),
                                                    line:    token.line,
                                                    column:  token.column, }),
        }
    }
}

/// Tokenizes a complete source text.
///
/// Produces the token sequence for `source`, always terminated by a single
/// [`TokenKind::Eof`] token. A NUL character in the input acts as an explicit
/// end-of-input sentinel.
///
/// Beyond the per-token rules of [`TokenKind`], this function performs the
/// per-file validation the lexer cannot express:
/// - `#`-words and `&`-words that match no keyword or intrinsic are lexical
///   errors reported at the position of the prefix character, and
/// - bare and directive keyword spellings must not be mixed within one file.
///
/// # Errors
/// Returns a [`ParseError`] describing the first lexical fault, citing the
/// offending literal with its line and column.
///
/// ## Example
/// ```
/// use candi::compiler::tokenizer::{TokenKind, tokenize};
///
/// let tokens = tokenize("#var x = 1;").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Var,
///                 TokenKind::Alnumus,
///                 TokenKind::SimpleAssignment,
///                 TokenKind::NumberLiteral,
///                 TokenKind::Eos,
///                 TokenKind::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras { line:       1,
                                                                      line_start: 0, });
    let mut tokens = Vec::new();
    let mut mode = KeywordMode::default();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let line = lexer.extras.line;
        let column = span.start - lexer.extras.line_start + 1;
        let literal = lexer.slice();

        let kind = match result {
            Ok(TokenKind::Nul) => break,
            Ok(TokenKind::UnknownDirective) => {
                return Err(ParseError::UnknownDirective { literal: literal.to_string(),
                                                          line,
                                                          column });
            },
            Ok(TokenKind::UnknownIntrinsic) => {
                return Err(ParseError::UnknownIntrinsic { literal: literal.to_string(),
                                                          line,
                                                          column });
            },
            Ok(kind) => kind,
            Err(()) => {
                return Err(ParseError::UnknownCharacter { literal: literal.to_string(),
                                                          line,
                                                          column });
            },
        };

        let token = Token::new(kind, literal, line, column);
        if kind.is_keyword() && !literal.starts_with('&') {
            mode.commit(literal.starts_with('#'), &token)?;
        }
        tokens.push(token);
    }

    let line = lexer.extras.line;
    let column = lexer.span().end - lexer.extras.line_start + 1;
    tokens.push(Token::new(TokenKind::Eof, "", line, column));
    Ok(tokens)
}
