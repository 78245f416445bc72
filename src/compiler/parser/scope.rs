use crate::{
    compiler::tokenizer::{Token, TokenKind},
    error::ParseError,
};

/// The bounds of a matched scope or statement inside a token slice.
///
/// `scope_begin..scope_end` spans the whole construct including its
/// delimiters; `inner_begin..inner_end` spans the tokens strictly between
/// them. For statements the "delimiters" are the leading keyword and the
/// terminating `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeBounds {
    /// Index of the opening token.
    pub scope_begin: usize,
    /// One past the index of the closing token.
    pub scope_end:   usize,
    /// Index of the first contained token.
    pub inner_begin: usize,
    /// One past the index of the last contained token.
    pub inner_end:   usize,
}

impl ScopeBounds {
    /// Whether the scope contains no tokens between its delimiters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner_begin >= self.inner_end
    }
}

/// Whether the token kind opens a bracketed scope.
const fn opener(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::OpenScope | TokenKind::OpenList | TokenKind::OpenFrame)
}

/// The closer matching an opener kind.
const fn closer_of(kind: TokenKind) -> TokenKind {
    match kind {
        TokenKind::OpenScope => TokenKind::CloseScope,
        TokenKind::OpenList => TokenKind::CloseList,
        _ => TokenKind::CloseFrame,
    }
}

/// Whether the token kind closes a bracketed scope.
const fn closer(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::CloseScope | TokenKind::CloseList | TokenKind::CloseFrame)
}

fn mismatch(token: &Token) -> ParseError {
    ParseError::MismatchedScope { literal: token.literal.clone(),
                                  line:    token.line,
                                  column:  token.column, }
}

/// Finds the matching closer for the bracket at `begin`.
///
/// All three bracket kinds nest symmetrically: a `(` opened inside a `{`
/// must be closed before the `}` is considered closing. A closer of the
/// wrong kind, or running out of tokens with brackets still open, is a
/// mismatch reported at the offending token.
fn find_scope(tokens: &[Token],
              begin: usize,
              open: TokenKind,
              expected: &str)
              -> Result<ScopeBounds, ParseError> {
    let first = tokens.get(begin)
                      .ok_or(ParseError::UnexpectedEndOfInput { line: 1, column: 1 })?;
    if first.kind != open {
        return Err(ParseError::UnexpectedToken { expected: expected.to_string(),
                                                 found:    first.literal.clone(),
                                                 line:     first.line,
                                                 column:   first.column, });
    }

    let mut stack: Vec<TokenKind> = Vec::new();
    for (offset, token) in tokens[begin..].iter().enumerate() {
        if opener(token.kind) {
            stack.push(token.kind);
        } else if closer(token.kind) {
            match stack.pop() {
                Some(open_kind) if closer_of(open_kind) == token.kind => {},
                _ => return Err(mismatch(token)),
            }
            if stack.is_empty() {
                let close = begin + offset;
                return Ok(ScopeBounds { scope_begin: begin,
                                        scope_end:   close + 1,
                                        inner_begin: begin + 1,
                                        inner_end:   close, });
            }
        }
    }
    Err(mismatch(first))
}

/// Finds the `)` matching the `(` at `begin`.
///
/// # Errors
/// Fails when `begin` is not a `(` or the scope never closes.
///
/// ## Example
/// ```
/// use candi::compiler::{parser::scope::find_paren_scope, tokenizer::tokenize};
///
/// let tokens = tokenize("(1 + 1) * 1").unwrap();
/// let bounds = find_paren_scope(&tokens, 0).unwrap();
///
/// assert_eq!(bounds.scope_end, 5);
/// assert_eq!(tokens[bounds.inner_begin].literal, "1");
/// ```
pub fn find_paren_scope(tokens: &[Token], begin: usize) -> Result<ScopeBounds, ParseError> {
    find_scope(tokens, begin, TokenKind::OpenScope, "'('")
}

/// Finds the `}` matching the `{` at `begin`.
///
/// # Errors
/// Fails when `begin` is not a `{` or the scope never closes.
pub fn find_list_scope(tokens: &[Token], begin: usize) -> Result<ScopeBounds, ParseError> {
    find_scope(tokens, begin, TokenKind::OpenList, "'{'")
}

/// Finds the `]` matching the `[` at `begin`.
///
/// # Errors
/// Fails when `begin` is not a `[` or the scope never closes.
pub fn find_frame_scope(tokens: &[Token], begin: usize) -> Result<ScopeBounds, ParseError> {
    find_scope(tokens, begin, TokenKind::OpenFrame, "'['")
}

fn find_statement_impl(tokens: &[Token],
                       begin: usize,
                       open: TokenKind,
                       close: TokenKind,
                       tolerate_repeated_open: bool)
                       -> Result<ScopeBounds, ParseError> {
    let first = tokens.get(begin)
                      .ok_or(ParseError::UnexpectedEndOfInput { line: 1, column: 1 })?;
    if first.kind != open {
        return Err(ParseError::UnexpectedToken { expected: format!("{open:?}"),
                                                 found:    first.literal.clone(),
                                                 line:     first.line,
                                                 column:   first.column, });
    }

    let mut stack: Vec<TokenKind> = Vec::new();
    for (offset, token) in tokens[begin..].iter().enumerate() {
        if opener(token.kind) {
            stack.push(token.kind);
        } else if closer(token.kind) {
            match stack.pop() {
                Some(open_kind) if closer_of(open_kind) == token.kind => {},
                _ => return Err(mismatch(token)),
            }
        } else if stack.is_empty() && offset > 0 {
            if token.kind == close {
                let close_at = begin + offset;
                return Ok(ScopeBounds { scope_begin: begin,
                                        scope_end:   close_at + 1,
                                        inner_begin: begin + 1,
                                        inner_end:   close_at, });
            }
            if token.kind == open && !tolerate_repeated_open {
                return Err(ParseError::UnexpectedToken { expected: format!("{close:?}"),
                                                         found:    token.literal.clone(),
                                                         line:     token.line,
                                                         column:   token.column, });
            }
        }
    }

    let last = tokens.last().unwrap_or(first);
    Err(ParseError::MissingEos { line:   last.line,
                                 column: last.column, })
}

/// From a token of kind `open` at `begin`, advances to the first `close`
/// token at bracket depth zero.
///
/// Brackets of all kinds opened along the way are skipped over as whole
/// groups, so a `;` inside `{...}` does not terminate the statement. A
/// second depth-zero token of kind `open` before the closer is an error.
///
/// # Errors
/// Fails when `begin` is not of kind `open`, when brackets mismatch, or when
/// no depth-zero `close` exists.
pub fn find_statement(tokens: &[Token],
                      begin: usize,
                      open: TokenKind,
                      close: TokenKind)
                      -> Result<ScopeBounds, ParseError> {
    find_statement_impl(tokens, begin, open, close, false)
}

/// Like [`find_statement`], but tolerates repeated `open` tokens at depth
/// zero. Used for identifier-led statements, where the identifier kind may
/// recur in the statement body (`a = a + a;`).
///
/// # Errors
/// Fails when `begin` is not of kind `open`, when brackets mismatch, or when
/// no depth-zero `close` exists.
pub fn find_open_statement(tokens: &[Token],
                           begin: usize,
                           open: TokenKind,
                           close: TokenKind)
                           -> Result<ScopeBounds, ParseError> {
    find_statement_impl(tokens, begin, open, close, true)
}

/// Splits `tokens[begin..end)` at depth-zero occurrences of `separator`.
///
/// Bracketed groups are kept whole, so a `,` inside nested `(...)` or
/// `{...}` does not split. An empty range yields no pieces. The pieces are
/// returned as `(begin, end)` index pairs into the original slice and may be
/// empty when separators are adjacent.
///
/// # Errors
/// Fails when brackets inside the range mismatch.
pub fn find_separated_scopes(tokens: &[Token],
                             begin: usize,
                             end: usize,
                             separator: TokenKind)
                             -> Result<Vec<(usize, usize)>, ParseError> {
    if begin >= end {
        return Ok(Vec::new());
    }

    let mut pieces = Vec::new();
    let mut piece_begin = begin;
    let mut stack: Vec<TokenKind> = Vec::new();
    for (index, token) in tokens[begin..end].iter().enumerate() {
        let at = begin + index;
        if opener(token.kind) {
            stack.push(token.kind);
        } else if closer(token.kind) {
            match stack.pop() {
                Some(open_kind) if closer_of(open_kind) == token.kind => {},
                _ => return Err(mismatch(token)),
            }
        } else if token.kind == separator && stack.is_empty() {
            pieces.push((piece_begin, at));
            piece_begin = at + 1;
        }
    }
    pieces.push((piece_begin, end));
    Ok(pieces)
}
