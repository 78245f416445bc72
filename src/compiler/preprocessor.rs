use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    compiler::{
        parser::scope::{find_paren_scope, find_separated_scopes, find_statement},
        tokenizer::{Token, TokenKind, tokenize},
    },
    error::ParseError,
};

/// Upper bound on nested macro substitutions.
///
/// A macro whose body calls back into itself would otherwise substitute
/// forever; expansion past this depth is reported as an error.
pub const MACRO_DEPTH_LIMIT: usize = 64;

/// A registered macro: its parameter names and its body token sequence.
#[derive(Debug, Clone)]
struct MacroDef {
    params: Vec<String>,
    body:   Vec<Token>,
}

/// The textual preprocessor.
///
/// Operates on token sequences, between tokenization and parsing. Two
/// directives are rewritten:
///
/// - `#include '<path>';` is replaced inline by the referenced file's token
///   stream (its trailing `Eof` removed). Paths are resolved relative to the
///   including file; cycles are detected and rejected.
/// - `#macro name(params) body... ;` registers a substitution. Every later
///   `name(actuals)` occurrence is replaced by the body with parameters
///   substituted positionally; replacement output is re-scanned so macros
///   may call other macros, up to [`MACRO_DEPTH_LIMIT`].
///
/// All other tokens pass through unchanged.
#[derive(Debug, Default)]
pub struct Preprocessor {
    macros:        HashMap<String, MacroDef>,
    include_stack: Vec<PathBuf>,
}

impl Preprocessor {
    /// Creates a preprocessor with no registered macros.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the preprocessor over a token stream.
    ///
    /// `base_dir` is the directory against which `#include` paths are
    /// resolved.
    ///
    /// # Errors
    /// Fails on a malformed directive, an unreadable or cyclic include, a
    /// macro call with the wrong arity, or expansion beyond the depth limit.
    pub fn run(&mut self,
               tokens: Vec<Token>,
               base_dir: &Path)
               -> Result<Vec<Token>, ParseError> {
        self.process(&tokens, base_dir, 0)
    }

    fn process(&mut self,
               tokens: &[Token],
               base_dir: &Path,
               depth: usize)
               -> Result<Vec<Token>, ParseError> {
        let mut out = Vec::new();
        let mut at = 0;

        while at < tokens.len() {
            let token = &tokens[at];
            match token.kind {
                TokenKind::Include => {
                    at = self.expand_include(tokens, at, base_dir, &mut out)?;
                },
                TokenKind::Macro => {
                    at = self.register_macro(tokens, at)?;
                },
                TokenKind::Alnumus
                    if self.macros.contains_key(&token.literal)
                       && tokens.get(at + 1).map(|t| t.kind) == Some(TokenKind::OpenScope) =>
                {
                    if depth >= MACRO_DEPTH_LIMIT {
                        return Err(ParseError::MacroRecursionLimit {
                            name:   token.literal.clone(),
                            line:   token.line,
                            column: token.column,
                        });
                    }
                    let (substituted, next) = self.substitute(tokens, at)?;
                    let expanded = self.process(&substituted, base_dir, depth + 1)?;
                    out.extend(expanded);
                    at = next;
                },
                _ => {
                    out.push(token.clone());
                    at += 1;
                },
            }
        }

        Ok(out)
    }

    /// Rewrites `#include '<path>';` into the referenced file's tokens.
    ///
    /// Returns the index one past the consumed directive.
    fn expand_include(&mut self,
                      tokens: &[Token],
                      begin: usize,
                      base_dir: &Path,
                      out: &mut Vec<Token>)
                      -> Result<usize, ParseError> {
        let keyword = &tokens[begin];
        let path_token = match tokens.get(begin + 1) {
            Some(t) if t.kind == TokenKind::StringLiteral => t,
            other => {
                let at = other.unwrap_or(keyword);
                return Err(ParseError::UnexpectedToken {
                    expected: "a quoted include path".to_string(),
                    found: at.literal.clone(),
                    line: at.line,
                    column: at.column,
                }
                .within("preprocess"));
            },
        };
        match tokens.get(begin + 2) {
            Some(t) if t.kind == TokenKind::Eos => {},
            other => {
                let at = other.unwrap_or(path_token);
                return Err(ParseError::UnexpectedToken {
                    expected: "';' after the include path".to_string(),
                    found: at.literal.clone(),
                    line: at.line,
                    column: at.column,
                }
                .within("preprocess"));
            },
        }

        let relative = unquote(&path_token.literal);
        let path = base_dir.join(&relative);
        let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());

        if self.include_stack.contains(&canonical) {
            return Err(ParseError::IncludeCycle { path:   relative,
                                                  line:   path_token.line,
                                                  column: path_token.column, });
        }

        let source = fs::read_to_string(&path).map_err(|e| ParseError::IncludeFailed {
            path: relative.clone(),
            reason: e.to_string(),
            line: path_token.line,
            column: path_token.column,
        })?;
        let included = tokenize(&source).map_err(|e| e.within("preprocess"))?;

        self.include_stack.push(canonical);
        let nested_base = path.parent().map_or_else(|| base_dir.to_path_buf(), Path::to_path_buf);
        let mut expanded = self.process(&included, &nested_base, 0)?;
        self.include_stack.pop();

        if expanded.last().map(|t| t.kind) == Some(TokenKind::Eof) {
            expanded.pop();
        }
        out.extend(expanded);
        Ok(begin + 3)
    }

    /// Registers `#macro name(params) body... ;`.
    ///
    /// Returns the index one past the terminating `;`.
    fn register_macro(&mut self, tokens: &[Token], begin: usize) -> Result<usize, ParseError> {
        let within = |e: ParseError| e.within("preprocess");
        let bounds =
            find_statement(tokens, begin, TokenKind::Macro, TokenKind::Eos).map_err(within)?;
        let keyword = &tokens[begin];

        let name_token = match tokens.get(begin + 1) {
            Some(t) if t.kind == TokenKind::Alnumus => t,
            other => {
                let at = other.unwrap_or(keyword);
                return Err(within(ParseError::UnexpectedToken {
                    expected: "a macro name".to_string(),
                    found: at.literal.clone(),
                    line: at.line,
                    column: at.column,
                }));
            },
        };

        let params_scope = find_paren_scope(tokens, begin + 2).map_err(within)?;
        let mut params = Vec::new();
        for (piece_begin, piece_end) in find_separated_scopes(tokens,
                                                              params_scope.inner_begin,
                                                              params_scope.inner_end,
                                                              TokenKind::Comma)
            .map_err(within)?
        {
            let piece = &tokens[piece_begin..piece_end];
            match piece {
                [param] if param.kind == TokenKind::Alnumus => {
                    params.push(param.literal.clone());
                },
                _ => {
                    let at = piece.first().unwrap_or(name_token);
                    return Err(within(ParseError::UnexpectedToken {
                        expected: "a macro parameter name".to_string(),
                        found: at.literal.clone(),
                        line: at.line,
                        column: at.column,
                    }));
                },
            }
        }

        let body = tokens[params_scope.scope_end..bounds.inner_end].to_vec();
        self.macros.insert(name_token.literal.clone(), MacroDef { params, body });
        Ok(bounds.scope_end)
    }

    /// Substitutes one `name(actuals)` occurrence.
    ///
    /// Returns the substituted body and the index one past the closing `)`.
    fn substitute(&self, tokens: &[Token], begin: usize) -> Result<(Vec<Token>, usize), ParseError> {
        let name_token = &tokens[begin];
        let def = &self.macros[&name_token.literal];

        let args_scope =
            find_paren_scope(tokens, begin + 1).map_err(|e| e.within("preprocess"))?;
        let pieces = find_separated_scopes(tokens,
                                           args_scope.inner_begin,
                                           args_scope.inner_end,
                                           TokenKind::Comma)
            .map_err(|e| e.within("preprocess"))?;

        if pieces.len() != def.params.len() {
            return Err(ParseError::MacroArgumentMismatch { name:     name_token.literal
                                                                                .clone(),
                                                           expected: def.params.len(),
                                                           found:    pieces.len(),
                                                           line:     name_token.line,
                                                           column:   name_token.column, });
        }

        let mut substituted = Vec::new();
        for body_token in &def.body {
            if body_token.kind == TokenKind::Alnumus
               && let Some(index) = def.params.iter().position(|p| *p == body_token.literal)
            {
                let (piece_begin, piece_end) = pieces[index];
                substituted.extend_from_slice(&tokens[piece_begin..piece_end]);
            } else {
                substituted.push(body_token.clone());
            }
        }

        Ok((substituted, args_scope.scope_end))
    }
}

/// Preprocesses a token stream, resolving `#include` paths against
/// `base_dir`.
///
/// # Errors
/// See [`Preprocessor::run`].
///
/// ## Example
/// ```
/// use std::path::Path;
///
/// use candi::compiler::{preprocessor::preprocess, tokenizer::tokenize};
///
/// let tokens = tokenize("#macro twice(x) x + x; #var a = twice(21);").unwrap();
/// let expanded = preprocess(tokens, Path::new(".")).unwrap();
/// let spelled: Vec<_> = expanded.iter().map(|t| t.literal.as_str()).collect();
///
/// assert_eq!(spelled, vec!["#var", "a", "=", "21", "+", "21", ";", ""]);
/// ```
pub fn preprocess(tokens: Vec<Token>, base_dir: &Path) -> Result<Vec<Token>, ParseError> {
    Preprocessor::new().run(tokens, base_dir)
}

/// Strips the surrounding quotes from a string literal's source slice.
fn unquote(literal: &str) -> String {
    literal.trim_matches('\'').to_string()
}
