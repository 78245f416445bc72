//! # candi
//!
//! candi is the front-end of a small compiler toolchain for the Candi
//! directive language. It tokenizes UTF-8 source text, runs a textual
//! preprocessor (`#include` and `#macro`), parses the result into a typed
//! abstract syntax tree, and constant-evaluates programs built from
//! literals, arithmetic, variables, functions, and classes.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::path::Path;

use crate::{
    ast::AstNode,
    compiler::{
        evaluator::{core::evaluate, env::Environment},
        parser::core::parse_program,
        preprocessor::preprocess,
        tokenizer::tokenize,
        value::Value,
    },
    error::ParseError,
};

/// Defines the structure of parsed code.
///
/// This module declares the uniform AST node and the closed set of node
/// kinds that represent the syntactic structure of source code as a tree.
/// The tree is built bottom-up by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines the node and kind types for all language constructs.
/// - Attaches source positions to nodes for error reporting.
/// - Orders children semantically (left before right, callee before
///   arguments, name before body).
pub mod ast;
/// The compilation pipeline.
///
/// This module ties together tokenization, preprocessing, parsing, constant
/// evaluation, and the runtime value types. Each stage owns its input and
/// produces a new owned output; the stages compose left to right.
///
/// # Responsibilities
/// - Coordinates the pipeline stages: tokenizer, preprocessor, parser,
///   evaluator.
/// - Provides the individually callable sub-parsers used by tooling.
/// - Manages the flow of data and errors between stages.
pub mod compiler;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing,
/// preprocessing, parsing, or evaluating code. Parse errors accumulate the
/// chain of productions from the outermost entry point down to the leaf
/// failure; every error cites the offending token's line and column.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches positions and detailed messages for user feedback.
/// - Integrates with the standard error traits.
pub mod error;
/// General utilities for safe numeric conversion.
///
/// This module provides checked conversions between the evaluator's numeric
/// types that fail instead of silently losing data.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u64`, and `f64`.
pub mod util;

/// Compiles source text into its program tree.
///
/// Runs the tokenizer, the preprocessor (resolving `#include` paths against
/// `include_dir`), and the parser. The returned root is always a pragmatic
/// block.
///
/// # Errors
/// Returns a [`ParseError`] when any stage fails.
pub fn compile(source: &str, include_dir: &Path) -> Result<AstNode, ParseError> {
    let tokens = tokenize(source)?;
    let tokens = preprocess(tokens, include_dir)?;
    parse_program(&tokens)
}

/// Compiles and constant-evaluates a source string.
///
/// Include paths are resolved against the current directory. When
/// `auto_print` is set, the final evaluated value is printed to standard
/// output unless it is none.
///
/// # Errors
/// Returns an error if tokenization, preprocessing, parsing, or evaluation
/// fails.
///
/// # Examples
/// ```
/// use candi::get_result;
///
/// // Simple program: the result is computed and no error occurs.
/// let source = "#var result = 2 + 2;";
/// assert!(get_result(source, false).is_ok());
///
/// // Intentional error: 'x' is not defined.
/// let source = "#var y = x + 1;";
/// assert!(get_result(source, false).is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let program = compile(source, Path::new("."))?;
    let value = evaluate(&program, &Environment::global())?;

    if auto_print && value != Value::None {
        println!("{value}");
    }
    Ok(())
}

/// Compiles and constant-evaluates a source file.
///
/// Include paths are resolved against the file's directory. When
/// `auto_print` is set, the final evaluated value is printed to standard
/// output unless it is none.
///
/// # Errors
/// Returns an error if the file cannot be read or any pipeline stage fails.
pub fn run_file(path: &Path, auto_print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let include_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let program = compile(&source, include_dir)?;
    let value = evaluate(&program, &Environment::global())?;

    if auto_print && value != Value::None {
        println!("{value}");
    }
    Ok(())
}
