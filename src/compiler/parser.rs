/// Core parsing entry points and the shared parsing-result shape.
///
/// Declares [`core::ParseOutcome`] and [`core::parse_program`], the public
/// surface that turns a whole token stream into a program tree.
pub mod core;

/// The token cursor.
///
/// A non-owning view over the token stream with lookahead and the operator
/// classification tables: binding importance, associativity, and unary-ness.
pub mod cursor;

/// Scope and statement finders.
///
/// Locates matching brackets (all three kinds nest symmetrically), delimits
/// statements up to their terminating `;`, and splits bracketed scopes at
/// separators.
pub mod scope;

/// The expression builder.
///
/// Combines operands, unary and binary operators, parenthesized
/// subexpressions, member access, and call suffixes into a single tree,
/// honoring importance and associativity.
pub mod expression;

/// Declaration directive parsers.
///
/// Recognizes `#type`, `#var`, `#func`, `#class`, `#return`, `#print`, and
/// `#none` statements, each ending one past its terminating `;`.
pub mod directive;

/// Control-flow directive parsers.
///
/// Recognizes `#if`/`#elif`/`#else` chains, `#while`, `#for`, and `#on`,
/// each a condition or selector expression followed by a functional block.
pub mod control;

/// Intrinsic-type parsers.
///
/// Recognizes the ampersand type constructions and their range, pointee,
/// and element constraints.
pub mod intrinsic;

/// Block parsers.
///
/// Composes statements into pragmatic blocks (declarations) and functional
/// blocks (executable statements).
pub mod block;
