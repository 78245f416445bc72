use candi::{
    ast::{AstNode, NodeKind},
    compiler::{
        parser::{
            expression::{parse_arguments, parse_expression, parse_operand,
                         parse_value_statement},
            scope::{find_frame_scope, find_list_scope, find_open_statement, find_paren_scope,
                    find_separated_scopes, find_statement},
        },
        tokenizer::{Token, TokenKind, tokenize},
    },
};

fn leaf(kind: NodeKind, literal: &str) -> AstNode {
    AstNode::new(kind, literal, 0, 0)
}

fn tree(kind: NodeKind, literal: &str, children: Vec<AstNode>) -> AstNode {
    AstNode::with_children(kind, literal, 0, 0, children)
}

fn expr_tokens(source: &str) -> Vec<Token> {
    let mut tokens = tokenize(source).expect("tokenization should succeed");
    assert_eq!(tokens.pop().map(|t| t.kind), Some(TokenKind::Eof));
    tokens
}

fn parse(source: &str) -> AstNode {
    parse_expression(&expr_tokens(source)).expect("expression should parse")
}

#[test]
fn operands_parse_to_single_nodes() {
    let cases = [("1", leaf(NodeKind::NumberLiteral, "1")),
                 ("1.1", leaf(NodeKind::RealLiteral, "1.1")),
                 ("'string literal'", leaf(NodeKind::StringLiteral, "'string literal'")),
                 ("'\\''", leaf(NodeKind::StringLiteral, "'\\''")),
                 ("alnumus", leaf(NodeKind::Alnumus, "alnumus")),
                 ("1c", leaf(NodeKind::OctetLiteral, "1c")),
                 ("1b", leaf(NodeKind::BitLiteral, "1b")),
                 ("1u", leaf(NodeKind::UnsignedLiteral, "1u")),
                 ("#none", leaf(NodeKind::NoneLiteral, "#none"))];
    for (source, expected) in cases {
        let tokens = tokenize(source).unwrap();
        let (node, next) = parse_operand(&tokens, 0).expect("operand should parse");
        assert_eq!(node, expected, "operand {source}");
        assert_eq!(next, 1);
    }
}

#[test]
fn operand_rejects_non_operands() {
    let tokens = tokenize("+").unwrap();
    assert!(parse_operand(&tokens, 0).is_err());
}

#[test]
fn arguments_parse_empty_one_and_many() {
    let tokens = tokenize("()").unwrap();
    let (node, next) = parse_arguments(&tokens, 0).unwrap();
    assert_eq!(node, tree(NodeKind::Arguments, "()", vec![]));
    assert_eq!(next, 2);

    let tokens = tokenize("(1)").unwrap();
    let (node, _) = parse_arguments(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::Arguments, "()", vec![leaf(NodeKind::NumberLiteral, "1")]));

    let tokens = tokenize("(1, 1, 3)").unwrap();
    let (node, _) = parse_arguments(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::Arguments,
                    "()",
                    vec![leaf(NodeKind::NumberLiteral, "1"),
                         leaf(NodeKind::NumberLiteral, "1"),
                         leaf(NodeKind::NumberLiteral, "3")]));
}

#[test]
fn single_operands_are_expressions() {
    assert_eq!(parse("1"), leaf(NodeKind::NumberLiteral, "1"));
    assert_eq!(parse("1.1"), leaf(NodeKind::RealLiteral, "1.1"));
    assert_eq!(parse("1u"), leaf(NodeKind::UnsignedLiteral, "1u"));
    assert_eq!(parse("'hello'"), leaf(NodeKind::StringLiteral, "'hello'"));
    assert_eq!(parse("#none"), leaf(NodeKind::NoneLiteral, "#none"));
}

#[test]
fn redundant_parentheses_collapse() {
    assert_eq!(parse("(1)"), leaf(NodeKind::NumberLiteral, "1"));
}

#[test]
fn binary_addition() {
    assert_eq!(parse("1 + 1"),
               tree(NodeKind::Addition,
                    "+",
                    vec![leaf(NodeKind::NumberLiteral, "1"), leaf(NodeKind::NumberLiteral, "1")]));
}

#[test]
fn empty_parenthesis_is_an_error() {
    assert!(parse_expression(&expr_tokens("()")).is_err());
}

#[test]
fn mismatched_parenthesis_is_an_error() {
    assert!(parse_expression(&expr_tokens("(1 + 1")).is_err());
}

#[test]
fn function_call_on_identifier() {
    assert_eq!(parse("foo()"),
               tree(NodeKind::FunctionCall,
                    "()",
                    vec![leaf(NodeKind::Alnumus, "foo"), tree(NodeKind::Arguments, "()", vec![])]));
}

#[test]
fn unary_negation() {
    assert_eq!(parse("!1"),
               tree(NodeKind::Negation, "!", vec![leaf(NodeKind::NumberLiteral, "1")]));
}

#[test]
fn unary_minus_takes_one_child() {
    assert_eq!(parse("-1 * 2"),
               tree(NodeKind::Multiplication,
                    "*",
                    vec![tree(NodeKind::Subtraction, "-", vec![leaf(NodeKind::NumberLiteral, "1")]),
                         leaf(NodeKind::NumberLiteral, "2")]));
}

#[test]
fn higher_importance_binds_first() {
    assert_eq!(parse("1 + 1 * 1"),
               tree(NodeKind::Addition,
                    "+",
                    vec![leaf(NodeKind::NumberLiteral, "1"),
                         tree(NodeKind::Multiplication,
                              "*",
                              vec![leaf(NodeKind::NumberLiteral, "1"),
                                   leaf(NodeKind::NumberLiteral, "1")])]));
}

#[test]
fn logical_or_binds_looser_than_and() {
    assert_eq!(parse("a || b && c"),
               tree(NodeKind::LogicalOr,
                    "||",
                    vec![leaf(NodeKind::Alnumus, "a"),
                         tree(NodeKind::LogicalAnd,
                              "&&",
                              vec![leaf(NodeKind::Alnumus, "b"), leaf(NodeKind::Alnumus, "c")])]));
}

#[test]
fn parenthesized_scope_is_a_left_operand() {
    assert_eq!(parse("(1 + 1) * 1"),
               tree(NodeKind::Multiplication,
                    "*",
                    vec![tree(NodeKind::Addition,
                              "+",
                              vec![leaf(NodeKind::NumberLiteral, "1"),
                                   leaf(NodeKind::NumberLiteral, "1")]),
                         leaf(NodeKind::NumberLiteral, "1")]));
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(parse("a = b = c"),
               tree(NodeKind::SimpleAssignment,
                    "=",
                    vec![leaf(NodeKind::Alnumus, "a"),
                         tree(NodeKind::SimpleAssignment,
                              "=",
                              vec![leaf(NodeKind::Alnumus, "b"), leaf(NodeKind::Alnumus, "c")])]));
}

#[test]
fn sum_is_left_associative() {
    assert_eq!(parse("a + b - c"),
               tree(NodeKind::Subtraction,
                    "-",
                    vec![tree(NodeKind::Addition,
                              "+",
                              vec![leaf(NodeKind::Alnumus, "a"), leaf(NodeKind::Alnumus, "b")]),
                         leaf(NodeKind::Alnumus, "c")]));
}

#[test]
fn member_access_is_left_associative() {
    assert_eq!(parse("a.b.c"),
               tree(NodeKind::Period,
                    ".",
                    vec![tree(NodeKind::Period,
                              ".",
                              vec![leaf(NodeKind::Alnumus, "a"), leaf(NodeKind::Alnumus, "b")]),
                         leaf(NodeKind::Alnumus, "c")]));
}

#[test]
fn binary_operator_after_unary_is_an_error() {
    assert!(parse_expression(&expr_tokens("!+1")).is_err());
}

#[test]
fn repeated_unary_nests() {
    assert_eq!(parse("!!1"),
               tree(NodeKind::Negation,
                    "!",
                    vec![tree(NodeKind::Negation, "!", vec![leaf(NodeKind::NumberLiteral, "1")])]));
}

#[test]
fn unary_then_binary() {
    assert_eq!(parse("!1 + 1"),
               tree(NodeKind::Addition,
                    "+",
                    vec![tree(NodeKind::Negation, "!", vec![leaf(NodeKind::NumberLiteral, "1")]),
                         leaf(NodeKind::NumberLiteral, "1")]));
}

#[test]
fn unary_then_higher_importance() {
    assert_eq!(parse("!1 * 1"),
               tree(NodeKind::Multiplication,
                    "*",
                    vec![tree(NodeKind::Negation, "!", vec![leaf(NodeKind::NumberLiteral, "1")]),
                         leaf(NodeKind::NumberLiteral, "1")]));
}

#[test]
fn unary_after_binary() {
    assert_eq!(parse("1 + !1"),
               tree(NodeKind::Addition,
                    "+",
                    vec![leaf(NodeKind::NumberLiteral, "1"),
                         tree(NodeKind::Negation, "!", vec![leaf(NodeKind::NumberLiteral, "1")])]));
}

#[test]
fn unary_wraps_a_function_call() {
    assert_eq!(parse("!foo()"),
               tree(NodeKind::Negation,
                    "!",
                    vec![tree(NodeKind::FunctionCall,
                              "()",
                              vec![leaf(NodeKind::Alnumus, "foo"),
                                   tree(NodeKind::Arguments, "()", vec![])])]));
}

#[test]
fn function_call_then_binary() {
    assert_eq!(parse("foo() + 1"),
               tree(NodeKind::Addition,
                    "+",
                    vec![tree(NodeKind::FunctionCall,
                              "()",
                              vec![leaf(NodeKind::Alnumus, "foo"),
                                   tree(NodeKind::Arguments, "()", vec![])]),
                         leaf(NodeKind::NumberLiteral, "1")]));
}

#[test]
fn binary_then_function_call() {
    assert_eq!(parse("1 + foo()"),
               tree(NodeKind::Addition,
                    "+",
                    vec![leaf(NodeKind::NumberLiteral, "1"),
                         tree(NodeKind::FunctionCall,
                              "()",
                              vec![leaf(NodeKind::Alnumus, "foo"),
                                   tree(NodeKind::Arguments, "()", vec![])])]));
}

#[test]
fn call_binds_to_the_member_access_before_it() {
    assert_eq!(parse("foo.bar()"),
               tree(NodeKind::FunctionCall,
                    "()",
                    vec![tree(NodeKind::Period,
                              ".",
                              vec![leaf(NodeKind::Alnumus, "foo"), leaf(NodeKind::Alnumus, "bar")]),
                         tree(NodeKind::Arguments, "()", vec![])]));
}

#[test]
fn member_access_after_a_call_groups_leftward() {
    // a.b().c is ((a.b)()).c, not a.(b().c).
    assert_eq!(parse("a.b().c"),
               tree(NodeKind::Period,
                    ".",
                    vec![tree(NodeKind::FunctionCall,
                              "()",
                              vec![tree(NodeKind::Period,
                                        ".",
                                        vec![leaf(NodeKind::Alnumus, "a"),
                                             leaf(NodeKind::Alnumus, "b")]),
                                   tree(NodeKind::Arguments, "()", vec![])]),
                         leaf(NodeKind::Alnumus, "c")]));
}

#[test]
fn calls_and_operators_compose() {
    assert_eq!(parse("foo.bar() + 1 * 1"),
               tree(NodeKind::Addition,
                    "+",
                    vec![tree(NodeKind::FunctionCall,
                              "()",
                              vec![tree(NodeKind::Period,
                                        ".",
                                        vec![leaf(NodeKind::Alnumus, "foo"),
                                             leaf(NodeKind::Alnumus, "bar")]),
                                   tree(NodeKind::Arguments, "()", vec![])]),
                         tree(NodeKind::Multiplication,
                              "*",
                              vec![leaf(NodeKind::NumberLiteral, "1"),
                                   leaf(NodeKind::NumberLiteral, "1")])]));
}

#[test]
fn calls_and_operators_compose_inside_scopes() {
    assert_eq!(parse("(foo.bar() + 1) * 1"),
               tree(NodeKind::Multiplication,
                    "*",
                    vec![tree(NodeKind::Addition,
                              "+",
                              vec![tree(NodeKind::FunctionCall,
                                        "()",
                                        vec![tree(NodeKind::Period,
                                                  ".",
                                                  vec![leaf(NodeKind::Alnumus, "foo"),
                                                       leaf(NodeKind::Alnumus, "bar")]),
                                             tree(NodeKind::Arguments, "()", vec![])]),
                                   leaf(NodeKind::NumberLiteral, "1")]),
                         leaf(NodeKind::NumberLiteral, "1")]));
}

#[test]
fn parsing_is_deterministic() {
    let first = parse("foo.bar() + 1 * (2 - 3)");
    let second = parse("foo.bar() + 1 * (2 - 3)");
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}

#[test]
fn value_statements_end_one_past_the_semicolon() {
    let tokens = tokenize("foo;").unwrap();
    let (node, next) = parse_value_statement(&tokens, 0).unwrap();
    assert_eq!(node, leaf(NodeKind::Alnumus, "foo"));
    assert_eq!(next, 2);

    let tokens = tokenize("foo + 2;").unwrap();
    let (node, _) = parse_value_statement(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::Addition,
                    "+",
                    vec![leaf(NodeKind::Alnumus, "foo"), leaf(NodeKind::NumberLiteral, "2")]));

    let tokens = tokenize("foo = 1 + 2;").unwrap();
    let (node, _) = parse_value_statement(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::SimpleAssignment,
                    "=",
                    vec![leaf(NodeKind::Alnumus, "foo"),
                         tree(NodeKind::Addition,
                              "+",
                              vec![leaf(NodeKind::NumberLiteral, "1"),
                                   leaf(NodeKind::NumberLiteral, "2")])]));

    let tokens = tokenize("foo.bar;").unwrap();
    let (node, _) = parse_value_statement(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::Period,
                    ".",
                    vec![leaf(NodeKind::Alnumus, "foo"), leaf(NodeKind::Alnumus, "bar")]));

    let tokens = tokenize("foo();").unwrap();
    let (node, _) = parse_value_statement(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::FunctionCall,
                    "()",
                    vec![leaf(NodeKind::Alnumus, "foo"), tree(NodeKind::Arguments, "()", vec![])]));
}

#[test]
fn assignment_without_a_right_side_is_an_error() {
    let tokens = tokenize("foo=;").unwrap();
    assert!(parse_value_statement(&tokens, 0).is_err());
}

#[test]
fn paren_scopes_are_found() {
    let tokens = tokenize("(a + (b))").unwrap();
    let bounds = find_paren_scope(&tokens, 0).unwrap();
    assert_eq!(bounds.scope_begin, 0);
    assert_eq!(bounds.scope_end, 7);
    assert_eq!((bounds.inner_begin, bounds.inner_end), (1, 6));

    assert!(find_paren_scope(&tokenize("(()").unwrap(), 0).is_err());
}

#[test]
fn list_scopes_are_found() {
    for source in ["{}", "{a}", "{{}}", "{({})[{}]{}}"] {
        let tokens = tokenize(source).unwrap();
        let bounds = find_list_scope(&tokens, 0).unwrap();
        assert_eq!(bounds.scope_end, tokens.len() - 1, "scope of {source}");
    }
    assert!(find_list_scope(&tokenize("{{}").unwrap(), 0).is_err());
}

#[test]
fn frame_scopes_are_found() {
    for source in ["[]", "[a]", "[[]]", "[([])[[]][]]"] {
        let tokens = tokenize(source).unwrap();
        let bounds = find_frame_scope(&tokens, 0).unwrap();
        assert_eq!(bounds.scope_end, tokens.len() - 1, "scope of {source}");
    }
    assert!(find_frame_scope(&tokenize("[[]").unwrap(), 0).is_err());
}

#[test]
fn bracket_kinds_nest_symmetrically() {
    // The ( opened inside { must close before the } counts as closing.
    assert!(find_list_scope(&tokenize("{(}").unwrap(), 0).is_err());
    assert!(find_paren_scope(&tokenize("({)}").unwrap(), 0).is_err());

    let tokens = tokenize("{(a);[b]}").unwrap();
    let bounds = find_list_scope(&tokens, 0).unwrap();
    assert_eq!(bounds.scope_end, tokens.len() - 1);
}

#[test]
fn statements_are_delimited_by_depth_zero_semicolons() {
    let tokens = tokenize("1;").unwrap();
    let bounds = find_statement(&tokens, 0, TokenKind::NumberLiteral, TokenKind::Eos).unwrap();
    assert_eq!(bounds.scope_end, 2);

    let tokens = tokenize("#var a = 1;").unwrap();
    let bounds = find_statement(&tokens, 0, TokenKind::Var, TokenKind::Eos).unwrap();
    assert_eq!(bounds.scope_end, tokens.len() - 1);

    // Semicolons inside bracketed groups do not terminate the statement.
    let tokens = tokenize("#var a = 1 + ([2; 3 + {4; 5}]);").unwrap();
    let bounds = find_statement(&tokens, 0, TokenKind::Var, TokenKind::Eos).unwrap();
    assert_eq!(bounds.scope_end, tokens.len() - 1);
}

#[test]
fn repeated_open_kind_is_rejected_unless_tolerated() {
    let tokens = tokenize("a = a + a;").unwrap();
    assert!(find_statement(&tokens, 0, TokenKind::Alnumus, TokenKind::Eos).is_err());

    let bounds = find_open_statement(&tokens, 0, TokenKind::Alnumus, TokenKind::Eos).unwrap();
    assert_eq!(bounds.scope_end, tokens.len() - 1);
}

#[test]
fn missing_semicolon_is_reported() {
    let tokens = tokenize("#var a = 1").unwrap();
    assert!(find_statement(&tokens, 0, TokenKind::Var, TokenKind::Eos).is_err());
}

#[test]
fn separated_scopes_split_at_depth_zero_commas() {
    let tokens = tokenize("{(a),{b},[c],(a,b),{a,c}}").unwrap();
    let list = find_list_scope(&tokens, 0).unwrap();
    let pieces =
        find_separated_scopes(&tokens, list.inner_begin, list.inner_end, TokenKind::Comma)
            .unwrap();
    assert_eq!(pieces.len(), 5);

    let spell = |(begin, end): (usize, usize)| {
        tokens[begin..end].iter().map(|t| t.literal.as_str()).collect::<String>()
    };
    assert_eq!(spell(pieces[0]), "(a)");
    assert_eq!(spell(pieces[3]), "(a,b)");
    assert_eq!(spell(pieces[4]), "{a,c}");
}
