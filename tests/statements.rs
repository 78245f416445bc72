use candi::{
    ast::{AstNode, NodeKind},
    compiler::{
        parser::{
            block::{parse_functional_block, parse_pragmatic_block},
            control::{parse_directive_for, parse_directive_if, parse_directive_on,
                      parse_directive_while},
            core::parse_program,
            directive::{parse_directive_class, parse_directive_func, parse_directive_none,
                        parse_directive_print, parse_directive_return, parse_directive_type,
                        parse_directive_var},
            intrinsic::parse_intrinsic,
        },
        tokenizer::{Token, tokenize},
    },
};

fn leaf(kind: NodeKind, literal: &str) -> AstNode {
    AstNode::new(kind, literal, 0, 0)
}

fn tree(kind: NodeKind, literal: &str, children: Vec<AstNode>) -> AstNode {
    AstNode::with_children(kind, literal, 0, 0, children)
}

fn tokens_of(source: &str) -> Vec<Token> {
    tokenize(source).expect("tokenization should succeed")
}

#[test]
fn type_alias_to_an_identifier() {
    let tokens = tokens_of("#type IntAlias = Wide;");
    let (node, next) = parse_directive_type(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::TypeDefinition,
                    "#type",
                    vec![leaf(NodeKind::Alnumus, "IntAlias"), leaf(NodeKind::Alnumus, "Wide")]));
    assert_eq!(next, tokens.len() - 1);
}

#[test]
fn type_alias_to_a_constrained_intrinsic() {
    let tokens = tokens_of("#type Tiny = &int[-42...42];");
    let (node, _) = parse_directive_type(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::TypeDefinition,
                    "#type",
                    vec![leaf(NodeKind::Alnumus, "Tiny"),
                         tree(NodeKind::AInt,
                              "&int",
                              vec![tree(NodeKind::Subtraction,
                                        "-",
                                        vec![leaf(NodeKind::NumberLiteral, "42")]),
                                   leaf(NodeKind::NumberLiteral, "42")])]));
}

#[test]
fn type_alias_requires_its_pieces() {
    assert!(parse_directive_type(&tokens_of("#type Tiny = ;"), 0).is_err());
    assert!(parse_directive_type(&tokens_of("#type Tiny &int;"), 0).is_err());
    assert!(parse_directive_type(&tokens_of("#type = &int;"), 0).is_err());
}

#[test]
fn intrinsics_parse_atomically_and_constrained() {
    let atomic = ["&real", "&octet", "&bit", "&str", "&type", "&value", "&identity"];
    for source in atomic {
        let tokens = tokens_of(source);
        let (node, next) = parse_intrinsic(&tokens, 0).unwrap();
        assert!(node.children.is_empty(), "{source} should be atomic");
        assert_eq!(next, 1);
    }

    let tokens = tokens_of("&uint[0...100]");
    let (node, _) = parse_intrinsic(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::AUint,
                    "&uint",
                    vec![leaf(NodeKind::NumberLiteral, "0"),
                         leaf(NodeKind::NumberLiteral, "100")]));

    let tokens = tokens_of("&pointer[Node]");
    let (node, _) = parse_intrinsic(&tokens, 0).unwrap();
    assert_eq!(node, tree(NodeKind::APointer, "&pointer", vec![leaf(NodeKind::Alnumus, "Node")]));

    let tokens = tokens_of("&array[&octet, 16]");
    let (node, _) = parse_intrinsic(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::AArray,
                    "&array",
                    vec![leaf(NodeKind::AOctet, "&octet"), leaf(NodeKind::NumberLiteral, "16")]));
}

#[test]
fn pointer_and_array_constraints_are_required() {
    assert!(parse_intrinsic(&tokens_of("&pointer"), 0).is_err());
    assert!(parse_intrinsic(&tokens_of("&pointer[]"), 0).is_err());
    assert!(parse_intrinsic(&tokens_of("&array[&octet]"), 0).is_err());
    assert!(parse_intrinsic(&tokens_of("&int[1...]"), 0).is_err());
}

#[test]
fn anonymous_variable_definition() {
    let tokens = tokens_of("#var foo;");
    let (node, next) = parse_directive_var(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::AnonVariableDefinition, "#var", vec![leaf(NodeKind::Alnumus, "foo")]));
    assert_eq!(next, 3);
}

#[test]
fn anonymous_variable_definition_with_assignment() {
    let tokens = tokens_of("#var x = 1 + 2;");
    let (node, next) = parse_directive_var(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::AnonVariableDefinitionAssignment,
                    "#var",
                    vec![leaf(NodeKind::Alnumus, "x"),
                         tree(NodeKind::Addition,
                              "+",
                              vec![leaf(NodeKind::NumberLiteral, "1"),
                                   leaf(NodeKind::NumberLiteral, "2")])]));
    assert_eq!(next, tokens.len() - 1);
}

#[test]
fn variable_definition_with_a_complex_initializer() {
    let tokens = tokens_of("#var foo = 1 + c * (3 / 4);");
    let (node, _) = parse_directive_var(&tokens, 0).unwrap();
    assert_eq!(node.kind, NodeKind::AnonVariableDefinitionAssignment);
    assert_eq!(node.children[1],
               tree(NodeKind::Addition,
                    "+",
                    vec![leaf(NodeKind::NumberLiteral, "1"),
                         tree(NodeKind::Multiplication,
                              "*",
                              vec![leaf(NodeKind::Alnumus, "c"),
                                   tree(NodeKind::Division,
                                        "/",
                                        vec![leaf(NodeKind::NumberLiteral, "3"),
                                             leaf(NodeKind::NumberLiteral, "4")])])]));
}

#[test]
fn constrained_variable_definition() {
    let tokens = tokens_of("#var [&int] foo;");
    let (node, _) = parse_directive_var(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::ConstrainedVariableDefinition,
                    "#var",
                    vec![tree(NodeKind::TypeConstraints, "[]", vec![leaf(NodeKind::AInt, "&int")]),
                         leaf(NodeKind::Alnumus, "foo")]));
}

#[test]
fn constrained_variable_definition_with_assignment() {
    let tokens = tokens_of("#var [&int, Big] foo = 1;");
    let (node, _) = parse_directive_var(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::ConstrainedVariableDefinition,
                    "#var",
                    vec![tree(NodeKind::TypeConstraints,
                              "[]",
                              vec![leaf(NodeKind::AInt, "&int"), leaf(NodeKind::Alnumus, "Big")]),
                         leaf(NodeKind::Alnumus, "foo"),
                         leaf(NodeKind::NumberLiteral, "1")]));
}

#[test]
fn variable_definition_requires_a_name_or_constraints() {
    assert!(parse_directive_var(&tokens_of("#var = 1;"), 0).is_err());
    assert!(parse_directive_var(&tokens_of("#var foo = ;"), 0).is_err());
    assert!(parse_directive_var(&tokens_of("#var [] foo;"), 0).is_err());
}

fn return_block(expr: AstNode) -> AstNode {
    tree(NodeKind::FunctionalBlock,
         "",
         vec![tree(NodeKind::Return,
                   "#return",
                   vec![tree(NodeKind::Expression, "", vec![expr])])])
}

#[test]
fn shorthand_void_function_definition() {
    let tokens = tokens_of("#func foo { #return 1; };");
    let (node, next) = parse_directive_func(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::ShorthandVoidMethodDefinition,
                    "#func",
                    vec![leaf(NodeKind::Alnumus, "foo"),
                         return_block(leaf(NodeKind::NumberLiteral, "1"))]));
    assert_eq!(next, tokens.len() - 1);
}

#[test]
fn full_function_definition() {
    let tokens = tokens_of("#func add(x, y) { #return x + y; };");
    let (node, _) = parse_directive_func(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::MethodDefinition,
                    "#func",
                    vec![leaf(NodeKind::Alnumus, "add"),
                         tree(NodeKind::Arguments,
                              "()",
                              vec![leaf(NodeKind::Alnumus, "x"), leaf(NodeKind::Alnumus, "y")]),
                         return_block(tree(NodeKind::Addition,
                                           "+",
                                           vec![leaf(NodeKind::Alnumus, "x"),
                                                leaf(NodeKind::Alnumus, "y")]))]));
}

#[test]
fn full_function_definition_with_no_arguments() {
    let tokens = tokens_of("#func noargs() { #return 1; };");
    let (node, _) = parse_directive_func(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::MethodDefinition,
                    "#func",
                    vec![leaf(NodeKind::Alnumus, "noargs"),
                         tree(NodeKind::Arguments, "()", vec![]),
                         return_block(leaf(NodeKind::NumberLiteral, "1"))]));
}

#[test]
fn constrained_shorthand_function_definition() {
    let tokens = tokens_of("#func [&int] tiny { #return 1; };");
    let (node, _) = parse_directive_func(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::ShorthandConstrainedVoidMethodDefinition,
                    "#func",
                    vec![tree(NodeKind::TypeConstraints, "[]", vec![leaf(NodeKind::AInt, "&int")]),
                         leaf(NodeKind::Alnumus, "tiny"),
                         return_block(leaf(NodeKind::NumberLiteral, "1"))]));
}

#[test]
fn constrained_full_function_definition() {
    let tokens = tokens_of("#func [&int] tiny2(x) { #return x; };");
    let (node, _) = parse_directive_func(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::MethodDefinition,
                    "#func",
                    vec![tree(NodeKind::TypeConstraints, "[]", vec![leaf(NodeKind::AInt, "&int")]),
                         leaf(NodeKind::Alnumus, "tiny2"),
                         tree(NodeKind::Arguments, "()", vec![leaf(NodeKind::Alnumus, "x")]),
                         return_block(leaf(NodeKind::Alnumus, "x"))]));
}

#[test]
fn function_bodies_hold_multiple_statements() {
    let tokens = tokens_of("#func f(x) { #var y = x + 1; #return y; };");
    let (node, _) = parse_directive_func(&tokens, 0).unwrap();
    let body = node.children.last().unwrap();
    assert_eq!(body.kind, NodeKind::FunctionalBlock);
    assert_eq!(body.children.len(), 2);
    assert_eq!(body.children[0].kind, NodeKind::AnonVariableDefinitionAssignment);
    assert_eq!(body.children[1].kind, NodeKind::Return);
}

#[test]
fn function_definition_requires_a_trailing_semicolon() {
    assert!(parse_directive_func(&tokens_of("#func foo { #return 1; }"), 0).is_err());
}

#[test]
fn class_definitions() {
    let tokens = tokens_of("#class Empty {};");
    let (node, next) = parse_directive_class(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::ClassDefinition,
                    "#class",
                    vec![leaf(NodeKind::Alnumus, "Empty"),
                         tree(NodeKind::PragmaticBlock, "", vec![])]));
    assert_eq!(next, tokens.len() - 1);

    let tokens = tokens_of("#class Foo { #var a = 1; #var b = 2; };");
    let (node, _) = parse_directive_class(&tokens, 0).unwrap();
    let body = &node.children[1];
    assert_eq!(body.children.len(), 2);
    assert_eq!(body.children[0].kind, NodeKind::AnonVariableDefinitionAssignment);

    let tokens = tokens_of("#class Bar { #var a = 1; #func get { #return 2; }; };");
    let (node, _) = parse_directive_class(&tokens, 0).unwrap();
    let body = &node.children[1];
    assert_eq!(body.children[1].kind, NodeKind::ShorthandVoidMethodDefinition);
}

#[test]
fn return_statement() {
    let tokens = tokens_of("#return a;");
    let (node, next) = parse_directive_return(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::Return,
                    "#return",
                    vec![tree(NodeKind::Expression, "", vec![leaf(NodeKind::Alnumus, "a")])]));
    assert_eq!(next, tokens.len() - 1);

    assert!(parse_directive_return(&tokens_of("#return ;"), 0).is_err());
}

#[test]
fn print_statement() {
    let tokens = tokens_of("#print a + 1;");
    let (node, next) = parse_directive_print(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::Print,
                    "#print",
                    vec![tree(NodeKind::Expression,
                              "",
                              vec![tree(NodeKind::Addition,
                                        "+",
                                        vec![leaf(NodeKind::Alnumus, "a"),
                                             leaf(NodeKind::NumberLiteral, "1")])])]));
    assert_eq!(next, tokens.len() - 1);

    assert!(parse_directive_print(&tokens_of("#print ;"), 0).is_err());
}

#[test]
fn none_directive() {
    let tokens = tokens_of("#none");
    let (node, next) = parse_directive_none(&tokens, 0).unwrap();
    assert_eq!(node, leaf(NodeKind::NoneLiteral, "#none"));
    assert_eq!(next, 1);
}

#[test]
fn if_statement() {
    let tokens = tokens_of("#if (a == 1) { b = 2; };");
    let (node, next) = parse_directive_if(&tokens, 0).unwrap();
    assert_eq!(node,
               tree(NodeKind::If,
                    "#if",
                    vec![tree(NodeKind::Equality,
                              "==",
                              vec![leaf(NodeKind::Alnumus, "a"),
                                   leaf(NodeKind::NumberLiteral, "1")]),
                         tree(NodeKind::FunctionalBlock,
                              "",
                              vec![tree(NodeKind::SimpleAssignment,
                                        "=",
                                        vec![leaf(NodeKind::Alnumus, "b"),
                                             leaf(NodeKind::NumberLiteral, "2")])])]));
    assert_eq!(next, tokens.len() - 1);
}

#[test]
fn if_else_statement() {
    let tokens = tokens_of("#if (a) { b = 1; } #else { b = 2; };");
    let (node, _) = parse_directive_if(&tokens, 0).unwrap();
    assert_eq!(node.children.len(), 3);
    assert_eq!(node.children[2].kind, NodeKind::FunctionalBlock);
}

#[test]
fn if_elif_else_statement() {
    let tokens = tokens_of("#if (a) { x = 1; } #elif (b) { x = 2; } #else { x = 3; };");
    let (node, next) = parse_directive_if(&tokens, 0).unwrap();
    assert_eq!(next, tokens.len() - 1);
    assert_eq!(node.children.len(), 3);

    let elif = &node.children[2];
    assert_eq!(elif.kind, NodeKind::If);
    assert_eq!(elif.literal, "#elif");
    assert_eq!(elif.children.len(), 3);
    assert_eq!(elif.children[2].kind, NodeKind::FunctionalBlock);
}

#[test]
fn while_for_and_on_statements() {
    let tokens = tokens_of("#while (a < 10) { a = a + 1; };");
    let (node, next) = parse_directive_while(&tokens, 0).unwrap();
    assert_eq!(node.kind, NodeKind::While);
    assert_eq!(node.children[0].kind, NodeKind::Less);
    assert_eq!(node.children[1].kind, NodeKind::FunctionalBlock);
    assert_eq!(next, tokens.len() - 1);

    let tokens = tokens_of("#for (items) { total = total + 1; };");
    let (node, _) = parse_directive_for(&tokens, 0).unwrap();
    assert_eq!(node.kind, NodeKind::For);

    let tokens = tokens_of("#on (selector) { chosen = 1; };");
    let (node, _) = parse_directive_on(&tokens, 0).unwrap();
    assert_eq!(node.kind, NodeKind::On);
}

#[test]
fn control_statements_require_their_pieces() {
    assert!(parse_directive_if(&tokens_of("#if () { b = 2; };"), 0).is_err());
    assert!(parse_directive_if(&tokens_of("#if (a) { b = 2; }"), 0).is_err());
    assert!(parse_directive_while(&tokens_of("#while (a) ;"), 0).is_err());
}

#[test]
fn pragmatic_blocks_accept_declarations_only() {
    let tokens = tokens_of("#var a = 1; #func f { #return a; }; #class C { #var m = 2; }; \
                            #print a;");
    let block = parse_pragmatic_block(&tokens[..tokens.len() - 1]).unwrap();
    let kinds: Vec<NodeKind> = block.children.iter().map(|c| c.kind).collect();
    assert_eq!(kinds,
               vec![NodeKind::AnonVariableDefinitionAssignment,
                    NodeKind::ShorthandVoidMethodDefinition,
                    NodeKind::ClassDefinition,
                    NodeKind::Print]);

    // A #return cannot appear at declaration level.
    let tokens = tokens_of("#return 1;");
    assert!(parse_pragmatic_block(&tokens[..tokens.len() - 1]).is_err());
}

#[test]
fn functional_blocks_accept_statements_only() {
    let tokens = tokens_of("#var a = 1; a = a + 1; #print a; #if (a) { b = 1; }; #return a;");
    let block = parse_functional_block(&tokens[..tokens.len() - 1]).unwrap();
    let kinds: Vec<NodeKind> = block.children.iter().map(|c| c.kind).collect();
    assert_eq!(kinds,
               vec![NodeKind::AnonVariableDefinitionAssignment,
                    NodeKind::SimpleAssignment,
                    NodeKind::Print,
                    NodeKind::If,
                    NodeKind::Return]);

    // A #class cannot appear at statement level.
    let tokens = tokens_of("#class C {};");
    assert!(parse_functional_block(&tokens[..tokens.len() - 1]).is_err());
}

#[test]
fn programs_parse_to_a_pragmatic_root() {
    let tokens = tokens_of("#var a = 1;");
    let program = parse_program(&tokens).unwrap();
    assert_eq!(program.kind, NodeKind::PragmaticBlock);
    assert_eq!(program.children.len(), 1);

    let tokens = tokens_of("#type T = &int;\n#var a = 1;\n#func f(x) { #return x; };\n\
                            #class C { #var m = a; };\na = f(2);");
    let program = parse_program(&tokens).unwrap();
    assert_eq!(program.children.len(), 5);
}

#[test]
fn diagnostics_accumulate_the_production_chain() {
    let tokens = tokens_of("#var = 1;");
    let error = parse_program(&tokens).unwrap_err();
    let message = format!("{error}");
    assert!(message.contains("[parse_program]"), "message: {message}");
    assert!(message.contains("[parse_pragmatic_block]"), "message: {message}");
    assert!(message.contains("[parse_directive_var]"), "message: {message}");
    assert!(message.contains("line 1"), "message: {message}");
}
