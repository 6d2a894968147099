// Integration tests for the TINY scanner and parser

use std::fs;

use tiny_front::parser::ast::{NodeId, NodeKind, SyntaxTree};
use tiny_front::parser::token::TokenKind;
use tiny_front::parser::{parse, LexError, ParseError, Parser, Scanner};

fn describe(tree: &SyntaxTree, id: NodeId) -> String {
    tree.node(id).expect("node exists").to_string()
}

fn child_labels(tree: &SyntaxTree, id: NodeId) -> Vec<String> {
    tree.children(id).iter().map(|&c| describe(tree, c)).collect()
}

#[test]
fn test_peek_repeats_without_consuming() {
    let mut scanner = Scanner::from_source("write  answer");

    let first = scanner.peek().expect("peek failed");
    for _ in 0..5 {
        assert_eq!(scanner.peek().expect("peek failed"), first);
    }
    assert_eq!(first.kind, TokenKind::Write);

    scanner.advance().expect("advance failed");
    let next = scanner.peek().expect("peek failed");
    assert_eq!((next.kind, next.text.as_str()), (TokenKind::Identifier, "answer"));
}

#[test]
fn test_comment_contents_are_not_tokenized() {
    let tokens = Scanner::from_source("{ if }\nx := 1")
        .tokenize()
        .expect("scan failed");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::EndOfFile
        ]
    );
    assert_eq!(tokens[0].text, "x");
    assert_eq!(tokens[2].text, "1");
}

#[test]
fn test_reserved_words_and_identifiers() {
    let tokens = Scanner::from_source("read reader until Until")
        .tokenize()
        .expect("scan failed");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Read,
            TokenKind::Identifier,
            TokenKind::Until,
            TokenKind::Identifier,
            TokenKind::EndOfFile
        ]
    );
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let tree = parse("a := 1 + 2 * 3").expect("Parsing failed");
    let root = tree.root();

    assert_eq!(describe(&tree, root), "assign (a)");
    assert_eq!(tree.children(root).len(), 1);

    let plus = tree.children(root)[0];
    assert_eq!(describe(&tree, plus), "op (+)");
    assert_eq!(child_labels(&tree, plus), vec!["const (1)", "op (*)"]);

    let times = tree.children(plus)[1];
    assert_eq!(child_labels(&tree, times), vec!["const (2)", "const (3)"]);
}

#[test]
fn test_if_children_order() {
    let tree = parse("if x < 1 then write x end").expect("Parsing failed");
    let root = tree.root();

    assert_eq!(tree.node(root).unwrap().kind, NodeKind::If);
    assert_eq!(child_labels(&tree, root), vec!["op (<)", "write"]);

    let condition = tree.children(root)[0];
    assert_eq!(child_labels(&tree, condition), vec!["id (x)", "const (1)"]);
}

#[test]
fn test_repeat_condition_precedes_body() {
    let tree = parse("repeat x := x - 1 until x = 0").expect("Parsing failed");
    let root = tree.root();

    assert_eq!(tree.node(root).unwrap().kind, NodeKind::Repeat);
    assert_eq!(child_labels(&tree, root), vec!["op (=)", "assign (x)"]);
}

#[test]
fn test_colon_without_equals_is_a_lexical_error() {
    let err = parse("x :1").unwrap_err();
    match err {
        ParseError::Lexical(LexError::MalformedAssign { found, location }) => {
            assert_eq!(found, Some('1'));
            assert_eq!((location.line, location.column), (1, 3));
        }
        other => panic!("Expected lexical error, got {:?}", other),
    }
}

#[test]
fn test_missing_condition_names_then() {
    let err = parse("if then end").unwrap_err();
    let token = err.token().expect("syntax error carries a token");
    assert_eq!(token.kind, TokenKind::Then);
    assert!(err.to_string().contains("THEN"), "message was: {}", err);

    // With a condition the parser gets past `then` and stops at the empty branch
    let err = parse("if x then end").unwrap_err();
    assert_eq!(err.token().map(|t| t.kind), Some(TokenKind::End));
}

#[test]
fn test_statement_sequence_is_a_child_chain() {
    let tree = parse("read x; write x; x := x + 1").expect("Parsing failed");

    let first = tree.root();
    assert_eq!(describe(&tree, first), "read (x)");

    let statements = tree.sequence(first);
    assert_eq!(statements.len(), 3);
    let (second, third) = (statements[1], statements[2]);
    assert_eq!(describe(&tree, second), "write");
    assert_eq!(describe(&tree, third), "assign (x)");

    // read has the write statement as its only child
    assert_eq!(tree.children(first), &[second]);
    // write holds its expression, then the next statement
    let write_children = tree.children(second);
    assert_eq!(write_children.len(), 2);
    assert_eq!(describe(&tree, write_children[0]), "id (x)");
    assert_eq!(write_children[1], third);

    assert_eq!(tree.same_level(), &[(first, second), (second, third)]);
    assert_eq!(tree.next_in_sequence(third), None);
}

#[test]
fn test_else_branch_is_its_own_sequence() {
    let tree = parse("if a then read b else read c; read d end").expect("Parsing failed");
    let branches = tree.children(tree.root());
    assert_eq!(branches.len(), 3);

    assert_eq!(tree.sequence(branches[1]).len(), 1);
    let else_branch = tree.sequence(branches[2]);
    let labels: Vec<String> = else_branch.iter().map(|&id| describe(&tree, id)).collect();
    assert_eq!(labels, vec!["read (c)", "read (d)"]);
}

#[test]
fn test_trailing_tokens_are_rejected() {
    let err = parse("x := 1 y := 2").unwrap_err();
    match err {
        ParseError::UnexpectedToken { expected, found } => {
            assert_eq!(expected, Some(TokenKind::EndOfFile));
            assert_eq!(found.text, "y");
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_comparison_is_not_associative() {
    let err = parse("write x < 1 < 2").unwrap_err();
    assert_eq!(err.token().map(|t| t.kind), Some(TokenKind::LessThan));
}

#[test]
fn test_node_ids_follow_creation_order() {
    let tree = parse("if a < b then repeat c := c * (d - 1) until c > 9 end").expect("Parsing failed");

    for (index, node) in tree.nodes().iter().enumerate() {
        assert_eq!(node.id, index);

        match node.kind {
            // Created before anything they contain
            NodeKind::If | NodeKind::Repeat | NodeKind::Assign | NodeKind::Write => {
                assert!(node.children.iter().all(|&c| c > node.id));
            }
            // Created between the left and the right operand
            NodeKind::Op => {
                assert_eq!(node.children.len(), 2);
                assert!(node.children[0] < node.id);
                assert!(node.children[1] > node.id);
            }
            NodeKind::Read | NodeKind::Const | NodeKind::Id => {}
        }
    }
}

#[test]
fn test_factorial_sample() {
    let source = fs::read_to_string("samples/factorial.tiny").expect("Failed to read sample file");
    let tree = parse(&source).expect("Parsing failed");

    assert_eq!(tree.len(), 21);
    insta::assert_snapshot!(tree.to_string().trim_end(), @r"
    read (x)
    if
      op (<)
        const (0)
        id (x)
      assign (fact)
        const (1)
      repeat
        op (=)
          id (x)
          const (0)
        assign (fact)
          op (*)
            id (fact)
            id (x)
        assign (x)
          op (-)
            id (x)
            const (1)
      write
        id (fact)
    ");
}

#[test]
fn test_file_and_memory_sources_agree() {
    let source = fs::read_to_string("samples/factorial.tiny").expect("Failed to read sample file");
    let from_memory = parse(&source).expect("Parsing failed");
    let from_file = Parser::open("samples/factorial.tiny")
        .expect("Parser creation failed")
        .parse_program()
        .expect("Parsing failed");

    assert_eq!(from_file.nodes(), from_memory.nodes());
    assert_eq!(from_file.root(), from_memory.root());
}

#[test]
fn test_bad_assign_sample_reports_location() {
    let err = Parser::open("samples/bad_assign.tiny")
        .expect("Parser creation failed")
        .parse_program()
        .unwrap_err();

    assert!(matches!(err, ParseError::Lexical(_)));
    assert_eq!(
        err.to_string(),
        "Lexer error at line 2, column 7: expected '=' after ':', found ' '"
    );
}
