//! Property tests for spec.md section 8 ("Testable properties") on the
//! schema side: type-reference closure after construction, validator
//! soundness against the known rule set, and input-object cycle detection
//! over randomly generated non-null reference graphs.

use proptest::prelude::*;

use gql_schema::{build_schema, NamedType, Type};

const KNOWN_VALIDATION_MESSAGES: &[&str] = &[
    "Query root type must be provided.",
    "must be different",
    "expected but",
    "does not provide it",
    "must define one or more fields",
    "must define one or more values",
    "Cannot reference Input Object",
    "can only include",
    "must be Input Type",
    "must be Output Type",
    "cannot be deprecated",
    "must not begin with",
    "must only implement",
    "must implement",
];

fn is_known_message(message: &str) -> bool {
    KNOWN_VALIDATION_MESSAGES
        .iter()
        .any(|known| message.contains(known))
}

fn walk_type_refs(ty: &Type, schema: &gql_schema::Schema) {
    match ty {
        Type::Named(r) => {
            // Panics if the reference escaped construction unresolved —
            // the property under test is that this never happens.
            let _ = r.resolve(schema);
        }
        Type::List(inner) | Type::NonNull(inner) => walk_type_refs(inner.as_ref(), schema),
    }
}

fn assert_all_type_refs_resolve(schema: &gql_schema::Schema) {
    for ty in schema.types() {
        match ty {
            NamedType::Object(t) => {
                for iface in &t.interfaces {
                    let _ = iface.resolve(schema);
                }
                for field in t.fields.values() {
                    walk_type_refs(&field.ty, schema);
                    for arg in field.arguments.values() {
                        walk_type_refs(&arg.ty, schema);
                    }
                }
            }
            NamedType::Interface(t) => {
                for iface in &t.interfaces {
                    let _ = iface.resolve(schema);
                }
                for field in t.fields.values() {
                    walk_type_refs(&field.ty, schema);
                    for arg in field.arguments.values() {
                        walk_type_refs(&arg.ty, schema);
                    }
                }
            }
            NamedType::Union(t) => {
                for member in &t.types {
                    let _ = member.resolve(schema);
                }
            }
            NamedType::InputObject(t) => {
                for field in t.fields.values() {
                    walk_type_refs(&field.ty, schema);
                }
            }
            NamedType::Scalar(_) | NamedType::Enum(_) => {}
        }
    }
}

fn type_name(i: usize) -> String {
    format!("T{i}")
}

/// Builds SDL for `n` input object types where `edges[i][j]` means `Ti`
/// declares a non-null field referencing `Tj`. Every type also carries a
/// nullable scalar field so it's never empty regardless of its edges.
fn input_object_sdl(n: usize, edges: &[Vec<bool>]) -> String {
    let mut sdl = String::new();
    for i in 0..n {
        sdl.push_str(&format!("input {} {{\n  filler: String\n", type_name(i)));
        for j in 0..n {
            if edges[i][j] {
                sdl.push_str(&format!("  to{j}: {}!\n", type_name(j)));
            }
        }
        sdl.push_str("}\n\n");
    }
    sdl.push_str("type Query {\n  ok: Boolean\n}\n");
    sdl
}

/// Ground-truth cycle check over the same non-null edge set the validator
/// is expected to detect a cycle in, independent of `gql-schema`'s own
/// implementation.
fn has_non_null_cycle(n: usize, edges: &[Vec<bool>]) -> bool {
    fn visit(n: usize, edges: &[Vec<bool>], node: usize, on_stack: &mut [bool], visited: &mut [bool]) -> bool {
        on_stack[node] = true;
        visited[node] = true;
        for next in 0..n {
            if edges[node][next] {
                if on_stack[next] {
                    return true;
                }
                if !visited[next] && visit(n, edges, next, on_stack, visited) {
                    return true;
                }
            }
        }
        on_stack[node] = false;
        false
    }

    let mut visited = vec![false; n];
    for start in 0..n {
        if !visited[start] {
            let mut on_stack = vec![false; n];
            if visit(n, edges, start, &mut on_stack, &mut visited) {
                return true;
            }
        }
    }
    false
}

fn edges_strategy(n: usize) -> impl Strategy<Value = Vec<Vec<bool>>> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), n), n)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn schemas_built_from_sdl_have_no_dangling_references(
        object_count in 1usize..4,
        edges in edges_strategy(3),
    ) {
        let n = object_count.max(1).min(3);
        let sdl = input_object_sdl(n, &edges);
        let schema = build_schema(sdl.as_str()).expect("generated SDL always builds");
        assert_all_type_refs_resolve(&schema);
    }

    #[test]
    fn validation_errors_are_always_recognized_rules(
        edges in edges_strategy(3),
    ) {
        let sdl = input_object_sdl(3, &edges);
        let schema = build_schema(sdl.as_str()).expect("generated SDL always builds");
        for error in schema.validate() {
            prop_assert!(
                is_known_message(&error.message),
                "unrecognized validation message: {}",
                error.message
            );
        }
    }

    #[test]
    fn input_object_cycles_are_detected_iff_present(
        edges in edges_strategy(3),
    ) {
        let sdl = input_object_sdl(3, &edges);
        let schema = build_schema(sdl.as_str()).expect("generated SDL always builds");
        let errors = schema.validate();
        let reported_cycle = errors.iter().any(|e| e.message.contains("within itself"));
        let expected_cycle = has_non_null_cycle(3, &edges);
        prop_assert_eq!(reported_cycle, expected_cycle);
    }
}

#[test]
fn missing_query_root_is_always_reported() {
    let schema = build_schema("type Thing { ok: String }").unwrap();
    assert!(schema
        .validate()
        .iter()
        .any(|e| e.message == "Query root type must be provided."));
}
