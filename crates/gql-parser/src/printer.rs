//! Canonical text rendering of an AST.
//!
//! `print` is a total function over every node kind: it never fails, and it
//! does not attempt to reproduce the original source formatting — only a
//! canonical rendering such that `parse(print(parse(src)))` is structurally
//! equal to `parse(src)` (location metadata aside). Two-space indentation,
//! an 80-character wrap threshold for argument lists, and the block-string
//! heuristic of [`crate::lexer::block_string_value`] are the only formatting
//! decisions this module makes; everything else falls out of the grammar.

use crate::ast::*;

/// Prints a full document. The usual entry point.
pub fn print(document: &Document) -> String {
    print_document(document)
}

/// Prints any AST node, dispatching on its kind. Used by the visitor (and
/// anything else holding a generic [`Node`]) rather than a concrete type.
pub fn print_node(node: &Node) -> String {
    match node {
        Node::Document(d) => print_document(d),
        Node::Definition(d) => print_definition(d),
        Node::OperationDefinition(op) => print_operation_definition(op),
        Node::VariableDefinition(vd) => print_variable_definition(vd),
        Node::SelectionSet(ss) => print_selection_set(ss),
        Node::Selection(s) => print_selection(s),
        Node::Field(f) => print_field(f),
        Node::Argument(a) => print_argument(a),
        Node::FragmentSpread(fs) => print_fragment_spread(fs),
        Node::InlineFragment(inf) => print_inline_fragment(inf),
        Node::FragmentDefinition(fd) => print_fragment_definition(fd),
        Node::NamedTypeCondition(tc) => format!("on {}", tc.name.value),
        Node::Directive(d) => print_directive(d),
        Node::Name(n) => print_name(n),
        Node::NamedType(t) => t.name.value.clone(),
        Node::ListType(t) => format!("[{}]", print_type(&t.inner)),
        Node::NonNullType(t) => format!("{}!", print_nullable_type(&t.inner)),
        Node::Type(t) => print_type(t),
        Node::Value(v) => print_value(v),
        Node::ListValue(v) => print_value(&Value::List(v.clone())),
        Node::ObjectValue(v) => print_value(&Value::Object(v.clone())),
        Node::ObjectField(f) => format!("{}: {}", f.name.value, print_value(&f.value)),
        Node::TypeSystem(d) => print_type_system_definition_or_extension(d),
    }
}

// --- layout helpers -----------------------------------------------------

fn join_space(parts: Vec<String>) -> String {
    parts.into_iter().filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ")
}

fn indent(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    s.lines().map(|l| format!("  {l}")).collect::<Vec<_>>().join("\n")
}

/// Renders a `{ ... }` block with one item per line, or `""` if there are no
/// items at all (callers decide whether an empty block still prints `{}`).
fn block(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!("{{\n{}\n}}", indent(&items.join("\n")))
    }
}

/// Parenthesized, comma-separated list, wrapping to one-per-line once the
/// single-line rendering (parens included) would exceed 80 characters.
fn wrapped_list(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let single_line = format!("({})", items.join(", "));
    if single_line.len() <= 80 {
        single_line
    } else {
        format!("(\n{}\n)", indent(&items.join("\n")))
    }
}

// --- executable document -------------------------------------------------

fn print_document(doc: &Document) -> String {
    doc.definitions.iter().map(print_definition).collect::<Vec<_>>().join("\n\n")
}

fn print_definition(def: &Definition) -> String {
    match def {
        Definition::Operation(op) => print_operation_definition(op),
        Definition::Fragment(fd) => print_fragment_definition(fd),
        Definition::TypeSystem(ts) => print_type_system_definition_or_extension(ts),
    }
}

fn print_operation_definition(op: &OperationDefinition) -> String {
    let is_short_form = op.operation == OperationType::Query
        && op.name.is_none()
        && op.variable_definitions.is_empty()
        && op.directives.is_empty();
    if is_short_form {
        return print_selection_set(&op.selection_set);
    }

    let op_kind = match op.operation {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    };
    let name = op.name.as_ref().map(print_name).unwrap_or_default();
    let var_defs = wrapped_list(
        &op.variable_definitions.iter().map(print_variable_definition).collect::<Vec<_>>(),
    );
    let head = format!("{op_kind}{}{var_defs}", if name.is_empty() { String::new() } else { format!(" {name}") });
    let directives = print_directives(&op.directives);
    join_space(vec![head, directives, print_selection_set(&op.selection_set)])
}

fn print_variable_definition(vd: &VariableDefinition) -> String {
    let default = vd
        .default_value
        .as_ref()
        .map(|v| format!(" = {}", print_value(v)))
        .unwrap_or_default();
    let directives = print_directives(&vd.directives);
    join_space(vec![
        format!("${}: {}{default}", vd.variable.value, print_type(&vd.ty)),
        directives,
    ])
}

fn print_directives(directives: &[Directive]) -> String {
    directives.iter().map(print_directive).collect::<Vec<_>>().join(" ")
}

fn print_directive(d: &Directive) -> String {
    let args = wrapped_list(&d.arguments.iter().map(print_argument).collect::<Vec<_>>());
    format!("@{}{args}", d.name.value)
}

fn print_argument(a: &Argument) -> String {
    format!("{}: {}", a.name.value, print_value(&a.value))
}

fn print_selection_set(ss: &SelectionSet) -> String {
    block(&ss.selections.iter().map(print_selection).collect::<Vec<_>>())
}

fn print_selection(sel: &Selection) -> String {
    match sel {
        Selection::Field(f) => print_field(f),
        Selection::FragmentSpread(fs) => print_fragment_spread(fs),
        Selection::InlineFragment(inf) => print_inline_fragment(inf),
    }
}

fn print_field(f: &Field) -> String {
    let alias = f.alias.as_ref().map(|a| format!("{}: ", a.value)).unwrap_or_default();
    let args = wrapped_list(&f.arguments.iter().map(print_argument).collect::<Vec<_>>());
    let head = format!("{alias}{}{args}", f.name.value);
    let directives = print_directives(&f.directives);
    let selection_set = f.selection_set.as_ref().map(print_selection_set).unwrap_or_default();
    join_space(vec![head, directives, selection_set])
}

fn print_fragment_spread(fs: &FragmentSpread) -> String {
    let directives = print_directives(&fs.directives);
    join_space(vec![format!("...{}", fs.fragment_name.value), directives])
}

fn print_inline_fragment(inf: &InlineFragment) -> String {
    let type_condition = inf
        .type_condition
        .as_ref()
        .map(|tc| format!("on {}", tc.name.value))
        .unwrap_or_default();
    let directives = print_directives(&inf.directives);
    join_space(vec![
        "...".to_string(),
        type_condition,
        directives,
        print_selection_set(&inf.selection_set),
    ])
}

fn print_fragment_definition(fd: &FragmentDefinition) -> String {
    let directives = print_directives(&fd.directives);
    join_space(vec![
        format!("fragment {} on {}", fd.name.value, fd.type_condition.name.value),
        directives,
        print_selection_set(&fd.selection_set),
    ])
}

fn print_name(n: &Name) -> String {
    n.value.clone()
}

// --- types -----------------------------------------------------------

fn print_type(ty: &Type) -> String {
    match ty {
        Type::Named(t) => t.name.value.clone(),
        Type::List(t) => format!("[{}]", print_type(&t.inner)),
        Type::NonNull(t) => format!("{}!", print_nullable_type(&t.inner)),
    }
}

fn print_nullable_type(ty: &NullableType) -> String {
    match ty {
        NullableType::Named(t) => t.name.value.clone(),
        NullableType::List(t) => format!("[{}]", print_type(&t.inner)),
    }
}

// --- values -----------------------------------------------------------

fn print_value(value: &Value) -> String {
    match value {
        Value::Variable(v) => format!("${}", v.name.value),
        Value::Int(v) => v.value.to_string(),
        Value::Float(v) => print_float(v.value),
        Value::String(v) => print_string_value(v),
        Value::Boolean(v) => v.value.to_string(),
        Value::Null(_) => "null".to_string(),
        Value::Enum(v) => v.value.clone(),
        Value::List(v) => format!("[{}]", v.values.iter().map(print_value).collect::<Vec<_>>().join(", ")),
        Value::Object(v) => format!(
            "{{{}}}",
            v.fields
                .iter()
                .map(|f| format!("{}: {}", f.name.value, print_value(&f.value)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn print_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn print_string_value(v: &StringValue) -> String {
    if v.block && is_printable_as_block_string(&v.value) {
        print_block_string(&v.value)
    } else {
        print_escaped_string(&v.value)
    }
}

/// A value round-trips through the common-indent-stripping algorithm
/// unchanged, and contains no control characters other than tab/LF, iff it
/// is safe to print as a block string. Reuses the lexer's normalization
/// routine rather than re-deriving the same rules here.
fn is_printable_as_block_string(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    if value.chars().any(|c| (c as u32) < 0x20 && c != '\t' && c != '\n') {
        return false;
    }
    crate::lexer::block_string_value(&format!("\n{value}\n")) == value
}

fn print_block_string(value: &str) -> String {
    let is_single_line = !value.contains('\n');
    let has_leading_space = value.starts_with(' ') || value.starts_with('\t');
    let has_trailing_quote = value.ends_with('"');
    let has_trailing_slash = value.ends_with('\\');
    let print_as_multiple_lines = !is_single_line || has_trailing_quote || has_trailing_slash;

    let mut body = String::new();
    if print_as_multiple_lines && !(is_single_line && has_leading_space) {
        body.push('\n');
    }
    body.push_str(value);
    if print_as_multiple_lines {
        body.push('\n');
    }
    format!("\"\"\"{}\"\"\"", body.replace("\"\"\"", "\\\"\"\""))
}

fn print_escaped_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || (0x7f..=0x9f).contains(&(c as u32)) => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// --- type system --------------------------------------------------------

fn print_description(desc: &Description) -> String {
    match desc {
        None => String::new(),
        Some(s) => {
            let use_block = s.block || s.value.contains('\n') || s.value.len() > 70;
            let body = if use_block {
                print_block_string(&s.value)
            } else {
                print_escaped_string(&s.value)
            };
            format!("{body}\n")
        }
    }
}

fn print_type_system_definition_or_extension(def: &TypeSystemDefinitionOrExtension) -> String {
    use TypeSystemDefinitionOrExtension as D;
    match def {
        D::Schema(d) => print_schema_definition(d),
        D::Scalar(d) => print_scalar_type_definition(d),
        D::Object(d) => print_object_type_definition(d),
        D::Interface(d) => print_interface_type_definition(d),
        D::Union(d) => print_union_type_definition(d),
        D::Enum(d) => print_enum_type_definition(d),
        D::InputObject(d) => print_input_object_type_definition(d),
        D::Directive(d) => print_directive_definition(d),
        D::Extension(ext) => print_type_extension(ext),
    }
}

fn print_type_extension(ext: &TypeExtension) -> String {
    use TypeExtension as E;
    match ext {
        E::Schema(d) => print_schema_extension(d),
        E::Scalar(d) => print_scalar_type_extension(d),
        E::Object(d) => print_object_type_extension(d),
        E::Interface(d) => print_interface_type_extension(d),
        E::Union(d) => print_union_type_extension(d),
        E::Enum(d) => print_enum_type_extension(d),
        E::InputObject(d) => print_input_object_type_extension(d),
    }
}

fn print_root_operation_type(op: &RootOperationTypeDefinition) -> String {
    let kind = match op.operation {
        OperationKind::Query => "query",
        OperationKind::Mutation => "mutation",
        OperationKind::Subscription => "subscription",
    };
    format!("{kind}: {}", op.named_type.value)
}

fn print_schema_definition(d: &SchemaDefinition) -> String {
    let directives = print_directives(&d.directives);
    let body = block(&d.root_operation_types.iter().map(print_root_operation_type).collect::<Vec<_>>());
    format!("{}{}", print_description(&d.description), join_space(vec!["schema".to_string(), directives, body]))
}

fn print_schema_extension(d: &SchemaExtension) -> String {
    let directives = print_directives(&d.directives);
    let body = block(&d.root_operation_types.iter().map(print_root_operation_type).collect::<Vec<_>>());
    join_space(vec!["extend schema".to_string(), directives, body])
}

fn print_scalar_type_definition(d: &ScalarTypeDefinition) -> String {
    let directives = print_directives(&d.directives);
    format!(
        "{}{}",
        print_description(&d.description),
        join_space(vec![format!("scalar {}", d.name.value), directives])
    )
}

fn print_scalar_type_extension(d: &ScalarTypeExtension) -> String {
    let directives = print_directives(&d.directives);
    join_space(vec![format!("extend scalar {}", d.name.value), directives])
}

fn print_implements_interfaces(interfaces: &[Name]) -> String {
    if interfaces.is_empty() {
        String::new()
    } else {
        format!(
            "implements {}",
            interfaces.iter().map(|n| n.value.clone()).collect::<Vec<_>>().join(" & ")
        )
    }
}

fn print_field_definition(f: &FieldDefinition) -> String {
    let args = wrapped_list(&f.arguments.iter().map(print_input_value_definition).collect::<Vec<_>>());
    let directives = print_directives(&f.directives);
    let line = join_space(vec![
        format!("{}{args}: {}", f.name.value, print_type(&f.ty)),
        directives,
    ]);
    format!("{}{line}", print_description(&f.description))
}

fn print_input_value_definition(v: &InputValueDefinition) -> String {
    let default = v
        .default_value
        .as_ref()
        .map(|val| format!(" = {}", print_value(val)))
        .unwrap_or_default();
    let directives = print_directives(&v.directives);
    let line = join_space(vec![
        format!("{}: {}{default}", v.name.value, print_type(&v.ty)),
        directives,
    ]);
    format!("{}{line}", print_description(&v.description))
}

fn print_object_type_definition(d: &ObjectTypeDefinition) -> String {
    let implements = print_implements_interfaces(&d.interfaces);
    let directives = print_directives(&d.directives);
    let fields = block(&d.fields.iter().map(print_field_definition).collect::<Vec<_>>());
    let head = join_space(vec![format!("type {}", d.name.value), implements, directives, fields]);
    format!("{}{head}", print_description(&d.description))
}

fn print_object_type_extension(d: &ObjectTypeExtension) -> String {
    let implements = print_implements_interfaces(&d.interfaces);
    let directives = print_directives(&d.directives);
    let fields = block(&d.fields.iter().map(print_field_definition).collect::<Vec<_>>());
    join_space(vec![format!("extend type {}", d.name.value), implements, directives, fields])
}

fn print_interface_type_definition(d: &InterfaceTypeDefinition) -> String {
    let implements = print_implements_interfaces(&d.interfaces);
    let directives = print_directives(&d.directives);
    let fields = block(&d.fields.iter().map(print_field_definition).collect::<Vec<_>>());
    let head = join_space(vec![format!("interface {}", d.name.value), implements, directives, fields]);
    format!("{}{head}", print_description(&d.description))
}

fn print_interface_type_extension(d: &InterfaceTypeExtension) -> String {
    let implements = print_implements_interfaces(&d.interfaces);
    let directives = print_directives(&d.directives);
    let fields = block(&d.fields.iter().map(print_field_definition).collect::<Vec<_>>());
    join_space(vec![format!("extend interface {}", d.name.value), implements, directives, fields])
}

fn print_union_type_definition(d: &UnionTypeDefinition) -> String {
    let directives = print_directives(&d.directives);
    let members = print_union_member_types(&d.member_types);
    let head = join_space(vec![format!("union {}", d.name.value), directives, members]);
    format!("{}{head}", print_description(&d.description))
}

fn print_union_type_extension(d: &UnionTypeExtension) -> String {
    let directives = print_directives(&d.directives);
    let members = print_union_member_types(&d.member_types);
    join_space(vec![format!("extend union {}", d.name.value), directives, members])
}

fn print_union_member_types(members: &[Name]) -> String {
    if members.is_empty() {
        String::new()
    } else {
        format!("= {}", members.iter().map(|n| n.value.clone()).collect::<Vec<_>>().join(" | "))
    }
}

fn print_enum_type_definition(d: &EnumTypeDefinition) -> String {
    let directives = print_directives(&d.directives);
    let values = block(&d.values.iter().map(print_enum_value_definition).collect::<Vec<_>>());
    let head = join_space(vec![format!("enum {}", d.name.value), directives, values]);
    format!("{}{head}", print_description(&d.description))
}

fn print_enum_type_extension(d: &EnumTypeExtension) -> String {
    let directives = print_directives(&d.directives);
    let values = block(&d.values.iter().map(print_enum_value_definition).collect::<Vec<_>>());
    join_space(vec![format!("extend enum {}", d.name.value), directives, values])
}

fn print_enum_value_definition(v: &EnumValueDefinition) -> String {
    let directives = print_directives(&v.directives);
    let line = join_space(vec![v.value.value.clone(), directives]);
    format!("{}{line}", print_description(&v.description))
}

fn print_input_object_type_definition(d: &InputObjectTypeDefinition) -> String {
    let directives = print_directives(&d.directives);
    let fields = block(&d.fields.iter().map(print_input_value_definition).collect::<Vec<_>>());
    let head = join_space(vec![format!("input {}", d.name.value), directives, fields]);
    format!("{}{head}", print_description(&d.description))
}

fn print_input_object_type_extension(d: &InputObjectTypeExtension) -> String {
    let directives = print_directives(&d.directives);
    let fields = block(&d.fields.iter().map(print_input_value_definition).collect::<Vec<_>>());
    join_space(vec![format!("extend input {}", d.name.value), directives, fields])
}

fn print_directive_definition(d: &DirectiveDefinition) -> String {
    let args = wrapped_list(&d.arguments.iter().map(print_input_value_definition).collect::<Vec<_>>());
    let repeatable = if d.repeatable { " repeatable" } else { "" };
    let locations = d.locations.iter().map(directive_location_name).collect::<Vec<_>>().join(" | ");
    format!(
        "{}directive @{}{args}{repeatable} on {locations}",
        print_description(&d.description),
        d.name.value
    )
}

fn directive_location_name(loc: &DirectiveLocation) -> &'static str {
    use DirectiveLocation::*;
    match loc {
        Query => "QUERY",
        Mutation => "MUTATION",
        Subscription => "SUBSCRIPTION",
        Field => "FIELD",
        FragmentDefinition => "FRAGMENT_DEFINITION",
        FragmentSpread => "FRAGMENT_SPREAD",
        InlineFragment => "INLINE_FRAGMENT",
        VariableDefinition => "VARIABLE_DEFINITION",
        Schema => "SCHEMA",
        Scalar => "SCALAR",
        Object => "OBJECT",
        FieldDefinition => "FIELD_DEFINITION",
        ArgumentDefinition => "ARGUMENT_DEFINITION",
        Interface => "INTERFACE",
        Union => "UNION",
        Enum => "ENUM",
        EnumValue => "ENUM_VALUE",
        InputObject => "INPUT_OBJECT",
        InputFieldDefinition => "INPUT_FIELD_DEFINITION",
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, ParserOptions};

    fn roundtrip(src: &str) -> String {
        let doc = parse(src, ParserOptions::default()).unwrap();
        super::print(&doc)
    }

    #[test]
    fn short_form_query_prints_just_the_selection_set() {
        assert_eq!(roundtrip("{ hello }"), "{\n  hello\n}");
    }

    #[test]
    fn named_query_with_variables_prints_full_form() {
        let printed = roundtrip("query Foo($x: Int = 1) { field(arg: $x) }");
        assert_eq!(printed, "query Foo($x: Int = 1) {\n  field(arg: $x)\n}");
    }

    #[test]
    fn nested_selection_sets_indent_two_spaces() {
        let printed = roundtrip("{ a { b { c } } }");
        assert_eq!(printed, "{\n  a {\n    b {\n      c\n    }\n  }\n}");
    }

    #[test]
    fn print_is_idempotent() {
        let doc = crate::parse("{ a(x: 1, y: [1, 2], z: {k: \"v\"}) }", ParserOptions::default()).unwrap();
        let once = super::print(&doc);
        let doc2 = crate::parse(&once, ParserOptions::default()).unwrap();
        let twice = super::print(&doc2);
        assert_eq!(once, twice);
    }

    #[test]
    fn block_string_value_prints_as_triple_quoted() {
        let doc = crate::parse("{ a(x: \"\"\"hello\nworld\"\"\") }", ParserOptions::default()).unwrap();
        let printed = super::print(&doc);
        assert!(printed.contains("\"\"\""));
        assert!(printed.contains("hello"));
    }

    #[test]
    fn object_type_definition_with_implements_and_directives() {
        let printed = roundtrip(
            "type Foo implements Bar & Baz @tag(name: \"x\") {\n  id: ID!\n}",
        );
        assert_eq!(
            printed,
            "type Foo implements Bar & Baz @tag(name: \"x\") {\n  id: ID!\n}"
        );
    }

    #[test]
    fn directive_definition_prints_locations() {
        let printed = roundtrip("directive @cached(ttl: Int) repeatable on FIELD | OBJECT");
        assert_eq!(printed, "directive @cached(ttl: Int) repeatable on FIELD | OBJECT");
    }

    #[test]
    fn long_argument_list_wraps() {
        let printed = roundtrip(
            "{ field(argumentOne: \"aaaaaaaaaa\", argumentTwo: \"bbbbbbbbbb\", argumentThree: \"cccccccccc\") }",
        );
        assert!(printed.contains("field(\n"));
    }
}
