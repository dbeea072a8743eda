//! `validate_schema`: the accumulate-don't-throw structural checker.
//!
//! Grounded on the teacher's validator context pattern — a single mutable
//! `(schema, errors)` pair threaded through one function per rule family,
//! each of which only ever *appends* to `errors` — generalized here to
//! GraphQL's own rule set (spec section 4.8) instead of the teacher's
//! domain-specific ones. One function per "concern" heading in that
//! section keeps the mapping from rule to code obvious.

use std::sync::Arc;

use gql_parser::ast::Location;

use crate::error::ValidationError;
use crate::types::{FieldDefinition, InputValueDefinition, NamedType, Type};
use crate::Schema;

/// Runs every structural rule against `schema` and returns every violation
/// found. Never panics, never short-circuits on the first failure.
pub fn validate_schema(schema: &Schema) -> Vec<ValidationError> {
    let mut ctx = ValidationContext { schema, errors: Vec::new() };
    ctx.check_root_types();
    ctx.check_directives();
    ctx.check_types();
    ctx.check_interface_implementations();
    ctx.check_input_object_cycles();
    ctx.errors
}

struct ValidationContext<'a> {
    schema: &'a Schema,
    errors: Vec<ValidationError>,
}

impl<'a> ValidationContext<'a> {
    fn report(&mut self, message: impl Into<String>, locations: Vec<Arc<Location>>) {
        self.errors.push(ValidationError::new(message, locations));
    }

    fn check_root_types(&mut self) {
        if self.schema.query_type().is_none() {
            self.report("Query root type must be provided.", Vec::new());
        }
        let roots = [
            ("query", self.schema.query_type()),
            ("mutation", self.schema.mutation_type()),
            ("subscription", self.schema.subscription_type()),
        ];
        for i in 0..roots.len() {
            for j in (i + 1)..roots.len() {
                let (a_label, a_ty) = roots[i];
                let (b_label, b_ty) = roots[j];
                if let (Some(a), Some(b)) = (a_ty, b_ty) {
                    if a.name() == b.name() {
                        self.report(
                            format!(
                                "All root types must be different, \"{}\" type is used as {} and {} root types.",
                                a.name(),
                                a_label,
                                b_label
                            ),
                            Vec::new(),
                        );
                    }
                }
            }
        }
    }

    fn check_directives(&mut self) {
        for directive in self.schema.directives() {
            if directive.name.starts_with("__") {
                self.report(
                    format!("Name {:?} must not begin with \"__\", which is reserved by GraphQL introspection.", directive.name),
                    Vec::new(),
                );
            }
            if directive.locations.is_empty() {
                self.report(format!("Directive @{} must include 1 or more locations.", directive.name), Vec::new());
            }
            self.check_argument_names(&directive.arguments, &format!("@{}", directive.name));
            for arg in directive.arguments.values() {
                if arg.is_required() && arg.deprecation_reason.is_some() {
                    self.report(
                        format!("Required argument {}(@{}:) cannot be deprecated.", arg.name, directive.name),
                        Vec::new(),
                    );
                }
            }
        }
    }

    fn check_argument_names(&mut self, arguments: &indexmap::IndexMap<String, InputValueDefinition>, owner: &str) {
        for arg in arguments.values() {
            if arg.name.starts_with("__") {
                self.report(
                    format!("Name {:?} must not begin with \"__\", which is reserved by GraphQL introspection (argument of {owner}).", arg.name),
                    Vec::new(),
                );
            }
        }
    }

    fn check_types(&mut self) {
        for ty in self.schema.types() {
            if ty.is_introspection_type() {
                continue;
            }
            if ty.name().starts_with("__") {
                self.report(
                    format!("Name {:?} must not begin with \"__\", which is reserved by GraphQL introspection.", ty.name()),
                    Vec::new(),
                );
            }
            match ty {
                NamedType::Object(t) => {
                    self.check_fields_nonempty(&t.name, t.fields.len());
                    self.check_fields(&t.name, &t.fields);
                }
                NamedType::Interface(t) => {
                    self.check_fields_nonempty(&t.name, t.fields.len());
                    self.check_fields(&t.name, &t.fields);
                }
                NamedType::InputObject(t) => {
                    if t.fields.is_empty() {
                        self.report(
                            format!("Input Object type {:?} must define one or more fields.", t.name),
                            Vec::new(),
                        );
                    }
                    for field in t.fields.values() {
                        if field.name.starts_with("__") {
                            self.report(
                                format!("Name {:?} must not begin with \"__\", which is reserved by GraphQL introspection.", field.name),
                                Vec::new(),
                            );
                        }
                        if !self.resolves_to_input_type(&field.ty) {
                            self.report(
                                format!(
                                    "The type of {}.{} must be Input Type but got: {}.",
                                    t.name,
                                    field.name,
                                    describe_type(&field.ty)
                                ),
                                Vec::new(),
                            );
                        }
                        if field.is_required() && field.deprecation_reason.is_some() {
                            self.report(
                                format!("Required input field {}.{} cannot be deprecated.", t.name, field.name),
                                Vec::new(),
                            );
                        }
                        if t.is_one_of {
                            let nullable = field.ty.is_nullable();
                            if !nullable || field.default_value.is_some() {
                                self.report(
                                    format!("OneOf input field {}.{} must be nullable and must not have a default value.", t.name, field.name),
                                    Vec::new(),
                                );
                            }
                        }
                    }
                }
                NamedType::Union(t) => {
                    if t.types.is_empty() {
                        self.report(format!("Union type {:?} must define one or more member types.", t.name), Vec::new());
                    }
                    let mut seen = std::collections::HashSet::new();
                    for member in &t.types {
                        if !seen.insert(member.name().to_string()) {
                            self.report(
                                format!("Union type {} can only include type {} once.", t.name, member.name()),
                                Vec::new(),
                            );
                            continue;
                        }
                        match self.schema.get_type(member.name()) {
                            Some(NamedType::Object(_)) => {}
                            Some(_) | None => {
                                self.report(
                                    format!("Union type {} can only include Object types, it cannot include {}.", t.name, member.name()),
                                    Vec::new(),
                                );
                            }
                        }
                    }
                }
                NamedType::Enum(t) => {
                    if t.values.is_empty() {
                        self.report(format!("Enum type {:?} must define one or more values.", t.name), Vec::new());
                    }
                }
                NamedType::Scalar(_) => {}
            }
        }
    }

    fn check_fields_nonempty(&mut self, type_name: &str, field_count: usize) {
        if field_count == 0 {
            self.report(format!("Type {type_name:?} must define one or more fields."), Vec::new());
        }
    }

    fn check_fields(&mut self, type_name: &str, fields: &indexmap::IndexMap<String, FieldDefinition>) {
        for field in fields.values() {
            if field.name.starts_with("__") {
                self.report(
                    format!("Name {:?} must not begin with \"__\", which is reserved by GraphQL introspection.", field.name),
                    Vec::new(),
                );
            }
            if !self.resolves_to_output_type(&field.ty) {
                self.report(
                    format!(
                        "The type of {}.{} must be Output Type but got: {}.",
                        type_name,
                        field.name,
                        describe_type(&field.ty)
                    ),
                    Vec::new(),
                );
            }
            self.check_argument_names(&field.arguments, &format!("{type_name}.{}", field.name));
            for arg in field.arguments.values() {
                if !self.resolves_to_input_type(&arg.ty) {
                    self.report(
                        format!(
                            "The type of {}.{}({}:) must be Input Type but got: {}.",
                            type_name,
                            field.name,
                            arg.name,
                            describe_type(&arg.ty)
                        ),
                        Vec::new(),
                    );
                }
                if arg.is_required() && arg.deprecation_reason.is_some() {
                    self.report(
                        format!("Required argument {}.{}({}:) cannot be deprecated.", type_name, field.name, arg.name),
                        Vec::new(),
                    );
                }
            }
        }
    }

    fn resolves_to_input_type(&self, ty: &Type) -> bool {
        match self.schema.get_type(ty.inner_ref().name()) {
            Some(named) => named.is_input_type(),
            None => false,
        }
    }

    fn resolves_to_output_type(&self, ty: &Type) -> bool {
        match self.schema.get_type(ty.inner_ref().name()) {
            Some(named) => named.is_output_type(),
            None => false,
        }
    }

    fn check_interface_implementations(&mut self) {
        for ty in self.schema.types() {
            let (type_name, fields, interfaces) = match ty {
                NamedType::Object(t) => (t.name.as_str(), &t.fields, t.interfaces.as_slice()),
                NamedType::Interface(t) => (t.name.as_str(), &t.fields, t.interfaces.as_slice()),
                _ => continue,
            };
            let mut seen = std::collections::HashSet::new();
            for iface_ref in interfaces {
                let iface_name = iface_ref.name();
                if iface_name == type_name {
                    self.report(format!("Type {type_name} cannot implement itself because it would create a circular reference."), Vec::new());
                    continue;
                }
                if !seen.insert(iface_name.to_string()) {
                    self.report(format!("Type {type_name} can only implement {iface_name} once."), Vec::new());
                    continue;
                }
                let Some(NamedType::Interface(iface)) = self.schema.get_type(iface_name) else {
                    self.report(format!("Type {type_name} must only implement Interface types, it cannot implement {iface_name}."), Vec::new());
                    continue;
                };
                for transitive in &iface.interfaces {
                    if !interfaces.iter().any(|i| i.name() == transitive.name()) {
                        self.report(
                            format!(
                                "Type {} must implement {} because it is implemented by {}.",
                                type_name,
                                transitive.name(),
                                iface_name
                            ),
                            Vec::new(),
                        );
                    }
                }
                for iface_field in iface.fields.values() {
                    let Some(own_field) = fields.get(&iface_field.name) else {
                        self.report(
                            format!("Interface field {}.{} expected but {} does not provide it.", iface_name, iface_field.name, type_name),
                            Vec::new(),
                        );
                        continue;
                    };
                    if !self.is_subtype(&own_field.ty, &iface_field.ty) {
                        self.report(
                            format!(
                                "Interface field {}.{} expects type {} but {}.{} is type {}.",
                                iface_name,
                                iface_field.name,
                                describe_type(&iface_field.ty),
                                type_name,
                                own_field.name,
                                describe_type(&own_field.ty)
                            ),
                            Vec::new(),
                        );
                    }
                    for iface_arg in iface_field.arguments.values() {
                        match own_field.arguments.get(&iface_arg.name) {
                            Some(own_arg) if own_arg.ty == iface_arg.ty => {}
                            Some(own_arg) => {
                                self.report(
                                    format!(
                                        "Interface field argument {}.{}({}:) expects type {} but {}.{}({}:) is type {}.",
                                        iface_name,
                                        iface_field.name,
                                        iface_arg.name,
                                        describe_type(&iface_arg.ty),
                                        type_name,
                                        own_field.name,
                                        own_arg.name,
                                        describe_type(&own_arg.ty)
                                    ),
                                    Vec::new(),
                                );
                            }
                            None => {
                                self.report(
                                    format!(
                                        "Interface field argument {}.{}({}:) expected but {}.{} does not provide it.",
                                        iface_name, iface_field.name, iface_arg.name, type_name, own_field.name
                                    ),
                                    Vec::new(),
                                );
                            }
                        }
                    }
                    for own_arg in own_field.arguments.values() {
                        if !iface_field.arguments.contains_key(&own_arg.name) && own_arg.is_required() {
                            self.report(
                                format!(
                                    "Object field {}.{} includes required argument {} that is missing from the Interface field {}.{}.",
                                    type_name, own_field.name, own_arg.name, iface_name, iface_field.name
                                ),
                                Vec::new(),
                            );
                        }
                    }
                }
            }
        }
    }

    /// `inner` is a valid covariant return type for `outer` when they are
    /// equal, `inner` is a non-null refinement of `outer`, `inner` names a
    /// type in `outer`'s possible-types set, or both are lists whose
    /// element types are themselves subtypes.
    fn is_subtype(&self, inner: &Type, outer: &Type) -> bool {
        if inner == outer {
            return true;
        }
        match (inner, outer) {
            (Type::NonNull(i), Type::NonNull(o)) => self.is_subtype(i, o),
            (Type::NonNull(i), o) => self.is_subtype(i, o),
            (Type::List(i), Type::List(o)) => self.is_subtype(i, o),
            (Type::Named(i), Type::Named(o)) => {
                let (Some(inner_ty), Some(outer_ty)) = (self.schema.get_type(i.name()), self.schema.get_type(o.name())) else {
                    return false;
                };
                self.schema.possible_types(outer_ty).iter().any(|t| t.name() == inner_ty.name())
            }
            _ => false,
        }
    }

    fn check_input_object_cycles(&mut self) {
        let mut visited_index: indexmap::IndexMap<String, usize> = indexmap::IndexMap::new();
        for ty in self.schema.types() {
            if let NamedType::InputObject(t) = ty {
                if !visited_index.contains_key(&t.name) {
                    let mut path = Vec::new();
                    self.visit_input_object(&t.name, &mut visited_index, &mut path);
                }
            }
        }
    }

    fn visit_input_object(
        &mut self,
        type_name: &str,
        visited_index: &mut indexmap::IndexMap<String, usize>,
        path: &mut Vec<String>,
    ) {
        let Some(NamedType::InputObject(t)) = self.schema.get_type(type_name) else { return };
        visited_index.insert(type_name.to_string(), path.len());
        for field in t.fields.values() {
            if let Type::NonNull(inner) = &field.ty {
                if let Type::Named(named) = &**inner {
                    if let Some(NamedType::InputObject(_)) = self.schema.get_type(named.name()) {
                        path.push(field.name.clone());
                        if let Some(&cycle_start) = visited_index.get(named.name()) {
                            let cycle = path[cycle_start..].join(".");
                            self.report(
                                format!(
                                    "Cannot reference Input Object \"{}\" within itself through a series of non-null fields: \"{}\".",
                                    named.name(),
                                    cycle
                                ),
                                Vec::new(),
                            );
                        } else {
                            self.visit_input_object(named.name(), visited_index, path);
                        }
                        path.pop();
                    }
                }
            }
        }
        visited_index.shift_remove(type_name);
    }
}

fn describe_type(ty: &Type) -> String {
    match ty {
        Type::Named(r) => r.name().to_string(),
        Type::List(t) => format!("[{}]", describe_type(t)),
        Type::NonNull(t) => format!("{}!", describe_type(t)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indexmap::IndexMap;

    use crate::types::{EnumType, FieldDefinition, InputValueDefinition, ObjectType, Type, TypeRef};
    use crate::Schema;

    fn object(name: &str, fields: Vec<(&str, Type)>) -> Arc<NamedTypeAlias> {
        let mut map = IndexMap::new();
        for (field_name, ty) in fields {
            map.insert(
                field_name.to_string(),
                FieldDefinition {
                    name: field_name.to_string(),
                    description: None,
                    arguments: IndexMap::new(),
                    ty,
                    deprecation_reason: None,
                    ast_node: None,
                },
            );
        }
        Arc::new(crate::types::NamedType::Object(ObjectType {
            name: name.to_string(),
            description: None,
            fields: map,
            interfaces: Vec::new(),
            ast_node: None,
            extension_ast_nodes: Vec::new(),
        }))
    }

    type NamedTypeAlias = crate::types::NamedType;

    fn string_type() -> Type {
        Type::Named(TypeRef::new("String"))
    }

    #[test]
    fn schema_with_a_query_root_validates_cleanly() {
        let query = object("Query", vec![("ok", string_type())]);
        let schema = Schema::new(query, None, None, Vec::new(), Vec::new()).unwrap();
        assert!(schema.validate().is_empty());
    }

    #[test]
    fn missing_query_root_is_reported() {
        let schema = crate::build_schema("type Thing { ok: String }").unwrap();
        let errors = schema.validate();
        assert!(errors.iter().any(|e| e.message == "Query root type must be provided."));
    }

    #[test]
    fn query_and_mutation_sharing_a_type_is_an_error() {
        let shared = object("SomeObject", vec![("ok", string_type())]);
        let schema = Schema::new(shared.clone(), Some(shared), None, Vec::new(), Vec::new()).unwrap();
        let errors = schema.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("All root types must be different"));
        assert!(errors[0].message.contains("query and mutation root types"));
    }

    #[test]
    fn interface_missing_field_is_reported() {
        let iface = Arc::new(crate::types::NamedType::Interface(crate::types::InterfaceType {
            name: "Node".to_string(),
            description: None,
            fields: {
                let mut m = IndexMap::new();
                m.insert(
                    "id".to_string(),
                    FieldDefinition {
                        name: "id".to_string(),
                        description: None,
                        arguments: IndexMap::new(),
                        ty: Type::NonNull(Box::new(string_type())),
                        deprecation_reason: None,
                        ast_node: None,
                    },
                );
                m
            },
            interfaces: Vec::new(),
            ast_node: None,
            extension_ast_nodes: Vec::new(),
        }));
        let object_without_id = Arc::new(crate::types::NamedType::Object(ObjectType {
            name: "Thing".to_string(),
            description: None,
            fields: {
                let mut m = IndexMap::new();
                m.insert(
                    "name".to_string(),
                    FieldDefinition {
                        name: "name".to_string(),
                        description: None,
                        arguments: IndexMap::new(),
                        ty: string_type(),
                        deprecation_reason: None,
                        ast_node: None,
                    },
                );
                m
            },
            interfaces: vec![TypeRef::new("Node")],
            ast_node: None,
            extension_ast_nodes: Vec::new(),
        }));
        let query = object("Query", vec![("ok", string_type())]);
        let schema = Schema::new(query, None, None, vec![iface, object_without_id], Vec::new()).unwrap();
        let errors = schema.validate();
        assert!(errors.iter().any(|e| e.message.contains("expected but Thing does not provide it")));
    }

    #[test]
    fn empty_enum_is_reported() {
        let query = object("Query", vec![("ok", string_type())]);
        let empty_enum = Arc::new(crate::types::NamedType::Enum(EnumType::new(
            "Empty".to_string(),
            None,
            IndexMap::new(),
            None,
        )));
        let schema = Schema::new(query, None, None, vec![empty_enum], Vec::new()).unwrap();
        let errors = schema.validate();
        assert!(errors.iter().any(|e| e.message.contains("must define one or more values")));
    }

    #[test]
    fn required_deprecated_argument_is_reported() {
        let mut args = IndexMap::new();
        args.insert(
            "id".to_string(),
            InputValueDefinition {
                name: "id".to_string(),
                description: None,
                ty: Type::NonNull(Box::new(string_type())),
                default_value: None,
                deprecation_reason: Some("no longer used".to_string()),
                ast_node: None,
            },
        );
        let mut fields = IndexMap::new();
        fields.insert(
            "thing".to_string(),
            FieldDefinition {
                name: "thing".to_string(),
                description: None,
                arguments: args,
                ty: string_type(),
                deprecation_reason: None,
                ast_node: None,
            },
        );
        let query = Arc::new(crate::types::NamedType::Object(ObjectType {
            name: "Query".to_string(),
            description: None,
            fields,
            interfaces: Vec::new(),
            ast_node: None,
            extension_ast_nodes: Vec::new(),
        }));
        let schema = Schema::new(query, None, None, Vec::new(), Vec::new()).unwrap();
        let errors = schema.validate();
        assert!(errors.iter().any(|e| e.message.contains("cannot be deprecated")));
    }
}
