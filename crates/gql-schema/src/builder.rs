//! Builds a [`Schema`] from SDL source text.
//!
//! Grounded on the teacher's `schema_builder.rs`/`schema_builder/` modules
//! (walking a parsed document's type-system definitions into the in-memory
//! type map) generalized to this crate's own AST (`gql_parser::ast`)
//! instead of the external `graphql_parser` crate the teacher wraps.
//! Extensions are merged into their base definition before a [`NamedType`]
//! is constructed — spec section 4.6/4.8 treats an extension as
//! "semantically merged into the base type for validation", so there is no
//! separate `NamedType::ObjectExtension` variant; `extension_ast_nodes`
//! just remembers where the extra pieces came from for error locations.

use std::sync::Arc;

use indexmap::IndexMap;

use gql_parser::ast::{self, Definition, OperationKind, TypeExtension, TypeSystemDefinitionOrExtension as TSD};
use gql_parser::{IntoSource, ParserOptions};

use crate::error::SchemaConstructionError;
use crate::types::{
    CoercedValue, DirectiveType, EnumType, EnumValueDefinition, FieldDefinition, InputObjectType,
    InputValueDefinition, InterfaceType, NamedType, ObjectType, ScalarCoercion, ScalarType, Type,
    UnionType,
};
use crate::Schema;

/// Parses `source` as SDL and assembles a [`Schema`] from it.
///
/// Root operation types come from an explicit `schema { ... }` definition
/// when one is present; otherwise the conventional `Query`/`Mutation`/
/// `Subscription` object type names are used if they exist. A document with
/// neither produces a schema whose `query_type()` is `None` — construction
/// still succeeds (spec section 7: only `SchemaConstructionError` aborts
/// construction), and [`Schema::validate`] is what reports the missing
/// query root.
pub fn build_schema(source: impl IntoSource) -> Result<Schema, SchemaConstructionError> {
    let document = gql_parser::parse(source, ParserOptions::default())?;

    let mut scalars: IndexMap<String, ScalarBuild> = IndexMap::new();
    let mut objects: IndexMap<String, ObjectBuild> = IndexMap::new();
    let mut interfaces: IndexMap<String, InterfaceBuild> = IndexMap::new();
    let mut unions: IndexMap<String, UnionBuild> = IndexMap::new();
    let mut enums: IndexMap<String, EnumBuild> = IndexMap::new();
    let mut input_objects: IndexMap<String, InputObjectBuild> = IndexMap::new();
    let mut directive_defs: IndexMap<String, Arc<ast::DirectiveDefinition>> = IndexMap::new();
    let mut schema_roots: Vec<(OperationKind, String)> = Vec::new();
    let mut has_schema_definition = false;

    for definition in &document.definitions {
        let Definition::TypeSystem(def) = definition else { continue };
        match def {
            TSD::Schema(d) => {
                has_schema_definition = true;
                for root in &d.root_operation_types {
                    schema_roots.push((root.operation, root.named_type.value.clone()));
                }
            }
            TSD::Scalar(d) => {
                scalars.insert(d.name.value.clone(), ScalarBuild::from_def(d.clone()));
            }
            TSD::Object(d) => {
                objects.insert(d.name.value.clone(), ObjectBuild::from_def(d.clone()));
            }
            TSD::Interface(d) => {
                interfaces.insert(d.name.value.clone(), InterfaceBuild::from_def(d.clone()));
            }
            TSD::Union(d) => {
                unions.insert(d.name.value.clone(), UnionBuild::from_def(d.clone()));
            }
            TSD::Enum(d) => {
                enums.insert(d.name.value.clone(), EnumBuild::from_def(d.clone()));
            }
            TSD::InputObject(d) => {
                input_objects.insert(d.name.value.clone(), InputObjectBuild::from_def(d.clone()));
            }
            TSD::Directive(d) => {
                if directive_defs.insert(d.name.value.clone(), Arc::new(d.clone())).is_some() {
                    return Err(SchemaConstructionError::DuplicateDefinition {
                        name: d.name.value.clone(),
                    });
                }
            }
            TSD::Extension(ext) => match ext {
                TypeExtension::Schema(e) => {
                    has_schema_definition = true;
                    for root in &e.root_operation_types {
                        schema_roots.push((root.operation, root.named_type.value.clone()));
                    }
                }
                TypeExtension::Scalar(e) => {
                    scalars
                        .get_mut(&e.name.value)
                        .ok_or_else(|| unresolved(&e.name.value))?
                        .apply_extension(e.clone());
                }
                TypeExtension::Object(e) => {
                    objects
                        .get_mut(&e.name.value)
                        .ok_or_else(|| unresolved(&e.name.value))?
                        .apply_extension(e.clone());
                }
                TypeExtension::Interface(e) => {
                    interfaces
                        .get_mut(&e.name.value)
                        .ok_or_else(|| unresolved(&e.name.value))?
                        .apply_extension(e.clone());
                }
                TypeExtension::Union(e) => {
                    unions
                        .get_mut(&e.name.value)
                        .ok_or_else(|| unresolved(&e.name.value))?
                        .apply_extension(e.clone());
                }
                TypeExtension::Enum(e) => {
                    enums
                        .get_mut(&e.name.value)
                        .ok_or_else(|| unresolved(&e.name.value))?
                        .apply_extension(e.clone());
                }
                TypeExtension::InputObject(e) => {
                    input_objects
                        .get_mut(&e.name.value)
                        .ok_or_else(|| unresolved(&e.name.value))?
                        .apply_extension(e.clone());
                }
            },
        }
    }

    let mut types: IndexMap<String, Arc<NamedType>> = IndexMap::new();
    for (name, build) in scalars {
        insert(&mut types, name, NamedType::Scalar(build.finish()?))?;
    }
    for (name, build) in objects {
        insert(&mut types, name, NamedType::Object(build.finish()?))?;
    }
    for (name, build) in interfaces {
        insert(&mut types, name, NamedType::Interface(build.finish()?))?;
    }
    for (name, build) in unions {
        insert(&mut types, name, NamedType::Union(build.finish()?))?;
    }
    for (name, build) in enums {
        insert(&mut types, name, NamedType::Enum(build.finish()?))?;
    }
    for (name, build) in input_objects {
        insert(&mut types, name, NamedType::InputObject(build.finish()?))?;
    }
    let mut directives: IndexMap<String, Arc<DirectiveType>> = IndexMap::new();
    for builtin in default_directives() {
        directives.insert(builtin.name.clone(), Arc::new(builtin));
    }
    for (name, def) in directive_defs {
        directives.insert(name, Arc::new(directive_from_ast(&def)?));
    }

    let lookup = |name: &str| -> Option<Arc<NamedType>> { types.get(name).cloned() };
    let (query_type, mutation_type, subscription_type) = if has_schema_definition {
        let mut query = None;
        let mut mutation = None;
        let mut subscription = None;
        for (kind, name) in &schema_roots {
            let resolved = lookup(name).ok_or_else(|| unresolved(name))?;
            match kind {
                OperationKind::Query => query = Some(resolved),
                OperationKind::Mutation => mutation = Some(resolved),
                OperationKind::Subscription => subscription = Some(resolved),
            }
        }
        (query, mutation, subscription)
    } else {
        (lookup("Query"), lookup("Mutation"), lookup("Subscription"))
    };

    Schema::assemble(types, directives, query_type, mutation_type, subscription_type)
}

fn unresolved(name: &str) -> SchemaConstructionError {
    SchemaConstructionError::UnresolvedTypeReference { name: name.to_string() }
}

fn insert(
    map: &mut IndexMap<String, Arc<NamedType>>,
    name: String,
    ty: NamedType,
) -> Result<(), SchemaConstructionError> {
    if map.insert(name.clone(), Arc::new(ty)).is_some() {
        return Err(SchemaConstructionError::DuplicateTypeName { name });
    }
    Ok(())
}

fn default_directives() -> Vec<DirectiveType> {
    use ast::DirectiveLocation::*;
    let if_arg = |description: &str| InputValueDefinition {
        name: "if".to_string(),
        description: Some(description.to_string()),
        ty: Type::NonNull(Box::new(Type::Named(crate::types::TypeRef::new("Boolean")))),
        default_value: None,
        deprecation_reason: None,
        ast_node: None,
    };
    vec![
        DirectiveType {
            name: "skip".to_string(),
            description: Some("Directs the executor to skip this field or fragment when the `if` argument is true.".to_string()),
            arguments: IndexMap::from([("if".to_string(), if_arg("Skipped when true."))]),
            locations: vec![Field, FragmentSpread, InlineFragment],
            is_repeatable: false,
            ast_node: None,
        },
        DirectiveType {
            name: "include".to_string(),
            description: Some("Directs the executor to include this field or fragment only when the `if` argument is true.".to_string()),
            arguments: IndexMap::from([("if".to_string(), if_arg("Included when true."))]),
            locations: vec![Field, FragmentSpread, InlineFragment],
            is_repeatable: false,
            ast_node: None,
        },
        DirectiveType {
            name: "deprecated".to_string(),
            description: Some("Marks an element of a GraphQL schema as no longer supported.".to_string()),
            arguments: IndexMap::from([(
                "reason".to_string(),
                InputValueDefinition {
                    name: "reason".to_string(),
                    description: Some("Explains why this element was deprecated.".to_string()),
                    ty: Type::Named(crate::types::TypeRef::new("String")),
                    default_value: Some(ast::Value::String(ast::StringValue {
                        location: None,
                        value: "No longer supported.".to_string(),
                        block: false,
                    })),
                    deprecation_reason: None,
                    ast_node: None,
                },
            )]),
            locations: vec![FieldDefinition, ArgumentDefinition, InputFieldDefinition, Enum, EnumValue],
            is_repeatable: false,
            ast_node: None,
        },
    ]
}

// --- per-kind build accumulators (base definition + merged extensions) ---

struct ScalarBuild {
    def: Arc<ast::ScalarTypeDefinition>,
    extensions: Vec<Arc<ast::ScalarTypeExtension>>,
}

impl ScalarBuild {
    fn from_def(def: ast::ScalarTypeDefinition) -> Self {
        ScalarBuild { def: Arc::new(def), extensions: Vec::new() }
    }

    fn apply_extension(&mut self, ext: ast::ScalarTypeExtension) {
        self.extensions.push(Arc::new(ext));
    }

    fn finish(self) -> Result<ScalarType, SchemaConstructionError> {
        let all_directives = self
            .def
            .directives
            .iter()
            .chain(self.extensions.iter().flat_map(|e| e.directives.iter()));
        let specified_by_url = all_directives
            .filter(|d| d.name.value == "specifiedBy")
            .find_map(|d| string_argument(d, "url"));
        Ok(ScalarType {
            name: self.def.name.value.clone(),
            description: self.def.description.as_ref().map(|d| d.value.clone()),
            specified_by_url,
            coercion: ScalarCoercion::Custom,
            ast_node: Some(self.def),
            extension_ast_nodes: self.extensions,
        })
    }
}

struct ObjectBuild {
    def: Arc<ast::ObjectTypeDefinition>,
    extensions: Vec<Arc<ast::ObjectTypeExtension>>,
}

impl ObjectBuild {
    fn from_def(def: ast::ObjectTypeDefinition) -> Self {
        ObjectBuild { def: Arc::new(def), extensions: Vec::new() }
    }

    fn apply_extension(&mut self, ext: ast::ObjectTypeExtension) {
        self.extensions.push(Arc::new(ext));
    }

    fn finish(self) -> Result<ObjectType, SchemaConstructionError> {
        let mut fields = IndexMap::new();
        for f in &self.def.fields {
            insert_field(&mut fields, f)?;
        }
        let mut interfaces: Vec<_> = self.def.interfaces.iter().map(|n| crate::types::TypeRef::new(n.value.clone())).collect();
        for ext in &self.extensions {
            for f in &ext.fields {
                insert_field(&mut fields, f)?;
            }
            interfaces.extend(ext.interfaces.iter().map(|n| crate::types::TypeRef::new(n.value.clone())));
        }
        Ok(ObjectType {
            name: self.def.name.value.clone(),
            description: self.def.description.as_ref().map(|d| d.value.clone()),
            fields,
            interfaces,
            ast_node: Some(self.def),
            extension_ast_nodes: self.extensions,
        })
    }
}

struct InterfaceBuild {
    def: Arc<ast::InterfaceTypeDefinition>,
    extensions: Vec<Arc<ast::InterfaceTypeExtension>>,
}

impl InterfaceBuild {
    fn from_def(def: ast::InterfaceTypeDefinition) -> Self {
        InterfaceBuild { def: Arc::new(def), extensions: Vec::new() }
    }

    fn apply_extension(&mut self, ext: ast::InterfaceTypeExtension) {
        self.extensions.push(Arc::new(ext));
    }

    fn finish(self) -> Result<InterfaceType, SchemaConstructionError> {
        let mut fields = IndexMap::new();
        for f in &self.def.fields {
            insert_field(&mut fields, f)?;
        }
        let mut interfaces: Vec<_> = self.def.interfaces.iter().map(|n| crate::types::TypeRef::new(n.value.clone())).collect();
        for ext in &self.extensions {
            for f in &ext.fields {
                insert_field(&mut fields, f)?;
            }
            interfaces.extend(ext.interfaces.iter().map(|n| crate::types::TypeRef::new(n.value.clone())));
        }
        Ok(InterfaceType {
            name: self.def.name.value.clone(),
            description: self.def.description.as_ref().map(|d| d.value.clone()),
            fields,
            interfaces,
            ast_node: Some(self.def),
            extension_ast_nodes: self.extensions,
        })
    }
}

struct UnionBuild {
    def: Arc<ast::UnionTypeDefinition>,
    extensions: Vec<Arc<ast::UnionTypeExtension>>,
}

impl UnionBuild {
    fn from_def(def: ast::UnionTypeDefinition) -> Self {
        UnionBuild { def: Arc::new(def), extensions: Vec::new() }
    }

    fn apply_extension(&mut self, ext: ast::UnionTypeExtension) {
        self.extensions.push(Arc::new(ext));
    }

    fn finish(self) -> Result<UnionType, SchemaConstructionError> {
        let mut types: Vec<_> = self.def.member_types.iter().map(|n| crate::types::TypeRef::new(n.value.clone())).collect();
        for ext in &self.extensions {
            types.extend(ext.member_types.iter().map(|n| crate::types::TypeRef::new(n.value.clone())));
        }
        Ok(UnionType {
            name: self.def.name.value.clone(),
            description: self.def.description.as_ref().map(|d| d.value.clone()),
            types,
            ast_node: Some(self.def),
            extension_ast_nodes: self.extensions,
        })
    }
}

struct EnumBuild {
    def: Arc<ast::EnumTypeDefinition>,
    extensions: Vec<Arc<ast::EnumTypeExtension>>,
}

impl EnumBuild {
    fn from_def(def: ast::EnumTypeDefinition) -> Self {
        EnumBuild { def: Arc::new(def), extensions: Vec::new() }
    }

    fn apply_extension(&mut self, ext: ast::EnumTypeExtension) {
        self.extensions.push(Arc::new(ext));
    }

    fn finish(self) -> Result<EnumType, SchemaConstructionError> {
        let mut values = IndexMap::new();
        for v in &self.def.values {
            insert_enum_value(&mut values, v)?;
        }
        for ext in &self.extensions {
            for v in &ext.values {
                insert_enum_value(&mut values, v)?;
            }
        }
        Ok(EnumType::new(
            self.def.name.value.clone(),
            self.def.description.as_ref().map(|d| d.value.clone()),
            values,
            Some(self.def),
        ))
    }
}

struct InputObjectBuild {
    def: Arc<ast::InputObjectTypeDefinition>,
    extensions: Vec<Arc<ast::InputObjectTypeExtension>>,
}

impl InputObjectBuild {
    fn from_def(def: ast::InputObjectTypeDefinition) -> Self {
        InputObjectBuild { def: Arc::new(def), extensions: Vec::new() }
    }

    fn apply_extension(&mut self, ext: ast::InputObjectTypeExtension) {
        self.extensions.push(Arc::new(ext));
    }

    fn finish(self) -> Result<InputObjectType, SchemaConstructionError> {
        let mut fields = IndexMap::new();
        for f in &self.def.fields {
            insert_input_value(&mut fields, f)?;
        }
        for ext in &self.extensions {
            for f in &ext.fields {
                insert_input_value(&mut fields, f)?;
            }
        }
        let is_one_of = self.def.directives.iter().any(|d| d.name.value == "oneOf");
        Ok(InputObjectType {
            name: self.def.name.value.clone(),
            description: self.def.description.as_ref().map(|d| d.value.clone()),
            fields,
            is_one_of,
            ast_node: Some(self.def),
            extension_ast_nodes: self.extensions,
        })
    }
}

fn insert_field(
    fields: &mut IndexMap<String, FieldDefinition>,
    f: &ast::FieldDefinition,
) -> Result<(), SchemaConstructionError> {
    let mut arguments = IndexMap::new();
    for a in &f.arguments {
        insert_input_value(&mut arguments, a)?;
    }
    let field = FieldDefinition {
        name: f.name.value.clone(),
        description: f.description.as_ref().map(|d| d.value.clone()),
        arguments,
        ty: Type::from_ast(&f.ty)?,
        deprecation_reason: deprecation_reason(&f.directives),
        ast_node: Some(Arc::new(f.clone())),
    };
    if fields.insert(field.name.clone(), field).is_some() {
        return Err(SchemaConstructionError::DuplicateDefinition { name: f.name.value.clone() });
    }
    Ok(())
}

fn insert_input_value(
    values: &mut IndexMap<String, InputValueDefinition>,
    v: &ast::InputValueDefinition,
) -> Result<(), SchemaConstructionError> {
    let value = InputValueDefinition {
        name: v.name.value.clone(),
        description: v.description.as_ref().map(|d| d.value.clone()),
        ty: Type::from_ast(&v.ty)?,
        default_value: v.default_value.clone(),
        deprecation_reason: deprecation_reason(&v.directives),
        ast_node: Some(Arc::new(v.clone())),
    };
    if values.insert(value.name.clone(), value).is_some() {
        return Err(SchemaConstructionError::DuplicateDefinition { name: v.name.value.clone() });
    }
    Ok(())
}

fn insert_enum_value(
    values: &mut IndexMap<String, EnumValueDefinition>,
    v: &ast::EnumValueDefinition,
) -> Result<(), SchemaConstructionError> {
    let value = EnumValueDefinition {
        name: v.value.value.clone(),
        description: v.description.as_ref().map(|d| d.value.clone()),
        value: CoercedValue::String(v.value.value.clone()),
        deprecation_reason: deprecation_reason(&v.directives),
        ast_node: Some(Arc::new(v.clone())),
    };
    if values.insert(value.name.clone(), value).is_some() {
        return Err(SchemaConstructionError::DuplicateDefinition { name: v.value.value.clone() });
    }
    Ok(())
}

fn directive_from_ast(def: &ast::DirectiveDefinition) -> Result<DirectiveType, SchemaConstructionError> {
    let mut arguments = IndexMap::new();
    for a in &def.arguments {
        insert_input_value(&mut arguments, a)?;
    }
    Ok(DirectiveType {
        name: def.name.value.clone(),
        description: def.description.as_ref().map(|d| d.value.clone()),
        arguments,
        locations: def.locations.clone(),
        is_repeatable: def.repeatable,
        ast_node: Some(Arc::new(def.clone())),
    })
}

fn deprecation_reason(directives: &[ast::Directive]) -> Option<String> {
    let directive = directives.iter().find(|d| d.name.value == "deprecated")?;
    Some(string_argument(directive, "reason").unwrap_or_else(|| "No longer supported.".to_string()))
}

fn string_argument(directive: &ast::Directive, name: &str) -> Option<String> {
    directive.arguments.iter().find(|a| a.name.value == name).and_then(|a| match &a.value {
        ast::Value::String(s) => Some(s.value.clone()),
        _ => None,
    })
}
