//! The one-shot pass that confirms every [`TypeRef`] reachable from a
//! [`Schema`] actually names a type present in that schema, and that every
//! [`Type`] reachable from it is structurally well-formed.
//!
//! Because [`TypeRef::resolve`] looks types up by name against a `Schema`
//! rather than storing a mutated pointer, this pass does no rewriting — it
//! is pure validation. What it buys callers is the testable property from
//! spec section 4.7/8 ("type-reference closure"): once `Schema::new`/
//! `build_schema` returns `Ok`, no caller can ever observe a `TypeRef` that
//! fails to resolve, because this pass would have raised
//! [`SchemaConstructionError::UnresolvedTypeReference`] first.
//!
//! `Type`'s public variants have no guarded constructor, so a
//! programmatically assembled `Type::NonNull(Box::new(Type::NonNull(_)))`
//! would otherwise reach a `Schema` unchecked — the AST parser can never
//! produce that shape (`ast::Type::NonNull` wraps a `NullableType`), but
//! `Schema::new` takes already-built `Type` values directly. This pass walks
//! every field/argument/directive-argument type and rejects non-null
//! directly wrapping non-null, matching the same rule the AST enforces
//! syntactically.

use crate::error::SchemaConstructionError;
use crate::types::{NamedType, Type, TypeRef};
use crate::Schema;

pub fn resolve_references(schema: &Schema) -> Result<(), SchemaConstructionError> {
    for named in schema.types.values() {
        check_named_type(schema, named)?;
    }
    for directive in schema.directives.values() {
        for arg in directive.arguments.values() {
            check_type(schema, &arg.ty, &directive.name)?;
        }
    }
    Ok(())
}

fn check_named_type(schema: &Schema, named: &NamedType) -> Result<(), SchemaConstructionError> {
    match named {
        NamedType::Scalar(_) | NamedType::Enum(_) => Ok(()),
        NamedType::Object(t) => {
            for iface in &t.interfaces {
                check_ref(schema, iface)?;
            }
            for field in t.fields.values() {
                check_type(schema, &field.ty, &t.name)?;
                for arg in field.arguments.values() {
                    check_type(schema, &arg.ty, &t.name)?;
                }
            }
            Ok(())
        }
        NamedType::Interface(t) => {
            for iface in &t.interfaces {
                check_ref(schema, iface)?;
            }
            for field in t.fields.values() {
                check_type(schema, &field.ty, &t.name)?;
                for arg in field.arguments.values() {
                    check_type(schema, &arg.ty, &t.name)?;
                }
            }
            Ok(())
        }
        NamedType::Union(t) => {
            for member in &t.types {
                check_ref(schema, member)?;
            }
            Ok(())
        }
        NamedType::InputObject(t) => {
            for field in t.fields.values() {
                check_type(schema, &field.ty, &t.name)?;
            }
            Ok(())
        }
    }
}

fn check_type(schema: &Schema, ty: &Type, type_name: &str) -> Result<(), SchemaConstructionError> {
    match ty {
        Type::Named(r) => check_ref(schema, r),
        Type::List(t) => check_type(schema, t, type_name),
        Type::NonNull(inner) => {
            if matches!(inner.as_ref(), Type::NonNull(_)) {
                return Err(SchemaConstructionError::NonNullOverNonNull {
                    type_name: type_name.to_string(),
                });
            }
            check_type(schema, inner, type_name)
        }
    }
}

fn check_ref(schema: &Schema, type_ref: &TypeRef) -> Result<(), SchemaConstructionError> {
    if schema.get_type(type_ref.name()).is_some() {
        Ok(())
    } else {
        Err(SchemaConstructionError::UnresolvedTypeReference {
            name: type_ref.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indexmap::IndexMap;

    use crate::types::{FieldDefinition, NamedType, ObjectType, Type, TypeRef};
    use crate::Schema;

    fn object_with_field(name: &str, field_name: &str, ty: Type) -> Arc<NamedType> {
        let mut fields = IndexMap::new();
        fields.insert(
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
        Arc::new(NamedType::Object(ObjectType {
            name: name.to_string(),
            description: None,
            fields,
            interfaces: Vec::new(),
            ast_node: None,
            extension_ast_nodes: Vec::new(),
        }))
    }

    #[test]
    fn non_null_over_non_null_is_rejected() {
        let illegal = Type::NonNull(Box::new(Type::NonNull(Box::new(Type::Named(TypeRef::new("String"))))));
        let query = object_with_field("Query", "bad", illegal);
        let err = Schema::new(query, None, None, Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err, crate::error::SchemaConstructionError::NonNullOverNonNull { type_name: "Query".to_string() });
    }

    #[test]
    fn non_null_list_of_non_null_is_accepted() {
        let legal = Type::NonNull(Box::new(Type::List(Box::new(Type::NonNull(Box::new(Type::Named(
            TypeRef::new("String"),
        )))))));
        let query = object_with_field("Query", "ok", legal);
        assert!(Schema::new(query, None, None, Vec::new(), Vec::new()).is_ok());
    }
}
