//! Schema derivation from model descriptors.
//!
//! The mapping is total: every [`TypeKind`] produces a schema, and anything
//! the deriver does not recognise degrades to `type: string`.

use super::example::example_for;
use super::types::{Schema, SchemaKind};
use crate::model::{is_timestamp_name, TypeDescriptor, TypeKind};

/// Derive the object schema for a composite model.
///
/// Fields without a usable serialization tag are left out. Every included
/// field is required unless its tag carries `omitempty`.
#[must_use]
pub fn derive_schema(descriptor: &TypeDescriptor) -> Schema {
    let mut schema = Schema::object();
    for field in &descriptor.fields {
        let Some(wire_name) = field.wire_name() else {
            continue;
        };
        let mut field_schema = schema_for_kind(&field.kind);
        if let Some(example) = example_for(&wire_name, &field.kind) {
            field_schema.example = Some(example);
        }
        if !field.is_omittable() {
            schema.required.push(wire_name.clone());
        }
        schema.properties.insert(wire_name, field_schema);
    }
    schema
}

/// Schema for a single field kind.
#[must_use]
pub fn schema_for_kind(kind: &TypeKind) -> Schema {
    match kind {
        TypeKind::String | TypeKind::Unknown(_) => Schema::of(SchemaKind::String),
        TypeKind::Int {
            bits: 64,
            signed: false,
        } => Schema::formatted(SchemaKind::Integer, "int64"),
        TypeKind::Int { .. } => Schema::of(SchemaKind::Integer),
        TypeKind::Float => Schema::of(SchemaKind::Number),
        TypeKind::Bool => Schema::of(SchemaKind::Boolean),
        // element kinds are not introspected
        TypeKind::Sequence(_) => Schema::array_of(Schema::of(SchemaKind::String)),
        TypeKind::Timestamp => Schema::formatted(SchemaKind::String, "date-time"),
        TypeKind::Composite(inner) if is_timestamp_name(&inner.name) => {
            Schema::formatted(SchemaKind::String, "date-time")
        }
        TypeKind::Composite(inner) => derive_schema(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Describe, FieldDescriptor, User};
    use serde_json::json;

    fn address() -> TypeDescriptor {
        TypeDescriptor::new("Address")
            .with_field(FieldDescriptor::tagged("Street", TypeKind::String, "street"))
            .with_field(FieldDescriptor::tagged("Zip", TypeKind::String, "zip,omitempty"))
    }

    #[test]
    fn test_field_inclusion_and_required() {
        let desc = TypeDescriptor::new("Profile")
            .with_field(FieldDescriptor::tagged("Handle", TypeKind::String, "handle"))
            .with_field(FieldDescriptor::tagged("Bio", TypeKind::String, "bio,omitempty"))
            .with_field(FieldDescriptor::tagged("Nickname", TypeKind::String, ",omitempty"))
            .with_field(FieldDescriptor::tagged("Password", TypeKind::String, "-"))
            .with_field(FieldDescriptor::new("cache", TypeKind::String));

        let schema = derive_schema(&desc);
        let keys: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["bio", "handle", "nickname"]);
        assert_eq!(schema.required, vec!["handle"]);
    }

    #[test]
    fn test_unsigned_64_gets_int64_format() {
        let s = schema_for_kind(&TypeKind::u64());
        assert_eq!(s.kind, Some(SchemaKind::Integer));
        assert_eq!(s.format.as_deref(), Some("int64"));

        for kind in [
            TypeKind::i64(),
            TypeKind::i32(),
            TypeKind::Int {
                bits: 32,
                signed: false,
            },
        ] {
            let s = schema_for_kind(&kind);
            assert_eq!(s.kind, Some(SchemaKind::Integer));
            assert_eq!(s.format, None, "{kind}");
        }
    }

    #[test]
    fn test_timestamps() {
        for kind in [
            TypeKind::Timestamp,
            TypeKind::Composite(TypeDescriptor::new("time.Time")),
            TypeKind::Composite(TypeDescriptor::new("DateTime<Utc>")),
        ] {
            let s = schema_for_kind(&kind);
            assert_eq!(s.kind, Some(SchemaKind::String));
            assert_eq!(s.format.as_deref(), Some("date-time"));
            assert!(s.properties.is_empty());
        }
    }

    #[test]
    fn test_primitive_fallbacks() {
        assert_eq!(schema_for_kind(&TypeKind::Float).kind, Some(SchemaKind::Number));
        assert_eq!(schema_for_kind(&TypeKind::Bool).kind, Some(SchemaKind::Boolean));
        assert_eq!(
            schema_for_kind(&TypeKind::Unknown("chan int".into())).kind,
            Some(SchemaKind::String)
        );
    }

    #[test]
    fn test_sequence_items_are_string_placeholder() {
        let s = schema_for_kind(&TypeKind::seq(TypeKind::u64()));
        assert_eq!(s.kind, Some(SchemaKind::Array));
        assert_eq!(
            s.items.as_deref().and_then(|i| i.kind),
            Some(SchemaKind::String)
        );
    }

    #[test]
    fn test_nested_composite_is_inlined() {
        let desc = TypeDescriptor::new("Customer").with_field(FieldDescriptor::tagged(
            "Address",
            TypeKind::Composite(address()),
            "address",
        ));
        let schema = derive_schema(&desc);
        let nested = &schema.properties["address"];
        assert_eq!(nested.kind, Some(SchemaKind::Object));
        assert_eq!(nested.required, vec!["street"]);
        assert_eq!(nested.example, None);
        assert_eq!(
            nested.properties["street"].example,
            Some(json!("example string"))
        );
    }

    #[test]
    fn test_user_schema() {
        let schema = derive_schema(&User::describe());
        let v = serde_json::to_value(&schema).unwrap();
        assert_eq!(v["type"], "object");
        assert_eq!(v["properties"]["id"], json!({"type": "integer", "format": "int64", "example": 1}));
        assert_eq!(v["properties"]["name"]["example"], "John Doe");
        assert_eq!(v["properties"]["created_at"]["format"], "date-time");
        assert_eq!(
            v["required"],
            json!(["id", "name", "email", "created_at", "updated_at"])
        );
    }
}
