use super::types::{Describe, FieldDescriptor, TypeDescriptor, TypeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application user, stored by the users controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Describe for User {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("User")
            .with_field(FieldDescriptor::tagged("ID", TypeKind::u64(), "id"))
            .with_field(FieldDescriptor::tagged("Name", TypeKind::String, "name"))
            .with_field(FieldDescriptor::tagged("Email", TypeKind::String, "email"))
            .with_field(FieldDescriptor::tagged(
                "CreatedAt",
                TypeKind::Timestamp,
                "created_at",
            ))
            .with_field(FieldDescriptor::tagged(
                "UpdatedAt",
                TypeKind::Timestamp,
                "updated_at",
            ))
    }
}
