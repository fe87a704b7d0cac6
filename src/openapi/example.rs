//! Example values for documented fields, keyed by wire name then kind.

use crate::model::TypeKind;
use serde_json::Value;

/// Timestamp literal used for every `created_at` / `updated_at` example.
pub const EXAMPLE_TIMESTAMP: &str = "2025-07-31T15:42:18.792477+03:00";

/// Pick an example value for a documented field.
///
/// Well-known wire names win over the field kind; composite, float and
/// collection fields without a well-known name get no example.
#[must_use]
pub fn example_for(wire_name: &str, kind: &TypeKind) -> Option<Value> {
    match wire_name.to_ascii_lowercase().as_str() {
        "id" => return Some(Value::from(1)),
        "name" => return Some(Value::from("John Doe")),
        "email" => return Some(Value::from("john@example.com")),
        "created_at" | "updated_at" => return Some(Value::from(EXAMPLE_TIMESTAMP)),
        _ => {}
    }

    match kind {
        TypeKind::String => Some(Value::from("example string")),
        TypeKind::Int { .. } => Some(Value::from(1)),
        TypeKind::Bool => Some(Value::from(true)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeDescriptor;

    #[test]
    fn test_well_known_names() {
        assert_eq!(example_for("id", &TypeKind::u64()), Some(Value::from(1)));
        assert_eq!(
            example_for("Name", &TypeKind::String),
            Some(Value::from("John Doe"))
        );
        assert_eq!(
            example_for("EMAIL", &TypeKind::String),
            Some(Value::from("john@example.com"))
        );
        assert_eq!(
            example_for("updated_at", &TypeKind::Timestamp),
            Some(Value::from(EXAMPLE_TIMESTAMP))
        );
    }

    #[test]
    fn test_name_wins_over_kind() {
        // an "id" that happens to be a string still gets the integer example
        assert_eq!(example_for("id", &TypeKind::String), Some(Value::from(1)));
    }

    #[test]
    fn test_kind_fallbacks() {
        assert_eq!(
            example_for("title", &TypeKind::String),
            Some(Value::from("example string"))
        );
        assert_eq!(
            example_for("age", &TypeKind::Int { bits: 8, signed: false }),
            Some(Value::from(1))
        );
        assert_eq!(example_for("active", &TypeKind::Bool), Some(Value::from(true)));
    }

    #[test]
    fn test_no_example() {
        assert_eq!(example_for("score", &TypeKind::Float), None);
        assert_eq!(example_for("tags", &TypeKind::seq(TypeKind::String)), None);
        assert_eq!(example_for("born", &TypeKind::Timestamp), None);
        assert_eq!(
            example_for("address", &TypeKind::Composite(TypeDescriptor::new("Address"))),
            None
        );
    }
}
