//! Resource naming conventions.
//!
//! A route such as `/api/users/{id}` belongs to the `users` resource, whose
//! model schema is `User`. These helpers recover that mapping from the path
//! alone so operations can be documented from the model registry.

use super::operation::{ERROR_RESPONSE_SCHEMA, RESPONSE_SCHEMA};
use super::types::Schema;
use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

#[allow(clippy::expect_used)]
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}/]+)\}").expect("placeholder regex should be valid"));

/// Fields the server assigns; they never appear in request bodies.
pub const SERVER_MANAGED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Path with the API prefix removed (`/api/users` -> `/users`).
#[must_use]
pub fn strip_api_prefix<'a>(path: &'a str, api_prefix: &str) -> &'a str {
    if api_prefix.is_empty() || api_prefix == "/" {
        return path;
    }
    match path.strip_prefix(api_prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// First literal segment after the API prefix.
#[must_use]
pub fn resource_segment<'a>(path: &'a str, api_prefix: &str) -> Option<&'a str> {
    strip_api_prefix(path, api_prefix)
        .split('/')
        .find(|s| !s.is_empty() && !is_placeholder(s))
}

fn is_placeholder(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Placeholder names in template order (`/a/{x}/b/{y}` -> `["x", "y"]`).
#[must_use]
pub fn placeholders(path: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(path)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Whether a placeholder name denotes a record identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    name == "id" || name.ends_with("_id") || name.ends_with("Id")
}

/// Whether the path addresses a single record: its last segment is an
/// identifier placeholder (`/users/{id}`, `/users/{user_id}`).
#[must_use]
pub fn has_id_placeholder(path: &str) -> bool {
    path.rsplit('/')
        .find(|s| !s.is_empty())
        .filter(|s| is_placeholder(s))
        .is_some_and(|s| is_identifier(&s[1..s.len() - 1]))
}

/// Singular form of a resource segment (`users` -> `user`).
#[must_use]
pub fn singular(resource: &str) -> &str {
    resource.strip_suffix('s').unwrap_or(resource)
}

/// Conventional schema name for a resource (`users` -> `User`).
#[must_use]
pub fn schema_name_for(resource: &str) -> String {
    let mut chars = singular(resource).chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plural resource segment for a model name (`User` -> `users`).
#[must_use]
pub fn resource_for_model(model_name: &str) -> String {
    format!("{}s", model_name.to_lowercase())
}

fn is_envelope(name: &str) -> bool {
    [RESPONSE_SCHEMA, ERROR_RESPONSE_SCHEMA]
        .iter()
        .any(|e| e.eq_ignore_ascii_case(name))
}

/// Find the component schema documenting `resource`.
///
/// An exact match on the conventional name wins; otherwise names are compared
/// case-insensitively so `blogposts` still finds `BlogPost`. The envelope
/// schemas never document a resource.
#[must_use]
pub fn resolve_schema<'a>(
    resource: &str,
    schemas: &'a BTreeMap<String, Schema>,
) -> Option<(&'a str, &'a Schema)> {
    let wanted = schema_name_for(resource);
    if is_envelope(&wanted) {
        return None;
    }
    if let Some((name, schema)) = schemas.get_key_value(&wanted) {
        return Some((name.as_str(), schema));
    }
    schemas
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(&wanted))
        .map(|(name, schema)| (name.as_str(), schema))
}

/// Shape of a path relative to its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `/<resource>`
    Collection,
    /// `/<resource>/{id}`
    Item,
}

fn shape<'a>(path: &'a str, api_prefix: &str) -> Option<(&'a str, Shape)> {
    let segments: Vec<&str> = strip_api_prefix(path, api_prefix)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        [resource] if !is_placeholder(resource) => Some((*resource, Shape::Collection)),
        [resource, "{id}"] if !is_placeholder(resource) => Some((*resource, Shape::Item)),
        _ => None,
    }
}

/// CRUD summary for a resource route, if the method/path pair is one of the
/// conventional ones: list and create on `/<resource>`, read, update and
/// delete on `/<resource>/{id}`.
#[must_use]
pub fn conventional_summary(method: &Method, path: &str, api_prefix: &str) -> Option<String> {
    let (resource, shape) = shape(path, api_prefix)?;
    let one = singular(resource);
    let summary = if shape == Shape::Item {
        match *method {
            Method::GET => format!("Get {one} by ID"),
            Method::PUT | Method::PATCH => format!("Update {one}"),
            Method::DELETE => format!("Delete {one}"),
            _ => return None,
        }
    } else {
        match *method {
            Method::GET => format!("Get all {resource}"),
            Method::POST => format!("Create new {one}"),
            _ => return None,
        }
    };
    Some(summary)
}

/// Request body schema derived from a model schema: server-managed fields are
/// removed from `properties` and `required`.
#[must_use]
pub fn input_schema(model: &Schema) -> Schema {
    let mut schema = model.clone();
    schema
        .properties
        .retain(|name, _| !SERVER_MANAGED_FIELDS.contains(&name.as_str()));
    schema
        .required
        .retain(|name| !SERVER_MANAGED_FIELDS.contains(&name.as_str()));
    schema
}
