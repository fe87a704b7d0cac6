#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for OpenAPI document synthesis
//!
//! # Test Coverage
//!
//! - Schema derivation from model descriptors (field inclusion, required set,
//!   integer and timestamp formats)
//! - Operation building for the users resource and the health check
//! - Document assembly over minimal and full registries
//! - Stable serialization and `$ref` resolution
//! - Duplicate route registration and registry walk failures

use http::Method;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use went::error::DocError;
use went::model::{
    default_models, FieldDescriptor, ModelRegistry, StaticModelRegistry, TypeDescriptor, TypeKind,
};
use went::openapi::{
    assemble, build_operation, derive_schema, render, BuildContext, DocFormat, DocInfo,
    Operation, PathItem, RouteRecord, Schema, SchemaKind, SCHEMA_REF_PREFIX,
};
use went::router::{app_routes, RouteEntry, RouteRegistry, RouteVisitor, Router};

fn product() -> TypeDescriptor {
    TypeDescriptor::new("Product")
        .with_field(FieldDescriptor::tagged("ID", TypeKind::u64(), "id"))
        .with_field(FieldDescriptor::tagged("Name", TypeKind::String, "name"))
        .with_field(FieldDescriptor::tagged("Price", TypeKind::Float, "price"))
        .with_field(FieldDescriptor::tagged("Notes", TypeKind::String, "notes,omitempty"))
        .with_field(FieldDescriptor::tagged("Tags", TypeKind::seq(TypeKind::String), ",omitempty"))
        .with_field(FieldDescriptor::tagged("Secret", TypeKind::String, "-"))
        .with_field(FieldDescriptor::new("Internal", TypeKind::Bool))
        .with_field(FieldDescriptor::tagged(
            "CreatedAt",
            TypeKind::Composite(TypeDescriptor::new("time.Time")),
            "created_at",
        ))
}

fn user_schemas() -> BTreeMap<String, Schema> {
    let models = default_models().models().unwrap();
    models
        .iter()
        .map(|m| (m.name.clone(), derive_schema(m)))
        .collect()
}

fn response_keys(op: &Operation) -> BTreeSet<&str> {
    op.responses.keys().map(String::as_str).collect()
}

#[test]
fn test_schema_includes_tagged_fields_only() {
    let schema = derive_schema(&product());
    let names: BTreeSet<&str> = schema.properties.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        BTreeSet::from(["id", "name", "price", "notes", "tags", "created_at"])
    );
    let required: BTreeSet<&str> = schema.required.iter().map(String::as_str).collect();
    assert_eq!(required, BTreeSet::from(["id", "name", "price", "created_at"]));
}

#[test]
fn test_u64_and_timestamp_formats() {
    let schema = derive_schema(&product());
    let id = &schema.properties["id"];
    assert_eq!(id.kind, Some(SchemaKind::Integer));
    assert_eq!(id.format.as_deref(), Some("int64"));

    let created = &schema.properties["created_at"];
    assert_eq!(created.kind, Some(SchemaKind::String));
    assert_eq!(created.format.as_deref(), Some("date-time"));

    let price = &schema.properties["price"];
    assert_eq!(price.kind, Some(SchemaKind::Number));
    assert!(price.format.is_none());
}

#[test]
fn test_get_user_by_id_operation() {
    let schemas = user_schemas();
    let ctx = BuildContext::new("/api", &schemas);
    let record = RouteRecord::new(Method::GET, "/api/users/{id}", vec!["Users".to_string()]);
    let op = build_operation(&record, &ctx);

    assert_eq!(op.summary, "Get user by ID");
    assert_eq!(op.parameters.len(), 1);
    let param = &op.parameters[0];
    assert_eq!(param.name, "id");
    assert!(param.required);
    assert_eq!(param.schema.kind, Some(SchemaKind::Integer));
    assert_eq!(response_keys(&op), BTreeSet::from(["200", "400", "404", "500"]));
    assert!(op.request_body.is_none());
}

#[test]
fn test_create_user_operation() {
    let schemas = user_schemas();
    let ctx = BuildContext::new("/api", &schemas);
    let record = RouteRecord::new(Method::POST, "/api/users", vec!["Users".to_string()]);
    let op = build_operation(&record, &ctx);

    assert_eq!(op.summary, "Create new user");
    assert_eq!(response_keys(&op), BTreeSet::from(["201", "400", "500"]));
    let body = op.request_body.expect("POST /api/users has a body");
    assert!(body.required);
    let schema = &body.content["application/json"].schema;
    let props: BTreeSet<&str> = schema.properties.keys().map(String::as_str).collect();
    assert_eq!(props, BTreeSet::from(["email", "name"]));
    let required: BTreeSet<&str> = schema.required.iter().map(String::as_str).collect();
    assert_eq!(required, BTreeSet::from(["email", "name"]));
    assert_eq!(schema.properties["name"].example, Some(Value::from("John Doe")));
    assert_eq!(
        schema.properties["email"].example,
        Some(Value::from("john@example.com"))
    );
}

#[test]
fn test_unknown_resource_falls_back_to_generic_summary() {
    let schemas = user_schemas();
    let ctx = BuildContext::new("/api", &schemas);
    let record = RouteRecord::new(Method::POST, "/api/orders", vec!["API".to_string()]);
    let op = build_operation(&record, &ctx);
    assert_eq!(op.summary, "POST /orders");
    assert!(op.request_body.is_none());
    assert_eq!(response_keys(&op), BTreeSet::from(["201", "400", "500"]));
}

#[test]
fn test_health_only_registry() {
    let mut router = Router::new();
    router.route(Method::GET, "/api/health", "health");
    let doc = assemble(&router, &StaticModelRegistry::new(), &DocInfo::default()).unwrap();

    let schema_names: BTreeSet<&str> = doc.components.schemas.keys().map(String::as_str).collect();
    assert_eq!(schema_names, BTreeSet::from(["ErrorResponse", "Response"]));
    assert_eq!(doc.paths.len(), 1);
    let item = &doc.paths["/api/health"];
    assert_eq!(item.operations().count(), 1);
    let op = item.get.as_ref().unwrap();
    assert_eq!(op.summary, "Health check");
    assert_eq!(response_keys(op), BTreeSet::from(["200"]));
    assert_eq!(op.tags, vec!["Health"]);
}

#[test]
fn test_full_document_shape() {
    let info = DocInfo::default();
    let doc = assemble(&app_routes(), &default_models(), &info).unwrap();
    let v: Value = serde_json::to_value(&doc).unwrap();

    assert_eq!(v["openapi"], "3.0.0");
    assert_eq!(v["info"]["title"], "WentFramework API");
    assert_eq!(v["servers"].as_array().unwrap().len(), 1);
    assert_eq!(v["servers"][0]["url"], "http://localhost:3000");

    let paths: BTreeSet<&str> = v["paths"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        BTreeSet::from(["/api/health", "/api/users", "/api/users/{id}", "/swagger.json"])
    );
    assert!(v["paths"]["/api/users/{id}"]["put"]["requestBody"].is_object());
    assert!(v["paths"]["/api/users/{id}"]["delete"]["requestBody"].is_null());
    assert_eq!(v["paths"]["/api/users"]["get"]["tags"][0], "Users");
    assert_eq!(v["paths"]["/swagger.json"]["get"]["tags"][0], "API");
    assert!(v["components"]["schemas"]["User"]["properties"]["email"].is_object());
}

#[test]
fn test_assembly_is_idempotent() {
    let info = DocInfo::default();
    let first = render(
        &assemble(&app_routes(), &default_models(), &info).unwrap(),
        DocFormat::Json,
    )
    .unwrap();
    let second = render(
        &assemble(&app_routes(), &default_models(), &info).unwrap(),
        DocFormat::Json,
    )
    .unwrap();
    assert_eq!(first, second);
}

fn collect_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                if key == "$ref" {
                    if let Some(s) = inner.as_str() {
                        out.push(s.to_string());
                    }
                } else {
                    collect_refs(inner, out);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|i| collect_refs(i, out)),
        _ => {}
    }
}

#[test]
fn test_every_ref_resolves_after_round_trip() {
    let doc = assemble(&app_routes(), &default_models(), &DocInfo::default()).unwrap();
    let bytes = render(&doc, DocFormat::Json).unwrap();
    let v: Value = serde_json::from_slice(&bytes).unwrap();

    let mut refs = Vec::new();
    collect_refs(&v, &mut refs);
    assert!(!refs.is_empty());
    let schemas = v["components"]["schemas"].as_object().unwrap();
    for r in refs {
        let name = r.strip_prefix(SCHEMA_REF_PREFIX).expect("local schema ref");
        assert!(schemas.contains_key(name), "unresolved {r}");
    }
}

#[test]
fn test_duplicate_registration_keeps_one_operation() {
    let mut router = Router::new();
    router.group("/api", |api| {
        api.route(Method::GET, "/users", "list_users")
            .route(Method::GET, "/users", "list_users_v2");
    });
    let doc = assemble(&router, &default_models(), &DocInfo::default()).unwrap();
    let v: Value = serde_json::to_value(&doc).unwrap();
    assert_eq!(v["paths"].as_object().unwrap().len(), 1);
    assert_eq!(v["paths"]["/api/users"].as_object().unwrap().len(), 1);
}

#[test]
fn test_later_operation_wins_in_path_item() {
    let op = |summary: &str| Operation {
        tags: Vec::new(),
        summary: summary.to_string(),
        description: None,
        parameters: Vec::new(),
        request_body: None,
        responses: BTreeMap::new(),
    };
    let mut item = PathItem::default();
    item.set(&Method::GET, op("first")).unwrap();
    item.set(&Method::GET, op("second")).unwrap();
    assert_eq!(item.get_operation(&Method::GET).unwrap().summary, "second");
    assert_eq!(item.operations().count(), 1);
    assert!(item.set(&Method::CONNECT, op("tunnel")).is_err());
}

#[test]
fn test_malformed_routes_are_skipped() {
    let mut router = Router::new();
    router
        .route(Method::GET, "/api/health", "health")
        .add(RouteEntry::new("no_path").methods([Method::GET]))
        .add(RouteEntry::new("no_methods").path("/api/things"));
    let doc = assemble(&router, &StaticModelRegistry::new(), &DocInfo::default()).unwrap();
    let paths: Vec<&String> = doc.paths.keys().collect();
    assert_eq!(paths, vec!["/api/health"]);
}

struct Unreadable;

impl RouteRegistry for Unreadable {
    fn walk(&self, _visitor: &mut RouteVisitor<'_>) -> Result<(), DocError> {
        Err(DocError::route_walk("route table unavailable"))
    }
}

struct BrokenModels;

impl ModelRegistry for BrokenModels {
    fn models(&self) -> Result<Vec<TypeDescriptor>, DocError> {
        Err(DocError::model_walk("descriptor table poisoned"))
    }
}

#[test]
fn test_registry_failures_are_fatal() {
    let err = assemble(&Unreadable, &default_models(), &DocInfo::default()).unwrap_err();
    assert!(matches!(err, DocError::RegistryWalk { registry: "route", .. }));
    assert!(err.to_string().contains("route table unavailable"));

    let err = assemble(&app_routes(), &BrokenModels, &DocInfo::default()).unwrap_err();
    assert!(matches!(err, DocError::RegistryWalk { registry: "model", .. }));
}

#[test]
fn test_write_document_to_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs/nested/swagger.yaml");
    let doc = assemble(&app_routes(), &default_models(), &DocInfo::default()).unwrap();
    went::openapi::write_document(&doc, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    assert_eq!(back["info"]["version"].as_str(), Some("1.0.0"));
}
