use super::extract::{extract_routes, TagClassifier};
use super::operation::{build_operation, BuildContext, ERROR_RESPONSE_SCHEMA, RESPONSE_SCHEMA};
use super::schema::derive_schema;
use super::types::{Components, Info, PathItem, Schema, SchemaKind, Server, SpecDocument, OPENAPI_VERSION};
use crate::error::DocError;
use crate::model::ModelRegistry;
use crate::router::RouteRegistry;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Document metadata supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    /// Advertised `host[:port]`
    pub host: String,
    /// Prefix shared by API routes (`/api`)
    pub base_path: String,
}

impl DocInfo {
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://{}", self.host)
    }
}

impl Default for DocInfo {
    fn default() -> Self {
        Self {
            title: "WentFramework API".to_string(),
            version: "1.0.0".to_string(),
            description: "API documentation".to_string(),
            host: "localhost:3000".to_string(),
            base_path: "/api".to_string(),
        }
    }
}

/// The two envelope schemas every document carries.
#[must_use]
pub fn envelope_schemas() -> [(String, Schema); 2] {
    let mut data = Schema::object();
    data.additional_properties = Some(true);

    let response = Schema::object()
        .with_property("status", Schema::of(SchemaKind::String).with_example("success"))
        .with_property(
            "message",
            Schema::of(SchemaKind::String).with_example("Operation completed successfully"),
        )
        .with_property("data", data)
        .with_required(&["status", "message"]);

    let error = Schema::object()
        .with_property("status", Schema::of(SchemaKind::String).with_example("error"))
        .with_property(
            "message",
            Schema::of(SchemaKind::String).with_example("Error description"),
        )
        .with_required(&["status", "message"]);

    [
        (RESPONSE_SCHEMA.to_string(), response),
        (ERROR_RESPONSE_SCHEMA.to_string(), error),
    ]
}

/// Build the OpenAPI document for the given registries.
///
/// Component schemas are registered before any operation is built, so every
/// `$ref` an operation emits resolves. A model named like an envelope schema
/// is shadowed by the envelope.
///
/// # Errors
///
/// Fails only when either registry cannot be walked.
pub fn assemble(
    routes: &dyn RouteRegistry,
    models: &dyn ModelRegistry,
    info: &DocInfo,
) -> Result<SpecDocument, DocError> {
    let descriptors = models.models()?;

    let mut schemas = BTreeMap::new();
    for descriptor in &descriptors {
        schemas.insert(descriptor.name.clone(), derive_schema(descriptor));
    }
    for (name, schema) in envelope_schemas() {
        if schemas.insert(name.clone(), schema).is_some() {
            warn!(model = %name, "Model schema shadowed by envelope schema");
        }
    }

    let classifier = TagClassifier::from_models(&descriptors);
    let records = extract_routes(routes, &classifier)?;

    let ctx = BuildContext::new(&info.base_path, &schemas);
    let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();
    for record in &records {
        let operation = build_operation(record, &ctx);
        let item = paths.entry(record.path.clone()).or_default();
        if item.get_operation(&record.method).is_some() {
            debug!(method = %record.method, path = %record.path, "Replacing duplicate operation");
        }
        if item.set(&record.method, operation).is_err() {
            warn!(method = %record.method, path = %record.path, "No OpenAPI slot for method; route not documented");
        }
    }
    paths.retain(|_, item| item.operations().next().is_some());

    let doc = SpecDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: info.title.clone(),
            version: info.version.clone(),
            description: Some(info.description.clone()),
        },
        servers: vec![Server {
            url: info.server_url(),
            description: Some("Development server".to_string()),
        }],
        paths,
        components: Components { schemas },
    };

    let dangling = doc.dangling_refs();
    if !dangling.is_empty() {
        warn!(refs = ?dangling, "Document contains unresolved references");
    }
    info!(
        paths = doc.paths.len(),
        operations = records.len(),
        schemas = doc.components.schemas.len(),
        "Assembled OpenAPI document"
    );
    Ok(doc)
}
