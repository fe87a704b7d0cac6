//! Operation building: turn one [`RouteRecord`] into a documented operation.

use super::extract::RouteRecord;
use super::resource::{
    conventional_summary, has_id_placeholder, input_schema, is_identifier, placeholders,
    resolve_schema, resource_segment, strip_api_prefix,
};
use super::types::{
    MediaType, Operation, Parameter, ParameterLocation, RequestBody, Response, Schema, SchemaKind,
};
use http::Method;
use std::collections::BTreeMap;

/// Envelope schema for successful responses.
pub const RESPONSE_SCHEMA: &str = "Response";
/// Envelope schema for error responses.
pub const ERROR_RESPONSE_SCHEMA: &str = "ErrorResponse";

/// What the builder needs to know about the document being assembled.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Prefix shared by API routes (`/api`)
    pub api_prefix: &'a str,
    /// Component schemas already registered
    pub schemas: &'a BTreeMap<String, Schema>,
}

impl<'a> BuildContext<'a> {
    pub fn new(api_prefix: &'a str, schemas: &'a BTreeMap<String, Schema>) -> Self {
        Self { api_prefix, schemas }
    }

    /// Path of the health check endpoint (`/api/health`).
    fn health_path(&self) -> String {
        format!("{}/health", self.api_prefix.trim_end_matches('/'))
    }

    fn model_for(&self, path: &str) -> Option<(&'a str, &'a Schema)> {
        let resource = resource_segment(path, self.api_prefix)?;
        resolve_schema(resource, self.schemas)
    }
}

/// Build the operation documenting `record`.
#[must_use]
pub fn build_operation(record: &RouteRecord, ctx: &BuildContext<'_>) -> Operation {
    let is_health = record.path == ctx.health_path();
    let model = if is_health {
        None
    } else {
        ctx.model_for(&record.path)
    };

    Operation {
        tags: record.tags.clone(),
        summary: summary(record, ctx, is_health, model.is_some()),
        description: None,
        parameters: path_parameters(&record.path),
        request_body: model.and_then(|(name, schema)| request_body(&record.method, name, schema)),
        responses: if is_health {
            health_responses()
        } else {
            responses(&record.method, &record.path)
        },
    }
}

fn summary(record: &RouteRecord, ctx: &BuildContext<'_>, is_health: bool, resolved: bool) -> String {
    if is_health {
        return "Health check".to_string();
    }
    if resolved {
        if let Some(s) = conventional_summary(&record.method, &record.path, ctx.api_prefix) {
            return s;
        }
    }
    format!(
        "{} {}",
        record.method,
        strip_api_prefix(&record.path, ctx.api_prefix)
    )
}

/// One required path parameter per placeholder. Identifier placeholders are
/// integers described as "Resource ID"; anything else is a string.
fn path_parameters(path: &str) -> Vec<Parameter> {
    placeholders(path)
        .into_iter()
        .map(|name| {
            let (schema, description) = if is_identifier(&name) {
                (Schema::of(SchemaKind::Integer), "Resource ID".to_string())
            } else {
                (Schema::of(SchemaKind::String), format!("Path parameter {name}"))
            };
            Parameter {
                name,
                location: ParameterLocation::Path,
                description: Some(description),
                required: true,
                schema,
            }
        })
        .collect()
}

fn request_body(method: &Method, model_name: &str, model: &Schema) -> Option<RequestBody> {
    let mut schema = match *method {
        Method::POST | Method::PUT | Method::PATCH => input_schema(model),
        _ => return None,
    };
    // partial updates carry any subset of the fields
    if *method == Method::PATCH {
        schema.required.clear();
    }
    Some(RequestBody {
        description: Some(format!("{model_name} data")),
        required: true,
        content: MediaType::json(schema),
    })
}

fn responses(method: &Method, path: &str) -> BTreeMap<String, Response> {
    let success = |description: &str| Response::json(description, Schema::reference(RESPONSE_SCHEMA));
    let failure = |description: &str| {
        Response::json(description, Schema::reference(ERROR_RESPONSE_SCHEMA))
    };

    let mut out = BTreeMap::new();
    let by_id = has_id_placeholder(path);
    match *method {
        Method::GET if by_id => {
            out.insert("200".into(), success("Resource retrieved successfully"));
            out.insert("404".into(), failure("Resource not found"));
        }
        Method::GET => {
            out.insert("200".into(), success("Resources retrieved successfully"));
        }
        Method::POST => {
            out.insert("201".into(), success("Resource created successfully"));
        }
        Method::PUT | Method::PATCH => {
            out.insert("200".into(), success("Resource updated successfully"));
        }
        Method::DELETE => {
            out.insert("200".into(), success("Resource deleted successfully"));
        }
        _ => {}
    }
    out.insert("400".into(), failure("Bad request"));
    out.insert("500".into(), failure("Internal server error"));
    out
}

fn health_responses() -> BTreeMap<String, Response> {
    let schema = Schema::object()
        .with_property(
            "status",
            Schema::of(SchemaKind::String).with_example("healthy"),
        )
        .with_property(
            "message",
            Schema::of(SchemaKind::String).with_example("Server is running"),
        );
    BTreeMap::from([(
        "200".to_string(),
        Response::json("Health check successful", schema),
    )])
}
