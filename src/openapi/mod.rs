//! # OpenAPI Module
//!
//! Synthesizes an OpenAPI 3.0 document from the live route table and the
//! model registry.
//!
//! ## Pipeline
//!
//! 1. Every model is turned into a component schema ([`derive_schema`]), with
//!    field examples from [`example_for`].
//! 2. The route table is flattened into one [`RouteRecord`] per
//!    method/path pair ([`extract_routes`]). Routes missing a path or method
//!    set are skipped.
//! 3. Each record becomes an [`Operation`] ([`build_operation`]). The
//!    resource segment of the path (`users` in `/api/users/{id}`) is resolved
//!    to its model schema to pick the summary and request body.
//! 4. [`assemble`] stitches schemas, operations and metadata into a
//!    [`SpecDocument`], which [`render`] and [`write_document`] serialize.
//!
//! Assembly is a pure function of the two registries: calling it twice yields
//! byte-identical output.
//!
//! ## Example
//!
//! ```rust
//! use went::model::default_models;
//! use went::openapi::{assemble, render, DocFormat, DocInfo};
//! use went::router::app_routes;
//!
//! let doc = assemble(&app_routes(), &default_models(), &DocInfo::default()).unwrap();
//! assert!(doc.components.schemas.contains_key("User"));
//!
//! let json = render(&doc, DocFormat::Json).unwrap();
//! assert!(!json.is_empty());
//! ```

mod assemble;
mod example;
mod extract;
mod operation;
pub mod resource;
mod schema;
mod types;
mod writer;

pub use assemble::{assemble, envelope_schemas, DocInfo};
pub use example::{example_for, EXAMPLE_TIMESTAMP};
pub use extract::{extract_routes, RouteRecord, TagClassifier};
pub use operation::{build_operation, BuildContext, ERROR_RESPONSE_SCHEMA, RESPONSE_SCHEMA};
pub use schema::{derive_schema, schema_for_kind};
pub use types::{
    Components, Info, MediaType, Operation, Parameter, ParameterLocation, PathItem, RequestBody,
    Response, Schema, SchemaKind, Server, SpecDocument, OPENAPI_VERSION, SCHEMA_REF_PREFIX,
};
pub use writer::{render, write_document, DocFormat};
