//! # went
//!
//! **went** is a small API framework on the `may` coroutine runtime whose
//! OpenAPI 3.0 document is generated from the application itself: the route
//! registry and the model registry are the single source of truth, and the
//! document is rebuilt from them on demand.
//!
//! ## Architecture
//!
//! - **[`model`]** - Model descriptors (`TypeDescriptor`, `TypeKind`) and the
//!   `ModelRegistry` they are read from
//! - **[`router`]** - Route registry with nested groups and path matching
//! - **[`openapi`]** - Schema derivation, example synthesis, route extraction,
//!   operation building, document assembly and serialization
//! - **[`server`]** - HTTP server on `may_minihttp`: users API, health check,
//!   `/swagger.json` and the Swagger UI
//! - **[`controllers`]** - Users controller over an in-memory store
//! - **[`scaffold`]** - Template scaffolding for new models
//! - **[`cli`]** - The `went` binary's commands
//! - **[`config`]**, **[`logging`]**, **[`error`]** - Environment settings,
//!   `tracing` setup and the error taxonomy
//!
//! ### Document Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller as CLI / GET /swagger.json
//!     participant Asm as openapi::assemble
//!     participant Models as ModelRegistry
//!     participant Routes as RouteRegistry
//!     participant Ops as openapi::build_operation
//!
//!     Caller->>Asm: assemble(routes, models, info)
//!     Asm->>Models: models()
//!     Models-->>Asm: Vec<TypeDescriptor>
//!     Asm->>Asm: derive_schema() per model + envelope schemas
//!     Asm->>Routes: walk(visitor)
//!     Routes-->>Asm: RouteRecord per (method, path)
//!     Asm->>Ops: build_operation(record, ctx)
//!     Ops-->>Asm: Operation
//!     Asm-->>Caller: SpecDocument
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use went::model::default_models;
//! use went::openapi::{assemble, render, DocFormat, DocInfo};
//! use went::router::app_routes;
//!
//! let doc = assemble(&app_routes(), &default_models(), &DocInfo::default()).unwrap();
//! assert!(doc.paths.contains_key("/api/users/{id}"));
//!
//! let json = render(&doc, DocFormat::Json).unwrap();
//! assert!(!json.is_empty());
//! ```
//!
//! ## Running the Server
//!
//! ```bash
//! went serve
//! went routes
//! went docs generate --output docs/swagger.json
//! ```

pub mod cli;
pub mod config;
pub mod controllers;
pub mod error;
pub mod logging;
pub mod model;
pub mod openapi;
pub mod router;
pub mod scaffold;
pub mod server;

pub use error::{DocError, ScaffoldError};
pub use model::{default_models, ModelRegistry, StaticModelRegistry};
pub use openapi::{assemble, render, write_document, DocFormat, DocInfo, SpecDocument};
pub use router::{app_routes, RouteRegistry, Router};
