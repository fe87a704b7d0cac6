//! # Server Module
//!
//! HTTP surface on `may_minihttp`: the users API, the health check, the live
//! OpenAPI document at `/swagger.json` and the Swagger UI under `/swagger/`.
//!
//! ```no_run
//! use went::model::default_models;
//! use went::openapi::DocInfo;
//! use went::router::app_routes;
//! use went::server::{AppService, HttpServer};
//!
//! let service = AppService::new(app_routes(), default_models(), DocInfo::default());
//! let handle = HttpServer(service).start("127.0.0.1:3000").unwrap();
//! handle.wait_ready().unwrap();
//! handle.join().unwrap();
//! ```

mod http_server;
mod request;
mod response;
mod service;

pub use http_server::{responds_ok, HttpServer, ServerHandle, READY_PATH};
pub use request::{client_ip, is_quiet_path, parse_request, redacted_headers, ParsedRequest};
pub use response::{write_body, write_handler_response, write_json, write_preflight, CORS_HEADERS};
pub use service::{AppService, Reply, SPEC_URL};
