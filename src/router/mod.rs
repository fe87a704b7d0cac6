//! # Router Module
//!
//! The route registry: an ordered table of `(methods, path template, handler)`
//! bindings with mux-style nested groups.
//!
//! ## Overview
//!
//! The router has two consumers:
//!
//! - The HTTP server, which matches concrete request paths (`/api/users/42`)
//!   against templates (`/api/users/{id}`) and dispatches on the handler name.
//! - The documentation engine, which walks the table through
//!   [`RouteRegistry`] to recover method, path and handler metadata.
//!
//! Templates are compiled to anchored regexes when a route is registered, so
//! matching never allocates a pattern per request.
//!
//! ## Example
//!
//! ```rust
//! use went::router::Router;
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.group("/api", |api| {
//!     api.route(Method::GET, "/users/{id}", "get_user");
//! });
//!
//! let m = router.route_request(&Method::GET, "/api/users/7").unwrap();
//! assert_eq!(m.handler_name, "get_user");
//! assert_eq!(m.get_path_param("id"), Some("7"));
//! ```

mod app;
mod core;
mod registry;

pub use app::{
    app_routes, CREATE_USER, DELETE_USER, GET_USER, HEALTH, LIST_USERS, SWAGGER_JSON, SWAGGER_UI,
    UPDATE_USER,
};
pub use core::{RouteEntry, RouteMatch, Router};
pub use registry::{RouteRegistry, RouteVisitor};
