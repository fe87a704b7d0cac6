use super::request::{client_ip, is_quiet_path, parse_request, redacted_headers, ParsedRequest};
use super::response::{write_body, write_handler_response, write_preflight};
use crate::controllers::{self, HandlerResponse, UserStore};
use crate::model::StaticModelRegistry;
use crate::openapi::{assemble, render, DocFormat, DocInfo};
use crate::router::{self, RouteMatch, Router};
use askama::Template;
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// URL the Swagger UI page loads the document from.
pub const SPEC_URL: &str = "/swagger.json";

#[derive(Template)]
#[template(path = "swagger.html")]
struct SwaggerUiPage<'a> {
    title: &'a str,
    spec_url: &'a str,
}

/// What the service answers with, before it is written to the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(HandlerResponse),
    Html(String),
    /// Rendered OpenAPI document
    Document(Vec<u8>),
    /// Answer to a CORS preflight
    Preflight,
}

impl Reply {
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Reply::Json(hr) => hr.status,
            Reply::Html(_) | Reply::Document(_) | Reply::Preflight => 200,
        }
    }
}

/// The application's HTTP service: route table, model registry and user store.
///
/// Clones share all state; may_minihttp clones the service per connection.
#[derive(Clone)]
pub struct AppService {
    router: Arc<Router>,
    models: Arc<StaticModelRegistry>,
    doc_info: Arc<DocInfo>,
    store: UserStore,
}

impl AppService {
    pub fn new(router: Router, models: StaticModelRegistry, doc_info: DocInfo) -> Self {
        Self {
            router: Arc::new(router),
            models: Arc::new(models),
            doc_info: Arc::new(doc_info),
            store: UserStore::new(),
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: UserStore) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Route and answer one request.
    #[must_use]
    pub fn handle(&self, method: &str, path: &str, body: &str) -> Reply {
        let Ok(method) = Method::from_bytes(method.as_bytes()) else {
            return Reply::Json(HandlerResponse::error(400, "Bad request"));
        };
        if method == Method::OPTIONS {
            return Reply::Preflight;
        }
        match self.router.route_request(&method, path) {
            Some(route) => self.dispatch(&route, path, body),
            None => Reply::Json(HandlerResponse::error(404, "Route not found")),
        }
    }

    fn dispatch(&self, route: &RouteMatch, path: &str, body: &str) -> Reply {
        let id = route.get_path_param("id");
        let hr = match route.handler_name.as_str() {
            router::LIST_USERS => controllers::list_users(&self.store),
            router::GET_USER => controllers::get_user(&self.store, id),
            router::CREATE_USER => controllers::create_user(&self.store, body),
            router::UPDATE_USER => controllers::update_user(&self.store, id, body),
            router::DELETE_USER => controllers::delete_user(&self.store, id),
            router::HEALTH => HandlerResponse::json(
                200,
                json!({"status": "healthy", "message": "Server is running"}),
            ),
            router::SWAGGER_JSON => return self.swagger_json(),
            router::SWAGGER_UI => return self.swagger_ui(path),
            other => {
                error!(handler_name = %other, "No handler registered");
                HandlerResponse::error(500, "Internal server error")
            }
        };
        Reply::Json(hr)
    }

    /// Assemble the document from the live registries on every request.
    fn swagger_json(&self) -> Reply {
        let rendered = assemble(self.router.as_ref(), self.models.as_ref(), &self.doc_info)
            .and_then(|doc| render(&doc, DocFormat::Json));
        match rendered {
            Ok(bytes) => Reply::Document(bytes),
            Err(err) => {
                error!(error = %err, "Failed to generate OpenAPI document");
                Reply::Json(HandlerResponse::error(
                    500,
                    &format!("Error generating swagger spec: {err}"),
                ))
            }
        }
    }

    fn swagger_ui(&self, path: &str) -> Reply {
        if !matches!(path, "/swagger/" | "/swagger/index.html") {
            return Reply::Json(HandlerResponse::error(404, "Route not found"));
        }
        let page = SwaggerUiPage {
            title: &self.doc_info.title,
            spec_url: SPEC_URL,
        };
        match page.render() {
            Ok(html) => Reply::Html(html),
            Err(err) => {
                error!(error = %err, "Failed to render Swagger UI");
                Reply::Json(HandlerResponse::error(500, "Internal server error"))
            }
        }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let started = Instant::now();
        let ParsedRequest {
            method,
            path,
            headers,
            body,
        } = parse_request(req);

        let reply = self.handle(&method, &path, &body);
        let status = reply.status();
        match reply {
            Reply::Json(hr) => write_handler_response(res, &hr),
            Reply::Html(html) => {
                write_body(res, 200, "Content-Type: text/html; charset=utf-8", html.into_bytes());
            }
            Reply::Document(bytes) => write_body(res, 200, "Content-Type: application/json", bytes),
            Reply::Preflight => write_preflight(res),
        }

        let duration_us = started.elapsed().as_micros() as u64;
        if is_quiet_path(&path) {
            debug!(method = %method, path = %path, status, duration_us, "Request served");
        } else {
            info!(
                method = %method,
                path = %path,
                status,
                duration_us,
                client_ip = client_ip(&headers).unwrap_or("-"),
                request_bytes = body.len(),
                "Request served"
            );
            debug!(headers = ?redacted_headers(&headers), "Request headers");
        }
        Ok(())
    }
}
