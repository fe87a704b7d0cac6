//! The application's route table.

use super::core::{RouteEntry, Router};
use http::Method;

pub const LIST_USERS: &str = "list_users";
pub const GET_USER: &str = "get_user";
pub const CREATE_USER: &str = "create_user";
pub const UPDATE_USER: &str = "update_user";
pub const DELETE_USER: &str = "delete_user";
pub const HEALTH: &str = "health";
pub const SWAGGER_JSON: &str = "swagger_json";
pub const SWAGGER_UI: &str = "swagger_ui";

/// Build the route table served by `went serve`.
///
/// The Swagger UI is mounted as a prefix route without a method set, so it
/// serves every request under `/swagger/` and never appears in the generated
/// document.
#[must_use]
pub fn app_routes() -> Router {
    let mut router = Router::new();
    router.group("/api", |api| {
        user_routes(api);
        health_routes(api);
    });
    swagger_routes(&mut router);
    router
}

fn user_routes(api: &mut Router) {
    api.route(Method::GET, "/users", LIST_USERS)
        .route(Method::GET, "/users/{id}", GET_USER)
        .route(Method::POST, "/users", CREATE_USER)
        .route(Method::PUT, "/users/{id}", UPDATE_USER)
        .route(Method::DELETE, "/users/{id}", DELETE_USER);
}

fn health_routes(api: &mut Router) {
    api.route(Method::GET, "/health", HEALTH);
}

fn swagger_routes(router: &mut Router) {
    router
        .route(Method::GET, "/swagger.json", SWAGGER_JSON)
        .add(RouteEntry::new(SWAGGER_UI).path_prefix("/swagger/"));
}
