//! Users CRUD handlers.

use super::store::{UserInput, UserStore};
use super::HandlerResponse;
use tracing::debug;

fn parse_id(raw: Option<&str>) -> Result<u64, HandlerResponse> {
    raw.and_then(|s| s.parse().ok())
        .ok_or_else(|| HandlerResponse::error(400, "Invalid user ID"))
}

fn parse_input(body: &str) -> Result<UserInput, HandlerResponse> {
    serde_json::from_str(body).map_err(|err| {
        debug!(error = %err, "Rejecting user payload");
        HandlerResponse::error(400, "Invalid JSON data")
    })
}

fn not_found() -> HandlerResponse {
    HandlerResponse::error(404, "User not found")
}

/// `GET /api/users`
#[must_use]
pub fn list_users(store: &UserStore) -> HandlerResponse {
    HandlerResponse::success(200, "Users retrieved successfully", Some(&store.list()))
}

/// `GET /api/users/{id}`
#[must_use]
pub fn get_user(store: &UserStore, id: Option<&str>) -> HandlerResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match store.get(id) {
        Some(user) => HandlerResponse::success(200, "User retrieved successfully", Some(&user)),
        None => not_found(),
    }
}

/// `POST /api/users`
#[must_use]
pub fn create_user(store: &UserStore, body: &str) -> HandlerResponse {
    let input = match parse_input(body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };
    if input.name.is_empty() || input.email.is_empty() {
        return HandlerResponse::error(400, "Name and email are required");
    }
    let user = store.create(input);
    debug!(user_id = user.id, "Created user");
    HandlerResponse::success(201, "User created successfully", Some(&user))
}

/// `PUT /api/users/{id}`: empty fields keep their current value.
#[must_use]
pub fn update_user(store: &UserStore, id: Option<&str>, body: &str) -> HandlerResponse {
    let (id, input) = match parse_id(id).and_then(|id| Ok((id, parse_input(body)?))) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };
    match store.update(id, input) {
        Some(user) => HandlerResponse::success(200, "User updated successfully", Some(&user)),
        None => not_found(),
    }
}

/// `DELETE /api/users/{id}`
#[must_use]
pub fn delete_user(store: &UserStore, id: Option<&str>) -> HandlerResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if store.delete(id) {
        HandlerResponse::success::<()>(200, &format!("User {id} deleted successfully"), None)
    } else {
        not_found()
    }
}
