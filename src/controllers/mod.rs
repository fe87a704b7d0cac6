//! Request handlers and the JSON envelope they answer with.
//!
//! Every body follows the `Response` / `ErrorResponse` component schemas:
//! `{"status": "success", "message": ..., "data": ...}` or
//! `{"status": "error", "message": ...}`.

mod store;
mod users;

pub use store::{UserInput, UserStore};
pub use users::{create_user, delete_user, get_user, list_users, update_user};

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::error;

/// Status code and JSON body produced by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Success envelope; `data` is omitted when `None`.
    #[must_use]
    pub fn success<T: Serialize + ?Sized>(status: u16, message: &str, data: Option<&T>) -> Self {
        let mut body = Map::new();
        body.insert("status".into(), Value::from("success"));
        body.insert("message".into(), Value::from(message));
        if let Some(data) = data {
            match serde_json::to_value(data) {
                Ok(v) => {
                    body.insert("data".into(), v);
                }
                Err(err) => {
                    error!(error = %err, "Failed to serialize response data");
                    return Self::error(500, "Internal server error");
                }
            }
        }
        Self::json(status, Value::Object(body))
    }

    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({"status": "error", "message": message}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelopes() {
        let ok = HandlerResponse::success(200, "done", Some(&vec![1, 2]));
        assert_eq!(
            ok.body,
            json!({"status": "success", "message": "done", "data": [1, 2]})
        );
        let bare = HandlerResponse::success::<()>(200, "done", None);
        assert!(bare.body.get("data").is_none());
        let err = HandlerResponse::error(404, "missing");
        assert_eq!(err.status, 404);
        assert_eq!(err.body["status"], "error");
    }
}
