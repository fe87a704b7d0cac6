use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Headers whose values never reach the logs.
const SENSITIVE_HEADERS: [&str; 5] = [
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRequest {
    /// HTTP method as sent (`GET`, `POST`, ...)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Raw body text; empty when none was sent
    pub body: String,
}

/// Extract the parts of a `may_minihttp::Request` the service needs.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let path = req.path().split('?').next().unwrap_or("/").to_string();
    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let mut body = String::new();
    if let Err(err) = req.body().read_to_string(&mut body) {
        debug!(error = %err, "Request body is not readable UTF-8");
        body.clear();
    }

    ParsedRequest {
        method,
        path,
        headers,
        body,
    }
}

/// Copy of `headers` with credential-bearing values replaced by `[REDACTED]`.
#[must_use]
pub fn redacted_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            let value = if SENSITIVE_HEADERS.contains(&k.as_str()) {
                "[REDACTED]".to_string()
            } else {
                v.clone()
            };
            (k.clone(), value)
        })
        .collect()
}

/// Paths that are served without a request log line.
#[must_use]
pub fn is_quiet_path(path: &str) -> bool {
    matches!(
        path,
        "/favicon.ico" | "/robots.txt" | "/health" | "/api/health"
    ) || (path.starts_with("/swagger/") && !path.ends_with(".json"))
}

/// Best-effort client address from proxy headers.
#[must_use]
pub fn client_ip(headers: &HashMap<String, String>) -> Option<&str> {
    if let Some(xff) = headers.get("x-forwarded-for") {
        return xff.split(',').next().map(str::trim).filter(|s| !s.is_empty());
    }
    headers.get("x-real-ip").map(String::as_str)
}
