use crate::controllers::HandlerResponse;
use may_minihttp::Response;
use serde_json::Value;

/// CORS headers attached to every response.
pub const CORS_HEADERS: [&str; 3] = [
    "Access-Control-Allow-Origin: *",
    "Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS",
    "Access-Control-Allow-Headers: Content-Type, Authorization, X-Requested-With",
];

pub(crate) fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

fn write_cors(res: &mut Response) {
    for header in CORS_HEADERS {
        res.header(header);
    }
}

/// Write `body` with an explicit content type.
pub fn write_body(res: &mut Response, status: u16, content_type: &'static str, body: Vec<u8>) {
    res.status_code(status as usize, status_reason(status));
    res.header(content_type);
    write_cors(res);
    res.body_vec(body);
}

/// Serialize `body` as JSON.
pub fn write_json(res: &mut Response, status: u16, body: &Value) {
    write_body(
        res,
        status,
        "Content-Type: application/json",
        body.to_string().into_bytes(),
    );
}

pub fn write_handler_response(res: &mut Response, hr: &HandlerResponse) {
    write_json(res, hr.status, &hr.body);
}

/// Empty 200 answer to a CORS preflight.
pub fn write_preflight(res: &mut Response) {
    res.status_code(200, "OK");
    write_cors(res);
}
