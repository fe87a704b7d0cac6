//! Route listing and start-up banner printed by `went serve` and `went routes`.

use crate::config::AppConfig;
use crate::error::DocError;
use crate::openapi::resource::{conventional_summary, resource_segment, strip_api_prefix};
use crate::openapi::{extract_routes, TagClassifier};
use crate::router::RouteRegistry;
use crate::server::SPEC_URL;
use http::Method;
use std::fmt;

const SWAGGER_UI_PREFIX: &str = "/swagger/";

/// One line of the route listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLine {
    pub method: Method,
    pub path: String,
    pub description: String,
}

impl fmt::Display for RouteLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   {:<6} {} - {}", self.method.as_str(), self.path, self.description)
    }
}

/// Human description of a route.
#[must_use]
pub fn describe_route(method: &Method, path: &str, api_prefix: &str) -> String {
    if path == SPEC_URL {
        return "Swagger JSON specification".to_string();
    }
    if path.starts_with(SWAGGER_UI_PREFIX) {
        return "Swagger UI documentation".to_string();
    }
    if resource_segment(path, api_prefix) == Some("health") {
        return "Health check".to_string();
    }
    conventional_summary(method, path, api_prefix).unwrap_or_else(|| {
        format!(
            "{} {}",
            method.as_str(),
            strip_api_prefix(path, api_prefix)
        )
    })
}

/// Collect the documentable routes, sorted by path then method.
///
/// # Errors
///
/// Propagates a failed registry walk.
pub fn route_lines(
    registry: &dyn RouteRegistry,
    api_prefix: &str,
) -> Result<Vec<RouteLine>, DocError> {
    let mut lines: Vec<RouteLine> = extract_routes(registry, &TagClassifier::new())?
        .into_iter()
        .map(|record| RouteLine {
            description: describe_route(&record.method, &record.path, api_prefix),
            method: record.method,
            path: record.path,
        })
        .collect();
    lines.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.method.as_str().cmp(b.method.as_str()))
    });
    Ok(lines)
}

/// The banner lines shown before the route listing.
#[must_use]
pub fn banner(config: &AppConfig) -> Vec<String> {
    let base = format!("http://{}", config.public_host());
    vec![
        format!("Server starting on :{}", config.port),
        format!("API available at {base}/api"),
        format!("Swagger UI available at {base}{SWAGGER_UI_PREFIX}"),
        format!("Swagger JSON available at {base}{SPEC_URL}"),
    ]
}

pub fn print_routes(lines: &[RouteLine]) {
    println!("Available endpoints:");
    for line in lines {
        println!("{line}");
    }
}
