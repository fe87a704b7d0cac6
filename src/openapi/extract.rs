//! Route extraction: flatten a route registry into one record per method.

use super::resource::resource_for_model;
use crate::error::DocError;
use crate::model::TypeDescriptor;
use crate::router::{RouteEntry, RouteRegistry};
use http::Method;
use tracing::{debug, warn};

pub const HEALTH_TAG: &str = "Health";
pub const DEFAULT_TAG: &str = "API";

/// One HTTP method bound to one path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub method: Method,
    pub path: String,
    pub tags: Vec<String>,
}

impl RouteRecord {
    /// Record with tags already chosen.
    pub fn new(method: Method, path: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            method,
            path: path.into(),
            tags,
        }
    }
}

/// Assigns tags to paths by resource segment.
///
/// A path whose segments include a registered resource (`users`) is tagged
/// with its capitalised name (`Users`). `health` maps to `Health`; anything
/// else is `API`.
#[derive(Debug, Clone, Default)]
pub struct TagClassifier {
    resources: Vec<(String, String)>,
}

impl TagClassifier {
    /// Classifier that only knows about the health endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier with one resource per registered model.
    #[must_use]
    pub fn from_models(models: &[TypeDescriptor]) -> Self {
        let mut classifier = Self::new();
        for model in models {
            classifier = classifier.with_resource(&resource_for_model(&model.name));
        }
        classifier
    }

    #[must_use]
    pub fn with_resource(mut self, segment: &str) -> Self {
        let tag = capitalize(segment);
        if !self.resources.iter().any(|(s, _)| s == segment) {
            self.resources.push((segment.to_string(), tag));
        }
        self
    }

    /// Tags for a path template.
    #[must_use]
    pub fn classify(&self, path: &str) -> Vec<String> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        for (segment, tag) in &self.resources {
            if segments.contains(&segment.as_str()) {
                return vec![tag.clone()];
            }
        }
        if segments.contains(&"health") {
            return vec![HEALTH_TAG.to_string()];
        }
        vec![DEFAULT_TAG.to_string()]
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Walk `registry` and emit one record per (method, path) pair.
///
/// Routes without a path template or without a method set are skipped.
///
/// # Errors
///
/// Propagates any failure of the registry walk itself.
pub fn extract_routes(
    registry: &dyn RouteRegistry,
    classifier: &TagClassifier,
) -> Result<Vec<RouteRecord>, DocError> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    registry.walk(&mut |entry: &RouteEntry| {
        let Some(path) = entry.path_template() else {
            warn!(handler_name = %entry.handler_name(), "Skipping route without a path template");
            skipped += 1;
            return Ok(());
        };
        let Some(methods) = entry.accepted_methods() else {
            debug!(path = %path, handler_name = %entry.handler_name(), "Skipping route without methods");
            skipped += 1;
            return Ok(());
        };
        let tags = classifier.classify(path);
        for method in methods {
            records.push(RouteRecord::new(method.clone(), path, tags.clone()));
        }
        Ok(())
    })?;

    debug!(records = records.len(), skipped, "Extracted routes");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Describe, User};
    use crate::router::{app_routes, Router};

    #[test]
    fn test_classify() {
        let c = TagClassifier::from_models(&[User::describe()]);
        assert_eq!(c.classify("/api/users"), vec!["Users"]);
        assert_eq!(c.classify("/api/users/{id}"), vec!["Users"]);
        assert_eq!(c.classify("/api/health"), vec!["Health"]);
        assert_eq!(c.classify("/api/orders"), vec!["API"]);
        // segment match, not substring
        assert_eq!(c.classify("/api/superusers"), vec!["API"]);
    }

    #[test]
    fn test_classify_without_models() {
        let c = TagClassifier::new();
        assert_eq!(c.classify("/api/users"), vec!["API"]);
        assert_eq!(c.classify("/api/health"), vec!["Health"]);
    }

    #[test]
    fn test_one_record_per_method() {
        let mut router = Router::new();
        router.add(
            RouteEntry::new("items")
                .path("/api/items")
                .methods([Method::GET, Method::POST]),
        );
        let records = extract_routes(&router, &TagClassifier::new()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].method, Method::GET);
        assert_eq!(records[1].method, Method::POST);
        assert!(records.iter().all(|r| r.path == "/api/items"));
    }

    #[test]
    fn test_malformed_routes_skipped() {
        let mut router = Router::new();
        router.add(RouteEntry::new("no_path").methods([Method::GET]));
        router.add(RouteEntry::new("no_methods").path("/api/things"));
        router.route(Method::GET, "/api/ok", "ok");
        let records = extract_routes(&router, &TagClassifier::new()).unwrap();
        assert_eq!(records, vec![RouteRecord::new(Method::GET, "/api/ok", vec!["API".into()])]);
    }

    #[test]
    fn test_app_routes_exclude_swagger_ui() {
        let records = extract_routes(&app_routes(), &TagClassifier::new()).unwrap();
        assert_eq!(records.len(), 7);
        assert!(records.iter().all(|r| !r.path.starts_with("/swagger/")));
    }

    struct Broken;

    impl RouteRegistry for Broken {
        fn walk(&self, _visitor: &mut crate::router::RouteVisitor<'_>) -> Result<(), DocError> {
            Err(DocError::route_walk("table is gone"))
        }
    }

    #[test]
    fn test_walk_failure_propagates() {
        let err = extract_routes(&Broken, &TagClassifier::new()).unwrap_err();
        assert!(matches!(err, DocError::RegistryWalk { registry: "route", .. }));
    }
}
