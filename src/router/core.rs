//! Router core: route table, grouping and request matching.

use crate::error::DocError;
use http::Method;
use regex::Regex;
use tracing::{debug, info, warn};

/// A single registered route.
///
/// A route normally has a path template and at least one method. Either may be
/// missing for catch-all or half-configured registrations; such routes still
/// dispatch but report `None` to registry walkers.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    path_template: Option<String>,
    methods: Vec<Method>,
    handler_name: String,
    prefix: bool,
    matcher: Option<(Regex, Vec<String>)>,
}

impl RouteEntry {
    /// Start a route bound to `handler_name` with no path and no methods.
    pub fn new(handler_name: impl Into<String>) -> Self {
        Self {
            path_template: None,
            methods: Vec::new(),
            handler_name: handler_name.into(),
            prefix: false,
            matcher: None,
        }
    }

    #[must_use]
    pub fn path(mut self, template: impl Into<String>) -> Self {
        self.path_template = Some(template.into());
        self.prefix = false;
        self
    }

    /// Match every request path that starts with `prefix`.
    #[must_use]
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_template = Some(prefix.into());
        self.prefix = true;
        self
    }

    #[must_use]
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Path template (e.g. `/api/users/{id}`), if the route has one.
    #[must_use]
    pub fn path_template(&self) -> Option<&str> {
        self.path_template.as_deref()
    }

    /// Methods the route accepts, or `None` when none were registered.
    #[must_use]
    pub fn accepted_methods(&self) -> Option<&[Method]> {
        if self.methods.is_empty() {
            None
        } else {
            Some(&self.methods)
        }
    }

    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    #[must_use]
    pub fn is_prefix(&self) -> bool {
        self.prefix
    }

    fn under(mut self, group_prefix: &str) -> Self {
        if let Some(path) = self.path_template.take() {
            self.path_template = Some(format!("{group_prefix}{path}"));
        }
        if !self.prefix {
            self.matcher = self.path_template.as_deref().and_then(compile_template);
        }
        self
    }

    fn match_path(&self, path: &str) -> Option<Vec<(String, String)>> {
        let template = self.path_template.as_deref()?;
        if self.prefix {
            return path.starts_with(template).then(Vec::new);
        }
        let (regex, names) = self.matcher.as_ref()?;
        let caps = regex.captures(path)?;
        Some(
            names
                .iter()
                .enumerate()
                .filter_map(|(i, name)| {
                    caps.get(i + 1)
                        .map(|m| (name.clone(), m.as_str().to_string()))
                })
                .collect(),
        )
    }
}

/// Result of matching a request to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Handler bound to the matched route
    pub handler_name: String,
    /// Path template that matched (e.g. `/api/users/{id}`)
    pub path_template: String,
    /// Placeholder values extracted from the request path, in template order
    pub path_params: Vec<(String, String)>,
}

impl RouteMatch {
    /// Get a path parameter by name (last occurrence wins).
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
enum RouteNode {
    Route(RouteEntry),
    Group(Router),
}

/// Ordered route table with nested groups.
///
/// Groups share a path prefix (`/api`) and keep their own registration order;
/// templates stored on entries are always the full path including every
/// enclosing prefix.
#[derive(Debug, Clone, Default)]
pub struct Router {
    prefix: String,
    nodes: Vec<RouteNode>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full prefix of this router (empty for the root).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Register a fully configured entry.
    pub fn add(&mut self, entry: RouteEntry) -> &mut Self {
        let entry = entry.under(&self.prefix);
        debug!(
            path = entry.path_template().unwrap_or("<none>"),
            methods = ?entry.methods,
            handler_name = %entry.handler_name,
            "Registering route"
        );
        self.nodes.push(RouteNode::Route(entry));
        self
    }

    /// Register `handler_name` for one method on one path template.
    pub fn route(&mut self, method: Method, path: &str, handler_name: &str) -> &mut Self {
        self.add(RouteEntry::new(handler_name).path(path).methods([method]))
    }

    /// Mount a sub-router under `prefix` and let `build` populate it.
    pub fn group<F>(&mut self, prefix: &str, build: F) -> &mut Self
    where
        F: FnOnce(&mut Router),
    {
        let mut child = Router {
            prefix: format!("{}{}", self.prefix, prefix),
            nodes: Vec::new(),
        };
        build(&mut child);
        self.nodes.push(RouteNode::Group(child));
        self
    }

    /// Visit every route depth-first in registration order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error produced by `visitor`.
    pub fn visit<F>(&self, visitor: &mut F) -> Result<(), DocError>
    where
        F: FnMut(&RouteEntry) -> Result<(), DocError> + ?Sized,
    {
        for node in &self.nodes {
            match node {
                RouteNode::Route(entry) => visitor(entry)?,
                RouteNode::Group(child) => child.visit(visitor)?,
            }
        }
        Ok(())
    }

    /// Total number of registered routes, including those in groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| match n {
                RouteNode::Route(_) => 1,
                RouteNode::Group(child) => child.len(),
            })
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Match a request against the table. The first registered route whose
    /// path and method both match wins.
    #[must_use]
    pub fn route_request(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let found = self.find(method, path);
        match &found {
            Some(m) => debug!(
                method = %method,
                path = %path,
                handler_name = %m.handler_name,
                route_pattern = %m.path_template,
                "Route matched"
            ),
            None => debug!(method = %method, path = %path, "No route matched"),
        }
        found
    }

    fn find(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        for node in &self.nodes {
            let found = match node {
                RouteNode::Route(entry) => {
                    let method_ok = entry.methods.is_empty() || entry.methods.contains(method);
                    if !method_ok {
                        continue;
                    }
                    entry.match_path(path).map(|params| RouteMatch {
                        handler_name: entry.handler_name.clone(),
                        path_template: entry.path_template.clone().unwrap_or_default(),
                        path_params: params,
                    })
                }
                RouteNode::Group(child) => child.find(method, path),
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Log a summary of the routing table.
    pub fn log_summary(&self) {
        let mut summary = Vec::new();
        let walked = self.visit(&mut |entry: &RouteEntry| {
            if summary.len() < 10 {
                summary.push(format!(
                    "{:?} {}",
                    entry.methods,
                    entry.path_template().unwrap_or("<none>")
                ));
            }
            Ok(())
        });
        if let Err(err) = walked {
            warn!(error = %err, "Could not summarize routing table");
        }
        info!(
            routes_count = self.len(),
            routes_summary = ?summary,
            "Routing table loaded"
        );
    }
}

/// Compile a path template such as `/users/{id}` into an anchored regex and the
/// ordered list of placeholder names.
pub(crate) fn compile_template(path: &str) -> Option<(Regex, Vec<String>)> {
    let mut pattern = String::with_capacity(path.len() + 5);
    pattern.push('^');
    let mut param_names = Vec::with_capacity(path.matches('{').count());

    for segment in path.split('/') {
        if segment.starts_with('{') && segment.ends_with('}') {
            let param_name = segment
                .trim_start_matches('{')
                .trim_end_matches('}')
                .to_string();
            pattern.push_str("/([^/]+)");
            param_names.push(param_name);
        } else if !segment.is_empty() {
            pattern.push('/');
            pattern.push_str(&regex::escape(segment));
        }
    }
    if path.ends_with('/') || pattern.len() == 1 {
        pattern.push('/');
    }
    pattern.push('$');

    match Regex::new(&pattern) {
        Ok(regex) => Some((regex, param_names)),
        Err(err) => {
            warn!(path = %path, error = %err, "Route template does not compile; route will never match");
            None
        }
    }
}
