use super::core::{RouteEntry, Router};
use crate::error::DocError;

/// Visitor invoked once per registered route.
pub type RouteVisitor<'a> = dyn FnMut(&RouteEntry) -> Result<(), DocError> + 'a;

/// A route table that can be walked for introspection.
///
/// Implementations visit every route, including routes in nested groups. Order
/// is whatever the registry considers natural; consumers must not rely on it.
pub trait RouteRegistry {
    /// Walk every route.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::RegistryWalk`] if the table itself cannot be
    /// traversed, or the first error returned by `visitor`.
    fn walk(&self, visitor: &mut RouteVisitor<'_>) -> Result<(), DocError>;
}

impl RouteRegistry for Router {
    fn walk(&self, visitor: &mut RouteVisitor<'_>) -> Result<(), DocError> {
        self.visit(visitor)
    }
}
