use super::types::{Describe, TypeDescriptor};
use crate::error::DocError;
use tracing::debug;

/// Source of the domain models that get a schema in `components.schemas`.
pub trait ModelRegistry {
    /// List every registered model, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::RegistryWalk`] when the registry cannot be read.
    fn models(&self) -> Result<Vec<TypeDescriptor>, DocError>;
}

/// In-memory registry populated at the composition root.
#[derive(Debug, Clone, Default)]
pub struct StaticModelRegistry {
    models: Vec<TypeDescriptor>,
}

impl StaticModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. A later registration with the same name replaces
    /// the earlier one.
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        debug!(model = %descriptor.name, fields = descriptor.fields.len(), "Registering model");
        if let Some(slot) = self.models.iter_mut().find(|m| m.name == descriptor.name) {
            *slot = descriptor;
        } else {
            self.models.push(descriptor);
        }
    }

    /// Register a type that describes itself.
    #[must_use]
    pub fn with<T: Describe>(mut self) -> Self {
        self.register(T::describe());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelRegistry for StaticModelRegistry {
    fn models(&self) -> Result<Vec<TypeDescriptor>, DocError> {
        Ok(self.models.clone())
    }
}
