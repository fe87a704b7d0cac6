//! # Model Module
//!
//! Domain models and the registry the documentation engine reads them from.
//!
//! Each model describes its own wire structure as a [`TypeDescriptor`]: an
//! ordered list of fields, each with a serialization tag and a [`TypeKind`].
//! The schema deriver pattern-matches on that closed set of kinds, so adding a
//! model never requires runtime reflection.
//!
//! ```rust
//! use went::model::{default_models, ModelRegistry};
//!
//! let registry = default_models();
//! let models = registry.models().unwrap();
//! assert_eq!(models[0].name, "User");
//! ```

mod registry;
mod types;
mod user;

pub use registry::{ModelRegistry, StaticModelRegistry};
pub use types::{is_timestamp_name, Describe, FieldDescriptor, TypeDescriptor, TypeKind};
pub use user::User;

/// Registry holding every model the application ships with.
#[must_use]
pub fn default_models() -> StaticModelRegistry {
    StaticModelRegistry::new().with::<User>()
}
