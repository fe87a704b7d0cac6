//! Error types for documentation synthesis and scaffolding.
//!
//! Only fatal conditions are represented here. A route that cannot report its
//! path or method set is skipped by the extractor with a `warn!` event and never
//! becomes an error value.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while assembling or persisting an OpenAPI document.
#[derive(Debug, Error)]
pub enum DocError {
    /// The route or model registry could not be traversed at all.
    #[error("failed to walk {registry} registry: {reason}")]
    RegistryWalk {
        /// Which registry failed (`route` or `model`)
        registry: &'static str,
        /// Human-readable cause, including the offending path where known
        reason: String,
    },

    /// The assembled document could not be rendered as JSON.
    #[error("failed to serialize OpenAPI document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The assembled document could not be rendered as YAML.
    #[error("failed to serialize OpenAPI document as YAML: {0}")]
    YamlSerialization(#[from] serde_yaml::Error),

    /// The destination could not be written.
    #[error("failed to write OpenAPI document to {}: {source}", path.display())]
    Write {
        /// Destination that was being written
        path: PathBuf,
        /// Underlying I/O error, surfaced verbatim
        #[source]
        source: io::Error,
    },
}

impl DocError {
    /// Shorthand for a route registry walk failure.
    pub fn route_walk(reason: impl Into<String>) -> Self {
        DocError::RegistryWalk {
            registry: "route",
            reason: reason.into(),
        }
    }

    /// Shorthand for a model registry walk failure.
    pub fn model_walk(reason: impl Into<String>) -> Self {
        DocError::RegistryWalk {
            registry: "model",
            reason: reason.into(),
        }
    }
}

/// Failure while generating model/controller sources from templates.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The model name is not a usable type identifier.
    #[error("invalid model name {0:?}: expected an ASCII identifier starting with a letter")]
    InvalidName(String),

    /// A template failed to load or render.
    #[error("template {name} failed: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// A template or output file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
