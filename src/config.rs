//! # Configuration Module
//!
//! Application settings come from the environment, optionally seeded from a
//! `.env` file in the working directory.
//!
//! ## Environment Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` | `3000` |
//! | `APP_NAME` | `WentFramework API` |
//! | `APP_VERSION` | `1.0.0` |
//! | `APP_ENV` | `development` |
//! | `SWAGGER_OUTPUT` | `docs/swagger.json` |
//! | `WENT_STACK_SIZE` | `0x4000` (decimal or `0x` hex) |
//!
//! ## Usage
//!
//! ```rust
//! use went::config::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.bind_addr(), "0.0.0.0:3000");
//! assert_eq!(config.doc_info().host, "localhost:3000");
//! ```

use crate::openapi::DocInfo;
use std::env;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_STACK_SIZE: usize = 0x4000;
const DOC_DESCRIPTION: &str = "Auto-generated API documentation for WentFramework";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub app_name: String,
    pub app_version: String,
    /// `development`, `production`, ...
    pub app_env: String,
    /// Where `docs generate` writes the document
    pub swagger_output: PathBuf,
    /// Stack size for request coroutines in bytes
    pub stack_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            app_name: "WentFramework API".to_string(),
            app_version: "1.0.0".to_string(),
            app_env: "development".to_string(),
            swagger_output: PathBuf::from("docs/swagger.json"),
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`. Unset or unparsable values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("SERVER_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                debug!(value = %raw, "Ignoring invalid SERVER_PORT");
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            host: non_empty("SERVER_HOST").unwrap_or(defaults.host),
            port,
            app_name: non_empty("APP_NAME").unwrap_or(defaults.app_name),
            app_version: non_empty("APP_VERSION").unwrap_or(defaults.app_version),
            app_env: non_empty("APP_ENV").unwrap_or(defaults.app_env),
            swagger_output: non_empty("SWAGGER_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.swagger_output),
            stack_size: non_empty("WENT_STACK_SIZE")
                .and_then(|v| parse_size(&v))
                .unwrap_or(defaults.stack_size),
        }
    }

    /// Address the HTTP server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Host advertised in the generated document. A wildcard bind address is
    /// not reachable, so it is advertised as `localhost`.
    #[must_use]
    pub fn public_host(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "localhost",
            other => other,
        };
        format!("{host}:{}", self.port)
    }

    /// Metadata for the OpenAPI document.
    #[must_use]
    pub fn doc_info(&self) -> DocInfo {
        DocInfo {
            title: self.app_name.clone(),
            version: self.app_version.clone(),
            description: DOC_DESCRIPTION.to_string(),
            host: self.public_host(),
            base_path: "/api".to_string(),
        }
    }
}

/// Whether an `APP_ENV` value names the production environment.
#[must_use]
pub fn is_production_env(app_env: &str) -> bool {
    app_env.trim().eq_ignore_ascii_case("production")
}

fn parse_size(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

/// Load `.env` from the working directory into the process environment.
/// Variables already set are left alone; a missing file is not an error.
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(err) => debug!(error = %err, "No .env loaded"),
    }
}
