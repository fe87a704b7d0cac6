//! Structured logging initialisation.
//!
//! All output goes through `tracing`. The subscriber is configured from
//! `WENT_LOG_*` environment variables:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `WENT_LOG_LEVEL` | `info` | trace/debug/info/warn/error |
//! | `WENT_LOG_FORMAT` | `pretty` (`json` when `APP_ENV=production`) | json/pretty |
//! | `WENT_LOG_TARGET_FILTER` | unset | extra comma-separated filter directives |
//! | `WENT_LOG_INCLUDE_LOCATION` | `false` | include file:line |
//! | `WENT_LOG_ASYNC` | `false` | buffered, non-blocking stdout |
//! | `WENT_LOG_STORAGE` | `stdout` | stdout/file |
//! | `WENT_LOG_DIR` | `logs` | directory for file storage |
//!
//! File storage writes `wentframework.log` with daily rotation, always
//! through the non-blocking writer.
//! `RUST_LOG`, when set, replaces the level-derived filter entirely.

use crate::config::is_production_env;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStorage {
    Stdout,
    /// Daily-rotated file under [`LogConfig::log_dir`]
    File,
}

impl LogStorage {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "file" => LogStorage::File,
            _ => LogStorage::Stdout,
        }
    }
}

/// File name prefix of the rotated log files.
pub const LOG_FILE_NAME: &str = "wentframework.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Route output through a background writer thread
    pub async_logging: bool,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
    pub storage: LogStorage,
    pub log_dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            async_logging: false,
            target_filter: None,
            include_location: false,
            storage: LogStorage::Stdout,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl LogConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup("APP_ENV").is_some_and(|e| is_production_env(&e));
        let default_format = if production { "json" } else { "pretty" };
        let flag = |key: &str| {
            lookup(key)
                .and_then(|s| s.parse().ok())
                .unwrap_or(false)
        };

        Self {
            log_level: lookup("WENT_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: LogFormat::parse(
                &lookup("WENT_LOG_FORMAT").unwrap_or_else(|| default_format.to_string()),
            ),
            async_logging: flag("WENT_LOG_ASYNC"),
            target_filter: lookup("WENT_LOG_TARGET_FILTER"),
            include_location: flag("WENT_LOG_INCLUDE_LOCATION"),
            storage: lookup("WENT_LOG_STORAGE")
                .map_or(LogStorage::Stdout, |s| LogStorage::parse(&s)),
            log_dir: lookup("WENT_LOG_DIR")
                .filter(|d| !d.trim().is_empty())
                .map_or_else(|| PathBuf::from("logs"), PathBuf::from),
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        // client disconnects are logged at info/debug by the HTTP server
        if let Ok(directive) = "may_minihttp=warn".parse() {
            filter = filter.add_directive(directive);
        }

        if let Some(target_filter) = &self.target_filter {
            for directive in target_filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                match directive.parse() {
                    Ok(d) => filter = filter.add_directive(d),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {directive}"),
                }
            }
        }
        filter
    }
}

/// Keeps the background writer alive; drop it on shutdown to flush.
#[derive(Debug)]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use went::logging::{init_logging_with_config, LogConfig};
///
/// let _guard = init_logging_with_config(&LogConfig::from_env())
///     .expect("Failed to initialize logging");
/// ```
pub fn init_logging_with_config(config: &LogConfig) -> Result<LoggingGuard> {
    let (writer, worker) = if config.storage == LogStorage::File {
        let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
        let (nb, guard) = tracing_appender::non_blocking(appender);
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(nb), Some(guard))
    } else if config.async_logging {
        let (nb, guard) = tracing_appender::non_blocking(std::io::stdout());
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(nb), Some(guard))
    } else {
        (
            tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stdout),
            None,
        )
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(LoggingGuard { _worker: worker })
}
