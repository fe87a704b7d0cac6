//! # CLI Module
//!
//! The `went` command line: run the server and the developer tooling around it.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Print the start-up banner and the route listing, then serve the API:
//!
//! ```bash
//! went serve --port 8080
//! ```
//!
//! ### `routes`
//!
//! Print every documentable route, sorted by path then method:
//!
//! ```bash
//! went routes
//! ```
//!
//! ### `docs generate`
//!
//! Assemble the OpenAPI document and write it to disk. A `.yaml`/`.yml`
//! extension selects YAML:
//!
//! ```bash
//! went docs generate --output docs/swagger.json
//! ```
//!
//! ### `make-model`
//!
//! Scaffold a model and controller from templates:
//!
//! ```bash
//! went make-model Product --out src --force
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use went::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! # fn main() -> anyhow::Result<()> {
//! let cli = Cli::parse();
//! run_cli(cli)?;
//! # Ok(())
//! # }
//! ```

mod commands;
mod routes;

pub use commands::{run_cli, run_with_config, Cli, Commands, DocsCommand};
pub use routes::{banner, describe_route, print_routes, route_lines, RouteLine};
