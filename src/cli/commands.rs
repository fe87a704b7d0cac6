use super::routes::{banner, print_routes, route_lines};
use crate::config::AppConfig;
use crate::model::default_models;
use crate::openapi::{assemble, write_document};
use crate::router::app_routes;
use crate::scaffold::{make_model, FileOutcome, ScaffoldOptions};
use crate::server::{AppService, HttpServer};
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line interface for the went framework
#[derive(Parser, Debug)]
#[command(name = "went")]
#[command(about = "WentFramework API server and tooling", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind host (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the registered routes
    Routes,
    /// OpenAPI documentation commands
    Docs {
        #[command(subcommand)]
        command: DocsCommand,
    },
    /// Scaffold a model and its controller from templates
    MakeModel {
        /// Model name, e.g. `Product`
        name: String,

        /// Directory with replacement `model.rs.j2` / `controller.rs.j2`
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Root directory for `models/` and `controllers/`
        #[arg(short, long, default_value = "src")]
        out: PathBuf,

        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum DocsCommand {
    /// Write the OpenAPI document to disk
    Generate {
        /// Output file; `.yaml`/`.yml` selects YAML (defaults to SWAGGER_OUTPUT)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute a parsed command line against the environment configuration.
///
/// # Errors
///
/// Returns an error if the document cannot be assembled or written, the
/// scaffold fails, or the server fails to start.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    run_with_config(cli, AppConfig::from_env())
}

/// Execute `cli` with an explicit configuration.
///
/// # Errors
///
/// See [`run_cli`].
pub fn run_with_config(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(&config)
        }
        Commands::Routes => {
            let router = app_routes();
            let lines = route_lines(&router, &config.doc_info().base_path)
                .context("failed to list routes")?;
            print_routes(&lines);
            Ok(())
        }
        Commands::Docs {
            command: DocsCommand::Generate { output },
        } => {
            let output = output.unwrap_or_else(|| config.swagger_output.clone());
            let doc_info = config.doc_info();
            let doc = assemble(&app_routes(), &default_models(), &doc_info)
                .context("failed to assemble OpenAPI document")?;
            write_document(&doc, &output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Swagger documentation generated: {}", output.display());
            println!(
                "View it at http://{}/swagger/ once the server is running",
                doc_info.host
            );
            Ok(())
        }
        Commands::MakeModel {
            name,
            templates,
            out,
            force,
        } => {
            let opts = ScaffoldOptions {
                out_dir: out,
                templates_dir: templates,
                force,
            };
            let outcomes =
                make_model(&name, &opts).with_context(|| format!("failed to scaffold {name}"))?;
            for outcome in &outcomes {
                match outcome {
                    FileOutcome::Created(p) => println!("Created: {}", p.display()),
                    FileOutcome::Overwritten(p) => println!("Overwritten: {}", p.display()),
                    FileOutcome::Skipped(p) => println!("Skipped (already exists): {}", p.display()),
                }
            }
            println!("Files created successfully!");
            Ok(())
        }
    }
}

fn serve(config: &AppConfig) -> anyhow::Result<()> {
    may::config().set_stack_size(config.stack_size);

    let router = app_routes();
    router.log_summary();
    for line in banner(config) {
        println!("{line}");
    }
    let lines = route_lines(&router, &config.doc_info().base_path)
        .context("failed to list routes")?;
    print_routes(&lines);

    let service = AppService::new(router, default_models(), config.doc_info());
    let addr = config.bind_addr();
    let handle = HttpServer(service)
        .start(addr.as_str())
        .with_context(|| format!("failed to start server on {addr}"))?;
    match handle.wait_ready() {
        Ok(()) => info!(addr = %handle.addr(), env = %config.app_env, "Server started"),
        Err(e) => warn!(addr = %handle.addr(), error = %e, "Health check not answering yet"),
    }
    handle
        .join()
        .map_err(|e| anyhow!("server thread panicked: {e:?}"))
}
