use clap::Parser;
use went::cli::{run_cli, Cli};
use went::config::load_dotenv;
use went::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    load_dotenv();
    let _guard = init_logging_with_config(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
