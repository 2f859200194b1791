//! aikido - Aikido security API client
//!
//! A command-line interface for the Aikido security scanning API.

use aikido_cli::commands::{self, Cli};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEBUG_FILTER: &str = "ac_core=debug,ac_api=debug,aikido_cli=debug";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output_config = cli.output_config();

    // Logs go to stderr so stdout stays clean for JSON responses
    let filter = if output_config.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli, output_config).await;

    std::process::exit(exit_code.as_i32());
}
