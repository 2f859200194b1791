//! CLI command definitions and execution
//!
//! Each command receives the merged output configuration and returns the
//! exit code the process terminates with.

use clap::{Args, Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod apikey;
mod get;

/// aikido - Aikido security API client
///
/// A command-line client for the Aikido security scanning API, meant to be
/// run from CI pipelines.
#[derive(Parser, Debug)]
#[command(name = "aikido")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress non-error output (same as setting QUIET)
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Print debug output (same as setting CLI_DEBUG=true)
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable the progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings shared by commands that call the API
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// API key, overrides the stored key
    #[arg(long, global = true, env = "AIKIDO_API_KEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// Base URL of the Aikido API
    #[arg(long, global = true, env = "AIKIDO_API_URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store the API key used for subsequent commands
    Apikey(apikey::ApikeyArgs),

    /// Send a GET request to the API and print the JSON response
    Get(get::GetArgs),
}

impl Cli {
    /// Output modes from the environment with command line flags applied
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::from_env().merge(OutputConfig {
            quiet: self.quiet,
            debug: self.debug,
            no_color: self.no_color,
            no_progress: self.no_progress,
        })
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli, output_config: OutputConfig) -> ExitCode {
    match cli.command {
        Commands::Apikey(args) => apikey::execute(args, output_config).await,
        Commands::Get(args) => get::execute(args, cli.api, output_config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_with_global_flags() {
        let cli = Cli::try_parse_from(["aikido", "get", "/api/ping", "--quiet", "--debug"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Get(_)));
    }

    #[test]
    fn test_parse_apikey() {
        let cli = Cli::try_parse_from(["aikido", "apikey", "AIK_CI_abc"]).unwrap();
        match cli.command {
            Commands::Apikey(args) => assert_eq!(args.key, "AIK_CI_abc"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_base_url_flag() {
        let cli = Cli::try_parse_from([
            "aikido",
            "--base-url",
            "http://localhost:8080",
            "get",
            "/",
        ])
        .unwrap();
        assert_eq!(cli.api.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["aikido"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
