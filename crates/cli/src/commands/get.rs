//! get command - Send a GET request to the API
//!
//! Shows a spinner while the request is in flight and reports failures
//! through the API error reporter.

use ac_api::ApiClient;
use ac_core::ConfigManager;
use clap::Args;

use super::ApiArgs;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner, http_error};

/// Send a GET request
#[derive(Args, Debug)]
pub struct GetArgs {
    /// API path, relative to the base URL (e.g. /api/integrations/continuous_integration/scan/repository)
    pub path: String,
}

/// Execute the get command
pub async fn execute(args: GetArgs, api: ApiArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let resolved = match ConfigManager::new()
        .and_then(|m| m.load())
        .and_then(|c| c.resolve(api.apikey, api.base_url))
    {
        Ok(r) => r,
        Err(e) => return formatter.fail(&e.to_string(), ExitCode::from(&e)),
    };

    let client = match ApiClient::from_config(&resolved) {
        Ok(c) => c,
        Err(e) => return fail(&formatter, &e),
    };
    formatter.debug(&format!("GET {} {}", client.base_url(), args.path));

    let spinner = Spinner::start(output_config, &format!("Requesting {}", args.path));
    let result = client.get_json(&args.path).await;

    match result {
        Ok(value) => {
            spinner.stop();
            match serde_json::to_string_pretty(&value) {
                Ok(json) => formatter.log(&json),
                Err(e) => return formatter.fail(&e.to_string(), ExitCode::GeneralError),
            }
            ExitCode::Success
        }
        Err(e) => {
            spinner.fail(&format!("Request to {} failed", args.path));
            fail(&formatter, &e)
        }
    }
}

fn fail(formatter: &Formatter, err: &ac_core::Error) -> ExitCode {
    match err.as_http() {
        Some(failure) => http_error::report(formatter, failure),
        None => formatter.fail(&err.to_string(), ExitCode::from(err)),
    }
}
