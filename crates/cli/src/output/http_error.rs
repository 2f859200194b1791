//! User-facing messages for failed API requests
//!
//! A fixed lookup from [`HttpFailure`] to a message and exit code. No retries
//! happen here; the caller terminates with the returned code.

use std::io::{self, Write};

use ac_core::{HttpFailure, StatusFailure};

use super::Formatter;
use crate::exit_code::ExitCode;

const API_NAME: &str = "Aikido API";
const NEW_KEY_URL: &str = "https://app.aikido.dev/settings/integrations/continuous-integration";
const CONTACT_US: &str = "Please contact us if this problem persists.";

/// Message and exit code for a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    pub exit_code: ExitCode,
}

impl ErrorReport {
    fn new(message: String) -> Self {
        Self {
            message,
            exit_code: ExitCode::GeneralError,
        }
    }
}

/// Map a failure to its user-facing report
pub fn describe(failure: &HttpFailure) -> ErrorReport {
    let message = match failure {
        HttpFailure::ConnectionRefused { message } => format!(
            "Could not connect to {API_NAME} ({message}). Please verify your network settings."
        ),
        HttpFailure::Status(status) => describe_status(status),
        HttpFailure::NoResponse { .. } => {
            "No response received from the server. Please try again later.".to_string()
        }
        HttpFailure::Other { message } => format!("Error: ({message}). {CONTACT_US}"),
    };
    ErrorReport::new(message)
}

fn describe_status(failure: &StatusFailure) -> String {
    let status_line = failure.status_line();
    match failure.status {
        401 => format!(
            "{status_line}: The provided api key is most likely no longer valid and has been rotated or revoked. Visit {NEW_KEY_URL} to generate a new key."
        ),
        403 => format!(
            "{status_line}: Could not authenticate with the {API_NAME}. Please verify your Aikido API key."
        ),
        500 => format!(
            "{status_line}: Something went wrong contacting the {API_NAME}. Please try again later."
        ),
        _ => format!(
            "{status_line}: {} {CONTACT_US}",
            failure.body.as_deref().unwrap_or_default()
        ),
    }
}

/// Print the report for `failure` and return the exit code to terminate with
///
/// In debug mode the raw response (status, headers, body) or the raw
/// failure is dumped first.
pub fn report(formatter: &Formatter, failure: &HttpFailure) -> ExitCode {
    report_to(
        formatter,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        failure,
    )
}

/// Same as [`report`], writing debug output to `out` and the message to `err`
pub fn report_to<O: Write, E: Write>(
    formatter: &Formatter,
    out: &mut O,
    err: &mut E,
    failure: &HttpFailure,
) -> ExitCode {
    let _ = match failure {
        HttpFailure::Status(status) => formatter
            .debug_to(out, &status.status)
            .and_then(|()| formatter.debug_to(out, &status.headers))
            .and_then(|()| formatter.debug_to(out, status.body.as_deref().unwrap_or_default())),
        HttpFailure::Other { .. } => formatter.debug_to(out, failure),
        _ => Ok(()),
    };

    let report = describe(failure);
    tracing::debug!(exit_code = report.exit_code.as_i32(), "reporting API failure");
    let _ = formatter.error_to(err, &report.message);
    report.exit_code
}
