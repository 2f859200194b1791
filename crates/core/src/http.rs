//! HTTP failure model
//!
//! Every way a call to the Aikido API can go wrong, reduced to the shapes the
//! CLI reports on. The HTTP client crate produces these values; the CLI turns
//! them into messages and exit codes.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// A failed API request
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HttpFailure {
    /// The server actively refused the connection
    #[error("Connection refused: {message}")]
    ConnectionRefused { message: String },

    /// The server responded with a non-success status code
    #[error("{0}")]
    Status(StatusFailure),

    /// The request was sent but no response was received
    #[error("No response: {message}")]
    NoResponse { message: String },

    /// Anything that happened before a request could be made or after the
    /// response arrived
    #[error("Request failed: {message}")]
    Other { message: String },
}

/// A response with a non-success status code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusFailure {
    /// Numeric status code
    pub status: u16,

    /// Canonical reason phrase, empty for unknown codes
    pub status_text: String,

    /// Response headers, lower-cased names
    pub headers: BTreeMap<String, String>,

    /// Response body, if the server sent a non-empty one
    pub body: Option<String>,
}

impl StatusFailure {
    /// Create a failure with no headers or body
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Attach a response body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    /// Attach a response header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// `"<code> <reason>"`, e.g. `"401 Unauthorized"`
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, self.status_text)
    }
}

impl std::fmt::Display for StatusFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}", self.status_line())
    }
}
