//! ac-core: Core library for the aikido CLI
//!
//! This crate provides the pieces shared by the API client and the CLI:
//! - Error type with exit code mapping
//! - HTTP failure model used for user-facing error reporting
//! - Configuration file management
//!
//! It has no HTTP stack of its own, so the failure model can be built and
//! tested without a network.

pub mod config;
pub mod error;
pub mod http;

pub use config::{Config, ConfigManager, ResolvedConfig};
pub use error::{Error, Result};
pub use http::{HttpFailure, StatusFailure};
