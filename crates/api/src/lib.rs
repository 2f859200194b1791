//! ac-api: Aikido API adapter for the aikido CLI
//!
//! Wraps reqwest and turns every failure into an [`ac_core::HttpFailure`].

pub mod classify;
pub mod client;

pub use classify::{classify, status_failure};
pub use client::ApiClient;
