//! Output formatting utilities
//!
//! Console messages, quiet and debug modes, the API error reporter and the
//! progress spinner. Error output is never suppressed; everything else goes
//! through the quiet check.

mod formatter;
pub mod http_error;
mod spinner;

pub use formatter::Formatter;
pub use http_error::ErrorReport;
pub use spinner::Spinner;

/// Environment variable enabling quiet mode when set to any non-empty value
pub const QUIET_ENV: &str = "QUIET";

/// Environment variable enabling debug output when set to `true` or `1`
pub const DEBUG_ENV: &str = "CLI_DEBUG";

/// Environment variable disabling colors when set to any non-empty value
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Output configuration derived from the environment and CLI flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress non-error output
    pub quiet: bool,
    /// Print debug values
    pub debug: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable the spinner
    pub no_progress: bool,
}

impl OutputConfig {
    /// Read output modes from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read output modes through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());

        Self {
            quiet: is_set(QUIET_ENV),
            debug: lookup(DEBUG_ENV).is_some_and(|v| v == "true" || v == "1"),
            no_color: is_set(NO_COLOR_ENV),
            no_progress: false,
        }
    }

    /// Turn on every mode that is on in `other`
    pub fn merge(self, other: OutputConfig) -> Self {
        Self {
            quiet: self.quiet || other.quiet,
            debug: self.debug || other.debug,
            no_color: self.no_color || other.no_color,
            no_progress: self.no_progress || other.no_progress,
        }
    }
}
