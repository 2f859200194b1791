//! Output formatter for console messages
//!
//! Informational output respects quiet mode, debug output respects debug
//! mode, errors are always printed.

use std::io::{self, Write};

use console::{StyledObject, style};
use serde::Serialize;

use super::OutputConfig;
use crate::exit_code::ExitCode;

/// Formatter for CLI output
///
/// Each printing method has a `*_to` variant taking the destination writer.
/// The plain variants write to stdout (messages, debug values) or stderr
/// (warnings, errors). Write failures on the terminal are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if colors are enabled
    ///
    /// Even when enabled, console only emits colors on a terminal.
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color
    }

    pub(crate) fn paint<D>(&self, styled: StyledObject<D>) -> StyledObject<D> {
        if !self.colors_enabled() {
            styled.force_styling(false)
        } else {
            styled
        }
    }

    /// Print a console message (respects quiet mode)
    pub fn log(&self, message: &str) {
        let _ = self.log_to(&mut io::stdout().lock(), message);
    }

    /// Write a console message to `out` unless quiet mode is on
    pub fn log_to<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        if self.config.quiet {
            return Ok(());
        }
        writeln!(out, "{message}")
    }

    /// Print a value when debug output is enabled
    ///
    /// Strings are printed as-is, everything else as compact JSON.
    /// Quiet mode does not affect debug output.
    pub fn debug<T: Serialize + ?Sized>(&self, value: &T) {
        let _ = self.debug_to(&mut io::stdout().lock(), value);
    }

    /// Write a debug value to `out` when debug output is enabled
    pub fn debug_to<W: Write, T: Serialize + ?Sized>(
        &self,
        out: &mut W,
        value: &T,
    ) -> io::Result<()> {
        if !self.config.debug {
            return Ok(());
        }

        let text = match serde_json::to_value(value) {
            Ok(serde_json::Value::String(s)) => s,
            Ok(other) => other.to_string(),
            Err(e) => format!("<unserializable: {e}>"),
        };
        writeln!(out, "{}", self.paint(style(text).blue()))
    }

    /// Output a success message
    pub fn success(&self, message: &str) {
        let _ = self.success_to(&mut io::stdout().lock(), message);
    }

    /// Write a success message to `out` unless quiet mode is on
    pub fn success_to<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        if self.config.quiet {
            return Ok(());
        }
        writeln!(out, "{} {message}", self.paint(style("✓").green()))
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        let _ = self.warning_to(&mut io::stderr().lock(), message);
    }

    /// Write a warning to `out` unless quiet mode is on
    pub fn warning_to<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        if self.config.quiet {
            return Ok(());
        }
        writeln!(out, "{} {message}", self.paint(style("⚠").yellow().for_stderr()))
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode, and are printed
    /// exactly as given.
    pub fn error(&self, message: &str) {
        let _ = self.error_to(&mut io::stderr().lock(), message);
    }

    /// Write an error message to `out`
    pub fn error_to<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}", self.paint(style(message).red().for_stderr()))
    }

    /// Print an error and hand back the exit code the process should end with
    pub fn fail(&self, message: &str, exit_code: ExitCode) -> ExitCode {
        self.error(message);
        exit_code
    }
}
