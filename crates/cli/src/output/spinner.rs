//! Terminal spinner for in-flight API calls
//!
//! In quiet mode (or with `--no-progress`) the spinner is hidden and every
//! call on it is a no-op, so callers never have to check for its presence.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use super::{Formatter, OutputConfig};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Spinner wrapper
#[derive(Debug)]
pub struct Spinner {
    config: OutputConfig,
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Start a spinner showing `message`
    pub fn start(config: OutputConfig, message: &str) -> Self {
        let bar = if config.quiet || config.no_progress {
            None
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.magenta} {msg}")
                    .expect("valid template"),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(TICK_INTERVAL);
            Some(bar)
        };

        Self { config, bar }
    }

    /// Replace the spinner text
    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Stop with a success mark and leave `message` on screen
    pub fn succeed(&self, message: &str) {
        let mark = Formatter::new(self.config).paint(style("✔").green().for_stderr());
        self.finish_with(format!("{mark} {message}"));
    }

    /// Stop with a failure mark and leave `message` on screen
    pub fn fail(&self, message: &str) {
        let mark = Formatter::new(self.config).paint(style("✖").red().for_stderr());
        self.finish_with(format!("{mark} {message}"));
    }

    /// Stop and clear the spinner line
    pub fn stop(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is drawn at all
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    fn finish_with(&self, line: String) {
        if let Some(bar) = &self.bar {
            bar.set_style(ProgressStyle::default_spinner().template("{msg}").expect("valid template"));
            bar.finish_with_message(line);
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar
            && !bar.is_finished()
        {
            bar.finish_and_clear();
        }
    }
}
