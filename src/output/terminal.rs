//! Styled terminal console.

use super::Console;
use console::style;
use std::io::{self, Write};

/// Console writing to stdout/stderr with colored prefixes.
#[derive(Debug, Clone, Default)]
pub struct TerminalConsole {
    quiet: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress informational messages. Warnings and errors still print.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Console for TerminalConsole {
    fn write_out(&self, text: &str) {
        // A closed stdout is not worth failing the command over.
        let _ = io::stdout().lock().write_all(text.as_bytes());
    }

    fn write_err(&self, text: &str) {
        let _ = io::stderr().lock().write_all(text.as_bytes());
    }

    fn report_info(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", style("usbipd:").blue().bold(), msg);
        }
    }

    fn report_warning(&self, msg: &str) {
        eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
    }

    fn report_error(&self, msg: &str) {
        eprintln!("{} {}", style("Error:").red().bold(), msg);
    }
}
