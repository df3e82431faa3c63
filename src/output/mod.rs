//! Console output.
//!
//! Commands never print directly. They write human-readable diagnostics
//! through a [`Console`], so the whole command path can run against an
//! in-memory console in tests.

mod memory;
mod terminal;

pub use memory::MemoryConsole;
pub use terminal::TerminalConsole;

/// Sink for human-readable output.
pub trait Console: Send + Sync {
    /// Write raw text to the output stream (help, version).
    fn write_out(&self, text: &str);

    /// Write raw text to the error stream (pre-rendered diagnostics).
    fn write_err(&self, text: &str);

    /// Report an informational message.
    fn report_info(&self, msg: &str);

    /// Report a warning.
    fn report_warning(&self, msg: &str);

    /// Report an error.
    fn report_error(&self, msg: &str);
}
