//! In-memory console.

use super::Console;
use std::sync::Mutex;

/// Console that records everything written to it.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    out: Mutex<String>,
    err: Mutex<String>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to the output stream so far.
    pub fn out(&self) -> String {
        lock(&self.out).clone()
    }

    /// Everything written to the error stream so far.
    pub fn err(&self) -> String {
        lock(&self.err).clone()
    }
}

fn lock(buf: &Mutex<String>) -> std::sync::MutexGuard<'_, String> {
    buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn push_line(buf: &Mutex<String>, prefix: &str, msg: &str) {
    let mut buf = lock(buf);
    buf.push_str(prefix);
    buf.push_str(msg);
    buf.push('\n');
}

impl Console for MemoryConsole {
    fn write_out(&self, text: &str) {
        lock(&self.out).push_str(text);
    }

    fn write_err(&self, text: &str) {
        lock(&self.err).push_str(text);
    }

    fn report_info(&self, msg: &str) {
        push_line(&self.out, "usbipd: ", msg);
    }

    fn report_warning(&self, msg: &str) {
        push_line(&self.err, "Warning: ", msg);
    }

    fn report_error(&self, msg: &str) {
        push_line(&self.err, "Error: ", msg);
    }
}
