//! Configuration management for usbipd.
//!
//! Provides XDG-compliant settings lookup. Nothing is ever written back.

mod settings;

pub use settings::{AppSettings, Paths};
