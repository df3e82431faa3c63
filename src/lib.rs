//! # usbipd - Share USB devices with WSL
//!
//! The command-line front end for detaching USB devices that have been
//! shared into WSL. A detach targets exactly one of: every device
//! (`--all`), a bus position (`--busid 3-42`) or a hardware id
//! (`--hardware-id 0123:cdef`).
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use usbipd_cli::backend::HelperBackend;
//! use usbipd_cli::output::TerminalConsole;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = HelperBackend::new("usbipd-helper");
//!     let console = TerminalConsole::new();
//!     let cancel = CancellationToken::new();
//!
//!     let code = usbipd_cli::cli::run(
//!         ["usbipd", "wsl", "detach", "--busid", "3-42"],
//!         &backend,
//!         &console,
//!         &cancel,
//!     )
//!     .await?;
//!
//!     println!("exit status {}", code.code());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - `BusId` and `HardwareId` with their canonical text forms
//! - [`selector`] - Turns raw options into exactly one `Selector`
//! - [`dispatch`] - Runs the backend call for a selector
//! - [`exit_code`] - Stable process exit statuses
//! - [`backend`] - The `DetachBackend` trait and the helper-process backend
//! - [`output`] - Console abstraction
//! - [`config`] - Settings file handling
//! - [`cli`] - clap command tree and entry points

pub mod backend;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exit_code;
pub mod output;
pub mod selector;
pub mod types;

// Re-export commonly used types
pub use backend::DetachBackend;
pub use dispatch::Outcome;
pub use error::{BackendError, CliError, SelectorError};
pub use exit_code::ExitCode;
pub use selector::Selector;
pub use types::{BusId, FormatError, HardwareId};
