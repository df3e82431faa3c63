//! WSL subcommands.
//!
//! Handles `usbipd wsl detach`.

use crate::backend::DetachBackend;
use crate::dispatch::dispatch;
use crate::error::CliResult;
use crate::exit_code::ExitCode;
use crate::output::Console;
use crate::selector::SelectorOptions;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Subcommands of `usbipd wsl`.
#[derive(Subcommand, Debug)]
pub enum WslCommands {
    /// Detach USB devices from WSL
    Detach(DetachCommand),
}

/// Detach one or more USB devices from WSL.
///
/// Exactly one of --all, --busid or --hardware-id must be given.
#[derive(Parser, Debug)]
pub struct DetachCommand {
    #[command(flatten)]
    pub selector: SelectorOptions,
}

impl DetachCommand {
    /// Execute the detach command.
    pub async fn execute(
        &self,
        backend: &dyn DetachBackend,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> CliResult<ExitCode> {
        let result = match self.selector.validate() {
            Ok(selector) => {
                debug!(%selector, "selector validated");
                Ok(dispatch(selector, backend, console, cancel).await?)
            }
            Err(err) => {
                debug!(error = %err, "selector rejected");
                console.report_error(&err.to_string());
                Err(err)
            }
        };

        Ok(ExitCode::from_result(&result))
    }
}
