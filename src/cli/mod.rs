//! CLI command definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `usbipd wsl detach --all` - Detach every device shared with WSL
//! - `usbipd wsl detach --busid <BUSID>` - Detach one device by bus position
//! - `usbipd wsl detach --hardware-id <VID:PID>` - Detach devices by model

mod wsl;

pub use wsl::{DetachCommand, WslCommands};

use crate::backend::DetachBackend;
use crate::error::CliResult;
use crate::exit_code::ExitCode;
use crate::output::Console;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// usbipd - Share locally connected USB devices with WSL.
#[derive(Parser, Debug)]
#[command(name = "usbipd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Share USB devices with WSL", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Helper program that performs device operations
    #[arg(long, global = true, value_name = "PATH", env = "USBIPD_HELPER")]
    pub helper: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage USB devices attached to WSL
    #[command(subcommand)]
    Wsl(WslCommands),
}

/// Parse command-line tokens, including the program name.
///
/// Returns the exit status directly when parsing alone ends the command:
/// help and version are written to `console` and yield
/// [`ExitCode::Success`], syntax errors yield [`ExitCode::ParseError`].
pub fn parse_args<I, T>(args: I, console: &dyn Console) -> Result<Cli, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            console.write_out(&err.render().to_string());
            ExitCode::Success
        }
        kind => {
            debug!(?kind, "command line rejected");
            console.write_err(&err.render().to_string());
            ExitCode::ParseError
        }
    })
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(
        &self,
        backend: &dyn DetachBackend,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> CliResult<ExitCode> {
        match &self.command {
            Commands::Wsl(WslCommands::Detach(cmd)) => cmd.execute(backend, console, cancel).await,
        }
    }
}

/// Parse `args` and run the resulting command against `backend`.
pub async fn run<I, T>(
    args: I,
    backend: &dyn DetachBackend,
    console: &dyn Console,
    cancel: &CancellationToken,
) -> CliResult<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match parse_args(args, console) {
        Ok(cli) => cli.execute(backend, console, cancel).await,
        Err(code) => Ok(code),
    }
}
