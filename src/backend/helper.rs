//! Backend that delegates to a privileged helper program.

use super::DetachBackend;
use crate::config::AppSettings;
use crate::error::{BackendError, BackendResult};
use crate::output::Console;
use crate::types::{BusId, HardwareId};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Runs `<program> <args...> detach <selector>` for every operation.
///
/// Exit status zero is success, anything else is a failed detach whose
/// reason is the helper's stderr.
#[derive(Debug, Clone)]
pub struct HelperBackend {
    program: PathBuf,
    args: Vec<String>,
}

impl HelperBackend {
    /// Create a backend for the given helper program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments passed to the helper ahead of the detach request.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Build a backend from loaded settings.
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(&settings.helper_program).with_args(settings.helper_args.iter().cloned())
    }

    /// The helper program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    async fn run(
        &self,
        request: &[String],
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        if cancel.is_cancelled() {
            return Err(BackendError::Canceled);
        }

        debug!(program = %self.program.display(), args = ?self.args, ?request, "spawning helper");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(request)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start helper {}", self.program.display()))?;

        let stdout = child.stdout.take().context("helper stdout not captured")?;
        let stderr = child.stderr.take().context("helper stderr not captured")?;

        // Drain stderr concurrently so a chatty helper never blocks on a full pipe.
        let stderr_task = tokio::spawn(async move {
            let mut reason = Vec::new();
            let mut stderr = stderr;
            if let Err(err) = stderr.read_to_end(&mut reason).await {
                debug!(error = %err, "helper stderr closed early");
            }
            String::from_utf8_lossy(&reason).into_owned()
        });

        // Keep reading to EOF whatever the encoding, or the helper dies of SIGPIPE.
        let relay = async {
            let mut stdout = BufReader::new(stdout);
            let mut line = Vec::new();
            loop {
                line.clear();
                match stdout.read_until(b'\n', &mut line).await {
                    Ok(0) => break,
                    Ok(_) => {
                        let text = String::from_utf8_lossy(&line);
                        console.report_info(text.trim_end_matches(['\r', '\n']));
                    }
                    Err(err) => {
                        debug!(error = %err, "helper stdout closed early");
                        break;
                    }
                }
            }
        };

        let status = tokio::select! {
            (status, ()) = async { tokio::join!(child.wait(), relay) } => {
                status.context("failed to wait for helper")?
            }
            _ = cancel.cancelled() => {
                warn!(program = %self.program.display(), "cancellation requested, stopping helper");
                if let Err(err) = child.start_kill() {
                    debug!(error = %err, "helper already exited");
                }
                child.wait().await.context("failed to reap canceled helper")?;
                return Err(BackendError::Canceled);
            }
        };

        let reason = stderr_task.await.unwrap_or_default();

        if interrupted(&status) {
            warn!(program = %self.program.display(), "helper interrupted");
            return Err(BackendError::Canceled);
        }

        if status.success() {
            Ok(())
        } else {
            let reason = reason.trim();
            Err(BackendError::Failed(if reason.is_empty() {
                format!("helper exited with {}", status)
            } else {
                reason.to_string()
            }))
        }
    }
}

#[async_trait]
impl DetachBackend for HelperBackend {
    async fn detach_all(
        &self,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.run(&request(&["--all"]), console, cancel).await
    }

    async fn detach_bus(
        &self,
        bus_id: BusId,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.run(&request(&["--busid", &bus_id.to_string()]), console, cancel)
            .await
    }

    async fn detach_hardware(
        &self,
        hardware_id: HardwareId,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.run(
            &request(&["--hardware-id", &hardware_id.to_string()]),
            console,
            cancel,
        )
        .await
    }
}

/// A helper killed by SIGINT shares our process group's Ctrl+C; that is a
/// cancellation even if our own signal listener has not run yet.
#[cfg(unix)]
fn interrupted(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    const SIGINT: i32 = 2;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn interrupted(_status: &ExitStatus) -> bool {
    false
}

fn request(selector: &[&str]) -> Vec<String> {
    std::iter::once("detach")
        .chain(selector.iter().copied())
        .map(str::to_string)
        .collect()
}
