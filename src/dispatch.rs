//! Maps a validated selector to exactly one backend call.

use crate::backend::DetachBackend;
use crate::error::{BackendError, CliError, CliResult};
use crate::output::Console;
use crate::selector::Selector;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Result category of a dispatched detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    OperationFailed,
    Canceled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::OperationFailed => write!(f, "failed"),
            Self::Canceled => write!(f, "canceled"),
        }
    }
}

/// Run the backend operation for `selector` and classify its result.
///
/// Cancellation wins: if `cancel` has fired by the time the backend returns,
/// the outcome is [`Outcome::Canceled`] whatever the backend reported.
/// Unexpected backend errors are returned as [`CliError::Backend`].
pub async fn dispatch(
    selector: Selector,
    backend: &dyn DetachBackend,
    console: &dyn Console,
    cancel: &CancellationToken,
) -> CliResult<Outcome> {
    info!(%selector, "detaching");

    let result = match selector {
        Selector::All => backend.detach_all(console, cancel).await,
        Selector::ByBus(bus_id) => backend.detach_bus(bus_id, console, cancel).await,
        Selector::ByHardware(hardware_id) => {
            backend.detach_hardware(hardware_id, console, cancel).await
        }
    };

    let outcome = match result {
        Err(BackendError::Internal(err)) => return Err(CliError::Backend(err)),
        _ if cancel.is_cancelled() => Outcome::Canceled,
        Err(BackendError::Canceled) => Outcome::Canceled,
        Err(BackendError::Failed(reason)) => {
            console.report_error(&reason);
            Outcome::OperationFailed
        }
        Ok(()) => Outcome::Succeeded,
    };

    if outcome == Outcome::Canceled {
        warn!(%selector, "detach canceled");
        console.report_warning("operation canceled");
    } else {
        info!(%selector, %outcome, "detach finished");
    }

    Ok(outcome)
}
