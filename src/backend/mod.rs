//! Detach backend abstraction.
//!
//! The device-sharing service that actually detaches devices sits behind
//! [`DetachBackend`], so the command path can be driven by the real helper
//! process or by a test double.

mod configured;
mod helper;

pub use configured::ConfiguredBackend;
pub use helper::HelperBackend;

use crate::error::BackendResult;
use crate::output::Console;
use crate::types::{BusId, HardwareId};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Operations a detach backend must provide.
///
/// Each call runs to completion or returns [`BackendError::Canceled`] once it
/// observes `cancel`. `Ok(())` means the detach logically succeeded.
///
/// [`BackendError::Canceled`]: crate::error::BackendError::Canceled
#[async_trait]
pub trait DetachBackend: Send + Sync {
    /// Detach every shared device.
    async fn detach_all(
        &self,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()>;

    /// Detach the device at a bus position.
    async fn detach_bus(
        &self,
        bus_id: BusId,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()>;

    /// Detach every device with a hardware id.
    async fn detach_hardware(
        &self,
        hardware_id: HardwareId,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()>;
}
