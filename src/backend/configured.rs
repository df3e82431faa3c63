//! Backend that loads its settings on first use.

use super::{DetachBackend, HelperBackend};
use crate::config::AppSettings;
use crate::error::{BackendError, BackendResult};
use crate::output::Console;
use crate::types::{BusId, HardwareId};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// [`HelperBackend`] built from the settings file when a detach actually runs.
///
/// Input that fails validation never reaches a backend, so a broken settings
/// file cannot mask a usage error. A settings problem found here is a failed
/// detach.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredBackend {
    config: Option<PathBuf>,
    helper: Option<PathBuf>,
}

impl ConfiguredBackend {
    /// `config` overrides the settings file location, `helper` the helper
    /// program named in it.
    pub fn new(config: Option<PathBuf>, helper: Option<PathBuf>) -> Self {
        Self { config, helper }
    }

    fn helper_backend(&self) -> BackendResult<HelperBackend> {
        let settings = AppSettings::resolve(self.config.as_deref())
            .map_err(|err| BackendError::Failed(err.to_string()))?
            .with_helper(self.helper.as_deref());

        debug!(helper = %settings.helper_program, "settings loaded");
        Ok(HelperBackend::from_settings(&settings))
    }
}

#[async_trait]
impl DetachBackend for ConfiguredBackend {
    async fn detach_all(
        &self,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.helper_backend()?.detach_all(console, cancel).await
    }

    async fn detach_bus(
        &self,
        bus_id: BusId,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.helper_backend()?
            .detach_bus(bus_id, console, cancel)
            .await
    }

    async fn detach_hardware(
        &self,
        hardware_id: HardwareId,
        console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.helper_backend()?
            .detach_hardware(hardware_id, console, cancel)
            .await
    }
}
