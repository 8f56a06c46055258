//! Device synchronization seam.

use async_trait::async_trait;

use crate::error::Result;
use crate::ident::DeviceFingerprint;

/// Event used by the standard SIP resync.
pub const CHECK_SYNC_EVENT: &str = "check-sync";

/// SIP event a plugin asks the host to send to a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncAction {
    /// SIP event name.
    pub event: String,
    /// Extra message variables; only hosts with extended sync accept them.
    pub extra_vars: Vec<String>,
}

impl SyncAction {
    /// The standard `check-sync` resync.
    pub fn check_sync() -> Self {
        Self::new(CHECK_SYNC_EVENT)
    }

    /// Create an action for a SIP event.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            extra_vars: Vec::new(),
        }
    }

    /// Add an extra variable.
    pub fn with_extra_var(mut self, var: impl Into<String>) -> Self {
        self.extra_vars.push(var.into());
        self
    }

    /// Check whether the action needs the extended sync interface.
    pub fn is_parameterized(&self) -> bool {
        !self.extra_vars.is_empty()
    }
}

impl Default for SyncAction {
    fn default() -> Self {
        Self::check_sync()
    }
}

/// Host service pushing sync events to devices.
#[async_trait]
pub trait SyncNotifier: Send + Sync {
    /// Send the action to the device. The call completes once the host has
    /// handed the event off; device compliance is not observed.
    ///
    /// Delivery failures are reported as
    /// [`NotifyError`](crate::error::NotifyError).
    async fn notify(&self, device: &DeviceFingerprint, action: &SyncAction) -> Result<()>;
}
