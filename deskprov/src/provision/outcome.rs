//! Result of a device synchronization.

use std::fmt;
use std::time::Duration;

use crate::host::SyncAction;
use crate::mac::MacAddress;

/// Outcome of a successful synchronization request.
///
/// The host only confirms the event was handed off; whether the device
/// actually fetched its configuration again is not observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// SIP event that was sent.
    pub event: String,

    /// Number of extra message variables sent with the event.
    pub extra_vars: usize,

    /// MAC address of the device, when known.
    pub mac: Option<MacAddress>,

    /// Time taken by the notifier.
    pub elapsed: Duration,
}

impl SyncOutcome {
    /// Create an outcome for an action.
    pub fn new(action: &SyncAction, mac: Option<MacAddress>, elapsed: Duration) -> Self {
        Self {
            event: action.event.clone(),
            extra_vars: action.extra_vars.len(),
            mac,
            elapsed,
        }
    }

    /// Check if the event carried extra variables.
    pub fn is_parameterized(&self) -> bool {
        self.extra_vars > 0
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mac {
            Some(mac) => write!(f, "{} sent to {}", self.event, mac),
            None => write!(f, "{} sent", self.event),
        }
    }
}
