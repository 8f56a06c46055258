//! Capabilities the host framework advertises at construction time.

use std::fmt;
use std::sync::Arc;

use crate::config::ConfigRecord;

/// Host service that builds phonebook URLs for plugins.
pub trait PhonebookUrlProvider: Send + Sync {
    /// Build the phonebook URL for a vendor, or `None` if the record lacks
    /// what the host needs.
    fn phonebook_url(&self, config: &ConfigRecord, vendor: &str, entry_point: &str)
    -> Option<String>;
}

/// Optional host features.
///
/// Older hosts have neither a phonebook service nor parameterized sync
/// events; the default value describes such a host.
#[derive(Clone, Default)]
pub struct HostCapabilities {
    phonebook: Option<Arc<dyn PhonebookUrlProvider>>,
    extended_sync: bool,
}

impl HostCapabilities {
    /// Capabilities of a host without optional features.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the phonebook URL service.
    pub fn with_phonebook(mut self, provider: Arc<dyn PhonebookUrlProvider>) -> Self {
        self.phonebook = Some(provider);
        self
    }

    /// Declare support for sync events with extra variables.
    pub fn with_extended_sync(mut self, enabled: bool) -> Self {
        self.extended_sync = enabled;
        self
    }

    pub fn phonebook(&self) -> Option<&Arc<dyn PhonebookUrlProvider>> {
        self.phonebook.as_ref()
    }

    pub fn extended_sync(&self) -> bool {
        self.extended_sync
    }
}

impl fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCapabilities")
            .field(
                "phonebook",
                &self.phonebook.as_ref().map(|_| "<PhonebookUrlProvider>"),
            )
            .field("extended_sync", &self.extended_sync)
            .finish()
    }
}
