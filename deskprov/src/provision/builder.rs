//! Builder for creating provisioners.

use std::path::PathBuf;
use std::sync::Arc;

use super::generic::Provisioner;
use crate::error::{PluginError, Result};
use crate::host::{
    FileStore, FsStore, HostCapabilities, JsonRenderer, ProvisioningConfig, SyncNotifier,
    TemplateRenderer,
};
use crate::plugin::{PluginDefinition, PluginRegistry};

/// Builder for constructing provisioners.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use deskprov::host::HostCapabilities;
/// use deskprov::provision::ProvisionerBuilder;
///
/// # fn example(notifier: Arc<dyn deskprov::host::SyncNotifier>) -> Result<(), deskprov::Error> {
/// let provisioner = ProvisionerBuilder::new()
///     .plugin("cisco_sip")
///     .root_dir("/var/lib/provd/tftpboot")
///     .capabilities(HostCapabilities::new().with_extended_sync(true))
///     .notifier(notifier)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ProvisionerBuilder {
    plugin_name: Option<String>,
    custom_plugin: Option<PluginDefinition>,
    config: ProvisioningConfig,
    capabilities: HostCapabilities,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    store: Option<Arc<dyn FileStore>>,
    notifier: Option<Arc<dyn SyncNotifier>>,
}

impl ProvisionerBuilder {
    /// Create a new provisioner builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the plugin name (e.g., "cisco_sip", "grandstream").
    pub fn plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin_name = Some(plugin.into());
        self
    }

    /// Set a custom plugin definition.
    pub fn custom_plugin(mut self, plugin: PluginDefinition) -> Self {
        self.custom_plugin = Some(plugin);
        self
    }

    /// Set the output configuration.
    pub fn config(mut self, config: ProvisioningConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the provisioning root directory.
    pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.config.root_dir = root_dir.into();
        self
    }

    /// Set the host capabilities.
    pub fn capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the template renderer (default: [`JsonRenderer`]).
    pub fn renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Set the file store (default: [`FsStore`]).
    pub fn store(mut self, store: Arc<dyn FileStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the sync notifier.
    pub fn notifier(mut self, notifier: Arc<dyn SyncNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the provisioner.
    pub fn build(self) -> Result<Provisioner> {
        let plugin = if let Some(custom) = self.custom_plugin {
            custom.validate()?;
            Arc::new(custom)
        } else if let Some(name) = self.plugin_name {
            PluginRegistry::global().require(&name)?
        } else {
            return Err(PluginError::InvalidDefinition {
                message: "Plugin must be specified".to_string(),
            }
            .into());
        };

        let notifier = self.notifier.ok_or_else(|| PluginError::InvalidDefinition {
            message: "Sync notifier is required".to_string(),
        })?;

        Ok(Provisioner::new(
            plugin,
            self.config,
            self.capabilities,
            self.renderer.unwrap_or_else(|| Arc::new(JsonRenderer)),
            self.store.unwrap_or_else(|| Arc::new(FsStore::new())),
            notifier,
        ))
    }
}
