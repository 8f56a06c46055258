//! Generic provisioner that works with any plugin definition.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use super::outcome::SyncOutcome;
use crate::assoc::SupportScore;
use crate::config::ConfigRecord;
use crate::error::{Result, UnsupportedError};
use crate::host::{
    FileStore, HostCapabilities, ProvisioningConfig, RenderRequest, SyncNotifier, TemplateRenderer,
};
use crate::ident::{DeviceFingerprint, Request};
use crate::mapper::{FieldMapper, VendorFieldMapping};
use crate::plugin::PluginDefinition;

/// Generic provisioner driven by a plugin definition.
///
/// This is the lifecycle façade the host talks to:
/// - identification and scoring of devices
/// - rendering and writing device files
/// - removing them again
/// - asking devices to resync
///
/// It holds no per-device state; concurrent calls for different devices
/// are fine, serializing calls for the same device is up to the host.
pub struct Provisioner {
    plugin: Arc<PluginDefinition>,
    config: ProvisioningConfig,
    capabilities: HostCapabilities,
    renderer: Arc<dyn TemplateRenderer>,
    store: Arc<dyn FileStore>,
    notifier: Arc<dyn SyncNotifier>,
}

impl Provisioner {
    /// Create a new provisioner.
    pub fn new(
        plugin: Arc<PluginDefinition>,
        config: ProvisioningConfig,
        capabilities: HostCapabilities,
        renderer: Arc<dyn TemplateRenderer>,
        store: Arc<dyn FileStore>,
        notifier: Arc<dyn SyncNotifier>,
    ) -> Self {
        Self {
            plugin,
            config,
            capabilities,
            renderer,
            store,
            notifier,
        }
    }

    /// Get the plugin definition.
    pub fn plugin(&self) -> &PluginDefinition {
        &self.plugin
    }

    /// Get the output configuration.
    pub fn config(&self) -> &ProvisioningConfig {
        &self.config
    }

    /// Get the host capabilities.
    pub fn capabilities(&self) -> &HostCapabilities {
        &self.capabilities
    }

    /// Encoding label of the files this plugin writes.
    pub fn encoding(&self) -> &str {
        self.plugin
            .encoding
            .as_deref()
            .unwrap_or(self.config.encoding.as_str())
    }

    /// Device-specific filename (not path) of a device.
    pub fn device_filename(&self, device: &DeviceFingerprint) -> Result<String> {
        self.plugin.device_filename(device)
    }

    /// Full path of a device's file.
    pub fn device_path(&self, device: &DeviceFingerprint) -> Result<PathBuf> {
        let filename = self.device_filename(device)?;
        Ok(self
            .config
            .output_path(self.plugin.output_subdir.as_deref(), &filename))
    }

    /// Build the field mapping of a device without writing anything.
    pub fn map(
        &self,
        device: &DeviceFingerprint,
        config: &ConfigRecord,
    ) -> Result<VendorFieldMapping> {
        FieldMapper::new(&self.plugin.mapping, &self.capabilities).map(config, device)
    }

    /// Render and write the configuration file of a device.
    ///
    /// The file is rendered in memory first; nothing is written when
    /// validation, mapping or rendering fails. Returns the written path.
    pub async fn configure(
        &self,
        device: &DeviceFingerprint,
        config: &ConfigRecord,
    ) -> Result<PathBuf> {
        let mapping = self.map(device, config)?;
        let filename = self.device_filename(device)?;

        let request = RenderRequest {
            filename: &filename,
            template: None,
            model: device.model(),
            mapping: &mapping,
            encoding: self.encoding(),
        };
        let contents = self.renderer.render(&request)?;

        let path = self
            .config
            .output_path(self.plugin.output_subdir.as_deref(), &filename);
        self.store.write(&path, contents).await?;

        info!("{}: configured {}", self.plugin.name, path.display());
        Ok(path)
    }

    /// Render and write the files shared by every device of the plugin.
    ///
    /// Every file is rendered before the first one is written. Returns the
    /// written paths, in declaration order.
    pub async fn configure_common(&self, config: &ConfigRecord) -> Result<Vec<PathBuf>> {
        let subdir = self.plugin.output_subdir.as_deref();

        let mut rendered = Vec::with_capacity(self.plugin.common_files.len());
        for file in &self.plugin.common_files {
            let mapping = file.mapping(config)?;
            let request = RenderRequest {
                filename: &file.filename,
                template: Some(file.template.as_str()),
                model: None,
                mapping: &mapping,
                encoding: self.encoding(),
            };
            let contents = self.renderer.render(&request)?;
            rendered.push((self.config.output_path(subdir, &file.filename), contents));
        }

        let mut paths = Vec::with_capacity(rendered.len());
        for (path, contents) in rendered {
            self.store.write(&path, contents).await?;
            paths.push(path);
        }

        info!("{}: wrote {} common files", self.plugin.name, paths.len());
        Ok(paths)
    }

    /// Remove the configuration file of a device.
    ///
    /// A file that does not exist is not an error.
    pub async fn deconfigure(&self, device: &DeviceFingerprint) -> Result<()> {
        let path = self.device_path(device)?;
        match self.store.remove(&path).await {
            Ok(()) => {
                info!("{}: deconfigured {}", self.plugin.name, path.display());
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                info!("error while removing configuration file: {}", e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Ask the device to fetch its configuration again.
    pub async fn synchronize(
        &self,
        device: &DeviceFingerprint,
        _config: &ConfigRecord,
    ) -> Result<SyncOutcome> {
        let action = self.plugin.sync_action.as_ref().ok_or_else(|| {
            UnsupportedError::Operation {
                operation: "synchronize".to_string(),
                plugin: self.plugin.name.clone(),
            }
        })?;

        if action.is_parameterized() && !self.capabilities.extended_sync() {
            return Err(UnsupportedError::HostTooOld {
                operation: "synchronize".to_string(),
            }
            .into());
        }

        let start = Instant::now();
        self.notifier.notify(device, action).await?;
        let outcome = SyncOutcome::new(action, device.mac(), start.elapsed());

        debug!("{}: {} in {:?}", self.plugin.name, outcome, outcome.elapsed);
        Ok(outcome)
    }

    /// Check whether the host should protect a served file.
    pub fn is_sensitive_filename(&self, filename: &str) -> bool {
        self.plugin.is_sensitive_filename(filename)
    }

    /// File whose download signals the device applied its configuration.
    pub fn remote_state_trigger_filename(&self, device: &DeviceFingerprint) -> Option<String> {
        self.plugin.remote_state_trigger_filename(device)
    }

    /// Score how well this plugin supports a device.
    pub fn associate(&self, device: &DeviceFingerprint) -> SupportScore {
        self.plugin.associate(device)
    }

    /// Extract a fingerprint from a request.
    pub fn extract(&self, request: &Request) -> Option<DeviceFingerprint> {
        self.plugin.extract(request)
    }
}

impl fmt::Debug for Provisioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provisioner")
            .field("plugin", &self.plugin.name)
            .field("config", &self.config)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;
    use serde_json::json;

    use crate::error::{ConfigError, Error, NotifyError, OutputError};
    use crate::host::{JsonRenderer, SyncAction};
    use crate::plugin::{CommonFile, PluginRegistry};

    #[derive(Default)]
    struct MemoryStore {
        files: Mutex<Vec<(PathBuf, Bytes)>>,
        removed: Mutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl FileStore for MemoryStore {
        async fn write(&self, path: &Path, contents: Bytes) -> std::result::Result<(), OutputError> {
            self.files.lock().unwrap().push((path.to_path_buf(), contents));
            Ok(())
        }

        async fn remove(&self, path: &Path) -> std::result::Result<(), OutputError> {
            self.removed.lock().unwrap().push(path.to_path_buf());
            Err(OutputError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<SyncAction>>,
    }

    #[async_trait]
    impl SyncNotifier for RecordingNotifier {
        async fn notify(
            &self,
            _device: &DeviceFingerprint,
            action: &SyncAction,
        ) -> Result<()> {
            self.sent.lock().unwrap().push(action.clone());
            Ok(())
        }
    }

    struct UnreachableNotifier;

    #[async_trait]
    impl SyncNotifier for UnreachableNotifier {
        async fn notify(&self, device: &DeviceFingerprint, _action: &SyncAction) -> Result<()> {
            Err(NotifyError::Unreachable {
                device: device.mac().map(|m| m.to_string()).unwrap_or_default(),
                message: "no registered contact".to_string(),
            }
            .into())
        }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: Arc::new(MemoryStore::default()),
                notifier: Arc::new(RecordingNotifier::default()),
            }
        }

        fn provisioner(&self, plugin: &str, capabilities: HostCapabilities) -> Provisioner {
            Provisioner::new(
                PluginRegistry::global().require(plugin).unwrap(),
                ProvisioningConfig::new("/srv/tftpboot"),
                capabilities,
                Arc::new(JsonRenderer),
                self.store.clone(),
                self.notifier.clone(),
            )
        }
    }

    fn grandstream() -> DeviceFingerprint {
        DeviceFingerprint::new("Grandstream")
            .with_model("GXP2160")
            .with_mac("000b82aabbcc".parse().unwrap())
    }

    #[tokio::test]
    async fn test_configure_writes_to_subdir() {
        let fixture = Fixture::new();
        let provisioner = fixture.provisioner("grandstream", HostCapabilities::new());
        let config = ConfigRecord::from_value(json!({
            "http_port": 8667,
            "sip_lines": {"1": {"username": "alice"}}
        }))
        .unwrap();

        let path = provisioner.configure(&grandstream(), &config).await.unwrap();
        assert_eq!(path, PathBuf::from("/srv/tftpboot/Grandstream/cfg000b82aabbcc.xml"));

        let files = fixture.store.files.lock().unwrap();
        assert_eq!(files.len(), 1);
        let written: serde_json::Value = serde_json::from_slice(&files[0].1).unwrap();
        assert_eq!(written["sip_lines"]["1"]["username"], json!("alice"));
    }

    #[tokio::test]
    async fn test_configure_failure_writes_nothing() {
        let fixture = Fixture::new();
        let provisioner = fixture.provisioner("grandstream", HostCapabilities::new());

        let err = provisioner
            .configure(&grandstream(), &ConfigRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingTransport { .. })));
        assert!(fixture.store.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configure_common_writes_every_file() {
        let fixture = Fixture::new();
        let provisioner = fixture.provisioner("yealink_v83", HostCapabilities::new());
        let config = ConfigRecord::from_value(json!({"http_port": 8667})).unwrap();

        let paths = provisioner.configure_common(&config).await.unwrap();
        assert_eq!(paths.len(), provisioner.plugin().common_files.len());
        assert_eq!(paths[0], PathBuf::from("/srv/tftpboot/y000000000044.cfg"));

        let files = fixture.store.files.lock().unwrap();
        assert_eq!(files.len(), paths.len());
        let dect: serde_json::Value = serde_json::from_slice(&files.last().unwrap().1).unwrap();
        assert_eq!(dect["XX_fw_filename"], json!("$PN-103.83.0.122.rom"));
        assert_eq!(dect["XX_handsets_fw"]["w59r"], json!("W59R-115.83.0.10.rom"));
        assert_eq!(dect["http_port"], json!(8667));
    }

    #[tokio::test]
    async fn test_configure_common_without_files() {
        let fixture = Fixture::new();
        let provisioner = fixture.provisioner("grandstream", HostCapabilities::new());

        let paths = provisioner.configure_common(&ConfigRecord::default()).await.unwrap();
        assert!(paths.is_empty());
        assert!(fixture.store.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configure_common_render_failure_writes_nothing() {
        let fixture = Fixture::new();
        let plugin = PluginDefinition::new(
            "acme",
            "Acme",
            crate::plugin::DeviceFilename::new("", crate::plugin::MacCase::Lower, ".cfg"),
        )
        .with_common_file(CommonFile::firmware("acme-a.cfg", "a.rom", "model.tpl"))
        .with_common_file(CommonFile::firmware("acme-b.cfg", "b.rom", "model.tpl"))
        .with_encoding("ISO-8859-1");
        let provisioner = Provisioner::new(
            Arc::new(plugin),
            ProvisioningConfig::new("/srv"),
            HostCapabilities::new(),
            Arc::new(JsonRenderer),
            fixture.store.clone(),
            fixture.notifier.clone(),
        );

        let err = provisioner
            .configure_common(&ConfigRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Output(OutputError::Render { .. })));
        assert!(fixture.store.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deconfigure_missing_file_is_ok() {
        let fixture = Fixture::new();
        let provisioner = fixture.provisioner("grandstream", HostCapabilities::new());

        provisioner.deconfigure(&grandstream()).await.unwrap();
        assert_eq!(
            fixture.store.removed.lock().unwrap()[0],
            provisioner.device_path(&grandstream()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_synchronize_standard() {
        let fixture = Fixture::new();
        let provisioner = fixture.provisioner("grandstream", HostCapabilities::new());

        let outcome = provisioner
            .synchronize(&grandstream(), &ConfigRecord::default())
            .await
            .unwrap();
        assert_eq!(outcome.event, "check-sync");
        assert_eq!(fixture.notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_synchronize_parameterized_needs_extended_sync() {
        let fixture = Fixture::new();
        let device = DeviceFingerprint::new("Cisco").with_mac("001122aabbcc".parse().unwrap());

        let err = fixture
            .provisioner("cisco_sip", HostCapabilities::new())
            .synchronize(&device, &ConfigRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(UnsupportedError::HostTooOld { .. })));
        assert!(err.to_string().contains("please upgrade"));
        assert!(fixture.notifier.sent.lock().unwrap().is_empty());

        let outcome = fixture
            .provisioner("cisco_sip", HostCapabilities::new().with_extended_sync(true))
            .synchronize(&device, &ConfigRecord::default())
            .await
            .unwrap();
        assert_eq!(outcome.event, "service-control");
        assert_eq!(outcome.extra_vars, 6);
    }

    #[tokio::test]
    async fn test_synchronize_unsupported_by_plugin() {
        let fixture = Fixture::new();
        let device = DeviceFingerprint::new("Cisco").with_mac("001122aabbcc".parse().unwrap());

        let err = fixture
            .provisioner("cisco_sccp", HostCapabilities::new().with_extended_sync(true))
            .synchronize(&device, &ConfigRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(UnsupportedError::Operation { .. })));
    }

    #[tokio::test]
    async fn test_synchronize_passes_notifier_errors_through() {
        let provisioner = Provisioner::new(
            PluginRegistry::global().require("grandstream").unwrap(),
            ProvisioningConfig::new("/srv/tftpboot"),
            HostCapabilities::new(),
            Arc::new(JsonRenderer),
            Arc::new(MemoryStore::default()),
            Arc::new(UnreachableNotifier),
        );

        let err = provisioner
            .synchronize(&grandstream(), &ConfigRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Notify(NotifyError::Unreachable { .. })));
        assert!(!matches!(err, Error::Unsupported(_)));
        assert_eq!(
            err.to_string(),
            "Notification error: device 000b82aabbcc unreachable: no registered contact"
        );
    }

    #[test]
    fn test_encoding_falls_back_to_host_default() {
        let fixture = Fixture::new();
        let provisioner = fixture.provisioner("snom_10_1_46", HostCapabilities::new());
        assert_eq!(provisioner.encoding(), "UTF-8");

        let custom = Provisioner::new(
            Arc::new(PluginDefinition::new(
                "acme",
                "Acme",
                crate::plugin::DeviceFilename::new("", crate::plugin::MacCase::Lower, ".cfg"),
            )),
            ProvisioningConfig::new("/srv").with_encoding("ISO-8859-1"),
            HostCapabilities::new(),
            Arc::new(JsonRenderer),
            fixture.store.clone(),
            fixture.notifier.clone(),
        );
        assert_eq!(custom.encoding(), "ISO-8859-1");
    }
}
