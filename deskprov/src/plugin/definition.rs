//! Plugin definition: everything vendor-specific about a device family.

use std::fmt;
use std::sync::Arc;

use super::common::CommonFile;
use super::filename::DeviceFilename;
use crate::assoc::{Associator, AssociatorPolicy, SupportScore};
use crate::error::{DeviceError, PluginError, Result};
use crate::host::SyncAction;
use crate::ident::{DeviceFingerprint, DeviceInfoExtractor, ExtractorSet, Request};
use crate::mapper::FieldMappingPolicy;

/// Plugin definition.
///
/// A plugin is composed of policies rather than code: one generic
/// [`Provisioner`](crate::provision::Provisioner) drives every vendor from
/// its definition.
#[derive(Clone)]
pub struct PluginDefinition {
    /// Plugin name (e.g., "cisco_sip", "grandstream").
    pub name: String,

    /// Support scoring policy.
    pub associator: AssociatorPolicy,

    /// Request extractors, usually shared by a vendor family.
    pub extractors: Arc<ExtractorSet>,

    /// Configuration mapping policy.
    pub mapping: FieldMappingPolicy,

    /// Device-specific filename scheme.
    pub filename: DeviceFilename,

    /// Directory below the provisioning root files are written to.
    pub output_subdir: Option<String>,

    /// Sync event, `None` when the devices cannot be resynced remotely.
    pub sync_action: Option<SyncAction>,

    /// Output encoding, the host default when `None`.
    pub encoding: Option<String>,

    /// Whether the host watches the device file to track remote state.
    pub remote_state_trigger: bool,

    /// Files shared by every device, written by `configure_common`.
    pub common_files: Vec<CommonFile>,
}

impl PluginDefinition {
    /// Create a definition with empty policies.
    pub fn new(name: impl Into<String>, vendor: impl Into<String>, filename: DeviceFilename) -> Self {
        Self {
            name: name.into(),
            associator: AssociatorPolicy::new(vendor),
            extractors: Arc::new(ExtractorSet::new()),
            mapping: FieldMappingPolicy::new(),
            filename,
            output_subdir: None,
            sync_action: Some(SyncAction::check_sync()),
            encoding: None,
            remote_state_trigger: false,
            common_files: Vec::new(),
        }
    }

    /// Set the associator policy.
    pub fn with_associator(mut self, associator: AssociatorPolicy) -> Self {
        self.associator = associator;
        self
    }

    /// Set the extractors.
    pub fn with_extractors(mut self, extractors: Arc<ExtractorSet>) -> Self {
        self.extractors = extractors;
        self
    }

    /// Set the mapping policy.
    pub fn with_mapping(mut self, mapping: FieldMappingPolicy) -> Self {
        self.mapping = mapping;
        self
    }

    /// Set the output subdirectory.
    pub fn with_output_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.output_subdir = Some(subdir.into());
        self
    }

    /// Set the sync action.
    pub fn with_sync_action(mut self, action: SyncAction) -> Self {
        self.sync_action = Some(action);
        self
    }

    /// Declare that devices cannot be resynced.
    pub fn without_sync(mut self) -> Self {
        self.sync_action = None;
        self
    }

    /// Set the output encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Report the device file as the remote state trigger.
    pub fn with_remote_state_trigger(mut self) -> Self {
        self.remote_state_trigger = true;
        self
    }

    /// Add a common file.
    pub fn with_common_file(mut self, file: CommonFile) -> Self {
        self.common_files.push(file);
        self
    }

    /// Add several common files, keeping their order.
    pub fn with_common_files(mut self, files: impl IntoIterator<Item = CommonFile>) -> Self {
        self.common_files.extend(files);
        self
    }

    /// Vendor handled by the plugin.
    pub fn vendor(&self) -> &str {
        self.associator.vendor()
    }

    /// Check the definition is usable.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(PluginError::InvalidDefinition {
                message: "plugin name is empty".to_string(),
            }
            .into());
        }
        if self.vendor().is_empty() {
            return Err(PluginError::InvalidDefinition {
                message: format!("plugin '{}' has no vendor", self.name),
            }
            .into());
        }
        Ok(())
    }

    /// Device-specific filename of a device.
    pub fn device_filename(&self, device: &DeviceFingerprint) -> Result<String> {
        let mac = device.mac().ok_or(DeviceError::MissingMac)?;
        Ok(self.filename.render(mac))
    }

    /// File whose download tells the host the device applied its
    /// configuration.
    pub fn remote_state_trigger_filename(&self, device: &DeviceFingerprint) -> Option<String> {
        if !self.remote_state_trigger {
            return None;
        }
        device.mac().map(|mac| self.filename.render(mac))
    }

    /// Check whether the host should treat a served file as sensitive.
    pub fn is_sensitive_filename(&self, name: &str) -> bool {
        self.filename.is_match(name)
    }

    /// Score a fingerprint.
    pub fn associate(&self, fingerprint: &DeviceFingerprint) -> SupportScore {
        self.associator.associate_fingerprint(fingerprint)
    }

    /// Extract a fingerprint from a request.
    pub fn extract(&self, request: &Request) -> Option<DeviceFingerprint> {
        self.extractors.extract(request)
    }
}

impl fmt::Debug for PluginDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDefinition")
            .field("name", &self.name)
            .field("associator", &self.associator)
            .field("extractors", &self.extractors)
            .field("mapping", &self.mapping)
            .field("filename", &self.filename)
            .field("output_subdir", &self.output_subdir)
            .field("sync_action", &self.sync_action)
            .field("encoding", &self.encoding)
            .field("remote_state_trigger", &self.remote_state_trigger)
            .field("common_files", &self.common_files)
            .finish()
    }
}
