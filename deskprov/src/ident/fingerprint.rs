//! Device fingerprint produced by extraction.

use serde::Serialize;

use crate::mac::MacAddress;

/// Vendor/model/version/MAC tuple identifying a device from one request.
///
/// Fields are private and there are no setters; extracting again always
/// produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceFingerprint {
    vendor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mac: Option<MacAddress>,
}

impl DeviceFingerprint {
    /// Create a fingerprint knowing only the vendor.
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            model: None,
            version: None,
            mac: None,
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the firmware version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the MAC address.
    pub fn with_mac(mut self, mac: MacAddress) -> Self {
        self.mac = Some(mac);
        self
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn mac(&self) -> Option<MacAddress> {
        self.mac
    }
}
