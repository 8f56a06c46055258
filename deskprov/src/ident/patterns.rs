//! Pattern matching utilities for request fingerprinting.

use log::warn;
use regex::Regex;

use super::fingerprint::DeviceFingerprint;
use crate::mac::MacAddress;

/// Capture group holding the model.
pub const MODEL_GROUP: &str = "model";
/// Capture group holding the firmware version.
pub const VERSION_GROUP: &str = "version";
/// Capture group holding an embedded MAC address.
pub const MAC_GROUP: &str = "mac";

/// A compiled fingerprint pattern.
///
/// Named captures `model`, `version` and `mac` fill the corresponding
/// fingerprint fields. A pattern may instead pin a fixed model, for fixed
/// filenames that only one product requests.
#[derive(Debug, Clone)]
pub struct FingerprintPattern {
    /// The pattern to match.
    pattern: Regex,

    /// Model reported regardless of captures.
    fixed_model: Option<String>,

    /// Drop the whole match when the embedded MAC does not parse.
    require_mac: bool,
}

impl FingerprintPattern {
    /// Compile a fingerprint pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            fixed_model: None,
            require_mac: false,
        })
    }

    /// Report a fixed model whenever this pattern matches.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.fixed_model = Some(model.into());
        self
    }

    /// Reject matches whose MAC capture is missing or malformed.
    pub fn with_required_mac(mut self) -> Self {
        self.require_mac = true;
        self
    }

    /// Get a reference to the underlying regex.
    pub fn regex(&self) -> &Regex {
        &self.pattern
    }

    /// Check if the text matches the pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Build a fingerprint for `vendor` from the captures in `text`.
    pub fn fingerprint(&self, vendor: &str, text: &str) -> Option<DeviceFingerprint> {
        let caps = self.pattern.captures(text)?;
        let mut fp = DeviceFingerprint::new(vendor);

        if let Some(model) = &self.fixed_model {
            fp = fp.with_model(model.as_str());
        } else if let Some(m) = caps.name(MODEL_GROUP) {
            fp = fp.with_model(m.as_str());
        }

        if let Some(v) = caps.name(VERSION_GROUP) {
            fp = fp.with_version(v.as_str());
        }

        match caps.name(MAC_GROUP) {
            Some(raw) => match raw.as_str().parse::<MacAddress>() {
                Ok(mac) => fp = fp.with_mac(mac),
                Err(e) => {
                    warn!("Could not normalize MAC address \"{}\": {}", raw.as_str(), e);
                    if self.require_mac {
                        return None;
                    }
                }
            },
            None if self.require_mac => return None,
            None => {}
        }

        Some(fp)
    }
}
