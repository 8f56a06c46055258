//! Plugin registry and plugin selection.

use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;

use super::definition::PluginDefinition;
use super::vendors;
use crate::assoc::SupportScore;
use crate::error::{PluginError, Result};
use crate::ident::{DeviceFingerprint, Request};

/// Global registry of the built-in plugins.
static REGISTRY: Lazy<PluginRegistry> = Lazy::new(PluginRegistry::builtin);

/// Registry of plugin definitions, in registration order.
///
/// Registration order is the tie-break when several plugins give a device
/// the same score.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: IndexMap<String, Arc<PluginDefinition>>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: IndexMap::new(),
        }
    }

    /// Get the global registry of built-in plugins.
    pub fn global() -> &'static PluginRegistry {
        &REGISTRY
    }

    /// Create a registry holding the built-in plugins.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for plugin in [
            vendors::cisco::sip::plugin(),
            vendors::cisco::sccp::plugin(),
            vendors::grandstream::plugin(),
            vendors::yealink::v86::plugin(),
            vendors::yealink::v83::plugin(),
            vendors::yealink::v80::plugin(),
            vendors::snom::v10_1_46::plugin(),
            vendors::snom::v10_1_39::plugin(),
            vendors::gigaset::plugin(),
        ] {
            registry
                .plugins
                .insert(plugin.name.clone(), Arc::new(plugin));
        }
        registry
    }

    /// Register a plugin definition.
    pub fn register(&mut self, plugin: PluginDefinition) -> Result<()> {
        plugin.validate()?;
        if self.plugins.contains_key(&plugin.name) {
            return Err(PluginError::AlreadyRegistered {
                name: plugin.name.clone(),
            }
            .into());
        }
        self.plugins.insert(plugin.name.clone(), Arc::new(plugin));
        Ok(())
    }

    /// Get a plugin by name.
    pub fn get(&self, name: &str) -> Option<&Arc<PluginDefinition>> {
        self.plugins.get(name)
    }

    /// Get a plugin by name, failing if it is not registered.
    pub fn require(&self, name: &str) -> Result<Arc<PluginDefinition>> {
        self.get(name).cloned().ok_or_else(|| {
            PluginError::UnknownPlugin {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Check if a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// List all registered plugin names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Iterate over the plugins, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PluginDefinition>> {
        self.plugins.values()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Extract a fingerprint with the first plugin that recognizes the
    /// request.
    pub fn extract(&self, request: &Request) -> Option<DeviceFingerprint> {
        self.iter().find_map(|plugin| plugin.extract(request))
    }

    /// Pick the plugin supporting a device best.
    ///
    /// The earliest registered plugin wins a tie. Plugins scoring
    /// [`SupportScore::IMPROBABLE`] are never picked.
    pub fn best_match(
        &self,
        fingerprint: &DeviceFingerprint,
    ) -> Option<(&Arc<PluginDefinition>, SupportScore)> {
        let mut best: Option<(&Arc<PluginDefinition>, SupportScore)> = None;
        for plugin in self.iter() {
            let score = plugin.associate(fingerprint);
            debug!("Plugin {} scores {} for {:?}", plugin.name, score, fingerprint);
            if score <= SupportScore::IMPROBABLE {
                continue;
            }
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((plugin, score));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assoc::AssociatorPolicy;
    use crate::error::Error;
    use crate::ident::{DhcpRequest, HttpRequest, TftpRequest};
    use crate::plugin::{DeviceFilename, MacCase};

    fn acme(name: &str) -> PluginDefinition {
        PluginDefinition::new(name, "Acme", DeviceFilename::new("", MacCase::Lower, ".cfg"))
    }

    #[test]
    fn test_builtin_plugins() {
        let registry = PluginRegistry::global();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec![
                "cisco_sip",
                "cisco_sccp",
                "grandstream",
                "yealink_v86",
                "yealink_v83",
                "yealink_v80",
                "snom_10_1_46",
                "snom_10_1_39",
                "gigaset",
            ]
        );
        assert!(registry.contains("grandstream"));
        assert!(registry.get("aastra").is_none());
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = PluginRegistry::new();
        registry.register(acme("acme")).unwrap();
        let err = registry.register(acme("acme")).unwrap_err();
        assert!(matches!(
            err,
            Error::Plugin(PluginError::AlreadyRegistered { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_require_unknown() {
        let err = PluginRegistry::new().require("acme").unwrap_err();
        assert!(matches!(err, Error::Plugin(PluginError::UnknownPlugin { .. })));
    }

    #[test]
    fn test_tie_goes_to_earliest() {
        let mut registry = PluginRegistry::new();
        registry.register(acme("first")).unwrap();
        registry.register(acme("second")).unwrap();
        registry
            .register(acme("listed").with_associator(AssociatorPolicy::new("Acme").with_models(["X1"])))
            .unwrap();

        let (plugin, score) = registry
            .best_match(&DeviceFingerprint::new("Acme").with_model("Y2"))
            .unwrap();
        assert_eq!(plugin.name, "first");
        assert_eq!(score, SupportScore::PROBABLE);

        let (plugin, score) = registry
            .best_match(&DeviceFingerprint::new("Acme").with_model("X1"))
            .unwrap();
        assert_eq!(plugin.name, "listed");
        assert_eq!(score, SupportScore::COMPLETE);

        assert!(registry.best_match(&DeviceFingerprint::new("Other")).is_none());
    }

    #[test]
    fn test_cisco_sip_outranks_sccp_without_model() {
        let (plugin, score) = PluginRegistry::global()
            .best_match(&DeviceFingerprint::new("Cisco"))
            .unwrap();
        assert_eq!(plugin.name, "cisco_sip");
        assert_eq!(score, SupportScore::PROBABLE.with_bonus(10));
    }

    #[test]
    fn test_firmware_picks_the_release() {
        let registry = PluginRegistry::global();
        let best = |vendor: &str, model: &str, version: Option<&str>| {
            let mut device = DeviceFingerprint::new(vendor).with_model(model);
            if let Some(version) = version {
                device = device.with_version(version);
            }
            let (plugin, _) = registry.best_match(&device).unwrap();
            plugin.name.clone()
        };

        assert_eq!(best("Yealink", "T46S", Some("66.86.0.15")), "yealink_v86");
        assert_eq!(best("Yealink", "T46S", Some("66.83.0.35")), "yealink_v83");
        assert_eq!(best("Yealink", "T46S", None), "yealink_v86");
        assert_eq!(best("Yealink", "T49G", None), "yealink_v80");
        assert_eq!(best("Snom", "D715", Some("10.1.39.11")), "snom_10_1_39");
        assert_eq!(best("Snom", "715", Some("10.1.46.16")), "snom_10_1_46");
        assert_eq!(best("Gigaset", "N720 IP PRO", None), "gigaset");
    }

    #[test]
    fn test_builtin_filenames_do_not_collide() {
        let registry = PluginRegistry::global();
        let macs = ["000413aabbcc", "001565aabbcc", "7c2f80ca4b0f"];

        let mut seen = std::collections::HashMap::new();
        for plugin in registry.iter() {
            for mac in macs {
                let device = DeviceFingerprint::new(plugin.vendor()).with_mac(mac.parse().unwrap());
                let name = plugin.device_filename(&device).unwrap();
                let dir = plugin.output_subdir.clone().unwrap_or_default();
                if let Some(other) = seen.insert((dir, name.clone()), plugin.vendor().to_string()) {
                    assert_eq!(other, plugin.vendor(), "{} shared across vendors", name);
                }
            }
        }
    }

    #[test]
    fn test_global_extract() {
        let registry = PluginRegistry::global();

        let fp = registry
            .extract(&DhcpRequest::with_vendor_class(&b"Cisco Systems, Inc. IP Phone CP-7960G\x00"[..]).into())
            .unwrap();
        assert_eq!(fp.vendor(), "Cisco");
        assert_eq!(fp.model(), Some("7960G"));

        let fp = registry
            .extract(
                &HttpRequest::new("/cfg.xml")
                    .with_header(
                        &b"User-Agent"[..],
                        &b"Grandstream Model HW GXP2160 SW 1.0.11.3 DevId 000b82aabbcc"[..],
                    )
                    .into(),
            )
            .unwrap();
        assert_eq!(fp.vendor(), "Grandstream");
        assert_eq!(fp.model(), Some("GXP2160"));

        assert!(registry.extract(&TftpRequest::new("unknown.bin").into()).is_none());
    }
}
