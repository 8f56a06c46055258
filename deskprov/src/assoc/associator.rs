//! Support scoring for a device fingerprint.

use indexmap::{IndexMap, IndexSet};

use super::score::SupportScore;
use crate::ident::DeviceFingerprint;

/// Trait for scoring how well a plugin supports a device.
pub trait Associator: Send + Sync {
    /// Score a vendor/model/version triple. Never fails.
    fn associate(&self, vendor: &str, model: Option<&str>, version: Option<&str>) -> SupportScore;

    /// Score a fingerprint.
    fn associate_fingerprint(&self, fingerprint: &DeviceFingerprint) -> SupportScore {
        self.associate(fingerprint.vendor(), fingerprint.model(), fingerprint.version())
    }
}

/// The models a plugin declares support for.
#[derive(Debug, Clone)]
pub enum ModelSupport {
    /// Plain list; per-model versions are not tracked.
    List(IndexSet<String>),
    /// Model to supported firmware version prefix.
    Versions(IndexMap<String, String>),
}

impl ModelSupport {
    fn contains(&self, model: &str) -> bool {
        match self {
            ModelSupport::List(models) => models.contains(model),
            ModelSupport::Versions(models) => models.contains_key(model),
        }
    }

    fn version_of(&self, model: &str) -> Option<&str> {
        match self {
            ModelSupport::List(_) => None,
            ModelSupport::Versions(models) => models.get(model).map(String::as_str),
        }
    }

    /// Iterate over the supported model names.
    pub fn models(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            ModelSupport::List(models) => Box::new(models.iter().map(String::as_str)),
            ModelSupport::Versions(models) => Box::new(models.keys().map(String::as_str)),
        }
    }
}

impl Default for ModelSupport {
    fn default() -> Self {
        ModelSupport::List(IndexSet::new())
    }
}

/// Data-driven associator shared by every vendor plugin.
///
/// Policy, in priority order:
/// 1. another vendor scores [`SupportScore::IMPROBABLE`];
/// 2. no model scores the plugin's unknown-model score;
/// 3. a denylisted model prefix scores [`SupportScore::NO_SUPPORT`];
/// 4. a listed model whose version starts with the supported version scores
///    [`SupportScore::EXACT`];
/// 5. any other listed model scores [`SupportScore::COMPLETE`];
/// 6. an unlisted model scores the plugin's unlisted-model score.
#[derive(Debug, Clone)]
pub struct AssociatorPolicy {
    vendor: String,
    models: ModelSupport,
    version: Option<String>,
    denied_prefixes: Vec<String>,
    unknown_model_score: SupportScore,
    unlisted_model_score: SupportScore,
}

impl AssociatorPolicy {
    /// Create a policy for `vendor` with no models.
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            models: ModelSupport::default(),
            version: None,
            denied_prefixes: Vec::new(),
            unknown_model_score: SupportScore::PROBABLE,
            unlisted_model_score: SupportScore::PROBABLE,
        }
    }

    /// Declare supported models without per-model versions.
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = ModelSupport::List(models.into_iter().map(Into::into).collect());
        self
    }

    /// Declare supported models with their firmware version prefix.
    pub fn with_model_versions<I, M, V>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = (M, V)>,
        M: Into<String>,
        V: Into<String>,
    {
        self.models = ModelSupport::Versions(
            models
                .into_iter()
                .map(|(m, v)| (m.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Set the firmware version prefix shared by every listed model.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Refuse models starting with `prefix` (sibling product lines).
    pub fn with_denied_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.denied_prefixes.push(prefix.into());
        self
    }

    /// Set the score used when the model is unknown.
    pub fn with_unknown_model_score(mut self, score: SupportScore) -> Self {
        self.unknown_model_score = score;
        self
    }

    /// Set the score used for same-vendor models that are not listed.
    pub fn with_unlisted_model_score(mut self, score: SupportScore) -> Self {
        self.unlisted_model_score = score;
        self
    }

    /// Get the vendor this policy recognizes.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Get the declared models.
    pub fn models(&self) -> &ModelSupport {
        &self.models
    }
}

impl Associator for AssociatorPolicy {
    fn associate(&self, vendor: &str, model: Option<&str>, version: Option<&str>) -> SupportScore {
        if vendor != self.vendor {
            return SupportScore::IMPROBABLE;
        }

        let Some(model) = model else {
            return self.unknown_model_score;
        };

        if self.denied_prefixes.iter().any(|p| model.starts_with(p.as_str())) {
            return SupportScore::NO_SUPPORT;
        }

        if !self.models.contains(model) {
            return self.unlisted_model_score;
        }

        let expected = self.models.version_of(model).or(self.version.as_deref());
        match (expected, version) {
            (Some(expected), Some(version)) if version.starts_with(expected) => SupportScore::EXACT,
            _ => SupportScore::COMPLETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cisco() -> AssociatorPolicy {
        AssociatorPolicy::new("Cisco")
            .with_models(["7940", "7960G"])
            .with_denied_prefix("SPA")
            .with_denied_prefix("ATA")
            .with_unknown_model_score(SupportScore::PROBABLE.with_bonus(10))
    }

    #[test]
    fn test_vendor_mismatch_is_improbable() {
        let assoc = cisco();
        for (model, version) in [
            (None, None),
            (Some("7960G"), None),
            (Some("7960G"), Some("8.1.2")),
            (Some("SPA504G"), None),
        ] {
            assert_eq!(
                assoc.associate("Grandstream", model, version),
                SupportScore::IMPROBABLE
            );
        }
    }

    #[test]
    fn test_unknown_model_gets_bonus() {
        assert_eq!(
            cisco().associate("Cisco", None, None),
            SupportScore::PROBABLE.with_bonus(10)
        );
    }

    #[test]
    fn test_denylist() {
        let assoc = cisco();
        assert_eq!(assoc.associate("Cisco", Some("SPA504G"), None), SupportScore::NO_SUPPORT);
        assert_eq!(assoc.associate("Cisco", Some("ATA186"), None), SupportScore::NO_SUPPORT);
    }

    #[test]
    fn test_listed_and_unlisted() {
        let assoc = cisco();
        assert_eq!(assoc.associate("Cisco", Some("7960G"), None), SupportScore::COMPLETE);
        assert_eq!(
            assoc.associate("Cisco", Some("7960G"), Some("9.0")),
            SupportScore::COMPLETE
        );
        assert_eq!(assoc.associate("Cisco", Some("8961"), None), SupportScore::PROBABLE);
    }

    #[test]
    fn test_plugin_wide_version() {
        let assoc = AssociatorPolicy::new("Grandstream")
            .with_models(["GXP2130"])
            .with_version("1.0.11")
            .with_unknown_model_score(SupportScore::UNKNOWN)
            .with_unlisted_model_score(SupportScore::UNKNOWN);

        assert_eq!(
            assoc.associate("Grandstream", Some("GXP2130"), Some("1.0.11.6")),
            SupportScore::EXACT
        );
        assert_eq!(
            assoc.associate("Grandstream", Some("GXP2130"), Some("1.0.9.1")),
            SupportScore::COMPLETE
        );
        assert_eq!(
            assoc.associate("Grandstream", Some("GXP2130"), None),
            SupportScore::COMPLETE
        );
        assert_eq!(assoc.associate("Grandstream", Some("HT801"), None), SupportScore::UNKNOWN);
        assert_eq!(assoc.associate("Grandstream", None, None), SupportScore::UNKNOWN);
    }

    #[test]
    fn test_per_model_versions() {
        let assoc = AssociatorPolicy::new("Yealink")
            .with_model_versions([("T46S", "66.86.0.15"), ("T58", "58.86.0.20")]);

        assert_eq!(
            assoc.associate("Yealink", Some("T46S"), Some("66.86.0.15")),
            SupportScore::EXACT
        );
        assert_eq!(
            assoc.associate("Yealink", Some("T58"), Some("66.86.0.15")),
            SupportScore::COMPLETE
        );
        assert_eq!(assoc.models().models().count(), 2);
    }

    #[test]
    fn test_fingerprint_delegates() {
        let fp = DeviceFingerprint::new("Cisco").with_model("7940");
        assert_eq!(cisco().associate_fingerprint(&fp), SupportScore::COMPLETE);
    }
}
