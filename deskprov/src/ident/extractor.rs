//! Extraction strategies, one per transport.
//!
//! Extractors are immutable once built. They hold compiled patterns only,
//! so a single instance can be shared by every plugin of a vendor family and
//! called concurrently.

use std::sync::Arc;

use log::{debug, info};
use regex::Regex;

use super::fingerprint::DeviceFingerprint;
use super::patterns::{FingerprintPattern, MODEL_GROUP};
use super::request::{Request, RequestType};

/// Capture group holding a legacy two-digit model number.
pub const LEGACY_GROUP: &str = "legacy";
/// Second capture group for legacy numbers, for patterns with two spellings.
pub const LEGACY_ALT_GROUP: &str = "legacy_alt";

/// Trait for turning a request into a device fingerprint.
pub trait DeviceInfoExtractor: Send + Sync {
    /// Extract a fingerprint, or `None` if the request is not recognized.
    fn extract(&self, request: &Request) -> Option<DeviceFingerprint>;
}

/// Maps a legacy two-digit model number to a full model name.
///
/// The number is appended to `prefix`, followed by `suffix` unless the number
/// has an exception entry.
#[derive(Debug, Clone)]
pub struct LegacyModelRule {
    prefix: String,
    suffix: String,
    exceptions: Vec<(String, String)>,
}

impl LegacyModelRule {
    /// Create a rule, e.g. prefix `79` and suffix `G`.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            exceptions: Vec::new(),
        }
    }

    /// Use a different suffix for one number.
    pub fn with_exception(mut self, number: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.exceptions.push((number.into(), suffix.into()));
        self
    }

    /// Expand a legacy number into a model name.
    pub fn model(&self, number: &str) -> String {
        let suffix = self
            .exceptions
            .iter()
            .find(|(n, _)| n == number)
            .map(|(_, s)| s.as_str())
            .unwrap_or(self.suffix.as_str());
        format!("{}{}{}", self.prefix, number, suffix)
    }
}

/// DHCP strategy reading the vendor class identifier (option 60).
#[derive(Debug, Clone)]
pub struct VendorClassExtractor {
    vendor: String,
    prefix: String,
    model_pattern: Option<Regex>,
    legacy_rule: Option<LegacyModelRule>,
}

impl VendorClassExtractor {
    /// Recognize `vendor` when the vendor class starts with `prefix`.
    pub fn new(vendor: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            prefix: prefix.into(),
            model_pattern: None,
            legacy_rule: None,
        }
    }

    /// Set the pattern searched for a model.
    ///
    /// The pattern may capture `legacy`/`legacy_alt` (expanded through the
    /// legacy rule) or `model` (used as is).
    pub fn with_model_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.model_pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Set the rule expanding legacy model numbers.
    pub fn with_legacy_rule(mut self, rule: LegacyModelRule) -> Self {
        self.legacy_rule = Some(rule);
        self
    }

    /// Extract a fingerprint from a vendor class identifier string.
    pub fn extract_from_vendor_class(&self, vdi: &str) -> Option<DeviceFingerprint> {
        if !vdi.starts_with(&self.prefix) {
            return None;
        }

        let fp = DeviceFingerprint::new(self.vendor.as_str());
        let Some(caps) = self.model_pattern.as_ref().and_then(|p| p.captures(vdi)) else {
            return Some(fp);
        };

        let legacy = caps
            .name(LEGACY_GROUP)
            .or_else(|| caps.name(LEGACY_ALT_GROUP));
        let model = match (legacy, &self.legacy_rule) {
            (Some(number), Some(rule)) => Some(rule.model(number.as_str())),
            (Some(number), None) => Some(number.as_str().to_string()),
            (None, _) => caps.name(MODEL_GROUP).map(|m| m.as_str().to_string()),
        };

        match model {
            Some(model) => {
                debug!("Model: {}", model);
                Some(fp.with_model(model))
            }
            None => Some(fp),
        }
    }
}

impl DeviceInfoExtractor for VendorClassExtractor {
    fn extract(&self, request: &Request) -> Option<DeviceFingerprint> {
        let Request::Dhcp(dhcp) = request else {
            return None;
        };
        let vdi = String::from_utf8_lossy(dhcp.vendor_class()?);
        self.extract_from_vendor_class(&vdi)
    }
}

/// Strategy matching the HTTP path or TFTP filename against fixed grammars.
///
/// Patterns are tried in declared order; the first match wins.
#[derive(Debug, Clone)]
pub struct FilenameExtractor {
    vendor: String,
    patterns: Vec<FingerprintPattern>,
}

impl FilenameExtractor {
    /// Create an extractor for `vendor` without patterns.
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            patterns: Vec::new(),
        }
    }

    /// Append a pattern.
    pub fn with_pattern(mut self, pattern: FingerprintPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Extract a fingerprint from a filename or path.
    pub fn extract_from_filename(&self, filename: &str) -> Option<DeviceFingerprint> {
        self.patterns
            .iter()
            .find_map(|p| p.fingerprint(&self.vendor, filename))
    }
}

impl DeviceInfoExtractor for FilenameExtractor {
    fn extract(&self, request: &Request) -> Option<DeviceFingerprint> {
        match request {
            Request::Http(http) => self.extract_from_filename(&http.path),
            Request::Tftp(tftp) => self.extract_from_filename(&tftp.packet.filename),
            Request::Dhcp(_) => None,
        }
    }
}

/// HTTP strategy matching the `User-Agent` header.
#[derive(Debug, Clone)]
pub struct UserAgentExtractor {
    vendor: String,
    patterns: Vec<FingerprintPattern>,
}

impl UserAgentExtractor {
    /// Create an extractor for `vendor` without patterns.
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            patterns: Vec::new(),
        }
    }

    /// Append a pattern.
    pub fn with_pattern(mut self, pattern: FingerprintPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Extract a fingerprint from a user agent string.
    pub fn extract_from_user_agent(&self, ua: &str) -> Option<DeviceFingerprint> {
        self.patterns
            .iter()
            .find_map(|p| p.fingerprint(&self.vendor, ua))
    }
}

impl DeviceInfoExtractor for UserAgentExtractor {
    fn extract(&self, request: &Request) -> Option<DeviceFingerprint> {
        let Request::Http(http) = request else {
            return None;
        };
        let raw = http.header(b"User-Agent")?;
        match std::str::from_utf8(raw) {
            Ok(ua) if ua.is_ascii() => self.extract_from_user_agent(ua),
            _ => {
                info!("Ignoring non-ASCII User-Agent header");
                None
            }
        }
    }
}

/// The extractors of one plugin, dispatched by request type.
#[derive(Default, Clone)]
pub struct ExtractorSet {
    dhcp: Option<Arc<dyn DeviceInfoExtractor>>,
    http: Vec<Arc<dyn DeviceInfoExtractor>>,
    tftp: Option<Arc<dyn DeviceInfoExtractor>>,
}

impl ExtractorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DHCP extractor.
    pub fn with_dhcp(mut self, extractor: impl DeviceInfoExtractor + 'static) -> Self {
        self.dhcp = Some(Arc::new(extractor));
        self
    }

    /// Append an HTTP extractor; HTTP extractors are tried in order.
    pub fn with_http(mut self, extractor: impl DeviceInfoExtractor + 'static) -> Self {
        self.http.push(Arc::new(extractor));
        self
    }

    /// Set the TFTP extractor.
    pub fn with_tftp(mut self, extractor: impl DeviceInfoExtractor + 'static) -> Self {
        self.tftp = Some(Arc::new(extractor));
        self
    }

    /// Check if any extractor handles this request type.
    pub fn supports(&self, request_type: RequestType) -> bool {
        match request_type {
            RequestType::Dhcp => self.dhcp.is_some(),
            RequestType::Http => !self.http.is_empty(),
            RequestType::Tftp => self.tftp.is_some(),
        }
    }
}

impl DeviceInfoExtractor for ExtractorSet {
    fn extract(&self, request: &Request) -> Option<DeviceFingerprint> {
        match request.request_type() {
            RequestType::Dhcp => self.dhcp.as_ref()?.extract(request),
            RequestType::Http => self.http.iter().find_map(|e| e.extract(request)),
            RequestType::Tftp => self.tftp.as_ref()?.extract(request),
        }
    }
}

impl std::fmt::Debug for ExtractorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorSet")
            .field("dhcp", &self.dhcp.is_some())
            .field("http", &self.http.len())
            .field("tftp", &self.tftp.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::request::{DhcpRequest, HttpRequest, TftpRequest};

    fn acme_dhcp() -> VendorClassExtractor {
        VendorClassExtractor::new("Acme", "Acme Corp")
            .with_model_pattern(r"\bPhone (?:A(?P<legacy>\d\d)|M-(?P<model>\d{4}))")
            .unwrap()
            .with_legacy_rule(LegacyModelRule::new("A", "X").with_exception("10", ""))
    }

    #[test]
    fn test_legacy_rule() {
        let rule = LegacyModelRule::new("79", "G").with_exception("20", "");
        assert_eq!(rule.model("60"), "7960G");
        assert_eq!(rule.model("20"), "7920");
    }

    #[test]
    fn test_vendor_class_variants() {
        let e = acme_dhcp();
        assert_eq!(
            e.extract_from_vendor_class("Acme Corp Phone A42").unwrap().model(),
            Some("A42X")
        );
        assert_eq!(
            e.extract_from_vendor_class("Acme Corp Phone A10").unwrap().model(),
            Some("A10")
        );
        assert_eq!(
            e.extract_from_vendor_class("Acme Corp Phone M-1234").unwrap().model(),
            Some("1234")
        );

        let vendor_only = e.extract_from_vendor_class("Acme Corp Gizmo").unwrap();
        assert_eq!(vendor_only.vendor(), "Acme");
        assert!(vendor_only.model().is_none());

        assert!(e.extract_from_vendor_class("Other Inc. Phone A42").is_none());
    }

    #[test]
    fn test_vendor_class_ignores_other_transports() {
        let e = acme_dhcp();
        assert!(e.extract(&Request::from(HttpRequest::new("/"))).is_none());
        assert!(
            e.extract(&Request::from(DhcpRequest::default()))
                .is_none()
        );
    }

    #[test]
    fn test_filename_first_match_wins() {
        let e = FilenameExtractor::new("Acme")
            .with_pattern(FingerprintPattern::new(r"^cfg(?P<mac>[\da-f]{12})\.xml$").unwrap())
            .with_pattern(
                FingerprintPattern::new(r"^cfg.*\.xml$")
                    .unwrap()
                    .with_model("generic"),
            );

        let fp = e.extract_from_filename("cfg001122aabbcc.xml").unwrap();
        assert_eq!(fp.mac().unwrap().to_string(), "001122aabbcc");
        assert!(fp.model().is_none());

        let fp = e.extract_from_filename("cfgdefault.xml").unwrap();
        assert_eq!(fp.model(), Some("generic"));

        let fp = e
            .extract(&Request::from(TftpRequest::new("cfg001122aabbcc.xml")))
            .unwrap();
        assert!(fp.mac().is_some());
    }

    #[test]
    fn test_user_agent() {
        let e = UserAgentExtractor::new("Acme").with_pattern(
            FingerprintPattern::new(r"^Acme (?P<model>\w+) (?P<version>[\d.]+)$").unwrap(),
        );
        let req = HttpRequest::new("/any").with_header("user-agent", "Acme X1 2.0");
        let fp = e.extract(&Request::from(req)).unwrap();
        assert_eq!(fp.model(), Some("X1"));
        assert_eq!(fp.version(), Some("2.0"));

        let req = HttpRequest::new("/any").with_header("User-Agent", &b"Acme \xff 2.0"[..]);
        assert!(e.extract(&Request::from(req)).is_none());

        assert!(e.extract(&Request::from(HttpRequest::new("/any"))).is_none());
    }

    #[test]
    fn test_extractor_set_dispatch() {
        let set = ExtractorSet::new()
            .with_dhcp(acme_dhcp())
            .with_tftp(FilenameExtractor::new("Acme").with_pattern(
                FingerprintPattern::new(r"^acme\.cfg$").unwrap(),
            ));

        assert!(set.supports(RequestType::Dhcp));
        assert!(!set.supports(RequestType::Http));
        assert!(set.extract(&Request::from(HttpRequest::new("/acme.cfg"))).is_none());
        assert!(set.extract(&Request::from(TftpRequest::new("acme.cfg"))).is_some());
        assert!(
            set.extract(&Request::from(DhcpRequest::with_vendor_class(
                &b"Acme Corp Phone A42"[..]
            )))
            .is_some()
        );
    }
}
