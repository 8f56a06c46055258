//! The vendor-neutral configuration record produced by the host.
//!
//! Every recognized key is optional so that "absent" never collapses into an
//! empty string or zero. Keys the crate does not recognize are kept in
//! `extra` and reach the template untouched.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Keys of [`ConfigRecord`] the mappers know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Mac,
    Model,
    Vendor,
    Timezone,
    Locale,
    DnsEnabled,
    DnsIp,
    SipLines,
    SipProxyPort,
    ExtenVoicemail,
    SipDtmfMode,
    SipTransport,
    SccpCallManagers,
    Funckeys,
    TftpPort,
    HttpPort,
    ConfigVersion,
    PhonebookIp,
}

impl ConfigKey {
    /// Every recognized key.
    pub const ALL: [ConfigKey; 18] = [
        ConfigKey::Mac,
        ConfigKey::Model,
        ConfigKey::Vendor,
        ConfigKey::Timezone,
        ConfigKey::Locale,
        ConfigKey::DnsEnabled,
        ConfigKey::DnsIp,
        ConfigKey::SipLines,
        ConfigKey::SipProxyPort,
        ConfigKey::ExtenVoicemail,
        ConfigKey::SipDtmfMode,
        ConfigKey::SipTransport,
        ConfigKey::SccpCallManagers,
        ConfigKey::Funckeys,
        ConfigKey::TftpPort,
        ConfigKey::HttpPort,
        ConfigKey::ConfigVersion,
        ConfigKey::PhonebookIp,
    ];

    /// Key name in the serialized record.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Mac => "mac",
            ConfigKey::Model => "model",
            ConfigKey::Vendor => "vendor",
            ConfigKey::Timezone => "timezone",
            ConfigKey::Locale => "locale",
            ConfigKey::DnsEnabled => "dns_enabled",
            ConfigKey::DnsIp => "dns_ip",
            ConfigKey::SipLines => "sip_lines",
            ConfigKey::SipProxyPort => "sip_proxy_port",
            ConfigKey::ExtenVoicemail => "exten_voicemail",
            ConfigKey::SipDtmfMode => "sip_dtmf_mode",
            ConfigKey::SipTransport => "sip_transport",
            ConfigKey::SccpCallManagers => "sccp_call_managers",
            ConfigKey::Funckeys => "funckeys",
            ConfigKey::TftpPort => "tftp_port",
            ConfigKey::HttpPort => "http_port",
            ConfigKey::ConfigVersion => "config_version",
            ConfigKey::PhonebookIp => "phonebook_ip",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One SIP line (account) of a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SipLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_proxy_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_proxy_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_proxy_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_proxy_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_registrar_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_registrar_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voicemail: Option<String>,

    /// Unrecognized line keys.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// SCCP call manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallManager {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// What a function key does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FuncKeyType {
    Speeddial,
    Blf,
    Park,
    Default,
    Disabled,
    /// A type no mapper knows; mappers drop such keys.
    Other(String),
}

impl FuncKeyType {
    pub fn as_str(&self) -> &str {
        match self {
            FuncKeyType::Speeddial => "speeddial",
            FuncKeyType::Blf => "blf",
            FuncKeyType::Park => "park",
            FuncKeyType::Default => "default",
            FuncKeyType::Disabled => "disabled",
            FuncKeyType::Other(name) => name,
        }
    }
}

impl From<String> for FuncKeyType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "speeddial" => FuncKeyType::Speeddial,
            "blf" => FuncKeyType::Blf,
            "park" => FuncKeyType::Park,
            "default" => FuncKeyType::Default,
            "disabled" => FuncKeyType::Disabled,
            _ => FuncKeyType::Other(s),
        }
    }
}

impl From<FuncKeyType> for String {
    fn from(t: FuncKeyType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for FuncKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_line() -> u32 {
    1
}

/// A programmable key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncKey {
    #[serde(rename = "type")]
    pub key_type: FuncKeyType,
    /// 1-based SIP line the key acts on.
    #[serde(default = "default_line")]
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FuncKey {
    /// Create a key of the given type on line 1.
    pub fn new(key_type: FuncKeyType) -> Self {
        Self {
            key_type,
            line: 1,
            label: None,
            value: None,
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the value (extension, park slot...).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the line.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }
}

// Index maps arrive with string keys ("1", "2"...). Parsing them here instead
// of relying on integer map keys keeps working under `#[serde(flatten)]`.
fn de_indexed<'de, D, T>(deserializer: D) -> Result<BTreeMap<u32, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw = BTreeMap::<String, T>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(k, v)| {
            k.parse::<u32>()
                .map(|i| (i, v))
                .map_err(|_| serde::de::Error::custom(format!("invalid index '{}'", k)))
        })
        .collect()
}

/// Vendor-neutral configuration of one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    // identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    // network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_ip: Option<String>,

    // telephony
    #[serde(
        default,
        deserialize_with = "de_indexed",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub sip_lines: BTreeMap<u32, SipLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sip_proxy_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exten_voicemail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sip_dtmf_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sip_transport: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_indexed",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub sccp_call_managers: BTreeMap<u32, CallManager>,

    // UI
    #[serde(
        default,
        deserialize_with = "de_indexed",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub funckeys: BTreeMap<u32, FuncKey>,

    // transport hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tftp_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_version: Option<u32>,

    // phonebook
    #[serde(
        default,
        alias = "X_xivo_phonebook_ip",
        skip_serializing_if = "Option::is_none"
    )]
    pub phonebook_ip: Option<String>,

    /// Unrecognized keys, passed through to the template.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ConfigRecord {
    /// Decode a record from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a record from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Check whether a recognized key carries a value.
    pub fn is_set(&self, key: ConfigKey) -> bool {
        match key {
            ConfigKey::Mac => self.mac.is_some(),
            ConfigKey::Model => self.model.is_some(),
            ConfigKey::Vendor => self.vendor.is_some(),
            ConfigKey::Timezone => self.timezone.is_some(),
            ConfigKey::Locale => self.locale.is_some(),
            ConfigKey::DnsEnabled => self.dns_enabled.is_some(),
            ConfigKey::DnsIp => self.dns_ip.is_some(),
            ConfigKey::SipLines => !self.sip_lines.is_empty(),
            ConfigKey::SipProxyPort => self.sip_proxy_port.is_some(),
            ConfigKey::ExtenVoicemail => self.exten_voicemail.is_some(),
            ConfigKey::SipDtmfMode => self.sip_dtmf_mode.is_some(),
            ConfigKey::SipTransport => self.sip_transport.is_some(),
            ConfigKey::SccpCallManagers => !self.sccp_call_managers.is_empty(),
            ConfigKey::Funckeys => !self.funckeys.is_empty(),
            ConfigKey::TftpPort => self.tftp_port.is_some(),
            ConfigKey::HttpPort => self.http_port.is_some(),
            ConfigKey::ConfigVersion => self.config_version.is_some(),
            ConfigKey::PhonebookIp => self.phonebook_ip.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_record() {
        let record = ConfigRecord::from_value(json!({
            "locale": "fr_FR",
            "timezone": "Europe/Paris",
            "tftp_port": 69,
            "sip_lines": {
                "2": {"proxy_ip": "10.0.0.2", "password": "secret"},
                "10": {"proxy_ip": "10.0.0.10", "custom": true},
            },
            "funckeys": {
                "1": {"type": "blf", "line": 1, "value": "1001", "label": "Alice"},
                "3": {"type": "intercom", "value": "1003"},
            },
            "X_xivo_phonebook_ip": "10.0.0.1",
            "X_custom": "kept",
        }))
        .unwrap();

        assert_eq!(record.locale.as_deref(), Some("fr_FR"));
        assert_eq!(record.tftp_port, Some(69));
        assert_eq!(record.sip_lines.keys().copied().collect::<Vec<_>>(), vec![2, 10]);
        assert_eq!(record.sip_lines[&10].extra["custom"], json!(true));
        assert_eq!(record.funckeys[&1].key_type, FuncKeyType::Blf);
        assert_eq!(
            record.funckeys[&3].key_type,
            FuncKeyType::Other("intercom".to_string())
        );
        assert_eq!(record.funckeys[&3].line, 1);
        assert_eq!(record.phonebook_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(record.extra["X_custom"], json!("kept"));
    }

    #[test]
    fn test_absent_is_distinct_from_empty() {
        let record = ConfigRecord::from_json(r#"{"exten_voicemail": ""}"#).unwrap();
        assert!(record.is_set(ConfigKey::ExtenVoicemail));
        assert!(!record.is_set(ConfigKey::Locale));
        assert!(!record.is_set(ConfigKey::SipLines));
    }

    #[test]
    fn test_invalid_index() {
        let err = ConfigRecord::from_value(json!({"sip_lines": {"first": {}}})).unwrap_err();
        assert!(err.to_string().contains("invalid index"));
    }

    #[test]
    fn test_serialize_skips_absent() {
        let mut record = ConfigRecord::default();
        record.sip_lines.insert(1, SipLine::default());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"sip_lines": {"1": {}}}));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(ConfigKey::ALL.len(), 18);
        assert_eq!(ConfigKey::SipDtmfMode.as_str(), "sip_dtmf_mode");
    }
}
