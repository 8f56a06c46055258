//! Table-driven translations of single neutral values.
//!
//! An absent or untranslatable source value leaves the synthesized key
//! unset.

use indexmap::IndexMap;
use log::info;
use serde_json::Value;

use super::MappingState;
use crate::tz::{LocaleTable, TimezonePolicy};

/// Neutral value to vendor token.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: IndexMap<String, Value>,
}

impl TranslationTable {
    /// Create a table.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Translate a neutral value.
    pub fn get(&self, neutral: Option<&str>) -> Option<&Value> {
        self.entries.get(neutral?)
    }
}

/// DTMF translation.
#[derive(Debug, Clone)]
pub enum DtmfTable {
    /// Mode to `(in audio, in RTP, in SIP)` flags, written to
    /// `XX_dtmf_in_audio`, `XX_dtmf_in_rtp` and `XX_dtmf_in_sip`.
    Split(IndexMap<String, [String; 3]>),
    /// Mode to a single token, written to `XX_dtmf_mode`.
    Single(TranslationTable),
}

impl DtmfTable {
    /// Create a three-column table.
    pub fn split(rows: &[(&str, [&str; 3])]) -> Self {
        DtmfTable::Split(
            rows.iter()
                .map(|(mode, flags)| (mode.to_string(), flags.map(str::to_string)))
                .collect(),
        )
    }
}

pub(super) fn apply_locale(state: &mut MappingState<'_>, table: &LocaleTable) {
    if let Some(locale) = table.get(state.record.locale.as_deref()) {
        state.set("XX_locale", locale.to_value());
    }
}

pub(super) fn apply_timezone(state: &mut MappingState<'_>, policy: &TimezonePolicy) {
    if let Some(value) = policy.resolve(state.record.timezone.as_deref()) {
        let value = value.to_string();
        state.set("XX_timezone", value);
        return;
    }

    // Named tables: the neutral value itself becomes the fallback rule.
    if let TimezonePolicy::Named(named) = policy {
        info!(
            "Unknown timezone {:?}, using {}",
            state.record.timezone,
            named.fallback_zone()
        );
        state.record.timezone = named.fallback_value().map(str::to_string);
    }
}

pub(super) fn apply_sip_transport(state: &mut MappingState<'_>, table: &TranslationTable) {
    let Some(transport) = state.record.sip_transport.clone() else {
        return;
    };
    match table.get(Some(transport.as_str())) {
        Some(value) => state.set("XX_sip_transport", value.clone()),
        None => info!("Unsupported SIP transport: {}", transport),
    }
}

pub(super) fn apply_dtmf_mode(state: &mut MappingState<'_>, table: &DtmfTable) {
    let Some(mode) = state.record.sip_dtmf_mode.clone().filter(|m| !m.is_empty()) else {
        return;
    };

    match table {
        DtmfTable::Split(rows) => match rows.get(&mode) {
            Some([in_audio, in_rtp, in_sip]) => {
                state.set("XX_dtmf_in_audio", in_audio.as_str());
                state.set("XX_dtmf_in_rtp", in_rtp.as_str());
                state.set("XX_dtmf_in_sip", in_sip.as_str());
            }
            None => info!("Unsupported DTMF mode: {}", mode),
        },
        DtmfTable::Single(tokens) => match tokens.get(Some(mode.as_str())) {
            Some(value) => state.set("XX_dtmf_mode", value.clone()),
            None => info!("Unsupported DTMF mode: {}", mode),
        },
    }
}

pub(super) fn apply_dns(state: &mut MappingState<'_>) {
    if state.record.dns_enabled != Some(true) {
        return;
    }
    let Some(dns_ip) = state.record.dns_ip.clone() else {
        info!("DNS enabled without a DNS server address");
        return;
    };
    for (n, part) in dns_ip.split('.').enumerate() {
        state.set(format!("XX_dns_{}", n + 1), part);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigRecord;
    use crate::ident::DeviceFingerprint;
    use crate::mapper::{VendorFieldMapping, run_step};
    use crate::tz::{NamedTimezones, VendorLocale};
    use serde_json::json;

    fn run(record: ConfigRecord, f: impl FnOnce(&mut MappingState<'_>)) -> VendorFieldMapping {
        run_step(record, &DeviceFingerprint::new("Grandstream"), f).1
    }

    fn grandstream_dtmf() -> DtmfTable {
        DtmfTable::split(&[
            ("RTP-in-band", ["Yes", "Yes", "No"]),
            ("RTP-out-of-band", ["No", "Yes", "No"]),
            ("SIP-INFO", ["No", "No", "Yes"]),
        ])
    }

    #[test]
    fn test_sip_info_dtmf() {
        let record = ConfigRecord {
            sip_dtmf_mode: Some("SIP-INFO".to_string()),
            ..Default::default()
        };
        let out = run(record, |s| apply_dtmf_mode(s, &grandstream_dtmf()));
        assert_eq!(out.str("XX_dtmf_in_audio"), Some("No"));
        assert_eq!(out.str("XX_dtmf_in_rtp"), Some("No"));
        assert_eq!(out.str("XX_dtmf_in_sip"), Some("Yes"));
    }

    #[test]
    fn test_unknown_or_absent_dtmf_sets_nothing() {
        let record = ConfigRecord {
            sip_dtmf_mode: Some("bogus".to_string()),
            ..Default::default()
        };
        let out = run(record, |s| apply_dtmf_mode(s, &grandstream_dtmf()));
        assert!(out.is_empty());

        let out = run(ConfigRecord::default(), |s| {
            apply_dtmf_mode(s, &grandstream_dtmf())
        });
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_token_dtmf() {
        let table =
            DtmfTable::Single(TranslationTable::new([("RTP-in-band", 0), ("SIP-INFO", 2)]));
        let record = ConfigRecord {
            sip_dtmf_mode: Some("SIP-INFO".to_string()),
            ..Default::default()
        };
        let out = run(record, |s| apply_dtmf_mode(s, &table));
        assert_eq!(out.scalar("XX_dtmf_mode"), Some(&json!(2)));
    }

    #[test]
    fn test_transport() {
        let table = TranslationTable::new([("udp", "UDP"), ("tls", "TlsOrTcp")]);
        let record = ConfigRecord {
            sip_transport: Some("tls".to_string()),
            ..Default::default()
        };
        let out = run(record, |s| apply_sip_transport(s, &table));
        assert_eq!(out.str("XX_sip_transport"), Some("TlsOrTcp"));

        let record = ConfigRecord {
            sip_transport: Some("sctp".to_string()),
            ..Default::default()
        };
        let out = run(record, |s| apply_sip_transport(s, &table));
        assert!(!out.contains_key("XX_sip_transport"));
    }

    #[test]
    fn test_dns() {
        let record = ConfigRecord {
            dns_enabled: Some(true),
            dns_ip: Some("10.34.1.2".to_string()),
            ..Default::default()
        };
        let out = run(record, apply_dns);
        let keys: Vec<_> = out.keys().collect();
        assert_eq!(keys, vec!["XX_dns_1", "XX_dns_2", "XX_dns_3", "XX_dns_4"]);
        assert_eq!(out.str("XX_dns_4"), Some("2"));

        let record = ConfigRecord {
            dns_enabled: Some(false),
            dns_ip: Some("10.34.1.2".to_string()),
            ..Default::default()
        };
        assert!(run(record, apply_dns).is_empty());
    }

    #[test]
    fn test_locale_and_timezone() {
        let locales = LocaleTable::new([("fr_CA", VendorLocale::Code("fr".to_string()))]);
        let tz = TimezonePolicy::Named(NamedTimezones::new(
            [("Europe/Paris", "CET-1CEST")],
            "Europe/Paris",
        ));
        let record = ConfigRecord {
            locale: Some("fr_CA".to_string()),
            timezone: Some("America/Montreal".to_string()),
            ..Default::default()
        };
        let out = run(record, |s| {
            apply_locale(s, &locales);
            apply_timezone(s, &tz);
        });
        assert_eq!(out.str("XX_locale"), Some("fr"));
        assert!(!out.contains_key("XX_timezone"));

        let out = run(ConfigRecord::default(), |s| apply_locale(s, &locales));
        assert!(!out.contains_key("XX_locale"));
    }

    #[test]
    fn test_named_timezone_fallback_rewrites_neutral_value() {
        let tz = TimezonePolicy::Named(NamedTimezones::new(
            [("Europe/Paris", "CET-1CEST")],
            "Europe/Paris",
        ));

        let record = ConfigRecord {
            timezone: Some("Europe/Paris".to_string()),
            ..Default::default()
        };
        let (record, out) = run_step(record, &DeviceFingerprint::new("Grandstream"), |s| {
            apply_timezone(s, &tz)
        });
        assert_eq!(out.str("XX_timezone"), Some("CET-1CEST"));
        assert_eq!(record.timezone.as_deref(), Some("Europe/Paris"));

        for timezone in [Some("America/Montreal"), None] {
            let record = ConfigRecord {
                timezone: timezone.map(str::to_string),
                ..Default::default()
            };
            let (record, out) = run_step(record, &DeviceFingerprint::new("Grandstream"), |s| {
                apply_timezone(s, &tz)
            });
            assert!(!out.contains_key("XX_timezone"));
            assert_eq!(record.timezone.as_deref(), Some("CET-1CEST"));
        }
    }
}
