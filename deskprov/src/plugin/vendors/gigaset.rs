//! Gigaset N720 DECT multicell plugin definition.
//!
//! The N720 fetches `<mac>.xml` over HTTP and announces itself as:
//!
//! ```text
//! Gigaset N720 DM PRO/70.117.00.000.000+build.a8e5ade;7C2F80CA4B0F
//! Gigaset N720 IP PRO/70.117.00.000.000;7C:2F:80:CA:4B:0F
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::assoc::AssociatorPolicy;
use crate::ident::{ExtractorSet, FilenameExtractor, FingerprintPattern, UserAgentExtractor};
use crate::mapper::{
    DtmfTable, FieldMappingPolicy, MappingStep, RequiredTransport, TranslationTable,
};
use crate::plugin::{DeviceFilename, MacCase, PluginDefinition};
use crate::tz::{BuiltinTimezones, LocaleTable, TimezonePolicy, TimezoneTable};

/// Vendor name reported in fingerprints.
pub const VENDOR: &str = "Gigaset";

/// Supported models and the firmware they run.
pub const MODEL_VERSIONS: &[(&str, &str)] = &[
    ("N720 DM PRO", "70.117.00.000.000"),
    ("N720 IP PRO", "70.117.00.000.000"),
];

/// Default SIP proxy port.
pub const DEFAULT_PROXY_PORT: u16 = 5060;

/// Label used when the timezone is absent or cannot be matched.
pub const DEFAULT_TIMEZONE: &str = "GMT+01:00 Amsterdam, Berlin, Paris, Rome";

const ZONES: &[(&str, &str)] = &[
    ("US/Pacific", "GMT-08:00 Pacific Time (US & Canada)"),
    ("US/Mountain", "GMT-07:00 Mountain Time (US & Canada)"),
    ("US/Central", "GMT-06:00 Central Time (US & Canada)"),
    ("US/Eastern", "GMT-05:00 Eastern Time (US & Canada)"),
    ("Canada/Atlantic", "GMT-04:00 Atlantic Time (Canada)"),
    ("Europe/London", "GMT Dublin, Edinburgh, Lisbon, London"),
    ("Europe/Paris", "GMT+01:00 Amsterdam, Berlin, Paris, Rome"),
    ("Europe/Athens", "GMT+02:00 Athens, Bucharest"),
    ("Europe/Moscow", "GMT+03:00 Moscow, St. Petersburg"),
    ("Asia/Dubai", "GMT+04:00 Abu Dhabi, Muscat"),
    ("Asia/Tokyo", "GMT+09:00 Osaka, Sapporo, Tokyo"),
    ("Australia/Sydney", "GMT+10:00 Canberra, Melbourne, Sydney"),
];

const LOCALES: &[(&str, &str)] = &[
    ("de_DE", "de"),
    ("en_US", "en"),
    ("es_ES", "es"),
    ("fr_FR", "fr"),
    ("fr_CA", "fr"),
    ("it_IT", "it"),
    ("nl_NL", "nl"),
];

static TIMEZONES: Lazy<Arc<TimezoneTable>> = Lazy::new(|| {
    Arc::new(TimezoneTable::build(
        Arc::new(BuiltinTimezones),
        ZONES,
        DEFAULT_TIMEZONE,
    ))
});

static EXTRACTORS: Lazy<Arc<ExtractorSet>> = Lazy::new(|| {
    let ua = UserAgentExtractor::new(VENDOR).with_pattern(
        FingerprintPattern::new(
            r"^Gigaset (?P<model>N720 (?:DM|IP) PRO)/(?P<version>[\d.]+)(?:\+\S+)?;(?P<mac>[\da-fA-F:]{12,17})$",
        )
        .unwrap()
        .with_required_mac(),
    );
    let filename = FilenameExtractor::new(VENDOR)
        .with_pattern(FingerprintPattern::new(r"^/?(?P<mac>[\da-f]{12})\.xml$").unwrap());

    Arc::new(ExtractorSet::new().with_http(ua).with_http(filename))
});

/// Create the Gigaset plugin definition.
pub fn plugin() -> PluginDefinition {
    let mapping = FieldMappingPolicy::new()
        .with_required_transport(RequiredTransport::Http)
        .with_sip_lines_required()
        .with_step(MappingStep::Locale(LocaleTable::codes(LOCALES)))
        .with_step(MappingStep::Timezone(TimezonePolicy::Table(Arc::clone(&TIMEZONES))))
        .with_step(MappingStep::DtmfMode(DtmfTable::Single(TranslationTable::new([
            ("RTP-in-band", "audio"),
            ("RTP-out-of-band", "rfc2833"),
            ("SIP-INFO", "sipinfo"),
        ]))))
        .with_step(MappingStep::SipTransport(TranslationTable::new([
            ("udp", "UDP"),
            ("tcp", "TCP"),
            ("tls", "TLS"),
        ])))
        .with_step(MappingStep::ClearAutoprovPassword)
        .with_step(MappingStep::SipLines {
            default_proxy_port: DEFAULT_PROXY_PORT,
        });

    PluginDefinition::new("gigaset", VENDOR, DeviceFilename::new("", MacCase::Lower, ".xml"))
        .with_associator(
            AssociatorPolicy::new(VENDOR).with_model_versions(MODEL_VERSIONS.iter().copied()),
        )
        .with_extractors(Arc::clone(&EXTRACTORS))
        .with_mapping(mapping)
        .with_encoding("UTF-8")
}
