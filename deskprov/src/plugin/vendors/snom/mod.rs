//! Snom desk phone support.
//!
//! ```text
//! Mozilla/4.0 (compatible; snomD785-SIP 10.1.46.16 SPEAr300 SNOM 000413AABBCC)
//! ```
//!
//! Firmware releases are separate plugins sharing identification, tables
//! and mapping; they differ in the model list and the firmware version.

pub mod v10_1_39;
pub mod v10_1_46;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::assoc::AssociatorPolicy;
use crate::ident::{ExtractorSet, FilenameExtractor, FingerprintPattern, UserAgentExtractor};
use crate::mapper::{
    DtmfTable, FieldMappingPolicy, MappingStep, RequiredTransport, TranslationTable,
};
use crate::plugin::{DeviceFilename, MacCase, PluginDefinition};
use crate::tz::{
    BuiltinTimezones, LocaleTable, TimezonePolicy, TimezoneTable, VendorLocale,
};

/// Vendor name reported in fingerprints.
pub const VENDOR: &str = "Snom";

/// Default SIP proxy port.
pub const DEFAULT_PROXY_PORT: u16 = 5060;

/// Label used when the timezone is absent or cannot be matched.
pub const DEFAULT_TIMEZONE: &str = "USA-5";

const ZONES: &[(&str, &str)] = &[
    ("US/Hawaii", "USA-10"),
    ("US/Alaska", "USA-9"),
    ("US/Pacific", "USA-8"),
    ("US/Mountain", "USA-7"),
    ("US/Central", "USA-6"),
    ("US/Eastern", "USA-5"),
    ("Canada/Atlantic", "CAN-4"),
    ("Canada/Newfoundland", "CAN-3.5"),
    ("Europe/London", "GBR-0"),
    ("Europe/Paris", "FRA+1"),
    ("Europe/Athens", "GRC+2"),
    ("Europe/Moscow", "RUS+3"),
    ("Asia/Tokyo", "JPN+9"),
    ("Australia/Sydney", "AUS+10"),
    ("Pacific/Auckland", "NZL+12"),
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
            r"\bsnom(?P<model>\w+)-SIP (?P<version>[\d.]+)(?:.* (?P<mac>[\dA-F]{12})\))?",
        )
        .unwrap(),
    );
    let filename = FilenameExtractor::new(VENDOR)
        .with_pattern(FingerprintPattern::new(r"^/?(?P<mac>[\dA-F]{12})\.xml$").unwrap());

    Arc::new(ExtractorSet::new().with_http(ua).with_http(filename))
});

/// Locale table: `(web language, phone language, tone scheme)`.
fn locales() -> LocaleTable {
    LocaleTable::new([
        ("de_DE", VendorLocale::triple("Deutsch", "Deutsch", "GER")),
        ("en_US", VendorLocale::triple("English", "English(US)", "USA")),
        ("es_ES", VendorLocale::triple("Espanol", "Espanol", "ESP")),
        ("fr_FR", VendorLocale::triple("Francais", "Francais", "FRA")),
        ("fr_CA", VendorLocale::triple("Francais", "Francais", "USA")),
        ("it_IT", VendorLocale::triple("Italiano", "Italiano", "ITA")),
        ("nl_NL", VendorLocale::triple("Dutch", "Nederlands", "NLD")),
    ])
}

/// Mapping policy shared by every firmware release.
pub fn mapping() -> FieldMappingPolicy {
    FieldMappingPolicy::new()
        .with_required_transport(RequiredTransport::Http)
        .with_sip_lines_required()
        .with_step(MappingStep::Locale(locales()))
        .with_step(MappingStep::Timezone(TimezonePolicy::Table(Arc::clone(&TIMEZONES))))
        .with_step(MappingStep::SipLines {
            default_proxy_port: DEFAULT_PROXY_PORT,
        })
        .with_step(MappingStep::DtmfMode(DtmfTable::Single(TranslationTable::new([
            ("RTP-in-band", "off"),
            ("RTP-out-of-band", "off"),
            ("SIP-INFO", "sip"),
        ]))))
        .with_step(MappingStep::SipTransport(TranslationTable::new([
            ("udp", "udp"),
            ("tcp", "tcp"),
            ("tls", "tls"),
        ])))
}

/// Create a plugin for one firmware release.
pub(crate) fn release(name: &str, models: &[&str], version: &str) -> PluginDefinition {
    PluginDefinition::new(name, VENDOR, DeviceFilename::new("", MacCase::Upper, ".xml"))
        .with_associator(
            AssociatorPolicy::new(VENDOR)
                .with_models(models.iter().copied())
                .with_version(version),
        )
        .with_extractors(Arc::clone(&EXTRACTORS))
        .with_mapping(mapping())
        .with_encoding("UTF-8")
}
