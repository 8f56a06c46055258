//! Grandstream plugin definition.
//!
//! Grandstream devices only identify themselves over HTTP, through a
//! `User-Agent` header carrying model, firmware and MAC address.
//!
//! # User-Agent Examples
//!
//! ```text
//! Grandstream Model HW GXP1628 SW 1.0.4.138 DevId c074ad2bd859
//! Grandstream Model HW GXP2200 V2.2A SW 1.0.1.33 DevId 000b82462d97
//! Grandstream Model HW GXV3350  V1.3A SW 1.0.1.8 DevId c074ad150b88
//! Grandstream GXP2000 (gxp2000e.bin:1.2.5.3/boot55e.bin:1.1.6.9) DevId 000b822726c8
//! ```
//!
//! Function keys are written three times, once per firmware generation:
//! `XX_fkeys` (three-field codes), `XX_mpk` (five-field codes from
//! `P23000`) and `XX_v2_fkeys` (display and physical keys of the model).

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::assoc::{AssociatorPolicy, SupportScore};
use crate::config::FuncKeyType;
use crate::ident::{ExtractorSet, FingerprintPattern, UserAgentExtractor};
use crate::mapper::{
    DtmfTable, FieldMappingPolicy, FixedCodeLayout, FuncKeyScheme, FuncKeyTypeTable, KeyCapacity,
    MappingStep, RequiredTransport, TranslationTable,
};
use crate::plugin::{DeviceFilename, MacCase, PluginDefinition};
use crate::tz::{LocaleTable, NamedTimezones, TimezonePolicy};

/// Vendor name reported in fingerprints.
pub const VENDOR: &str = "Grandstream";

/// Firmware version prefix of the supported releases.
pub const VERSION: &str = "1.0.";

/// Zone used when the configured one has no POSIX rule here.
pub const DEFAULT_ZONE: &str = "Europe/Paris";

/// Display (vpk) and physical (mpk) programmable keys per model.
pub const MODEL_FKEYS: &[(&str, KeyCapacity)] = &[
    ("GRP2612", KeyCapacity::new(16, 0)),
    ("GRP2613", KeyCapacity::new(24, 0)),
    ("GRP2614", KeyCapacity::new(16, 24)),
    ("GRP2615", KeyCapacity::new(40, 0)),
    ("GRP2616", KeyCapacity::new(16, 24)),
    ("GXP2130", KeyCapacity::new(12, 8)),
    ("GXP2135", KeyCapacity::new(32, 0)),
    ("GXP2140", KeyCapacity::new(16, 0)),
    ("GXP2160", KeyCapacity::new(24, 24)),
    ("GXP2170", KeyCapacity::new(48, 0)),
];

/// Models without programmable key layouts.
const BASIC_MODELS: &[&str] = &["GXP1610", "GXP1615", "GXP1620", "GXP1625", "GXP1628", "GXP1630"];

const LOCALES: &[(&str, &str)] = &[
    ("de_DE", "de"),
    ("es_ES", "es"),
    ("fr_FR", "fr"),
    ("fr_CA", "fr"),
    ("it_IT", "it"),
    ("nl_NL", "nl"),
    ("en_US", "en"),
];

static EXTRACTORS: Lazy<Arc<ExtractorSet>> = Lazy::new(|| {
    let ua = UserAgentExtractor::new(VENDOR)
        .with_pattern(
            FingerprintPattern::new(
                r"^Grandstream Model HW (?P<model>\w+)(?:\s+V[^ ]+)? SW (?P<version>[^ ]+) DevId (?P<mac>[^ ]+)",
            )
            .unwrap()
            .with_required_mac(),
        )
        .with_pattern(
            FingerprintPattern::new(
                r"^Grandstream (?P<model>GXP2000) .*:(?P<version>[^ ]+)\) DevId (?P<mac>[^ ]+)",
            )
            .unwrap()
            .with_required_mac(),
        );
    Arc::new(ExtractorSet::new().with_http(ua))
});

fn funckey_types() -> FuncKeyTypeTable {
    FuncKeyTypeTable::new([
        (FuncKeyType::Speeddial, "SpeedDial"),
        (FuncKeyType::Blf, "BLF"),
        (FuncKeyType::Park, "CallPark"),
        (FuncKeyType::Default, "Line"),
        (FuncKeyType::Disabled, "None"),
    ])
}

/// Create the Grandstream plugin definition.
pub fn plugin() -> PluginDefinition {
    let models = MODEL_FKEYS
        .iter()
        .map(|(model, _)| *model)
        .chain(BASIC_MODELS.iter().copied());

    let associator = AssociatorPolicy::new(VENDOR)
        .with_models(models)
        .with_version(VERSION)
        .with_unknown_model_score(SupportScore::UNKNOWN)
        .with_unlisted_model_score(SupportScore::UNKNOWN);

    let timezones = NamedTimezones::new(
        [(DEFAULT_ZONE, "CET-1CEST-2,M3.5.0/02:00:00,M10.5.0/03:00:00")],
        DEFAULT_ZONE,
    );

    let capacities: IndexMap<String, KeyCapacity> = MODEL_FKEYS
        .iter()
        .map(|(model, capacity)| (model.to_string(), *capacity))
        .collect();

    let mapping = FieldMappingPolicy::new()
        .with_required_transport(RequiredTransport::Http)
        .with_sip_lines_required()
        .with_step(MappingStep::ClearAutoprovPassword)
        .with_step(MappingStep::SipTransport(TranslationTable::new([
            ("udp", "UDP"),
            ("tcp", "TCP"),
            ("tls", "TlsOrTcp"),
        ])))
        .with_step(MappingStep::Timezone(TimezonePolicy::Named(timezones)))
        .with_step(MappingStep::Locale(LocaleTable::codes(LOCALES)))
        .with_step(MappingStep::DtmfMode(DtmfTable::split(&[
            // mode: (in audio, in RTP, in SIP)
            ("RTP-in-band", ["Yes", "Yes", "No"]),
            ("RTP-out-of-band", ["No", "Yes", "No"]),
            ("SIP-INFO", ["No", "No", "Yes"]),
        ])))
        .with_step(MappingStep::FuncKeys(FuncKeyScheme::FixedCode {
            layout: FixedCodeLayout::ThreeField,
            types: funckey_types(),
        }))
        .with_step(MappingStep::FuncKeys(FuncKeyScheme::FixedCode {
            layout: FixedCodeLayout::FiveField { start: 23000 },
            types: funckey_types(),
        }))
        .with_step(MappingStep::FuncKeys(FuncKeyScheme::CapacityAware {
            capacities,
            types: funckey_types(),
        }))
        .with_step(MappingStep::Dns);

    PluginDefinition::new("grandstream", VENDOR, DeviceFilename::new("cfg", MacCase::Lower, ".xml"))
        .with_associator(associator)
        .with_extractors(Arc::clone(&EXTRACTORS))
        .with_mapping(mapping)
        .with_output_subdir("Grandstream")
        .with_encoding("UTF-8")
        .with_remote_state_trigger()
}
