//! Yealink desk phone support.
//!
//! Yealink phones fetch `<mac>.cfg` over HTTP or TFTP and announce model,
//! firmware and MAC address in their `User-Agent`:
//!
//! ```text
//! Yealink SIP-T46S 66.86.0.15 00:15:65:aa:bb:cc
//! Yealink SIP-T31P 124.86.0.20 001565aabbcc
//! ```
//!
//! Each firmware branch is its own plugin. They share identification,
//! tables and mapping, and differ in supported models and in the
//! `y0000000000NN.cfg` files naming the firmware image of each model.

pub mod v80;
pub mod v83;
pub mod v86;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::assoc::AssociatorPolicy;
use crate::config::FuncKeyType;
use crate::ident::{ExtractorSet, FilenameExtractor, FingerprintPattern, UserAgentExtractor};
use crate::mapper::{
    DtmfTable, FieldMappingPolicy, FuncKeyScheme, FuncKeyTypeTable, MappingStep,
    TranslationTable,
};
use crate::plugin::{CommonFile, DeviceFilename, MacCase};
use crate::tz::{
    BuiltinTimezones, LocaleTable, TimezonePolicy, TimezoneTable, VendorLocale,
};

/// Vendor name reported in fingerprints.
pub const VENDOR: &str = "Yealink";

/// Default SIP proxy port.
pub const DEFAULT_PROXY_PORT: u16 = 5060;

/// Label used when the timezone is absent or cannot be matched.
pub const DEFAULT_TIMEZONE: &str = "United States-Eastern Time";

/// Template of the per-model firmware files.
pub const MODEL_TEMPLATE: &str = "model.tpl";

/// Template of the DECT base firmware files.
pub const DECT_TEMPLATE: &str = "dect_model.tpl";

const ZONES: &[(&str, &str)] = &[
    ("US/Hawaii", "United States-Hawaii-Aleutian"),
    ("US/Alaska", "United States-Alaska Time"),
    ("US/Pacific", "United States-Pacific Time"),
    ("US/Mountain", "United States-Mountain Time"),
    ("America/Phoenix", "United States-MST no DST"),
    ("US/Central", "United States-Central Time"),
    ("US/Eastern", "United States-Eastern Time"),
    ("Canada/Atlantic", "Canada(Halifax,Saint John)"),
    ("Canada/Newfoundland", "Canada-New Foundland(St.Johns)"),
    ("America/Sao_Paulo", "Brazil(Sao Paulo)"),
    ("Etc/GMT", "GMT"),
    ("Europe/London", "United Kingdom(London)"),
    ("Europe/Paris", "France(Paris)"),
    ("Europe/Athens", "Greece(Athens)"),
    ("Europe/Moscow", "Russia(Moscow)"),
    ("Asia/Dubai", "United Arab Emirates(Abu Dhabi)"),
    ("Asia/Kolkata", "India(Calcutta)"),
    ("Asia/Shanghai", "China(Beijing)"),
    ("Asia/Tokyo", "Japan(Tokyo)"),
    ("Australia/Sydney", "Australia(Sydney,Melbourne,Canberra)"),
    ("Pacific/Auckland", "New Zealand(Wellington,Auckland)"),
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
            r"^Yealink SIP-(?P<model>[\w-]+) (?P<version>[\d.]+) (?P<mac>[\da-fA-F:]{12,17})$",
        )
        .unwrap(),
    );
    let filename = FilenameExtractor::new(VENDOR)
        .with_pattern(FingerprintPattern::new(r"^/?(?P<mac>[\da-f]{12})\.cfg$").unwrap());

    Arc::new(
        ExtractorSet::new()
            .with_http(ua)
            .with_http(filename.clone())
            .with_tftp(filename),
    )
});

/// Extractors shared by every firmware branch.
pub fn extractors() -> Arc<ExtractorSet> {
    Arc::clone(&EXTRACTORS)
}

/// Device files are `<mac>.cfg`, lowercase.
pub fn filename() -> DeviceFilename {
    DeviceFilename::new("", MacCase::Lower, ".cfg")
}

/// Associator over a branch's model/firmware table.
pub fn associator(model_versions: &[(&str, &str)]) -> AssociatorPolicy {
    AssociatorPolicy::new(VENDOR).with_model_versions(model_versions.iter().copied())
}

/// Locale table: `(language, tone country, web language)`.
fn locales() -> LocaleTable {
    LocaleTable::new([
        ("de_DE", VendorLocale::triple("German", "Germany", "German")),
        ("en_US", VendorLocale::triple("English", "United States", "English")),
        ("es_ES", VendorLocale::triple("Spanish", "Spain", "Spanish")),
        ("fr_FR", VendorLocale::triple("French", "France", "French")),
        ("fr_CA", VendorLocale::triple("French", "United States", "French")),
        ("it_IT", VendorLocale::triple("Italian", "Italy", "Italian")),
        ("nl_NL", VendorLocale::triple("Dutch", "Netherlands", "Dutch")),
    ])
}

/// Mapping policy shared by every firmware branch.
pub fn mapping() -> FieldMappingPolicy {
    let fkey_types = FuncKeyTypeTable::new([
        (FuncKeyType::Speeddial, 13),
        (FuncKeyType::Blf, 16),
        (FuncKeyType::Park, 10),
        (FuncKeyType::Default, 15),
    ]);

    FieldMappingPolicy::new()
        .with_sip_lines_required()
        .with_step(MappingStep::Locale(locales()))
        .with_step(MappingStep::Timezone(TimezonePolicy::Table(Arc::clone(&TIMEZONES))))
        .with_step(MappingStep::DtmfMode(DtmfTable::Single(TranslationTable::new([
            ("RTP-in-band", 0),
            ("RTP-out-of-band", 1),
            ("SIP-INFO", 2),
        ]))))
        .with_step(MappingStep::SipTransport(TranslationTable::new([
            ("udp", 0),
            ("tcp", 1),
            ("tls", 2),
        ])))
        .with_step(MappingStep::ClearAutoprovPassword)
        .with_step(MappingStep::SipLines {
            default_proxy_port: DEFAULT_PROXY_PORT,
        })
        .with_step(MappingStep::FuncKeys(FuncKeyScheme::IndexShifted { types: fkey_types }))
        .with_step(MappingStep::Dns)
}

/// Firmware files rendered with [`MODEL_TEMPLATE`], one per
/// `(filename, firmware image)` pair.
pub fn model_files<'a>(files: &'a [(&'a str, &'a str)]) -> impl Iterator<Item = CommonFile> + 'a {
    files
        .iter()
        .map(|(filename, image)| CommonFile::firmware(*filename, *image, MODEL_TEMPLATE))
}

/// DECT base files: base firmware plus the handset images it pushes.
pub fn dect_files<'a>(
    files: &'a [(&'a str, &'a str)],
    handsets: &'a [(&'a str, &'a str)],
) -> impl Iterator<Item = CommonFile> + 'a {
    files.iter().map(move |(filename, image)| {
        CommonFile::firmware(*filename, *image, DECT_TEMPLATE)
            .with_handsets(handsets.iter().copied())
    })
}
