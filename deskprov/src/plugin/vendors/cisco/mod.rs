//! Cisco desk phone support.
//!
//! The SIP and SCCP families share identification, the filename scheme and
//! the locale/timezone tables; they differ in supported models and in what
//! the mapper synthesizes.
//!
//! # Vendor Class Examples
//!
//! ```text
//! Cisco Systems, Inc.                          # 6901, no model
//! Cisco Systems, Inc. IP Phone 7912            # legacy number, 7912G
//! Cisco Systems, Inc. IP Phone CP-7940G\x00    # 7940G
//! Cisco Systems, Inc. IP Phone CP-8961\x00     # 8961
//! Cisco Systems Inc. Wireless Phone 7921       # 7921G
//! ```

pub mod sccp;
pub mod sip;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::assoc::AssociatorPolicy;
use crate::ident::{
    ExtractorSet, FilenameExtractor, FingerprintPattern, LegacyModelRule, VendorClassExtractor,
};
use crate::plugin::{DeviceFilename, MacCase};
use crate::tz::{
    BuiltinTimezones, LocaleTable, TimezoneInfoProvider, TimezoneTable, VendorLocale,
};

/// Vendor name reported in fingerprints.
pub const VENDOR: &str = "Cisco";

/// Label used when the timezone is absent or cannot be matched.
pub const DEFAULT_TIMEZONE: &str = "Eastern Standard/Daylight Time";

// Some labels carry a trailing space; the firmware expects them verbatim.
// Asia/Riyadh and Europe/Moscow share +03:00 without DST, Moscow is listed
// last so it owns the slot.
const ZONES: &[(&str, &str)] = &[
    ("Etc/GMT+12", "Dateline Standard Time"),
    ("Pacific/Samoa", "Samoa Standard Time "),
    ("US/Hawaii", "Hawaiian Standard Time "),
    ("US/Alaska", "Alaskan Standard/Daylight Time"),
    ("US/Pacific", "Pacific Standard/Daylight Time"),
    ("US/Mountain", "Mountain Standard/Daylight Time"),
    ("Etc/GMT+7", "US Mountain Standard Time"),
    ("US/Central", "Central Standard/Daylight Time"),
    ("America/Mexico_City", "Mexico Standard/Daylight Time"),
    ("US/Eastern", "Eastern Standard/Daylight Time"),
    ("Etc/GMT+5", "US Eastern Standard Time"),
    ("Canada/Atlantic", "Atlantic Standard/Daylight Time"),
    ("Etc/GMT+4", "SA Western Standard Time"),
    ("Canada/Newfoundland", "Newfoundland Standard/Daylight Time"),
    ("America/Sao_Paulo", "South America Standard/Daylight Time"),
    ("Etc/GMT+3", "SA Eastern Standard Time"),
    ("Etc/GMT+2", "Mid-Atlantic Standard/Daylight Time"),
    ("Atlantic/Azores", "Azores Standard/Daylight Time"),
    ("Europe/London", "GMT Standard/Daylight Time"),
    ("Etc/GMT", "Greenwich Standard Time"),
    ("Egypt", "Egypt Standard/Daylight Time"),
    ("Europe/Athens", "E. Europe Standard/Daylight Time"),
    ("Europe/Paris", "Central Europe Standard/Daylight Time"),
    ("Africa/Johannesburg", "South Africa Standard Time "),
    ("Asia/Jerusalem", "Jerusalem Standard/Daylight Time"),
    ("Asia/Riyadh", "Saudi Arabia Standard Time"),
    ("Europe/Moscow", "Russian Standard/Daylight Time"),
    ("Iran", "Iran Standard/Daylight Time"),
    ("Etc/GMT-4", "Arabian Standard Time"),
    ("Asia/Kabul", "Afghanistan Standard Time "),
    ("Etc/GMT-5", "West Asia Standard Time"),
    ("Asia/Calcutta", "India Standard Time"),
    ("Etc/GMT-6", "Central Asia Standard Time "),
    ("Etc/GMT-7", "SE Asia Standard Time"),
    ("Asia/Taipei", "Taipei Standard Time"),
    ("Asia/Tokyo", "Tokyo Standard Time"),
    ("Australia/ACT", "Cen. Australia Standard/Daylight Time"),
    ("Australia/Brisbane", "AUS Central Standard Time"),
    ("Etc/GMT-10", "West Pacific Standard Time"),
    ("Australia/Tasmania", "Tasmania Standard/Daylight Time"),
    ("Etc/GMT-11", "Central Pacific Standard Time"),
    ("Etc/GMT-12", "Fiji Standard Time"),
];

static EXTRACTORS: Lazy<Arc<ExtractorSet>> = Lazy::new(|| Arc::new(build_extractors()));

static TIMEZONES: Lazy<Arc<TimezoneTable>> =
    Lazy::new(|| Arc::new(timezone_table(Arc::new(BuiltinTimezones))));

/// Extractors shared by every Cisco plugin.
pub fn extractors() -> Arc<ExtractorSet> {
    Arc::clone(&EXTRACTORS)
}

/// Timezone table resolved through the built-in zone data.
pub fn timezones() -> Arc<TimezoneTable> {
    Arc::clone(&TIMEZONES)
}

/// Build the Cisco timezone table against another zone provider.
pub fn timezone_table(provider: Arc<dyn TimezoneInfoProvider>) -> TimezoneTable {
    TimezoneTable::build(provider, ZONES, DEFAULT_TIMEZONE)
}

/// Locale table: `(user locale, language code, network locale)`.
pub fn locales() -> LocaleTable {
    LocaleTable::new([
        ("de_DE", VendorLocale::triple("german_germany", "de", "germany")),
        ("en_US", VendorLocale::triple("english_united_states", "en", "united_states")),
        ("es_ES", VendorLocale::triple("spanish_spain", "es", "spain")),
        ("fr_FR", VendorLocale::triple("french_france", "fr", "france")),
        ("fr_CA", VendorLocale::triple("french_france", "fr", "canada")),
    ])
}

/// `SEP` + upper-case MAC + `.cnf.xml`.
pub fn filename() -> DeviceFilename {
    DeviceFilename::new("SEP", MacCase::Upper, ".cnf.xml")
}

/// Associator shared by the families; SPA and ATA devices belong to other
/// plugins.
pub fn associator<I, S>(models: I) -> AssociatorPolicy
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AssociatorPolicy::new(VENDOR)
        .with_models(models)
        .with_denied_prefix("SPA")
        .with_denied_prefix("ATA")
}

fn build_extractors() -> ExtractorSet {
    let dhcp = VendorClassExtractor::new(VENDOR, "Cisco Systems")
        .with_model_pattern(r"\bPhone (?:79(?P<legacy>\d\d)|CP-79(?P<legacy_alt>\d\d)G|CP-(?P<model>\d{4}))")
        .unwrap()
        .with_legacy_rule(LegacyModelRule::new("79", "G").with_exception("20", ""));

    ExtractorSet::new()
        .with_dhcp(dhcp)
        .with_http(filename_extractor("/"))
        .with_tftp(filename_extractor(""))
}

/// Filename grammar; HTTP paths carry a leading `/`, TFTP filenames don't.
fn filename_extractor(root: &str) -> FilenameExtractor {
    let pattern = |p: &str| FingerprintPattern::new(&format!("^{}{}", root, p)).unwrap();

    FilenameExtractor::new(VENDOR)
        .with_pattern(pattern(r"Communicator[/\\]").with_model("CIPC"))
        .with_pattern(pattern(r"SEP(?P<mac>[\dA-F]{12})\.cnf\.xml$"))
        .with_pattern(pattern(r"CTLSEP(?P<mac>[\dA-F]{12})\.tlv$"))
        .with_pattern(pattern(r"ITLSEP(?P<mac>[\dA-F]{12})\.tlv$"))
        .with_pattern(pattern(r"ITLFile\.tlv$"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assoc::{Associator, SupportScore};
    use crate::ident::{DeviceInfoExtractor, DhcpRequest, HttpRequest, TftpRequest};

    fn dhcp(vdi: &'static [u8]) -> Option<crate::ident::DeviceFingerprint> {
        extractors().extract(&DhcpRequest::with_vendor_class(vdi).into())
    }

    #[test]
    fn test_dhcp_vendor_class() {
        let fp = dhcp(b"Cisco Systems, Inc. IP Phone CP-7960G\x00").unwrap();
        assert_eq!(fp.vendor(), "Cisco");
        assert_eq!(fp.model(), Some("7960G"));
        assert_eq!(fp.mac(), None);

        assert_eq!(dhcp(b"Cisco Systems, Inc. IP Phone 7912").unwrap().model(), Some("7912G"));
        assert_eq!(dhcp(b"Cisco Systems Inc. Wireless Phone 7920").unwrap().model(), Some("7920"));
        assert_eq!(dhcp(b"Cisco Systems, Inc. IP Phone CP-8961\x00").unwrap().model(), Some("8961"));

        let fp = dhcp(b"Cisco Systems, Inc.").unwrap();
        assert_eq!(fp.vendor(), "Cisco");
        assert_eq!(fp.model(), None);

        assert!(dhcp(b"Grandstream GXP2160").is_none());
    }

    #[test]
    fn test_http_path() {
        let fp = extractors()
            .extract(&HttpRequest::new("/SEP001122AABBCC.cnf.xml").into())
            .unwrap();
        assert_eq!(fp.vendor(), "Cisco");
        assert_eq!(fp.mac().unwrap().to_string(), "001122aabbcc");

        let fp = extractors()
            .extract(&HttpRequest::new("/Communicator/dialplan.xml").into())
            .unwrap();
        assert_eq!(fp.model(), Some("CIPC"));

        let fp = extractors().extract(&HttpRequest::new("/ITLFile.tlv").into()).unwrap();
        assert_eq!(fp.mac(), None);

        assert!(extractors().extract(&HttpRequest::new("/SEPdefault.cnf.xml").into()).is_none());
    }

    #[test]
    fn test_tftp_filename() {
        let fp = extractors()
            .extract(&TftpRequest::new("CTLSEP001122AABBCC.tlv").into())
            .unwrap();
        assert_eq!(fp.vendor(), "Cisco");
        assert!(fp.mac().is_some());

        // HTTP grammar needs the leading slash, TFTP must not have it.
        assert!(extractors().extract(&TftpRequest::new("/SEP001122AABBCC.cnf.xml").into()).is_none());
    }

    #[test]
    fn test_timezones() {
        let table = timezones();
        assert_eq!(table.resolve(Some("Europe/Moscow")), "Russian Standard/Daylight Time");
        assert_eq!(table.resolve(Some("Europe/Paris")), "Central Europe Standard/Daylight Time");
        assert_eq!(table.resolve(Some("Pacific/Samoa")), "Samoa Standard Time ");
        assert_eq!(table.resolve(Some("Mars/Olympus_Mons")), DEFAULT_TIMEZONE);
        assert_eq!(table.resolve(None), DEFAULT_TIMEZONE);
    }

    #[test]
    fn test_associator_denies_sibling_products() {
        let assoc = associator(["7940", "7960G"]);
        assert_eq!(assoc.associate("Cisco", Some("SPA504G"), None), SupportScore::NO_SUPPORT);
        assert_eq!(assoc.associate("Cisco", Some("ATA186"), None), SupportScore::NO_SUPPORT);
        assert_eq!(assoc.associate("Cisco", Some("7940"), None), SupportScore::COMPLETE);
    }
}
