//! Phonebook URL step.

use log::debug;

use super::MappingState;

/// Lowest record version the host phonebook service understands.
pub const PHONEBOOK_CONFIG_VERSION: u32 = 1;

/// Phonebook URL served by hosts without a phonebook service.
pub fn legacy_phonebook_url(host: &str, entry_point: &str) -> String {
    format!(
        "http://{}/service/ipbx/web_services.php/phonebook/{}/",
        host, entry_point
    )
}

/// Set `XX_xivo_phonebook_url`.
///
/// The host service is used when present and the record is recent enough;
/// otherwise the URL is built from `phonebook_ip`.
pub(super) fn apply_phonebook_url(state: &mut MappingState<'_>, vendor: &str, entry_point: &str) {
    let host = state.host;
    let url = match host.phonebook() {
        Some(provider)
            if state.record.config_version.unwrap_or(0) >= PHONEBOOK_CONFIG_VERSION =>
        {
            provider.phonebook_url(&state.record, vendor, entry_point)
        }
        _ => state
            .record
            .phonebook_ip
            .as_deref()
            .filter(|ip| !ip.is_empty())
            .map(|ip| legacy_phonebook_url(ip, entry_point)),
    };

    match url {
        Some(url) => state.set("XX_xivo_phonebook_url", url),
        None => debug!("No phonebook URL for {}", vendor),
    }
}
