//! Cisco SIP plugin definition.

use super::{VENDOR, associator, extractors, filename, locales, timezones};
use crate::assoc::SupportScore;
use crate::config::FuncKeyType;
use crate::host::SyncAction;
use crate::mapper::{
    FieldMappingPolicy, FuncKeyScheme, FuncKeyTypeTable, MappingStep, RequiredTransport,
};
use crate::plugin::PluginDefinition;
use crate::tz::TimezonePolicy;

/// Models running the SIP firmware.
pub const MODELS: &[&str] = &[
    "7941G", "7942G", "7945G", "7961G", "7962G", "7965G", "7970G", "7975G", "8941", "8945",
    "8961", "9951", "9971",
];

/// Default SIP proxy port.
pub const DEFAULT_PROXY_PORT: u16 = 5060;

/// Create the Cisco SIP plugin definition.
///
/// A Cisco fingerprint without a model scores slightly above the SCCP
/// plugin, so SIP is preferred when nothing else tells them apart.
pub fn plugin() -> PluginDefinition {
    let fkey_types = FuncKeyTypeTable::new([(FuncKeyType::Blf, 21), (FuncKeyType::Speeddial, 2)]);

    let mapping = FieldMappingPolicy::new()
        .with_required_transport(RequiredTransport::Tftp)
        .with_sip_lines_required()
        .with_step(MappingStep::fixed("XX_addons", ""))
        .with_step(MappingStep::fixed("protocol", "SIP"))
        .with_step(MappingStep::Locale(locales()))
        .with_step(MappingStep::Timezone(TimezonePolicy::Table(timezones())))
        .with_step(MappingStep::phonebook_url("cisco", "menu"))
        .with_step(MappingStep::CallManagers)
        .with_step(MappingStep::SipLines {
            default_proxy_port: DEFAULT_PROXY_PORT,
        })
        .with_step(MappingStep::FuncKeys(FuncKeyScheme::IndexShifted { types: fkey_types }));

    // "restart" unregisters and downloads the configuration again.
    let sync = SyncAction::new("service-control")
        .with_extra_var("Content-type=text/plain")
        .with_extra_var("Content=action=restart")
        .with_extra_var("Content=RegisterCallId={}")
        .with_extra_var("Content=ConfigVersionStamp={0000000000000000}")
        .with_extra_var("Content=DialplanVersionStamp={0000000000000000}")
        .with_extra_var("Content=SoftkeyVersionStamp={0000000000000000}");

    PluginDefinition::new("cisco_sip", VENDOR, filename())
        .with_associator(
            associator(MODELS.iter().copied())
                .with_unknown_model_score(SupportScore::PROBABLE.with_bonus(10)),
        )
        .with_extractors(extractors())
        .with_mapping(mapping)
        .with_sync_action(sync)
        .with_encoding("UTF-8")
}
