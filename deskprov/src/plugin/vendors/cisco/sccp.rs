//! Cisco SCCP plugin definition.

use super::{VENDOR, associator, extractors, filename, locales, timezones};
use crate::mapper::{FieldMappingPolicy, MappingStep, RequiredTransport};
use crate::plugin::PluginDefinition;
use crate::tz::TimezonePolicy;

/// Models running the SCCP firmware.
pub const MODELS: &[&str] = &["7905G", "7912G", "7920", "7937G", "7940", "7940G", "7960G"];

/// Create the Cisco SCCP plugin definition.
///
/// SCCP phones register against call managers rather than SIP lines and
/// cannot be resynced remotely.
pub fn plugin() -> PluginDefinition {
    let mapping = FieldMappingPolicy::new()
        .with_required_transport(RequiredTransport::Tftp)
        .with_step(MappingStep::Locale(locales()))
        .with_step(MappingStep::Timezone(TimezonePolicy::Table(timezones())))
        .with_step(MappingStep::CallManagers);

    PluginDefinition::new("cisco_sccp", VENDOR, filename())
        .with_associator(associator(MODELS.iter().copied()))
        .with_extractors(extractors())
        .with_mapping(mapping)
        .without_sync()
        .with_encoding("UTF-8")
}
