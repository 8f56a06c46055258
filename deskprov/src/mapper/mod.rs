//! Configuration field mapping.
//!
//! A [`FieldMappingPolicy`] is an ordered list of [`MappingStep`]s. The
//! [`FieldMapper`] runs them over a working copy of the neutral record and
//! assembles the [`VendorFieldMapping`] handed to the template renderer:
//! the (possibly adjusted) neutral record first, then the synthesized keys.

mod funckeys;
mod lines;
mod mapping;
mod passthrough;
mod phonebook;

pub use funckeys::{FixedCodeLayout, FuncKeyScheme, FuncKeyTypeTable, KeyCapacity};
pub use lines::AUTOPROV_PASSWORD;
pub use mapping::{FieldSequence, FieldValue, VendorFieldMapping};
pub use passthrough::{DtmfTable, TranslationTable};
pub use phonebook::{PHONEBOOK_CONFIG_VERSION, legacy_phonebook_url};

use std::fmt;

use log::debug;
use serde_json::Value;

use crate::config::ConfigRecord;
use crate::error::{ConfigError, DeviceError, Result};
use crate::host::HostCapabilities;
use crate::ident::DeviceFingerprint;
use crate::tz::{LocaleTable, TimezonePolicy};

/// Transport a vendor must be provisioned over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredTransport {
    Tftp,
    Http,
}

impl RequiredTransport {
    pub fn as_str(self) -> &'static str {
        match self {
            RequiredTransport::Tftp => "TFTP",
            RequiredTransport::Http => "HTTP",
        }
    }

    fn is_configured(self, config: &ConfigRecord) -> bool {
        match self {
            RequiredTransport::Tftp => config.tftp_port.is_some(),
            RequiredTransport::Http => config.http_port.is_some(),
        }
    }
}

impl fmt::Display for RequiredTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mapping step.
#[derive(Debug, Clone)]
pub enum MappingStep {
    /// Set a constant key.
    Static(String, Value),
    /// `XX_locale` from `locale`.
    Locale(LocaleTable),
    /// `XX_timezone` from `timezone`.
    Timezone(TimezonePolicy),
    /// `XX_xivo_phonebook_url`.
    PhonebookUrl { vendor: String, entry_point: String },
    /// `XX_call_managers`, numbered from zero.
    CallManagers,
    /// Line defaults and primary line promotion.
    SipLines { default_proxy_port: u16 },
    /// Empty the `autoprov` placeholder password.
    ClearAutoprovPassword,
    /// `XX_sip_transport` from `sip_transport`.
    SipTransport(TranslationTable),
    /// DTMF keys from `sip_dtmf_mode`.
    DtmfMode(DtmfTable),
    /// `XX_dns_1` to `XX_dns_4` from `dns_ip`.
    Dns,
    /// Function keys.
    FuncKeys(FuncKeyScheme),
}

impl MappingStep {
    /// Create a constant step.
    pub fn fixed(key: impl Into<String>, value: impl Into<Value>) -> Self {
        MappingStep::Static(key.into(), value.into())
    }

    /// Create a phonebook step.
    pub fn phonebook_url(vendor: impl Into<String>, entry_point: impl Into<String>) -> Self {
        MappingStep::PhonebookUrl {
            vendor: vendor.into(),
            entry_point: entry_point.into(),
        }
    }

    fn apply(&self, state: &mut MappingState<'_>) {
        match self {
            MappingStep::Static(key, value) => state.set(key.as_str(), value.clone()),
            MappingStep::Locale(table) => passthrough::apply_locale(state, table),
            MappingStep::Timezone(policy) => passthrough::apply_timezone(state, policy),
            MappingStep::PhonebookUrl {
                vendor,
                entry_point,
            } => phonebook::apply_phonebook_url(state, vendor, entry_point),
            MappingStep::CallManagers => lines::number_call_managers(state),
            MappingStep::SipLines { default_proxy_port } => {
                lines::promote_sip_lines(state, *default_proxy_port)
            }
            MappingStep::ClearAutoprovPassword => lines::clear_autoprov_password(state),
            MappingStep::SipTransport(table) => passthrough::apply_sip_transport(state, table),
            MappingStep::DtmfMode(table) => passthrough::apply_dtmf_mode(state, table),
            MappingStep::Dns => passthrough::apply_dns(state),
            MappingStep::FuncKeys(scheme) => funckeys::apply_funckeys(state, scheme),
        }
    }
}

/// Vendor mapping policy: prerequisites plus ordered steps.
#[derive(Debug, Clone, Default)]
pub struct FieldMappingPolicy {
    /// Transport whose port must be configured.
    pub required_transport: Option<RequiredTransport>,

    /// Whether a record without SIP lines is rejected.
    pub requires_sip_lines: bool,

    /// Steps, run in order.
    pub steps: Vec<MappingStep>,
}

impl FieldMappingPolicy {
    /// Create an empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a transport.
    pub fn with_required_transport(mut self, transport: RequiredTransport) -> Self {
        self.required_transport = Some(transport);
        self
    }

    /// Reject records without SIP lines.
    pub fn with_sip_lines_required(mut self) -> Self {
        self.requires_sip_lines = true;
        self
    }

    /// Append a step.
    pub fn with_step(mut self, step: MappingStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Check the prerequisites of a mapping.
    pub fn validate(&self, config: &ConfigRecord, device: &DeviceFingerprint) -> Result<()> {
        if let Some(transport) = self.required_transport {
            if !transport.is_configured(config) {
                return Err(ConfigError::MissingTransport {
                    transport: transport.as_str(),
                }
                .into());
            }
        }
        if device.mac().is_none() {
            return Err(DeviceError::MissingMac.into());
        }
        if self.requires_sip_lines && config.sip_lines.is_empty() {
            return Err(ConfigError::NoSipLines.into());
        }
        Ok(())
    }
}

/// Working state shared by the steps of one mapping.
pub(crate) struct MappingState<'a> {
    pub(crate) record: ConfigRecord,
    pub(crate) device: &'a DeviceFingerprint,
    pub(crate) host: &'a HostCapabilities,
    synthesized: VendorFieldMapping,
}

impl<'a> MappingState<'a> {
    pub(crate) fn new(
        record: ConfigRecord,
        device: &'a DeviceFingerprint,
        host: &'a HostCapabilities,
    ) -> Self {
        Self {
            record,
            device,
            host,
            synthesized: VendorFieldMapping::new(),
        }
    }

    pub(crate) fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.synthesized.insert(key, FieldValue::Scalar(value.into()));
    }

    pub(crate) fn set_sequence(&mut self, key: impl Into<String>, seq: FieldSequence) {
        self.synthesized.insert(key, FieldValue::Sequence(seq));
    }

    pub(crate) fn into_parts(self) -> (ConfigRecord, VendorFieldMapping) {
        (self.record, self.synthesized)
    }
}

/// Runs a mapping policy.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper<'a> {
    policy: &'a FieldMappingPolicy,
    host: &'a HostCapabilities,
}

impl<'a> FieldMapper<'a> {
    /// Create a mapper for a policy and the host it runs on.
    pub fn new(policy: &'a FieldMappingPolicy, host: &'a HostCapabilities) -> Self {
        Self { policy, host }
    }

    /// Validate the prerequisites and build the field mapping.
    ///
    /// The input record is not modified.
    pub fn map(
        &self,
        config: &ConfigRecord,
        device: &DeviceFingerprint,
    ) -> Result<VendorFieldMapping> {
        self.policy.validate(config, device)?;

        let mut state = MappingState::new(config.clone(), device, self.host);
        for step in &self.policy.steps {
            step.apply(&mut state);
        }
        let (record, synthesized) = state.into_parts();

        let mut mapping = VendorFieldMapping::from_record(&record)?;
        mapping.extend(synthesized);

        debug!("Mapped {} fields", mapping.len());
        Ok(mapping)
    }
}

/// Run steps on a record without validation.
#[cfg(test)]
pub(crate) fn run_step<F>(
    record: ConfigRecord,
    device: &DeviceFingerprint,
    f: F,
) -> (ConfigRecord, VendorFieldMapping)
where
    F: FnOnce(&mut MappingState<'_>),
{
    let host = HostCapabilities::new();
    let mut state = MappingState::new(record, device, &host);
    f(&mut state);
    state.into_parts()
}
