//! SIP line and call manager steps.

use serde_json::{Value, json};

use super::{FieldSequence, MappingState};
use crate::config::SipLine;

/// Password hosts assign to lines of not yet provisioned devices.
pub const AUTOPROV_PASSWORD: &str = "autoprov";

/// Fields promoted from the primary line, with their top-level key.
fn promoted_fields(line: &SipLine) -> [(&'static str, Option<Value>); 10] {
    fn ip(v: &Option<String>) -> Option<Value> {
        v.as_ref().map(|v| json!(v))
    }
    fn port(v: Option<u16>) -> Option<Value> {
        v.map(|v| json!(v))
    }

    [
        ("sip_proxy_ip", ip(&line.proxy_ip)),
        ("sip_proxy_port", port(line.proxy_port)),
        ("sip_backup_proxy_ip", ip(&line.backup_proxy_ip)),
        ("sip_backup_proxy_port", port(line.backup_proxy_port)),
        ("sip_outbound_proxy_ip", ip(&line.outbound_proxy_ip)),
        ("sip_outbound_proxy_port", port(line.outbound_proxy_port)),
        ("sip_registrar_ip", ip(&line.registrar_ip)),
        ("sip_registrar_port", port(line.registrar_port)),
        ("sip_backup_registrar_ip", ip(&line.backup_registrar_ip)),
        ("sip_backup_registrar_port", port(line.backup_registrar_port)),
    ]
}

/// Fill line defaults and promote the primary line.
///
/// The line with the lowest index is the primary line. Its address fields
/// are copied to top-level `sip_*` keys when present.
pub(super) fn promote_sip_lines(state: &mut MappingState<'_>, default_proxy_port: u16) {
    let proxy_port = state.record.sip_proxy_port.unwrap_or(default_proxy_port);
    let voicemail = state
        .record
        .exten_voicemail
        .clone()
        .filter(|v| !v.is_empty());

    for line in state.record.sip_lines.values_mut() {
        line.proxy_port.get_or_insert(proxy_port);
        if let Some(voicemail) = &voicemail {
            line.voicemail.get_or_insert_with(|| voicemail.clone());
        }
    }

    let Some(fields) = state.record.sip_lines.values().next().map(promoted_fields) else {
        return;
    };
    for (key, value) in fields {
        if let Some(value) = value {
            state.set(key, value);
        }
    }
}

/// Replace the provisioning placeholder password with an empty one.
pub(super) fn clear_autoprov_password(state: &mut MappingState<'_>) {
    for line in state.record.sip_lines.values_mut() {
        if line.password.as_deref() == Some(AUTOPROV_PASSWORD) {
            line.password = Some(String::new());
        }
    }
}

/// Number SCCP call managers from zero, as the phones expect.
pub(super) fn number_call_managers(state: &mut MappingState<'_>) {
    if state.record.sccp_call_managers.is_empty() {
        return;
    }

    let mut managers = FieldSequence::new();
    for (priority, manager) in &state.record.sccp_call_managers {
        let mut entry = serde_json::to_value(manager).unwrap_or_else(|_| json!({}));
        if let Value::Object(map) = &mut entry {
            map.insert(
                "XX_priority".to_string(),
                json!((i64::from(*priority) - 1).to_string()),
            );
        }
        managers.push(priority.to_string(), entry);
    }
    state.set_sequence("XX_call_managers", managers);
}
