//! Function key schemes.
//!
//! Vendors lay out programmable keys in incompatible ways, so each scheme is
//! its own strategy. Keys of a type the vendor does not know are dropped
//! with a log line.

use indexmap::IndexMap;
use log::{info, warn};
use serde_json::{Value, json};

use super::{FieldSequence, MappingState};
use crate::config::{FuncKey, FuncKeyType};

/// Function key type to vendor value.
#[derive(Debug, Clone, Default)]
pub struct FuncKeyTypeTable {
    entries: IndexMap<FuncKeyType, Value>,
}

impl FuncKeyTypeTable {
    /// Create a table.
    pub fn new<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (FuncKeyType, V)>,
        V: Into<Value>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    /// Vendor value of a key type, if the vendor knows it.
    pub fn get(&self, key_type: &FuncKeyType) -> Option<&Value> {
        self.entries.get(key_type)
    }

    fn lookup(&self, key_type: &FuncKeyType) -> Option<&Value> {
        let value = self.get(key_type);
        if value.is_none() {
            warn!("Unsupported funckey type: {}", key_type);
        }
        value
    }
}

/// Key counts of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCapacity {
    /// Virtual keys on the main display.
    pub vpk: u32,
    /// Physical programmable keys.
    pub mpk: u32,
}

impl KeyCapacity {
    /// Create a capacity from display and physical key counts.
    pub const fn new(vpk: u32, mpk: u32) -> Self {
        Self { vpk, mpk }
    }
}

/// Field code layout of [`FuncKeyScheme::FixedCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedCodeLayout {
    /// Key `n` uses `P32{n+2}` for its type and `P3{3n-2}`, `P3{3n-1}`,
    /// `P3{3n}` (two digits minimum) for line, label and value. Written to
    /// `XX_fkeys`.
    ThreeField,
    /// Key `n` uses five consecutive codes from `P{start + 5(n-1)}`: type,
    /// line, label, value. Written to `XX_mpk`.
    FiveField { start: u32 },
}

impl FixedCodeLayout {
    fn output_key(self) -> &'static str {
        match self {
            FixedCodeLayout::ThreeField => "XX_fkeys",
            FixedCodeLayout::FiveField { .. } => "XX_mpk",
        }
    }

    /// Codes of key `n` (1-based): type, line, label, value.
    ///
    /// `None` for key 0 and for keys whose codes do not fit in a `u32`.
    pub fn codes(self, n: u32) -> Option<[String; 4]> {
        if n == 0 {
            return None;
        }
        match self {
            FixedCodeLayout::ThreeField => {
                let type_code = n.checked_add(2)?;
                let value_code = n.checked_mul(3)?;
                Some([
                    format!("P32{}", type_code),
                    format!("P3{:02}", value_code - 2),
                    format!("P3{:02}", value_code - 1),
                    format!("P3{:02}", value_code),
                ])
            }
            FixedCodeLayout::FiveField { start } => {
                let base = (n - 1).checked_mul(5)?.checked_add(start)?;
                let value_code = base.checked_add(3)?;
                Some([
                    format!("P{}", base),
                    format!("P{}", base + 1),
                    format!("P{}", base + 2),
                    format!("P{}", value_code),
                ])
            }
        }
    }
}

/// How function keys become vendor fields.
#[derive(Debug, Clone)]
pub enum FuncKeyScheme {
    /// Keys are numbered after the highest SIP line index and written to
    /// `XX_fkeys` as `(index, key + feature_id)`.
    IndexShifted { types: FuncKeyTypeTable },

    /// Each key maps to a fixed arithmetic run of field codes.
    FixedCode {
        layout: FixedCodeLayout,
        types: FuncKeyTypeTable,
    },

    /// Keys are laid out over the model's display keys, then its physical
    /// keys, and written to `XX_v2_fkeys`.
    CapacityAware {
        capacities: IndexMap<String, KeyCapacity>,
        types: FuncKeyTypeTable,
    },
}

pub(super) fn apply_funckeys(state: &mut MappingState<'_>, scheme: &FuncKeyScheme) {
    match scheme {
        FuncKeyScheme::IndexShifted { types } => index_shifted(state, types),
        FuncKeyScheme::FixedCode { layout, types } => fixed_code(state, *layout, types),
        FuncKeyScheme::CapacityAware { capacities, types } => {
            capacity_aware(state, capacities, types)
        }
    }
}

fn index_shifted(state: &mut MappingState<'_>, types: &FuncKeyTypeTable) {
    if state.record.funckeys.is_empty() {
        return;
    }

    let start = state.record.sip_lines.keys().next_back().copied().unwrap_or(0);
    let mut keys = FieldSequence::new();
    for (n, key) in &state.record.funckeys {
        let Some(feature_id) = types.lookup(&key.key_type) else {
            continue;
        };
        let Some(index) = start.checked_add(*n) else {
            warn!("Invalid funckey index: {}", n);
            continue;
        };
        let mut entry = serde_json::to_value(key).unwrap_or_else(|_| json!({}));
        if let Value::Object(map) = &mut entry {
            map.insert("feature_id".to_string(), feature_id.clone());
        }
        keys.push(index.to_string(), entry);
    }
    state.set_sequence("XX_fkeys", keys);
}

fn fixed_code(state: &mut MappingState<'_>, layout: FixedCodeLayout, types: &FuncKeyTypeTable) {
    if state.record.funckeys.is_empty() {
        return;
    }

    let mut fields = FieldSequence::new();
    for (n, key) in &state.record.funckeys {
        let Some(type_value) = types.lookup(&key.key_type) else {
            continue;
        };
        let Some([type_code, line_code, label_code, value_code]) = layout.codes(*n) else {
            warn!("Invalid funckey index: {}", n);
            continue;
        };
        fields.push(type_code, type_value.clone());
        fields.push(line_code, i64::from(key.line) - 1);
        if let Some(label) = &key.label {
            fields.push(label_code, label.as_str());
        }
        if let Some(value) = &key.value {
            fields.push(value_code, value.as_str());
        }
    }
    state.set_sequence(layout.output_key(), fields);
}

fn v2_entry(section: &str, type_value: &Value, key: Option<&FuncKey>) -> Value {
    json!({
        "section": section,
        "type": type_value,
        "label": key.and_then(|k| k.label.clone()).unwrap_or_default(),
        "value": key.and_then(|k| k.value.clone()).unwrap_or_default(),
    })
}

fn capacity_aware(
    state: &mut MappingState<'_>,
    capacities: &IndexMap<String, KeyCapacity>,
    types: &FuncKeyTypeTable,
) {
    let device = state.device;
    let model = device.model().or(state.record.model.as_deref());
    let Some(capacity) = model.and_then(|m| capacities.get(m)).copied() else {
        info!("Unknown model: {:?}", model);
        return;
    };

    let disabled = FuncKeyType::Disabled;
    let mut keys = FieldSequence::new();

    for n in 1..=capacity.vpk {
        let key = state.record.funckeys.get(&n);
        let key_type = key.map_or(&disabled, |k| &k.key_type);
        let Some(type_value) = types.lookup(key_type) else {
            continue;
        };
        if state.record.sip_lines.contains_key(&n) {
            info!("Function key {} would conflict with an existing line", n);
            continue;
        }
        keys.push(n.to_string(), v2_entry("vpk", type_value, key));
    }

    for n in 1..=capacity.mpk {
        let key = capacity
            .vpk
            .checked_add(n)
            .and_then(|index| state.record.funckeys.get(&index));
        let key_type = key.map_or(&disabled, |k| &k.key_type);
        let Some(type_value) = types.lookup(key_type) else {
            continue;
        };
        keys.push(n.to_string(), v2_entry("mpk", type_value, key));
    }

    state.set_sequence("XX_v2_fkeys", keys);
}
