//! Output of the field mapper.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ConfigRecord;
use crate::error::ConfigError;

/// Ordered `(vendor key, value)` pairs for line-oriented vendor formats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSequence(Vec<(String, Value)>);

impl FieldSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    /// Get the first value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate over the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldSequence {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A value of the field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Ordered vendor pairs.
    Sequence(FieldSequence),
    /// Any JSON value, neutral record data included.
    Scalar(Value),
}

impl FieldValue {
    /// Get the scalar value, if this is one.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            FieldValue::Sequence(_) => None,
        }
    }

    /// Get the sequence, if this is one.
    pub fn as_sequence(&self) -> Option<&FieldSequence> {
        match self {
            FieldValue::Sequence(s) => Some(s),
            FieldValue::Scalar(_) => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<FieldSequence> for FieldValue {
    fn from(seq: FieldSequence) -> Self {
        FieldValue::Sequence(seq)
    }
}

/// Data handed to the template renderer.
///
/// Neutral record keys come first, in record order, followed by the
/// synthesized keys in the order the mapping steps produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorFieldMapping {
    fields: IndexMap<String, FieldValue>,
}

impl VendorFieldMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping holding the neutral keys of a record, in record order.
    pub fn from_record(record: &ConfigRecord) -> Result<Self, ConfigError> {
        let mut mapping = Self::new();
        if let Value::Object(neutral) = serde_json::to_value(record)? {
            for (key, value) in neutral {
                mapping.insert(key, value);
            }
        }
        Ok(mapping)
    }

    /// Set a key. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Insert every key of `other`, in order.
    pub fn extend(&mut self, other: VendorFieldMapping) {
        for (key, value) in other.fields {
            self.fields.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get a scalar value.
    pub fn scalar(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    /// Get a string scalar.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.scalar(key).and_then(Value::as_str)
    }

    /// Get a sequence.
    pub fn sequence(&self, key: &str) -> Option<&FieldSequence> {
        self.get(key).and_then(FieldValue::as_sequence)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_position() {
        let mut mapping = VendorFieldMapping::new();
        mapping.insert("sip_proxy_port", json!(5060));
        mapping.insert("XX_locale", json!("fr"));
        mapping.insert("sip_proxy_port", json!(5061));

        assert_eq!(
            mapping.keys().collect::<Vec<_>>(),
            vec!["sip_proxy_port", "XX_locale"]
        );
        assert_eq!(mapping.scalar("sip_proxy_port"), Some(&json!(5061)));
    }

    #[test]
    fn test_serialize() {
        let mut mapping = VendorFieldMapping::new();
        mapping.insert("XX_timezone", json!("CET"));
        let seq: FieldSequence = [("P3201", json!("BLF")), ("P301", json!(0))]
            .into_iter()
            .collect();
        mapping.insert("XX_fkeys", seq);

        assert_eq!(
            mapping.to_value(),
            json!({"XX_timezone": "CET", "XX_fkeys": [["P3201", "BLF"], ["P301", 0]]})
        );
        assert_eq!(mapping.sequence("XX_fkeys").unwrap().len(), 2);
        assert!(mapping.sequence("XX_timezone").is_none());
    }
}
