//! Neutral locale tag to vendor locale tables.

use indexmap::IndexMap;
use serde_json::{Value, json};

/// A vendor's representation of a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorLocale {
    /// A bare language code.
    Code(String),
    /// User locale name, language code and network locale.
    Triple {
        name: String,
        lang: String,
        network: String,
    },
}

impl VendorLocale {
    /// Create a triple locale.
    pub fn triple(name: &str, lang: &str, network: &str) -> Self {
        VendorLocale::Triple {
            name: name.to_string(),
            lang: lang.to_string(),
            network: network.to_string(),
        }
    }

    /// Value handed to templates: a string, or a `[name, lang, network]` list.
    pub fn to_value(&self) -> Value {
        match self {
            VendorLocale::Code(code) => Value::String(code.clone()),
            VendorLocale::Triple {
                name,
                lang,
                network,
            } => json!([name, lang, network]),
        }
    }
}

/// Flat table from neutral locale tag (e.g. `fr_CA`) to vendor locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    entries: IndexMap<String, VendorLocale>,
}

impl LocaleTable {
    /// Create a table.
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, VendorLocale)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Create a table of bare language codes.
    pub fn codes(entries: &[(&str, &str)]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|(tag, code)| (*tag, VendorLocale::Code(code.to_string()))),
        )
    }

    /// Look up a tag. An absent or unknown tag gives `None`; no default
    /// locale is ever injected.
    pub fn get(&self, tag: Option<&str>) -> Option<&VendorLocale> {
        self.entries.get(tag?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let table = LocaleTable::new([
            ("fr_CA", VendorLocale::triple("french_france", "fr", "canada")),
            ("de_DE", VendorLocale::Code("de".to_string())),
        ]);

        assert_eq!(
            table.get(Some("fr_CA")).unwrap().to_value(),
            json!(["french_france", "fr", "canada"])
        );
        assert_eq!(table.get(Some("de_DE")).unwrap().to_value(), json!("de"));
        assert!(table.get(Some("ja_JP")).is_none());
        assert!(table.get(None).is_none());
    }

    #[test]
    fn test_codes() {
        let table = LocaleTable::codes(&[("it_IT", "it")]);
        assert_eq!(
            table.get(Some("it_IT")),
            Some(&VendorLocale::Code("it".to_string()))
        );
    }
}
