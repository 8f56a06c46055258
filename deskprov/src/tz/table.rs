//! Offset/DST keyed timezone tables.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use log::{info, warn};

use super::{TimezoneInfo, TimezoneInfoProvider};

/// Offsets tried, in order, when no table entry has the exact UTC offset.
///
/// Some vendor tables encode DST-adjusted offsets. The order is historical
/// and kept as is; it is not "closest offset first".
pub const NEARBY_OFFSETS: [i32; 4] = [30, -30, 60, -60];

/// Vendor timezone labels keyed by `(utc offset, DST rule)`.
pub struct TimezoneTable {
    entries: HashMap<i32, IndexMap<Option<String>, String>>,
    fallback: String,
    provider: Arc<dyn TimezoneInfoProvider>,
}

impl TimezoneTable {
    /// Build a table from canonical `(zone name, vendor label)` pairs.
    ///
    /// Each zone is resolved through `provider`. When two zones share an
    /// offset and DST rule, the later one wins. Zones the provider does not
    /// know are skipped.
    pub fn build(
        provider: Arc<dyn TimezoneInfoProvider>,
        canonical: &[(&str, &str)],
        fallback: impl Into<String>,
    ) -> Self {
        let mut entries: HashMap<i32, IndexMap<Option<String>, String>> = HashMap::new();

        for (zone, label) in canonical {
            match provider.timezone_info(zone) {
                Ok(info) => {
                    entries
                        .entry(info.utc_offset_minutes)
                        .or_default()
                        .insert(info.dst_key(), label.to_string());
                }
                Err(e) => warn!("Skipping canonical timezone: {}", e),
            }
        }

        Self {
            entries,
            fallback: fallback.into(),
            provider,
        }
    }

    /// Get the label used when nothing matches.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolve a zone name to a vendor label.
    ///
    /// An absent or unknown zone gives the fallback label.
    pub fn resolve(&self, tz_name: Option<&str>) -> &str {
        let Some(name) = tz_name else {
            return &self.fallback;
        };
        match self.provider.timezone_info(name) {
            Ok(info) => self.resolve_info(&info),
            Err(e) => {
                info!("{}", e);
                &self.fallback
            }
        }
    }

    /// Resolve an offset/DST pair to a vendor label.
    ///
    /// 1. exact offset, else the first of [`NEARBY_OFFSETS`] present, else the
    ///    fallback;
    /// 2. exact DST rule, else the entry without DST, else the first entry
    ///    registered for that offset.
    pub fn resolve_info(&self, info: &TimezoneInfo) -> &str {
        let offset = info.utc_offset_minutes;
        let dst_map = match self.entries.get(&offset) {
            Some(map) => map,
            None => {
                let nearby = NEARBY_OFFSETS
                    .iter()
                    .find_map(|delta| self.entries.get(&(offset + delta)));
                match nearby {
                    Some(map) => map,
                    None => return &self.fallback,
                }
            }
        };

        let dst_key = info.dst_key();
        dst_map
            .get(&dst_key)
            .or_else(|| dst_map.get(&None::<String>))
            .or_else(|| dst_map.values().next())
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }
}

impl std::fmt::Debug for TimezoneTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimezoneTable")
            .field("entries", &self.entries)
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Direct zone name to vendor value table with a fallback zone.
///
/// A zone missing from the table is not translated: the mapper replaces the
/// neutral `timezone` value with the fallback zone's value instead.
#[derive(Debug, Clone)]
pub struct NamedTimezones {
    entries: IndexMap<String, String>,
    fallback_zone: String,
}

impl NamedTimezones {
    /// Create a table whose unknown names use the value of `fallback_zone`.
    pub fn new<I, K, V>(entries: I, fallback_zone: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fallback_zone: fallback_zone.into(),
        }
    }

    /// Look a zone name up, without fallback.
    pub fn get(&self, tz_name: Option<&str>) -> Option<&str> {
        tz_name
            .and_then(|name| self.entries.get(name))
            .map(String::as_str)
    }

    pub fn fallback_zone(&self) -> &str {
        &self.fallback_zone
    }

    /// Value of the fallback zone.
    pub fn fallback_value(&self) -> Option<&str> {
        self.entries.get(&self.fallback_zone).map(String::as_str)
    }
}

/// How a vendor turns the neutral timezone into its own value.
#[derive(Debug, Clone)]
pub enum TimezonePolicy {
    /// Offset/DST keyed label table.
    Table(Arc<TimezoneTable>),
    /// Direct name lookup.
    Named(NamedTimezones),
}

impl TimezonePolicy {
    /// Resolve a zone name to the vendor value.
    ///
    /// Tables always give a label; named tables give `None` for zones they
    /// do not list.
    pub fn resolve(&self, tz_name: Option<&str>) -> Option<&str> {
        match self {
            TimezonePolicy::Table(table) => Some(table.resolve(tz_name)),
            TimezonePolicy::Named(named) => named.get(tz_name),
        }
    }
}
