//! Timezone and locale resolution.
//!
//! Vendor firmwares only know a coarse list of timezones. A [`TimezoneTable`]
//! is built once from a canonical zone-name table by resolving each zone to
//! its UTC offset and DST rule, and lookups degrade through several fallback
//! levels instead of failing.

mod builtin;
mod locale;
mod table;

pub use builtin::BuiltinTimezones;
pub use locale::{LocaleTable, VendorLocale};
pub use table::{NamedTimezones, NEARBY_OFFSETS, TimezonePolicy, TimezoneTable};

use std::fmt;

use crate::error::TimezoneError;

/// A daylight saving time rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DstRule {
    /// Minutes added to the standard offset while DST is active.
    pub save_minutes: i32,

    /// Start of DST in POSIX `Mm.w.d/time` form.
    pub start: String,

    /// End of DST in POSIX `Mm.w.d/time` form.
    pub end: String,
}

impl DstRule {
    /// Create a DST rule.
    pub fn new(save_minutes: i32, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            save_minutes,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Key identifying the rule in timezone tables.
    pub fn as_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DstRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}+{}", self.start, self.end, self.save_minutes)
    }
}

/// UTC offset and DST rule of a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneInfo {
    /// Standard time offset from UTC, in minutes.
    pub utc_offset_minutes: i32,

    /// DST rule, `None` for zones without DST.
    pub dst: Option<DstRule>,
}

impl TimezoneInfo {
    /// Key of the DST rule, `None` without DST.
    pub fn dst_key(&self) -> Option<String> {
        self.dst.as_ref().map(DstRule::as_key)
    }
}

/// Source of timezone information.
///
/// The crate ships [`BuiltinTimezones`]; a host may inject a provider backed
/// by the system zone database.
pub trait TimezoneInfoProvider: Send + Sync {
    /// Resolve a zone name such as `Europe/Paris`.
    fn timezone_info(&self, name: &str) -> Result<TimezoneInfo, TimezoneError>;
}
