//! Plugin support scores.

use std::fmt;

use serde::Serialize;

/// How well a plugin supports a device.
///
/// Scores are totally ordered; the host picks the plugin reporting the
/// highest one. Small bonuses on top of a level break ties between sibling
/// plugins of one vendor family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SupportScore(i32);

impl SupportScore {
    /// The device almost certainly belongs to another vendor.
    pub const IMPROBABLE: Self = Self(-100);
    /// Nothing is known either way.
    pub const UNKNOWN: Self = Self(0);
    /// The model is known and explicitly not handled by this plugin.
    pub const NO_SUPPORT: Self = Self(0);
    /// Same vendor family, exact model unverified.
    pub const PROBABLE: Self = Self(100);
    /// The model is supported.
    pub const COMPLETE: Self = Self(200);
    /// The model and firmware version are supported.
    pub const EXACT: Self = Self(300);

    /// Add a tie-breaking bonus.
    pub const fn with_bonus(self, bonus: i32) -> Self {
        Self(self.0 + bonus)
    }

    /// Get the raw value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SupportScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::IMPROBABLE => "improbable",
            Self::UNKNOWN => "unknown",
            Self::PROBABLE => "probable",
            Self::COMPLETE => "complete",
            Self::EXACT => "exact",
            _ => return write!(f, "{}", self.0),
        };
        f.write_str(name)
    }
}
