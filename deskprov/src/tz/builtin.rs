//! Built-in timezone data.
//!
//! Standard offsets and current DST rules of the zones referenced by the
//! vendor tables, plus common aliases hosts send. Zones that observed DST in
//! the past but no longer do are listed without a rule.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{DstRule, TimezoneInfo, TimezoneInfoProvider};
use crate::error::TimezoneError;

#[derive(Debug, Clone, Copy)]
enum Rule {
    NorthAmerica,
    Europe,
    Israel,
    Egypt,
    Australia,
    NewZealand,
}

impl Rule {
    fn dst(self) -> DstRule {
        match self {
            Rule::NorthAmerica => DstRule::new(60, "M3.2.0/02:00", "M11.1.0/02:00"),
            Rule::Europe => DstRule::new(60, "M3.5.0/01:00Z", "M10.5.0/01:00Z"),
            Rule::Israel => DstRule::new(60, "M3.4.4/26:00", "M10.5.0/02:00"),
            Rule::Egypt => DstRule::new(60, "M4.5.5/00:00", "M10.5.4/24:00"),
            Rule::Australia => DstRule::new(60, "M10.1.0/02:00", "M4.1.0/03:00"),
            Rule::NewZealand => DstRule::new(60, "M9.5.0/02:00", "M4.1.0/03:00"),
        }
    }
}

// (zone, standard offset in minutes, DST rule)
const ZONES: &[(&str, i32, Option<Rule>)] = &[
    ("UTC", 0, None),
    ("Etc/UTC", 0, None),
    ("Etc/GMT", 0, None),
    ("Etc/GMT+2", -120, None),
    ("Etc/GMT+3", -180, None),
    ("Etc/GMT+4", -240, None),
    ("Etc/GMT+5", -300, None),
    ("Etc/GMT+7", -420, None),
    ("Etc/GMT+12", -720, None),
    ("Etc/GMT-4", 240, None),
    ("Etc/GMT-5", 300, None),
    ("Etc/GMT-6", 360, None),
    ("Etc/GMT-7", 420, None),
    ("Etc/GMT-10", 600, None),
    ("Etc/GMT-11", 660, None),
    ("Etc/GMT-12", 720, None),
    ("Pacific/Samoa", -660, None),
    ("Pacific/Pago_Pago", -660, None),
    ("US/Hawaii", -600, None),
    ("Pacific/Honolulu", -600, None),
    ("US/Alaska", -540, Some(Rule::NorthAmerica)),
    ("America/Anchorage", -540, Some(Rule::NorthAmerica)),
    ("US/Pacific", -480, Some(Rule::NorthAmerica)),
    ("America/Los_Angeles", -480, Some(Rule::NorthAmerica)),
    ("America/Vancouver", -480, Some(Rule::NorthAmerica)),
    ("US/Mountain", -420, Some(Rule::NorthAmerica)),
    ("America/Denver", -420, Some(Rule::NorthAmerica)),
    ("America/Phoenix", -420, None),
    ("US/Central", -360, Some(Rule::NorthAmerica)),
    ("America/Chicago", -360, Some(Rule::NorthAmerica)),
    ("America/Winnipeg", -360, Some(Rule::NorthAmerica)),
    ("America/Mexico_City", -360, None),
    ("America/Regina", -360, None),
    ("US/Eastern", -300, Some(Rule::NorthAmerica)),
    ("America/New_York", -300, Some(Rule::NorthAmerica)),
    ("America/Toronto", -300, Some(Rule::NorthAmerica)),
    ("America/Montreal", -300, Some(Rule::NorthAmerica)),
    ("America/Bogota", -300, None),
    ("Canada/Atlantic", -240, Some(Rule::NorthAmerica)),
    ("America/Halifax", -240, Some(Rule::NorthAmerica)),
    ("America/Caracas", -240, None),
    ("Canada/Newfoundland", -210, Some(Rule::NorthAmerica)),
    ("America/St_Johns", -210, Some(Rule::NorthAmerica)),
    ("America/Sao_Paulo", -180, None),
    ("America/Argentina/Buenos_Aires", -180, None),
    ("Atlantic/Azores", -60, Some(Rule::Europe)),
    ("Europe/London", 0, Some(Rule::Europe)),
    ("Europe/Dublin", 0, Some(Rule::Europe)),
    ("Europe/Lisbon", 0, Some(Rule::Europe)),
    ("Africa/Casablanca", 60, None),
    ("Europe/Paris", 60, Some(Rule::Europe)),
    ("Europe/Berlin", 60, Some(Rule::Europe)),
    ("Europe/Brussels", 60, Some(Rule::Europe)),
    ("Europe/Madrid", 60, Some(Rule::Europe)),
    ("Europe/Rome", 60, Some(Rule::Europe)),
    ("Europe/Amsterdam", 60, Some(Rule::Europe)),
    ("Europe/Zurich", 60, Some(Rule::Europe)),
    ("Africa/Lagos", 60, None),
    ("Europe/Athens", 120, Some(Rule::Europe)),
    ("Europe/Helsinki", 120, Some(Rule::Europe)),
    ("Europe/Bucharest", 120, Some(Rule::Europe)),
    ("Egypt", 120, Some(Rule::Egypt)),
    ("Africa/Cairo", 120, Some(Rule::Egypt)),
    ("Africa/Johannesburg", 120, None),
    ("Asia/Jerusalem", 120, Some(Rule::Israel)),
    ("Asia/Riyadh", 180, None),
    ("Europe/Moscow", 180, None),
    ("Europe/Istanbul", 180, None),
    ("Iran", 210, None),
    ("Asia/Tehran", 210, None),
    ("Asia/Dubai", 240, None),
    ("Asia/Kabul", 270, None),
    ("Asia/Karachi", 300, None),
    ("Asia/Calcutta", 330, None),
    ("Asia/Kolkata", 330, None),
    ("Asia/Kathmandu", 345, None),
    ("Asia/Dhaka", 360, None),
    ("Asia/Bangkok", 420, None),
    ("Asia/Shanghai", 480, None),
    ("Asia/Singapore", 480, None),
    ("Asia/Taipei", 480, None),
    ("Asia/Tokyo", 540, None),
    ("Asia/Seoul", 540, None),
    ("Australia/Darwin", 570, None),
    ("Australia/Adelaide", 570, Some(Rule::Australia)),
    ("Australia/ACT", 600, Some(Rule::Australia)),
    ("Australia/Sydney", 600, Some(Rule::Australia)),
    ("Australia/Melbourne", 600, Some(Rule::Australia)),
    ("Australia/Brisbane", 600, None),
    ("Australia/Tasmania", 600, Some(Rule::Australia)),
    ("Australia/Hobart", 600, Some(Rule::Australia)),
    ("Pacific/Noumea", 660, None),
    ("Pacific/Fiji", 720, None),
    ("Pacific/Auckland", 720, Some(Rule::NewZealand)),
];

static INDEX: Lazy<HashMap<&'static str, (i32, Option<Rule>)>> = Lazy::new(|| {
    ZONES
        .iter()
        .map(|(name, offset, rule)| (*name, (*offset, *rule)))
        .collect()
});

/// Timezone provider backed by the built-in zone list.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTimezones;

impl BuiltinTimezones {
    /// Iterate over the zone names this provider knows.
    pub fn names() -> impl Iterator<Item = &'static str> {
        ZONES.iter().map(|(name, _, _)| *name)
    }
}

impl TimezoneInfoProvider for BuiltinTimezones {
    fn timezone_info(&self, name: &str) -> Result<TimezoneInfo, TimezoneError> {
        let (offset, rule) = INDEX.get(name).ok_or_else(|| TimezoneError::NotFound {
            name: name.to_string(),
        })?;
        Ok(TimezoneInfo {
            utc_offset_minutes: *offset,
            dst: rule.map(Rule::dst),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_zone() {
        let info = BuiltinTimezones.timezone_info("Europe/Paris").unwrap();
        assert_eq!(info.utc_offset_minutes, 60);
        assert_eq!(info.dst, Some(Rule::Europe.dst()));

        let info = BuiltinTimezones.timezone_info("Europe/Moscow").unwrap();
        assert_eq!(info.utc_offset_minutes, 180);
        assert!(info.dst.is_none());
    }

    #[test]
    fn test_unknown_zone() {
        assert_eq!(
            BuiltinTimezones.timezone_info("Mars/Olympus_Mons"),
            Err(TimezoneError::NotFound {
                name: "Mars/Olympus_Mons".to_string()
            })
        );
    }

    #[test]
    fn test_names_are_unique() {
        assert_eq!(BuiltinTimezones::names().count(), INDEX.len());
    }
}
