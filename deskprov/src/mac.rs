//! MAC address parsing and formatting.
//!
//! Every MAC that enters the crate goes through [`MacAddress::from_str`], so
//! comparisons and filenames downstream only ever see one canonical form:
//! lowercase, separator-free, 12 hex digits.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DeviceError;

// Contiguous, colon or dash separated pairs, or dotted quads (Cisco style).
static MAC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[[:xdigit:]]{12}|[[:xdigit:]]{2}(?::[[:xdigit:]]{2}){5}|[[:xdigit:]]{2}(?:-[[:xdigit:]]{2}){5}|[[:xdigit:]]{4}(?:\.[[:xdigit:]]{4}){2})$",
    )
    .unwrap()
});

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Create a MAC address from raw octets.
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Get the raw octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Format with an arbitrary separator and letter case.
    ///
    /// `format("", true)` gives `001122AABBCC`, `format(":", false)` gives
    /// `00:11:22:aa:bb:cc`.
    pub fn format(&self, separator: &str, uppercase: bool) -> String {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|b| {
                if uppercase {
                    format!("{:02X}", b)
                } else {
                    format!("{:02x}", b)
                }
            })
            .collect();
        parts.join(separator)
    }
}

impl FromStr for MacAddress {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !MAC_REGEX.is_match(s) {
            return Err(DeviceError::InvalidMac {
                value: s.to_string(),
            });
        }

        let digits: Vec<u8> = s
            .bytes()
            .filter(u8::is_ascii_hexdigit)
            .map(|c| match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                _ => c - b'A' + 10,
            })
            .collect();

        let mut octets = [0u8; 6];
        for (octet, pair) in octets.iter_mut().zip(digits.chunks_exact(2)) {
            *octet = (pair[0] << 4) | pair[1];
        }
        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format("", false))
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalize a MAC address string to its canonical form.
pub fn normalize(mac: &str) -> Result<String, DeviceError> {
    mac.parse::<MacAddress>().map(|m| m.to_string())
}
