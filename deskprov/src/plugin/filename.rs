//! Device-specific filenames.

use regex::Regex;

use crate::mac::MacAddress;

/// Case of the MAC address in a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacCase {
    Upper,
    Lower,
}

/// Filename made of a prefix, the separator-free MAC and a suffix.
///
/// The same parts define the sensitive filename predicate, so the host can
/// protect exactly the files [`render`](Self::render) produces.
#[derive(Debug, Clone)]
pub struct DeviceFilename {
    prefix: String,
    suffix: String,
    case: MacCase,
    pattern: Regex,
}

impl DeviceFilename {
    /// Create a filename scheme, e.g. `SEP` + upper MAC + `.cnf.xml`.
    pub fn new(prefix: impl Into<String>, case: MacCase, suffix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let suffix = suffix.into();
        let hex = match case {
            MacCase::Upper => "[0-9A-F]{12}",
            MacCase::Lower => "[0-9a-f]{12}",
        };
        let pattern = format!("^{}{}{}$", regex::escape(&prefix), hex, regex::escape(&suffix));
        // Both parts are escaped, the pattern is always valid.
        let pattern = Regex::new(&pattern).unwrap();
        Self {
            prefix,
            suffix,
            case,
            pattern,
        }
    }

    /// Filename of a device.
    pub fn render(&self, mac: MacAddress) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            mac.format("", self.case == MacCase::Upper),
            self.suffix
        )
    }

    /// Check whether `name` is a device-specific filename of this scheme.
    pub fn is_match(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn case(&self) -> MacCase {
        self.case
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    fn mac(s: &str) -> MacAddress {
        s.parse().unwrap()
    }

    #[test]
    fn test_render() {
        let cisco = DeviceFilename::new("SEP", MacCase::Upper, ".cnf.xml");
        assert_eq!(
            cisco.render(mac("00:11:22:aa:bb:cc")),
            "SEP001122AABBCC.cnf.xml"
        );

        let grandstream = DeviceFilename::new("cfg", MacCase::Lower, ".xml");
        assert_eq!(
            grandstream.render(mac("00-11-22-AA-BB-CC")),
            "cfg001122aabbcc.xml"
        );
    }

    #[test]
    fn test_render_is_stable_and_distinct() {
        let f = DeviceFilename::new("", MacCase::Lower, ".cfg");
        let a = mac("001122aabbcc");
        let b = mac("001122aabbcd");
        assert_eq!(f.render(a), f.render(a));
        assert_ne!(f.render(a), f.render(b));
    }

    #[test]
    fn test_distinct_macs_never_share_a_filename() {
        // Every single-bit neighbour of a few base addresses
        let bases = [
            [0x00, 0x11, 0x22, 0xaa, 0xbb, 0xcc],
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
            [0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        ];
        let mut macs = BTreeSet::new();
        for base in bases {
            macs.insert(MacAddress::new(base));
            for byte in 0..6 {
                for bit in 0..8 {
                    let mut octets = base;
                    octets[byte] ^= 1 << bit;
                    macs.insert(MacAddress::new(octets));
                }
            }
        }

        for scheme in [
            DeviceFilename::new("SEP", MacCase::Upper, ".cnf.xml"),
            DeviceFilename::new("cfg", MacCase::Lower, ".xml"),
            DeviceFilename::new("", MacCase::Lower, ".cfg"),
            DeviceFilename::new("", MacCase::Upper, ".xml"),
        ] {
            let names: HashSet<String> = macs.iter().map(|m| scheme.render(*m)).collect();
            assert_eq!(names.len(), macs.len());
            assert!(names.iter().all(|n| scheme.is_match(n)));
        }
    }

    #[test]
    fn test_is_match() {
        let cisco = DeviceFilename::new("SEP", MacCase::Upper, ".cnf.xml");
        assert!(cisco.is_match("SEP001122AABBCC.cnf.xml"));
        assert!(!cisco.is_match("SEP001122aabbcc.cnf.xml"));
        assert!(!cisco.is_match("SEP001122AABBCCxcnfxxml"));
        assert!(!cisco.is_match("xSEP001122AABBCC.cnf.xml"));
        assert!(!cisco.is_match("SEPDefault.cnf.xml"));
    }
}
