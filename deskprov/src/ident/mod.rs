//! Device identification from DHCP, HTTP and TFTP requests.
//!
//! Extraction is a pure function of the request: no I/O, no shared mutable
//! state, only compiled pattern tables that are read.

mod extractor;
mod fingerprint;
mod patterns;
mod request;

pub use extractor::{
    DeviceInfoExtractor, ExtractorSet, FilenameExtractor, LegacyModelRule, UserAgentExtractor,
    VendorClassExtractor,
};
pub use fingerprint::DeviceFingerprint;
pub use patterns::FingerprintPattern;
pub use request::{
    DhcpRequest, HttpRequest, Request, RequestType, TftpPacket, TftpRequest, VENDOR_CLASS_OPTION,
};
