//! Inbound request shapes handed over by the provisioning host.

use std::collections::HashMap;

use bytes::Bytes;

/// DHCP option carrying the vendor class identifier.
pub const VENDOR_CLASS_OPTION: u8 = 60;

/// Transport a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    Dhcp,
    Http,
    Tftp,
}

/// A DHCP request reduced to its options.
#[derive(Debug, Clone, Default)]
pub struct DhcpRequest {
    /// Raw option values keyed by option code.
    pub options: HashMap<u8, Bytes>,
}

impl DhcpRequest {
    /// Create a request with a single vendor class identifier option.
    pub fn with_vendor_class(vdi: impl Into<Bytes>) -> Self {
        let mut options = HashMap::new();
        options.insert(VENDOR_CLASS_OPTION, vdi.into());
        Self { options }
    }

    /// Get the vendor class identifier (option 60), if present.
    pub fn vendor_class(&self) -> Option<&[u8]> {
        self.options.get(&VENDOR_CLASS_OPTION).map(|v| v.as_ref())
    }
}

/// An HTTP request reduced to its path and headers.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    /// Request path, e.g. `/SEP001122AABBCC.cnf.xml`.
    pub path: String,

    /// Raw header name/value pairs in arrival order.
    pub headers: Vec<(Bytes, Bytes)>,
}

impl HttpRequest {
    /// Create a request for a path without headers.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: Vec::new(),
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header by byte-string name, ignoring ASCII case.
    pub fn header(&self, name: &[u8]) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_ref())
    }
}

/// The part of a TFTP read request the extractors look at.
#[derive(Debug, Clone, Default)]
pub struct TftpPacket {
    pub filename: String,
}

/// A TFTP request.
#[derive(Debug, Clone, Default)]
pub struct TftpRequest {
    pub packet: TftpPacket,
}

impl TftpRequest {
    /// Create a read request for a filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            packet: TftpPacket {
                filename: filename.into(),
            },
        }
    }
}

/// Any request the host may ask a plugin to identify.
#[derive(Debug, Clone)]
pub enum Request {
    Dhcp(DhcpRequest),
    Http(HttpRequest),
    Tftp(TftpRequest),
}

impl Request {
    /// Get the transport this request arrived on.
    pub fn request_type(&self) -> RequestType {
        match self {
            Request::Dhcp(_) => RequestType::Dhcp,
            Request::Http(_) => RequestType::Http,
            Request::Tftp(_) => RequestType::Tftp,
        }
    }
}

impl From<DhcpRequest> for Request {
    fn from(r: DhcpRequest) -> Self {
        Request::Dhcp(r)
    }
}

impl From<HttpRequest> for Request {
    fn from(r: HttpRequest) -> Self {
        Request::Http(r)
    }
}

impl From<TftpRequest> for Request {
    fn from(r: TftpRequest) -> Self {
        Request::Tftp(r)
    }
}
