//! # Deskprov
//!
//! Device provisioning plugins for VoIP desk phones.
//!
//! Deskprov recognizes phones from the requests they send while booting,
//! scores how well each plugin supports them, and turns a vendor-neutral
//! configuration record into the fields a vendor template needs.
//!
//! ## Features
//!
//! - Fingerprinting from DHCP vendor classes, HTTP paths/user agents and TFTP
//!   filenames
//! - Ordinal support scoring with per-vendor policies
//! - Timezone and locale translation through static vendor tables
//! - Field mapping for SIP lines, call managers, DTMF, DNS and function keys
//! - Per-plugin common files, such as the Yealink firmware manifests
//! - Built-in plugins for Cisco SIP and SCCP, Grandstream, Yealink (firmware
//!   80, 83 and 86), Snom (10.1.39 and 10.1.46) and the Gigaset N720
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use deskprov::{ConfigRecord, PluginRegistry, ProvisionerBuilder};
//! use deskprov::ident::HttpRequest;
//!
//! # async fn example(notifier: Arc<dyn deskprov::host::SyncNotifier>) -> Result<(), deskprov::Error> {
//! let registry = PluginRegistry::global();
//! let device = registry
//!     .extract(&HttpRequest::new("/SEP001122AABBCC.cnf.xml").into())
//!     .expect("unrecognized request");
//! let (plugin, _score) = registry.best_match(&device).expect("no plugin");
//!
//! let provisioner = ProvisionerBuilder::new()
//!     .plugin(plugin.name.as_str())
//!     .root_dir("/var/lib/provd/tftpboot")
//!     .notifier(notifier)
//!     .build()?;
//!
//! let config = ConfigRecord::from_json(r#"{"tftp_port": 69, "sip_lines": {"1": {"username": "1001"}}}"#)?;
//! provisioner.configure(&device, &config).await?;
//! # Ok(())
//! # }
//! ```

pub mod assoc;
pub mod config;
pub mod error;
pub mod host;
pub mod ident;
pub mod mac;
pub mod mapper;
pub mod plugin;
pub mod provision;
pub mod tz;

// Re-export main types for convenience
pub use assoc::SupportScore;
pub use config::ConfigRecord;
pub use error::{Error, Result};
pub use ident::{DeviceFingerprint, Request};
pub use mac::MacAddress;
pub use mapper::VendorFieldMapping;
pub use plugin::{PluginDefinition, PluginRegistry};
pub use provision::{Provisioner, ProvisionerBuilder, SyncOutcome};
