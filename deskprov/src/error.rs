//! Error types for deskprov.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deskprov operations.
///
/// Only conditions that leave no sane output are errors. Unparsed vendor
/// strings, bad embedded MAC addresses, unknown function-key types and
/// unknown timezones are logged and degrade instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration prerequisite is missing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The device cannot be identified well enough to be provisioned
    #[error("Device identity error: {0}")]
    Device(#[from] DeviceError),

    /// The host lacks a capability the operation needs
    #[error("Unsupported operation: {0}")]
    Unsupported(#[from] UnsupportedError),

    /// Rendering or writing the configuration file failed
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// The host could not deliver a sync event
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Plugin definition or registry errors
    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),
}

/// Missing or invalid configuration prerequisites.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The vendor only supports one transport and its port is not configured
    #[error("only support configuration via {transport}")]
    MissingTransport { transport: &'static str },

    /// A SIP plugin was asked to configure a record without lines
    #[error("configuration has no SIP lines")]
    NoSipLines,

    /// The raw record could not be decoded
    #[error("Invalid configuration record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

/// Device identity errors.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Every plugin derives its filename from the MAC address
    #[error("MAC address needed for device configuration")]
    MissingMac,

    /// The string is not a MAC address in any accepted form
    #[error("Invalid MAC address: '{value}'")]
    InvalidMac { value: String },
}

/// Host capability errors.
#[derive(Error, Debug)]
pub enum UnsupportedError {
    /// The notifier cannot send a parameterized event
    #[error("operation '{operation}' not supported, please upgrade the provisioning host")]
    HostTooOld { operation: String },

    /// The plugin has no way to perform the operation
    #[error("operation '{operation}' not supported by plugin '{plugin}'")]
    Operation { operation: String, plugin: String },
}

/// Sync notification errors reported by the host notifier.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The device could not be reached
    #[error("device {device} unreachable: {message}")]
    Unreachable { device: String, message: String },

    /// The event was handed off and refused
    #[error("event '{event}' rejected: {message}")]
    Rejected { event: String, message: String },
}

/// Rendering and file store errors.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The template renderer failed
    #[error("Failed to render '{template}': {message}")]
    Render { template: String, message: String },

    /// Writing or removing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OutputError {
    /// Check whether the error is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OutputError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Plugin definition and registry errors.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Invalid plugin definition
    #[error("Invalid plugin definition: {message}")]
    InvalidDefinition { message: String },

    /// A plugin with the same name is already registered
    #[error("Plugin '{name}' is already registered")]
    AlreadyRegistered { name: String },

    /// No plugin registered under this name
    #[error("Unknown plugin '{name}'")]
    UnknownPlugin { name: String },

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Timezone lookup errors.
///
/// Never surfaced to callers of the mapper: an unknown zone falls back to the
/// vendor default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimezoneError {
    /// The provider has no data for this zone name
    #[error("Unknown timezone '{name}'")]
    NotFound { name: String },
}

/// Result type alias using deskprov's Error.
pub type Result<T> = std::result::Result<T, Error>;
