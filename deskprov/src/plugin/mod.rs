//! Plugin definitions for multi-vendor support.
//!
//! A plugin is data: how a vendor's devices identify themselves, how well a
//! fingerprint matches the family, how the neutral record becomes template
//! fields, and where the resulting file lives.

mod common;
mod definition;
mod filename;
mod registry;
pub mod vendors;

pub use common::{CommonFile, FW_FILENAME_KEY, HANDSETS_FW_KEY};
pub use definition::PluginDefinition;
pub use filename::{DeviceFilename, MacCase};
pub use registry::PluginRegistry;
