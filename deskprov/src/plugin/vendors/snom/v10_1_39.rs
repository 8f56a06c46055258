//! Snom firmware 10.1.39.11.
//!
//! This release still reports the 715 and 725 as `D715` and `D725`.

use crate::plugin::PluginDefinition;

/// Supported models.
pub const MODELS: &[&str] = &["D375", "D715", "D725", "D735", "D745", "D765", "D785"];

/// Firmware version of the release.
pub const VERSION: &str = "10.1.39.11";

/// Create the Snom 10.1.39.11 plugin definition.
pub fn plugin() -> PluginDefinition {
    super::release("snom_10_1_39", MODELS, VERSION)
}
