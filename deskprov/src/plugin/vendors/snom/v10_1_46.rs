//! Snom firmware 10.1.46.16.

use crate::plugin::PluginDefinition;

/// Supported models.
pub const MODELS: &[&str] = &["D375", "D385", "715", "D717", "725", "D735", "D745", "D765", "D785"];

/// Firmware version of the release.
pub const VERSION: &str = "10.1.46.16";

/// Create the Snom 10.1.46.16 plugin definition.
pub fn plugin() -> PluginDefinition {
    super::release("snom_10_1_46", MODELS, VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assoc::{Associator, SupportScore};
    use crate::plugin::vendors::snom::VENDOR;

    #[test]
    fn test_associate() {
        let assoc = plugin().associator;
        assert_eq!(assoc.associate(VENDOR, Some("D785"), Some("10.1.46.16")), SupportScore::EXACT);
        assert_eq!(assoc.associate(VENDOR, Some("715"), Some("10.1.39.11")), SupportScore::COMPLETE);
        assert_eq!(assoc.associate(VENDOR, Some("D715"), None), SupportScore::PROBABLE);
        assert_eq!(assoc.associate(VENDOR, Some("D120"), None), SupportScore::PROBABLE);
    }
}
