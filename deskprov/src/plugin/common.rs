//! Files shared by every device of a plugin.
//!
//! Some vendors fetch model-wide files before their device file, typically
//! to learn which firmware image to install. They are rendered from the
//! host's base configuration plus a few fixed fields.

use serde_json::{Map, Value};

use crate::config::ConfigRecord;
use crate::error::Result;
use crate::mapper::VendorFieldMapping;

/// Key naming the firmware image in a common file.
pub const FW_FILENAME_KEY: &str = "XX_fw_filename";

/// Key holding the handset firmware images of a DECT base.
pub const HANDSETS_FW_KEY: &str = "XX_handsets_fw";

/// A file written once per plugin rather than once per device.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonFile {
    /// Filename below the plugin's output directory.
    pub filename: String,

    /// Template rendering the file.
    pub template: String,

    /// Fields added on top of the base configuration.
    pub fields: VendorFieldMapping,
}

impl CommonFile {
    /// Create a common file without extra fields.
    pub fn new(filename: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            template: template.into(),
            fields: VendorFieldMapping::new(),
        }
    }

    /// Create a file pointing devices at a firmware image.
    pub fn firmware(
        filename: impl Into<String>,
        fw_filename: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self::new(filename, template).with_field(FW_FILENAME_KEY, fw_filename.into())
    }

    /// Set a field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key, value.into());
        self
    }

    /// Set the handset firmware images, keyed by handset model.
    pub fn with_handsets<'a>(self, handsets: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let handsets: Map<String, Value> = handsets
            .into_iter()
            .map(|(model, image)| (model.to_string(), Value::from(image)))
            .collect();
        self.with_field(HANDSETS_FW_KEY, Value::Object(handsets))
    }

    /// Fields handed to the renderer for this file.
    pub fn mapping(&self, config: &ConfigRecord) -> Result<VendorFieldMapping> {
        let mut mapping = VendorFieldMapping::from_record(config)?;
        mapping.extend(self.fields.clone());
        Ok(mapping)
    }
}
