//! Provisioning output configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_root_dir() -> PathBuf {
    PathBuf::from("tftpboot")
}

fn default_encoding() -> String {
    "UTF-8".to_string()
}

/// Where and how configuration files are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Provisioning root; files are served from here by the host.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Encoding used when a plugin does not declare its own.
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            encoding: default_encoding(),
        }
    }
}

impl ProvisioningConfig {
    /// Create a configuration rooted at `root_dir`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    /// Set the default encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Decode a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Directory a plugin writes to, below the root.
    pub fn output_dir(&self, subdir: Option<&str>) -> PathBuf {
        match subdir {
            Some(subdir) => self.root_dir.join(subdir),
            None => self.root_dir.clone(),
        }
    }

    /// Full path of a device file.
    pub fn output_path(&self, subdir: Option<&str>, filename: &str) -> PathBuf {
        self.output_dir(subdir).join(Path::new(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProvisioningConfig::from_json("{}").unwrap();
        assert_eq!(config, ProvisioningConfig::default());
        assert_eq!(config.encoding, "UTF-8");
    }

    #[test]
    fn test_output_path() {
        let config = ProvisioningConfig::new("/srv/tftpboot");
        assert_eq!(
            config.output_path(Some("Grandstream"), "cfg001122aabbcc.xml"),
            PathBuf::from("/srv/tftpboot/Grandstream/cfg001122aabbcc.xml")
        );
        assert_eq!(
            config.output_path(None, "SEP001122AABBCC.cnf.xml"),
            PathBuf::from("/srv/tftpboot/SEP001122AABBCC.cnf.xml")
        );
    }
}
