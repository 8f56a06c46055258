//! File store seam and the filesystem implementation.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;

use crate::error::OutputError;

/// Destination of rendered configuration files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write a complete file, replacing any previous content.
    async fn write(&self, path: &Path, contents: Bytes) -> Result<(), OutputError>;

    /// Remove a file.
    async fn remove(&self, path: &Path) -> Result<(), OutputError>;
}

/// Store writing to the local filesystem with tokio.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers never see a half-written file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, source: io::Error) -> OutputError {
    OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl FileStore for FsStore {
    async fn write(&self, path: &Path, contents: Bytes) -> Result<(), OutputError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let tmp = temp_path(path);
        tokio::fs::write(&tmp, &contents)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(path, e));
        }

        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }

    async fn remove(&self, path: &Path) -> Result<(), OutputError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| io_error(path, e))?;
        debug!("Removed {}", path.display());
        Ok(())
    }
}
