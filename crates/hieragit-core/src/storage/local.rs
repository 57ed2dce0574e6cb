use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::errors::StorageError;
use super::traits::StorageBackend;

/// Plain filesystem storage.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    config_path: PathBuf,
}

impl LocalStorage {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }
}

impl StorageBackend for LocalStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        debug!(event = "core.storage.read_started", path = %path.display());

        fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                StorageError::ReadError {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<(), StorageError> {
        let write_err = |e: std::io::Error| StorageError::WriteError {
            path: path.display().to_string(),
            source: e,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, data).map_err(write_err)?;

        info!(
            event = "core.storage.write_completed",
            path = %path.display(),
            bytes = data.len()
        );
        Ok(())
    }

    fn save_config(&self, data: &[u8]) -> Result<(), StorageError> {
        self.write(&self.config_path, data)
    }
}
