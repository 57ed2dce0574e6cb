//! Storage backends.
//!
//! A closed set of variants behind [`StorageBackend`]. The variant is picked
//! once, when the [`Storage`] is opened, and never switched per call.

pub mod errors;
pub mod local;
pub mod traits;
pub mod versioned;

use std::path::Path;
use tracing::info;

use crate::config::HieragitConfig;
use crate::errors::ConfigError;

pub use errors::StorageError;
pub use local::LocalStorage;
pub use traits::StorageBackend;
pub use versioned::VersionedStorage;

#[derive(Debug, Clone)]
pub enum Storage {
    Local(LocalStorage),
    Versioned(VersionedStorage),
}

/// Open the storage variant selected by `storage.kind`.
pub fn open(config: &HieragitConfig) -> Result<Storage, ConfigError> {
    let config_path = config.hiera.config_path();

    let storage = match config.storage.kind() {
        "local" => Storage::Local(LocalStorage::new(&config_path)),
        "git" => Storage::Versioned(VersionedStorage::from_settings(&config_path, &config.git)?),
        other => {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("Invalid storage kind '{}'", other),
            });
        }
    };

    info!(
        event = "core.storage.open_completed",
        kind = storage.name(),
        config = %config_path.display()
    );

    Ok(storage)
}

impl Storage {
    fn backend(&self) -> &dyn StorageBackend {
        match self {
            Storage::Local(local) => local,
            Storage::Versioned(versioned) => versioned,
        }
    }
}

impl StorageBackend for Storage {
    fn name(&self) -> &'static str {
        self.backend().name()
    }

    fn config_path(&self) -> &Path {
        self.backend().config_path()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        self.backend().read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<(), StorageError> {
        self.backend().write(path, data)
    }

    fn read_config(&self) -> Result<Vec<u8>, StorageError> {
        self.backend().read_config()
    }

    fn save_config(&self, data: &[u8]) -> Result<(), StorageError> {
        self.backend().save_config(data)
    }
}
