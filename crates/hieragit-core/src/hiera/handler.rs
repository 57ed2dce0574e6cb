//! Entry point for library callers.

use std::path::{Component, Path, PathBuf};
use tracing::info;

use super::errors::DataFileError;
use crate::overrides::{self, OverrideError, Overrides};
use crate::storage::StorageBackend;
use crate::store::{self, BackendOptions, HieraConfig, StoreError};

/// A Hiera tree reached through one storage backend.
///
/// The backend is injected at construction, so several independent trees
/// (or several storage variants over the same tree) can coexist.
#[derive(Debug, Clone)]
pub struct Hiera<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> Hiera<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load_config(&self) -> Result<HieraConfig, StoreError> {
        store::load_config(&self.storage)
    }

    pub fn save_config(&self, config: &HieraConfig) -> Result<(), StoreError> {
        store::save_config(&self.storage, config)
    }

    pub fn hierarchy(&self) -> Result<Vec<String>, StoreError> {
        store::get_hierarchy(&self.storage)
    }

    pub fn backends(&self) -> Result<Vec<String>, StoreError> {
        store::get_backends(&self.storage)
    }

    pub fn backend_options(&self, backend: &str) -> Result<BackendOptions, StoreError> {
        store::get_backend_options(&self.storage, backend)
    }

    /// Read `file` from `backend`'s datadir.
    pub fn read_file(&self, backend: &str, file: &str) -> Result<String, DataFileError> {
        let path = self.data_path(backend, file)?;
        let bytes = self.storage.read(&path)?;
        String::from_utf8(bytes).map_err(|_| DataFileError::InvalidUtf8 {
            path: path.display().to_string(),
        })
    }

    /// Create or overwrite `file` in `backend`'s datadir. With versioned
    /// storage this also commits and pushes the change.
    pub fn write_file(&self, backend: &str, file: &str, data: &str) -> Result<(), DataFileError> {
        let path = self.data_path(backend, file)?;
        self.storage.write(&path, data.as_bytes())?;

        info!(
            event = "core.hiera.write_file_completed",
            backend = backend,
            file = file,
            storage = self.storage.name()
        );
        Ok(())
    }

    pub fn overrides(&self, backend: &str, file: &str) -> Result<Overrides, OverrideError> {
        check_file_name(file).map_err(|reason| OverrideError::InvalidFileName {
            name: file.to_string(),
            reason: reason.to_string(),
        })?;
        overrides::get_overrides(&self.storage, backend, file)
    }

    fn data_path(&self, backend: &str, file: &str) -> Result<PathBuf, DataFileError> {
        validate_file_name(file)?;
        let config = self.load_config()?;
        let datadir = store::resolve_datadir(&self.storage, &config, backend)?;
        Ok(datadir.join(file))
    }
}

fn validate_file_name(file: &str) -> Result<(), DataFileError> {
    check_file_name(file).map_err(|reason| DataFileError::InvalidFileName {
        name: file.to_string(),
        reason: reason.to_string(),
    })
}

/// Data file names are relative and may not climb out of the datadir.
fn check_file_name(file: &str) -> Result<(), &'static str> {
    if file.trim().is_empty() {
        return Err("name is empty");
    }

    for component in Path::new(file).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err("must stay inside the datadir"),
            Component::RootDir | Component::Prefix(_) => {
                return Err("must be relative to the datadir");
            }
        }
    }
    Ok(())
}
