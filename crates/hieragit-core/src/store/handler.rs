//! Config Store operations.
//!
//! Every call loads a fresh snapshot through the storage backend; nothing is
//! cached between calls.

use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::errors::StoreError;
use super::types::{BackendOptions, HieraConfig};
use crate::storage::{StorageBackend, StorageError};

pub fn load_config(storage: &dyn StorageBackend) -> Result<HieraConfig, StoreError> {
    let path = storage.config_path();

    let bytes = storage.read_config().map_err(|e| match e {
        StorageError::FileNotFound { path } => StoreError::ConfigNotFound { path },
        other => StoreError::Storage { source: other },
    })?;

    let content = String::from_utf8(bytes).map_err(|e| StoreError::ConfigParseError {
        path: path.display().to_string(),
        message: format!("not valid UTF-8: {}", e),
    })?;

    let config = HieraConfig::from_yaml(&content, path)?;

    info!(
        event = "core.store.load_completed",
        path = %path.display(),
        levels = config.hierarchy.len(),
        backends = config.backends.len()
    );

    Ok(config)
}

pub fn save_config(storage: &dyn StorageBackend, config: &HieraConfig) -> Result<(), StoreError> {
    config.validate()?;
    let yaml = config.to_yaml()?;

    storage.save_config(yaml.as_bytes()).map_err(|e| {
        error!(
            event = "core.store.save_failed",
            path = %storage.config_path().display(),
            error = %e
        );
        StoreError::WriteError {
            message: format!("could not write '{}'", storage.config_path().display()),
            source: Some(e),
        }
    })?;

    info!(
        event = "core.store.save_completed",
        path = %storage.config_path().display()
    );
    Ok(())
}

pub fn get_hierarchy(storage: &dyn StorageBackend) -> Result<Vec<String>, StoreError> {
    Ok(load_config(storage)?.hierarchy)
}

pub fn get_backends(storage: &dyn StorageBackend) -> Result<Vec<String>, StoreError> {
    Ok(load_config(storage)?.backends)
}

pub fn get_backend_options(
    storage: &dyn StorageBackend,
    backend: &str,
) -> Result<BackendOptions, StoreError> {
    let config = load_config(storage)?;
    backend_options(&config, backend).cloned()
}

/// Options for `backend` within an already loaded config.
pub fn backend_options<'a>(
    config: &'a HieraConfig,
    backend: &str,
) -> Result<&'a BackendOptions, StoreError> {
    config
        .backend_config
        .get(backend)
        .filter(|_| config.backends.iter().any(|b| b == backend))
        .ok_or_else(|| StoreError::UnknownBackend {
            backend: backend.to_string(),
            available: config.backends.join(", "),
        })
}

/// Absolute data directory for `backend`; relative datadirs are taken
/// from the directory holding the Hiera config.
pub fn resolve_datadir(
    storage: &dyn StorageBackend,
    config: &HieraConfig,
    backend: &str,
) -> Result<PathBuf, StoreError> {
    let options = backend_options(config, backend)?;
    let base = storage.config_path().parent().unwrap_or(Path::new(""));
    Ok(options.resolved_datadir(base))
}
