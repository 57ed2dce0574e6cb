//! Storage backend trait definition.

use std::path::Path;

use super::errors::StorageError;

/// Capability interface shared by every storage variant.
///
/// All file I/O for the Hiera config and data files goes through this
/// trait. Paths passed to `read`/`write` are full paths (datadir already
/// joined).
pub trait StorageBackend: Send + Sync {
    /// Short name of the variant (e.g., "local", "git").
    fn name(&self) -> &'static str;

    /// Path of the top-level Hiera config this backend reads and saves.
    fn config_path(&self) -> &Path;

    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError>;

    /// Create or overwrite `path`, creating parent directories as needed.
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), StorageError>;

    fn read_config(&self) -> Result<Vec<u8>, StorageError> {
        self.read(self.config_path())
    }

    fn save_config(&self, data: &[u8]) -> Result<(), StorageError>;
}
