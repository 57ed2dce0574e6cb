use crate::errors::HieraError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Hiera config not found at '{path}'")]
    ConfigNotFound { path: String },

    #[error("Failed to parse Hiera config '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid Hiera config: {message}")]
    InvalidConfiguration { message: String },

    #[error("Unknown backend '{backend}'. Configured backends: {available}")]
    UnknownBackend { backend: String, available: String },

    #[error("Failed to save Hiera config: {message}")]
    WriteError {
        message: String,
        #[source]
        source: Option<StorageError>,
    },

    #[error("Storage error: {source}")]
    Storage {
        #[from]
        source: StorageError,
    },
}

impl HieraError for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            StoreError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            StoreError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            StoreError::InvalidConfiguration { .. } => "INVALID_HIERA_CONFIG",
            StoreError::UnknownBackend { .. } => "UNKNOWN_BACKEND",
            StoreError::WriteError { .. } => "WRITE_ERROR",
            StoreError::Storage { source } => source.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::ConfigNotFound { .. }
                | StoreError::ConfigParseError { .. }
                | StoreError::InvalidConfiguration { .. }
                | StoreError::UnknownBackend { .. }
        )
    }
}
