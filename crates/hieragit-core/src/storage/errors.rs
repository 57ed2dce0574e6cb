use crate::errors::HieraError;
use crate::git::errors::CommitError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: '{path}'")]
    FileNotFound { path: String },

    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was written to disk but the commit pipeline failed, so the
    /// work tree and version history now differ.
    #[error("Wrote '{path}' but the commit pipeline failed at {}: {source}", source.step())]
    CommitFailed {
        path: String,
        #[source]
        source: CommitError,
    },
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::FileNotFound { .. })
    }
}

impl HieraError for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            StorageError::FileNotFound { .. } => "FILE_NOT_FOUND",
            StorageError::ReadError { .. } => "FILE_READ_ERROR",
            StorageError::WriteError { .. } => "WRITE_ERROR",
            StorageError::CommitFailed { source, .. } => source.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            StorageError::FileNotFound { .. } => true,
            StorageError::CommitFailed { source, .. } => source.is_user_error(),
            _ => false,
        }
    }
}
