use crate::errors::HieraError;
use crate::storage::StorageError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum DataFileError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid data file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    #[error("Data file '{path}' is not valid UTF-8")]
    InvalidUtf8 { path: String },
}

impl HieraError for DataFileError {
    fn error_code(&self) -> &'static str {
        match self {
            DataFileError::Store(e) => e.error_code(),
            DataFileError::Storage(e) => e.error_code(),
            DataFileError::InvalidFileName { .. } => "INVALID_FILE_NAME",
            DataFileError::InvalidUtf8 { .. } => "INVALID_UTF8",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DataFileError::Store(e) => e.is_user_error(),
            DataFileError::Storage(e) => e.is_user_error(),
            DataFileError::InvalidFileName { .. } | DataFileError::InvalidUtf8 { .. } => true,
        }
    }
}
