use crate::errors::HieraError;
use crate::hierarchy::HierarchyError;
use crate::storage::StorageError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to parse source file '{path}': {message}")]
    SourceParseError { path: String, message: String },

    #[error("Failed to parse higher-priority file '{path}': {message}")]
    CandidateParseError { path: String, message: String },

    #[error("Invalid data file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },
}

impl HieraError for OverrideError {
    fn error_code(&self) -> &'static str {
        match self {
            OverrideError::Store(e) => e.error_code(),
            OverrideError::Hierarchy(e) => e.error_code(),
            OverrideError::Storage(e) => e.error_code(),
            OverrideError::SourceParseError { .. } => "SOURCE_PARSE_ERROR",
            OverrideError::CandidateParseError { .. } => "CANDIDATE_PARSE_ERROR",
            OverrideError::InvalidFileName { .. } => "INVALID_FILE_NAME",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            OverrideError::Store(e) => e.is_user_error(),
            OverrideError::Hierarchy(e) => e.is_user_error(),
            OverrideError::Storage(e) => e.is_user_error(),
            OverrideError::SourceParseError { .. }
            | OverrideError::CandidateParseError { .. }
            | OverrideError::InvalidFileName { .. } => true,
        }
    }
}
