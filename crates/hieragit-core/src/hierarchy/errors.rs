use crate::errors::HieraError;

#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("Level '{level}' is not in the hierarchy [{hierarchy}]")]
    LevelNotFound { level: String, hierarchy: String },
}

impl HieraError for HierarchyError {
    fn error_code(&self) -> &'static str {
        match self {
            HierarchyError::LevelNotFound { .. } => "LEVEL_NOT_FOUND",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
