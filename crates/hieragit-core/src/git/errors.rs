use crate::errors::HieraError;
use crate::git::types::PipelineStep;

/// Failures of the commit pipeline, one variant per step.
///
/// Variants raised after the COMMIT step carry the id of the local commit,
/// which stays in history: nothing is rolled back.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("Repository not found at path: {path}: {message}")]
    RepositoryNotFound { path: String, message: String },

    #[error("Failed to stage '{path}': {message}")]
    StageFailed { path: String, message: String },

    #[error("Failed to write tree from index: {message}")]
    TreeFailed { message: String },

    #[error("Failed to resolve branch head: {message}")]
    ParentLookupFailed { message: String },

    #[error("Failed to create commit: {message}")]
    CommitCreateFailed { message: String },

    #[error("Push of {commit} to '{remote}' failed: {message}")]
    PushFailed {
        remote: String,
        commit: String,
        message: String,
    },

    #[error("Authentication to '{remote}' failed (local commit {commit} kept): {message}")]
    AuthFailed {
        remote: String,
        commit: String,
        message: String,
    },

    #[error(
        "Remote '{remote}' branch '{branch}' has diverged; push of {commit} rejected as non-fast-forward: {message}"
    )]
    ConcurrentWriteConflict {
        remote: String,
        branch: String,
        commit: String,
        message: String,
    },
}

impl CommitError {
    /// The pipeline step that produced this error.
    pub fn step(&self) -> PipelineStep {
        match self {
            CommitError::RepositoryNotFound { .. } => PipelineStep::Init,
            CommitError::StageFailed { .. } => PipelineStep::Stage,
            CommitError::TreeFailed { .. } => PipelineStep::Tree,
            CommitError::ParentLookupFailed { .. } => PipelineStep::LookupParent,
            CommitError::CommitCreateFailed { .. } => PipelineStep::Commit,
            CommitError::PushFailed { .. }
            | CommitError::AuthFailed { .. }
            | CommitError::ConcurrentWriteConflict { .. } => PipelineStep::Push,
        }
    }

    /// Id of the local commit left behind by a failed push, if any.
    pub fn local_commit(&self) -> Option<&str> {
        match self {
            CommitError::PushFailed { commit, .. }
            | CommitError::AuthFailed { commit, .. }
            | CommitError::ConcurrentWriteConflict { commit, .. } => Some(commit),
            _ => None,
        }
    }
}

impl HieraError for CommitError {
    fn error_code(&self) -> &'static str {
        match self {
            CommitError::RepositoryNotFound { .. } => "REPOSITORY_NOT_FOUND",
            CommitError::StageFailed { .. } => "STAGE_FAILED",
            CommitError::TreeFailed { .. } => "TREE_FAILED",
            CommitError::ParentLookupFailed { .. } => "PARENT_LOOKUP_FAILED",
            CommitError::CommitCreateFailed { .. } => "COMMIT_CREATE_FAILED",
            CommitError::PushFailed { .. } => "PUSH_FAILED",
            CommitError::AuthFailed { .. } => "AUTH_FAILED",
            CommitError::ConcurrentWriteConflict { .. } => "CONCURRENT_WRITE_CONFLICT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            CommitError::AuthFailed { .. } | CommitError::ConcurrentWriteConflict { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_error_steps() {
        let stage = CommitError::StageFailed {
            path: "data/common.yaml".to_string(),
            message: "outside work tree".to_string(),
        };
        assert_eq!(stage.step(), PipelineStep::Stage);
        assert_eq!(stage.error_code(), "STAGE_FAILED");
        assert!(stage.local_commit().is_none());

        let conflict = CommitError::ConcurrentWriteConflict {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            commit: "abc123".to_string(),
            message: "cannot push non-fastforwardable reference".to_string(),
        };
        assert_eq!(conflict.step(), PipelineStep::Push);
        assert_eq!(conflict.local_commit(), Some("abc123"));
        assert_eq!(conflict.error_code(), "CONCURRENT_WRITE_CONFLICT");
        assert!(conflict.is_user_error());
    }

    #[test]
    fn test_push_failed_display() {
        let error = CommitError::PushFailed {
            remote: "origin".to_string(),
            commit: "abc123".to_string(),
            message: "remote not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Push of abc123 to 'origin' failed: remote not found"
        );
        assert!(!error.is_user_error());
    }
}
