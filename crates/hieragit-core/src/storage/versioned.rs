//! Git-backed storage.
//!
//! Wraps [`LocalStorage`] and runs the commit pipeline after each write.
//! A write that lands on disk is never rolled back when the pipeline fails;
//! the failure is returned as [`StorageError::CommitFailed`] naming the path
//! that was written.

use git2::Repository;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::errors::StorageError;
use super::local::LocalStorage;
use super::traits::StorageBackend;
use crate::config::types::GitSettings;
use crate::errors::ConfigError;
use crate::git::{CommitError, CommitIdentity, CommitPipeline, CommitTransaction, CredentialStrategy};

#[derive(Debug, Clone)]
pub struct VersionedStorage {
    local: LocalStorage,
    repo_path: PathBuf,
    remote: String,
    identity: CommitIdentity,
    credentials: CredentialStrategy,
}

impl VersionedStorage {
    pub fn new(
        local: LocalStorage,
        repo_path: impl Into<PathBuf>,
        remote: impl Into<String>,
        identity: CommitIdentity,
        credentials: CredentialStrategy,
    ) -> Self {
        Self {
            local,
            repo_path: repo_path.into(),
            remote: remote.into(),
            identity,
            credentials,
        }
    }

    /// Build from settings. The repository defaults to the one containing
    /// the Hiera config; the credential strategy is fixed here.
    pub fn from_settings(config_path: &Path, settings: &GitSettings) -> Result<Self, ConfigError> {
        let config_dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let credentials = CredentialStrategy::from_settings(&settings.credentials)?;

        Ok(Self::new(
            LocalStorage::new(config_path),
            settings.repo_or(config_dir),
            settings.remote(),
            CommitIdentity::new(settings.author_name(), settings.author_email()),
            credentials,
        ))
    }

    pub fn credentials(&self) -> &CredentialStrategy {
        &self.credentials
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn open_repository(&self) -> Result<Repository, CommitError> {
        Repository::discover(&self.repo_path).map_err(|e| CommitError::RepositoryNotFound {
            path: self.repo_path.display().to_string(),
            message: e.message().to_string(),
        })
    }

    fn commit_write(&self, path: &Path) -> Result<CommitTransaction, StorageError> {
        let commit_failed = |source: CommitError| StorageError::CommitFailed {
            path: path.display().to_string(),
            source,
        };

        let repo = self.open_repository().map_err(commit_failed)?;
        CommitPipeline::new(&repo, &self.identity, &self.credentials, &self.remote)
            .run(path)
            .map_err(|e| {
                warn!(
                    event = "core.storage.commit_diverged",
                    path = %path.display(),
                    step = %e.step(),
                    local_commit = e.local_commit().unwrap_or("none"),
                    "File written to disk but not fully recorded in version history"
                );
                commit_failed(e)
            })
    }

    /// Write `data` to `path`, then stage, commit and push it.
    pub fn write_and_commit(
        &self,
        path: &Path,
        data: &[u8],
    ) -> Result<CommitTransaction, StorageError> {
        self.local.write(path, data)?;
        self.commit_write(path)
    }

    fn in_work_tree(repo: &Repository, path: &Path) -> bool {
        let (Some(workdir), Ok(path)) = (repo.workdir(), path.canonicalize()) else {
            return false;
        };
        workdir
            .canonicalize()
            .map(|workdir| path.starts_with(workdir))
            .unwrap_or(false)
    }
}

impl StorageBackend for VersionedStorage {
    fn name(&self) -> &'static str {
        "git"
    }

    fn config_path(&self) -> &Path {
        self.local.config_path()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        self.local.read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<(), StorageError> {
        self.write_and_commit(path, data).map(|_| ())
    }

    /// Save the config locally, committing it only when it lives inside the
    /// repository work tree.
    fn save_config(&self, data: &[u8]) -> Result<(), StorageError> {
        let path = self.local.config_path().to_path_buf();
        self.local.save_config(data)?;

        // No repository at all counts as outside the work tree.
        let repo = match self.open_repository() {
            Ok(repo) => repo,
            Err(e) => {
                info!(
                    event = "core.storage.config_commit_skipped",
                    path = %path.display(),
                    reason = "no repository",
                    error = %e
                );
                return Ok(());
            }
        };

        if !Self::in_work_tree(&repo, &path) {
            info!(
                event = "core.storage.config_commit_skipped",
                path = %path.display(),
                reason = "outside work tree"
            );
            return Ok(());
        }
        drop(repo);

        self.commit_write(&path).map(|_| ())
    }
}
