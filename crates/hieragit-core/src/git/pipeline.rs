//! Commit pipeline wrapped around a single file write.
//!
//! `INIT -> STAGE -> TREE -> LOOKUP_PARENT -> COMMIT -> PUSH -> DONE`
//!
//! Steps run strictly in order and each feeds the next. The first failing
//! step aborts the run with its own error. Nothing is undone: a commit made
//! before a failed push stays in local history and can be pushed again.

use git2::{ErrorCode, Oid, PushOptions, Repository};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::git::credentials::CredentialStrategy;
use crate::git::errors::CommitError;
use crate::git::types::{CommitIdentity, CommitTransaction, PipelineStep};

pub struct CommitPipeline<'a> {
    repo: &'a Repository,
    identity: &'a CommitIdentity,
    credentials: &'a CredentialStrategy,
    remote: &'a str,
}

impl<'a> CommitPipeline<'a> {
    pub fn new(
        repo: &'a Repository,
        identity: &'a CommitIdentity,
        credentials: &'a CredentialStrategy,
        remote: &'a str,
    ) -> Self {
        Self {
            repo,
            identity,
            credentials,
            remote,
        }
    }

    /// Run every step for `file`, which must already be written inside the
    /// repository work tree.
    pub fn run(&self, file: &Path) -> Result<CommitTransaction, CommitError> {
        let staged_file = relative_to_workdir(self.repo, file)?;
        let mut tx = CommitTransaction::new(staged_file);

        info!(
            event = "core.git.pipeline.run_started",
            file = %tx.staged_file.display(),
            remote = self.remote,
            credentials = self.credentials.name()
        );

        while !tx.is_done() {
            tx.advance();
            let step = tx.step;
            let result = match step {
                PipelineStep::Stage => self.stage(&tx),
                PipelineStep::Tree => self.write_tree().map(|oid| {
                    tx.new_tree_id = Some(oid);
                }),
                PipelineStep::LookupParent => self.lookup_parent().map(|(branch, oid)| {
                    tx.branch = Some(branch);
                    tx.parent_commit_id = Some(oid);
                }),
                PipelineStep::Commit => self.commit(&tx).map(|oid| {
                    tx.new_commit_id = Some(oid);
                }),
                PipelineStep::Push => self.push(&tx),
                PipelineStep::Init | PipelineStep::Done => Ok(()),
            };

            if let Err(e) = result {
                error!(
                    event = "core.git.pipeline.step_failed",
                    step = %tx.step,
                    file = %tx.staged_file.display(),
                    error = %e
                );
                return Err(e);
            }

            debug!(event = "core.git.pipeline.step_completed", step = %tx.step);
        }

        info!(
            event = "core.git.pipeline.run_completed",
            file = %tx.staged_file.display(),
            commit = %display_oid(tx.new_commit_id),
            parent = %display_oid(tx.parent_commit_id)
        );

        Ok(tx)
    }

    fn stage(&self, tx: &CommitTransaction) -> Result<(), CommitError> {
        let stage_err = |e: git2::Error| CommitError::StageFailed {
            path: tx.staged_file.display().to_string(),
            message: e.message().to_string(),
        };

        let mut index = self.repo.index().map_err(stage_err)?;
        index.read(false).map_err(stage_err)?;
        index.add_path(&tx.staged_file).map_err(stage_err)?;
        index.write().map_err(stage_err)
    }

    fn write_tree(&self) -> Result<Oid, CommitError> {
        let tree_err = |e: git2::Error| CommitError::TreeFailed {
            message: e.message().to_string(),
        };

        let mut index = self.repo.index().map_err(tree_err)?;
        index.write_tree().map_err(tree_err)
    }

    /// Resolve the branch HEAD points at and its tip commit.
    fn lookup_parent(&self) -> Result<(String, Oid), CommitError> {
        let head = self
            .repo
            .head()
            .map_err(|e| CommitError::ParentLookupFailed {
                message: e.message().to_string(),
            })?;

        if !head.is_branch() {
            return Err(CommitError::ParentLookupFailed {
                message: "HEAD is detached; writes require a checked-out branch".to_string(),
            });
        }

        let branch = head
            .shorthand()
            .ok_or_else(|| CommitError::ParentLookupFailed {
                message: "branch name is not valid UTF-8".to_string(),
            })?
            .to_string();

        let parent = head
            .peel_to_commit()
            .map_err(|e| CommitError::ParentLookupFailed {
                message: e.message().to_string(),
            })?;

        Ok((branch, parent.id()))
    }

    fn commit(&self, tx: &CommitTransaction) -> Result<Oid, CommitError> {
        let commit_err = |e: git2::Error| CommitError::CommitCreateFailed {
            message: e.message().to_string(),
        };

        let (Some(tree_id), Some(parent_id)) = (tx.new_tree_id, tx.parent_commit_id) else {
            return Err(CommitError::CommitCreateFailed {
                message: "tree or parent missing from transaction".to_string(),
            });
        };

        let tree = self.repo.find_tree(tree_id).map_err(commit_err)?;
        let parent = self.repo.find_commit(parent_id).map_err(commit_err)?;
        let signature = self.identity.signature().map_err(commit_err)?;

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &tx.message(),
                &tree,
                &[&parent],
            )
            .map_err(commit_err)
    }

    fn push(&self, tx: &CommitTransaction) -> Result<(), CommitError> {
        let commit = display_oid(tx.new_commit_id);
        let branch = tx.branch.clone().unwrap_or_default();
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");

        let mut remote =
            self.repo
                .find_remote(self.remote)
                .map_err(|e| CommitError::PushFailed {
                    remote: self.remote.to_string(),
                    commit: commit.clone(),
                    message: e.message().to_string(),
                })?;

        let rejection: RefCell<Option<String>> = RefCell::new(None);
        let mut callbacks = self.credentials.remote_callbacks();
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                *rejection.borrow_mut() = Some(format!("{refname}: {status}"));
            }
            Ok(())
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        debug!(
            event = "core.git.push_started",
            remote = self.remote,
            refspec = refspec,
            commit = commit
        );

        if let Err(e) = remote.push(&[refspec.as_str()], Some(&mut options)) {
            return Err(classify_push_error(self.remote, &e, &branch, &commit));
        }
        drop(options);

        if let Some(status) = rejection.into_inner() {
            warn!(
                event = "core.git.push_rejected",
                remote = self.remote,
                status = status
            );
            return Err(classify_rejection(self.remote, status, &branch, &commit));
        }

        Ok(())
    }
}

/// Map a failed `push` call onto the pipeline's error taxonomy.
fn classify_push_error(remote: &str, e: &git2::Error, branch: &str, commit: &str) -> CommitError {
    let message = e.message().to_string();

    if e.code() == ErrorCode::NotFastForward || is_non_fast_forward(&message) {
        CommitError::ConcurrentWriteConflict {
            remote: remote.to_string(),
            branch: branch.to_string(),
            commit: commit.to_string(),
            message,
        }
    } else if e.code() == ErrorCode::Auth || message.to_lowercase().contains("authentication") {
        CommitError::AuthFailed {
            remote: remote.to_string(),
            commit: commit.to_string(),
            message,
        }
    } else {
        CommitError::PushFailed {
            remote: remote.to_string(),
            commit: commit.to_string(),
            message,
        }
    }
}

/// Map a ref update the remote refused (reported through
/// `push_update_reference`) onto the pipeline's error taxonomy.
fn classify_rejection(remote: &str, status: String, branch: &str, commit: &str) -> CommitError {
    if is_non_fast_forward(&status) {
        CommitError::ConcurrentWriteConflict {
            remote: remote.to_string(),
            branch: branch.to_string(),
            commit: commit.to_string(),
            message: status,
        }
    } else {
        CommitError::PushFailed {
            remote: remote.to_string(),
            commit: commit.to_string(),
            message: status,
        }
    }
}

/// Path of `file` relative to the repository work tree.
fn relative_to_workdir(repo: &Repository, file: &Path) -> Result<PathBuf, CommitError> {
    let stage_err = |message: String| CommitError::StageFailed {
        path: file.display().to_string(),
        message,
    };

    let workdir = repo
        .workdir()
        .ok_or_else(|| stage_err("repository has no work tree".to_string()))?;
    let workdir = workdir
        .canonicalize()
        .map_err(|e| stage_err(format!("cannot resolve work tree: {e}")))?;
    let file = file
        .canonicalize()
        .map_err(|e| stage_err(format!("cannot resolve file: {e}")))?;

    file.strip_prefix(&workdir)
        .map(Path::to_path_buf)
        .map_err(|_| stage_err(format!("file is outside work tree {}", workdir.display())))
}

fn is_non_fast_forward(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("non-fast-forward")
        || lower.contains("non-fastforwardable")
        || lower.contains("fetch first")
        || lower.contains("not present locally")
}

fn display_oid(oid: Option<Oid>) -> String {
    oid.map(|o| o.to_string()).unwrap_or_else(|| "none".to_string())
}
