use git2::Oid;
use std::fmt;
use std::path::PathBuf;

/// Steps of the commit pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Init,
    Stage,
    Tree,
    LookupParent,
    Commit,
    Push,
    Done,
}

impl PipelineStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::Init => "init",
            PipelineStep::Stage => "stage",
            PipelineStep::Tree => "tree",
            PipelineStep::LookupParent => "lookup_parent",
            PipelineStep::Commit => "commit",
            PipelineStep::Push => "push",
            PipelineStep::Done => "done",
        }
    }

    /// The step that follows this one. `Done` is terminal.
    pub fn next(&self) -> PipelineStep {
        match self {
            PipelineStep::Init => PipelineStep::Stage,
            PipelineStep::Stage => PipelineStep::Tree,
            PipelineStep::Tree => PipelineStep::LookupParent,
            PipelineStep::LookupParent => PipelineStep::Commit,
            PipelineStep::Commit => PipelineStep::Push,
            PipelineStep::Push | PipelineStep::Done => PipelineStep::Done,
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed author/committer identity used for every pipeline commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn signature(&self) -> Result<git2::Signature<'static>, git2::Error> {
        git2::Signature::now(&self.name, &self.email)
    }
}

/// State carried through one run of the commit pipeline.
///
/// Created per write and dropped once the write returns.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitTransaction {
    /// Path of the staged file, relative to the work tree.
    pub staged_file: PathBuf,
    pub branch: Option<String>,
    pub parent_commit_id: Option<Oid>,
    pub new_tree_id: Option<Oid>,
    pub new_commit_id: Option<Oid>,
    pub step: PipelineStep,
}

impl CommitTransaction {
    pub fn new(staged_file: PathBuf) -> Self {
        Self {
            staged_file,
            branch: None,
            parent_commit_id: None,
            new_tree_id: None,
            new_commit_id: None,
            step: PipelineStep::Init,
        }
    }

    pub fn advance(&mut self) {
        self.step = self.step.next();
    }

    pub fn is_done(&self) -> bool {
        self.step == PipelineStep::Done
    }

    /// Commit message recorded for the staged file.
    pub fn message(&self) -> String {
        format!("Saves {}", self.staged_file.display())
    }
}
