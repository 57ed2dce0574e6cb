//! Repository fixtures shared by the git and storage tests.

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use std::fs;
use std::path::Path;

pub const BRANCH: &str = "main";

fn init_options(bare: bool) -> RepositoryInitOptions {
    let mut opts = RepositoryInitOptions::new();
    opts.bare(bare).initial_head(BRANCH);
    opts
}

/// Work-tree repository on `main` with no commits.
pub fn init_repo(dir: &Path) -> Repository {
    Repository::init_opts(dir, &init_options(false)).unwrap()
}

pub fn init_bare(dir: &Path) -> Repository {
    Repository::init_opts(dir, &init_options(true)).unwrap()
}

/// Write `name` in the work tree and commit it on HEAD.
pub fn commit_file(repo: &Repository, name: &str, content: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    let path = workdir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test", "test@test.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, name, &tree, &parents)
        .unwrap()
}

pub fn head_id(repo: &Repository) -> Oid {
    repo.head().unwrap().peel_to_commit().unwrap().id()
}

pub fn push_branch(repo: &Repository) {
    let mut remote = repo.find_remote("origin").unwrap();
    let refspec = format!("refs/heads/{BRANCH}:refs/heads/{BRANCH}");
    remote.push(&[refspec.as_str()], None).unwrap();
}

/// Bare `origin` seeded with one commit, plus a clone checked out on `main`.
pub fn origin_and_clone(origin_dir: &Path, seed_dir: &Path, clone_dir: &Path) -> Repository {
    init_bare(origin_dir);

    let seed = init_repo(seed_dir);
    commit_file(&seed, "README", "hieradata\n");
    seed.remote("origin", origin_dir.to_str().unwrap()).unwrap();
    push_branch(&seed);

    Repository::clone(origin_dir.to_str().unwrap(), clone_dir).unwrap()
}

/// Tip of `main` in a bare repository.
pub fn branch_tip(repo: &Repository) -> Oid {
    repo.refname_to_id(&format!("refs/heads/{BRANCH}")).unwrap()
}
