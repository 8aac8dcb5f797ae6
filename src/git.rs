// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Local git operations against the catalogue checkout
//!
//! The publisher works on a throwaway clone: wipe, clone with token
//! credentials, branch, write the record file, commit, push. Nothing here
//! touches the tracked-PR index or the forge API.

use anyhow::{anyhow, Context, Result};
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{Cred, FetchOptions, PushOptions, RemoteCallbacks, Repository, Signature, StatusOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Username GitHub expects when the password is a token
const TOKEN_USER: &str = "x-access-token";

/// A scratch checkout of the catalogue repository
pub struct Checkout {
    repo: Repository,
    root: PathBuf,
    token: String,
    user_name: String,
    user_email: String,
}

impl Checkout {
    /// Clone `owner/repo` afresh into `path`, wiping any previous checkout
    pub fn clone_fresh(
        slug: &str,
        path: &Path,
        token: &str,
        identity: (String, String),
    ) -> Result<Self> {
        if path.exists() {
            fs::remove_dir_all(path)
                .with_context(|| format!("Failed to clear {}", path.display()))?;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let url = format!("https://github.com/{slug}.git");
        info!("Cloning {slug} into {}", path.display());

        let mut fetch = FetchOptions::new();
        fetch.remote_callbacks(credential_callbacks(token));

        let repo = RepoBuilder::new()
            .fetch_options(fetch)
            .clone(&url, path)
            .with_context(|| format!("Failed to clone {slug}"))?;

        Ok(Self {
            repo,
            root: path.to_path_buf(),
            token: token.to_string(),
            user_name: identity.0,
            user_email: identity.1,
        })
    }

    /// Open an existing repository as a checkout (used by local workflows)
    pub fn open(path: &Path, token: &str, identity: (String, String)) -> Result<Self> {
        let repo = Repository::open(path)
            .with_context(|| format!("Failed to open repository at {}", path.display()))?;
        Ok(Self {
            repo,
            root: path.to_path_buf(),
            token: token.to_string(),
            user_name: identity.0,
            user_email: identity.1,
        })
    }

    /// Create and check out a local branch at the current HEAD
    pub fn create_branch(&self, name: &str) -> Result<()> {
        debug!("Creating branch {name}");
        let commit = self
            .repo
            .head()
            .context("Repository has no HEAD")?
            .peel_to_commit()
            .context("HEAD does not point at a commit")?;
        self.repo
            .branch(name, &commit, true)
            .with_context(|| format!("Failed to create branch {name}"))?;
        self.checkout_local(name)
    }

    /// Check out a branch that already exists on the remote
    pub fn checkout_remote_branch(&self, name: &str) -> Result<()> {
        debug!("Checking out remote branch {name}");
        let reference = self
            .repo
            .find_reference(&format!("refs/remotes/origin/{name}"))
            .with_context(|| format!("Branch {name} not found on origin"))?;
        let commit = reference
            .peel_to_commit()
            .with_context(|| format!("origin/{name} does not point at a commit"))?;
        self.repo
            .branch(name, &commit, true)
            .with_context(|| format!("Failed to create local branch {name}"))?;
        self.checkout_local(name)
    }

    fn checkout_local(&self, name: &str) -> Result<()> {
        self.repo
            .set_head(&format!("refs/heads/{name}"))
            .with_context(|| format!("Failed to switch HEAD to {name}"))?;
        self.repo
            .checkout_head(Some(CheckoutBuilder::default().force()))
            .with_context(|| format!("Failed to check out {name}"))?;
        Ok(())
    }

    /// Write file contents at a path relative to the repository root
    pub fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Stage one path
    pub fn stage(&self, relative: &str) -> Result<()> {
        let mut index = self.repo.index().context("Failed to open index")?;
        index
            .add_path(Path::new(relative))
            .with_context(|| format!("Failed to stage {relative}"))?;
        index.write().context("Failed to write index")?;
        Ok(())
    }

    /// Whether the index or working tree differs from HEAD
    pub fn is_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(true);
        let statuses = self
            .repo
            .statuses(Some(&mut options))
            .context("Failed to read repository status")?;
        Ok(!statuses.is_empty())
    }

    /// Commit the staged changes
    pub fn commit(&self, message: &str) -> Result<()> {
        let signature = Signature::now(&self.user_name, &self.user_email)
            .context("Invalid committer identity")?;

        let mut index = self.repo.index().context("Failed to open index")?;
        let tree_id = index.write_tree().context("Failed to write tree")?;
        let tree = self.repo.find_tree(tree_id).context("Tree not found")?;

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .context("Failed to commit")?;
        info!("Committed: {message}");
        Ok(())
    }

    /// Push `branch` to origin, creating it on the remote if needed
    pub fn push(&self, branch: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote("origin")
            .context("Remote origin not found")?;

        let mut options = PushOptions::new();
        options.remote_callbacks(credential_callbacks(&self.token));

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote
            .push(&[refspec.as_str()], Some(&mut options))
            .with_context(|| format!("Failed to push {branch} to origin"))?;
        info!("Pushed {branch}");
        Ok(())
    }

    /// Repository root on disk
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn credential_callbacks(token: &str) -> RemoteCallbacks<'static> {
    let token = token.to_string();
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |_url, _username, _allowed| {
        Cred::userpass_plaintext(TOKEN_USER, &token)
    });
    callbacks
}

/// Shorthand for an owner/repo slug check
pub fn validate_slug(slug: &str) -> Result<()> {
    let mut parts = slug.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => Ok(()),
        _ => Err(anyhow!("Invalid repository slug: {slug} (expected owner/repo)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo(dir: &Path) -> Repository {
        let repo = Repository::init(dir).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "test").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        repo
    }

    fn checkout_at(dir: &Path) -> Checkout {
        Checkout::open(dir, "token", ("test".into(), "test@example.com".into())).unwrap()
    }

    #[test]
    fn test_write_stage_commit_cycle() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let checkout = checkout_at(dir.path());

        checkout
            .write_file("datasets/example.json", "{\"Name\": \"example\"}\n")
            .unwrap();
        checkout.stage("datasets/example.json").unwrap();
        assert!(checkout.is_dirty().unwrap());

        checkout.commit("Creating datasets/example.json").unwrap();
        assert!(!checkout.is_dirty().unwrap());
    }

    #[test]
    fn test_rewrite_with_same_contents_stays_clean() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let checkout = checkout_at(dir.path());

        checkout.write_file("a.json", "{}\n").unwrap();
        checkout.stage("a.json").unwrap();
        checkout.commit("Creating a.json").unwrap();

        checkout.write_file("a.json", "{}\n").unwrap();
        checkout.stage("a.json").unwrap();
        assert!(!checkout.is_dirty().unwrap());
    }

    #[test]
    fn test_create_branch() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let checkout = checkout_at(dir.path());

        checkout.write_file("a.json", "{}\n").unwrap();
        checkout.stage("a.json").unwrap();
        checkout.commit("Creating a.json").unwrap();

        checkout.create_branch("add-example").unwrap();
        let head = Repository::open(dir.path()).unwrap();
        assert!(head
            .head()
            .unwrap()
            .name()
            .unwrap()
            .ends_with("add-example"));
    }

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("owner/repo").is_ok());
        assert!(validate_slug("owner").is_err());
        assert!(validate_slug("owner/repo/extra").is_err());
        assert!(validate_slug("/repo").is_err());
    }
}
