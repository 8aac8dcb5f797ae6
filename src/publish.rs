// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Publishing records to the catalogue
//!
//! One record, one file, one branch, one pull request. The tracked-PR index
//! (`prs.json` in the data directory) remembers every PR this tool opened so
//! a branch never gets a duplicate PR: a tracked branch is updated in place,
//! anything else gets a fresh branch off the default branch and a new PR.

use crate::config::Settings;
use crate::forge::Forge;
use crate::git::{self, Checkout};
use crate::types::{PrState, Record, TrackedPr};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Persistent index of pull requests opened by this tool
#[derive(Debug)]
pub struct PrIndex {
    path: PathBuf,
    entries: Vec<TrackedPr>,
}

impl PrIndex {
    /// Load the index, treating a missing file as empty
    pub fn load(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Write the index back to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries).context("Failed to serialize PR index")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// All tracked pull requests
    #[must_use]
    pub fn entries(&self) -> &[TrackedPr] {
        &self.entries
    }

    /// The tracked PR for a branch, if any
    #[must_use]
    pub fn find_branch(&self, branch: &str) -> Option<&TrackedPr> {
        self.entries.iter().find(|pr| pr.branch == branch)
    }

    /// Track a newly opened PR
    pub fn track(&mut self, pr: TrackedPr) {
        self.entries.push(pr);
    }

    /// Mark a tracked PR closed
    pub fn mark_closed(&mut self, number: u64) {
        if let Some(pr) = self.entries.iter_mut().find(|pr| pr.number == number) {
            pr.state = PrState::Closed;
        }
    }
}

/// What the publish run will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishAction {
    /// New branch off the default branch, then a new PR
    Create,
    /// Rewrite the file on the tracked branch; no new PR
    Update {
        /// Number of the tracked PR being amended
        number: u64,
    },
}

/// The decided shape of a publish run, before any side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    /// Head branch, derived from the sanitized dataset name
    pub branch: String,
    /// Record path inside the catalogue
    pub file_path: String,
    /// Create or update
    pub action: PublishAction,
}

/// Decide what publishing `record` would do, given the current index
#[must_use]
pub fn plan(index: &PrIndex, record: &Record, datasets_dir: &str) -> PublishPlan {
    let branch = record.branch_name();
    let file_path = format!("{datasets_dir}/{}", record.file_name());
    let action = match index.find_branch(&branch) {
        Some(tracked) => PublishAction::Update {
            number: tracked.number,
        },
        None => PublishAction::Create,
    };

    PublishPlan {
        branch,
        file_path,
        action,
    }
}

/// Outcome of a publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A new PR was opened
    Created {
        /// PR number
        number: u64,
        /// HTML URL of the new PR
        url: String,
    },
    /// The tracked PR's branch was updated
    Updated {
        /// Number of the amended PR
        number: u64,
    },
    /// The record matched what the branch already holds
    NoChanges,
}

/// Serialize a record the way the catalogue stores it (4-space indent)
pub fn record_json(record: &Record) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record
        .serialize(&mut serializer)
        .context("Failed to serialize record")?;
    let mut json = String::from_utf8(buf).context("Record serialized to invalid UTF-8")?;
    json.push('\n');
    Ok(json)
}

/// Publish a record: clone, branch, write, commit, push, open or amend the PR
///
/// `github_user` is the contributor credited in the PR body.
pub fn publish(
    settings: &Settings,
    forge: &Forge,
    record: &Record,
    github_user: &str,
) -> Result<PublishOutcome> {
    git::validate_slug(&settings.catalogue_repo)?;
    let token = settings.github_token()?;

    let mut index = PrIndex::load(&settings.index_path())?;
    sync_tracked_states(&mut index, forge, &settings.catalogue_repo);

    let plan = plan(&index, record, &settings.datasets_dir);
    debug!("Publish plan: {plan:?}");

    let checkout = Checkout::clone_fresh(
        &settings.catalogue_repo,
        &settings.scratch_dir,
        &token,
        settings.git_identity(),
    )?;

    let contents = record_json(record)?;

    let outcome = match plan.action {
        PublishAction::Update { number } => {
            checkout.checkout_remote_branch(&plan.branch)?;
            checkout.write_file(&plan.file_path, &contents)?;
            checkout.stage(&plan.file_path)?;

            if checkout.is_dirty()? {
                checkout.commit(&format!("Updating {}", plan.file_path))?;
                checkout.push(&plan.branch)?;
                info!("Updated PR #{number}");
                PublishOutcome::Updated { number }
            } else {
                info!("No changes against {}", plan.branch);
                PublishOutcome::NoChanges
            }
        }
        PublishAction::Create => {
            checkout.create_branch(&plan.branch)?;
            checkout.write_file(&plan.file_path, &contents)?;
            checkout.stage(&plan.file_path)?;
            checkout.commit(&format!("Creating {}", plan.file_path))?;
            checkout.push(&plan.branch)?;

            let base = forge
                .default_branch(&settings.catalogue_repo)
                .unwrap_or_else(|e| {
                    warn!("Falling back to configured base branch: {e}");
                    settings.default_branch.clone()
                });

            let title = format!("Adding {} to the catalogue", record.name);
            let body = format!(
                "This is a pull request by @{github_user} to add {} to the catalogue.",
                record.name
            );
            let pr = forge.create_pull(
                &settings.catalogue_repo,
                &title,
                &body,
                &plan.branch,
                &base,
            )?;

            index.track(TrackedPr {
                name: record.name.clone(),
                url: pr.html_url.clone(),
                branch: plan.branch.clone(),
                state: PrState::Open,
                number: pr.number,
            });
            info!("Opened PR #{}", pr.number);
            PublishOutcome::Created {
                number: pr.number,
                url: pr.html_url,
            }
        }
    };

    index.save()?;
    Ok(outcome)
}

/// Refresh the state of tracked-open PRs from the forge
///
/// Lookup failures leave the entry untouched; the index is a cache, not the
/// source of truth.
pub fn sync_tracked_states(index: &mut PrIndex, forge: &Forge, slug: &str) {
    let open: Vec<u64> = index
        .entries
        .iter()
        .filter(|pr| pr.state == PrState::Open)
        .map(|pr| pr.number)
        .collect();

    for number in open {
        match forge.pull_state(slug, number) {
            Ok(PrState::Closed) => index.mark_closed(number),
            Ok(PrState::Open) => {}
            Err(e) => warn!("Could not refresh PR #{number}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tracked(name: &str, branch: &str, number: u64) -> TrackedPr {
        TrackedPr {
            name: name.into(),
            url: format!("https://github.com/example/catalogue/pull/{number}"),
            branch: branch.into(),
            state: PrState::Open,
            number,
        }
    }

    fn record_named(name: &str) -> Record {
        Record {
            name: name.into(),
            ..Record::default()
        }
    }

    #[test]
    fn test_index_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prs.json");

        let mut index = PrIndex::load(&path).unwrap();
        assert!(index.entries().is_empty());

        index.track(tracked("Shami", "add-shami", 42));
        index.save().unwrap();

        let reloaded = PrIndex::load(&path).unwrap();
        assert_eq!(reloaded.entries(), index.entries());
    }

    #[test]
    fn test_index_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let index = PrIndex::load(&dir.path().join("absent.json")).unwrap();
        assert!(index.entries().is_empty());
    }

    #[test]
    fn test_mark_closed() {
        let dir = TempDir::new().unwrap();
        let mut index = PrIndex::load(&dir.path().join("prs.json")).unwrap();
        index.track(tracked("Shami", "add-shami", 42));
        index.mark_closed(42);
        assert_eq!(index.entries()[0].state, PrState::Closed);
    }

    #[test]
    fn test_plan_creates_for_untracked_branch() {
        let dir = TempDir::new().unwrap();
        let index = PrIndex::load(&dir.path().join("prs.json")).unwrap();

        let plan = plan(&index, &record_named("Shami"), "datasets");
        assert_eq!(plan.branch, "add-shami");
        assert_eq!(plan.file_path, "datasets/shami.json");
        assert_eq!(plan.action, PublishAction::Create);
    }

    #[test]
    fn test_plan_updates_for_tracked_branch() {
        let dir = TempDir::new().unwrap();
        let mut index = PrIndex::load(&dir.path().join("prs.json")).unwrap();
        index.track(tracked("Shami", "add-shami", 42));

        let plan = plan(&index, &record_named("Shami"), "datasets");
        assert_eq!(plan.action, PublishAction::Update { number: 42 });
    }

    #[test]
    fn test_plan_branch_follows_sanitized_name() {
        let dir = TempDir::new().unwrap();
        let index = PrIndex::load(&dir.path().join("prs.json")).unwrap();

        let plan = plan(
            &index,
            &record_named("CALLHOME: Egyptian Arabic"),
            "datasets",
        );
        assert_eq!(plan.branch, "add-callhome__egyptian_arabic");
        assert_eq!(plan.file_path, "datasets/callhome__egyptian_arabic.json");
    }

    #[test]
    fn test_record_json_uses_four_space_indent() {
        let json = record_json(&record_named("Shami")).unwrap();
        assert!(json.starts_with("{\n    \"Name\": \"Shami\""));
        assert!(json.ends_with("}\n"));
    }
}
