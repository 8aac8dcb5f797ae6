// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings layer a `fihrist.toml` file (project config dir, or `--config`)
//! under `FIHRIST_*` environment variables. The GitHub token is read from
//! `GITHUB_TOKEN` only, never from the config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Catalogue repository slug, `owner/repo`
    #[serde(default = "default_catalogue_repo")]
    pub catalogue_repo: String,
    /// Directory inside the catalogue that holds the per-dataset JSON files
    #[serde(default = "default_datasets_dir")]
    pub datasets_dir: String,
    /// Base branch pull requests target
    #[serde(default = "default_branch")]
    pub default_branch: String,
    /// Directory for persistent data (the tracked-PR index)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Scratch directory the catalogue is cloned into; recreated per publish
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
    /// GitHub login credited in pull-request bodies
    #[serde(default)]
    pub github_user: String,
    /// Committer name for publish commits
    #[serde(default)]
    pub git_user_name: String,
    /// Committer email for publish commits
    #[serde(default)]
    pub git_user_email: String,
    /// Base URL of the metadata-extraction service ("" disables AI annotation)
    #[serde(default)]
    pub annotation_service: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalogue_repo: default_catalogue_repo(),
            datasets_dir: default_datasets_dir(),
            default_branch: default_branch(),
            data_dir: default_data_dir(),
            scratch_dir: default_scratch_dir(),
            github_user: String::new(),
            git_user_name: String::new(),
            git_user_email: String::new(),
            annotation_service: String::new(),
        }
    }
}

impl Settings {
    /// Load configuration from disk and environment, or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_path()).required(false))
            .add_source(config::Environment::with_prefix("FIHRIST"))
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Path of the tracked-PR index file
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("prs.json")
    }

    /// GitHub token used for cloning, pushing, and the forge API
    pub fn github_token(&self) -> Result<String> {
        std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN is not set")
    }

    /// Committer identity, falling back to `GIT_USER_NAME`/`GIT_USER_EMAIL`
    #[must_use]
    pub fn git_identity(&self) -> (String, String) {
        let name = if self.git_user_name.is_empty() {
            std::env::var("GIT_USER_NAME").unwrap_or_else(|_| "fihrist".to_string())
        } else {
            self.git_user_name.clone()
        };
        let email = if self.git_user_email.is_empty() {
            std::env::var("GIT_USER_EMAIL")
                .unwrap_or_else(|_| "fihrist@users.noreply.github.com".to_string())
        } else {
            self.git_user_email.clone()
        };
        (name, email)
    }
}

fn default_catalogue_repo() -> String {
    "hyperpolymath/fihrist-catalogue".to_string()
}

fn default_datasets_dir() -> String {
    "datasets".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "hyperpolymath", "fihrist")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".fihrist"))
}

fn default_scratch_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "hyperpolymath", "fihrist")
        .map(|d| d.cache_dir().join("checkout"))
        .unwrap_or_else(|| PathBuf::from(".fihrist").join("checkout"))
}

fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("org", "hyperpolymath", "fihrist")
        .map(|d| d.config_dir().join("fihrist.toml"))
        .unwrap_or_else(|| PathBuf::from("fihrist.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.datasets_dir, "datasets");
        assert_eq!(settings.default_branch, "main");
        assert!(settings.catalogue_repo.contains('/'));
    }

    #[test]
    fn test_index_path_under_data_dir() {
        let settings = Settings {
            data_dir: PathBuf::from("/tmp/fihrist-test"),
            ..Settings::default()
        };
        assert_eq!(
            settings.index_path(),
            PathBuf::from("/tmp/fihrist-test/prs.json")
        );
    }
}
