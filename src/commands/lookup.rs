// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Lookup command - duplicate check against the catalogue

use crate::config::Settings;
use crate::forge::Forge;
use crate::validate::sanitize_name;
use anyhow::Result;
use owo_colors::OwoColorize;

/// Run the lookup command
pub fn run(settings: &Settings, name: &str) -> Result<()> {
    let file_name = format!("{}.json", sanitize_name(name));
    let forge = Forge::new(settings.github_token().ok())?;

    if forge.dataset_exists(&settings.catalogue_repo, &settings.datasets_dir, &file_name)? {
        println!(
            "{}",
            format!(
                "{name} is already catalogued as {}/{file_name} in {}",
                settings.datasets_dir, settings.catalogue_repo
            )
            .yellow()
        );
    } else {
        println!(
            "{}",
            format!("{name} is not in {} yet", settings.catalogue_repo).green()
        );
    }

    Ok(())
}
