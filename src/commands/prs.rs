// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Tracked pull-request commands

use crate::config::Settings;
use crate::forge::Forge;
use crate::publish::{sync_tracked_states, PrIndex};
use crate::types::PrState;
use anyhow::Result;
use owo_colors::OwoColorize;

/// Run the prs command
pub fn run(settings: &Settings, action: &str) -> Result<()> {
    match action {
        "list" | "ls" => {
            let index = PrIndex::load(&settings.index_path())?;
            if index.entries().is_empty() {
                println!("No tracked pull requests. Use 'fihrist submit' to open one.");
                return Ok(());
            }

            println!("Tracked pull requests ({}):", index.entries().len());
            for pr in index.entries() {
                let state = match pr.state {
                    PrState::Open => "open".green().to_string(),
                    PrState::Closed => "closed".red().to_string(),
                };
                println!("  #{} {} [{}] {}", pr.number, pr.name, state, pr.branch);
                println!("      {}", pr.url);
            }
        }

        "sync" => {
            let mut index = PrIndex::load(&settings.index_path())?;
            if index.entries().is_empty() {
                println!("No tracked pull requests to sync.");
                return Ok(());
            }

            let forge = Forge::new(settings.github_token().ok())?;
            sync_tracked_states(&mut index, &forge, &settings.catalogue_repo);
            index.save()?;

            let open = index
                .entries()
                .iter()
                .filter(|pr| pr.state == PrState::Open)
                .count();
            println!(
                "Synced {} tracked pull request(s); {open} still open",
                index.entries().len()
            );
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: list, sync", other);
        }
    }

    Ok(())
}
