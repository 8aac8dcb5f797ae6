// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - show the effective configuration

use crate::config::Settings;
use anyhow::{Context, Result};

/// Run the config command
///
/// Prints the effective settings as TOML, after file and environment layering,
/// so the output can seed a `fihrist.toml`.
pub fn run(settings: &Settings) -> Result<()> {
    let rendered =
        toml::to_string_pretty(settings).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
