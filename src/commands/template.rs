// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Template command - emit the default record document

use crate::publish::record_json;
use crate::session::Session;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Run the template command
pub fn run(output: Option<PathBuf>) -> Result<()> {
    let record = Session::new().assemble();
    let json = record_json(&record)?;

    match output {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Template written to {}", path.display());
        }
        None => print!("{json}"),
    }

    Ok(())
}
