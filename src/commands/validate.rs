// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Validate command - check a record file against the catalogue rules

use crate::session::Session;
use crate::validate::validate_record;
use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::Path;

/// Run the validate command
///
/// The file is loaded through a session first, so the same normalisation the
/// form applies (option filtering, year coercion) happens before the checks.
pub fn run(record_path: &Path) -> Result<()> {
    let content = fs::read_to_string(record_path)
        .with_context(|| format!("Failed to read {}", record_path.display()))?;
    let document = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", record_path.display()))?;

    let mut session = Session::new();
    session.apply_json(&document);
    let record = session.assemble();

    let errors = validate_record(&record);
    if errors.is_empty() {
        println!("{}", format!("{} is valid", record_path.display()).green());
        return Ok(());
    }

    for error in &errors {
        println!("  {}", error.to_string().red());
    }
    bail!("{} validation failure(s)", errors.len());
}
