// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Submit command - validate a record file and publish it as a pull request

use crate::config::Settings;
use crate::forge::Forge;
use crate::publish::{self, PrIndex, PublishAction, PublishOutcome};
use crate::session::Session;
use crate::types::Record;
use crate::validate::validate_record;
use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the submit command
#[derive(Debug, Default)]
pub struct SubmitArgs {
    /// Record file to publish
    pub record: PathBuf,
    /// Print the plan without touching git or the forge
    pub dry_run: bool,
    /// Write the assembled record here instead of publishing
    pub save: Option<PathBuf>,
    /// GitHub login credited in the PR body (overrides configuration)
    pub user: Option<String>,
}

/// Run the submit command
pub fn run(settings: &Settings, args: &SubmitArgs) -> Result<()> {
    let record = load_record(&args.record)?;

    let errors = validate_record(&record);
    if !errors.is_empty() {
        for error in &errors {
            println!("  {}", error.to_string().red());
        }
        bail!("{} validation failure(s); nothing submitted", errors.len());
    }

    if let Some(path) = &args.save {
        let json = publish::record_json(&record)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{}", format!("Record saved to {}", path.display()).green());
        return Ok(());
    }

    if args.dry_run {
        return print_plan(settings, &record);
    }

    let user = github_user(settings, args)?;
    let forge = Forge::new(Some(settings.github_token()?))?;
    if !forge.user_exists(&user)? {
        bail!("GitHub user not found: {user}");
    }

    match publish::publish(settings, &forge, &record, &user)? {
        PublishOutcome::Created { number, url } => {
            println!("{}", format!("Pull request #{number} created: {url}").green());
        }
        PublishOutcome::Updated { number } => {
            println!("{}", format!("Pull request #{number} updated").green());
        }
        PublishOutcome::NoChanges => {
            println!("No changes made to the dataset");
        }
    }

    Ok(())
}

/// Load a record file through a session so it is normalised like form input
fn load_record(path: &Path) -> Result<Record> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let document = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut session = Session::new();
    session.apply_json(&document);
    Ok(session.assemble())
}

fn github_user(settings: &Settings, args: &SubmitArgs) -> Result<String> {
    if let Some(user) = &args.user {
        return Ok(user.clone());
    }
    if !settings.github_user.is_empty() {
        return Ok(settings.github_user.clone());
    }
    bail!("No GitHub username; pass --user or set github_user in the configuration");
}

fn print_plan(settings: &Settings, record: &Record) -> Result<()> {
    let index = PrIndex::load(&settings.index_path())?;
    let plan = publish::plan(&index, record, &settings.datasets_dir);

    println!("Dry-run: would publish '{}'", record.name);
    println!("  repository: {}", settings.catalogue_repo);
    println!("  branch:     {}", plan.branch);
    println!("  file:       {}", plan.file_path);
    match plan.action {
        PublishAction::Create => println!("  action:     open a new pull request"),
        PublishAction::Update { number } => {
            println!("  action:     update tracked pull request #{number}");
        }
    }

    Ok(())
}
