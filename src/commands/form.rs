// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Form command - interactive annotation session
//!
//! Three ways in, mirroring the annotation options: manual entry (default),
//! loading a saved record (file or URL), or AI annotation through the
//! extraction service. All of them land in the same form for review before
//! anything is validated or published.

use crate::config::Settings;
use crate::extract;
use crate::forge::Forge;
use crate::form;
use crate::publish::{self, PublishOutcome};
use crate::session::Session;
use crate::validate::validate_record;
use anyhow::{bail, Context, Result};
use inquire::{Confirm, Select, Text};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the form command
#[derive(Debug, Default)]
pub struct FormArgs {
    /// Pre-populate from a saved record file
    pub load: Option<PathBuf>,
    /// Pre-populate from a record URL
    pub from_url: Option<String>,
    /// Pre-populate via the extraction service (arXiv URL, PDF URL, or PDF path)
    pub extract: Option<String>,
    /// Write the finished record here and skip the submit/save prompt
    pub output: Option<PathBuf>,
}

/// Run the form command
pub fn run(settings: &Settings, args: &FormArgs) -> Result<()> {
    let mut session = Session::new();
    bootstrap(settings, args, &mut session)?;

    if session.github_user.is_empty() {
        session.github_user = settings.github_user.clone();
    }

    // Username checks during entry are advisory, so no token is needed yet
    let forge = Forge::new(None)?;

    let record = loop {
        form::fill(&mut session, &forge)?;
        let record = session.assemble();

        let errors = validate_record(&record);
        if errors.is_empty() {
            break record;
        }

        println!();
        for error in &errors {
            println!("  {}", error.to_string().red());
        }
        let again = Confirm::new("Edit the form again?")
            .with_default(true)
            .prompt()?;
        if !again {
            bail!("{} validation failure(s); nothing submitted", errors.len());
        }
    };

    if let Some(path) = &args.output {
        save_record(&record, path)?;
        return Ok(());
    }

    match Select::new(
        "Record is valid. What next?",
        vec!["Submit pull request", "Save to file", "Quit"],
    )
    .prompt()?
    {
        "Submit pull request" => submit(settings, &session, &record),
        "Save to file" => {
            let default = format!("{}.json", record.sanitized_name());
            let path = Text::new("Save path").with_initial_value(&default).prompt()?;
            save_record(&record, Path::new(path.trim()))
        }
        _ => Ok(()),
    }
}

fn bootstrap(settings: &Settings, args: &FormArgs, session: &mut Session) -> Result<()> {
    if let Some(path) = &args.load {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        session.apply_json(&document);
        println!("Loaded {}", path.display());
        return Ok(());
    }

    if let Some(url) = &args.from_url {
        session.apply_json(&extract::fetch_record(url)?);
        println!("Loaded {url}");
        return Ok(());
    }

    if let Some(target) = &args.extract {
        if settings.annotation_service.is_empty() {
            bail!("No annotation service configured; set annotation_service in the configuration");
        }
        println!(
            "{}",
            "AI annotation extracts metadata from papers with an LLM; the result \
             can be wrong or incomplete. Review every field before submitting."
                .yellow()
        );

        let service = &settings.annotation_service;
        let document = if Path::new(target).exists() {
            let bytes = fs::read(target).with_context(|| format!("Failed to read {target}"))?;
            let name = extract::pdf_file_name(target);
            extract::from_pdf(service, &name, bytes)?
        } else {
            extract::from_paper_url(service, target)?
        };
        session.apply_json(&document);
        println!("Extraction loaded; review the fields below");
    }

    Ok(())
}

fn submit(settings: &Settings, session: &Session, record: &crate::types::Record) -> Result<()> {
    if session.github_user.is_empty() {
        bail!("A GitHub username is required to submit");
    }

    let forge = Forge::new(Some(settings.github_token()?))?;
    if !forge.user_exists(&session.github_user)? {
        bail!("GitHub user not found: {}", session.github_user);
    }

    match publish::publish(settings, &forge, record, &session.github_user)? {
        PublishOutcome::Created { number, url } => {
            println!("{}", format!("Pull request #{number} created: {url}").green());
        }
        PublishOutcome::Updated { number } => {
            println!("{}", format!("Pull request #{number} updated").green());
        }
        PublishOutcome::NoChanges => println!("No changes made to the dataset"),
    }
    Ok(())
}

fn save_record(record: &crate::types::Record, path: &Path) -> Result<()> {
    let json = publish::record_json(record)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{}", format!("Record saved to {}", path.display()).green());
    Ok(())
}
