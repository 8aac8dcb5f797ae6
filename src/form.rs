// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Interactive form rendering
//!
//! Walks the field catalogue in order and renders one prompt per field:
//! text inputs for free fields, select/multi-select lists for enumerated
//! ones, a bounded numeric prompt for the year. Session values pre-populate
//! every prompt, so a loaded record becomes an edit pass.

use crate::forge::Forge;
use crate::schema::{self, FieldKind, FieldSpec, FIELDS};
use crate::session::Session;
use crate::types::Subset;
use crate::validate;
use anyhow::Result;
use inquire::{MultiSelect, Select, Text};
use owo_colors::OwoColorize;

/// Run the full form against a session
///
/// The GitHub username is checked against the forge as it is entered; a miss
/// is only a warning here because submission re-validates it.
pub fn fill(session: &mut Session, forge: &Forge) -> Result<()> {
    prompt_github_user(session, forge)?;

    for spec in FIELDS {
        // Cost only applies to fee-based access
        if spec.name == "Cost" && session.text("Access") != "With-Fee" {
            continue;
        }

        prompt_field(session, spec)?;

        if spec.name == "Name" {
            prompt_subsets(session)?;
        }
        if spec.name == "Tasks" {
            prompt_other_tasks(session)?;
        }
    }

    Ok(())
}

fn prompt_github_user(session: &mut Session, forge: &Forge) -> Result<()> {
    let initial = session.github_user.clone();
    let login = Text::new("GitHub username *")
        .with_initial_value(&initial)
        .prompt()?;
    let login = login.trim().to_string();

    if !login.is_empty() {
        match forge.user_exists(&login) {
            Ok(true) => println!("{}", format!("GitHub user {login} found").green()),
            Ok(false) => println!(
                "{}",
                format!("GitHub user {login} not found; check the username").yellow()
            ),
            Err(e) => println!("{}", format!("Could not verify {login}: {e}").yellow()),
        }
    }

    session.github_user = login;
    Ok(())
}

fn label(spec: &FieldSpec) -> String {
    if spec.required {
        format!("{} *", spec.name)
    } else {
        spec.name.to_string()
    }
}

fn prompt_field(session: &mut Session, spec: &FieldSpec) -> Result<()> {
    let label = label(spec);

    match spec.kind {
        FieldKind::Text | FieldKind::LongText => {
            let initial = session.text(spec.name).to_string();
            let mut prompt = Text::new(&label).with_initial_value(&initial);
            if !spec.help.is_empty() {
                prompt = prompt.with_help_message(spec.help);
            }
            let value = prompt.prompt()?;
            session.set_text(spec.name, value);
        }
        FieldKind::Select => {
            let current = session.text(spec.name);
            let cursor = spec
                .options
                .iter()
                .position(|o| *o == current)
                .unwrap_or(0);
            let mut prompt =
                Select::new(&label, spec.options.to_vec()).with_starting_cursor(cursor);
            if !spec.help.is_empty() {
                prompt = prompt.with_help_message(spec.help);
            }
            let choice = prompt.prompt()?;
            session.set_text(spec.name, choice);
        }
        FieldKind::MultiSelect => {
            let current = session.list(spec.name);
            let defaults: Vec<usize> = spec
                .options
                .iter()
                .enumerate()
                .filter(|(_, o)| current.iter().any(|c| c == *o))
                .map(|(i, _)| i)
                .collect();
            let mut prompt =
                MultiSelect::new(&label, spec.options.to_vec()).with_default(&defaults);
            if !spec.help.is_empty() {
                prompt = prompt.with_help_message(spec.help);
            }
            let choices = prompt.prompt()?;
            session.set_list(
                spec.name,
                choices.into_iter().map(ToString::to_string).collect(),
            );
        }
        FieldKind::Number => {
            let max = validate::current_year();
            loop {
                let initial = session.year().to_string();
                let mut prompt = Text::new(&label).with_initial_value(&initial);
                if !spec.help.is_empty() {
                    prompt = prompt.with_help_message(spec.help);
                }
                let answer = prompt.prompt()?;
                match answer.trim().parse::<u32>() {
                    Ok(year) if (validate::MIN_YEAR..=max).contains(&year) => {
                        session.set_year(year);
                        break;
                    }
                    _ => println!(
                        "{}",
                        format!("Enter a year between {} and {max}", validate::MIN_YEAR).red()
                    ),
                }
            }
        }
    }

    Ok(())
}

/// Sub-form for dialect subsets: rows repeat until a name is left empty
fn prompt_subsets(session: &mut Session) -> Result<()> {
    println!("Dialect subsets (leave the name empty to continue)");

    let existing = std::mem::take(&mut session.subsets);
    let mut subsets = Vec::new();

    loop {
        let previous = existing.get(subsets.len());

        let name = Text::new("Subset name")
            .with_initial_value(previous.map_or("", |s| s.name.as_str()))
            .prompt()?;
        if name.trim().is_empty() {
            break;
        }

        let dialects = schema::DIALECTS.to_vec();
        let cursor = previous
            .and_then(|s| dialects.iter().position(|d| *d == s.dialect))
            .unwrap_or(0);
        let dialect = Select::new("Subset dialect", dialects)
            .with_starting_cursor(cursor)
            .prompt()?;

        let volume = Text::new("Subset volume")
            .with_initial_value(previous.map_or("", |s| s.volume.as_str()))
            .with_help_message("Comma-grouped, e.g. 1,000")
            .prompt()?;

        let units = schema::UNITS.to_vec();
        let cursor = previous
            .and_then(|s| units.iter().position(|u| *u == s.unit))
            .unwrap_or(0);
        let unit = Select::new("Subset unit", units)
            .with_starting_cursor(cursor)
            .prompt()?;

        subsets.push(Subset {
            name: name.trim().to_string(),
            dialect: dialect.to_string(),
            volume: volume.trim().to_string(),
            unit: unit.to_string(),
        });
    }

    session.subsets = subsets;
    Ok(())
}

fn prompt_other_tasks(session: &mut Session) -> Result<()> {
    let initial = session.other_tasks.join(",");
    let value = Text::new(schema::OTHER_TASKS)
        .with_initial_value(&initial)
        .with_help_message("Tasks outside the list above, split by comma")
        .prompt()?;

    session.other_tasks = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    Ok(())
}
