// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Fihrist CLI - catalogue clerk for Arabic language-dataset metadata

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fihrist::commands;
use fihrist::config::Settings;

#[derive(Parser)]
#[command(name = "fihrist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "FIHRIST_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Data directory override
    #[arg(long, env = "FIHRIST_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in a dataset record interactively
    Form {
        /// Pre-populate the form from a saved record file
        #[arg(long)]
        load: Option<std::path::PathBuf>,

        /// Pre-populate the form from a record URL
        #[arg(long)]
        from_url: Option<String>,

        /// Pre-populate via AI annotation (arXiv URL, PDF URL, or PDF path)
        #[arg(long)]
        extract: Option<String>,

        /// Write the finished record here instead of prompting
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Validate a record file against the catalogue rules
    Validate {
        /// Record file to check
        record: std::path::PathBuf,
    },

    /// Publish a record file as a pull request
    Submit {
        /// Record file to publish
        record: std::path::PathBuf,

        /// Show what would happen without touching git or the forge
        #[arg(long)]
        dry_run: bool,

        /// Write the assembled record here instead of publishing
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// GitHub username credited in the pull request
        #[arg(long)]
        user: Option<String>,
    },

    /// Emit the default record template
    Template {
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Check whether a dataset is already in the catalogue
    Lookup {
        /// Dataset name
        name: String,
    },

    /// Show the effective configuration
    Config,

    /// Manage tracked pull requests
    Prs {
        /// Action: list, sync
        #[arg(default_value = "list")]
        action: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }

    // Execute command
    match cli.command {
        Commands::Form { load, from_url, extract, output } => {
            commands::form::run(&settings, &commands::form::FormArgs {
                load,
                from_url,
                extract,
                output,
            })
        }
        Commands::Validate { record } => {
            commands::validate::run(&record)
        }
        Commands::Submit { record, dry_run, save, user } => {
            commands::submit::run(&settings, &commands::submit::SubmitArgs {
                record,
                dry_run,
                save,
                user,
            })
        }
        Commands::Template { output } => {
            commands::template::run(output)
        }
        Commands::Lookup { name } => {
            commands::lookup::run(&settings, &name)
        }
        Commands::Config => {
            commands::config::run(&settings)
        }
        Commands::Prs { action } => {
            commands::prs::run(&settings, &action)
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
