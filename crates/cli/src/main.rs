//! gitpersona command-line tool.
//!
//! Provides the `apply` command that generates a conditional Git
//! configuration overlay for a persona, and the `personas` subcommand group
//! for managing the persona registry.
//!
//! Any failure is rendered as a single `Error: <message>` line on stderr
//! with exit code 1; the messages carry their own trailing period.

mod style;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing_subscriber::EnvFilter;

use gitpersona_core::config::ConfigurationLocator;
use gitpersona_core::overlay::{ConditionalConfig, OverlayRequest};
use gitpersona_core::persona::{Persona, PersonaRegistry};
use gitpersona_core::repository::Repository;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// gitpersona command-line tool.
#[derive(Parser, Debug)]
#[command(
    name = "gitpersona",
    version,
    about = "Directory-scoped Git committer identities via includeIf overlays"
)]
struct Cli {
    /// Path to the persona storage file.
    #[arg(long, global = true)]
    personas_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a conditional configuration dotfile for a persona and add a
    /// matching includeIf to the global Git configuration.
    Apply {
        /// The persona alias to set in the conditional configuration.
        alias: String,

        /// The name of the conditional configuration dotfile to create.
        /// Used verbatim; a leading `.` is not added for you.
        configuration_name: String,

        /// The directory of the Git repository. Defaults to the current
        /// working directory.
        directory: Option<PathBuf>,

        /// Create a global Git config file when not present.
        #[arg(short, long)]
        create_global_config: bool,
    },

    /// Manage the persona registry.
    Personas {
        #[command(subcommand)]
        action: PersonasAction,
    },
}

#[derive(Subcommand, Debug)]
enum PersonasAction {
    /// List all personas, most used first.
    List,
    /// Add a persona.
    Add {
        /// Unique persona alias.
        alias: String,
        /// Committer name.
        name: String,
        /// Committer email.
        email: String,
    },
    /// Remove a persona by alias.
    Remove {
        /// Persona alias.
        alias: String,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // Minimal logging for CLI
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let storage = storage_path(cli.personas_file)?;

    match cli.command {
        Commands::Apply {
            alias,
            configuration_name,
            directory,
            create_global_config,
        } => cmd_apply(
            &storage,
            &alias,
            &configuration_name,
            directory,
            create_global_config,
        ),
        Commands::Personas { action } => match action {
            PersonasAction::List => cmd_personas_list(&storage),
            PersonasAction::Add { alias, name, email } => {
                cmd_personas_add(&storage, alias, name, email)
            }
            PersonasAction::Remove { alias } => cmd_personas_remove(&storage, &alias),
        },
    }
}

fn storage_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => PersonaRegistry::default_storage_path()
            .ok_or_else(|| anyhow!("The home directory could not be determined.")),
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_apply(
    storage: &PathBuf,
    alias: &str,
    configuration_name: &str,
    directory: Option<PathBuf>,
    create_global_config: bool,
) -> Result<()> {
    let directory = match directory {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to determine the working directory")?,
    };
    let repository = Repository::open(directory)?;

    let mut registry = PersonaRegistry::load(storage)?;
    let locator = ConfigurationLocator::from_env()?;

    let request = OverlayRequest {
        alias,
        configuration_name,
        directory: repository.directory(),
        create_global_config,
    };
    let outcome = ConditionalConfig::new(&mut registry, &locator).apply(&request)?;

    println!(
        "{}",
        style::success(&format!(
            "Created conditional configuration {} for persona {} in {}.",
            style::emphasize(&outcome.dotfile.display().to_string()),
            style::emphasize(alias),
            style::emphasize(&outcome.global_configuration.display().to_string()),
        ))
    );

    Ok(())
}

fn cmd_personas_list(storage: &PathBuf) -> Result<()> {
    let registry = PersonaRegistry::load(storage)?;

    if registry.is_empty() {
        println!("{}", style::dim("No personas defined yet."));
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Alias", "Name", "Email", "Usage"]);
    for persona in registry.ranked() {
        table.add_row([
            persona.alias.clone(),
            persona.name.clone(),
            persona.email.clone(),
            persona.usage_frequency.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn cmd_personas_add(storage: &PathBuf, alias: String, name: String, email: String) -> Result<()> {
    let mut registry = PersonaRegistry::load(storage)?;
    let shown = alias.clone();
    registry.add(Persona::new(alias, name, email))?;
    registry.save()?;

    println!(
        "{}",
        style::success(&format!("Added persona {}.", style::emphasize(&shown)))
    );
    Ok(())
}

fn cmd_personas_remove(storage: &PathBuf, alias: &str) -> Result<()> {
    let mut registry = PersonaRegistry::load(storage)?;
    let removed = registry.remove(alias)?;
    registry.save()?;

    println!(
        "{}",
        style::success(&format!(
            "Removed persona {}.",
            style::emphasize(&removed.alias)
        ))
    );
    Ok(())
}
