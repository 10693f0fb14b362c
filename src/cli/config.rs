//! Config command implementation
//!
//! Utilities for validating and inspecting configuration.

use clap::{Parser, Subcommand};

use rfclient::settings::Settings;

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the settings file
    Validate,
    /// Dump effective configuration to stdout
    Dump {
        /// Syntax to dump: json or toml
        #[arg(default_value = "json", value_parser = ["json", "toml"])]
        syntax: String,
    },
    /// Show configuration file paths
    Path,
    /// Write the effective configuration to the settings file
    Init {
        /// Replace an existing settings file
        #[arg(long)]
        force: bool,
    },
}

/// Run the config command
pub fn run(args: ConfigArgs, settings: &Settings) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Validate => validate_config(),
        ConfigCommand::Dump { syntax } => dump_config(settings, &syntax),
        ConfigCommand::Path => show_paths(),
        ConfigCommand::Init { force } => init_config(settings, force),
    }
}

fn validate_config() -> anyhow::Result<()> {
    print!("Checking settings.json... ");
    let path = match Settings::settings_path() {
        Some(path) => path,
        None => {
            println!("ERROR");
            anyhow::bail!("Could not determine config path");
        }
    };

    if !path.exists() {
        println!("NOT FOUND (using defaults)");
        return Ok(());
    }

    match Settings::load_from(&path) {
        Ok(settings) => {
            println!("OK");
            if settings.batch.attempts == 0 {
                println!("Warnings:");
                println!("  - batch.attempts is 0; jobs will never run");
            }
            println!();
            println!("Configuration is valid.");
            Ok(())
        }
        Err(e) => {
            println!("INVALID");
            anyhow::bail!("settings.json: {}", e)
        }
    }
}

fn dump_config(settings: &Settings, syntax: &str) -> anyhow::Result<()> {
    match syntax {
        "toml" => println!("{}", toml::to_string_pretty(settings)?),
        _ => println!("{}", serde_json::to_string_pretty(settings)?),
    }
    Ok(())
}

fn init_config(settings: &Settings, force: bool) -> anyhow::Result<()> {
    if let Some(path) = Settings::settings_path() {
        if path.exists() && !force {
            anyhow::bail!("{} already exists (use --force to replace it)", path.display());
        }
    }

    settings.save()?;
    if let Some(path) = Settings::settings_path() {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Configuration paths:");

    match Settings::settings_path() {
        Some(path) => {
            let exists = if path.exists() { "" } else { " (not found)" };
            println!("  Settings: {}{}", path.display(), exists);
        }
        None => println!("  Settings: (could not determine path)"),
    }

    Ok(())
}
