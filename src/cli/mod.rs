//! CLI module - command-line interface
//!
//! - `rfclient projects` / `map-tokens` - list resources
//! - `rfclient scenes` / `datasources` - raw filtered listings
//! - `rfclient project-configs` - print a training manifest
//! - `rfclient prep-train-data` - upload a manifest and build the prep job
//! - `rfclient config` - inspect settings

pub mod config;
pub mod list;
pub mod train;

use clap::{Parser, Subcommand};
use serde::Serialize;

use rfclient::session::{Credentials, Session};
use rfclient::settings::Settings;
use rfclient::ClientError;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const AUTH_FAILURE: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("RFCLIENT_GIT_COMMIT"),
    " ",
    env!("RFCLIENT_BUILD_DATE"),
    ")"
);

/// rfclient - work with Raster Foundry projects and training jobs
#[derive(Parser, Debug)]
#[command(name = "rfclient")]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit machine-readable logs (JSON) to stderr
    #[arg(long = "json-output", global = true)]
    pub json_output: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", global = true, value_parser = ["trace", "verbose", "debug", "info", "warning", "warn", "error", "critical"])]
    pub log_level: Option<String>,

    /// Refresh token exchanged for an API token
    #[arg(long = "refresh-token", env = "RF_REFRESH_TOKEN", global = true, hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// API token used directly (takes precedence over --refresh-token)
    #[arg(long = "api-token", env = "RF_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// API host (overrides settings)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// URL scheme (overrides settings)
    #[arg(long, global = true, value_parser = ["http", "https"])]
    pub scheme: Option<String>,

    /// Output format: text or json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every project you can access
    Projects,

    /// List every map token you can access
    MapTokens,

    /// Query scenes with optional filters
    Scenes(list::ScenesArgs),

    /// Query datasources with optional filters
    Datasources(list::DatasourcesArgs),

    /// Print the training manifest for paired projects and annotations
    ProjectConfigs(train::ProjectConfigsArgs),

    /// Upload a training manifest and build the prep_train_data job
    PrepTrainData(train::PrepTrainDataArgs),

    /// Inspect and validate configuration
    Config(config::ConfigArgs),
}

/// Output format enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use 'text' or 'json'", s)),
        }
    }
}

/// State shared by every API command
pub struct Context {
    pub settings: Settings,
    pub format: OutputFormat,
    refresh_token: Option<String>,
    api_token: Option<String>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            settings: Settings::load().with_overrides(cli.host.clone(), cli.scheme.clone()),
            format: cli.format,
            refresh_token: cli.refresh_token.clone(),
            api_token: cli.api_token.clone(),
        }
    }

    /// Open an authenticated session; fails before any request without credentials
    pub async fn connect(&self) -> Result<Session, ClientError> {
        let credentials = Credentials::resolve(self.refresh_token.clone(), self.api_token.clone())?;
        Session::connect_with_timeout(self.settings.endpoint(), credentials, self.settings.request_timeout()).await
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a `key=value` pair
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=value: empty key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(parse_key_val("datasource=abc"), Ok(("datasource".to_string(), "abc".to_string())));
        assert_eq!(parse_key_val("q=a=b"), Ok(("q".to_string(), "a=b".to_string())));
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_prep_train_data_args() {
        let cli = Cli::try_parse_from([
            "rfclient",
            "--api-token",
            "tok",
            "prep-train-data",
            "--project-id",
            "p1",
            "--project-id",
            "p2",
            "--annotation-uri",
            "a1",
            "--annotation-uri",
            "a2",
            "--output-zip-uri",
            "o.zip",
            "--label-map-uri",
            "l.json",
            "--channel-order",
            "2",
            "1",
            "0",
            "--allow-partial",
        ])
        .unwrap();

        match cli.command {
            Commands::PrepTrainData(args) => {
                assert_eq!(args.project_ids, vec!["p1", "p2"]);
                assert_eq!(args.channel_order, Some(vec![2, 1, 0]));
                let options = args.options().unwrap();
                assert!(!options.no_partial);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_init_args() {
        let cli = Cli::try_parse_from(["rfclient", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(args) => {
                assert!(matches!(args.command, config::ConfigCommand::Init { force: true }));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
