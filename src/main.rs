//! rfclient - command-line access to the Raster Foundry API
//!
//! Lists projects, map tokens, scenes and datasources, and prepares
//! training data jobs from project imagery and annotations.

mod cli;

use clap::Parser;
use cli::{exit_codes, Cli, Commands, Context};
use rfclient::{logging, ClientError};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output, cli.log_level.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            return exit_codes::UNEXPECTED_FAILURE;
        }
    };

    let ctx = Context::from_cli(&cli);
    let result = rt.block_on(async {
        match cli.command {
            Commands::Projects => cli::list::projects(&ctx).await,
            Commands::MapTokens => cli::list::map_tokens(&ctx).await,
            Commands::Scenes(args) => cli::list::scenes(&ctx, args).await,
            Commands::Datasources(args) => cli::list::datasources(&ctx, args).await,
            Commands::ProjectConfigs(args) => cli::train::project_configs(&ctx, args).await,
            Commands::PrepTrainData(args) => cli::train::prep_train_data(&ctx, args).await,
            Commands::Config(args) => cli::config::run(args, &ctx.settings),
        }
    });

    match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            categorize_error(&e)
        }
    }
}

/// Categorize an error into the appropriate exit code
fn categorize_error(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<ClientError>() {
        Some(err) if err.is_auth() => exit_codes::AUTH_FAILURE,
        Some(err) if err.is_validation() => exit_codes::INVALID_INPUT,
        Some(ClientError::NotFound { .. }) => exit_codes::NOT_FOUND,
        _ => exit_codes::UNEXPECTED_FAILURE,
    }
}
