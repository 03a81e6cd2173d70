//! apim CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "apim_cli=debug,apim_creator=debug,warn"
    } else if cli.quiet {
        "warn"
    } else {
        "apim_cli=info,apim_creator=info,warn"
    };

    // Logging may already be initialized by a test harness
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();

    let result = match cli.command {
        Commands::Create(args) => commands::create::execute(args).await,
        Commands::Validate(args) => commands::validate::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(creator_error) = e.downcast_ref::<apim_creator::CreatorError>() {
        return match creator_error {
            apim_creator::CreatorError::InvalidConfig(_) => ExitCodes::VALIDATION_FAILURE,
            apim_creator::CreatorError::LocationNotFound(_) => ExitCodes::INVALID_ARGS,
            _ => ExitCodes::TEMPLATE_ERROR,
        };
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("validation") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("template") {
        ExitCodes::TEMPLATE_ERROR
    } else if msg.contains("argument") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
