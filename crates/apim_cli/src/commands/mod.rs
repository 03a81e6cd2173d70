//! CLI command definitions.
//!
//! Each subcommand maps to one step of the template workflow.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use apim_creator::CreatorConfig;

pub mod create;
pub mod validate;

/// apim - API Management deployment template creator
#[derive(Parser)]
#[command(name = "apim")]
#[command(version, about = "Generate API Management deployment templates")]
#[command(long_about = r#"
apim turns an API configuration file (YAML or JSON) into deployment
templates for API Management.

WORKFLOWS:
  create    → Generate templates (linked or single file)
  validate  → Check a configuration file without generating

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate deployment templates from a configuration file
    Create(create::CreateArgs),

    /// Validate a configuration file
    Validate(validate::ValidateArgs),
}

/// Load a configuration file and resolve its relative locations against
/// the file's directory.
pub fn load_config(path: &Path) -> Result<CreatorConfig> {
    let mut config = CreatorConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(base_dir);
    Ok(config)
}
