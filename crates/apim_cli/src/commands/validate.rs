//! Validate command - Check a configuration file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use apim_creator::ConfigValidator;

use super::load_config;

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the YAML or JSON configuration file
    #[arg(short, long)]
    pub config_file: PathBuf,
}

pub async fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating configuration: {:?}", args.config_file);

    let config = load_config(&args.config_file)?;
    let result = ConfigValidator::validate(&config);

    for warning in &result.warnings {
        println!("   ⚠️  {}", warning);
    }

    if result.valid {
        println!("   ✅ Configuration is valid");
    } else {
        println!("   ❌ Configuration validation failed:");
        for error in &result.errors {
            println!("      - {}", error);
        }
    }

    result.into_result()?;
    Ok(())
}
