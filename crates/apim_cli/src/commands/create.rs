//! Create command - Generate deployment templates.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use apim_creator::{ConfigValidator, FileReader, FileWriter, TemplateGenerator};

use super::load_config;

#[derive(Args)]
pub struct CreateArgs {
    /// Path to the YAML or JSON configuration file
    #[arg(short, long)]
    pub config_file: PathBuf,

    /// Override the configured output location
    #[arg(short, long)]
    pub output_location: Option<PathBuf>,

    /// Generate templates without writing them
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn execute(args: CreateArgs) -> Result<()> {
    info!("Creating templates from {:?}", args.config_file);

    let mut config = load_config(&args.config_file)?;
    if let Some(output) = &args.output_location {
        config.output_location = Some(output.to_string_lossy().into_owned());
    }

    let validation = if args.dry_run {
        ConfigValidator::validate_generation(&config)
    } else {
        ConfigValidator::validate(&config)
    };
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    validation.into_result()?;

    let generator = TemplateGenerator::new(Arc::new(FileReader::new()));
    let generated = generator
        .generate(&config)
        .await
        .context("Template generation failed")?;

    if args.dry_run {
        println!("📋 Dry run, templates not written:");
        for name in generated.file_names() {
            println!("   - {}", name);
        }
        return Ok(());
    }

    let output_dir = config
        .output_location
        .as_deref()
        .map(PathBuf::from)
        .context("outputLocation argument is required")?;

    let written = FileWriter::write_all(&generated, &output_dir)
        .with_context(|| format!("Failed to write templates to {}", output_dir.display()))?;

    println!("✅ Generated {} files in {}", written.len(), output_dir.display());
    for path in &written {
        println!("   - {}", path.display());
    }
    Ok(())
}
