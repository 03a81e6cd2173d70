//! Writing generated documents to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CreatorResult;
use crate::generator::GeneratedTemplates;

/// Output file names.
pub struct FileNames;

impl FileNames {
    pub const VERSION_SET: &'static str = "versionset.template.json";
    pub const API: &'static str = "api.template.json";
    pub const MASTER: &'static str = "master.template.json";
    pub const PARAMETERS: &'static str = "master.parameters.json";
}

/// Writes generated documents as pretty-printed JSON.
pub struct FileWriter;

impl FileWriter {
    /// Write every generated file into `output_dir`, creating it if needed.
    pub fn write_all(
        generated: &GeneratedTemplates,
        output_dir: &Path,
    ) -> CreatorResult<Vec<PathBuf>> {
        fs::create_dir_all(output_dir)?;

        let mut written = Vec::with_capacity(generated.files.len());
        for file in &generated.files {
            let path = output_dir.join(&file.file_name);
            debug!("Writing {:?}", path);

            let content = serde_json::to_string_pretty(&file.artifact)?;
            fs::write(&path, content)?;
            written.push(path);
        }

        info!("Wrote {} templates to {:?}", written.len(), output_dir);
        Ok(written)
    }
}
