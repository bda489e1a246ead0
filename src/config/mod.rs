#[cfg(feature = "cli")]
pub mod cli;

use std::path::Path;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{ReportError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// `deck.json` → `deck.pptx`, in the same directory.
pub fn derive_output_path(input_path: &str) -> String {
    Path::new(input_path)
        .with_extension("pptx")
        .to_string_lossy()
        .into_owned()
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "deckgen")]
#[command(about = "Generate a PowerPoint presentation from a JSON deck description")]
pub struct CliConfig {
    /// JSON file describing the slides
    pub config_file: String,

    /// Output file (defaults to the input path with a .pptx extension)
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.config_file
    }

    fn output_path(&self) -> String {
        match &self.output {
            Some(output) => output.clone(),
            None => derive_output_path(&self.config_file),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config_file", &self.config_file)?;

        let output = self.output_path();
        validate_path("output", &output)?;
        validate_file_extensions("output", std::slice::from_ref(&output), &["pptx"])?;

        if Path::new(&output) == Path::new(&self.config_file) {
            return Err(ReportError::InvalidConfigValueError {
                field: "output".to_string(),
                value: output,
                reason: "Output would overwrite the configuration file".to_string(),
            });
        }

        Ok(())
    }
}
