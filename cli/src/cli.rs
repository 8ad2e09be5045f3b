//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;
use crate::driver::OutputFormat;

/// Find the most common way gardeners on Growstuff grow a crop
#[derive(Parser, Debug, Default)]
#[command(name = "growrecs", version)]
pub struct Cli {
    /// Crop to look up, e.g. `sweet corn`. Prompts interactively when omitted.
    #[arg(value_name = "CROP")]
    pub crop: Vec<String>,

    /// Growstuff base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Failed lookups allowed before the prompt gives up
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Read the crop document from a JSON file instead of the API (requires CROP)
    #[arg(long, value_name = "PATH", requires = "crop")]
    pub from_file: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Crop name from the positional words, trimmed, if any were given.
    ///
    /// Words that are all whitespace still select one-shot mode and come back
    /// as an empty name, which the driver rejects before any lookup.
    pub fn crop_name(&self) -> Option<String> {
        if self.crop.is_empty() {
            None
        } else {
            Some(self.crop.join(" ").trim().to_string())
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Apply command-line overrides on top of loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.api.timeout_secs = timeout_secs;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.driver.max_attempts = max_attempts;
        }
        match self.verbose {
            0 => {}
            1 => config.log.filter = "growrecs=debug,growing_recs=debug".to_string(),
            _ => config.log.filter = "growrecs=trace,growing_recs=trace".to_string(),
        }
    }
}
