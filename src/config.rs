//! Configuration management and validation.
//!
//! A run is configured in layers: built-in defaults, then environment
//! variables, then explicit command line values. The resulting [`Config`]
//! is validated before any file is opened for decoding.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::models::Device;
use crate::app::services::json_writer::OutputFormat;
use crate::constants::{ENV_NORMAL_RANGES, ENV_OUTPUT_FORMAT};
use crate::{Error, Result};

/// Configuration for a single decode run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Analyzer that produced the export
    pub device: Device,

    /// Export file to decode
    pub input_path: PathBuf,

    /// Normal range document; decoding proceeds without ranges when absent
    pub normal_ranges_path: Option<PathBuf>,

    /// JSON serialization mode
    pub output_format: OutputFormat,

    /// Decode every data row instead of only the first
    pub multi_record: bool,
}

impl Config {
    /// Create a configuration with defaults for everything but the input
    pub fn new(device: Device, input_path: impl Into<PathBuf>) -> Self {
        Self {
            device,
            input_path: input_path.into(),
            normal_ranges_path: None,
            output_format: OutputFormat::default(),
            multi_record: false,
        }
    }

    pub fn with_normal_ranges(mut self, path: impl Into<PathBuf>) -> Self {
        self.normal_ranges_path = Some(path.into());
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_multi_record(mut self, multi_record: bool) -> Self {
        self.multi_record = multi_record;
        self
    }

    /// Apply settings from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply settings from an environment lookup
    ///
    /// `CBC_NORMAL_RANGES` names the range document and `CBC_OUTPUT_FORMAT`
    /// selects the output format. Empty values are ignored.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_NORMAL_RANGES).filter(|v| !v.trim().is_empty()) {
            debug!("{} set to {}", ENV_NORMAL_RANGES, path);
            self.normal_ranges_path = Some(PathBuf::from(path));
        }

        if let Some(format) = lookup(ENV_OUTPUT_FORMAT).filter(|v| !v.trim().is_empty()) {
            debug!("{} set to {}", ENV_OUTPUT_FORMAT, format);
            self.output_format = format.parse()?;
        }

        Ok(self)
    }

    /// Build a configuration from defaults, the environment and explicit values
    ///
    /// Explicit values override the environment.
    pub fn load_layered(
        device: Device,
        input_path: PathBuf,
        normal_ranges_path: Option<PathBuf>,
        output_format: Option<OutputFormat>,
        multi_record: bool,
    ) -> Result<Self> {
        let mut config = Config::new(device, input_path)
            .with_multi_record(multi_record)
            .apply_env()?;

        if let Some(path) = normal_ranges_path {
            config.normal_ranges_path = Some(path);
        }
        if let Some(format) = output_format {
            config.output_format = format;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate that every referenced file exists
    pub fn validate(&self) -> Result<()> {
        validate_file(&self.input_path, "Input file")?;

        if let Some(path) = &self.normal_ranges_path {
            validate_file(path, "Normal range file")?;
        }

        Ok(())
    }
}

fn validate_file(path: &Path, description: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::configuration(format!(
            "{} does not exist: {}",
            description,
            path.display()
        )));
    }

    if !path.is_file() {
        return Err(Error::configuration(format!(
            "{} is not a file: {}",
            description,
            path.display()
        )));
    }

    Ok(())
}
