//! Command-line argument definitions for the CBC parser
//!
//! One subcommand per analyzer model, each taking the export file and an
//! optional normal range document.

use crate::app::models::Device;
use crate::app::services::json_writer::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the CBC hematology export parser
///
/// Reads complete blood count exports from Edan and Human hematology
/// analyzers and writes the decoded records to stdout as JSON.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cbc-parser",
    version,
    about = "Decode hematology analyzer CBC exports into JSON",
    long_about = "Decodes complete blood count exports from Edan (comma separated) and \
                  Human (tab separated) hematology analyzers. Each measurement is written \
                  with its value, units, abnormality flag and the normal range it was \
                  judged against."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands, one per analyzer model
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode an Edan comma separated export
    Edan(DecodeArgs),
    /// Decode a Human tab separated export
    Human(DecodeArgs),
}

impl Commands {
    /// Analyzer selected by this subcommand
    pub fn device(&self) -> Device {
        match self {
            Commands::Edan(_) => Device::Edan,
            Commands::Human(_) => Device::Human,
        }
    }

    pub fn args(&self) -> &DecodeArgs {
        match self {
            Commands::Edan(args) | Commands::Human(args) => args,
        }
    }
}

/// Arguments shared by every decode subcommand
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Analyzer export file
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Normal range document (JSON)
    ///
    /// Falls back to CBC_NORMAL_RANGES. Without either, measurements are
    /// decoded with empty flags and zero ranges.
    #[arg(value_name = "NORMAL_RANGES_FILE")]
    pub normal_ranges: Option<PathBuf>,

    /// Decode every data row instead of only the first
    #[arg(short, long)]
    pub multi: bool,

    /// Output format: json or json-indent
    ///
    /// Falls back to CBC_OUTPUT_FORMAT, then to compact json.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl DecodeArgs {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
