//! CBC Parser Library
//!
//! A Rust library for converting the delimited text exports of hematology
//! analyzers into normalized Complete Blood Count (CBC) records.
//!
//! This library provides tools for:
//! - Decoding Edan exports (comma separated, 24 columns, units in parentheses)
//! - Decoding Human exports (tab separated, 52 columns, device-reported flags)
//! - Loading reference range tables and flagging out-of-range measurements
//! - Writing records and record collections as compact or indented JSON

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod cbc_decoder;
        pub mod json_writer;
        pub mod normal_ranges;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Device, Measurement, NormalRangeTable, Range, RangeFlag, RangeKey};
pub use app::services::cbc_decoder::{
    CbcDecoder, EdanDecoder, EdanRecord, HumanDecoder, HumanRecord,
};
pub use app::services::json_writer::{OutputFormat, WriteJson};
pub use config::Config;

/// Result type alias for CBC decoding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for CBC decoding operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Malformed delimiting or quoting, or a column count mismatch
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// The export holds no data row after the header
    #[error("Insufficient rows: expected a header and at least one data row, found {found} row(s)")]
    InsufficientRows { found: usize },

    /// Single-record decode hit a control/calibration row
    #[error("CBC record was a blank (sample id '{sample_id}')")]
    BlankRecord { sample_id: String },

    /// Unrecognized serialization mode selector
    #[error("Invalid output format: '{format}' (expected 'json' or 'json-indent')")]
    InvalidOutputFormat { format: String },

    /// Reference range document could not be read
    #[error("Normal range error: {message}")]
    NormalRanges {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization failed
    #[error("JSON serialization error: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an invalid input error with optional CSV context
    pub fn invalid_input(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            source,
        }
    }

    /// Create an insufficient rows error
    pub fn insufficient_rows(found: usize) -> Self {
        Self::InsufficientRows { found }
    }

    /// Create a blank record error
    pub fn blank_record(sample_id: impl Into<String>) -> Self {
        Self::BlankRecord {
            sample_id: sample_id.into(),
        }
    }

    /// Create an invalid output format error
    pub fn invalid_output_format(format: impl Into<String>) -> Self {
        Self::InvalidOutputFormat {
            format: format.into(),
        }
    }

    /// Create a normal range document error
    pub fn normal_ranges(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::NormalRanges {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::InvalidInput {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error }
    }
}
