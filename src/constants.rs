//! Application constants for the CBC parser
//!
//! This module contains the fixed export schemas of the supported analyzers,
//! flag markers, environment variable names and default values used
//! throughout the parser.

// =============================================================================
// Export Schemas
// =============================================================================

/// Edan analyzer export layout (comma separated, one header row)
pub mod edan {
    /// Exact number of columns in every Edan row
    pub const FIELD_COUNT: usize = 24;

    /// Column delimiter
    pub const DELIMITER: u8 = b',';

    /// Identifier columns
    pub const SAMPLE_ID_COLUMN: usize = 0;
    pub const MODE_COLUMN: usize = 1;
    pub const ANALYSIS_TIME_COLUMN: usize = 2;
}

/// Human analyzer export layout (tab separated, one header row)
pub mod human {
    /// Exact number of columns in every Human row
    pub const FIELD_COUNT: usize = 52;

    /// Column delimiter
    pub const DELIMITER: u8 = b'\t';

    /// Identifier columns
    pub const SAMPLE_ID_COLUMN: usize = 0;
    pub const DATE_COLUMN: usize = 1;
    pub const TIME_COLUMN: usize = 2;
    pub const PATIENT_ID_COLUMN: usize = 3;
    pub const BIRTH_DATE_COLUMN: usize = 4;
    pub const TYPE_COLUMN: usize = 49;
    pub const WARNING_COLUMN: usize = 50;

    /// Sample id the analyzer assigns to control/calibration runs
    pub const BLANK_SAMPLE_ID: &[u8] = b"0";

    /// Marker found in the second-to-last column of control runs
    pub const BLANK_MARKER: &[u8] = b"Blank";
}

/// Minimum number of rows in an export: the header plus one data row
pub const MIN_EXPORT_ROWS: usize = 2;

// =============================================================================
// Units and Flags
// =============================================================================

/// Substitute for invalid byte runs in Edan header text.
///
/// Edan exports write the micro prefix of `µL` in a legacy code page, which
/// is never valid UTF-8.
pub const MICRO_PLACEHOLDER: &str = "μ";

/// Flag for a value below the lower bound of its range
pub const FLAG_LOW: &str = "L";

/// Flag for a value above the upper bound of its range
pub const FLAG_HIGH: &str = "H";

// =============================================================================
// JSON Output
// =============================================================================

/// Indentation for a single record in indented mode
pub const RECORD_INDENT: &[u8] = b"   ";

/// Indentation for a record collection in indented mode
pub const COLLECTION_INDENT: &[u8] = b"\t";

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable naming the normal range document
pub const ENV_NORMAL_RANGES: &str = "CBC_NORMAL_RANGES";

/// Environment variable selecting the output format
pub const ENV_OUTPUT_FORMAT: &str = "CBC_OUTPUT_FORMAT";

/// Log target filter used when RUST_LOG is not set
pub const LOG_TARGET: &str = "cbc_parser";
