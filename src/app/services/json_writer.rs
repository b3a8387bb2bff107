//! JSON output for decoded CBC records
//!
//! Records and record collections serialize either compactly or indented.
//! Indentation follows the established output of the parser: three spaces
//! for a single record, a tab for a collection.

use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::app::services::cbc_decoder::{EdanRecord, HumanRecord};
use crate::constants::{COLLECTION_INDENT, RECORD_INDENT};
use crate::{Error, Result};

/// Serialization mode for decoded records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON without whitespace
    #[default]
    Json,
    /// Indented JSON for human inspection
    JsonIndent,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::JsonIndent => "json-indent",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "json-indent" => Ok(OutputFormat::JsonIndent),
            _ => Err(Error::invalid_output_format(s)),
        }
    }
}

/// JSON serialization of decoded records
pub trait WriteJson: Serialize {
    /// Indentation used in [`OutputFormat::JsonIndent`]
    const INDENT: &'static [u8] = RECORD_INDENT;

    /// Write the JSON representation to `out`
    fn write_json<W: Write>(&self, out: W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => {
                let mut serializer = Serializer::with_formatter(out, CompactFormatter);
                self.serialize(&mut serializer)?;
            }
            OutputFormat::JsonIndent => {
                let formatter = PrettyFormatter::with_indent(Self::INDENT);
                let mut serializer = Serializer::with_formatter(out, formatter);
                self.serialize(&mut serializer)?;
            }
        }
        Ok(())
    }

    /// JSON representation as bytes
    fn to_json_vec(&self, format: OutputFormat) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer, format)?;
        Ok(buffer)
    }
}

impl WriteJson for EdanRecord {}

impl WriteJson for HumanRecord {}

impl<T: WriteJson> WriteJson for [T] {
    const INDENT: &'static [u8] = COLLECTION_INDENT;
}

impl<T: WriteJson> WriteJson for Vec<T> {
    const INDENT: &'static [u8] = COLLECTION_INDENT;
}
