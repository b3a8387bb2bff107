//! CBC decoders for hematology analyzer exports
//!
//! Each supported analyzer gets its own decoder type producing a record of
//! the common normalized shape. The decoders share the export reader, the
//! field parsers and the declarative column tables; nothing else.
//!
//! ## Architecture
//!
//! - [`reader`] - Delimited export reading and column-count validation
//! - [`field_parsers`] - Numeric parsing, unit extraction, header text repair
//! - [`column_mapping`] - Declarative column-to-field tables per device
//! - [`edan`] - Edan decoder and record
//! - [`human`] - Human decoder and record
//!
//! ## Usage
//!
//! ```rust
//! use cbc_parser::{CbcDecoder, EdanDecoder, NormalRangeTable};
//!
//! # fn example(export: &[u8], ranges: &NormalRangeTable) -> cbc_parser::Result<()> {
//! let records = EdanDecoder::new().decode_many(export, Some(ranges))?;
//! println!("Decoded {} samples", records.len());
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod edan;
pub mod field_parsers;
pub mod human;
pub mod reader;

#[cfg(test)]
pub mod tests;

use crate::Result;
use crate::app::models::NormalRangeTable;
use serde::Serialize;
use std::io::Read;

// Re-export main types for easy access
pub use column_mapping::{EDAN_COLUMNS, EdanColumn, HUMAN_COLUMNS, HumanColumn};
pub use edan::{EdanDecoder, EdanRecord};
pub use human::{HumanDecoder, HumanRecord};
pub use reader::{ExportSchema, ExportTable};

/// Decoding capability shared by every analyzer
///
/// A decoder reads the whole export before returning and either yields
/// fully built records or an error, never a partial result. Passing no
/// range table leaves every range at zero and computes no flags.
pub trait CbcDecoder {
    /// Normalized record produced for one sample row
    type Record: Serialize;

    /// Decode the first data row of the export
    fn decode_one<R: Read>(
        &self,
        source: R,
        normal_ranges: Option<&NormalRangeTable>,
    ) -> Result<Self::Record>;

    /// Decode every accepted data row of the export, in input order
    fn decode_many<R: Read>(
        &self,
        source: R,
        normal_ranges: Option<&NormalRangeTable>,
    ) -> Result<Vec<Self::Record>>;
}
