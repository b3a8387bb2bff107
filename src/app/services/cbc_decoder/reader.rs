//! Export reading and schema validation
//!
//! Analyzer exports are validated purely by shape: every row must carry
//! exactly the device's column count and there must be a data row after the
//! header. Column names are never checked; position is the only contract.

use csv::ByteRecord;
use std::borrow::Cow;
use std::io::Read;
use tracing::{debug, trace};

use crate::constants::MIN_EXPORT_ROWS;
use crate::{Error, Result};

/// Fixed shape of a device export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSchema {
    /// Device name used in error messages
    pub device: &'static str,
    /// Column delimiter byte
    pub delimiter: u8,
    /// Exact number of columns per row
    pub field_count: usize,
}

/// A validated export: the header row and at least one data row
///
/// Cells are kept as raw bytes; header text from some analyzers is not
/// valid UTF-8.
#[derive(Debug, Clone)]
pub struct ExportTable {
    pub header: ByteRecord,
    pub rows: Vec<ByteRecord>,
}

impl ExportTable {
    /// The first data row
    pub fn first_row(&self) -> Option<&ByteRecord> {
        self.rows.first()
    }
}

/// Read an entire export and validate its shape against the schema
pub fn read_export<R: Read>(mut source: R, schema: &ExportSchema) -> Result<ExportTable> {
    let mut data = Vec::new();
    source
        .read_to_end(&mut data)
        .map_err(|e| Error::io(format!("Failed to read {} export", schema.device), e))?;

    check_quoting(&data, schema)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(schema.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut records = Vec::new();
    for (index, result) in csv_reader.byte_records().enumerate() {
        let record = result.map_err(|e| {
            Error::invalid_input(
                format!("{} export row {} could not be read", schema.device, index + 1),
                Some(e),
            )
        })?;

        if record.len() != schema.field_count {
            return Err(Error::invalid_input(
                format!(
                    "{} export row {} has {} columns, expected {}",
                    schema.device,
                    index + 1,
                    record.len(),
                    schema.field_count
                ),
                None,
            ));
        }

        trace!("Read {} row {}", schema.device, index + 1);
        records.push(record);
    }

    if records.len() < MIN_EXPORT_ROWS {
        return Err(Error::insufficient_rows(records.len()));
    }

    let mut records = records.into_iter();
    let header = records
        .next()
        .ok_or_else(|| Error::insufficient_rows(0))?;
    let rows: Vec<ByteRecord> = records.collect();

    debug!(
        "Read {} export with {} data row(s)",
        schema.device,
        rows.len()
    );

    Ok(ExportTable { header, rows })
}

/// Reject quoting the csv reader would otherwise tolerate
///
/// A quote may only open a field, a closing quote must be followed by the
/// delimiter or the end of the line, and every quoted field must be closed.
/// A doubled quote inside a quoted field is an escaped quote.
fn check_quoting(data: &[u8], schema: &ExportSchema) -> Result<()> {
    let quote_error = |line: usize, problem: &str| {
        Error::invalid_input(
            format!("{} export line {}: {}", schema.device, line, problem),
            None,
        )
    };

    let mut line = 1;
    let mut at_field_start = true;
    let mut in_quotes = false;
    let mut bytes = data.iter().copied().peekable();

    while let Some(byte) = bytes.next() {
        if in_quotes {
            match byte {
                b'"' if bytes.peek() == Some(&b'"') => {
                    bytes.next();
                }
                b'"' => {
                    in_quotes = false;
                    match bytes.peek().copied() {
                        None | Some(b'\n') | Some(b'\r') => {}
                        Some(next) if next == schema.delimiter => {}
                        Some(_) => return Err(quote_error(line, "text after closing quote")),
                    }
                }
                b'\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            b'"' => return Err(quote_error(line, "bare quote in unquoted field")),
            b'\n' => {
                line += 1;
                at_field_start = true;
            }
            b'\r' => at_field_start = true,
            other if other == schema.delimiter => at_field_start = true,
            _ => at_field_start = false,
        }
    }

    if in_quotes {
        return Err(quote_error(line, "quoted field is never closed"));
    }

    Ok(())
}

/// Raw bytes of a cell, empty when the column does not exist
pub fn cell(record: &ByteRecord, index: usize) -> &[u8] {
    record.get(index).unwrap_or_default()
}

/// Text of a cell, with invalid UTF-8 replaced by U+FFFD
pub fn cell_text(record: &ByteRecord, index: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(cell(record, index))
}
