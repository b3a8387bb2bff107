//! Human analyzer decoder
//!
//! Human exports are tab separated with 52 columns: five identifiers, 22
//! interleaved value/flag pairs, the sample type, a warning and a trailing
//! empty column.
//!
//! ```text
//! Sample ID  Date  Time  Patient ID  Birth date  WBC 10^9/l  WBC flag  LYM 10^9/l  LYM flag ...
//! ... P-LCR %  P-LCR flag  Type  Warning
//! ```
//!
//! Units follow the single space in each value header. Flags are copied
//! from the export as reported by the device.

use csv::ByteRecord;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

use super::CbcDecoder;
use super::column_mapping::{HUMAN_COLUMNS, HumanColumn};
use super::field_parsers::{extract_spaced_units, parse_reported_flag, parse_value};
use super::reader::{ExportSchema, ExportTable, cell, cell_text, read_export};
use crate::app::models::{Measurement, NormalRangeTable};
use crate::constants::human;
use crate::{Error, Result};

/// Shape of a Human export
pub const HUMAN_SCHEMA: ExportSchema = ExportSchema {
    device: "Human",
    delimiter: human::DELIMITER,
    field_count: human::FIELD_COUNT,
};

/// CBC record decoded from one Human export row
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct HumanRecord {
    pub sample_id: String,
    pub date: String,
    pub time: String,
    pub patient_id: String,
    pub birth_date: String,

    pub wbc: Measurement,
    pub lym: Measurement,
    pub mid: Measurement,
    pub gra: Measurement,
    pub lym_percent: Measurement,
    pub mid_percent: Measurement,
    pub gra_percent: Measurement,
    pub rbc: Measurement,
    pub hgb: Measurement,
    pub hct: Measurement,
    pub mcv: Measurement,
    pub mch: Measurement,
    pub mchc: Measurement,
    pub rdw_s: Measurement,
    pub rdw_c: Measurement,
    pub plt: Measurement,
    pub pct: Measurement,
    pub mpv: Measurement,
    pub pdw_s: Measurement,
    pub pdw_c: Measurement,
    pub plcc: Measurement,
    pub plcr: Measurement,

    #[serde(rename = "type")]
    pub sample_type: String,
    pub warning: String,
}

/// Decoder for Human exports
///
/// Control runs are rejected with [`Error::BlankRecord`] by
/// [`decode_one`](CbcDecoder::decode_one) and silently dropped by
/// [`decode_many`](CbcDecoder::decode_many).
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanDecoder;

impl HumanDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl CbcDecoder for HumanDecoder {
    type Record = HumanRecord;

    fn decode_one<R: Read>(
        &self,
        source: R,
        normal_ranges: Option<&NormalRangeTable>,
    ) -> Result<HumanRecord> {
        let table = read_export(source, &HUMAN_SCHEMA)?;
        let row = table
            .first_row()
            .ok_or_else(|| Error::insufficient_rows(1))?;

        if is_blank_row(row) {
            return Err(Error::blank_record(cell_text(
                row,
                human::SAMPLE_ID_COLUMN,
            )));
        }

        Ok(decode_row(&table.header, row, normal_ranges))
    }

    fn decode_many<R: Read>(
        &self,
        source: R,
        normal_ranges: Option<&NormalRangeTable>,
    ) -> Result<Vec<HumanRecord>> {
        let ExportTable { header, rows } = read_export(source, &HUMAN_SCHEMA)?;

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            if is_blank_row(row) {
                debug!(
                    "Skipping blank Human row {} (sample id '{}')",
                    index + 2,
                    cell_text(row, human::SAMPLE_ID_COLUMN)
                );
                continue;
            }
            records.push(decode_row(&header, row, normal_ranges));
        }

        debug!(
            "Decoded {} Human record(s), skipped {} blank row(s)",
            records.len(),
            rows.len() - records.len()
        );
        Ok(records)
    }
}

/// Whether a data row is a control/calibration run
///
/// Either the sample id is `0` or the second-to-last column reads `Blank`.
pub fn is_blank_row(row: &ByteRecord) -> bool {
    if cell(row, human::SAMPLE_ID_COLUMN) == human::BLANK_SAMPLE_ID {
        return true;
    }

    row.len()
        .checked_sub(2)
        .is_some_and(|index| cell(row, index) == human::BLANK_MARKER)
}

/// Build the record for one data row
fn decode_row(
    header: &ByteRecord,
    row: &ByteRecord,
    normal_ranges: Option<&NormalRangeTable>,
) -> HumanRecord {
    let [
        wbc,
        lym,
        mid,
        gra,
        lym_percent,
        mid_percent,
        gra_percent,
        rbc,
        hgb,
        hct,
        mcv,
        mch,
        mchc,
        rdw_s,
        rdw_c,
        plt,
        pct,
        mpv,
        pdw_s,
        pdw_c,
        plcc,
        plcr,
    ] = HUMAN_COLUMNS.map(|column| decode_measurement(&column, header, row, normal_ranges));

    HumanRecord {
        sample_id: cell_text(row, human::SAMPLE_ID_COLUMN).into_owned(),
        date: cell_text(row, human::DATE_COLUMN).into_owned(),
        time: cell_text(row, human::TIME_COLUMN).into_owned(),
        patient_id: cell_text(row, human::PATIENT_ID_COLUMN).into_owned(),
        birth_date: cell_text(row, human::BIRTH_DATE_COLUMN).into_owned(),
        wbc,
        lym,
        mid,
        gra,
        lym_percent,
        mid_percent,
        gra_percent,
        rbc,
        hgb,
        hct,
        mcv,
        mch,
        mchc,
        rdw_s,
        rdw_c,
        plt,
        pct,
        mpv,
        pdw_s,
        pdw_c,
        plcc,
        plcr,
        sample_type: cell_text(row, human::TYPE_COLUMN).into_owned(),
        warning: cell_text(row, human::WARNING_COLUMN).into_owned(),
    }
}

/// Decode one measurement with its device-reported flag
fn decode_measurement(
    column: &HumanColumn,
    header: &ByteRecord,
    row: &ByteRecord,
    normal_ranges: Option<&NormalRangeTable>,
) -> Measurement {
    let measurement = Measurement::new(
        parse_value(&cell_text(row, column.value_index)),
        extract_spaced_units(&cell_text(header, column.value_index)),
    )
    .with_flag(parse_reported_flag(&cell_text(row, column.flag_index)));

    match normal_ranges {
        Some(table) => measurement.with_range(table.get(column.range)),
        None => measurement,
    }
}
