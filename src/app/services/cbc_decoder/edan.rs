//! Edan analyzer decoder
//!
//! Edan exports are comma separated with 24 columns:
//!
//! ```text
//! Sample ID,Mode,Analysis Time,WBC(10^3/µL),LYM#(10^3/µL),LYM%(%),MXD#(),MXD%(),
//! NEUT#(),NEUT%(),RBC(10^6/µL),HGB(g/dL),HCT(%),MCV(fL),MCH(pg),MCHC(g/dL),
//! RDW_CV(%),RDW_SD(fL),PLT(10^3/µL),PDW(fL),MPV(fL),PCT(%),P_LCR(%),P_LCC(10^3/µL)
//! ```
//!
//! Units come from the parenthesized part of each header cell. Flags are
//! computed from the normal range table, the device reports none.

use csv::ByteRecord;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

use super::CbcDecoder;
use super::column_mapping::{EDAN_COLUMNS, EdanColumn};
use super::field_parsers::{extract_parenthesized_units, parse_value};
use super::reader::{ExportSchema, ExportTable, cell, cell_text, read_export};
use crate::app::models::{Measurement, NormalRangeTable};
use crate::constants::edan;
use crate::{Error, Result};

/// Shape of an Edan export
pub const EDAN_SCHEMA: ExportSchema = ExportSchema {
    device: "Edan",
    delimiter: edan::DELIMITER,
    field_count: edan::FIELD_COUNT,
};

/// CBC record decoded from one Edan export row
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EdanRecord {
    pub sid: String,
    pub mode: String,
    pub analysis_time: String,
    /// Always empty; Edan exports carry no patient id
    pub pid: String,

    pub wbc: Measurement,
    pub lym: Measurement,
    pub lym_percent: Measurement,
    pub mid: Measurement,
    pub mid_percent: Measurement,
    pub gra: Measurement,
    pub gra_percent: Measurement,

    pub rbc: Measurement,
    pub hgb: Measurement,
    pub hct: Measurement,
    pub mcv: Measurement,
    pub mch: Measurement,
    pub mchc: Measurement,
    pub rdw_c: Measurement,
    pub rdw_s: Measurement,

    pub plt: Measurement,
    pub pdw: Measurement,
    pub mpv: Measurement,
    pub pct: Measurement,

    pub plcc: Measurement,
    pub plcr: Measurement,
}

/// Decoder for Edan exports
///
/// Every data row becomes a record; Edan exports have no control rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdanDecoder;

impl EdanDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl CbcDecoder for EdanDecoder {
    type Record = EdanRecord;

    fn decode_one<R: Read>(
        &self,
        source: R,
        normal_ranges: Option<&NormalRangeTable>,
    ) -> Result<EdanRecord> {
        let table = read_export(source, &EDAN_SCHEMA)?;
        let row = table
            .first_row()
            .ok_or_else(|| Error::insufficient_rows(1))?;

        Ok(decode_row(&table.header, row, normal_ranges))
    }

    fn decode_many<R: Read>(
        &self,
        source: R,
        normal_ranges: Option<&NormalRangeTable>,
    ) -> Result<Vec<EdanRecord>> {
        let ExportTable { header, rows } = read_export(source, &EDAN_SCHEMA)?;

        let records: Vec<EdanRecord> = rows
            .iter()
            .map(|row| decode_row(&header, row, normal_ranges))
            .collect();

        debug!("Decoded {} Edan record(s)", records.len());
        Ok(records)
    }
}

/// Build the record for one data row
fn decode_row(
    header: &ByteRecord,
    row: &ByteRecord,
    normal_ranges: Option<&NormalRangeTable>,
) -> EdanRecord {
    let [
        wbc,
        lym,
        lym_percent,
        mid,
        mid_percent,
        gra,
        gra_percent,
        rbc,
        hgb,
        hct,
        mcv,
        mch,
        mchc,
        rdw_c,
        rdw_s,
        plt,
        pdw,
        mpv,
        pct,
        plcc,
        plcr,
    ] = EDAN_COLUMNS.map(|column| decode_measurement(&column, header, row, normal_ranges));

    EdanRecord {
        sid: cell_text(row, edan::SAMPLE_ID_COLUMN).into_owned(),
        mode: cell_text(row, edan::MODE_COLUMN).into_owned(),
        analysis_time: cell_text(row, edan::ANALYSIS_TIME_COLUMN).into_owned(),
        pid: String::new(),
        wbc,
        lym,
        lym_percent,
        mid,
        mid_percent,
        gra,
        gra_percent,
        rbc,
        hgb,
        hct,
        mcv,
        mch,
        mchc,
        rdw_c,
        rdw_s,
        plt,
        pdw,
        mpv,
        pct,
        plcc,
        plcr,
    }
}

/// Decode one measurement, flagging it only when a range table is present
fn decode_measurement(
    column: &EdanColumn,
    header: &ByteRecord,
    row: &ByteRecord,
    normal_ranges: Option<&NormalRangeTable>,
) -> Measurement {
    let value = parse_value(&cell_text(row, column.index));
    let measurement = Measurement::new(value, extract_parenthesized_units(cell(header, column.index)));

    match normal_ranges {
        Some(table) => measurement
            .with_flag(table.get(column.flag_range).classify(value).as_str())
            .with_range(table.get(column.range)),
        None => measurement,
    }
}
