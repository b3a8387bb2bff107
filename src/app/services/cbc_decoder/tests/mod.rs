//! Test utilities for the CBC decoders
//!
//! This module provides export builders and a reference range table used
//! across the decoder test modules.

use crate::app::models::{NormalRangeTable, Range};

mod human_tests;

/// Edan header with the micro sign written as a lone Latin-1 byte
pub const EDAN_HEADER: &[u8] = b"Sample ID,Mode,Analysis Time,WBC(10^3/\xb5L),LYM#(10^3/\xb5L),LYM%(%),MXD#(),MXD%(),NEUT#(),NEUT%(),RBC(10^6/\xb5L),HGB(g/dL),HCT(%),MCV(fL),MCH(pg),MCHC(g/dL),RDW_CV(%),RDW_SD(fL),PLT(10^3/\xb5L),PDW(fL),MPV(fL),PCT(%),P_LCR(%),P_LCC(10^3/\xb5L)";

/// Measurement cells of a typical Edan sample, columns 3..=23
pub const EDAN_VALUES: [&str; 21] = [
    "5.43", "1.92", "35.4", "0.41", "7.6", "3.10", "57.0", "4.62", "13.8", "41.2", "89.2",
    "29.9", "33.5", "13.1", "45.0", "256", "16.2", "9.4", "0.241", "61", "23.9",
];

/// Build an Edan data row from identifiers and measurement cells
pub fn edan_row(sample_id: &str, values: &[&str; 21]) -> String {
    let mut cells = vec![sample_id, "Whole Blood", "2023-05-11 10:42:07"];
    cells.extend_from_slice(values);
    cells.join(",")
}

/// Build a complete Edan export from data rows
pub fn edan_export(rows: &[String]) -> Vec<u8> {
    let mut export = EDAN_HEADER.to_vec();
    for row in rows {
        export.extend_from_slice(b"\r\n");
        export.extend_from_slice(row.as_bytes());
    }
    export.extend_from_slice(b"\r\n");
    export
}

/// Human header columns including the trailing empty column
pub const HUMAN_HEADER: [&str; 52] = [
    "Sample ID",
    "Date",
    "Time",
    "Patient ID",
    "Birth date",
    "WBC 10^9/l",
    "WBC flag",
    "LYM 10^9/l",
    "LYM flag",
    "MID 10^9/l",
    "MID flag",
    "GRA 10^9/l",
    "GRA flag",
    "LYM% %",
    "LYM% flag",
    "MID% %",
    "MID% flag",
    "GRA% %",
    "GRA% flag",
    "RBC 10^12/l",
    "RBC flag",
    "HGB g/dl",
    "HGB flag",
    "HCT %",
    "HCT flag",
    "MCV fl",
    "MCV flag",
    "MCH pg",
    "MCH flag",
    "MCHC g/dl",
    "MCHC flag",
    "RDWs fl",
    "RDWs flag",
    "RDWc %",
    "RDWc flag",
    "PLT 10^9/l",
    "PLT flag",
    "PCT %",
    "PCT flag",
    "MPV fl",
    "MPV flag",
    "PDWs fl",
    "PDWs flag",
    "PDWc %",
    "PDWc flag",
    "P-LCC 10^9/l",
    "P-LCC flag",
    "P-LCR %",
    "P-LCR flag",
    "Type",
    "Warning",
    "",
];

/// Value/flag cells of a typical Human sample in column order
pub const HUMAN_VALUES: [(&str, &str); 22] = [
    ("11.2", "H"),
    ("2.1", ""),
    ("0.6", ""),
    ("8.5", "H"),
    ("18.8", " L"),
    ("5.4", ""),
    ("75.8", "H "),
    ("4.81", ""),
    ("14.2", ""),
    ("42.6", ""),
    ("88.6", ""),
    ("29.5", ""),
    ("33.3", ""),
    ("42.1", ""),
    ("13.9", ""),
    ("98", "L"),
    ("0.08", "L"),
    ("8.3", ""),
    ("12.4", ""),
    ("36.2", ""),
    ("52", ""),
    ("31.5", ""),
];

/// Build a Human data row
pub fn human_row(sample_id: &str, sample_type: &str, warning: &str) -> String {
    let mut cells = vec![sample_id, "2023-05-11", "10:42:07", "P-3381", "1987-02-14"];
    for (value, flag) in HUMAN_VALUES {
        cells.push(value);
        cells.push(flag);
    }
    cells.extend_from_slice(&[sample_type, warning, ""]);
    cells.join("\t")
}

/// Build a complete Human export from data rows
pub fn human_export(rows: &[String]) -> Vec<u8> {
    let mut export = HUMAN_HEADER.join("\t");
    for row in rows {
        export.push('\n');
        export.push_str(row);
    }
    export.push('\n');
    export.into_bytes()
}

/// Reference ranges for an adult
pub fn adult_ranges() -> NormalRangeTable {
    NormalRangeTable {
        wbc: Range::new(4.0, 10.0),
        lym: Range::new(0.8, 4.0),
        mid: Range::new(0.1, 1.5),
        gra: Range::new(2.0, 7.0),
        lym_percent: Range::new(20.0, 40.0),
        mid_percent: Range::new(3.0, 15.0),
        gra_percent: Range::new(50.0, 70.0),
        rbc: Range::new(4.0, 5.5),
        hgb: Range::new(12.0, 16.0),
        hct: Range::new(37.0, 54.0),
        mcv: Range::new(80.0, 100.0),
        mch: Range::new(27.0, 34.0),
        mchc: Range::new(32.0, 36.0),
        rdw_s: Range::new(35.0, 56.0),
        rdw_c: Range::new(11.0, 16.0),
        plt: Range::new(150.0, 400.0),
        pct: Range::new(0.108, 0.282),
        mpv: Range::new(6.5, 12.0),
        pdw: Range::new(9.0, 17.0),
        pdw_s: Range::new(9.0, 17.0),
        pdw_c: Range::new(10.0, 18.0),
        plcc: Range::new(30.0, 90.0),
        plcr: Range::new(11.0, 45.0),
    }
}
