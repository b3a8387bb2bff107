//! Tests for the Human decoder

use super::*;
use crate::Error;
use crate::app::models::Range;
use crate::app::services::cbc_decoder::human::is_blank_row;
use crate::app::services::cbc_decoder::{CbcDecoder, HUMAN_COLUMNS, HumanDecoder};
use csv::ByteRecord;

#[test]
fn test_decode_one_reads_identifiers_and_measurements() {
    let export = human_export(&[human_row("1024", "Whole blood", "")]);
    let ranges = adult_ranges();

    let record = HumanDecoder::new()
        .decode_one(export.as_slice(), Some(&ranges))
        .unwrap();

    assert_eq!(record.sample_id, "1024");
    assert_eq!(record.date, "2023-05-11");
    assert_eq!(record.time, "10:42:07");
    assert_eq!(record.patient_id, "P-3381");
    assert_eq!(record.birth_date, "1987-02-14");
    assert_eq!(record.sample_type, "Whole blood");
    assert_eq!(record.warning, "");

    assert_eq!(record.wbc.value, 11.2);
    assert_eq!(record.wbc.units, "10^9/l");
    assert_eq!(record.wbc.flag, "H");
    assert_eq!(record.wbc.normal_range, Range::new(4.0, 10.0));
    assert_eq!(record.rbc.units, "10^12/l");
    assert_eq!(record.hgb.units, "g/dl");
    assert_eq!(record.lym_percent.units, "%");
}

#[test]
fn test_flags_are_copied_and_trimmed() {
    let export = human_export(&[human_row("5", "", "")]);

    let record = HumanDecoder::new()
        .decode_one(export.as_slice(), None)
        .unwrap();

    assert_eq!(record.lym_percent.flag, "L");
    assert_eq!(record.gra_percent.flag, "H");
    assert_eq!(record.plt.flag, "L");
    assert_eq!(record.mcv.flag, "");
}

#[test]
fn test_reported_flag_wins_over_range() {
    // HGB 14.2 is inside 12-16 but the device flagged it
    let row = human_row("5", "", "").replacen("14.2\t", "14.2\tH", 1);
    let export = human_export(&[row]);
    let ranges = adult_ranges();

    let record = HumanDecoder::new()
        .decode_one(export.as_slice(), Some(&ranges))
        .unwrap();

    assert_eq!(record.hgb.flag, "H");
    assert_eq!(record.hgb.normal_range, ranges.hgb);
    // WBC 11.2 is above range and the device flag is kept verbatim
    assert_eq!(record.wbc.flag, "H");
}

#[test]
fn test_every_column_pair_lands_in_its_field() {
    let export = human_export(&[human_row("9", "", "")]);
    let record = HumanDecoder::new()
        .decode_one(export.as_slice(), None)
        .unwrap();
    let json = serde_json::to_value(&record).unwrap();

    for (column, (cell, flag)) in HUMAN_COLUMNS.iter().zip(HUMAN_VALUES) {
        let expected: f32 = cell.parse().unwrap();
        let value = json[column.field]["value"].as_f64().unwrap() as f32;
        assert_eq!(value, expected, "field {}", column.field);
        assert_eq!(json[column.field]["flag"], flag.trim(), "field {}", column.field);
    }
}

#[test]
fn test_without_ranges_ranges_are_zero() {
    let export = human_export(&[human_row("5", "", "")]);

    let record = HumanDecoder::new()
        .decode_one(export.as_slice(), None)
        .unwrap();

    assert_eq!(record.wbc.normal_range, Range::default());
    assert_eq!(record.wbc.flag, "H");
}

#[test]
fn test_decode_one_rejects_zero_sample_id() {
    let export = human_export(&[human_row("0", "Whole blood", ""), human_row("12", "", "")]);

    let result = HumanDecoder::new().decode_one(export.as_slice(), None);

    match result {
        Err(Error::BlankRecord { sample_id }) => assert_eq!(sample_id, "0"),
        other => panic!("expected BlankRecord, got {:?}", other),
    }
}

#[test]
fn test_decode_one_rejects_blank_marker() {
    let export = human_export(&[human_row("77", "", "Blank")]);

    let result = HumanDecoder::new().decode_one(export.as_slice(), None);
    assert!(matches!(result, Err(Error::BlankRecord { .. })));
}

#[test]
fn test_decode_many_skips_blank_rows() {
    let export = human_export(&[
        human_row("0", "", ""),
        human_row("101", "", ""),
        human_row("102", "", "Blank"),
        human_row("103", "", ""),
    ]);

    let records = HumanDecoder::new()
        .decode_many(export.as_slice(), None)
        .unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.sample_id.as_str()).collect();
    assert_eq!(ids, vec!["101", "103"]);
}

#[test]
fn test_decode_many_with_only_blank_rows_is_empty() {
    let export = human_export(&[human_row("0", "", "")]);

    let records = HumanDecoder::new()
        .decode_many(export.as_slice(), None)
        .unwrap();

    assert!(records.is_empty());
}

#[test]
fn test_blank_detection_is_exact() {
    let header = ByteRecord::from(vec!["00", "x", "blank", ""]);
    assert!(!is_blank_row(&header));

    let marker = ByteRecord::from(vec!["5", "x", "Blank", ""]);
    assert!(is_blank_row(&marker));

    let zero = ByteRecord::from(vec!["0"]);
    assert!(is_blank_row(&zero));

    assert!(!is_blank_row(&ByteRecord::new()));
}

#[test]
fn test_wrong_column_count_is_invalid_input() {
    let mut short = human_row("5", "", "");
    short.truncate(short.rfind('\t').unwrap());
    let export = human_export(&[human_row("4", "", ""), short]);
    let decoder = HumanDecoder::new();

    assert!(matches!(
        decoder.decode_one(export.as_slice(), None),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        decoder.decode_many(export.as_slice(), None),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn test_comma_separated_input_is_invalid() {
    let export = human_export(&[human_row("5", "", "")]);
    let commas: Vec<u8> = export
        .iter()
        .map(|&b| if b == b'\t' { b',' } else { b })
        .collect();

    let result = HumanDecoder::new().decode_many(commas.as_slice(), None);
    assert!(matches!(result, Err(Error::InvalidInput { .. })));
}

#[test]
fn test_malformed_quoting_is_invalid_input() {
    let decoder = HumanDecoder::new();
    let row = human_row("5", "", "");

    for (cell, broken) in [("11.2\t", "11\"2\t"), ("14.2\t", "\"14.2\" \t")] {
        let export = human_export(&[row.replacen(cell, broken, 1)]);

        assert!(matches!(
            decoder.decode_one(export.as_slice(), None),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            decoder.decode_many(export.as_slice(), None),
            Err(Error::InvalidInput { .. })
        ));
    }
}

#[test]
fn test_header_only_is_insufficient_rows() {
    let export = human_export(&[]);

    let result = HumanDecoder::new().decode_many(export.as_slice(), None);
    assert!(matches!(result, Err(Error::InsufficientRows { found: 1 })));
}

#[test]
fn test_schema_checked_before_blank_detection() {
    let export = human_export(&[human_row("0", "", ""), "1\t2".to_string()]);

    let result = HumanDecoder::new().decode_one(export.as_slice(), None);
    assert!(matches!(result, Err(Error::InvalidInput { .. })));
}
