//! Field parsing utilities for analyzer exports
//!
//! Analyzer exports routinely contain ungraded or garbled cells. None of the
//! helpers here fail: numbers fall back to 0.0 and units to an empty string.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::trace;

use crate::constants::MICRO_PLACEHOLDER;

/// Units enclosed in parentheses, e.g. `WBC(10^3/uL)` captures `10^3/uL`
static UNITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("units pattern is valid"));

/// Parse a measurement cell as a 32-bit float
///
/// Anything that does not parse to a finite number yields 0.0.
pub fn parse_value(value: &str) -> f32 {
    match value.parse::<f32>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => {
            trace!("Unparseable measurement '{}', using 0.0", value);
            0.0
        }
    }
}

/// Decode bytes as UTF-8, replacing each run of invalid bytes with `replacement`
pub fn to_valid_utf8<'a>(bytes: &'a [u8], replacement: &str) -> Cow<'a, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let mut repaired = String::with_capacity(bytes.len() + replacement.len());
    let mut in_invalid_run = false;
    for chunk in bytes.utf8_chunks() {
        let valid = chunk.valid();
        if !valid.is_empty() {
            repaired.push_str(valid);
            in_invalid_run = false;
        }
        if !chunk.invalid().is_empty() {
            if !in_invalid_run {
                repaired.push_str(replacement);
            }
            in_invalid_run = true;
        }
    }

    Cow::Owned(repaired)
}

/// Extract units from an Edan header cell of the form `NAME(UNITS)`
///
/// Invalid byte runs are read as the micro sign before matching.
pub fn extract_parenthesized_units(header: &[u8]) -> String {
    let text = to_valid_utf8(header, MICRO_PLACEHOLDER);
    match UNITS_REGEX.captures(&text).and_then(|caps| caps.get(1)) {
        Some(units) => units.as_str().to_string(),
        None => {
            trace!("No units in header '{}'", text);
            String::new()
        }
    }
}

/// Extract units from a Human header cell of the form `NAME UNITS`
///
/// The cell must split into exactly two parts on single spaces.
pub fn extract_spaced_units(header: &str) -> String {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(units), None) => units.to_string(),
        _ => {
            trace!("No units in header '{}'", header);
            String::new()
        }
    }
}

/// Device-reported flag text with surrounding whitespace removed
pub fn parse_reported_flag(flag: &str) -> String {
    flag.trim().to_string()
}
