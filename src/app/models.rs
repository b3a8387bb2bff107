//! Data models for CBC decoding
//!
//! This module contains the core data structures shared by every analyzer
//! decoder: reference ranges, the range table loaded from the normal range
//! document, and the per-parameter measurement written to JSON.

use crate::constants::{FLAG_HIGH, FLAG_LOW};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Reference Ranges
// =============================================================================

/// Clinically accepted bounds for a single measurement
///
/// A zero range (0, 0) is valid: every positive value flags high against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Range {
    pub lower: f32,
    pub upper: f32,
}

impl Range {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    /// Classify a value against this range. Both bounds count as normal.
    pub fn classify(&self, value: f32) -> RangeFlag {
        if value < self.lower {
            RangeFlag::Low
        } else if value > self.upper {
            RangeFlag::High
        } else {
            RangeFlag::Normal
        }
    }

    /// Whether the bounds are inverted
    pub fn is_inverted(&self) -> bool {
        self.lower > self.upper
    }
}

/// Outcome of a threshold comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFlag {
    Low,
    Normal,
    High,
}

impl RangeFlag {
    /// Flag text as written to the measurement
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeFlag::Low => FLAG_LOW,
            RangeFlag::Normal => "",
            RangeFlag::High => FLAG_HIGH,
        }
    }
}

impl fmt::Display for RangeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Measurements
// =============================================================================

/// A single clinical parameter of a CBC record
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Measurement {
    pub value: f32,
    pub units: String,
    pub flag: String,
    pub normal_range: Range,
}

impl Measurement {
    /// Create an unflagged measurement with a zero range
    pub fn new(value: f32, units: impl Into<String>) -> Self {
        Self {
            value,
            units: units.into(),
            flag: String::new(),
            normal_range: Range::default(),
        }
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = flag.into();
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.normal_range = range;
        self
    }
}

// =============================================================================
// Normal Range Table
// =============================================================================

/// Identifier of an entry in the normal range table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKey {
    Wbc,
    Lym,
    Mid,
    Gra,
    LymPercent,
    MidPercent,
    GraPercent,
    Rbc,
    Hgb,
    Hct,
    Mcv,
    Mch,
    Mchc,
    RdwS,
    RdwC,
    Plt,
    Pct,
    Mpv,
    /// Platelet distribution width as reported by Edan
    Pdw,
    /// Platelet distribution width (SD form) as reported by Human
    PdwS,
    /// Platelet distribution width (CV form) as reported by Human
    PdwC,
    Plcc,
    Plcr,
}

impl RangeKey {
    /// Every key, in normal range document order
    pub const ALL: [RangeKey; 23] = [
        RangeKey::Wbc,
        RangeKey::Lym,
        RangeKey::Mid,
        RangeKey::Gra,
        RangeKey::LymPercent,
        RangeKey::MidPercent,
        RangeKey::GraPercent,
        RangeKey::Rbc,
        RangeKey::Hgb,
        RangeKey::Hct,
        RangeKey::Mcv,
        RangeKey::Mch,
        RangeKey::Mchc,
        RangeKey::RdwS,
        RangeKey::RdwC,
        RangeKey::Plt,
        RangeKey::Pct,
        RangeKey::Mpv,
        RangeKey::Pdw,
        RangeKey::PdwS,
        RangeKey::PdwC,
        RangeKey::Plcc,
        RangeKey::Plcr,
    ];

    /// Key name in the normal range document
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKey::Wbc => "wbc",
            RangeKey::Lym => "lym",
            RangeKey::Mid => "mid",
            RangeKey::Gra => "gra",
            RangeKey::LymPercent => "lym_percent",
            RangeKey::MidPercent => "mid_percent",
            RangeKey::GraPercent => "gra_percent",
            RangeKey::Rbc => "rbc",
            RangeKey::Hgb => "hgb",
            RangeKey::Hct => "hct",
            RangeKey::Mcv => "mcv",
            RangeKey::Mch => "mch",
            RangeKey::Mchc => "mchc",
            RangeKey::RdwS => "rdw_s",
            RangeKey::RdwC => "rdw_c",
            RangeKey::Plt => "plt",
            RangeKey::Pct => "pct",
            RangeKey::Mpv => "mpv",
            RangeKey::Pdw => "pdw",
            RangeKey::PdwS => "pdw_s",
            RangeKey::PdwC => "pdw_c",
            RangeKey::Plcc => "plcc",
            RangeKey::Plcr => "plcr",
        }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference bounds for every parameter the decoders understand
///
/// Keys missing from the source document default to the zero range. The
/// table is only ever read by decoders; each measurement receives a copy
/// of its range.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalRangeTable {
    pub wbc: Range,
    pub lym: Range,
    pub mid: Range,
    pub gra: Range,
    pub lym_percent: Range,
    pub mid_percent: Range,
    pub gra_percent: Range,
    pub rbc: Range,
    pub hgb: Range,
    pub hct: Range,
    pub mcv: Range,
    pub mch: Range,
    pub mchc: Range,
    pub rdw_s: Range,
    pub rdw_c: Range,
    pub plt: Range,
    pub pct: Range,
    pub mpv: Range,
    pub pdw: Range,
    pub pdw_s: Range,
    pub pdw_c: Range,
    pub plcc: Range,
    pub plcr: Range,
}

impl NormalRangeTable {
    /// Look up the range stored under a key
    pub fn get(&self, key: RangeKey) -> Range {
        match key {
            RangeKey::Wbc => self.wbc,
            RangeKey::Lym => self.lym,
            RangeKey::Mid => self.mid,
            RangeKey::Gra => self.gra,
            RangeKey::LymPercent => self.lym_percent,
            RangeKey::MidPercent => self.mid_percent,
            RangeKey::GraPercent => self.gra_percent,
            RangeKey::Rbc => self.rbc,
            RangeKey::Hgb => self.hgb,
            RangeKey::Hct => self.hct,
            RangeKey::Mcv => self.mcv,
            RangeKey::Mch => self.mch,
            RangeKey::Mchc => self.mchc,
            RangeKey::RdwS => self.rdw_s,
            RangeKey::RdwC => self.rdw_c,
            RangeKey::Plt => self.plt,
            RangeKey::Pct => self.pct,
            RangeKey::Mpv => self.mpv,
            RangeKey::Pdw => self.pdw,
            RangeKey::PdwS => self.pdw_s,
            RangeKey::PdwC => self.pdw_c,
            RangeKey::Plcc => self.plcc,
            RangeKey::Plcr => self.plcr,
        }
    }

    /// Keys whose lower bound exceeds the upper bound
    pub fn inverted_keys(&self) -> Vec<RangeKey> {
        RangeKey::ALL
            .into_iter()
            .filter(|key| self.get(*key).is_inverted())
            .collect()
    }
}

// =============================================================================
// Devices
// =============================================================================

/// Supported analyzer models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    /// Edan hematology analyzer (comma separated export)
    Edan,
    /// Human hematology analyzer (tab separated export)
    Human,
}

impl Device {
    pub fn name(&self) -> &'static str {
        match self {
            Device::Edan => "Edan",
            Device::Human => "Human",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
