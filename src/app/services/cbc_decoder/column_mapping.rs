//! Column-to-field tables for each analyzer export
//!
//! The column indices here are the device contract. Each table lists its
//! measurements in the order the record struct declares them, and the
//! decoders destructure the decoded array in that same order.

use crate::app::models::RangeKey;

/// One Edan measurement column
///
/// The value and its header share a column. The flag is computed against
/// `flag_range`, which is `range` for every parameter except PDW.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdanColumn {
    /// Output field name
    pub field: &'static str,
    /// Column holding the value in data rows and the units in the header
    pub index: usize,
    /// Range copied into the measurement
    pub range: RangeKey,
    /// Range the flag is computed against
    pub flag_range: RangeKey,
}

impl EdanColumn {
    const fn new(field: &'static str, index: usize, range: RangeKey) -> Self {
        Self {
            field,
            index,
            range,
            flag_range: range,
        }
    }

    const fn flagged_against(self, flag_range: RangeKey) -> Self {
        Self { flag_range, ..self }
    }
}

/// One Human measurement column pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanColumn {
    /// Output field name
    pub field: &'static str,
    /// Column holding the value in data rows and the units in the header
    pub value_index: usize,
    /// Column holding the device-reported flag
    pub flag_index: usize,
    /// Range copied into the measurement
    pub range: RangeKey,
}

impl HumanColumn {
    const fn new(field: &'static str, value_index: usize, range: RangeKey) -> Self {
        Self {
            field,
            value_index,
            flag_index: value_index + 1,
            range,
        }
    }
}

/// Edan measurement columns 3..=23
///
/// PDW copies the `pdw` range but is flagged against `pdw_c`. Columns 22 and
/// 23 feed `plcc` and `plcr` respectively regardless of the header text.
pub const EDAN_COLUMNS: [EdanColumn; 21] = [
    EdanColumn::new("wbc", 3, RangeKey::Wbc),
    EdanColumn::new("lym", 4, RangeKey::Lym),
    EdanColumn::new("lym_percent", 5, RangeKey::LymPercent),
    EdanColumn::new("mid", 6, RangeKey::Mid),
    EdanColumn::new("mid_percent", 7, RangeKey::MidPercent),
    EdanColumn::new("gra", 8, RangeKey::Gra),
    EdanColumn::new("gra_percent", 9, RangeKey::GraPercent),
    EdanColumn::new("rbc", 10, RangeKey::Rbc),
    EdanColumn::new("hgb", 11, RangeKey::Hgb),
    EdanColumn::new("hct", 12, RangeKey::Hct),
    EdanColumn::new("mcv", 13, RangeKey::Mcv),
    EdanColumn::new("mch", 14, RangeKey::Mch),
    EdanColumn::new("mchc", 15, RangeKey::Mchc),
    EdanColumn::new("rdw_c", 16, RangeKey::RdwC),
    EdanColumn::new("rdw_s", 17, RangeKey::RdwS),
    EdanColumn::new("plt", 18, RangeKey::Plt),
    EdanColumn::new("pdw", 19, RangeKey::Pdw).flagged_against(RangeKey::PdwC),
    EdanColumn::new("mpv", 20, RangeKey::Mpv),
    EdanColumn::new("pct", 21, RangeKey::Pct),
    EdanColumn::new("plcc", 22, RangeKey::Plcc),
    EdanColumn::new("plcr", 23, RangeKey::Plcr),
];

/// Human value/flag column pairs 5/6 ..= 47/48
pub const HUMAN_COLUMNS: [HumanColumn; 22] = [
    HumanColumn::new("wbc", 5, RangeKey::Wbc),
    HumanColumn::new("lym", 7, RangeKey::Lym),
    HumanColumn::new("mid", 9, RangeKey::Mid),
    HumanColumn::new("gra", 11, RangeKey::Gra),
    HumanColumn::new("lym_percent", 13, RangeKey::LymPercent),
    HumanColumn::new("mid_percent", 15, RangeKey::MidPercent),
    HumanColumn::new("gra_percent", 17, RangeKey::GraPercent),
    HumanColumn::new("rbc", 19, RangeKey::Rbc),
    HumanColumn::new("hgb", 21, RangeKey::Hgb),
    HumanColumn::new("hct", 23, RangeKey::Hct),
    HumanColumn::new("mcv", 25, RangeKey::Mcv),
    HumanColumn::new("mch", 27, RangeKey::Mch),
    HumanColumn::new("mchc", 29, RangeKey::Mchc),
    HumanColumn::new("rdw_s", 31, RangeKey::RdwS),
    HumanColumn::new("rdw_c", 33, RangeKey::RdwC),
    HumanColumn::new("plt", 35, RangeKey::Plt),
    HumanColumn::new("pct", 37, RangeKey::Pct),
    HumanColumn::new("mpv", 39, RangeKey::Mpv),
    HumanColumn::new("pdw_s", 41, RangeKey::PdwS),
    HumanColumn::new("pdw_c", 43, RangeKey::PdwC),
    HumanColumn::new("plcc", 45, RangeKey::Plcc),
    HumanColumn::new("plcr", 47, RangeKey::Plcr),
];
