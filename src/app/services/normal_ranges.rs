//! Normal range document loading
//!
//! The normal range document is a JSON object keyed by parameter name
//! (`wbc`, `lym_percent`, `pdw_s`, ...) where each entry holds
//! `{"lower": number, "upper": number}`. Keys match case-insensitively, so
//! `WBC` and `Lower` are accepted. Missing entries become the zero range,
//! unknown entries are ignored and a later duplicate overrides an earlier one.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::app::models::{NormalRangeTable, RangeKey};
use crate::{Error, Result};

/// Top-level entries of the range document, in document order
struct DocumentEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for DocumentEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = DocumentEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of normal ranges")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(DocumentEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Canonical key for a document key, ignoring ASCII case
fn range_key(name: &str) -> Option<RangeKey> {
    RangeKey::ALL
        .into_iter()
        .find(|key| key.as_str().eq_ignore_ascii_case(name))
}

/// Lowercase the keys of a range entry so `Lower`/`UPPER` bind
fn fold_bound_keys(entry: Value) -> Value {
    match entry {
        Value::Object(bounds) => Value::Object(
            bounds
                .into_iter()
                .filter(|(_, bound)| !bound.is_null())
                .map(|(name, bound)| (name.to_ascii_lowercase(), bound))
                .collect(),
        ),
        other => other,
    }
}

impl NormalRangeTable {
    /// Load a range table from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let DocumentEntries(entries) = serde_json::from_reader(reader)
            .map_err(|e| Error::normal_ranges("Failed to parse normal range document", e))?;

        let mut canonical = Map::with_capacity(entries.len());
        for (name, entry) in entries {
            let Some(key) = range_key(&name) else {
                debug!("Ignoring unknown normal range key '{}'", name);
                continue;
            };
            if entry.is_null() {
                debug!("Ignoring null normal range for '{}'", name);
                continue;
            }
            canonical.insert(key.as_str().to_string(), fold_bound_keys(entry));
        }

        let table: NormalRangeTable = serde_json::from_value(Value::Object(canonical))
            .map_err(|e| Error::normal_ranges("Invalid entry in normal range document", e))?;

        for key in table.inverted_keys() {
            warn!(
                "Normal range for '{}' has lower bound above upper bound: {:?}",
                key,
                table.get(key)
            );
        }

        Ok(table)
    }

    /// Load a range table from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("Loading normal ranges from {}", path.display());

        let file = File::open(path).map_err(|e| {
            Error::io(
                format!("Failed to open normal range file {}", path.display()),
                e,
            )
        })?;

        Self::from_reader(BufReader::new(file))
    }
}
