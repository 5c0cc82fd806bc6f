//! Step-indexed dataset loading and per-segment projection.
//!
//! A dataset file is a JSON object with a top-level `data` object whose keys are
//! string-encoded non-negative step indices. Numeric key order is playback order.
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;
use serde::de::{self, Deserializer, MapAccess, Visitor};

use crate::foundation::core::RenderRange;
use crate::foundation::error::{SimreelError, SimreelResult};

/// One step as it appeared in the dataset file.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Original key text, written back verbatim in projections.
    pub key: String,
    /// Opaque per-step record.
    pub record: serde_json::Value,
}

/// Immutable step-indexed dataset, ordered by numeric step index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    steps: BTreeMap<u64, Step>,
}

#[derive(serde::Deserialize)]
struct DatasetFile {
    data: StepMap,
}

struct StepMap(BTreeMap<u64, Step>);

impl<'de> serde::Deserialize<'de> for StepMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StepMapVisitor)
    }
}

struct StepMapVisitor;

impl<'de> Visitor<'de> for StepMapVisitor {
    type Value = StepMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by non-negative integer step indices")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut steps = BTreeMap::new();
        while let Some(key) = access.next_key::<String>()? {
            let index = parse_step_key(&key).map_err(de::Error::custom)?;
            let record = access.next_value::<serde_json::Value>()?;
            if let Some(prev) = steps.insert(index, Step { key, record }) {
                return Err(de::Error::custom(format!(
                    "duplicate step index {index} (key '{}')",
                    prev.key
                )));
            }
        }
        Ok(StepMap(steps))
    }
}

fn parse_step_key(key: &str) -> Result<u64, String> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("step key '{key}' is not a non-negative integer"));
    }
    // `u64::MAX` is reserved: index ranges are half-open and need `index + 1`.
    match key.parse::<u64>() {
        Ok(index) if index < u64::MAX => Ok(index),
        Ok(_) => Err(format!("step key '{key}' is out of range")),
        Err(e) => Err(format!("step key '{key}' is out of range: {e}")),
    }
}

impl Dataset {
    /// Read and validate a dataset file.
    #[tracing::instrument]
    pub fn load(path: &Path) -> SimreelResult<Self> {
        let f = File::open(path).with_context(|| format!("open dataset '{}'", path.display()))?;
        let dataset = Self::from_reader(BufReader::new(f))?;
        tracing::info!(steps = dataset.len(), range = ?dataset.index_range(), "dataset loaded");
        Ok(dataset)
    }

    /// Parse a dataset from any JSON reader.
    pub fn from_reader(reader: impl Read) -> SimreelResult<Self> {
        let file: DatasetFile = serde_json::from_reader(reader)
            .map_err(|e| SimreelError::data_format(e.to_string()))?;
        Ok(Self { steps: file.data.0 })
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> SimreelResult<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Number of distinct steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `[min, max + 1)` over the step indices, `None` for an empty dataset.
    pub fn index_range(&self) -> Option<RenderRange> {
        let (&first, _) = self.steps.first_key_value()?;
        let (&last, _) = self.steps.last_key_value()?;
        Some(RenderRange {
            start: first,
            end: last + 1,
        })
    }

    /// Step indices in playback order.
    pub fn indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.steps.keys().copied()
    }

    pub fn get(&self, index: u64) -> Option<&Step> {
        self.steps.get(&index)
    }

    /// Restrict the dataset to the steps whose index lies in `range`.
    pub fn project(&self, range: RenderRange) -> Dataset {
        let steps = self
            .steps
            .range(range.start..range.end)
            .map(|(&k, v)| (k, v.clone()))
            .collect();
        Dataset { steps }
    }

    /// JSON document in the same `{"data": {...}}` shape the dataset was read from.
    pub fn to_json(&self) -> serde_json::Value {
        let data: serde_json::Map<String, serde_json::Value> = self
            .steps
            .values()
            .map(|s| (s.key.clone(), s.record.clone()))
            .collect();
        serde_json::json!({ "data": data })
    }

    /// Serialize the dataset, fully replacing `path` (temp file + rename).
    pub fn write_to(&self, path: &Path) -> SimreelResult<()> {
        let bytes = serde_json::to_vec(&self.to_json())
            .map_err(|e| anyhow::anyhow!("serialize dataset projection: {e}"))?;
        crate::workspace::write_atomic(path, &bytes)
            .with_context(|| format!("write dataset projection '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/dataset.rs"]
mod tests;
