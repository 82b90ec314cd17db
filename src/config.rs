//! Line layout of a raw read log.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Delimiter and field positions consumed from each raw line.
///
/// The defaults match the timing system's export format. A layout can be
/// overridden from a JSON file where every key is optional:
/// ```json
/// {
///   "delimiter": "~",
///   "device": 6,
///   "port": 7,
///   "rssi": 8,
///   "stat": 11,
///   "min_fields": 12
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLayout {
    pub delimiter: char,
    pub device: usize,
    pub port: usize,
    pub rssi: usize,
    pub stat: usize,
    /// Lines with fewer fields than this are discarded.
    pub min_fields: usize,
}

impl Default for LineLayout {
    fn default() -> Self {
        Self {
            delimiter: '~',
            device: 6,
            port: 7,
            rssi: 8,
            stat: 11,
            min_fields: 12,
        }
    }
}

impl LineLayout {
    /// Loads a layout from a JSON file at `path` and validates it.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read layout file {path}"))?;
        let layout: LineLayout = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse layout file {path}"))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that every consumed index lies inside the required field count.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("device", self.device),
            ("port", self.port),
            ("rssi", self.rssi),
            ("stat", self.stat),
        ];
        for (name, index) in fields {
            if index >= self.min_fields {
                bail!(
                    "layout field {name} at index {index} is outside min_fields {}",
                    self.min_fields
                );
            }
        }
        Ok(())
    }
}
