//! Crop records as served by the Growstuff API

use serde::{Deserialize, Serialize};

/// A crop and its recorded plantings, decoded from `/crops/<slug>.json`.
///
/// `plantings_count` is whatever the API reports; it is not required to
/// match `plantings.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRecord {
    pub plantings_count: u64,
    pub plantings: Vec<PlantingEntry>,
}

/// A single planting of a crop.
///
/// Growstuff leaves either field `null` when the gardener did not fill it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantingEntry {
    #[serde(default)]
    pub planted_from: Option<String>,
    #[serde(default)]
    pub sunniness: Option<String>,
}

impl CropRecord {
    /// Decode a crop record from a JSON document.
    ///
    /// Both `plantings_count` and `plantings` must be present, and the count
    /// must be a non-negative integer. Unknown fields are ignored.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

impl PlantingEntry {
    pub fn new(planted_from: impl Into<String>, sunniness: impl Into<String>) -> Self {
        Self {
            planted_from: Some(planted_from.into()),
            sunniness: Some(sunniness.into()),
        }
    }
}
