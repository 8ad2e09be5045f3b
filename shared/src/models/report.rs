//! Planting recommendation reports

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{select_mode, tally, ConditionKey, CropRecord};

/// What gets told to the gardener about a crop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlantingReport {
    /// The crop has plantings on record
    Planted {
        crop: String,
        plantings_count: u64,
        /// `None` when the API reported plantings but sent no details
        most_common: Option<ConditionKey>,
    },
    /// Nobody has planted the crop yet
    NotYetPlanted { crop: String },
}

impl PlantingReport {
    /// Tally a crop record and pick its most common growing conditions.
    ///
    /// `crop` is the name as the user typed it and is only used for display.
    /// The selector is consulted only when the record reports at least one
    /// planting.
    pub fn from_record(crop: &str, record: &CropRecord) -> Self {
        let (table, plantings_count) = tally(record);
        let crop = crop.trim().to_string();

        if plantings_count == 0 {
            return PlantingReport::NotYetPlanted { crop };
        }

        PlantingReport::Planted {
            crop,
            plantings_count,
            most_common: select_mode(&table).ok(),
        }
    }

    pub fn crop(&self) -> &str {
        match self {
            PlantingReport::Planted { crop, .. } | PlantingReport::NotYetPlanted { crop } => crop,
        }
    }
}

impl fmt::Display for PlantingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantingReport::Planted {
                crop,
                plantings_count,
                most_common,
            } => {
                writeln!(f, "{} was planted {} times.", crop, plantings_count)?;
                match most_common {
                    Some(key) => write!(
                        f,
                        "It was most often planted from {} in {}.",
                        key.planted_from_label(),
                        key.sunniness_label()
                    ),
                    None => write!(f, "No planting conditions were recorded."),
                }
            }
            PlantingReport::NotYetPlanted { crop } => {
                write!(f, "{} has not been planted yet.", crop)
            }
        }
    }
}
