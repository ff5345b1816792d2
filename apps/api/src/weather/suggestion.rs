//! Maps current weather to the light and temperature values suggested for a
//! plant's environment fields.

use serde::{Deserialize, Serialize};

use crate::weather::WeatherReport;

/// Cloud cover at or below this is bright light.
const BRIGHT_MAX_CLOUDS: u8 = 25;
/// Cloud cover at or below this (and above bright) is medium light.
const MEDIUM_MAX_CLOUDS: u8 = 70;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSuggestion {
    pub light: String,
    /// Whole degrees Celsius.
    pub temperature: i32,
}

pub fn light_from_clouds(cloud_cover: u8) -> &'static str {
    if cloud_cover <= BRIGHT_MAX_CLOUDS {
        "Cahaya terang"
    } else if cloud_cover <= MEDIUM_MAX_CLOUDS {
        "Cahaya sedang"
    } else {
        "Cahaya rendah"
    }
}

pub fn suggest_conditions(report: &WeatherReport) -> ConditionSuggestion {
    ConditionSuggestion {
        light: light_from_clouds(report.clouds.all).to_string(),
        temperature: report.temperature.round() as i32,
    }
}
