//! Field rules for plant create/update requests.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::plant::PlantRow;

const NAME_LEN: (usize, usize) = (2, 100);
const SPECIES_LEN: (usize, usize) = (2, 100);
const LOCATION_LEN: (usize, usize) = (2, 100);
const LIGHT_LEN: (usize, usize) = (2, 50);
pub const MIN_TEMPERATURE_C: f64 = -10.0;
pub const MAX_TEMPERATURE_C: f64 = 50.0;

/// Plant attributes as they arrive from the client. Every field is optional
/// at the wire level so a missing one is a 400, not a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantFields {
    pub name: Option<String>,
    pub species: Option<String>,
    pub location: Option<String>,
    pub light: Option<String>,
    pub temperature: Option<f64>,
}

/// Attributes that passed validation. Strings are trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPlant {
    pub name: String,
    pub species: String,
    pub location: String,
    pub light: String,
    pub temperature: f64,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn check_len(field: &str, value: &str, (min, max): (usize, usize)) -> Result<String, AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(value.to_string())
}

impl PlantFields {
    /// All five fields are required.
    pub fn validate(&self) -> Result<ValidPlant, AppError> {
        let (Some(name), Some(species), Some(location), Some(light), Some(temperature)) = (
            present(&self.name),
            present(&self.species),
            present(&self.location),
            present(&self.light),
            self.temperature,
        ) else {
            return Err(AppError::Validation("All fields are required".to_string()));
        };

        if !temperature.is_finite()
            || !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&temperature)
        {
            return Err(AppError::Validation(format!(
                "temperature must be between {MIN_TEMPERATURE_C}°C and {MAX_TEMPERATURE_C}°C"
            )));
        }

        Ok(ValidPlant {
            name: check_len("name", name, NAME_LEN)?,
            species: check_len("species", species, SPECIES_LEN)?,
            location: check_len("location", location, LOCATION_LEN)?,
            light: check_len("light", light, LIGHT_LEN)?,
            temperature,
        })
    }

    /// Overlays the provided fields on an existing plant, then validates the result.
    pub fn merge_onto(&self, existing: &PlantRow) -> Result<ValidPlant, AppError> {
        PlantFields {
            name: self.name.clone().or_else(|| Some(existing.name.clone())),
            species: self.species.clone().or_else(|| Some(existing.species.clone())),
            location: self.location.clone().or_else(|| Some(existing.location.clone())),
            light: self.light.clone().or_else(|| Some(existing.light.clone())),
            temperature: self.temperature.or(Some(existing.temperature)),
        }
        .validate()
    }
}
