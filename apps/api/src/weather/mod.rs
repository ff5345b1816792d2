//! Weather lookup (OpenWeatherMap) and the light/temperature suggestion shown
//! when a user fills in a plant's environment.

pub mod handlers;
pub mod suggestion;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use suggestion::{suggest_conditions, ConditionSuggestion};

const OPENWEATHERMAP_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response had no weather conditions")]
    MissingConditions,
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    weather: Vec<OwmCondition>,
    clouds: OwmClouds,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwmError {
    message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloud cover, percent.
    pub all: u8,
}

/// Current conditions at a coordinate, flattened from the provider's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub humidity: u8,
    pub description: String,
    pub main: String,
    pub clouds: Clouds,
    pub location: String,
}

impl TryFrom<OwmResponse> for WeatherReport {
    type Error = WeatherError;

    fn try_from(raw: OwmResponse) -> Result<Self, Self::Error> {
        let condition = raw
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingConditions)?;
        Ok(WeatherReport {
            temperature: raw.main.temp,
            humidity: raw.main.humidity,
            description: condition.description,
            main: condition.main,
            clouds: Clouds {
                all: raw.clouds.all,
            },
            location: raw.name,
        })
    }
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()?,
            api_key,
        })
    }

    /// Metric units, Indonesian descriptions.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, WeatherError> {
        let response = self
            .client
            .get(OPENWEATHERMAP_URL)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("lang", "id".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OwmError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: OwmResponse = response.json().await?;
        debug!("Weather lookup succeeded for {}", raw.name);
        WeatherReport::try_from(raw)
    }
}
