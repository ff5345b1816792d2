use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::weather::{suggest_conditions, ConditionSuggestion, WeatherReport};

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    #[serde(flatten)]
    pub report: WeatherReport,
    pub suggestion: ConditionSuggestion,
}

/// GET /api/v1/weather?lat=&lon=
pub async fn handle_get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherResponse>, AppError> {
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(AppError::Validation(
            "Latitude and longitude are required".to_string(),
        ));
    };

    let report = state.weather.current(lat, lon).await?;
    let suggestion = suggest_conditions(&report);

    Ok(Json(WeatherResponse { report, suggestion }))
}
