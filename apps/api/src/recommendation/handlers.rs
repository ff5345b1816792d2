//! Axum route handlers for care recommendations.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::plants::store::get_owned_plant;
use crate::recommendation::prompts::build_care_prompt;
use crate::recommendation::render::{CareTree, CareTreeRenderer, Renderer};
use crate::recommendation::PlantContext;
use crate::state::AppState;
use crate::users::UserIdQuery;

#[derive(Debug, Deserialize)]
pub struct CareRequest {
    pub species: Option<String>,
    pub location: Option<String>,
    pub light: Option<String>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CareResponse {
    /// Raw model text, as it would be stored on a plant.
    pub recommendation: String,
    pub guide: CareTree,
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CareRequest {
    fn context(&self) -> Result<PlantContext, AppError> {
        let (Some(species), Some(location), Some(light), Some(temperature)) = (
            required(&self.species),
            required(&self.location),
            required(&self.light),
            self.temperature,
        ) else {
            return Err(AppError::Validation("All fields are required".to_string()));
        };

        Ok(PlantContext {
            plant_name: species.to_string(),
            species: species.to_string(),
            location: location.to_string(),
            light: light.to_string(),
            temperature,
        })
    }
}

/// POST /api/v1/recommendation/care
///
/// One-off recommendation for an environment that is not saved as a plant.
pub async fn handle_care_recommendation(
    State(state): State<AppState>,
    Json(request): Json<CareRequest>,
) -> Result<Json<CareResponse>, AppError> {
    let ctx = request.context()?;
    let prompt = build_care_prompt(&ctx.species, &ctx.location, &ctx.light, ctx.temperature);

    let recommendation = state.llm.generate_text(&prompt).await?;

    let parsed = state.parser.parse(Some(&recommendation), &ctx);
    let guide = CareTreeRenderer::default().render(&parsed);

    Ok(Json(CareResponse {
        recommendation,
        guide,
    }))
}

/// GET /api/v1/plants/:id/care?user_id=
///
/// Structured guide for the plant's stored recommendation, re-parsed on every read.
pub async fn handle_get_plant_care(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CareTree>, AppError> {
    let plant = get_owned_plant(&state.db, plant_id, params.user_id).await?;
    let parsed = state
        .parser
        .parse(plant.care_recommendation.as_deref(), &plant.context());
    Ok(Json(CareTreeRenderer::default().render(&parsed)))
}
