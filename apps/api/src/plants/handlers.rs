//! Axum route handlers for the Plants API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plant::{PlantPhotoRow, PlantRow, PlantWithPhotos};
use crate::plants::photos::{remove_orphaned_objects, upload_photo};
use crate::plants::store;
use crate::plants::validation::PlantFields;
use crate::recommendation::prompts::{build_care_prompt, build_species_prompt};
use crate::reminders::handlers::send_plant_reminder;
use crate::state::AppState;
use crate::users::store::get_user;
use crate::users::UserIdQuery;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PlantRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: PlantFields,
}

#[derive(Debug, Serialize)]
pub struct CreatePlantResponse {
    pub plant: PlantRow,
    pub email_sent: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictSpeciesRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictSpeciesResponse {
    pub species: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/plants
///
/// Validates, generates the care recommendation, stores the plant with the raw
/// recommendation, then sends the reminder e-mail. A failed e-mail does not
/// undo the plant; it is reported through `email_sent`.
pub async fn handle_create_plant(
    State(state): State<AppState>,
    Json(request): Json<PlantRequest>,
) -> Result<(StatusCode, Json<CreatePlantResponse>), AppError> {
    let valid = request.fields.validate()?;

    let prompt = build_care_prompt(
        &valid.species,
        &valid.location,
        &valid.light,
        valid.temperature,
    );
    let recommendation = state.llm.generate_text(&prompt).await?;

    let plant = store::insert_plant(&state.db, request.user_id, &valid, &recommendation).await?;

    let email_sent = match get_user(&state.db, request.user_id).await {
        Ok(user) => match send_plant_reminder(&state, &user.email, &plant).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Reminder for new plant {} not sent: {e}", plant.id);
                false
            }
        },
        Err(e) => {
            warn!("No reminder recipient for plant {}: {e}", plant.id);
            false
        }
    };

    let message = if email_sent {
        "Plant created and email sent successfully"
    } else {
        "Plant created; reminder email could not be sent"
    };

    Ok((
        StatusCode::CREATED,
        Json(CreatePlantResponse {
            plant,
            email_sent,
            message: message.to_string(),
        }),
    ))
}

/// GET /api/v1/plants?user_id=
pub async fn handle_list_plants(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PlantWithPhotos>>, AppError> {
    let plants = store::list_plants(&state.db, params.user_id).await?;
    Ok(Json(plants))
}

/// PUT /api/v1/plants/:id
///
/// Updates attributes only; the stored recommendation is not regenerated.
pub async fn handle_update_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Json(request): Json<PlantRequest>,
) -> Result<Json<PlantWithPhotos>, AppError> {
    let existing = store::get_owned_plant(&state.db, plant_id, request.user_id).await?;
    let valid = request.fields.merge_onto(&existing)?;

    let plant = store::update_plant(&state.db, plant_id, &valid).await?;
    Ok(Json(store::with_photos(&state.db, plant).await?))
}

/// DELETE /api/v1/plants/:id?user_id=
pub async fn handle_delete_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    store::get_owned_plant(&state.db, plant_id, params.user_id).await?;
    let keys = store::delete_plant(&state.db, plant_id).await?;
    remove_orphaned_objects(&state.s3, &state.config.s3_bucket, &keys).await;

    Ok(Json(MessageResponse {
        message: "Plant deleted".to_string(),
    }))
}

/// POST /api/v1/plants/predict-species
pub async fn handle_predict_species(
    State(state): State<AppState>,
    Json(request): Json<PredictSpeciesRequest>,
) -> Result<Json<PredictSpeciesResponse>, AppError> {
    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Plant name is required".to_string()))?;

    let species = state.llm.generate_text(&build_species_prompt(name)).await?;
    Ok(Json(PredictSpeciesResponse {
        species: species.trim().to_string(),
    }))
}

/// POST /api/v1/plants/:id/photos?user_id=  (multipart, field `photo`)
pub async fn handle_add_photo(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PlantPhotoRow>), AppError> {
    let plant = store::get_owned_plant(&state.db, plant_id, params.user_id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("photo") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid photo upload: {e}")))?;

        let (key, url) = upload_photo(
            &state.s3,
            &state.config.s3_bucket,
            &state.config.s3_endpoint,
            plant.id,
            &content_type,
            data,
        )
        .await?;

        let photo = store::insert_photo(&state.db, plant.id, &url, &key).await?;
        info!("Added photo {} to plant {}", photo.id, plant.id);
        return Ok((StatusCode::CREATED, Json(photo)));
    }

    Err(AppError::Validation("Missing `photo` field".to_string()))
}

/// DELETE /api/v1/plants/photos/:photo_id?user_id=
pub async fn handle_delete_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<PlantWithPhotos>, AppError> {
    let photo = store::get_photo(&state.db, photo_id).await?;

    let plant = match store::get_owned_plant(&state.db, photo.plant_id, params.user_id).await {
        Ok(plant) => plant,
        Err(AppError::NotFound(_)) => return Err(AppError::Forbidden),
        Err(e) => return Err(e),
    };

    // Row first: a storage failure leaves an orphaned object, never a dangling row.
    let key = store::delete_photo(&state.db, photo.id).await?;
    remove_orphaned_objects(&state.s3, &state.config.s3_bucket, &[key]).await;

    Ok(Json(store::with_photos(&state.db, plant).await?))
}
