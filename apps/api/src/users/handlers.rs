//! Axum route handlers for the profile API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::plants::photos::remove_orphaned_objects;
use crate::state::AppState;
use crate::users::store;
use crate::users::validation::ProfileFields;
use crate::users::UserIdQuery;

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: ProfileFields,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/v1/profile?user_id=
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<User>, AppError> {
    let user = store::get_user(&state.db, params.user_id).await?;
    Ok(Json(user))
}

/// PUT /api/v1/profile
///
/// Partial update: blank or missing fields keep their stored value.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<User>, AppError> {
    let update = request.fields.validate()?;
    let existing = store::get_user(&state.db, request.user_id).await?;

    let user = store::update_profile(&state.db, request.user_id, &update.apply(&existing)).await?;
    Ok(Json(user))
}

/// DELETE /api/v1/profile?user_id=
///
/// Removes the account with all of its plants and photos.
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let keys = store::delete_user(&state.db, params.user_id).await?;
    remove_orphaned_objects(&state.s3, &state.config.s3_bucket, &keys).await;

    Ok(Json(MessageResponse {
        message: "Account deleted".to_string(),
    }))
}
