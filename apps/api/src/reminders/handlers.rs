use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plant::PlantRow;
use crate::plants::store::get_owned_plant;
use crate::recommendation::render::EmailHtmlRenderer;
use crate::reminders::{compose_reminder, OutgoingMail};
use crate::state::AppState;
use crate::users::store::get_user;
use crate::users::UserIdQuery;

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    pub to: String,
    pub subject: String,
}

/// Composes the care reminder for `plant` and sends it to `to`.
pub async fn send_plant_reminder(
    state: &AppState,
    to: &str,
    plant: &PlantRow,
) -> Result<OutgoingMail, AppError> {
    let parsed = state
        .parser
        .parse(plant.care_recommendation.as_deref(), &plant.context());
    let email = compose_reminder(&plant.name, &parsed, &EmailHtmlRenderer::default());

    let mail = OutgoingMail {
        from: state.config.mail_from.clone(),
        to: to.to_string(),
        subject: email.subject,
        html: email.html,
    };
    state.mailer.send(&mail).await?;

    info!("Sent care reminder for plant {} to {}", plant.id, to);
    Ok(mail)
}

/// POST /api/v1/plants/:id/reminder?user_id=
pub async fn handle_send_reminder(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ReminderResponse>, AppError> {
    let plant = get_owned_plant(&state.db, plant_id, params.user_id).await?;
    let user = get_user(&state.db, params.user_id).await?;

    let mail = send_plant_reminder(&state, &user.email, &plant).await?;

    Ok(Json(ReminderResponse {
        to: mail.to,
        subject: mail.subject,
    }))
}
