pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::plants::{handlers as plants, photos::MAX_PHOTO_BYTES};
use crate::recommendation::handlers as recommendation;
use crate::reminders::handlers as reminders;
use crate::state::AppState;
use crate::users::handlers as users;
use crate::weather::handlers as weather;

/// Headroom over the photo itself for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendation/care",
            post(recommendation::handle_care_recommendation),
        )
        // Profile API
        .route(
            "/api/v1/profile",
            get(users::handle_get_profile)
                .put(users::handle_update_profile)
                .delete(users::handle_delete_profile),
        )
        // Plants API
        .route(
            "/api/v1/plants",
            get(plants::handle_list_plants).post(plants::handle_create_plant),
        )
        .route(
            "/api/v1/plants/predict-species",
            post(plants::handle_predict_species),
        )
        .route(
            "/api/v1/plants/:id",
            put(plants::handle_update_plant).delete(plants::handle_delete_plant),
        )
        .route(
            "/api/v1/plants/:id/care",
            get(recommendation::handle_get_plant_care),
        )
        .route(
            "/api/v1/plants/:id/reminder",
            post(reminders::handle_send_reminder),
        )
        .route(
            "/api/v1/plants/:id/photos",
            post(plants::handle_add_photo)
                .layer(DefaultBodyLimit::max(MAX_PHOTO_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route(
            "/api/v1/plants/photos/:photo_id",
            delete(plants::handle_delete_photo),
        )
        // Weather API
        .route("/api/v1/weather", get(weather::handle_get_weather))
        .with_state(state)
}
