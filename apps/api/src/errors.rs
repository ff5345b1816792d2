use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::reminders::MailError;
use crate::weather::WeatherError;

/// Message returned when the generative service fails. Fixed so upstream
/// details never reach the client.
pub const AI_FAILURE_MESSAGE: &str = "Kesalahan saat menghasilkan rekomendasi dari layanan AI";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Access denied".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    AI_FAILURE_MESSAGE.to_string(),
                )
            }
            AppError::Weather(e) => {
                tracing::error!("Weather error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "WEATHER_ERROR",
                    "Weather data is unavailable".to_string(),
                )
            }
            AppError::Mail(e) => {
                tracing::error!("Mail error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MAIL_ERROR",
                    "The reminder e-mail could not be sent".to_string(),
                )
            }
            AppError::S3(msg) => {
                tracing::error!("S3 error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "S3_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let (status, code, message) = AppError::Validation("All fields are required".into()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(message, "All fields are required");
    }

    #[test]
    fn test_llm_failure_maps_to_502_with_fixed_message() {
        let (status, code, message) = AppError::Llm(LlmError::Api {
            status: 400,
            message: "API key not valid".into(),
        })
        .parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "LLM_ERROR");
        assert_eq!(message, AI_FAILURE_MESSAGE);
    }

    #[test]
    fn test_empty_llm_content_is_also_502() {
        let (status, _, _) = AppError::from(LlmError::EmptyContent).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_mail_failure_maps_to_502_without_recipient() {
        let (status, code, message) =
            AppError::from(MailError::InvalidRecipient("not-an-address".into())).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "MAIL_ERROR");
        assert!(!message.contains("not-an-address"));
    }

    #[test]
    fn test_not_found_keeps_message() {
        let (status, _, message) = AppError::NotFound("Plant not found".into()).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Plant not found");
    }
}
