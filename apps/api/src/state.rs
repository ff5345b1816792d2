use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::recommendation::RecommendationParser;
use crate::reminders::Mailer;
use crate::weather::WeatherClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub weather: WeatherClient,
    pub config: Config,
    /// Compiled once at startup; parsing is pure so one instance serves every request.
    pub parser: Arc<RecommendationParser>,
    /// Outbound e-mail transport. Default: `TracingMailer`.
    pub mailer: Arc<dyn Mailer>,
}
