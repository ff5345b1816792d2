use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::recommendation::PlantContext;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlantRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub species: String,
    pub location: String,
    pub light: String,
    pub temperature: f64,
    /// Raw generative-model text. Structured on every read, never stored parsed.
    pub care_recommendation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlantRow {
    pub fn context(&self) -> PlantContext {
        PlantContext {
            plant_name: self.name.clone(),
            species: self.species.clone(),
            location: self.location.clone(),
            light: self.light.clone(),
            temperature: self.temperature,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlantPhotoRow {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub photo_url: String,
    /// Object key in the photo bucket.
    pub s3_key: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A plant with its photos, newest photo first.
#[derive(Debug, Clone, Serialize)]
pub struct PlantWithPhotos {
    #[serde(flatten)]
    pub plant: PlantRow,
    pub photos: Vec<PlantPhotoRow>,
}
