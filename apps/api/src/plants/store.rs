//! Plant, photo and user queries.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plant::{PlantPhotoRow, PlantRow, PlantWithPhotos};
use crate::plants::validation::ValidPlant;

pub async fn insert_plant(
    pool: &PgPool,
    user_id: Uuid,
    plant: &ValidPlant,
    care_recommendation: &str,
) -> Result<PlantRow, AppError> {
    let row = sqlx::query_as::<_, PlantRow>(
        r#"
        INSERT INTO plants
            (id, user_id, name, species, location, light, temperature, care_recommendation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&plant.name)
    .bind(&plant.species)
    .bind(&plant.location)
    .bind(&plant.light)
    .bind(plant.temperature)
    .bind(care_recommendation)
    .fetch_one(pool)
    .await?;

    info!("Inserted plant {} for user {user_id}", row.id);
    Ok(row)
}

/// Returns the plant only if `user_id` owns it.
pub async fn get_owned_plant(
    pool: &PgPool,
    plant_id: Uuid,
    user_id: Uuid,
) -> Result<PlantRow, AppError> {
    sqlx::query_as::<_, PlantRow>("SELECT * FROM plants WHERE id = $1 AND user_id = $2")
        .bind(plant_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Plant not found".to_string()))
}

async fn photos_for(pool: &PgPool, plant_ids: &[Uuid]) -> Result<Vec<PlantPhotoRow>, AppError> {
    let photos = sqlx::query_as::<_, PlantPhotoRow>(
        "SELECT * FROM plant_photos WHERE plant_id = ANY($1) ORDER BY uploaded_at DESC",
    )
    .bind(plant_ids)
    .fetch_all(pool)
    .await?;
    Ok(photos)
}

fn attach_photos(plants: Vec<PlantRow>, photos: Vec<PlantPhotoRow>) -> Vec<PlantWithPhotos> {
    let mut by_plant: HashMap<Uuid, Vec<PlantPhotoRow>> = HashMap::new();
    for photo in photos {
        by_plant.entry(photo.plant_id).or_default().push(photo);
    }
    plants
        .into_iter()
        .map(|plant| {
            let photos = by_plant.remove(&plant.id).unwrap_or_default();
            PlantWithPhotos { plant, photos }
        })
        .collect()
}

/// All of a user's plants, newest first, each with its photos.
pub async fn list_plants(pool: &PgPool, user_id: Uuid) -> Result<Vec<PlantWithPhotos>, AppError> {
    let plants = sqlx::query_as::<_, PlantRow>(
        "SELECT * FROM plants WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let ids: Vec<Uuid> = plants.iter().map(|p| p.id).collect();
    let photos = photos_for(pool, &ids).await?;
    Ok(attach_photos(plants, photos))
}

/// Loads the photos of an already fetched plant.
pub async fn with_photos(pool: &PgPool, plant: PlantRow) -> Result<PlantWithPhotos, AppError> {
    let photos = photos_for(pool, &[plant.id]).await?;
    Ok(PlantWithPhotos { plant, photos })
}

pub async fn get_plant_with_photos(
    pool: &PgPool,
    plant_id: Uuid,
    user_id: Uuid,
) -> Result<PlantWithPhotos, AppError> {
    let plant = get_owned_plant(pool, plant_id, user_id).await?;
    with_photos(pool, plant).await
}

/// Updates attributes only. The stored recommendation is left as generated.
pub async fn update_plant(
    pool: &PgPool,
    plant_id: Uuid,
    plant: &ValidPlant,
) -> Result<PlantRow, AppError> {
    let row = sqlx::query_as::<_, PlantRow>(
        r#"
        UPDATE plants
        SET name = $1, species = $2, location = $3, light = $4, temperature = $5,
            updated_at = NOW()
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(&plant.name)
    .bind(&plant.species)
    .bind(&plant.location)
    .bind(&plant.light)
    .bind(plant.temperature)
    .bind(plant_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Deletes the plant and its photo rows. Returns the photo object keys so the
/// caller can remove them from storage.
pub async fn delete_plant(pool: &PgPool, plant_id: Uuid) -> Result<Vec<String>, AppError> {
    let mut tx = pool.begin().await?;

    let keys: Vec<String> =
        sqlx::query_scalar("DELETE FROM plant_photos WHERE plant_id = $1 RETURNING s3_key")
            .bind(plant_id)
            .fetch_all(&mut *tx)
            .await?;

    sqlx::query("DELETE FROM plants WHERE id = $1")
        .bind(plant_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!("Deleted plant {plant_id} and {} photo(s)", keys.len());
    Ok(keys)
}

pub async fn insert_photo(
    pool: &PgPool,
    plant_id: Uuid,
    photo_url: &str,
    s3_key: &str,
) -> Result<PlantPhotoRow, AppError> {
    let row = sqlx::query_as::<_, PlantPhotoRow>(
        r#"
        INSERT INTO plant_photos (id, plant_id, photo_url, s3_key, uploaded_at)
        VALUES ($1, $2, $3, $4, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(plant_id)
    .bind(photo_url)
    .bind(s3_key)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn get_photo(pool: &PgPool, photo_id: Uuid) -> Result<PlantPhotoRow, AppError> {
    sqlx::query_as::<_, PlantPhotoRow>("SELECT * FROM plant_photos WHERE id = $1")
        .bind(photo_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))
}

/// Deletes the photo row and returns its object key for storage cleanup.
pub async fn delete_photo(pool: &PgPool, photo_id: Uuid) -> Result<String, AppError> {
    sqlx::query_scalar("DELETE FROM plant_photos WHERE id = $1 RETURNING s3_key")
        .bind(photo_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn plant(id: Uuid) -> PlantRow {
        let now = Utc::now();
        PlantRow {
            id,
            user_id: Uuid::nil(),
            name: "Monty".to_string(),
            species: "Monstera".to_string(),
            location: "Jakarta".to_string(),
            light: "sedang".to_string(),
            temperature: 26.0,
            care_recommendation: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn photo(plant_id: Uuid, minutes_ago: i64) -> PlantPhotoRow {
        PlantPhotoRow {
            id: Uuid::new_v4(),
            plant_id,
            photo_url: format!("http://s3/bucket/{minutes_ago}.jpg"),
            s3_key: format!("plant_photos/{plant_id}/{minutes_ago}.jpg"),
            uploaded_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_attach_photos_groups_by_plant_and_keeps_order() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let photos = vec![photo(a, 1), photo(b, 2), photo(a, 3)];
        let result = attach_photos(vec![plant(a), plant(b), plant(c)], photos);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].plant.id, a);
        assert_eq!(result[0].photos.len(), 2);
        assert!(result[0].photos[0].uploaded_at > result[0].photos[1].uploaded_at);
        assert_eq!(result[1].photos.len(), 1);
        assert!(result[2].photos.is_empty());
    }

    #[test]
    fn test_plant_with_photos_serializes_flat() {
        let id = Uuid::new_v4();
        let with = PlantWithPhotos {
            plant: plant(id),
            photos: vec![photo(id, 0)],
        };
        let json = serde_json::to_value(&with).unwrap();
        assert_eq!(json["name"], "Monty");
        assert_eq!(json["photos"].as_array().unwrap().len(), 1);
    }
}
