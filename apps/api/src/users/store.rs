//! User queries.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::users::validation::ValidProfile;

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(user_not_found)
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    profile: &ValidProfile,
) -> Result<User, AppError> {
    let result = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = $1, email = $2, picture = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.picture)
    .bind(user_id)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(user_not_found()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Validation(
            "email is already in use".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Deletes the user with their plants and photo rows. Returns the photo object
/// keys so the caller can remove them from storage.
pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>, AppError> {
    let mut tx = pool.begin().await?;

    let keys: Vec<String> = sqlx::query_scalar(
        r#"
        DELETE FROM plant_photos
        WHERE plant_id IN (SELECT id FROM plants WHERE user_id = $1)
        RETURNING s3_key
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM plants WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if deleted == 0 {
        // Dropping the transaction rolls back the plant and photo deletes.
        return Err(user_not_found());
    }

    tx.commit().await?;
    info!("Deleted user {user_id} and {} photo(s)", keys.len());
    Ok(keys)
}
