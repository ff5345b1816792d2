//! Plant photo storage on S3 / MinIO.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Max accepted photo size.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Object key prefix for every photo.
pub const PHOTO_PREFIX: &str = "plant_photos";

/// Maps an image content type to a file extension. Non-images are rejected.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

pub fn photo_key(plant_id: Uuid, photo_id: Uuid, extension: &str) -> String {
    format!("{PHOTO_PREFIX}/{plant_id}/{photo_id}.{extension}")
}

/// Path-style public URL for an object.
pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

/// Checks size and type, returning the extension to store under.
pub fn validate_photo(content_type: &str, data: &Bytes) -> Result<&'static str, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("Photo is empty".to_string()));
    }
    if data.len() > MAX_PHOTO_BYTES {
        return Err(AppError::Validation(format!(
            "Photo exceeds {} MB",
            MAX_PHOTO_BYTES / (1024 * 1024)
        )));
    }
    extension_for(content_type)
        .ok_or_else(|| AppError::Validation(format!("Unsupported photo type: {content_type}")))
}

/// Uploads a photo and returns `(key, url)`.
pub async fn upload_photo(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    endpoint: &str,
    plant_id: Uuid,
    content_type: &str,
    data: Bytes,
) -> Result<(String, String), AppError> {
    let extension = validate_photo(content_type, &data)?;
    let key = photo_key(plant_id, Uuid::new_v4(), extension);

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(data))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("upload failed: {e}")))?;

    info!("Uploaded plant photo to s3://{}/{}", bucket, key);
    let url = public_url(endpoint, bucket, &key);
    Ok((key, url))
}

async fn delete_photo_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<(), AppError> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("delete failed: {e}")))?;
    info!("Deleted s3://{}/{}", bucket, key);
    Ok(())
}

/// Removes objects whose rows are already gone. Failures are logged and
/// counted, never returned: the database is the source of truth.
pub async fn remove_orphaned_objects(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    keys: &[String],
) -> usize {
    let mut failed = 0;
    for key in keys {
        if let Err(e) = delete_photo_object(s3, bucket, key).await {
            warn!("Orphaned photo object {key}: {e}");
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_storage_cleanup_failure_is_counted_not_raised() {
        // No credentials provider: every request fails before leaving the process.
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("us-east-1"))
            .endpoint_url("http://127.0.0.1:1")
            .build();
        let s3 = aws_sdk_s3::Client::from_conf(config);
        let keys = vec![
            "plant_photos/a/1.jpg".to_string(),
            "plant_photos/a/2.jpg".to_string(),
        ];

        assert_eq!(remove_orphaned_objects(&s3, "plants", &keys).await, 2);
        assert_eq!(remove_orphaned_objects(&s3, "plants", &[]).await, 0);
    }

    #[test]
    fn test_extension_for_images_only() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("application/pdf"), None);
    }

    #[test]
    fn test_photo_key_layout() {
        let plant = Uuid::nil();
        let photo = Uuid::nil();
        assert_eq!(
            photo_key(plant, photo, "png"),
            format!("plant_photos/{plant}/{photo}.png")
        );
    }

    #[test]
    fn test_public_url_trims_trailing_slash() {
        assert_eq!(
            public_url("http://localhost:9000/", "plants", "plant_photos/a.jpg"),
            "http://localhost:9000/plants/plant_photos/a.jpg"
        );
    }

    #[test]
    fn test_validate_photo_rejects_empty_large_and_non_image() {
        assert!(validate_photo("image/png", &Bytes::new()).is_err());
        assert!(validate_photo("image/png", &Bytes::from(vec![0u8; MAX_PHOTO_BYTES + 1])).is_err());
        assert!(validate_photo("text/plain", &Bytes::from_static(b"hi")).is_err());
        assert_eq!(validate_photo("image/webp", &Bytes::from_static(b"RIFF")).unwrap(), "webp");
    }
}
