use bytes::Bytes;
use shared::UploadedPhoto;
use uuid::Uuid;

use crate::application::ports::PhotoStorage;
use crate::application::Actor;
use crate::error::{AppError, Result};

/// A file taken from the multipart form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

pub async fn execute<S: PhotoStorage + ?Sized>(
    storage: &S,
    actor: &Actor,
    upload: PhotoUpload,
    max_bytes: u64,
) -> Result<UploadedPhoto> {
    let extension = extension_for(&upload.content_type).ok_or_else(|| {
        AppError::Validation("Недопустимый формат файла. Разрешены только JPEG, PNG и WebP".to_string())
    })?;
    let size = upload.data.len() as u64;
    if size > max_bytes {
        return Err(AppError::Validation(format!(
            "Размер файла превышает допустимый лимит ({}MB)",
            max_bytes / (1024 * 1024)
        )));
    }

    let key = format!("property-photos/{}/{}.{}", actor.id, Uuid::new_v4(), extension);
    let url = storage.store(&key, upload.data).await?;
    tracing::info!(key = %key, size, by = %actor.id, "Photo uploaded");

    Ok(UploadedPhoto {
        url,
        name: upload.file_name,
        size,
        content_type: upload.content_type,
    })
}
