use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::post,
    Router,
};
use shared::UploadedPhoto;

use crate::application::listings::commands::upload_photo::{self, PhotoUpload};
use crate::error::{AppError, Result};
use crate::infrastructure::driving::http::middleware::AuthenticatedUser;
use crate::infrastructure::AppState;

/// Room for the multipart framing around a file of the maximum size.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn files_routes(max_upload_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);
    Router::new()
        .route("/api/photos/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
}

async fn upload_file(
    auth: AuthenticatedUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadedPhoto>> {
    let invalid = |e: axum::extract::multipart::MultipartError| AppError::Validation(e.body_text());

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(invalid)?;
        upload = Some(PhotoUpload {
            file_name,
            content_type,
            data,
        });
        break;
    }
    let upload = upload.ok_or_else(|| AppError::Validation("Файл не найден".to_string()))?;

    let photo = upload_photo::execute(
        state.photos.as_ref(),
        &auth.actor(),
        upload,
        state.settings.storage.max_upload_bytes,
    )
    .await?;
    Ok(Json(photo))
}
