use actix_web::{HttpResponse, web};

use blog_core::ports::MediaStorage;
use blog_core::validation::ImageFormat;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET {MEDIA_URL}{path}
pub async fn serve(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let path = path.into_inner();
    let bytes = state
        .media
        .load(&path)
        .await
        .map_err(|e| {
            tracing::debug!(path = %path, "Media lookup refused: {}", e);
            AppError::NotFound(format!("media {path} not found"))
        })?
        .ok_or_else(|| AppError::NotFound(format!("media {path} not found")))?;

    let content_type = path
        .rsplit_once('.')
        .and_then(|(_, ext)| ImageFormat::from_extension(ext))
        .map(|format| format.content_type())
        .unwrap_or("application/octet-stream");

    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}
