//! Serves evidence images.

use std::path::Path;

use axum::{
    extract::{Path as UrlPath, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use super::{ApiError, ApiState};

const NOT_FOUND: &str = "Image not found";

/// A bare file name inside the image directory. Separators, NUL and the dot
/// entries are refused.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

fn content_type(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Returns an image from the evidence directory.
pub async fn image(
    State(state): State<ApiState>,
    UrlPath(filename): UrlPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !is_plain_file_name(&filename) {
        tracing::warn!(filename = %filename, "Rejected image request with unsafe file name.");
        return Err(ApiError::NotFound(NOT_FOUND.to_string()));
    }

    let path = state.config.server.image_dir.join(&filename);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "Image not served.");
        ApiError::NotFound(NOT_FOUND.to_string())
    })?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type(&filename))], bytes))
}
