use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::io::ErrorKind;
use tokio::fs;
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/uploads/",
    tag = "uploads",
    responses(
        (status = 200, description = "Names of all stored image files", body = [String]),
        (status = 500, description = "Failed to read the uploads directory", body = ErrorResponse)
    )
)]
pub async fn list_uploads(State(state): State<AppState>) -> impl IntoResponse {
    let mut entries = match fs::read_dir(state.images.dir()).await {
        Ok(entries) => entries,
        // No uploads yet means no directory yet
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return (StatusCode::OK, Json(Vec::<String>::new())).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read uploads directory: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error reading directory")),
            )
                .into_response();
        }
    };

    let mut files = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        if let Ok(name) = entry.file_name().into_string() {
            files.push(name);
        }
    }
    files.sort();

    (StatusCode::OK, Json(files)).into_response()
}

#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "uploads",
    params(
        ("filename" = String, Path, description = "Stored image filename")
    ),
    responses(
        (status = 200, description = "Image file contents"),
        (status = 404, description = "No such file", body = ErrorResponse)
    )
)]
pub async fn get_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    // Only bare filenames can address the store
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("File not found")),
        )
            .into_response();
    }

    match fs::read(state.images.dir().join(&filename)).await {
        Ok(data) => file_response(&filename, data).into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("File not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to read upload {}: {}", filename, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error")),
            )
                .into_response()
        }
    }
}

fn file_response(filename: &str, data: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(filename))
        .body(Body::from(data))
        .unwrap()
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[derive(OpenApi)]
#[openapi(paths(list_uploads, get_upload))]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("recipe-1-2.jpg"), "image/jpeg");
        assert_eq!(content_type_for("recipe-1-2.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("recipe-1-2.png"), "image/png");
        assert_eq!(content_type_for("recipe-1-2"), "application/octet-stream");
    }
}
