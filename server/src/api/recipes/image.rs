use crate::api::ErrorResponse;
use crate::images::{ImageError, MAX_FILE_SIZE};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    /// Public path of the stored image, to be persisted on the recipe
    pub image_url: String,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/recipes/{id}/image",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 200, description = "Image stored and recipe updated", body = UploadImageResponse),
        (status = 400, description = "Missing or invalid file", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Pull the "image" field out of the form
    let mut file: Option<(String, String, Bytes)> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Multipart read error: {}", e);
                let error_msg = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    format!("File too large. Maximum size is {} bytes", MAX_FILE_SIZE)
                } else {
                    format!("Failed to read multipart data: {}", e.body_text())
                };
                return (e.status(), Json(ErrorResponse::new(error_msg))).into_response();
            }
        };

        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();

        let data = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Field read error: {}", e);
                let error_msg = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    format!("File too large. Maximum size is {} bytes", MAX_FILE_SIZE)
                } else {
                    format!("Failed to read file data: {}", e.body_text())
                };
                return (e.status(), Json(ErrorResponse::new(error_msg))).into_response();
            }
        };

        file = Some((file_name, content_type, data));
        break;
    }

    let Some((file_name, content_type, data)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No file uploaded")),
        )
            .into_response();
    };

    // The target recipe must exist before anything touches the disk
    match state.recipes.get_by_id(&id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Recipe not found")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error")),
            )
                .into_response();
        }
    }

    let stored = match state.images.store(&data, &file_name, &content_type).await {
        Ok(stored) => stored,
        Err(e @ (ImageError::NotAnImage | ImageError::TooLarge)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to store upload for recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error")),
            )
                .into_response();
        }
    };

    match state.recipes.set_image(&id, &stored.url).await {
        Ok(Some(_)) => {
            tracing::info!("Image saved successfully: {} -> {}", id, stored.url);
            (
                StatusCode::OK,
                Json(UploadImageResponse {
                    image_url: stored.url,
                    message: "Image uploaded successfully".to_string(),
                }),
            )
                .into_response()
        }
        // The recipe vanished between the existence check and the write
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Recipe not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to record image on recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error")),
            )
                .into_response()
        }
    }
}
