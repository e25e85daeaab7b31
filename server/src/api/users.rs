use crate::api::ErrorResponse;
use crate::models::Recipe;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/users/{user_id}/recipes",
    tag = "users",
    params(
        ("user_id" = String, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Recipes created by the given author", body = [Recipe]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_user_recipes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.recipes.list_by_author(&user_id).await {
        Ok(recipes) => (StatusCode::OK, Json(recipes)).into_response(),
        Err(e) => {
            tracing::error!("Failed to list recipes for user {}: {}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error")),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(paths(list_user_recipes))]
pub struct ApiDoc;
