use axum::response::IntoResponse;
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Liveness check", body = String)
    )
)]
pub async fn health() -> impl IntoResponse {
    "Server is running"
}

#[derive(OpenApi)]
#[openapi(paths(health))]
pub struct ApiDoc;
