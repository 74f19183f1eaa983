use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    Json,
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::interfaces::http::common::ApiError;

#[derive(Clone)]
pub struct ApplicationState {
    pub service_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub status: String,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Application",
    responses((status = 200, description = "Service is up", body = RootResponse))
)]
pub async fn handle_root(State(state): State<ApplicationState>) -> Json<RootResponse> {
    Json(RootResponse {
        status: "OK".to_string(),
        message: format!("{} is up and running!", state.service_name),
    })
}

/// Fallback for every unmatched route
pub async fn handle_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "NotFoundError", "Not found!").with_details(json!({
        "method": method.as_str(),
        "url": uri.to_string(),
    }))
}
