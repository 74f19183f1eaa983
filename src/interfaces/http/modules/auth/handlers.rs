//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{LoginRequest, RegisterRequest, TokenResponse, WhoAmIResponse};
use crate::application::AuthService;
use crate::interfaces::http::common::{ApiError, ErrorResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth_service: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "Email not registered", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let access_token = state.auth_service.login(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { access_token })))
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Customer registered", body = TokenResponse),
        (status = 422, description = "Email already taken or invalid input", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let access_token = state
        .auth_service
        .register(&req.name, &req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { access_token })))
}

#[utoipa::path(
    get,
    path = "/v1/auth/whoami",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller identity", body = WhoAmIResponse),
        (status = 401, description = "Missing token or not a customer", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    )
)]
pub async fn whoami(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<WhoAmIResponse>, ApiError> {
    let user = state.auth_service.whoami(user.user_id).await?;
    Ok(Json(user.into()))
}
