//! Authentication middleware for Axum
//!
//! `authorize` is layered per route group with a [`RoleGate`] naming the role
//! the caller must hold.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::common::ApiError;
use crate::domain::{DomainError, Role};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientAccess { role: Role },
}

/// Authentication state containing the JWT config
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Middleware state: who may pass
#[derive(Clone)]
pub struct RoleGate {
    pub auth: AuthState,
    pub role: Role,
}

impl RoleGate {
    pub fn new(auth: &AuthState, role: Role) -> Self {
        Self {
            auth: auth.clone(),
            role,
        }
    }
}

/// Authenticated caller, inserted into request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            role: claims.role()?,
            name: claims.name,
            email: claims.email,
        })
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Role-gated JWT middleware
pub async fn authorize(
    State(gate): State<RoleGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &gate.auth.jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Rejected bearer token: {}", e);
            return auth_error_response(AuthError::InvalidToken);
        }
    };
    if claims.is_expired() {
        return auth_error_response(AuthError::ExpiredToken);
    }

    let Some(user) = AuthenticatedUser::from_claims(claims) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    if user.role != gate.role {
        return auth_error_response(AuthError::InsufficientAccess { role: user.role });
    }

    request.extensions_mut().insert(user);
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let err = match error {
        AuthError::MissingToken => DomainError::Unauthorized("Missing authentication token".into()),
        AuthError::InvalidToken => DomainError::Unauthorized("Invalid authentication token".into()),
        AuthError::ExpiredToken => DomainError::Unauthorized("Token has expired".into()),
        AuthError::InsufficientAccess { role } => DomainError::InsufficientAccess {
            role: role.as_str().to_string(),
        },
    };

    ApiError::from_domain(StatusCode::UNAUTHORIZED, err).into_response()
}
