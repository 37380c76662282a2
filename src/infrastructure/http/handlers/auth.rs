//! Auth Handlers

use axum::{extract::State, Extension, Json};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{Login, Logout};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::AuthenticatedUser;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Login
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponseDto {
    pub token: String,
    pub admin: bool,
    pub expires_at: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponseDto>>, ApiError> {
    let cmd = Login {
        username: req.username,
        password: SecretString::from(req.password),
    };

    let result = state.login_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(LoginResponseDto {
        token: result.token,
        admin: result.admin,
        expires_at: result.expires_at.to_rfc3339(),
    })))
}

// ============================================================================
// Logout
// ============================================================================

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .logout_handler
        .handle(Logout { token: auth.token })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
