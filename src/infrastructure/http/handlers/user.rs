//! User Handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::{GetUser, RegisterUser, UserResponse};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::AuthenticatedUser;
use crate::infrastructure::http::state::AppState;

/// 获取用户详情
///
/// 路径参数按原样传给应用层，由 `UserId::parse` 决定是否合法
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let result = state
        .get_user_handler
        .handle(GetUser { user_id: id })
        .await?;

    Ok(Json(ApiResponse::success(result)))
}

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub display_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// 创建用户（仅管理员）
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    auth.require_admin()?;

    let cmd = RegisterUser {
        username: req.username,
        password: SecretString::from(req.password),
        display_name: req.display_name,
        is_admin: req.is_admin,
    };

    let result = state.register_user_handler.handle(cmd).await?;

    tracing::info!(
        created_by = %auth.user_id,
        user_id = result.id,
        "User created via API"
    );

    Ok(Json(ApiResponse::success(result)))
}
