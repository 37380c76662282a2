//! Profile Handler
//!
//! 表单提交 `name`，返回欢迎页 HTML

use axum::{
    extract::State,
    response::Html,
    Extension, Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::UpdateProfile;
use crate::domain::render_welcome;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::AuthenticatedUser;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: Option<String>,
}

/// 更新当前用户的显示名称
///
/// 只能修改会话所属用户本人
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Form(form): Form<ProfileForm>,
) -> Result<Html<String>, ApiError> {
    let name = form
        .name
        .ok_or_else(|| ApiError::BadRequest("form field 'name' is required".to_string()))?;

    let result = state
        .update_profile_handler
        .handle(UpdateProfile {
            user_id: auth.user_id,
            display_name: name,
        })
        .await?;

    Ok(Html(render_welcome(&result.display_name)))
}
