//! User Queries

use serde::Serialize;

use crate::domain::user::User;

/// 获取用户详情查询
///
/// `user_id` 保留调用方的原始输入，由 handler 负责解析
#[derive(Debug, Clone)]
pub struct GetUser {
    pub user_id: String,
}

/// 用户详情（不含密码哈希）
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            username: user.username().to_string(),
            display_name: user.display_name().to_string(),
            is_admin: user.is_admin(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}
