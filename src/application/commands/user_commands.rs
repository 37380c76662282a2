//! User Commands

use secrecy::SecretString;

use crate::domain::user::{DisplayName, UserId};

/// 注册用户命令
#[derive(Debug)]
pub struct RegisterUser {
    pub username: String,
    pub password: SecretString,
    pub display_name: String,
    pub is_admin: bool,
}

/// 更新 profile 命令
#[derive(Debug, Clone)]
pub struct UpdateProfile {
    pub user_id: UserId,
    pub display_name: String,
}

/// 更新 profile 结果
#[derive(Debug, Clone)]
pub struct UpdateProfileResponse {
    pub user_id: UserId,
    pub display_name: DisplayName,
}

/// 确保初始管理员存在（启动时执行）
#[derive(Debug)]
pub struct EnsureAdmin {
    pub username: String,
    pub password: SecretString,
    pub display_name: String,
}

/// EnsureAdmin 结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureAdminOutcome {
    Created { user_id: UserId },
    AlreadyExists { user_id: UserId, is_admin: bool },
}
