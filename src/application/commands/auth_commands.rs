//! Auth Commands

use chrono::{DateTime, Utc};
use secrecy::SecretString;

/// 登录命令
#[derive(Debug)]
pub struct Login {
    pub username: String,
    pub password: SecretString,
}

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub admin: bool,
    pub expires_at: DateTime<Utc>,
}

/// 注销命令
#[derive(Debug, Clone)]
pub struct Logout {
    pub token: String,
}
