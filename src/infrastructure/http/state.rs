//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use chrono::Duration;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    LoginHandler, LogoutHandler, RegisterUserHandler, UpdateProfileHandler,
    // Query handlers
    GetUserHandler,
    // Ports
    PasswordHasherPort, SessionStorePort, UserRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    /// 认证中间件直接查询会话
    pub session_store: Arc<dyn SessionStorePort>,

    // ========== Command Handlers ==========
    pub login_handler: LoginHandler,
    pub logout_handler: LogoutHandler,
    pub register_user_handler: RegisterUserHandler,
    pub update_profile_handler: UpdateProfileHandler,

    // ========== Query Handlers ==========
    pub get_user_handler: GetUserHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        session_store: Arc<dyn SessionStorePort>,
        hasher: Arc<dyn PasswordHasherPort>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            // Ports
            session_store: session_store.clone(),

            // Command handlers
            login_handler: LoginHandler::new(
                user_repo.clone(),
                session_store.clone(),
                hasher.clone(),
                session_ttl,
            ),
            logout_handler: LogoutHandler::new(session_store.clone()),
            register_user_handler: RegisterUserHandler::new(user_repo.clone(), hasher),
            update_profile_handler: UpdateProfileHandler::new(user_repo.clone()),

            // Query handlers
            get_user_handler: GetUserHandler::new(user_repo),
        }
    }
}
