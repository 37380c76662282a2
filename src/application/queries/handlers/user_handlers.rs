//! User Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::UserRepositoryPort;
use crate::application::queries::{GetUser, UserResponse};
use crate::domain::user::UserId;

/// GetUser Handler
///
/// 原始 ID 先解析为 `UserId`，无法解析的输入在进入仓储前即被拒绝
pub struct GetUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: GetUser) -> Result<UserResponse, ApplicationError> {
        let user_id = UserId::parse(&query.user_id)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", user_id))?;

        Ok(UserResponse::from(&user))
    }
}
