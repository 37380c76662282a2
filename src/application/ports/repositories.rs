//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）
//!
//! 实现必须使用参数绑定，禁止把任何输入拼接进 SQL 文本

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{NewUser, User, UserId, Username};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 插入新用户，返回分配了 id 的聚合
    ///
    /// 用户名重复时返回 `RepositoryError::Duplicate`
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// 根据用户名查找用户
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<User>, RepositoryError>;

    /// 保存 profile 字段（display_name、updated_at）
    ///
    /// 用户不存在时返回 `RepositoryError::NotFound`
    async fn update_profile(&self, user: &User) -> Result<(), RepositoryError>;

    /// 用户总数
    async fn count(&self) -> Result<u64, RepositoryError>;
}
