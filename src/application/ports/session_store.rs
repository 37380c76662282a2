//! Session Store Port - 登录会话管理
//!
//! 定义会话存储的抽象接口，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Session Store 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,

    #[error("Session already exists")]
    AlreadyExists,
}

/// 登录会话（in-memory）
#[derive(Clone)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    /// 创建新会话，token 为随机 UUID v4（无连字符）
    pub fn new(user_id: UserId, is_admin: bool, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().simple().to_string(),
            user_id,
            is_admin,
            created_at: now,
            expires_at: now + ttl,
            last_seen: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("is_admin", &self.is_admin)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("last_seen", &self.last_seen)
            .finish()
    }
}

/// Session Store Port
///
/// 所有会话存储在内存中，进程重启后全部失效
pub trait SessionStorePort: Send + Sync {
    /// 保存新会话，返回 token
    fn create(&self, session: Session) -> Result<String, SessionError>;

    /// 获取未过期的会话
    fn get(&self, token: &str) -> Option<Session>;

    /// 更新最后活动时间
    fn touch(&self, token: &str);

    /// 删除会话
    fn remove(&self, token: &str) -> Result<(), SessionError>;

    /// 清除所有已过期的会话，返回清除数量
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    /// 当前会话数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
