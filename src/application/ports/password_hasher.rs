//! Password Hasher Port

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use crate::domain::user::PasswordHash;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Password hashing failed: {0}")]
    Failed(String),
}

/// Password Hasher Port
///
/// 哈希计算是 CPU 密集型操作，实现不得阻塞异步运行时线程；
/// `verify` 必须以常量时间比较摘要
#[async_trait]
pub trait PasswordHasherPort: Send + Sync {
    /// 为明文密码生成带随机盐的哈希
    async fn hash(&self, password: &SecretString) -> Result<PasswordHash, HashError>;

    /// 校验明文密码
    async fn verify(&self, password: &SecretString, hash: &PasswordHash)
        -> Result<bool, HashError>;

    /// 用户不存在时参与校验的占位哈希，使两种失败路径耗时一致
    fn dummy_hash(&self) -> &PasswordHash;
}
