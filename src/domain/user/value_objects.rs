//! User Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UserError;

/// 密码最小长度（字符）
pub const MIN_PASSWORD_LEN: usize = 8;

const MAX_PASSWORD_LEN: usize = 256;
const MAX_DISPLAY_NAME_LEN: usize = 100;
const HASH_SCHEME: &str = "sha256";

/// 用户唯一标识
///
/// 不变量: 值恒为正整数。外部输入只能经由 `parse` 进入，
/// 原始字符串不会被拼接进任何查询。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Result<Self, UserError> {
        if id <= 0 {
            return Err(UserError::InvalidId);
        }
        Ok(Self(id))
    }

    /// 解析外部输入的用户 ID（允许首尾空白，仅接受十进制数字）
    pub fn parse(raw: &str) -> Result<Self, UserError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UserError::InvalidId);
        }
        let id: i64 = trimmed.parse().map_err(|_| UserError::InvalidId)?;
        Self::new(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 登录用户名
///
/// 3-32 个字符，仅允许 ASCII 字母、数字以及 `_ . -`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub fn new(name: impl Into<String>) -> Result<Self, UserError> {
        let name = name.into();
        let len = name.chars().count();
        if !(3..=32).contains(&len) {
            return Err(UserError::InvalidUsername(
                "length must be between 3 and 32".to_string(),
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(UserError::InvalidUsername(
                "only letters, digits, '_', '.' and '-' are allowed".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 显示名称
///
/// 存储的是原始文本，渲染到 HTML 前必须经过 `escape_html`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(UserError::InvalidDisplayName(
                "display name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(UserError::InvalidDisplayName(format!(
                "display name cannot exceed {} characters",
                MAX_DISPLAY_NAME_LEN
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(UserError::InvalidDisplayName(
                "display name cannot contain control characters".to_string(),
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 校验明文密码是否满足策略
pub fn check_password_policy(password: &str) -> Result<(), UserError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(UserError::WeakPassword(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(UserError::WeakPassword(format!(
            "password cannot exceed {} characters",
            MAX_PASSWORD_LEN
        )));
    }
    if password.trim().is_empty() {
        return Err(UserError::WeakPassword(
            "password cannot be blank".to_string(),
        ));
    }
    Ok(())
}

/// 密码哈希
///
/// 存储格式: `sha256$<iterations>$<salt-hex>$<digest-hex>`
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    iterations: u32,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl PasswordHash {
    pub fn new(iterations: u32, salt: Vec<u8>, digest: Vec<u8>) -> Result<Self, UserError> {
        if iterations == 0 || salt.is_empty() || digest.is_empty() {
            return Err(UserError::MalformedPasswordHash);
        }
        Ok(Self {
            iterations,
            salt,
            digest,
        })
    }

    /// 从存储格式解析
    pub fn parse(encoded: &str) -> Result<Self, UserError> {
        let mut parts = encoded.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(digest), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(UserError::MalformedPasswordHash);
        };

        if scheme != HASH_SCHEME {
            return Err(UserError::MalformedPasswordHash);
        }

        let iterations: u32 = iterations
            .parse()
            .map_err(|_| UserError::MalformedPasswordHash)?;
        let salt = hex::decode(salt).map_err(|_| UserError::MalformedPasswordHash)?;
        let digest = hex::decode(digest).map_err(|_| UserError::MalformedPasswordHash)?;

        Self::new(iterations, salt, digest)
    }

    /// 编码为存储格式
    pub fn encode(&self) -> String {
        format!(
            "{}${}${}${}",
            HASH_SCHEME,
            self.iterations,
            hex::encode(&self.salt),
            hex::encode(&self.digest)
        )
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}
