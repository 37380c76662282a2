//! User Context - Aggregate Root

use chrono::{DateTime, Utc};

use super::{DisplayName, PasswordHash, UserId, Username};

/// User 聚合根
///
/// 不变量:
/// - id 由存储层分配，聚合创建后不可变
/// - username 唯一且不可修改
/// - password_hash 不会离开应用层（响应 DTO 中没有该字段）
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    display_name: DisplayName,
    password_hash: PasswordHash,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// 从持久化数据重建
    pub fn restore(
        id: UserId,
        username: Username,
        display_name: DisplayName,
        password_hash: PasswordHash,
        is_admin: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            display_name,
            password_hash,
            is_admin,
            created_at,
            updated_at,
        }
    }

    /// 修改显示名称
    pub fn rename(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    // Getters
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// 待创建的用户（尚未分配 id）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        display_name: DisplayName,
        password_hash: PasswordHash,
        is_admin: bool,
    ) -> Self {
        Self {
            username,
            display_name,
            password_hash,
            is_admin,
            created_at: Utc::now(),
        }
    }

    /// 分配 id 后转换为聚合
    pub fn into_user(self, id: UserId) -> User {
        User::restore(
            id,
            self.username,
            self.display_name,
            self.password_hash,
            self.is_admin,
            self.created_at,
            self.created_at,
        )
    }
}
