//! User Context - 用户限界上下文
//!
//! 职责:
//! - 用户标识与用户名校验
//! - 显示名称（profile）管理
//! - 密码策略与哈希存储格式

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::{NewUser, User};
pub use errors::UserError;
pub use value_objects::{
    check_password_policy, DisplayName, PasswordHash, UserId, Username, MIN_PASSWORD_LEN,
};
