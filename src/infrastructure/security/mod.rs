//! Security Adapters
//!
//! 密码哈希实现

mod password_hasher;

pub use password_hasher::Sha256PasswordHasher;
