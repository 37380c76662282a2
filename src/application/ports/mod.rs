//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod password_hasher;
mod repositories;
mod session_store;

pub use password_hasher::{HashError, PasswordHasherPort};
pub use repositories::{RepositoryError, UserRepositoryPort};
pub use session_store::{Session, SessionError, SessionStorePort};
