//! usersvc - 用户资料服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - User Context: 用户标识、用户名、显示名称、密码哈希
//! - Markup: HTML 转义与欢迎页渲染
//!
//! 应用层 (application/):
//! - Ports: 端口定义（UserRepository, SessionStore, PasswordHasher）
//! - Commands: Login, Logout, RegisterUser, UpdateProfile
//! - Queries: GetUser
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + profile 表单
//! - Memory: SessionStore 内存实现
//! - Persistence: SQLite
//! - Security: 密码哈希
//! - Worker: 过期会话清理

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

pub use config::{load_config, AppConfig};
