//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod http;
pub mod memory;
pub mod persistence;
pub mod security;
pub mod worker;

pub use memory::InMemorySessionStore;
pub use security::Sha256PasswordHasher;
pub use worker::{SessionSweeper, SessionSweeperConfig};
