//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod user_repo;

pub use database::*;
pub use user_repo::*;
