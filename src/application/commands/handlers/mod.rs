//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod auth_handlers;
mod user_handlers;

pub use auth_handlers::*;
pub use user_handlers::*;
