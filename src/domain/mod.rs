//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - User Context: 用户资料与凭据

pub mod user;

// 共享的 HTML 渲染工具
mod markup;

pub use markup::{escape_html, render_welcome};
