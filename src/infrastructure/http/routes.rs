//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查（公开）
//! - /api/auth/login        POST  登录，返回 token（公开）
//! - /api/auth/logout       POST  注销当前会话
//! - /api/users             POST  创建用户（仅管理员）
//! - /api/users/:id         GET   获取用户详情
//! - /profile               POST  更新显示名称（表单），返回 HTML

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::middleware::auth_middleware;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// 公开路由
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/auth/login", post(handlers::login))
}

/// 需要认证的路由
fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/users", post(handlers::register_user))
        .route("/api/users/:id", get(handlers::get_user))
        .route("/profile", post(handlers::update_profile))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
