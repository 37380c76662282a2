//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（UserRepository、SessionStore、PasswordHasher）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Auth commands
    Login,
    LoginResponse,
    Logout,
    // User commands
    EnsureAdmin,
    EnsureAdminOutcome,
    RegisterUser,
    UpdateProfile,
    UpdateProfileResponse,
    // Handlers
    handlers::{
        EnsureAdminHandler, LoginHandler, LogoutHandler, RegisterUserHandler,
        UpdateProfileHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Password hasher
    HashError,
    PasswordHasherPort,
    // Repositories
    RepositoryError,
    UserRepositoryPort,
    // Session store
    Session,
    SessionError,
    SessionStorePort,
};

pub use queries::{
    // User queries
    GetUser,
    UserResponse,
    // Handlers
    handlers::GetUserHandler,
};
