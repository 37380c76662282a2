//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::user::{check_password_policy, Username};

/// 允许配置的最小哈希迭代次数
pub const MIN_HASH_ITERATIONS: u32 = 10_000;

/// 会话有效期上限（30 天）
pub const MAX_SESSION_TTL_SECS: u64 = 30 * 24 * 3600;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `USERSVC_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `USERSVC_SERVER__PORT=8080`
/// - `USERSVC_DATABASE__PATH=/data/users.db`
/// - `USERSVC_BOOTSTRAP__ADMIN_USERNAME=root`
/// - `USERSVC_BOOTSTRAP__ADMIN_PASSWORD=...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_config_with_env(config_path, env_source())
}

/// 环境变量来源
///
/// 值一律按字符串读入（`0012345678` 这类密码必须原样保留），
/// 数值/布尔字段在反序列化时转换
fn env_source() -> Environment {
    Environment::with_prefix("USERSVC")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(false)
}

fn load_config_with_env(
    config_path: Option<&Path>,
    env: Environment,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("server.max_body_bytes", 16 * 1024)?
        .set_default("database.path", "data/users.db")?
        .set_default("database.max_connections", 5)?
        .set_default("session.ttl_secs", 3600)?
        .set_default("session.sweep_interval_secs", 60)?
        .set_default("security.hash_iterations", 100_000)?
        .set_default("bootstrap.admin_display_name", "Administrator")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: USERSVC_SESSION__TTL_SECS=600
    builder = builder.add_source(env);

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.session.ttl_secs == 0 || config.session.ttl_secs > MAX_SESSION_TTL_SECS {
        return Err(ConfigError::ValidationError(format!(
            "Session TTL must be between 1 and {} seconds",
            MAX_SESSION_TTL_SECS
        )));
    }

    if config.session.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Session sweep interval cannot be 0".to_string(),
        ));
    }

    if config.security.hash_iterations < MIN_HASH_ITERATIONS {
        return Err(ConfigError::ValidationError(format!(
            "Hash iterations must be at least {}",
            MIN_HASH_ITERATIONS
        )));
    }

    let bootstrap = &config.bootstrap;
    match (&bootstrap.admin_username, &bootstrap.admin_password) {
        (Some(username), Some(password)) => {
            Username::new(username.as_str()).map_err(|e| {
                ConfigError::ValidationError(format!("Bootstrap admin username: {}", e))
            })?;
            check_password_policy(password).map_err(|e| {
                ConfigError::ValidationError(format!("Bootstrap admin password: {}", e))
            })?;
        }
        (None, None) => {}
        _ => {
            return Err(ConfigError::ValidationError(
                "Bootstrap admin requires both admin_username and admin_password".to_string(),
            ));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，不输出任何密钥）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Max Body Size: {} bytes", config.server.max_body_bytes);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Session TTL: {}s", config.session.ttl_secs);
    tracing::info!("Session Sweep Interval: {}s", config.session.sweep_interval_secs);
    tracing::info!("Hash Iterations: {}", config.security.hash_iterations);
    match &config.bootstrap.admin_username {
        Some(username) => tracing::info!("Bootstrap Admin: {}", username),
        None => tracing::info!("Bootstrap Admin: <none>"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
