//! usersvc - 用户资料服务
//!
//! 启动顺序: 配置 -> 日志 -> 数据库 -> 初始管理员 -> 会话清理 -> HTTP

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use usersvc::application::{
    EnsureAdmin, EnsureAdminHandler, EnsureAdminOutcome, UserRepositoryPort,
};
use usersvc::config::{load_config, print_config, AppConfig};
use usersvc::infrastructure::http::{AppState, HttpServer, ServerConfig};
use usersvc::infrastructure::memory::InMemorySessionStore;
use usersvc::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteUserRepository,
};
use usersvc::infrastructure::security::Sha256PasswordHasher;
use usersvc::infrastructure::worker::{SessionSweeper, SessionSweeperConfig};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},usersvc={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("usersvc - 用户资料服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建端口适配器
    let user_repo = Arc::new(SqliteUserRepository::new(pool));
    let user_count = user_repo.count().await?;
    tracing::info!(users = user_count, "User store ready");
    let session_store = Arc::new(InMemorySessionStore::new());
    let hasher = Arc::new(
        Sha256PasswordHasher::new(config.security.hash_iterations)
            .map_err(|e| anyhow::anyhow!("Failed to create password hasher: {}", e))?,
    );

    // 初始管理员
    if let (Some(username), Some(password)) = (
        config.bootstrap.admin_username.clone(),
        config.bootstrap.admin_password.clone(),
    ) {
        let handler = EnsureAdminHandler::new(user_repo.clone(), hasher.clone());
        let outcome = handler
            .handle(EnsureAdmin {
                username: username.clone(),
                password: SecretString::from(password),
                display_name: config.bootstrap.admin_display_name.clone(),
            })
            .await?;

        match outcome {
            EnsureAdminOutcome::Created { user_id } => {
                tracing::info!(user_id = %user_id, username = %username, "Bootstrap admin created");
            }
            EnsureAdminOutcome::AlreadyExists { user_id, .. } => {
                tracing::info!(user_id = %user_id, username = %username, "Bootstrap admin already present");
            }
        }
    }

    // 启动会话清理 Worker
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = SessionSweeper::new(
        SessionSweeperConfig {
            interval: std::time::Duration::from_secs(config.session.sweep_interval_secs),
        },
        session_store.clone(),
        shutdown_rx,
    );
    let sweeper_handle = tokio::spawn(sweeper.run());

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(
        &config.server.host,
        config.server.port,
        config.server.max_body_bytes,
    );
    // ttl_secs 上限已由配置校验保证
    let session_ttl = chrono::Duration::seconds(config.session.ttl_secs as i64);
    let state = AppState::new(user_repo, session_store, hasher, session_ttl);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    let _ = sweeper_handle.await;

    tracing::info!("Server shutdown complete");

    Ok(())
}
