//! 单元测试共用的装配：内存 SQLite + 内存会话 + 低迭代次数哈希器

use secrecy::SecretString;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::application::ports::{PasswordHasherPort, UserRepositoryPort};
use crate::domain::user::{DisplayName, NewUser, UserId, Username};
use crate::infrastructure::memory::InMemorySessionStore;
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteUserRepository,
};
use crate::infrastructure::security::Sha256PasswordHasher;

pub(crate) struct TestContext {
    pub user_repo: Arc<SqliteUserRepository>,
    pub session_store: Arc<InMemorySessionStore>,
    pub hasher: Arc<Sha256PasswordHasher>,
}

impl TestContext {
    pub async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        Self {
            user_repo: Arc::new(SqliteUserRepository::new(pool)),
            session_store: Arc::new(InMemorySessionStore::new()),
            hasher: Arc::new(Sha256PasswordHasher::new(100).unwrap()),
        }
    }

    pub async fn seed_user(&self, username: &str, password: &str, is_admin: bool) -> UserId {
        let hash = self
            .hasher
            .hash(&SecretString::from(password.to_string()))
            .await
            .unwrap();
        let user = NewUser::new(
            Username::new(username).unwrap(),
            DisplayName::new(username).unwrap(),
            hash,
            is_admin,
        );
        self.user_repo.insert(user).await.unwrap().id()
    }
}

/// 每毫秒计数一次的后台任务，用于检测异步运行时线程是否被阻塞
pub(crate) struct Ticker {
    ticks: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// 启动并等待第一次计数
    pub async fn start() -> Self {
        let ticks = Arc::new(AtomicU64::new(0));
        let counter = ticks.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(1)).await;
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

        while ticks.load(Ordering::Relaxed) == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        Self { ticks, handle }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
