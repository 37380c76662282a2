//! Session Sweeper - 过期会话清理

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::application::ports::SessionStorePort;

/// Sweeper 配置
#[derive(Debug, Clone)]
pub struct SessionSweeperConfig {
    /// 清理间隔
    pub interval: Duration,
}

impl Default for SessionSweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
        }
    }
}

/// 过期会话清理 Worker
///
/// `shutdown` 变为 true（或发送端被丢弃）时退出
pub struct SessionSweeper {
    config: SessionSweeperConfig,
    session_store: Arc<dyn SessionStorePort>,
    shutdown: watch::Receiver<bool>,
}

impl SessionSweeper {
    pub fn new(
        config: SessionSweeperConfig,
        session_store: Arc<dyn SessionStorePort>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            session_store,
            shutdown,
        }
    }

    /// 执行一次清理
    pub fn sweep_once(&self) -> usize {
        let purged = self.session_store.purge_expired(Utc::now());
        if purged > 0 {
            tracing::info!(
                purged = purged,
                remaining = self.session_store.len(),
                "Expired sessions purged"
            );
        }
        purged
    }

    /// 启动 Worker
    pub async fn run(mut self) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            "SessionSweeper started"
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        // 第一次 tick 立即完成
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("SessionSweeper stopped");
    }
}
