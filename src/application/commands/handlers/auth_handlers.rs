//! Auth Command Handlers

use chrono::Duration;
use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::application::commands::{Login, LoginResponse, Logout};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    PasswordHasherPort, Session, SessionStorePort, UserRepositoryPort,
};
use crate::domain::user::Username;

// ============================================================================
// Login
// ============================================================================

/// Login Handler
///
/// 用户不存在、用户名非法、密码错误三种情况返回同一个错误，
/// 且都会执行一次完整的哈希校验
pub struct LoginHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    session_store: Arc<dyn SessionStorePort>,
    hasher: Arc<dyn PasswordHasherPort>,
    session_ttl: Duration,
}

impl LoginHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        session_store: Arc<dyn SessionStorePort>,
        hasher: Arc<dyn PasswordHasherPort>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_repo,
            session_store,
            hasher,
            session_ttl,
        }
    }

    pub async fn handle(&self, command: Login) -> Result<LoginResponse, ApplicationError> {
        let user = match Username::new(command.username.as_str()) {
            Ok(username) => self.user_repo.find_by_username(&username).await?,
            Err(_) => None,
        };

        let hash = user
            .as_ref()
            .map(|u| u.password_hash())
            .unwrap_or_else(|| self.hasher.dummy_hash());
        let verified = self.hasher.verify(&command.password, hash).await?
            && !command.password.expose_secret().is_empty();

        let user = match (user, verified) {
            (Some(user), true) => user,
            _ => {
                // 用户名未经校验，Debug 格式转义换行等控制字符
                tracing::warn!(username = ?command.username, "Login failed");
                return Err(ApplicationError::InvalidCredentials);
            }
        };

        let session = Session::new(user.id(), user.is_admin(), self.session_ttl);
        let expires_at = session.expires_at;
        let token = self.session_store.create(session)?;

        tracing::info!(
            user_id = %user.id(),
            username = %user.username(),
            admin = user.is_admin(),
            "User logged in"
        );

        Ok(LoginResponse {
            token,
            admin: user.is_admin(),
            expires_at,
        })
    }
}

// ============================================================================
// Logout
// ============================================================================

/// Logout Handler
pub struct LogoutHandler {
    session_store: Arc<dyn SessionStorePort>,
}

impl LogoutHandler {
    pub fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    pub async fn handle(&self, command: Logout) -> Result<(), ApplicationError> {
        self.session_store.remove(&command.token)?;
        tracing::info!("Session closed by logout");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::security::Sha256PasswordHasher;
    use crate::test_support::{TestContext, Ticker};
    use secrecy::SecretString;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn login(username: &str, password: &str) -> Login {
        Login {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    fn handler(ctx: &TestContext) -> LoginHandler {
        LoginHandler::new(
            ctx.user_repo.clone(),
            ctx.session_store.clone(),
            ctx.hasher.clone(),
            Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_login_success_creates_session() {
        let ctx = TestContext::new().await;
        ctx.seed_user("alice", "wonderland-42", false).await;

        let response = handler(&ctx)
            .handle(login("alice", "wonderland-42"))
            .await
            .unwrap();

        assert!(!response.admin);
        let session = ctx.session_store.get(&response.token).unwrap();
        assert_eq!(session.expires_at, response.expires_at);
    }

    #[tokio::test]
    async fn test_login_reports_admin_flag_from_storage() {
        let ctx = TestContext::new().await;
        ctx.seed_user("root", "s3cure-root-pass", true).await;

        let response = handler(&ctx)
            .handle(login("root", "s3cure-root-pass"))
            .await
            .unwrap();

        assert!(response.admin);
        assert!(ctx.session_store.get(&response.token).unwrap().is_admin);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let ctx = TestContext::new().await;
        ctx.seed_user("alice", "wonderland-42", false).await;

        let result = handler(&ctx).handle(login("alice", "wonderland-43")).await;

        assert!(matches!(result, Err(ApplicationError::InvalidCredentials)));
        assert!(ctx.session_store.is_empty());
    }

    #[tokio::test]
    async fn test_login_unknown_user_and_wrong_password_look_the_same() {
        let ctx = TestContext::new().await;
        ctx.seed_user("alice", "wonderland-42", false).await;
        let handler = handler(&ctx);

        let unknown = handler.handle(login("mallory", "wonderland-42")).await;
        let wrong = handler.handle(login("alice", "nope-nope-nope")).await;

        assert_eq!(
            unknown.unwrap_err().to_string(),
            wrong.unwrap_err().to_string()
        );
    }

    #[tokio::test]
    async fn test_login_has_no_master_password() {
        let ctx = TestContext::new().await;
        ctx.seed_user("alice", "wonderland-42", true).await;

        for candidate in ["admin123", "admin", "password", ""] {
            let result = handler(&ctx).handle(login("alice", candidate)).await;
            assert!(
                matches!(result, Err(ApplicationError::InvalidCredentials)),
                "password {candidate:?} must not log in"
            );
        }
    }

    #[tokio::test]
    async fn test_login_with_injection_username_fails_cleanly() {
        let ctx = TestContext::new().await;
        ctx.seed_user("alice", "wonderland-42", false).await;

        let result = handler(&ctx)
            .handle(login("alice' OR '1'='1", "anything"))
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidCredentials)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_login_does_not_stall_executor() {
        let ctx = TestContext::new().await;
        let slow = LoginHandler::new(
            ctx.user_repo.clone(),
            ctx.session_store.clone(),
            Arc::new(Sha256PasswordHasher::new(100_000).unwrap()),
            Duration::hours(1),
        );
        let ticker = Ticker::start().await;

        let before = ticker.ticks();
        let result = slow.handle(login("nobody", "some-password")).await;

        assert!(matches!(result, Err(ApplicationError::InvalidCredentials)));
        assert!(
            ticker.ticks() > before,
            "other tasks made no progress during login"
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_login_failure_log_escapes_username() {
        let ctx = TestContext::new().await;
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let result = handler(&ctx)
            .handle(login("mallory\nINFO forged: root logged in", "whatever-pass"))
            .await;
        assert!(matches!(result, Err(ApplicationError::InvalidCredentials)));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Login failed"));
        assert!(output.contains(r"mallory\nINFO forged"));
        assert!(!output.contains("\nINFO forged"));
    }

    #[tokio::test]
    async fn test_logout_removes_session() {
        let ctx = TestContext::new().await;
        ctx.seed_user("alice", "wonderland-42", false).await;
        let response = handler(&ctx)
            .handle(login("alice", "wonderland-42"))
            .await
            .unwrap();

        let logout = LogoutHandler::new(ctx.session_store.clone());
        logout
            .handle(Logout {
                token: response.token.clone(),
            })
            .await
            .unwrap();

        assert!(ctx.session_store.get(&response.token).is_none());

        let again = logout
            .handle(Logout {
                token: response.token,
            })
            .await;
        assert!(matches!(again, Err(ApplicationError::Unauthenticated)));
    }
}
