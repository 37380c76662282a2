//! User Command Handlers

use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::application::commands::{
    EnsureAdmin, EnsureAdminOutcome, RegisterUser, UpdateProfile, UpdateProfileResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{PasswordHasherPort, UserRepositoryPort};
use crate::application::queries::UserResponse;
use crate::domain::user::{check_password_policy, DisplayName, NewUser, UserId, Username};

// ============================================================================
// RegisterUser
// ============================================================================

/// RegisterUser Handler
///
/// 调用方负责权限检查（HTTP 层仅允许管理员调用）
pub struct RegisterUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
}

impl RegisterUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, hasher: Arc<dyn PasswordHasherPort>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn handle(&self, command: RegisterUser) -> Result<UserResponse, ApplicationError> {
        let username = Username::new(command.username)?;
        let display_name = DisplayName::new(&command.display_name)?;
        check_password_policy(command.password.expose_secret())?;

        let password_hash = self.hasher.hash(&command.password).await?;
        let new_user = NewUser::new(username, display_name, password_hash, command.is_admin);

        let user = self.user_repo.insert(new_user).await?;

        tracing::info!(
            user_id = %user.id(),
            username = %user.username(),
            admin = user.is_admin(),
            "User registered"
        );

        Ok(UserResponse::from(&user))
    }
}

// ============================================================================
// EnsureAdmin
// ============================================================================

/// EnsureAdmin Handler
///
/// 用户名已存在时不做任何修改（不会覆盖密码，也不会提升权限）
pub struct EnsureAdminHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    register: RegisterUserHandler,
}

impl EnsureAdminHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, hasher: Arc<dyn PasswordHasherPort>) -> Self {
        Self {
            register: RegisterUserHandler::new(user_repo.clone(), hasher),
            user_repo,
        }
    }

    pub async fn handle(&self, command: EnsureAdmin) -> Result<EnsureAdminOutcome, ApplicationError> {
        let username = Username::new(command.username.as_str())?;

        if let Some(existing) = self.user_repo.find_by_username(&username).await? {
            if !existing.is_admin() {
                tracing::warn!(
                    username = %username,
                    "Bootstrap admin username belongs to a non-admin user, leaving it unchanged"
                );
            }
            return Ok(EnsureAdminOutcome::AlreadyExists {
                user_id: existing.id(),
                is_admin: existing.is_admin(),
            });
        }

        let created = self
            .register
            .handle(RegisterUser {
                username: command.username,
                password: command.password,
                display_name: command.display_name,
                is_admin: true,
            })
            .await?;

        let user_id = UserId::new(created.id)?;
        Ok(EnsureAdminOutcome::Created { user_id })
    }
}

// ============================================================================
// UpdateProfile
// ============================================================================

/// UpdateProfile Handler
pub struct UpdateProfileHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UpdateProfileHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateProfile,
    ) -> Result<UpdateProfileResponse, ApplicationError> {
        let display_name = DisplayName::new(&command.display_name)?;

        let mut user = self
            .user_repo
            .find_by_id(command.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", command.user_id))?;

        user.rename(display_name);
        self.user_repo.update_profile(&user).await?;

        tracing::info!(user_id = %user.id(), "Profile updated");

        Ok(UpdateProfileResponse {
            user_id: user.id(),
            display_name: user.display_name().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestContext;
    use secrecy::SecretString;

    fn register(username: &str, password: &str, is_admin: bool) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
            display_name: format!("{username} display"),
            is_admin,
        }
    }

    #[tokio::test]
    async fn test_register_user_hashes_password() {
        let ctx = TestContext::new().await;
        let handler = RegisterUserHandler::new(ctx.user_repo.clone(), ctx.hasher.clone());

        let response = handler
            .handle(register("carol", "a-long-password", false))
            .await
            .unwrap();

        let user = ctx
            .user_repo
            .find_by_id(UserId::new(response.id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!user.password_hash().encode().contains("a-long-password"));
        assert!(ctx
            .hasher
            .verify(
                &SecretString::from("a-long-password".to_string()),
                user.password_hash()
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_username_conflicts() {
        let ctx = TestContext::new().await;
        let handler = RegisterUserHandler::new(ctx.user_repo.clone(), ctx.hasher.clone());

        handler
            .handle(register("carol", "a-long-password", false))
            .await
            .unwrap();
        let result = handler
            .handle(register("carol", "another-password", true))
            .await;

        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password_and_bad_username() {
        let ctx = TestContext::new().await;
        let handler = RegisterUserHandler::new(ctx.user_repo.clone(), ctx.hasher.clone());

        let weak = handler.handle(register("carol", "admin12", false)).await;
        assert!(matches!(weak, Err(ApplicationError::ValidationError(_))));

        let bad_name = handler
            .handle(register("x'; DROP TABLE users; --", "a-long-password", false))
            .await;
        assert!(matches!(bad_name, Err(ApplicationError::ValidationError(_))));

        assert_eq!(ctx.user_repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_profile_persists_raw_name() {
        let ctx = TestContext::new().await;
        let user_id = ctx.seed_user("alice", "wonderland-42", false).await;
        let handler = UpdateProfileHandler::new(ctx.user_repo.clone());

        let response = handler
            .handle(UpdateProfile {
                user_id,
                display_name: "  <b>Alice</b>  ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.display_name.as_str(), "<b>Alice</b>");
        let stored = ctx.user_repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(stored.display_name().as_str(), "<b>Alice</b>");
    }

    #[tokio::test]
    async fn test_update_profile_validation_and_missing_user() {
        let ctx = TestContext::new().await;
        let handler = UpdateProfileHandler::new(ctx.user_repo.clone());

        let empty = handler
            .handle(UpdateProfile {
                user_id: UserId::new(1).unwrap(),
                display_name: "   ".to_string(),
            })
            .await;
        assert!(matches!(empty, Err(ApplicationError::ValidationError(_))));

        let missing = handler
            .handle(UpdateProfile {
                user_id: UserId::new(404).unwrap(),
                display_name: "Ghost".to_string(),
            })
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_once() {
        let ctx = TestContext::new().await;
        let handler = EnsureAdminHandler::new(ctx.user_repo.clone(), ctx.hasher.clone());
        let command = || EnsureAdmin {
            username: "root".to_string(),
            password: SecretString::from("bootstrap-pass".to_string()),
            display_name: "Administrator".to_string(),
        };

        let first = handler.handle(command()).await.unwrap();
        let EnsureAdminOutcome::Created { user_id } = first else {
            panic!("expected admin to be created, got {first:?}");
        };

        let second = handler.handle(command()).await.unwrap();
        assert_eq!(
            second,
            EnsureAdminOutcome::AlreadyExists {
                user_id,
                is_admin: true
            }
        );
        assert_eq!(ctx.user_repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ensure_admin_does_not_promote_existing_user() {
        let ctx = TestContext::new().await;
        let user_id = ctx.seed_user("root", "original-pass", false).await;
        let handler = EnsureAdminHandler::new(ctx.user_repo.clone(), ctx.hasher.clone());

        let outcome = handler
            .handle(EnsureAdmin {
                username: "root".to_string(),
                password: SecretString::from("hijack-attempt".to_string()),
                display_name: "Administrator".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            EnsureAdminOutcome::AlreadyExists {
                user_id,
                is_admin: false
            }
        );
        let stored = ctx.user_repo.find_by_id(user_id).await.unwrap().unwrap();
        assert!(!stored.is_admin());
        assert!(ctx
            .hasher
            .verify(
                &SecretString::from("original-pass".to_string()),
                stored.password_hash()
            )
            .await
            .unwrap());
    }
}
