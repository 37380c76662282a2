//! SQLite User Repository
//!
//! 所有语句均为静态 SQL + `?` 参数绑定

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{RepositoryError, UserRepositoryPort};
use crate::domain::user::{DisplayName, NewUser, PasswordHash, User, UserId, Username};

const SELECT_BY_ID: &str = "SELECT id, username, display_name, password_hash, is_admin, created_at, updated_at FROM users WHERE id = ?";
const SELECT_BY_USERNAME: &str = "SELECT id, username, display_name, password_hash, is_admin, created_at, updated_at FROM users WHERE username = ?";

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    display_name: String,
    password_hash: String,
    is_admin: bool,
    created_at: String,
    updated_at: String,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::domain::user::UserError| {
            RepositoryError::SerializationError(format!("user {}: {}", row.id, e))
        };

        Ok(User::restore(
            UserId::new(row.id).map_err(corrupt)?,
            Username::new(row.username.as_str()).map_err(corrupt)?,
            DisplayName::new(&row.display_name).map_err(corrupt)?,
            PasswordHash::parse(&row.password_hash).map_err(corrupt)?,
            row.is_admin,
            parse_timestamp(&row.created_at)?,
            parse_timestamp(&row.updated_at)?,
        ))
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let created_at = user.created_at.to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, display_name, password_hash, is_admin, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.display_name.as_str())
        .bind(user.password_hash.encode())
        .bind(user.is_admin)
        .bind(&created_at)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(format!("username {} already exists", user.username))
            }
            other => RepositoryError::DatabaseError(other.to_string()),
        })?;

        let id = UserId::new(result.last_insert_rowid())
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(user.into_user(id))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(SELECT_BY_USERNAME)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn update_profile(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET display_name = ?, updated_at = ? WHERE id = ?")
            .bind(user.display_name().as_str())
            .bind(user.updated_at().to_rfc3339())
            .bind(user.id().value())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("user {}", user.id())));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(count.max(0) as u64)
    }
}
