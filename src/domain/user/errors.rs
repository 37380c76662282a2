//! User Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("user id must be a positive integer")]
    InvalidId,

    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("invalid display name: {0}")]
    InvalidDisplayName(String),

    #[error("password rejected: {0}")]
    WeakPassword(String),

    #[error("malformed password hash")]
    MalformedPasswordHash,
}
