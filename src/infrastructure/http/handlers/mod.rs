//! HTTP Handlers

mod auth;
mod ping;
mod profile;
mod user;

pub use auth::*;
pub use ping::*;
pub use profile::*;
pub use user::*;
