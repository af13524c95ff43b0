//! HTTP middleware

pub mod auth;
pub mod helpers;

pub use auth::{current_user_id, AuthMiddleware, CurrentUser};
