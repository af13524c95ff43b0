//! # forumd
//!
//! A community Q&A forum backend: registration, JWT sessions, questions,
//! answers, answer ratings, and email-based password recovery, served
//! over a JSON HTTP API.
//!
//! ## Architecture
//!
//! - [`config`]: YAML configuration with environment overrides
//! - [`auth`]: JWT issuing and verification
//! - [`storage`]: SeaORM-backed relational storage with transactional,
//!   ownership-checked mutations
//! - [`server`]: Actix-web routes, session middleware, and state
//! - [`notify`]: post-commit SMTP notifications
//! - [`utils`]: errors, validation, and crypto helpers

pub mod auth;
pub mod config;
pub mod notify;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{ForumError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
