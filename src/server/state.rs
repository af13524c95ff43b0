//! Shared application state

use crate::auth::JwtHandler;
use crate::config::Config;
use crate::notify::Notifier;
use crate::storage::ForumDatabase;
use std::sync::Arc;

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// JWT issuing and verification
    pub jwt: Arc<JwtHandler>,
    /// Relational storage
    pub db: Arc<ForumDatabase>,
    /// Outbound email
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        config: Config,
        jwt: JwtHandler,
        db: ForumDatabase,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            db: Arc::new(db),
            notifier,
        }
    }
}
