use crate::config::DatabaseConfig;
use crate::utils::error::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info};

use super::entities;
use super::migration::Migrator;
use super::ForumDatabase;

impl ForumDatabase {
    /// Open a bounded connection pool against the configured database
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt).await?;

        info!("Database connection established");
        Ok(Self { db })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Health check: a trivial query against the users table
    pub async fn health_check(&self) -> Result<()> {
        use sea_orm::{EntityTrait, QuerySelect};

        debug!("Performing database health check");

        let _ = entities::User::find().limit(1).all(&self.db).await?;

        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}
