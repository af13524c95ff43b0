//! Server entry point

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config/forum.yaml";

/// Load configuration and run the server until shutdown
pub async fn run_server() -> Result<()> {
    dotenvy::dotenv().ok();

    let config_path =
        std::env::var("FORUM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config = match Config::from_file(&config_path).await {
        Ok(config) => {
            info!("Loaded configuration from {}", config_path);
            config
        }
        Err(e) => {
            warn!(
                "Could not load {} ({}), falling back to environment configuration",
                config_path, e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    server.start().await
}
