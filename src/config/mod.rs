//! Configuration loading and validation
//!
//! Configuration comes from a YAML file with environment-variable
//! overrides for the settings that carry secrets or differ per deployment.

pub mod models;

pub use models::{AuthConfig, CorsConfig, DatabaseConfig, EmailConfig, ServerConfig};

use crate::utils::error::{ForumError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration for the forum backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Outbound email settings
    #[serde(default)]
    pub email: EmailConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ForumError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ForumError::Config(format!("Failed to parse config: {}", e)))?;

        config.apply_env_overrides();
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from environment variables alone
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(host) = std::env::var("FORUM_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("FORUM_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(user) = std::env::var("SMTP_USERNAME") {
            self.email.smtp_username = user;
        }
        if let Ok(pass) = std::env::var("SMTP_PASSWORD") {
            self.email.smtp_password = pass;
        }
    }

    /// Validate the configuration at startup
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ForumError::Config("database.url must be set".to_string()));
        }

        if self.auth.jwt_secret.len() < 32 {
            return Err(ForumError::Config(
                "auth.jwt_secret must be at least 32 characters".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ForumError::Config(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        if self.email.enabled && self.email.smtp_host.is_empty() {
            return Err(ForumError::Config(
                "email.smtp_host must be set when email is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = "0123456789abcdef0123456789abcdef".to_string();
        config
    }

    #[test]
    fn test_default_config_rejects_missing_secret() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_email_enabled_requires_host() {
        let mut config = valid_config();
        config.email.enabled = true;
        assert!(config.validate().is_err());

        config.email.smtp_host = "smtp.example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
server:
  port: 9000
  development: true
database:
  url: "sqlite::memory:"
  max_connections: 2
auth:
  jwt_secret: "0123456789abcdef0123456789abcdef"
  jwt_expiration: 600
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(config.server.development);
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.auth.jwt_expiration, 600);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forum.yaml");
        std::fs::write(
            &path,
            r#"
server:
  host: "127.0.0.1"
  port: 8081
database:
  url: "sqlite::memory:"
auth:
  jwt_secret: "0123456789abcdef0123456789abcdef"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).await.unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
    }

    #[tokio::test]
    async fn test_from_file_missing_is_error() {
        assert!(Config::from_file("/nonexistent/forum.yaml").await.is_err());
    }
}
