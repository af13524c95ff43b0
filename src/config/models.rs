//! Configuration section models

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Development mode: 5xx responses carry diagnostic detail
    #[serde(default)]
    pub development: bool,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            development: false,
            cors: CorsConfig::default(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS handling
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins; "*" allows any
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: default_origins(),
        }
    }
}

impl CorsConfig {
    /// Whether any origin is allowed
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgres:// or sqlite://)
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Upper bound of the shared connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Pool acquisition timeout in seconds; exceeding it fails the request
    /// with 503 instead of blocking indefinitely
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
            acquire_timeout: default_acquire_timeout(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret, loaded once at startup
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Token issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiration: default_jwt_expiration(),
            issuer: default_issuer(),
        }
    }
}

/// Outbound email configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Enable SMTP delivery; when disabled, sends are logged and dropped
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay host
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP relay port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password
    #[serde(default)]
    pub smtp_password: String,
    /// From address for outbound mail
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Base URL of the frontend, used in email links
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
            frontend_url: default_frontend_url(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_database_url() -> String {
    "sqlite://data/forum.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_jwt_expiration() -> u64 {
    3600
}

fn default_issuer() -> String {
    "forumd".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "no-reply@localhost".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}
