//! Configuration for the Lineage service.
//!
//! Loaded from (in priority order):
//! 1. Environment variables (`LINEAGE__` prefixed, `__`-separated)
//! 2. Config file (`lineage.toml`)
//! 3. Defaults

use serde::Deserialize;

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub neo4j: Neo4jConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    /// Static bearer token gating the admin upload endpoint.
    #[serde(default = "default_admin_token")]
    pub admin_token: String,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Neo4j connection settings.
///
/// The optional read-only credential pair backs the ad-hoc query endpoint:
/// when set, gated queries run on a connection that structurally cannot
/// write, independent of the lexical keyword filter.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    #[serde(default = "default_neo4j_uri")]
    pub uri: String,

    #[serde(default = "default_neo4j_user")]
    pub user: String,

    #[serde(default = "default_neo4j_password")]
    pub password: String,

    #[serde(default)]
    pub read_only_user: Option<String>,

    #[serde(default)]
    pub read_only_password: Option<String>,

    #[serde(default = "default_neo4j_database")]
    pub database: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// Sliding-window rate limit settings for the ad-hoc query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per client key within the window.
    #[serde(default = "default_rate_limit_requests")]
    pub max_requests: u32,

    /// Window duration in seconds.
    #[serde(default = "default_rate_limit_window")]
    pub window_secs: u64,

    /// Interval of the background sweep that drops idle client keys.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

/// CORS allow-list. Empty means the local development origins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from `<prefix>.toml` and `LINEAGE__` environment
    /// variables, falling back to defaults for anything unset.
    pub fn load(file_prefix: &str) -> Result<Self, config::ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("LINEAGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        cfg.try_deserialize()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_neo4j_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_neo4j_user() -> String {
    "neo4j".to_string()
}

fn default_neo4j_password() -> String {
    "lineage-dev".to_string()
}

fn default_neo4j_database() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_rate_limit_requests() -> u32 {
    5
}

fn default_rate_limit_window() -> u64 {
    60
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_admin_token() -> String {
    "dev-admin-token".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_neo4j_uri(),
            user: default_neo4j_user(),
            password: default_neo4j_password(),
            read_only_user: None,
            read_only_password: None,
            database: default_neo4j_database(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_rate_limit_requests(),
            window_secs: default_rate_limit_window(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            neo4j: Neo4jConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
            admin_token: default_admin_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j.database, "neo4j");
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert!(config.cors.allowed_origins.is_empty());
        assert!(config.neo4j.read_only_user.is_none());
    }

    #[test]
    fn test_sections_deserialize_with_partial_input() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": {"port": 9090},
            "rate_limit": {"max_requests": 2}
        }))
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.rate_limit.max_requests, 2);
        assert_eq!(config.rate_limit.window_secs, 60);
    }
}
