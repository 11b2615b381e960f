//! Application configuration management.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Dashboard presentation settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for a single request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Dashboard presentation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// IANA time zone used to render times in feed descriptions.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

impl DashboardConfig {
    /// Parses the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA time zone.
    pub fn timezone(&self) -> Result<Tz, AppError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AppError::Configuration(format!("dashboard.timezone: {e}")))
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PAINEL").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("PAINEL__DATABASE__URL", Some("postgres://localhost/painel")),
                ("PAINEL__SERVER__PORT", Some("9090")),
                ("PAINEL__DASHBOARD__TIMEZONE", Some("Europe/Lisbon")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/painel");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.request_timeout_secs, 30);
                assert_eq!(
                    config.dashboard.timezone().unwrap(),
                    chrono_tz::Europe::Lisbon
                );
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars_unset(["PAINEL__DATABASE__URL"], || {
            let err = AppConfig::load().unwrap_err();
            assert!(matches!(err, AppError::Configuration(_)));
        });
    }

    #[test]
    fn test_default_timezone() {
        let dashboard = DashboardConfig::default();
        assert_eq!(dashboard.timezone().unwrap(), chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn test_invalid_timezone() {
        let dashboard = DashboardConfig {
            timezone: "Mars/Olympus".to_string(),
        };
        let err = dashboard.timezone().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
