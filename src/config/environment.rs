//! Environment configuration
//!
//! Reads the process environment (after `.env` has been loaded) into a
//! typed configuration. Missing variables fall back to development
//! defaults; malformed values are errors.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

const DEV_JWT_SECRET: &str = "wheels-connect-dev-secret-change-me";

/// Where records are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("unknown storage backend '{}'", other)),
        }
    }
}

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub storage: StorageBackend,
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub auth_required: bool,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub seed_demo_data: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8080,
            host: "0.0.0.0".to_string(),
            storage: StorageBackend::Postgres,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 15 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            auth_required: false,
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            admin_username: None,
            admin_password: None,
            seed_demo_data: false,
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            storage: parse_var("STORAGE_BACKEND")?.unwrap_or(defaults.storage),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration: parse_var("JWT_EXPIRATION")?.unwrap_or(defaults.jwt_expiration),
            bcrypt_cost: parse_var("BCRYPT_COST")?.unwrap_or(defaults.bcrypt_cost),
            auth_required: parse_var("AUTH_REQUIRED")?.unwrap_or(defaults.auth_required),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout_secs),
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            seed_demo_data: parse_var("SEED_DEMO_DATA")?.unwrap_or(defaults.seed_demo_data),
        };

        if config.is_production() && config.jwt_secret == DEV_JWT_SECRET {
            bail!("JWT_SECRET must be set in production");
        }
        if !(4..=31).contains(&config.bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Address the server binds to
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses an optional variable; present but malformed is an error.
pub(crate) fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!(" Postgres ".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
        assert_eq!(config.jwt_expiration, 900);
        assert!(!config.auth_required);
        assert_eq!(config.server_url(), "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_var_reports_malformed_values() {
        env::set_var("WHEELS_TEST_PORT_VALUE", "not-a-port");
        let result = parse_var::<u16>("WHEELS_TEST_PORT_VALUE");
        env::remove_var("WHEELS_TEST_PORT_VALUE");
        assert!(result.is_err());

        assert_eq!(parse_var::<u16>("WHEELS_TEST_UNSET_VALUE").unwrap(), None);
    }
}
