// ABOUTME: Server configuration loaded from the environment
// ABOUTME: The signing secret is required; everything else falls back to a default

use std::env;
use std::num::ParseIntError;

use thiserror::Error;

use drinkwise_config::constants;
use drinkwise_core::{default_database_path, DEFAULT_TOKEN_TTL_MINUTES};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {source}")]
    InvalidNumber {
        name: &'static str,
        source: ParseIntError,
    },
    #[error("{name} must be greater than zero")]
    NotPositive { name: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub secret_key: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub access_token_expire_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = required(&lookup, constants::SECRET_KEY)?;
        let database_url = lookup(constants::DATABASE_URL)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(default_database_url);

        let host = lookup(constants::HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, constants::PORT, DEFAULT_PORT)?;
        if port == 0 {
            return Err(ConfigError::NotPositive {
                name: constants::PORT,
            });
        }

        let cors_origin =
            lookup(constants::CORS_ORIGIN).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let access_token_expire_minutes = parse_or(
            &lookup,
            constants::ACCESS_TOKEN_EXPIRE_MINUTES,
            DEFAULT_TOKEN_TTL_MINUTES,
        )?;
        if access_token_expire_minutes <= 0 {
            return Err(ConfigError::NotPositive {
                name: constants::ACCESS_TOKEN_EXPIRE_MINUTES,
            });
        }

        let database_max_connections = parse_or(
            &lookup,
            constants::DATABASE_MAX_CONNECTIONS,
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if database_max_connections == 0 {
            return Err(ConfigError::NotPositive {
                name: constants::DATABASE_MAX_CONNECTIONS,
            });
        }

        Ok(Config {
            secret_key,
            database_url,
            database_max_connections,
            host,
            port,
            cors_origin,
            access_token_expire_minutes,
        })
    }
}

fn default_database_url() -> String {
    format!("sqlite:{}", default_database_path().display())
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr<Err = ParseIntError>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidNumber { name, source }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    const BASE_VARS: [(&str, &str); 2] = [
        ("SECRET_KEY", "s3cret"),
        ("DATABASE_URL", "sqlite::memory:"),
    ];

    #[test]
    fn test_config_defaults() {
        let config = config_from(&BASE_VARS).unwrap();

        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origin, "http://localhost:8080");
        assert_eq!(config.access_token_expire_minutes, DEFAULT_TOKEN_TTL_MINUTES);
        assert_eq!(config.database_max_connections, 10);
    }

    #[test]
    fn test_config_with_all_custom() {
        let mut vars = BASE_VARS.to_vec();
        vars.extend([
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("CORS_ORIGIN", "https://app.example.com"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "60"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ]);

        let config = config_from(&vars).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origin, "https://app.example.com");
        assert_eq!(config.access_token_expire_minutes, 60);
        assert_eq!(config.database_max_connections, 4);
    }

    #[test]
    fn test_missing_secret_fails_fast() {
        let result = config_from(&[("DATABASE_URL", "sqlite::memory:")]);
        assert!(matches!(result, Err(ConfigError::Missing("SECRET_KEY"))));

        let result = config_from(&[("SECRET_KEY", "  "), ("DATABASE_URL", "sqlite::memory:")]);
        assert!(matches!(result, Err(ConfigError::Missing("SECRET_KEY"))));
    }

    #[test]
    fn test_database_url_defaults_to_home_directory() {
        let config = config_from(&[("SECRET_KEY", "s3cret")]).unwrap();

        assert!(config.database_url.starts_with("sqlite:"));
        assert!(config.database_url.ends_with("drinkwise.db"));
    }

    #[test]
    fn test_config_invalid_port() {
        let mut vars = BASE_VARS.to_vec();
        vars.push(("PORT", "not-a-number"));
        assert!(matches!(
            config_from(&vars),
            Err(ConfigError::InvalidNumber { name: "PORT", .. })
        ));

        let mut vars = BASE_VARS.to_vec();
        vars.push(("PORT", "0"));
        assert!(matches!(
            config_from(&vars),
            Err(ConfigError::NotPositive { name: "PORT" })
        ));
    }

    #[test]
    fn test_config_invalid_token_lifetime() {
        let mut vars = BASE_VARS.to_vec();
        vars.push(("ACCESS_TOKEN_EXPIRE_MINUTES", "-5"));
        assert!(matches!(
            config_from(&vars),
            Err(ConfigError::NotPositive {
                name: "ACCESS_TOKEN_EXPIRE_MINUTES"
            })
        ));
    }
}
