use std::env;

use crate::error::AppError;

/// Process-wide configuration, read once at startup and never mutated afterwards.
///
/// Components that need a value (the token signing secret, the pool size) receive
/// it by reference when they are constructed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_port: u16,
    pub server_host: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so it can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => assemble_database_url(&lookup)?,
        };

        let jwt_secret = lookup("JWT_AUTH_SECRET")
            .or_else(|| lookup("JWT_SECRET"))
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| missing("JWT_AUTH_SECRET"))?;

        let server_port = parse_or(&lookup, "SERVER_PORT", 8080)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?;
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            server_port,
            server_host,
            db_max_connections,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn assemble_database_url<F>(lookup: &F) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| lookup(key).ok_or_else(|| missing(key));

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        required("DB_USER")?,
        required("DB_PASSWORD")?,
        required("DB_HOST")?,
        required("DB_PORT")?,
        required("DB_DATABASE")?,
    ))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Internal(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}

fn missing(key: &str) -> AppError {
    AppError::Internal(format!("{} must be set", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_AUTH_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.jwt_secret, "secret");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "fallback"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("DB_MAX_CONNECTIONS", "20"),
        ]))
        .unwrap();

        assert_eq!(config.jwt_secret, "fallback");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.db_max_connections, 20);
    }

    #[test]
    fn test_database_url_assembled_from_parts() {
        let config = Config::from_lookup(lookup_from(&[
            ("DB_USER", "todo"),
            ("DB_PASSWORD", "pw"),
            ("DB_HOST", "db"),
            ("DB_PORT", "5432"),
            ("DB_DATABASE", "todos"),
            ("JWT_AUTH_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url,
            "postgres://todo:pw@db:5432/todos?sslmode=disable"
        );
    }

    #[test]
    fn test_missing_or_bad_values_are_rejected() {
        let no_secret = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://test")]));
        assert!(matches!(no_secret, Err(AppError::Internal(_))));

        let empty_secret = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_AUTH_SECRET", ""),
        ]));
        assert!(empty_secret.is_err());

        let partial_db = Config::from_lookup(lookup_from(&[
            ("DB_HOST", "db"),
            ("JWT_AUTH_SECRET", "secret"),
        ]));
        assert!(partial_db.is_err());

        let bad_port = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_AUTH_SECRET", "secret"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(bad_port.is_err());
    }
}
