//! Load settings from the process environment (after `.env`, when present).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;

impl Settings {
    /// Reads `DATABASE_URL`, `BREWERY_SCHEMA`, `BIND_ADDR`, `MAX_CONNECTIONS`,
    /// `BODY_LIMIT_BYTES` and `STORAGE`. Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let settings = Settings {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            schema: get("BREWERY_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into()),
            bind_addr: parse("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR)?,
            max_connections: parse_or("MAX_CONNECTIONS", get("MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT_BYTES)?,
            storage: parse("STORAGE", get("STORAGE"), "postgres")?,
        };
        validate(&settings)?;
        Ok(settings)
    }
}

fn parse<T>(key: &'static str, value: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.unwrap_or_else(|| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = load(&[]).unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.schema, "brewery");
        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.storage, StorageKind::Postgres);
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = load(&[
            ("STORAGE", "Memory"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("MAX_CONNECTIONS", "12"),
            ("BODY_LIMIT_BYTES", " 4096 "),
        ])
        .unwrap();
        assert_eq!(settings.storage, StorageKind::Memory);
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(settings.max_connections, 12);
        assert_eq!(settings.body_limit_bytes, 4096);
    }

    #[test]
    fn bad_values_name_their_key() {
        let err = load(&[("MAX_CONNECTIONS", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "MAX_CONNECTIONS", .. }));
        let err = load(&[("STORAGE", "sqlite")]).unwrap_err();
        assert!(err.to_string().contains("sqlite"));
    }
}
