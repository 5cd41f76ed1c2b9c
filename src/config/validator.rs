//! Settings validation beyond what parsing catches.

use crate::config::Settings;
use crate::error::ConfigError;
use regex::Regex;

const IDENTIFIER: &str = r"^[A-Za-z_][A-Za-z0-9_]{0,62}$";

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let re = Regex::new(IDENTIFIER).map_err(|e| ConfigError::Invalid {
        key: "BREWERY_SCHEMA",
        value: settings.schema.clone(),
        reason: e.to_string(),
    })?;
    if !re.is_match(&settings.schema) {
        return Err(ConfigError::Invalid {
            key: "BREWERY_SCHEMA",
            value: settings.schema.clone(),
            reason: "must be a plain PostgreSQL identifier".into(),
        });
    }
    if settings.max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "MAX_CONNECTIONS",
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }
    if settings.body_limit_bytes == 0 {
        return Err(ConfigError::Invalid {
            key: "BODY_LIMIT_BYTES",
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}
