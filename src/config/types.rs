//! Runtime settings.

use std::net::SocketAddr;

/// Backing store for the repositories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    /// Process-local maps; data is lost on restart.
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" => Ok(StorageKind::Postgres),
            "memory" => Ok(StorageKind::Memory),
            _ => Err("expected postgres or memory".into()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    /// PostgreSQL schema holding the `breweries` and `beers` tables.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    pub storage: StorageKind,
}

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/brewery";
pub const DEFAULT_SCHEMA: &str = "brewery";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;
