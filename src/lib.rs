//! Brewery API: REST resources for breweries and their beers.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Settings, StorageKind};
pub use error::{AppError, ConfigError};
pub use routes::{app, ApiDoc};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, BeerRepository, BreweryRepository, MemoryStore, PgStore};
