//! Repository traits and their PostgreSQL and in-memory implementations.

mod memory;
mod postgres;
mod traits;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};
pub use traits::{BeerRepository, BreweryRepository};
