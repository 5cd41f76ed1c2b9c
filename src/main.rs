//! Server: loads settings, prepares the store, and serves the API.

use brewery_api::{app, ensure_database_exists, ensure_tables, AppState, MemoryStore, PgStore, Settings, StorageKind};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("brewery_api=info,tower_http=info")),
        )
        .init();

    let state = match settings.storage {
        StorageKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            ensure_tables(&pool, &settings.schema).await?;
            AppState::new(Arc::new(PgStore::new(pool, settings.schema.clone())))
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage; data will not survive a restart");
            AppState::new(Arc::new(MemoryStore::new()))
        }
    };

    let router = app(state, settings.body_limit_bytes);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
