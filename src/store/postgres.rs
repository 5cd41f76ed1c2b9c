//! PostgreSQL store: bootstrap DDL and repository implementations.
//! Tables live in the schema named by `BREWERY_SCHEMA` (default `brewery`).

use crate::error::{AppError, ConfigError};
use crate::model::{Beer, BeerForm, Brewery, BreweryForm, Page};
use crate::service::{FieldErrors, ALREADY_USED};
use crate::store::{BeerRepository, BreweryRepository};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const BREWERY_COLUMNS: &str = "id, name, description";
const BEER_COLUMNS: &str = "id, brewery_id, name, description";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    /// Schema-qualified table name, e.g. `"brewery"."beers"`.
    fn table(&self, name: &str) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(name))
    }
}

/// Create the schema and both tables if they do not exist yet.
/// Name uniqueness and the brewery foreign key are enforced by the database as well.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let store = PgStore::new(pool.clone(), schema);
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;

    let breweries = store.table("breweries");
    let breweries_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description TEXT,
            CONSTRAINT breweries_name_key UNIQUE (name)
        )
        "#,
        breweries
    );
    sqlx::query(&breweries_ddl).execute(pool).await?;

    let beers_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            brewery_id BIGINT NOT NULL REFERENCES {} (id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            description TEXT,
            CONSTRAINT beers_brewery_id_name_key UNIQUE (brewery_id, name)
        )
        "#,
        store.table("beers"),
        breweries
    );
    sqlx::query(&beers_ddl).execute(pool).await?;
    tracing::info!(schema, "tables ready");
    Ok(())
}

/// Create the target database when it does not exist, connecting through the `postgres` database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, target) = admin_options(database_url)?;
    let Some(db_name) = target.filter(|name| name != "postgres") else {
        return Ok(());
    };
    let mut conn = admin.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connection options for the `postgres` maintenance database, plus the database the URL names.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let options = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        // Credentials stay out of the message.
        value: "<redacted>".into(),
        reason: e.to_string(),
    })?;
    let target = options
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    Ok((options.database("postgres"), target))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Limit/offset as bind values. NULL means no limit and no offset.
fn window(page: Page) -> (Option<i64>, Option<i64>) {
    (page.limit.map(i64::from), page.offset.map(i64::from))
}

/// Constraint violations that races past validation surface as the same client errors.
fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::Validation(FieldErrors::single("name", ALREADY_USED));
        }
        if db.is_foreign_key_violation() {
            return AppError::entity_not_found("Brewery");
        }
    }
    AppError::Db(err)
}

#[async_trait]
impl BreweryRepository for PgStore {
    async fn find(&self, id: i64) -> Result<Option<Brewery>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", BREWERY_COLUMNS, self.table("breweries"));
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Brewery>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Brewery>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE name = $1", BREWERY_COLUMNS, self.table("breweries"));
        tracing::debug!(sql = %sql, name, "query");
        let row = sqlx::query_as::<_, Brewery>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, page: Page) -> Result<Vec<Brewery>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2",
            BREWERY_COLUMNS,
            self.table("breweries")
        );
        tracing::debug!(sql = %sql, ?page, "query");
        let (limit, offset) = window(page);
        let rows = sqlx::query_as::<_, Brewery>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, form: BreweryForm) -> Result<Brewery, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, description) VALUES ($1, $2) RETURNING {}",
            self.table("breweries"),
            BREWERY_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Brewery>(&sql)
            .bind(form.name.unwrap_or_default())
            .bind(form.description)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;
        tracing::info!(id = row.id, "brewery created");
        Ok(row)
    }

    async fn update(&self, brewery: &Brewery) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $2, description = $3 WHERE id = $1",
            self.table("breweries")
        );
        tracing::debug!(sql = %sql, id = brewery.id, "query");
        let result = sqlx::query(&sql)
            .bind(brewery.id)
            .bind(&brewery.name)
            .bind(&brewery.description)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;
        tracing::info!(id = brewery.id, updated = result.rows_affected(), "brewery updated");
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table("breweries"));
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        tracing::info!(id, removed = result.rows_affected(), "brewery removed");
        Ok(result.rows_affected() > 0)
    }

    async fn remove_all(&self) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {}", self.table("breweries"));
        tracing::debug!(sql = %sql, "query");
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        tracing::info!(removed = result.rows_affected(), "all breweries removed");
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl BeerRepository for PgStore {
    async fn find(&self, brewery_id: i64, id: i64) -> Result<Option<Beer>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND brewery_id = $2",
            BEER_COLUMNS,
            self.table("beers")
        );
        tracing::debug!(sql = %sql, brewery_id, id, "query");
        let row = sqlx::query_as::<_, Beer>(&sql)
            .bind(id)
            .bind(brewery_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, brewery_id: i64, name: &str) -> Result<Option<Beer>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE brewery_id = $1 AND name = $2",
            BEER_COLUMNS,
            self.table("beers")
        );
        tracing::debug!(sql = %sql, brewery_id, name, "query");
        let row = sqlx::query_as::<_, Beer>(&sql)
            .bind(brewery_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, brewery_id: i64, page: Page) -> Result<Vec<Beer>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE brewery_id = $1 ORDER BY name ASC, id ASC LIMIT $2 OFFSET $3",
            BEER_COLUMNS,
            self.table("beers")
        );
        tracing::debug!(sql = %sql, brewery_id, ?page, "query");
        let (limit, offset) = window(page);
        let rows = sqlx::query_as::<_, Beer>(&sql)
            .bind(brewery_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, brewery_id: i64, form: BeerForm) -> Result<Beer, AppError> {
        let sql = format!(
            "INSERT INTO {} (brewery_id, name, description) VALUES ($1, $2, $3) RETURNING {}",
            self.table("beers"),
            BEER_COLUMNS
        );
        tracing::debug!(sql = %sql, brewery_id, "query");
        let row = sqlx::query_as::<_, Beer>(&sql)
            .bind(brewery_id)
            .bind(form.name.unwrap_or_default())
            .bind(form.description)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;
        tracing::info!(brewery_id, id = row.id, "beer created");
        Ok(row)
    }

    async fn update(&self, beer: &Beer) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $3, description = $4 WHERE id = $1 AND brewery_id = $2",
            self.table("beers")
        );
        tracing::debug!(sql = %sql, id = beer.id, "query");
        let result = sqlx::query(&sql)
            .bind(beer.id)
            .bind(beer.brewery_id)
            .bind(&beer.name)
            .bind(&beer.description)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;
        tracing::info!(
            brewery_id = beer.brewery_id,
            id = beer.id,
            updated = result.rows_affected(),
            "beer updated"
        );
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, brewery_id: i64, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND brewery_id = $2", self.table("beers"));
        tracing::debug!(sql = %sql, brewery_id, id, "query");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(brewery_id)
            .execute(&self.pool)
            .await?;
        tracing::info!(brewery_id, id, removed = result.rows_affected(), "beer removed");
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_options_target_postgres_database() {
        let (admin, name) = admin_options("postgres://u:p@localhost:5432/brewery?sslmode=disable").unwrap();
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
        assert_eq!(name.as_deref(), Some("brewery"));
    }

    #[test]
    fn malformed_url_is_a_config_error() {
        let err = admin_options("brewery-db-without-scheme").unwrap_err();
        let ConfigError::Invalid { key, value, .. } = err;
        assert_eq!(key, "DATABASE_URL");
        assert_eq!(value, "<redacted>");
    }

    #[tokio::test]
    async fn malformed_url_fails_before_connecting() {
        let err = ensure_database_exists("brewery-db-without-scheme").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("brewery"), "\"brewery\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn window_keeps_nulls() {
        assert_eq!(window(Page::default()), (None, None));
        assert_eq!(
            window(Page {
                offset: Some(3),
                limit: Some(10)
            }),
            (Some(10), Some(3))
        );
    }
}
