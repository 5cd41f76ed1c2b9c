use crate::error::AppError;
use crate::model::{Beer, BeerForm, Brewery, BreweryForm, Page};
use async_trait::async_trait;

/// Brewery persistence. Lists are ordered by name ascending.
#[async_trait]
pub trait BreweryRepository: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Brewery>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Brewery>, AppError>;
    async fn list(&self, page: Page) -> Result<Vec<Brewery>, AppError>;
    /// Insert a validated form and return the stored record with its generated id.
    async fn insert(&self, form: BreweryForm) -> Result<Brewery, AppError>;
    /// Returns false when the brewery no longer exists.
    async fn update(&self, brewery: &Brewery) -> Result<bool, AppError>;
    /// Removes the brewery and its beers. Returns whether anything was removed.
    async fn remove(&self, id: i64) -> Result<bool, AppError>;
    /// Removes every brewery and beer. Returns the number of breweries removed.
    async fn remove_all(&self) -> Result<u64, AppError>;
    /// Reachability check behind `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Beer persistence. Every operation is scoped to one brewery.
#[async_trait]
pub trait BeerRepository: Send + Sync {
    async fn find(&self, brewery_id: i64, id: i64) -> Result<Option<Beer>, AppError>;
    async fn find_by_name(&self, brewery_id: i64, name: &str) -> Result<Option<Beer>, AppError>;
    async fn list(&self, brewery_id: i64, page: Page) -> Result<Vec<Beer>, AppError>;
    async fn insert(&self, brewery_id: i64, form: BeerForm) -> Result<Beer, AppError>;
    /// Returns false when the beer no longer exists under its brewery.
    async fn update(&self, beer: &Beer) -> Result<bool, AppError>;
    async fn remove(&self, brewery_id: i64, id: i64) -> Result<bool, AppError>;
}
