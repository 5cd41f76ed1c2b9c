//! In-process store with the same constraints as the PostgreSQL tables.

use crate::error::AppError;
use crate::model::{Beer, BeerForm, Brewery, BreweryForm, Page};
use crate::service::{FieldErrors, ALREADY_USED};
use crate::store::{BeerRepository, BreweryRepository};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    breweries: BTreeMap<i64, Brewery>,
    beers: BTreeMap<i64, Beer>,
    last_brewery_id: i64,
    last_beer_id: i64,
}

/// Map-backed store. Ids are generated from per-table sequences and never reused.
/// Lists sort names by byte order, not by a database collation.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Storage("store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Storage("store lock poisoned".into()))
    }
}

fn name_taken() -> AppError {
    AppError::Validation(FieldErrors::single("name", ALREADY_USED))
}

#[async_trait]
impl BreweryRepository for MemoryStore {
    async fn find(&self, id: i64) -> Result<Option<Brewery>, AppError> {
        Ok(self.read()?.breweries.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Brewery>, AppError> {
        Ok(self.read()?.breweries.values().find(|b| b.name == name).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Brewery>, AppError> {
        let tables = self.read()?;
        let mut all: Vec<&Brewery> = tables.breweries.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(page.slice(all.into_iter().cloned()))
    }

    async fn insert(&self, form: BreweryForm) -> Result<Brewery, AppError> {
        let mut tables = self.write()?;
        let name = form.name.unwrap_or_default();
        if tables.breweries.values().any(|b| b.name == name) {
            return Err(name_taken());
        }
        tables.last_brewery_id += 1;
        let brewery = Brewery {
            id: tables.last_brewery_id,
            name,
            description: form.description,
        };
        tables.breweries.insert(brewery.id, brewery.clone());
        Ok(brewery)
    }

    async fn update(&self, brewery: &Brewery) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables
            .breweries
            .values()
            .any(|b| b.id != brewery.id && b.name == brewery.name)
        {
            return Err(name_taken());
        }
        match tables.breweries.get_mut(&brewery.id) {
            Some(stored) => {
                *stored = brewery.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let removed = tables.breweries.remove(&id).is_some();
        tables.beers.retain(|_, beer| beer.brewery_id != id);
        Ok(removed)
    }

    async fn remove_all(&self) -> Result<u64, AppError> {
        let mut tables = self.write()?;
        let count = tables.breweries.len() as u64;
        tables.breweries.clear();
        tables.beers.clear();
        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}

#[async_trait]
impl BeerRepository for MemoryStore {
    async fn find(&self, brewery_id: i64, id: i64) -> Result<Option<Beer>, AppError> {
        Ok(self
            .read()?
            .beers
            .get(&id)
            .filter(|beer| beer.brewery_id == brewery_id)
            .cloned())
    }

    async fn find_by_name(&self, brewery_id: i64, name: &str) -> Result<Option<Beer>, AppError> {
        Ok(self
            .read()?
            .beers
            .values()
            .find(|beer| beer.brewery_id == brewery_id && beer.name == name)
            .cloned())
    }

    async fn list(&self, brewery_id: i64, page: Page) -> Result<Vec<Beer>, AppError> {
        let tables = self.read()?;
        let mut all: Vec<&Beer> = tables
            .beers
            .values()
            .filter(|beer| beer.brewery_id == brewery_id)
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(page.slice(all.into_iter().cloned()))
    }

    async fn insert(&self, brewery_id: i64, form: BeerForm) -> Result<Beer, AppError> {
        let mut tables = self.write()?;
        if !tables.breweries.contains_key(&brewery_id) {
            return Err(AppError::entity_not_found("Brewery"));
        }
        let name = form.name.unwrap_or_default();
        if tables
            .beers
            .values()
            .any(|beer| beer.brewery_id == brewery_id && beer.name == name)
        {
            return Err(name_taken());
        }
        tables.last_beer_id += 1;
        let beer = Beer {
            id: tables.last_beer_id,
            brewery_id,
            name,
            description: form.description,
        };
        tables.beers.insert(beer.id, beer.clone());
        Ok(beer)
    }

    async fn update(&self, beer: &Beer) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables
            .beers
            .values()
            .any(|other| other.id != beer.id && other.brewery_id == beer.brewery_id && other.name == beer.name)
        {
            return Err(name_taken());
        }
        match tables
            .beers
            .get_mut(&beer.id)
            .filter(|stored| stored.brewery_id == beer.brewery_id)
        {
            Some(stored) => {
                *stored = beer.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, brewery_id: i64, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let owned = tables
            .beers
            .get(&id)
            .is_some_and(|beer| beer.brewery_id == brewery_id);
        if owned {
            tables.beers.remove(&id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brewery_form(name: &str) -> BreweryForm {
        BreweryForm {
            name: Some(name.into()),
            description: None,
        }
    }

    fn beer_form(name: &str) -> BeerForm {
        BeerForm {
            name: Some(name.into()),
            description: None,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let store = MemoryStore::new();
        let first = BreweryRepository::insert(&store, brewery_form("Chimay")).await.unwrap();
        BreweryRepository::remove(&store, first.id).await.unwrap();
        let second = BreweryRepository::insert(&store, brewery_form("Orval")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn brewery_list_is_ordered_and_paged() {
        let store = MemoryStore::new();
        for name in ["Westmalle", "Achel", "Orval", "Chimay"] {
            BreweryRepository::insert(&store, brewery_form(name)).await.unwrap();
        }
        let page = Page {
            offset: Some(1),
            limit: Some(2),
        };
        let names: Vec<String> = BreweryRepository::list(&store, page)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["Chimay", "Orval"]);
    }

    #[tokio::test]
    async fn beers_are_scoped_to_their_brewery() {
        let store = MemoryStore::new();
        let chimay = BreweryRepository::insert(&store, brewery_form("Chimay")).await.unwrap();
        let orval = BreweryRepository::insert(&store, brewery_form("Orval")).await.unwrap();
        let bleue = BeerRepository::insert(&store, chimay.id, beer_form("Bleue")).await.unwrap();

        assert!(BeerRepository::find(&store, orval.id, bleue.id).await.unwrap().is_none());
        assert!(!BeerRepository::remove(&store, orval.id, bleue.id).await.unwrap());
        assert!(BeerRepository::list(&store, orval.id, Page::default()).await.unwrap().is_empty());
        // Same name is fine under another brewery.
        BeerRepository::insert(&store, orval.id, beer_form("Bleue")).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let store = MemoryStore::new();
        BreweryRepository::insert(&store, brewery_form("Chimay")).await.unwrap();
        let err = BreweryRepository::insert(&store, brewery_form("Chimay")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn removing_brewery_cascades_to_beers() {
        let store = MemoryStore::new();
        let chimay = BreweryRepository::insert(&store, brewery_form("Chimay")).await.unwrap();
        let bleue = BeerRepository::insert(&store, chimay.id, beer_form("Bleue")).await.unwrap();
        assert!(BreweryRepository::remove(&store, chimay.id).await.unwrap());
        assert!(BeerRepository::find(&store, chimay.id, bleue.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn beer_insert_requires_brewery() {
        let store = MemoryStore::new();
        let err = BeerRepository::insert(&store, 42, beer_form("Bleue")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_after_remove_reports_missing() {
        let store = MemoryStore::new();
        let chimay = BreweryRepository::insert(&store, brewery_form("Chimay")).await.unwrap();
        let orval = BreweryRepository::insert(&store, brewery_form("Orval")).await.unwrap();
        let mut bleue = BeerRepository::insert(&store, chimay.id, beer_form("Bleue")).await.unwrap();

        BeerRepository::remove(&store, chimay.id, bleue.id).await.unwrap();
        bleue.name = "Rouge".into();
        assert!(!BeerRepository::update(&store, &bleue).await.unwrap());

        BreweryRepository::remove(&store, orval.id).await.unwrap();
        assert!(!BreweryRepository::update(&store, &orval).await.unwrap());
        assert!(BreweryRepository::update(&store, &chimay).await.unwrap());
    }

    #[tokio::test]
    async fn beer_update_keeps_brewery_scope() {
        let store = MemoryStore::new();
        let chimay = BreweryRepository::insert(&store, brewery_form("Chimay")).await.unwrap();
        let orval = BreweryRepository::insert(&store, brewery_form("Orval")).await.unwrap();
        let mut bleue = BeerRepository::insert(&store, chimay.id, beer_form("Bleue")).await.unwrap();

        bleue.brewery_id = orval.id;
        assert!(!BeerRepository::update(&store, &bleue).await.unwrap());
        assert!(BeerRepository::find(&store, chimay.id, bleue.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn list_orders_by_byte_value() {
        let store = MemoryStore::new();
        for name in ["achel", "Westmalle"] {
            BreweryRepository::insert(&store, brewery_form(name)).await.unwrap();
        }
        let names: Vec<String> = BreweryRepository::list(&store, Page::default())
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["Westmalle", "achel"]);
    }
}
