//! Shared application state: the repositories injected into every handler.

use crate::store::{BeerRepository, BreweryRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub breweries: Arc<dyn BreweryRepository>,
    pub beers: Arc<dyn BeerRepository>,
}

impl AppState {
    /// Both repositories backed by one store.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: BreweryRepository + BeerRepository + 'static,
    {
        AppState {
            breweries: store.clone(),
            beers: store,
        }
    }
}
