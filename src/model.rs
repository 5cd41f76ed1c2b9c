//! Domain records as stored, and the form values bound from request bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Brewery {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Beer {
    pub id: i64,
    pub brewery_id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Submitted brewery fields. `name` is only `None` before validation passes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BreweryForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Submitted beer fields. The parent brewery always comes from the path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BeerForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Brewery {
    /// Full replace: fields missing from the form are cleared.
    pub fn apply(&mut self, form: BreweryForm) {
        self.name = form.name.unwrap_or_default();
        self.description = form.description;
    }
}

impl Beer {
    pub fn apply(&mut self, form: BeerForm) {
        self.name = form.name.unwrap_or_default();
        self.description = form.description;
    }
}

/// Offset/limit window for list queries. `None` means unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl Page {
    /// Applies the window to an already-ordered iterator.
    pub fn slice<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        let skipped = items.skip(self.offset.unwrap_or(0) as usize);
        match self.limit {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        }
    }
}
