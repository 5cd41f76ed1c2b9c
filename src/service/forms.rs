//! Field schemas for each resource and the store-backed uniqueness checks.

use crate::error::AppError;
use crate::model::{BeerForm, BreweryForm};
use crate::service::validation::{Constraint, FieldRule, Submission, UniquenessCheck};
use crate::store::{BeerRepository, BreweryRepository};
use async_trait::async_trait;

/// Column width of `name` in both tables.
pub const NAME_MAX_LENGTH: usize = 255;

const NAME: FieldRule = FieldRule {
    field: "name",
    constraints: &[
        Constraint::NotBlank,
        Constraint::MaxLength(NAME_MAX_LENGTH),
        Constraint::Unique,
    ],
};

const DESCRIPTION: FieldRule = FieldRule {
    field: "description",
    constraints: &[],
};

pub const BREWERY_FIELDS: &[FieldRule] = &[NAME, DESCRIPTION];

/// Beer names are unique per brewery; see [`BeerNames`].
pub const BEER_FIELDS: &[FieldRule] = &[NAME, DESCRIPTION];

impl From<Submission> for BreweryForm {
    fn from(mut submission: Submission) -> Self {
        BreweryForm {
            name: submission.take("name"),
            description: submission.take("description"),
        }
    }
}

impl From<Submission> for BeerForm {
    fn from(mut submission: Submission) -> Self {
        BeerForm {
            name: submission.take("name"),
            description: submission.take("description"),
        }
    }
}

/// Brewery names are unique across the store.
pub struct BreweryNames<'a>(pub &'a dyn BreweryRepository);

#[async_trait]
impl UniquenessCheck for BreweryNames<'_> {
    async fn holder_of(&self, field: &str, value: &str) -> Result<Option<i64>, AppError> {
        if field != "name" {
            return Ok(None);
        }
        Ok(self.0.find_by_name(value).await?.map(|b| b.id))
    }
}

/// Beer names are unique within one brewery.
pub struct BeerNames<'a> {
    pub repo: &'a dyn BeerRepository,
    pub brewery_id: i64,
}

#[async_trait]
impl UniquenessCheck for BeerNames<'_> {
    async fn holder_of(&self, field: &str, value: &str) -> Result<Option<i64>, AppError> {
        if field != "name" {
            return Ok(None);
        }
        Ok(self
            .repo
            .find_by_name(self.brewery_id, value)
            .await?
            .map(|b| b.id))
    }
}
