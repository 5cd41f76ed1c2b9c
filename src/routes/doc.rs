//! OpenAPI document for the resource routes.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{beer, brewery};
use crate::model::{BeerForm, BreweryForm};
use crate::response::{BeerLinks, BeerView, BreweryLinks, BreweryView, Link};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        brewery::list,
        brewery::read,
        brewery::create,
        brewery::replace,
        brewery::delete,
        brewery::delete_all,
        brewery::options,
        beer::list,
        beer::read,
        beer::create,
        beer::replace,
        beer::delete,
        beer::options,
    ),
    components(schemas(
        BreweryForm,
        BeerForm,
        BreweryView,
        BreweryLinks,
        BeerView,
        BeerLinks,
        Link,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "breweries", description = "Breweries"),
        (name = "beers", description = "Beers of one brewery"),
    )
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
