//! Brewery and beer resource routes, relative to the API prefix.

use crate::handlers::{beer, brewery};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/breweries",
            get(brewery::list)
                .post(brewery::create)
                .delete(brewery::delete_all)
                .options(brewery::options),
        )
        .route(
            "/breweries/:brewery_id",
            get(brewery::read).put(brewery::replace).delete(brewery::delete),
        )
        .route(
            "/breweries/:brewery_id/beers",
            get(beer::list).post(beer::create).options(beer::options),
        )
        .route(
            "/breweries/:brewery_id/beers/:beer_id",
            get(beer::read).put(beer::replace).delete(beer::delete),
        )
        .route("/doc/openapi.json", get(crate::routes::doc::openapi))
        .with_state(state)
}

