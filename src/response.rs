//! Resource representations with hypermedia links, and fixed responses.

use crate::model::{Beer, Brewery};
use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Mount point of the resource routes.
pub const API_PREFIX: &str = "/api";

/// Advertised by OPTIONS on both collections. PUT is served but not listed.
pub const ALLOWED_METHODS: &str = "OPTIONS, GET, POST, DELETE";

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct Link {
    pub href: String,
}

impl Link {
    fn to(path: String) -> Self {
        Link {
            href: format!("{}{}", API_PREFIX, path),
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct BreweryLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub beers: Link,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct BreweryView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "_links")]
    pub links: BreweryLinks,
}

impl From<Brewery> for BreweryView {
    fn from(brewery: Brewery) -> Self {
        let links = BreweryLinks {
            self_link: Link::to(format!("/breweries/{}", brewery.id)),
            beers: Link::to(format!("/breweries/{}/beers", brewery.id)),
        };
        BreweryView {
            id: brewery.id,
            name: brewery.name,
            description: brewery.description,
            links,
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct BeerLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub brewery: Link,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct BeerView {
    pub id: i64,
    pub brewery_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "_links")]
    pub links: BeerLinks,
}

impl From<Beer> for BeerView {
    fn from(beer: Beer) -> Self {
        let links = BeerLinks {
            self_link: Link::to(format!("/breweries/{}/beers/{}", beer.brewery_id, beer.id)),
            brewery: Link::to(format!("/breweries/{}", beer.brewery_id)),
        };
        BeerView {
            id: beer.id,
            brewery_id: beer.brewery_id,
            name: beer.name,
            description: beer.description,
            links,
        }
    }
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// Collections render as a bare JSON array.
pub fn ok_many<T, V>(rows: Vec<T>) -> (StatusCode, Json<Vec<V>>)
where
    V: From<T> + Serialize,
{
    (StatusCode::OK, Json(rows.into_iter().map(V::from).collect()))
}

pub fn allow() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOWED_METHODS)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brewery_links() {
        let view = BreweryView::from(Brewery {
            id: 3,
            name: "Orval".into(),
            description: None,
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["_links"]["self"]["href"], "/api/breweries/3");
        assert_eq!(json["_links"]["beers"]["href"], "/api/breweries/3/beers");
        assert!(json["description"].is_null());
    }

    #[test]
    fn beer_links() {
        let view = BeerView::from(Beer {
            id: 9,
            brewery_id: 3,
            name: "Orval".into(),
            description: Some("dry hopped".into()),
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["_links"]["self"]["href"], "/api/breweries/3/beers/9");
        assert_eq!(json["_links"]["brewery"]["href"], "/api/breweries/3");
        assert_eq!(json["description"], "dry hopped");
    }
}
