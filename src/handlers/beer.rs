//! Beer handlers, nested under `/breweries/{brewery_id}/beers`.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{FormBody, Pagination};
use crate::handlers::{find_brewery, parse_id};
use crate::model::{Beer, BeerForm};
use crate::response::{allow, created, ok, ok_many, BeerView};
use crate::service::{BeerNames, Validator, BEER_FIELDS};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

async fn find_beer(state: &AppState, raw_brewery_id: &str, raw_beer_id: &str) -> Result<Beer, AppError> {
    let found = match (parse_id(raw_brewery_id), parse_id(raw_beer_id)) {
        (Some(brewery_id), Some(beer_id)) => state.beers.find(brewery_id, beer_id).await?,
        _ => None,
    };
    found.ok_or_else(|| AppError::entity_not_found("Beer"))
}

/// Get all beers of a brewery, ordered by name. An unknown brewery lists nothing.
#[utoipa::path(
    get,
    path = "/api/breweries/{brewery_id}/beers",
    tag = "beers",
    params(
        ("brewery_id" = String, Path, description = "Brewery id"),
        ("offset" = Option<u32>, Query, description = "Offset from which to start listing beers."),
        ("limit" = Option<u32>, Query, description = "How many beers to return."),
    ),
    responses(
        (status = 200, description = "Returned when successful", body = [BeerView]),
        (status = 400, description = "Returned when offset or limit is malformed", body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Path(brewery_id): Path<String>,
    Pagination(page): Pagination,
) -> Result<impl IntoResponse, AppError> {
    let rows = match parse_id(&brewery_id) {
        Some(id) => state.beers.list(id, page).await?,
        None => Vec::new(),
    };
    Ok(ok_many::<_, BeerView>(rows))
}

#[utoipa::path(
    get,
    path = "/api/breweries/{brewery_id}/beers/{beer_id}",
    tag = "beers",
    params(
        ("brewery_id" = String, Path, description = "Brewery id"),
        ("beer_id" = String, Path, description = "Beer id"),
    ),
    responses(
        (status = 200, description = "Returned when successful", body = BeerView),
        (status = 404, description = "Returned when not found", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path((brewery_id, beer_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let beer = find_beer(&state, &brewery_id, &beer_id).await?;
    Ok(ok(BeerView::from(beer)))
}

#[utoipa::path(
    post,
    path = "/api/breweries/{brewery_id}/beers",
    tag = "beers",
    params(("brewery_id" = String, Path, description = "Brewery id")),
    request_body = BeerForm,
    responses(
        (status = 201, description = "Returned when successful", body = BeerView),
        (status = 400, description = "Returned when a field is invalid", body = ErrorBody),
        (status = 404, description = "Returned when the brewery is not found", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Path(brewery_id): Path<String>,
    body: Result<FormBody, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let brewery = find_brewery(&state, &brewery_id).await?;
    let FormBody(body) = body?;
    let names = BeerNames {
        repo: state.beers.as_ref(),
        brewery_id: brewery.id,
    };
    let submission = Validator::submit(&body, BEER_FIELDS, None, &names).await?;
    let beer = state.beers.insert(brewery.id, submission.into()).await?;
    Ok(created(BeerView::from(beer)))
}

/// Replace an existing beer. Never creates one.
#[utoipa::path(
    put,
    path = "/api/breweries/{brewery_id}/beers/{beer_id}",
    tag = "beers",
    params(
        ("brewery_id" = String, Path, description = "Brewery id"),
        ("beer_id" = String, Path, description = "Beer id"),
    ),
    request_body = BeerForm,
    responses(
        (status = 204, description = "Returned when successful"),
        (status = 400, description = "Returned when a field is invalid", body = ErrorBody),
        (status = 404, description = "Returned when not found", body = ErrorBody),
    )
)]
pub async fn replace(
    State(state): State<AppState>,
    Path((brewery_id, beer_id)): Path<(String, String)>,
    body: Result<FormBody, AppError>,
) -> Result<StatusCode, AppError> {
    let mut beer = find_beer(&state, &brewery_id, &beer_id).await?;
    let FormBody(body) = body?;
    let names = BeerNames {
        repo: state.beers.as_ref(),
        brewery_id: beer.brewery_id,
    };
    let submission = Validator::submit(&body, BEER_FIELDS, Some(beer.id), &names).await?;
    beer.apply(submission.into());
    // May have been deleted since the lookup.
    if !state.beers.update(&beer).await? {
        return Err(AppError::entity_not_found("Beer"));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/breweries/{brewery_id}/beers/{beer_id}",
    tag = "beers",
    params(
        ("brewery_id" = String, Path, description = "Brewery id"),
        ("beer_id" = String, Path, description = "Beer id"),
    ),
    responses((status = 204, description = "Returned when successful"))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path((brewery_id, beer_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    if let (Some(brewery_id), Some(beer_id)) = (parse_id(&brewery_id), parse_id(&beer_id)) {
        state.beers.remove(brewery_id, beer_id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    options,
    path = "/api/breweries/{brewery_id}/beers",
    tag = "beers",
    params(("brewery_id" = String, Path, description = "Brewery id")),
    responses((status = 200, description = "Returned when successful"))
)]
pub async fn options() -> impl IntoResponse {
    allow()
}
