//! Brewery collection and item handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{FormBody, Pagination};
use crate::handlers::find_brewery;
use crate::handlers::parse_id;
use crate::model::BreweryForm;
use crate::response::{allow, created, ok, ok_many, BreweryView};
use crate::service::{BreweryNames, Validator, BREWERY_FIELDS};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// Get all breweries, ordered by name.
#[utoipa::path(
    get,
    path = "/api/breweries",
    tag = "breweries",
    params(
        ("offset" = Option<u32>, Query, description = "Offset from which to start listing breweries."),
        ("limit" = Option<u32>, Query, description = "How many breweries to return."),
    ),
    responses(
        (status = 200, description = "Returned when successful", body = [BreweryView]),
        (status = 400, description = "Returned when offset or limit is malformed", body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.breweries.list(page).await?;
    Ok(ok_many::<_, BreweryView>(rows))
}

#[utoipa::path(
    get,
    path = "/api/breweries/{brewery_id}",
    tag = "breweries",
    params(("brewery_id" = String, Path, description = "Brewery id")),
    responses(
        (status = 200, description = "Returned when successful", body = BreweryView),
        (status = 404, description = "Returned when not found", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(brewery_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let brewery = find_brewery(&state, &brewery_id).await?;
    Ok(ok(BreweryView::from(brewery)))
}

#[utoipa::path(
    post,
    path = "/api/breweries",
    tag = "breweries",
    request_body = BreweryForm,
    responses(
        (status = 201, description = "Returned when successful", body = BreweryView),
        (status = 400, description = "Returned when a field is invalid", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    FormBody(body): FormBody,
) -> Result<impl IntoResponse, AppError> {
    let names = BreweryNames(state.breweries.as_ref());
    let submission = Validator::submit(&body, BREWERY_FIELDS, None, &names).await?;
    let brewery = state.breweries.insert(submission.into()).await?;
    Ok(created(BreweryView::from(brewery)))
}

/// Replace an existing brewery. Never creates one.
#[utoipa::path(
    put,
    path = "/api/breweries/{brewery_id}",
    tag = "breweries",
    params(("brewery_id" = String, Path, description = "Brewery id")),
    request_body = BreweryForm,
    responses(
        (status = 204, description = "Returned when successful"),
        (status = 400, description = "Returned when a field is invalid", body = ErrorBody),
        (status = 404, description = "Returned when not found", body = ErrorBody),
    )
)]
pub async fn replace(
    State(state): State<AppState>,
    Path(brewery_id): Path<String>,
    body: Result<FormBody, AppError>,
) -> Result<StatusCode, AppError> {
    let mut brewery = find_brewery(&state, &brewery_id).await?;
    let FormBody(body) = body?;
    let names = BreweryNames(state.breweries.as_ref());
    let submission = Validator::submit(&body, BREWERY_FIELDS, Some(brewery.id), &names).await?;
    brewery.apply(submission.into());
    if !state.breweries.update(&brewery).await? {
        return Err(AppError::entity_not_found("Brewery"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a brewery and its beers. Missing breweries are not an error.
#[utoipa::path(
    delete,
    path = "/api/breweries/{brewery_id}",
    tag = "breweries",
    params(("brewery_id" = String, Path, description = "Brewery id")),
    responses((status = 204, description = "Returned when successful"))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(brewery_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Some(id) = parse_id(&brewery_id) {
        state.breweries.remove(id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/breweries",
    tag = "breweries",
    responses((status = 204, description = "Returned when successful"))
)]
pub async fn delete_all(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.breweries.remove_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    options,
    path = "/api/breweries",
    tag = "breweries",
    responses((status = 200, description = "Returned when successful"))
)]
pub async fn options() -> impl IntoResponse {
    allow()
}
