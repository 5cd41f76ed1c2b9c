//! HTTP handlers for the brewery and beer resources.

pub mod beer;
pub mod brewery;

use crate::error::AppError;
use crate::model::Brewery;
use crate::state::AppState;

/// Path ids are integers; anything else names an entity that cannot exist.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

pub(crate) async fn find_brewery(state: &AppState, raw_id: &str) -> Result<Brewery, AppError> {
    let found = match parse_id(raw_id) {
        Some(id) => state.breweries.find(id).await?,
        None => None,
    };
    found.ok_or_else(|| AppError::entity_not_found("Brewery"))
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id("ThisBreweryDoesNotExist"), None);
        assert_eq!(parse_id(""), None);
    }
}
