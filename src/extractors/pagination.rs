//! `offset` / `limit` query parameters for list endpoints.

use crate::error::{AppError, ConfigError};
use crate::model::Page;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const REQUIREMENT: &str = r"\d+";

static DIGITS: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// `REQUIREMENT` anchored to the whole value, compiled on first use.
fn digits() -> Result<&'static Regex, AppError> {
    DIGITS
        .get_or_init(|| Regex::new(&format!("^{}$", REQUIREMENT)))
        .as_ref()
        .map_err(|e| {
            AppError::Config(ConfigError::Invalid {
                key: "pagination requirement",
                value: REQUIREMENT.into(),
                reason: e.to_string(),
            })
        })
}

/// Both parameters are optional; an empty value counts as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pagination(pub Page);

fn parse_param(params: &HashMap<String, String>, name: &str) -> Result<Option<u32>, AppError> {
    let Some(raw) = params.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let violated = || {
        AppError::BadRequest(format!(
            "query parameter '{}' value '{}' does not match requirements '{}'",
            name, raw, REQUIREMENT
        ))
    };
    if !digits()?.is_match(raw) {
        return Err(violated());
    }
    raw.parse().map(Some).map_err(|_| violated())
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Pagination(Page {
            offset: parse_param(&params, "offset")?,
            limit: parse_param(&params, "limit")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn absent_and_empty_are_none() {
        assert_eq!(parse_param(&params(&[]), "limit").unwrap(), None);
        assert_eq!(parse_param(&params(&[("limit", "")]), "limit").unwrap(), None);
    }

    #[test]
    fn digits_are_accepted() {
        assert_eq!(parse_param(&params(&[("offset", "20")]), "offset").unwrap(), Some(20));
    }

    #[test]
    fn non_digits_are_rejected() {
        for raw in ["-1", "abc", "1.5", "99999999999"] {
            let err = parse_param(&params(&[("limit", raw)]), "limit").unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{raw}");
        }
    }

    #[test]
    fn requirement_is_compiled_once() {
        let first = digits().unwrap();
        let second = digits().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(first.is_match("42"));
        assert!(!first.is_match("4 2"));
    }
}
