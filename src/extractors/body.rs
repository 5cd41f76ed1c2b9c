//! JSON object body, rejected as `bad_request` instead of axum's plain-text rejection.

use crate::error::AppError;
use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::{Map, Value};

/// Request body that must be a JSON object. Field binding happens in the validator.
#[derive(Clone, Debug)]
pub struct FormBody(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        match value {
            Value::Object(map) => Ok(FormBody(map)),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}
