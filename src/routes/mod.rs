//! Router assembly: common routes at the root, resources under [`API_PREFIX`].

mod common;
pub mod doc;
mod resource;

pub use common::common_routes;
pub use doc::ApiDoc;
pub use resource::resource_routes;

use crate::response::API_PREFIX;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router with request body limit and HTTP tracing.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, resource_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
