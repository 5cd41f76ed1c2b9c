#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use brewery_api::{app, AppState, MemoryStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestClient {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw: String,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_state(AppState::new(Arc::new(MemoryStore::new())))
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            router: app(state, 64 * 1024),
        }
    }

    pub async fn send(&self, method: Method, path: &str, body: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let raw = String::from_utf8(bytes.to_vec()).unwrap();
        let body = serde_json::from_str(&raw).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, json: &str) -> TestResponse {
        self.send(Method::POST, path, Some(json)).await
    }

    pub async fn put(&self, path: &str, json: &str) -> TestResponse {
        self.send(Method::PUT, path, Some(json)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, None).await
    }

    pub async fn options(&self, path: &str) -> TestResponse {
        self.send(Method::OPTIONS, path, None).await
    }

    /// Creates a brewery and returns its id.
    pub async fn brewery(&self, name: &str) -> i64 {
        let res = self.post("/api/breweries", &format!(r#"{{"name":"{}"}}"#, name)).await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.raw);
        res.body["id"].as_i64().unwrap()
    }
}
