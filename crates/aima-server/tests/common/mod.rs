#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use aima_mail::{MockMailer, ServerSettings};
use aima_server::{build_app_router, AppState};

/// Server settings for tests: any origin, 30-second timeout.
pub fn test_settings() -> ServerSettings {
    ServerSettings {
        bind: "127.0.0.1:0".to_string(),
        request_timeout_secs: 30,
        cors_origins: vec![],
    }
}

/// The production router over the built-in bank and catalog, delivering
/// into `mailer`.
pub fn build_test_app(mailer: Arc<MockMailer>) -> Router {
    build_app_router(AppState::new(mailer), &test_settings()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
