//! Drives the real router in-process with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use review_core::kernel::TestDependencies;
use review_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

const MAX_BODY: usize = 1024 * 1024;

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

/// Router wired to the given mocks, allowing any origin
pub fn test_app(deps: &TestDependencies) -> Router {
    build_app(deps.into_server_deps(), &[])
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth_key: Option<&str>,
    body: Option<String>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = auth_key {
        builder = builder.header("Auth-Key", key);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), MAX_BODY).await.unwrap();

    TestResponse {
        status,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str, auth_key: Option<&str>) -> TestResponse {
    send(app, Method::GET, uri, auth_key, None).await
}

pub async fn post_json(app: Router, uri: &str, auth_key: Option<&str>, body: &Value) -> TestResponse {
    send(app, Method::POST, uri, auth_key, Some(body.to_string())).await
}
