use axum::body::{to_bytes, Body};
use http::Request;
use serde_json::Value;

/// Extracts the JSON body from an Axum response
pub async fn response_to_json(response: axum::response::Response) -> Value {
    let body = response.into_body();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Builds a request for router tests, adding a JSON content type when a body is given
pub fn create_test_request(method: &str, path: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(path);

    match body {
        Some(json_body) => builder
            .header("content-type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Builds a request whose body is sent verbatim, for malformed-payload tests
pub fn create_raw_request(method: &str, path: &str, raw_body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(raw_body.to_string()))
        .unwrap()
}
