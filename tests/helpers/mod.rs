//! Test helper utilities for driving the router in-process

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dish_form::app_state::AppState;
use dish_form::routes;
use dish_form::services::{dishes_client::DishesClient, pages};

/// Build the application pointed at a (usually mocked) dishes API.
pub fn build_app(dishes_api_url: &str) -> Router {
    let dishes = DishesClient::new(dishes_api_url).expect("Failed to build dishes client");
    let templates = pages::load_templates().expect("Failed to compile templates");
    routes::router(AppState::new(dishes, templates))
}

/// URL of a local port with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind a free local port");
    let addr = listener.local_addr().expect("Bound port has no address");
    drop(listener);
    format!("http://{}", addr)
}

/// Encode form fields as `application/x-www-form-urlencoded`.
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).expect("Failed to encode form fields")
}

/// POST the HTML form and return the status and rendered page.
pub async fn post_form(app: Router, fields: &[(&str, &str)]) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encode_form(fields)))
        .expect("Failed to build request");

    send(app, request).await
}

/// POST a JSON body to the dishes API route.
pub async fn post_json(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/dishes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let (status, text) = send(app, request).await;
    let json = serde_json::from_str(&text).expect("Response is not JSON");
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("Router call failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
