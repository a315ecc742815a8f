use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::{routes, state::ServerState};
use service::cake::{domain::Cake, repository::memory::InMemoryCakeRepository};

fn cake(id: i64, title: &str, description: &str) -> Cake {
    Cake { id, title: title.into(), description: description.into() }
}

fn app_with(repo: Arc<InMemoryCakeRepository>) -> Router {
    routes::build_router(ServerState::new(repo), CorsLayer::very_permissive())
}

fn seeded() -> Arc<InMemoryCakeRepository> {
    Arc::new(InMemoryCakeRepository::with_cakes([
        cake(1, "Vanilla Cake", "Tasty vanilla cake"),
        cake(2, "Chocolate Cake", "Delicious chocolate cake"),
    ]))
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, content_type, bytes.to_vec())
}

#[tokio::test]
async fn list_cakes_sorted_by_title() {
    let (status, ct, body) = send(app_with(seeded()), request(Method::GET, "/cakes", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("application/json"));
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        v,
        json!({"cakes": [
            {"id": 2, "title": "Chocolate Cake", "description": "Delicious chocolate cake"},
            {"id": 1, "title": "Vanilla Cake", "description": "Tasty vanilla cake"}
        ]})
    );
}

#[tokio::test]
async fn list_cakes_empty_store() {
    let repo = Arc::new(InMemoryCakeRepository::default());
    let (status, _, body) = send(app_with(repo), request(Method::GET, "/cakes", None)).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v, json!({"cakes": []}));
}

#[tokio::test]
async fn get_cake_by_id() {
    let (status, _, body) = send(app_with(seeded()), request(Method::GET, "/cakes/2", None)).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v, json!({"id": 2, "title": "Chocolate Cake", "description": "Delicious chocolate cake"}));
}

#[tokio::test]
async fn get_missing_cake_is_404_with_empty_body() {
    let (status, _, body) = send(app_with(seeded()), request(Method::GET, "/cakes/999", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn non_integer_id_is_rejected() {
    let (status, _, _) = send(app_with(seeded()), request(Method::GET, "/cakes/abc", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_cake_returns_201_with_assigned_id() {
    let repo = seeded();
    let body = json!({"title": "Red Velvet Cake", "description": "Delicious Red Velvet Cake"});
    let (status, ct, bytes) = send(app_with(Arc::clone(&repo)), request(Method::POST, "/cakes", Some(body))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ct.as_deref(), Some("application/json"));
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v, json!({"id": 3, "title": "Red Velvet Cake", "description": "Delicious Red Velvet Cake"}));
    assert_eq!(repo.snapshot().len(), 3);
}

#[tokio::test]
async fn create_cake_missing_field_is_rejected_without_saving() {
    let repo = seeded();
    let body = json!({"title": "No description"});
    let (status, _, _) = send(app_with(Arc::clone(&repo)), request(Method::POST, "/cakes", Some(body))).await;
    assert!(status.is_client_error());
    assert!(repo.saved().is_empty());
}

#[tokio::test]
async fn update_cake_returns_204_and_replaces_fields() {
    let repo = Arc::new(InMemoryCakeRepository::with_cakes([cake(1, "Old Title", "old")]));
    let body = json!({"title": "Updated Chocolate Cake", "description": "Updated delicious chocolate cake"});
    let (status, _, bytes) = send(app_with(Arc::clone(&repo)), request(Method::PUT, "/cakes/1", Some(body))).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());
    assert_eq!(
        repo.snapshot(),
        vec![cake(1, "Updated Chocolate Cake", "Updated delicious chocolate cake")]
    );
}

#[tokio::test]
async fn update_missing_cake_is_404() {
    let repo = seeded();
    let body = json!({"title": "x", "description": "y"});
    let (status, _, _) = send(app_with(Arc::clone(&repo)), request(Method::PUT, "/cakes/999", Some(body))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(repo.saved().is_empty());
}

#[tokio::test]
async fn delete_cake_returns_204() {
    let repo = seeded();
    let (status, _, bytes) = send(app_with(Arc::clone(&repo)), request(Method::DELETE, "/cakes/1", None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());
    assert_eq!(repo.deleted(), vec![cake(1, "Vanilla Cake", "Tasty vanilla cake")]);
    assert_eq!(repo.snapshot(), vec![cake(2, "Chocolate Cake", "Delicious chocolate cake")]);
}

#[tokio::test]
async fn delete_missing_cake_is_404() {
    let repo = seeded();
    let (status, _, _) = send(app_with(Arc::clone(&repo)), request(Method::DELETE, "/cakes/999", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(repo.deleted().is_empty());
}

#[tokio::test]
async fn store_failure_is_500_with_json_error() {
    let repo = Arc::new(InMemoryCakeRepository::unavailable("connection refused"));
    let (status, ct, bytes) = send(app_with(repo), request(Method::GET, "/cakes", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ct.as_deref(), Some("application/json"));
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v, json!({"error": "connection refused"}));
}

#[tokio::test]
async fn health_ok() {
    let repo = Arc::new(InMemoryCakeRepository::default());
    let (status, _, bytes) = send(app_with(repo), request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v, json!({"status": "ok"}));
}

#[tokio::test]
async fn metrics_expose_operation_counters() {
    let repo = seeded();
    let app = app_with(repo);
    let _ = send(app.clone(), request(Method::GET, "/cakes/1", None)).await;
    let (status, _, bytes) = send(app, request(Method::GET, "/metrics", None)).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("cake_api_operations_total"));
    assert!(text.contains(r#"operation="get""#));
}

#[tokio::test]
async fn openapi_document_lists_cake_paths() {
    let repo = Arc::new(InMemoryCakeRepository::default());
    let (status, _, bytes) = send(app_with(repo), request(Method::GET, "/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(v["paths"]["/cakes"]["get"].is_object());
    assert!(v["paths"]["/cakes"]["post"].is_object());
    assert!(v["paths"]["/cakes/{id}"]["put"].is_object());
    assert!(v["paths"]["/cakes/{id}"]["delete"].is_object());
}
