//! End-to-end HTTP behavior of the product routes over the in-memory repository.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use products_api::{app_router, AppState, MemoryProductRepository, ProductRead, ServiceConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let config = ServiceConfig::from_lookup(|_| None).expect("default config");
    let state = AppState::new(Arc::new(MemoryProductRepository::new()));
    app_router(state, &config).expect("router")
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn widget() -> Value {
    json!({"product_name": "Widget", "price": 100, "in_stock": true})
}

#[tokio::test]
async fn widget_lifecycle() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/products/", Some(widget())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"product_name": "Widget", "price": 100, "description": null, "in_stock": true, "image_url": null})
    );

    let (status, body) = send(&app, Method::GET, "/products/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "product_name": "Widget", "price": 100, "description": null, "in_stock": true, "image_url": null})
    );

    let (status, body) = send(&app, Method::PUT, "/products/1/", Some(json!({"price": 150}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 150);
    assert_eq!(body["product_name"], "Widget");

    let (_, body) = send(&app, Method::GET, "/products/1/", None).await;
    assert_eq!(body["price"], 150);
    assert_eq!(body["product_name"], "Widget");

    let (status, body) = send(&app, Method::DELETE, "/products/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["price"], 150);

    let (status, body) = send(&app, Method::GET, "/products/1/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Product not found");
}

#[tokio::test]
async fn created_rows_show_up_in_list() {
    let app = app();
    let input = json!({
        "product_name": "Lamp",
        "price": 4200,
        "description": "desk lamp",
        "in_stock": false,
        "image_url": "https://img.example/lamp.png"
    });
    send(&app, Method::POST, "/products/", Some(widget())).await;
    send(&app, Method::POST, "/products/", Some(input.clone())).await;

    let (status, body) = send(&app, Method::GET, "/products/", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows: Vec<ProductRead> = serde_json::from_value(body).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, 1);
    let lamp = &rows[1];
    assert_eq!(lamp.id, 2);
    assert_eq!(lamp.product_name, "Lamp");
    assert_eq!(lamp.price, 4200);
    assert_eq!(lamp.description.as_deref(), Some("desk lamp"));
    assert!(!lamp.in_stock);
    assert_eq!(lamp.image_url.as_deref(), Some("https://img.example/lamp.png"));
}

#[tokio::test]
async fn empty_list_is_not_an_error() {
    let (status, body) = send(&app(), Method::GET, "/products/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn unknown_id_is_not_found_everywhere() {
    let app = app();
    send(&app, Method::POST, "/products/", Some(widget())).await;

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({"price": 1}))),
        (Method::DELETE, None),
    ] {
        let (status, resp) = send(&app, method.clone(), "/products/999/", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(resp["error"]["code"], "not_found");
        assert_eq!(resp["error"]["message"], "Product not found");
    }

    let (_, body) = send(&app, Method::GET, "/products/", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn partial_update_leaves_omitted_fields_and_is_idempotent() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/products/",
        Some(json!({"product_name": "Mug", "price": 12, "description": "blue", "in_stock": true, "image_url": "m.png"})),
    )
    .await;

    let patch = json!({"in_stock": false, "image_url": null});
    let (status, first) = send(&app, Method::PUT, "/products/1/", Some(patch.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!({"id": 1, "product_name": "Mug", "price": 12, "description": "blue", "in_stock": false, "image_url": null})
    );

    let (_, second) = send(&app, Method::PUT, "/products/1/", Some(patch)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_update_returns_row_unchanged() {
    let app = app();
    send(&app, Method::POST, "/products/", Some(widget())).await;
    let (status, body) = send(&app, Method::PUT, "/products/1/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 100);
}

#[tokio::test]
async fn invalid_bodies_are_rejected_before_storage() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/products/",
        Some(json!({"product_name": "Widget", "price": "a lot", "in_stock": true})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, _) = send(&app, Method::POST, "/products/", Some(json!({"price": 1, "in_stock": true}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = send(&app, Method::GET, "/products/", None).await;
    assert_eq!(list, json!([]));

    send(&app, Method::POST, "/products/", Some(widget())).await;
    let (status, _) = send(&app, Method::PUT, "/products/1/", Some(json!({"product_name": null}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, row) = send(&app, Method::GET, "/products/1/", None).await;
    assert_eq!(row["product_name"], "Widget");
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        req = req.header(header::CONTENT_TYPE, ct);
    }
    let resp = app.clone().oneshot(req.body(Body::from(body.to_owned())).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn unparseable_bodies_use_the_validation_envelope() {
    let app = app();
    send(&app, Method::POST, "/products/", Some(widget())).await;

    for (method, uri) in [(Method::POST, "/products/"), (Method::PUT, "/products/1/")] {
        let (status, body) = send_raw(&app, method.clone(), uri, Some("application/json"), "{not json").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{method}");
        assert_eq!(body["error"]["code"], "validation_error");

        let (status, body) = send_raw(&app, method.clone(), uri, None, &widget().to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{method} without content type");
        assert_eq!(body["error"]["code"], "validation_error");
    }

    let (_, row) = send(&app, Method::GET, "/products/1/", None).await;
    assert_eq!(row["price"], 100);
    let (_, list) = send(&app, Method::GET, "/products/", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let app = app();
    let name = "x".repeat(products_api::server::MAX_BODY_BYTES);
    let payload = json!({"product_name": name, "price": 1, "in_stock": true}).to_string();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/products/")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let (_, list) = send(&app, Method::GET, "/products/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn non_integer_id_is_a_validation_error() {
    let (status, body) = send(&app(), Method::GET, "/products/abc/", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn paths_without_trailing_slash_are_served() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/products", Some(widget())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::GET, "/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn cors_allows_only_the_configured_origin() {
    let app = app();
    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/products/")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom")
            .body(Body::empty())
            .unwrap()
    };

    let resp = app.clone().oneshot(preflight("http://localhost:3000")).await.unwrap();
    let headers = resp.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "DELETE");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "x-custom");

    let resp = app.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn readiness_and_openapi() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["products_store"], "reachable");

    let (status, body) = send(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/products/{product_id}/"]["put"].is_object());
}
