//! Live CRUD Lifecycle Tests
//!
//! Exercise the full request → store → MongoDB path. These need a running
//! database and are ignored by default:
//!
//!   MONGODB_URI=mongodb://localhost:27017 cargo test --test live_crud -- --ignored
//!
//! Each test uses its own database, dropped before the test runs, so the
//! identifier sequence always starts at 1.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use itemstore::http_server::HttpServer;
use itemstore::store::ItemStore;

// =============================================================================
// Test Utilities
// =============================================================================

fn base_uri() -> String {
    std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}

async fn fresh_router(database: &str) -> Router {
    let uri = format!("{}/{}", base_uri().trim_end_matches('/'), database);

    let client = mongodb::Client::with_uri_str(&uri)
        .await
        .expect("connection string must parse");
    client
        .database(database)
        .drop()
        .await
        .expect("test database must drop");

    let store = ItemStore::connect(&uri).await.expect("store must connect");
    HttpServer::new(store).router()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router must respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must be readable")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body must be JSON")
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request must build")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request must build")
}

async fn create_item(router: &Router, body: Value) -> Value {
    let (status, created) = send(router, json_request("POST", "/api/items", body)).await;
    assert_eq!(status, StatusCode::OK);
    created
}

// =============================================================================
// Identifier Assignment
// =============================================================================

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_identifiers_are_sequential_from_one() {
    let router = fresh_router("itemstore_live_sequence").await;

    for expected in 1..=3_i64 {
        let created = create_item(
            &router,
            json!({ "gender": "M", "itemLabel": "bag", "quantityLabel": "5kg" }),
        )
        .await;
        assert_eq!(created["id"], expected);
    }
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_create_applies_defaults() {
    let router = fresh_router("itemstore_live_defaults").await;

    let created = create_item(
        &router,
        json!({ "gender": "M", "itemLabel": "bag", "quantityLabel": "5kg" }),
    )
    .await;

    assert_eq!(created["id"], 1);
    assert_eq!(created["currencyAmount"], "");
    assert_eq!(created["name"], Value::Null);

    let created_at: chrono::DateTime<chrono::Utc> = created["createdAt"]
        .as_str()
        .expect("createdAt must be a string")
        .parse()
        .expect("createdAt must be RFC 3339");
    let age = chrono::Utc::now() - created_at;
    assert!(age.num_seconds() >= 0 && age.num_seconds() < 60);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_identifier_collision_fails_second_insert() {
    let database = "itemstore_live_collision";
    let router = fresh_router(database).await;

    let created = create_item(
        &router,
        json!({ "gender": "F", "itemLabel": "rice", "quantityLabel": "10kg" }),
    )
    .await;
    assert_eq!(created["id"], 1);

    // A second document with the same identifier, inserted the way a
    // racing create would, must lose to the unique index.
    let uri = format!("{}/{}", base_uri().trim_end_matches('/'), database);
    let client = mongodb::Client::with_uri_str(&uri).await.unwrap();
    let items = client
        .database(database)
        .collection::<mongodb::bson::Document>("items");
    let result = items
        .insert_one(mongodb::bson::doc! {
            "id": 1_i64,
            "gender": "F",
            "itemLabel": "rice",
            "currencyAmount": "",
            "quantityLabel": "10kg",
            "createdAt": mongodb::bson::DateTime::now(),
        })
        .await;

    let err = result.expect_err("duplicate identifier must be rejected");
    assert!(err.to_string().contains("E11000") || err.to_string().contains("duplicate"));
}

// =============================================================================
// Read Path
// =============================================================================

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_get_by_key_returns_the_created_object() {
    let router = fresh_router("itemstore_live_get").await;

    let created = create_item(
        &router,
        json!({
            "name": "Budi",
            "gender": "M",
            "itemLabel": "bag",
            "currencyAmount": "50000",
            "quantityLabel": "5kg",
        }),
    )
    .await;

    let key = created["_id"].as_str().expect("_id must be a string");
    let (status, fetched) = send(&router, empty_request("GET", &format!("/api/items/{key}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_list_returns_every_item() {
    let router = fresh_router("itemstore_live_list").await;

    for label in ["bag", "rice"] {
        create_item(
            &router,
            json!({ "gender": "F", "itemLabel": label, "quantityLabel": "1kg" }),
        )
        .await;
    }

    let (status, listed) = send(&router, empty_request("GET", "/api/items")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_get_nonexistent_well_formed_key_is_404() {
    let router = fresh_router("itemstore_live_missing").await;

    let absent = mongodb::bson::oid::ObjectId::new().to_hex();
    let (status, body) = send(&router, empty_request("GET", &format!("/api/items/{absent}"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Item not found" }));
}

// =============================================================================
// Update Path: Full Overwrite, No Partial Merge
// =============================================================================

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_update_overwrites_absent_fields_with_empty_values() {
    let router = fresh_router("itemstore_live_update").await;

    let created = create_item(
        &router,
        json!({
            "name": "Siti",
            "gender": "F",
            "itemLabel": "rice",
            "currencyAmount": "75000",
            "quantityLabel": "10kg",
        }),
    )
    .await;
    let key = created["_id"].as_str().unwrap().to_string();

    // currencyAmount and name left out of the request body
    let (status, updated) = send(
        &router,
        json_request(
            "PUT",
            &format!("/api/items/{key}"),
            json!({ "gender": "F", "itemLabel": "rice", "quantityLabel": "15kg" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantityLabel"], "15kg");
    assert_eq!(updated["currencyAmount"], "", "absent field must be erased, not preserved");
    assert_eq!(updated["name"], Value::Null);

    // Identifier, storage key, and creation time never change
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["_id"], created["_id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_update_nonexistent_key_is_404() {
    let router = fresh_router("itemstore_live_update_missing").await;

    let absent = mongodb::bson::oid::ObjectId::new().to_hex();
    let (status, body) = send(
        &router,
        json_request(
            "PUT",
            &format!("/api/items/{absent}"),
            json!({ "gender": "M" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found");
}

// =============================================================================
// Delete Path
// =============================================================================

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_delete_then_get_is_404() {
    let router = fresh_router("itemstore_live_delete").await;

    let created = create_item(
        &router,
        json!({ "gender": "M", "itemLabel": "bag", "quantityLabel": "5kg" }),
    )
    .await;
    let key = created["_id"].as_str().unwrap().to_string();

    let (status, body) = send(&router, empty_request("DELETE", &format!("/api/items/{key}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Item deleted successfully" }));

    let (status, body) = send(&router, empty_request("GET", &format!("/api/items/{key}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_delete_well_formed_absent_key_is_404() {
    let router = fresh_router("itemstore_live_delete_missing").await;

    let absent = mongodb::bson::oid::ObjectId::new().to_hex();
    let (status, body) = send(
        &router,
        empty_request("DELETE", &format!("/api/items/{absent}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Item not found" }));
}
