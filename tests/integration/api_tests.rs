//! API integration tests

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bookshelf_api::{
    api::create_router,
    repository::Repository,
    services::{ids::IdGenerator, Services},
    AppConfig, AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Hands out `book-1`, `book-2`, ...
struct SequentialIds(AtomicUsize);

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        format!("book-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

fn app_with_sequential_ids() -> Router {
    let services =
        Services::with_id_generator(Repository::new(), Arc::new(SequentialIds(AtomicUsize::new(0))));
    create_router(AppState::with_services(AppConfig::default(), services))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn dicoding(page_count: u32, read_page: u32) -> Value {
    json!({
        "name": "Buku A",
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": false
    })
}

async fn add(app: &Router, body: Value) -> String {
    let (status, body) = send(app, "POST", "/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().expect("No book id").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_add_finished_book() {
    let app = app();
    let mut payload = dicoding(100, 100);
    payload["name"] = json!("Dicoding");

    let (status, body) = send(&app, "POST", "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");

    let id = body["data"]["bookId"].as_str().expect("No book id");
    assert_eq!(id.len(), 16);

    let (status, body) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id);
    assert_eq!(book["name"], "Dicoding");
    assert_eq!(book["finished"], true);
    assert_eq!(book["insertedAt"], book["updatedAt"]);
}

#[tokio::test]
async fn test_add_book_with_read_page_above_page_count() {
    let (status, body) = send(&app(), "POST", "/books", Some(dicoding(100, 150))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "status": "fail",
            "message": "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
        })
    );
}

#[tokio::test]
async fn test_add_book_without_name() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "pageCount": 100, "readPage": 150 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_add_book_with_malformed_body() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut negative = dicoding(10, 0);
    negative["pageCount"] = json!(-10);
    let (status, body) = send(&app, "POST", "/books", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_list_books_projection_in_insertion_order() {
    let app = app_with_sequential_ids();
    add(&app, dicoding(100, 0)).await;
    let mut second = dicoding(50, 50);
    second["name"] = json!("Buku B");
    second["publisher"] = json!("Gramedia");
    add(&app, second).await;

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": {
                "books": [
                    { "id": "book-1", "name": "Buku A", "publisher": "Dicoding Indonesia" },
                    { "id": "book-2", "name": "Buku B", "publisher": "Gramedia" }
                ]
            }
        })
    );
}

#[tokio::test]
async fn test_list_books_filters() {
    let app = app_with_sequential_ids();

    let mut reading = dicoding(100, 10);
    reading["name"] = json!("Belajar Dicoding");
    reading["reading"] = json!(true);
    add(&app, reading).await; // book-1: reading, unfinished

    let mut finished = dicoding(100, 100);
    finished["name"] = json!("Rust Programming");
    add(&app, finished).await; // book-2: not reading, finished

    add(&app, dicoding(100, 0)).await; // book-3: not reading, unfinished

    let ids = |body: &Value| -> Vec<String> {
        body["data"]["books"]
            .as_array()
            .expect("books should be an array")
            .iter()
            .map(|b| b["id"].as_str().unwrap_or_default().to_string())
            .collect()
    };

    let (_, body) = send(&app, "GET", "/books?name=DICODING&finished=1", None).await;
    assert_eq!(ids(&body), vec!["book-1"]);

    let (_, body) = send(&app, "GET", "/books?reading=0&finished=0", None).await;
    assert_eq!(ids(&body), vec!["book-2", "book-3"]);

    let (_, body) = send(&app, "GET", "/books?reading=1", None).await;
    assert_eq!(ids(&body), vec!["book-1"]);

    let (_, body) = send(&app, "GET", "/books?finished=1", None).await;
    assert_eq!(ids(&body), vec!["book-2"]);

    let (_, body) = send(&app, "GET", "/books?name=&reading=&finished=0", None).await;
    assert_eq!(ids(&body), vec!["book-1", "book-3"]);

    let (status, body) = send(&app, "GET", "/books?name=golang", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), Vec::<String>::new());
}

#[tokio::test]
async fn test_get_unknown_book() {
    let (status, body) = send(&app(), "GET", "/books/xxxxx", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "status": "fail", "message": "Buku tidak ditemukan" }));
}

#[tokio::test]
async fn test_update_book_round_trip() {
    let app = app();
    let id = add(&app, dicoding(100, 25)).await;
    let (_, before) = send(&app, "GET", &format!("/books/{}", id), None).await;

    let updated = json!({
        "name": "Buku A Revisi",
        "year": 2011,
        "author": "Jane Doe",
        "summary": "Lorem Dolor sit Amet",
        "publisher": "Dicoding",
        "pageCount": 200,
        "readPage": 200,
        "reading": true
    });
    let (status, body) = send(&app, "PUT", &format!("/books/{}", id), Some(updated)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "message": "Buku berhasil diperbarui" }));

    let (_, after) = send(&app, "GET", &format!("/books/{}", id), None).await;
    let (before, after) = (&before["data"]["book"], &after["data"]["book"]);
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert!(after["updatedAt"].as_str() >= before["updatedAt"].as_str());
    assert_eq!(after["name"], "Buku A Revisi");
    assert_eq!(after["year"], 2011);
    assert_eq!(after["author"], "Jane Doe");
    assert_eq!(after["publisher"], "Dicoding");
    assert_eq!(after["pageCount"], 200);
    assert_eq!(after["readPage"], 200);
    assert_eq!(after["reading"], true);
    assert_eq!(after["finished"], true);
}

#[tokio::test]
async fn test_update_book_failures() {
    let app = app();
    let id = add(&app, dicoding(100, 25)).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/{}", id),
        Some(json!({ "pageCount": 10, "readPage": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let (status, body) = send(&app, "PUT", &format!("/books/{}", id), Some(dicoding(10, 20))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    // validation is reported before the missing id
    let (status, _) = send(&app, "PUT", "/books/xxxxx", Some(dicoding(10, 20))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "PUT", "/books/xxxxx", Some(dicoding(10, 5))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "status": "fail", "message": "Gagal memperbarui buku. Id tidak ditemukan" })
    );
}

#[tokio::test]
async fn test_delete_book_twice() {
    let app = app();
    let id = add(&app, dicoding(100, 25)).await;

    let (status, body) = send(&app, "DELETE", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "message": "Buku berhasil dihapus" }));

    let (status, body) = send(&app, "DELETE", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "status": "fail", "message": "Buku gagal dihapus. Id tidak ditemukan" })
    );

    let (status, _) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_book() {
    let (status, body) = send(&app(), "DELETE", "/books/never-issued", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body) = send(&app(), "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
}

#[tokio::test]
async fn test_list_books_with_repeated_query_key() {
    let app = app_with_sequential_ids();
    let mut reading = dicoding(100, 10);
    reading["reading"] = json!(true);
    add(&app, reading).await;
    add(&app, dicoding(100, 10)).await;

    let (status, body) = send(&app, "GET", "/books?reading=1&reading=0", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["data"]["books"],
        json!([{ "id": "book-1", "name": "Buku A", "publisher": "Dicoding Indonesia" }])
    );
}

#[tokio::test]
async fn test_add_book_with_null_counters() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "name": "Dicoding", "pageCount": null, "readPage": null, "reading": null })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = body["data"]["bookId"].as_str().expect("No book id");
    let (_, body) = send(&app, "GET", &format!("/books/{}", id), None).await;
    let book = &body["data"]["book"];
    assert_eq!(book["pageCount"], 0);
    assert_eq!(book["readPage"], 0);
    assert_eq!(book["reading"], false);
    assert_eq!(book["finished"], true);
}

#[tokio::test]
async fn test_add_book_without_content_type() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .body(Body::from(dicoding(100, 10).to_string()))
        .expect("Failed to build request");
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .body(Body::from("{not json"))
        .expect("Failed to build request");
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body: Value = serde_json::from_slice(&bytes).expect("Body should be JSON");
    assert_eq!(body["status"], "fail");
}
