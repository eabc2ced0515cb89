use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use etl_studio::adapters::etl_registry::InMemoryEtlRegistry;
use etl_studio::adapters::query_store::InMemoryQueryStore;
use etl_studio::config::{EtlSettings, ServerSettings, Settings, SqlLabSettings, UiSettings};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::util::ServiceExt;

fn settings(dist_dir: &Path) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        sqllab: SqlLabSettings {
            webserver_timeout: 45,
            etl_error_message: "ETL creation failed".to_string(),
        },
        etl: EtlSettings::default(),
        ui: UiSettings {
            dist_dir: dist_dir.to_path_buf(),
        },
    }
}

fn app(dist_dir: &Path) -> Router {
    etl_studio::create_app(
        Arc::new(settings(dist_dir)),
        Arc::new(InMemoryQueryStore::new()),
        Arc::new(InMemoryEtlRegistry::new()),
    )
    .unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body_json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, body_json)
}

fn etl_request(name: &str, chunk_size: Value, columns: Value) -> Value {
    json!({
        "name": name,
        "chunk_size": chunk_size,
        "columns": columns,
        "sql": "SELECT user_id, amount FROM sales",
        "db_id": 1
    })
}

#[tokio::test]
async fn test_health() {
    let app = app(Path::new("ui/dist"));
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_common_settings() {
    let app = app(Path::new("ui/dist"));
    let (status, body) = send(&app, "GET", "/api/common", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["webserver_timeout"], 45);
    assert_eq!(body["data"]["etl_error_message"], "ETL creation failed");
    assert_eq!(body["data"]["column_name_pattern"], "^[A-Za-z0-9_]+$");
}

#[tokio::test]
async fn test_query_history() {
    let app = app(Path::new("ui/dist"));
    let (status, body) = send(
        &app,
        "POST",
        "/api/queries",
        Some(json!({
            "db_id": 1,
            "db": "main",
            "user": "admin",
            "sql": "SELECT user_id, amount FROM sales",
            "start_dttm": "2024-01-01T00:00:00Z",
            "end_dttm": "2024-01-01T00:00:03Z",
            "results": {
                "columns": [
                    {"name": "user_id", "type": "INT", "is_dim": true},
                    {"name": "amount", "type": "FLOAT"}
                ]
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/api/queries/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["results"]["columns"][0]["name"], "user_id");
    assert_eq!(body["data"]["results"]["columns"][0]["is_dim"], true);

    let (status, body) = send(&app, "GET", "/api/queries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/api/queries/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_etl_datasource() {
    let app = app(Path::new("ui/dist"));
    let (status, body) = send(
        &app,
        "POST",
        "/api/etl",
        Some(etl_request(
            "main-admin-sales",
            json!("500"),
            json!({
                "user_id": {"is_index": true, "type": "INTEGER"},
                "amount": {"verbose_name": "Amount", "type": "NUMERIC"}
            }),
        )),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["chunk_size"], 500);
    assert_eq!(body["data"]["columns"]["user_id"]["is_index"], true);
    assert_eq!(body["data"]["columns"]["amount"]["verbose_name"], "Amount");

    let (status, body) = send(&app, "GET", "/api/etl", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "main-admin-sales");
}

#[tokio::test]
async fn test_create_etl_rejections() {
    let app = app(Path::new("ui/dist"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/etl",
        Some(etl_request("ds", json!("lots"), json!({"a": {}}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("chunk_size"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/etl",
        Some(etl_request("ds", json!(100), json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/etl",
        Some(etl_request("ds", json!(100), json!({"user id": {}, "amount": {}}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid column names: user id");

    let (status, _) = send(
        &app,
        "POST",
        "/api/etl",
        Some(etl_request("ds", json!(100), json!({"amount": {}}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/etl",
        Some(etl_request("ds", json!(100), json!({"amount": {}}))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ETL data source 'ds' already exists");
}

#[tokio::test]
async fn test_spa_fallback() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>etl studio</html>").unwrap();
    let app = app(dir.path());

    let request = Request::builder()
        .uri("/etltableview/list/")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body_bytes[..], b"<html>etl studio</html>");
}

#[tokio::test]
async fn test_malformed_body_uses_envelope() {
    let app = app(Path::new("ui/dist"));

    for chunk_size in [json!(1.5), Value::Null, json!(true)] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/etl",
            Some(etl_request("ds", chunk_size, json!({"amount": {}}))),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("chunk_size"));
    }

    let (status, body) = send(&app, "POST", "/api/queries", Some(json!({"db_id": 1}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", "/api/etl", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
