//! HTTP routes driven through the router without binding a socket

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use daily_concept::{router, ConceptEntry, DailySelector, GlossaryStore, MemoryHistory, ServerState};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with_history(history: Arc<MemoryHistory>) -> axum::Router {
    let store = GlossaryStore::from_entries(vec![
        ConceptEntry::new("Roadmap", "A plan"),
        ConceptEntry::new("Backlog", "Work <queued>"),
        ConceptEntry::new("Product Vision", "Where we are going"),
    ])
    .unwrap();
    let selector = DailySelector::new(Arc::new(store), history);
    router(ServerState::new(Arc::new(selector)))
}

fn app() -> axum::Router {
    app_with_history(Arc::new(MemoryHistory::new()))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_today_is_stable() {
    let history = Arc::new(MemoryHistory::new());
    let app = app_with_history(history.clone());

    let (status, first) = get(app.clone(), "/api/today").await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = get(app, "/api/today").await;

    let first: serde_json::Value = serde_json::from_str(&first).unwrap();
    let second: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_eq!(first, second);
    assert!(first["concept"].is_string());
    assert!(first["definition"].is_string());
    assert_eq!(first["date"].as_str().unwrap().len(), 10);
    assert_eq!(history.write_count(), 1);
}

#[tokio::test]
async fn test_list_in_source_order() {
    let (status, body) = get(app(), "/api/concepts").await;
    assert_eq!(status, StatusCode::OK);
    let entries: Vec<ConceptEntry> = serde_json::from_str(&body).unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.concept.as_str()).collect();
    assert_eq!(names, vec!["Roadmap", "Backlog", "Product Vision"]);
}

#[tokio::test]
async fn test_search() {
    let (_, body) = get(app(), "/api/concepts?q=pRoD").await;
    let entries: Vec<ConceptEntry> = serde_json::from_str(&body).unwrap();
    assert_eq!(entries, vec![ConceptEntry::new("Product Vision", "Where we are going")]);
}

#[tokio::test]
async fn test_concept_lookup() {
    let (status, body) = get(app(), "/api/concepts/Roadmap").await;
    assert_eq!(status, StatusCode::OK);
    let entry: ConceptEntry = serde_json::from_str(&body).unwrap();
    assert_eq!(entry.definition, "A plan");

    let (status, body) = get(app(), "/api/concepts/Kanban").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("concept not found: Kanban"));
}

#[tokio::test]
async fn test_pages() {
    let (status, daily) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(daily.contains("Daily Product Concept"));

    let (status, library) = get(app(), "/library").await;
    assert_eq!(status, StatusCode::OK);
    assert!(library.contains("<h3>Roadmap</h3>"));
    assert!(library.contains("Work &lt;queued&gt;"));
}

#[tokio::test]
async fn test_corrupt_history_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shown_history.json");
    std::fs::write(&path, "[]").unwrap();

    let store = GlossaryStore::from_entries(vec![ConceptEntry::new("Roadmap", "A plan")]).unwrap();
    let selector = DailySelector::new(Arc::new(store), Arc::new(daily_concept::JsonFileHistory::new(&path)));
    let app = router(ServerState::new(Arc::new(selector)));

    let (status, body) = get(app.clone(), "/api/today").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("unavailable"));

    let (status, _) = get(app, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_status() {
    let (status, body) = get(app(), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["concepts"], 3);
}

#[tokio::test]
async fn test_history_reflects_visits() {
    let app = app();
    let (_, empty) = get(app.clone(), "/api/history").await;
    assert_eq!(empty, "{}");

    let (_, today) = get(app.clone(), "/api/today").await;
    let today: serde_json::Value = serde_json::from_str(&today).unwrap();

    let (status, body) = get(app, "/api/history").await;
    assert_eq!(status, StatusCode::OK);
    let history: serde_json::Value = serde_json::from_str(&body).unwrap();
    let date = today["date"].as_str().unwrap();
    assert_eq!(history[date], today["concept"]);
}
