//! HTTP handlers for the daily page, the library and the JSON API

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::selector::DATE_FORMAT;
use crate::server::{pages, ServerState};
use crate::types::ConceptEntry;

/// Today's concept
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: String,
    pub concept: String,
    pub definition: String,
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub concepts: usize,
}

/// Library search parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Run the selector off the async runtime; it does blocking file I/O
async fn select_today(state: &ServerState) -> Result<(NaiveDate, ConceptEntry)> {
    let selector = state.selector.clone();
    let today = Local::now().date_naive();
    let entry = tokio::task::spawn_blocking(move || selector.today_concept(today)).await??;
    Ok((today, entry))
}

fn internal_error_json() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Concept of the day is unavailable" })),
    )
        .into_response()
}

/// Daily page
pub async fn daily_page(State(state): State<ServerState>) -> Response {
    match select_today(&state).await {
        Ok((_, entry)) => Html(pages::render_daily(&entry)).into_response(),
        Err(e) => {
            error!("Daily page failed: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::render_error())).into_response()
        }
    }
}

/// Library page
pub async fn library_page(State(state): State<ServerState>) -> Html<String> {
    Html(pages::render_library(state.selector.list_all()))
}

/// Today's concept as JSON
pub async fn today_handler(State(state): State<ServerState>) -> Response {
    match select_today(&state).await {
        Ok((date, entry)) => {
            let response = TodayResponse {
                date: date.format(DATE_FORMAT).to_string(),
                concept: entry.concept,
                definition: entry.definition,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Today's concept failed: {:#}", e);
            internal_error_json()
        }
    }
}

/// All concepts, optionally filtered by `q`
pub async fn list_handler(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ConceptEntry>> {
    let entries = match params.q.as_deref() {
        Some(q) => state.selector.store().search(q).into_iter().cloned().collect(),
        None => state.selector.list_all().to_vec(),
    };
    Json(entries)
}

/// A single concept by exact name
pub async fn concept_handler(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Response {
    match state.selector.find(&name) {
        Ok(entry) => (StatusCode::OK, Json(entry.clone())).into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Health check
pub async fn status_handler(State(state): State<ServerState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        concepts: state.selector.store().size(),
    })
}

/// Recorded date -> concept pairs
pub async fn history_handler(State(state): State<ServerState>) -> Response {
    let selector = state.selector.clone();
    match tokio::task::spawn_blocking(move || selector.history_snapshot()).await {
        Ok(Ok(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(Err(e)) => {
            error!("History listing failed: {}", e);
            internal_error_json()
        }
        Err(e) => {
            error!("History task failed: {}", e);
            internal_error_json()
        }
    }
}
