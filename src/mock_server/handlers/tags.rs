//! Tags and taggings endpoint handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::Tagging;

use super::{not_found, osdi_page};

/// Query parameters for paged tag collections.
#[derive(Debug, Default, Deserialize)]
pub struct ListTagsQuery {
    pub page: Option<usize>,
}

/// GET /tags
pub async fn list_tags(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListTagsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    let page = query.page.unwrap_or(1);

    let body = osdi_page(
        &state.base_url,
        "tags",
        "osdi:tags",
        &state.tags,
        page,
        state.page_size,
        None,
    );
    Json(body)
}

/// GET /tags/{id}
pub async fn get_tag(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_tag(&id) {
        Some(tag) => (StatusCode::OK, Json(serde_json::to_value(tag).unwrap())),
        None => (StatusCode::NOT_FOUND, Json(not_found("tag", &id))),
    }
}

/// GET /tags/{id}/taggings
pub async fn list_taggings(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    Query(query): Query<ListTagsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    if state.get_tag(&id).is_none() {
        return (StatusCode::NOT_FOUND, Json(not_found("tag", &id)));
    }

    let empty: Vec<Tagging> = Vec::new();
    let taggings = state.taggings.get(&id).unwrap_or(&empty);
    let page = query.page.unwrap_or(1);

    let body = osdi_page(
        &state.base_url,
        &format!("tags/{id}/taggings"),
        "osdi:taggings",
        taggings,
        page,
        state.page_size,
        None,
    );
    (StatusCode::OK, Json(body))
}
