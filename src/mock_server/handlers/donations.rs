//! Donations endpoint handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

use super::osdi_page;

/// Query parameters for listing donations.
#[derive(Debug, Default, Deserialize)]
pub struct ListDonationsQuery {
    pub page: Option<usize>,
}

/// GET /donations
pub async fn list_donations(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListDonationsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    let page = query.page.unwrap_or(1);

    let body = osdi_page(
        &state.base_url,
        "donations",
        "osdi:donations",
        &state.donations,
        page,
        state.page_size,
        None,
    );
    Json(body)
}
