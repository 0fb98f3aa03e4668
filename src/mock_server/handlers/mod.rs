//! Endpoint handlers for the mock Action Network server.

mod donations;
mod people;
mod tags;

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use url::Url;

use super::state::MockState;

pub use donations::list_donations;
pub use people::{create_person, get_person, list_people, update_person};
pub use tags::{get_tag, list_tags, list_taggings};

/// GET / — the discovery document.
pub async fn discovery(State(state): State<Arc<RwLock<MockState>>>) -> Json<Value> {
    let state = state.read().await;
    let base = &state.base_url;

    Json(json!({
        "motd": state.motd,
        "links": { "self": format!("{base}/") },
        "_links": {
            "self": { "href": format!("{base}/") },
            "osdi:people": { "href": format!("{base}/people") },
            "osdi:donations": { "href": format!("{base}/donations") },
            "osdi:tags": { "href": format!("{base}/tags") },
            "curies": { "href": format!("{base}/docs/{{rel}}") }
        }
    }))
}

/// Render one OSDI collection page with hypermedia continuation links.
pub(super) fn osdi_page<T: Serialize>(
    base_url: &str,
    path: &str,
    embed_key: &str,
    items: &[T],
    page: usize,
    per_page: usize,
    extra_query: Option<(&str, &str)>,
) -> Value {
    let total = items.len();
    let start = page.saturating_sub(1) * per_page;
    let end = (start + per_page).min(total);
    let slice: &[T] = if start < total { &items[start..end] } else { &[] };

    let href = |p: usize| -> String {
        let mut url = Url::parse(&format!("{base_url}/{path}")).expect("mock base url is valid");
        {
            let mut pairs = url.query_pairs_mut();
            if let Some((key, value)) = extra_query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("page", &p.to_string());
        }
        url.to_string()
    };

    let mut links = json!({ "self": { "href": href(page) } });
    if end < total {
        links["next"] = json!({ "href": href(page + 1) });
    }
    if page > 1 {
        links["prev"] = json!({ "href": href(page - 1) });
    }

    json!({
        "total_records": total,
        "page": page,
        "per_page": per_page,
        "_links": links,
        "_embedded": { embed_key: slice }
    })
}

pub(super) fn not_found(kind: &str, id: &str) -> Value {
    json!({
        "error": format!("{kind} not found"),
        "message": format!("No {kind} found with id: {id}")
    })
}
