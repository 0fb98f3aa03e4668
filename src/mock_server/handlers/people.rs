//! People endpoint handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::{has_id, MockState};
use crate::Person;

use super::{not_found, osdi_page};

/// Query parameters for listing people.
#[derive(Debug, Default, Deserialize)]
pub struct ListPeopleQuery {
    pub filter: Option<String>,
    pub page: Option<usize>,
}

/// Parse an OSDI filter expression (`<field> eq '<term>'`).
fn parse_filter(filter: &str) -> Option<(String, String)> {
    let (field, term) = filter.split_once(" eq ")?;
    Some((
        field.trim().to_string(),
        term.trim().trim_matches('\'').to_string(),
    ))
}

/// GET /people
pub async fn list_people(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListPeopleQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    let page = query.page.unwrap_or(1);

    let parsed = query.filter.as_deref().and_then(parse_filter);
    let matches: Vec<&Person> = state.filter_people(
        parsed.as_ref().map(|(f, _)| f.as_str()),
        parsed.as_ref().map(|(_, t)| t.as_str()),
    );

    let body = osdi_page(
        &state.base_url,
        "people",
        "osdi:people",
        &matches,
        page,
        state.page_size,
        query.filter.as_deref().map(|f| ("filter", f)),
    );
    Json(body)
}

/// GET /people/{id}
pub async fn get_person(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_person(&id) {
        Some(person) => (StatusCode::OK, Json(serde_json::to_value(person).unwrap())),
        None => (StatusCode::NOT_FOUND, Json(not_found("person", &id))),
    }
}

/// POST /people
///
/// Accepts the signup shape: person fields nested under `person`, plus an
/// optional `add_tags` array.
pub async fn create_person(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    let Some(mut fields) = payload.get("person").cloned() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "payload must nest fields under 'person'" })),
        );
    };

    let id = format!("mock-person-{}", state.people.len() + 1);
    fields["identifiers"] = json!([format!("action_network:{id}")]);
    fields["created_date"] = json!("2017-08-01T10:00:00Z");
    fields["modified_date"] = json!("2017-08-01T10:00:00Z");

    match serde_json::from_value::<Person>(fields) {
        Ok(person) => {
            state.people.push(person.clone());
            (StatusCode::OK, Json(serde_json::to_value(person).unwrap()))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}

/// PUT /people/{id}
///
/// Accepts the update shape: person fields at the top level, unnested.
pub async fn update_person(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    let Some(position) = state
        .people
        .iter()
        .position(|p| has_id(&p.identifiers, &id))
    else {
        return (StatusCode::NOT_FOUND, Json(not_found("person", &id)));
    };

    let mut merged = serde_json::to_value(&state.people[position]).unwrap();
    if let (Some(target), Some(updates)) = (merged.as_object_mut(), payload.as_object()) {
        for (key, value) in updates {
            if key != "identifiers" {
                target.insert(key.clone(), value.clone());
            }
        }
    }

    match serde_json::from_value::<Person>(merged) {
        Ok(person) => {
            state.people[position] = person.clone();
            (StatusCode::OK, Json(serde_json::to_value(person).unwrap()))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}
