//! Complainant endpoints: create, fetch-by-id, filtered list.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::db::repository;
use crate::models::Complainant;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ComplainantCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub postcode: String,
}

#[derive(Debug, Deserialize)]
pub struct ComplainantListQuery {
    pub q: Option<String>,
}

/// Summary shape for list responses; the full record (including address
/// lines and timestamps) stays behind fetch-by-id.
#[derive(Debug, Serialize)]
pub struct ComplainantSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub city: String,
}

/// `POST /complainants/` — create a complainant with address details.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ComplainantCreate>,
) -> Result<(StatusCode, Json<Complainant>), ApiError> {
    let conn = state.open_db()?;

    let now = Utc::now();
    let complainant = Complainant {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        address_line1: payload.address_line1,
        address_line2: payload.address_line2,
        city: payload.city,
        postcode: payload.postcode,
        created_at: now,
        updated_at: now,
    };
    repository::complainant::insert_complainant(&conn, &complainant)?;

    Ok((StatusCode::CREATED, Json(complainant)))
}

/// `GET /complainants/:id` — full record including address fields.
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Complainant>, ApiError> {
    let conn = state.open_db()?;
    let complainant_id = Uuid::parse_str(&id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid complainant ID: {e}")))?;

    let complainant = repository::complainant::get_complainant(&conn, &complainant_id)?
        .ok_or_else(|| ApiError::NotFound("Complainant not found".into()))?;

    Ok(Json(complainant))
}

/// `GET /complainants?q=` — list, optionally filtered by a
/// case-insensitive substring match on name OR email.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ComplainantListQuery>,
) -> Result<Json<Vec<ComplainantSummary>>, ApiError> {
    let conn = state.open_db()?;
    let complainants = repository::complainant::list_complainants(&conn, query.q.as_deref())?;

    let summaries = complainants
        .into_iter()
        .map(|c| ComplainantSummary {
            id: c.id,
            name: c.name,
            email: c.email,
            city: c.city,
        })
        .collect();
    Ok(Json(summaries))
}
