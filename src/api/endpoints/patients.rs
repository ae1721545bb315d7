//! Patient list endpoint. No fetch-by-id is exposed.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::db::repository;
use crate::models::Patient;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PatientListQuery {
    pub q: Option<String>,
}

/// `GET /patients?q=` — list, optionally filtered by a case-insensitive
/// substring match on name.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PatientListQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = state.open_db()?;
    let patients = repository::patient::list_patients(&conn, query.q.as_deref())?;
    Ok(Json(patients))
}
