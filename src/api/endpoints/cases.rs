//! Case list endpoint. No fetch-by-id is exposed.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::db::repository;
use crate::models::Case;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CaseListQuery {
    pub patient_id: Option<String>,
}

/// `GET /cases?patient_id=` — list, optionally restricted to one patient.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CaseListQuery>,
) -> Result<Json<Vec<Case>>, ApiError> {
    let conn = state.open_db()?;

    let patient_id = query
        .patient_id
        .as_deref()
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|e| ApiError::BadRequest(format!("Invalid patient ID: {e}")))?;

    let cases = repository::case::list_cases(&conn, patient_id.as_ref())?;
    Ok(Json(cases))
}
