//! Complaint intake and retrieval.
//!
//! Intake resolves all four references against current store state
//! before anything is written. Checks run in a fixed order so error
//! reporting is deterministic; the first failing check wins and nothing
//! is persisted on rejection.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::db::repository;
use crate::models::{Case, Complainant, Complaint, ComplaintCategory, Patient};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ComplaintCreate {
    pub description: String,
    pub category_id: Uuid,
    pub complainant_id: Uuid,
    pub patient_id: Uuid,
    pub case_id: Uuid,
}

/// Complaint with its related records embedded, assembled from rows
/// already fetched during validation. The persisted entity is never
/// mutated to carry relations.
#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: ComplaintCategory,
    pub complainant: Complainant,
    pub patient: Patient,
    pub case: Case,
}

impl ComplaintResponse {
    fn assemble(
        complaint: Complaint,
        category: ComplaintCategory,
        complainant: Complainant,
        patient: Patient,
        case: Case,
    ) -> Self {
        Self {
            id: complaint.id,
            description: complaint.description,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
            category,
            complainant,
            patient,
            case,
        }
    }
}

/// `POST /complaints/` — validate references, then persist.
///
/// Validation order: category, complainant, patient, case (which must
/// belong to the supplied patient), then description. Exactly one row is
/// inserted on success; a rejection writes nothing.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ComplaintCreate>,
) -> Result<(StatusCode, Json<ComplaintResponse>), ApiError> {
    let conn = state.open_db()?;

    let (category, complainant, patient, case) = validate_references(&conn, &payload)?;

    if payload.description.trim().is_empty() {
        return Err(ApiError::EmptyDescription);
    }

    let now = Utc::now();
    let complaint = Complaint {
        id: Uuid::new_v4(),
        description: payload.description,
        category_id: payload.category_id,
        complainant_id: payload.complainant_id,
        patient_id: payload.patient_id,
        case_id: payload.case_id,
        created_at: now,
        updated_at: now,
    };
    repository::complaint::insert_complaint(&conn, &complaint)?;

    Ok((
        StatusCode::CREATED,
        Json(ComplaintResponse::assemble(
            complaint,
            category,
            complainant,
            patient,
            case,
        )),
    ))
}

/// Resolve the four referenced rows, rejecting on the first miss.
///
/// An existing case owned by a different patient is the same error kind
/// as an unknown case; only the message text distinguishes them.
fn validate_references(
    conn: &Connection,
    payload: &ComplaintCreate,
) -> Result<(ComplaintCategory, Complainant, Patient, Case), ApiError> {
    let category = repository::category::get_category(conn, &payload.category_id)?.ok_or_else(
        || ApiError::InvalidReference {
            field: "category",
            message: format!("Invalid category_id: {}", payload.category_id),
        },
    )?;

    let complainant = repository::complainant::get_complainant(conn, &payload.complainant_id)?
        .ok_or_else(|| ApiError::InvalidReference {
            field: "complainant",
            message: format!("Invalid complainant_id: {}", payload.complainant_id),
        })?;

    let patient = repository::patient::get_patient(conn, &payload.patient_id)?.ok_or_else(|| {
        ApiError::InvalidReference {
            field: "patient",
            message: format!("Invalid patient_id: {}", payload.patient_id),
        }
    })?;

    let case = repository::case::get_case(conn, &payload.case_id)?.ok_or_else(|| {
        ApiError::InvalidReference {
            field: "case",
            message: format!("Unknown case_id: {}", payload.case_id),
        }
    })?;
    if case.patient_id != payload.patient_id {
        return Err(ApiError::InvalidReference {
            field: "case",
            message: format!(
                "Case {} does not belong to patient {}",
                payload.case_id, payload.patient_id
            ),
        });
    }

    Ok((category, complainant, patient, case))
}

/// `GET /complaints/:id` — complaint with embedded relations.
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ComplaintResponse>, ApiError> {
    let conn = state.open_db()?;
    let complaint_id = Uuid::parse_str(&id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid complaint ID: {e}")))?;

    let complaint = repository::complaint::get_complaint(&conn, &complaint_id)?
        .ok_or_else(|| ApiError::NotFound("Complaint not found".into()))?;

    // References were validated at intake; a miss here means the store
    // changed underneath us and is reported as an internal error.
    let category = repository::category::get_category(&conn, &complaint.category_id)?
        .ok_or_else(|| missing_relation(&complaint.id, "category"))?;
    let complainant = repository::complainant::get_complainant(&conn, &complaint.complainant_id)?
        .ok_or_else(|| missing_relation(&complaint.id, "complainant"))?;
    let patient = repository::patient::get_patient(&conn, &complaint.patient_id)?
        .ok_or_else(|| missing_relation(&complaint.id, "patient"))?;
    let case = repository::case::get_case(&conn, &complaint.case_id)?
        .ok_or_else(|| missing_relation(&complaint.id, "case"))?;

    Ok(Json(ComplaintResponse::assemble(
        complaint,
        category,
        complainant,
        patient,
        case,
    )))
}

fn missing_relation(complaint_id: &Uuid, relation: &str) -> ApiError {
    ApiError::Internal(format!("complaint {complaint_id} references a missing {relation}"))
}
