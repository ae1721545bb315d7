use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Complaint;

use super::parse_uuid;

pub fn insert_complaint(conn: &Connection, complaint: &Complaint) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO complaints (id, description, category_id, complainant_id, patient_id,
         case_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            complaint.id.to_string(),
            complaint.description,
            complaint.category_id.to_string(),
            complaint.complainant_id.to_string(),
            complaint.patient_id.to_string(),
            complaint.case_id.to_string(),
            complaint.created_at,
            complaint.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_complaint(conn: &Connection, id: &Uuid) -> Result<Option<Complaint>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, description, category_id, complainant_id, patient_id, case_id,
             created_at, updated_at
             FROM complaints WHERE id = ?1",
            params![id.to_string()],
            complaint_row,
        )
        .optional()?;

    row.map(complaint_from_row).transpose()
}

pub fn count_complaints(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM complaints", [], |row| row.get(0))?;
    Ok(count)
}

// Internal row type for Complaint mapping
struct ComplaintRow {
    id: String,
    description: String,
    category_id: String,
    complainant_id: String,
    patient_id: String,
    case_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn complaint_row(row: &rusqlite::Row<'_>) -> Result<ComplaintRow, rusqlite::Error> {
    Ok(ComplaintRow {
        id: row.get(0)?,
        description: row.get(1)?,
        category_id: row.get(2)?,
        complainant_id: row.get(3)?,
        patient_id: row.get(4)?,
        case_id: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn complaint_from_row(row: ComplaintRow) -> Result<Complaint, DatabaseError> {
    Ok(Complaint {
        id: parse_uuid(&row.id)?,
        description: row.description,
        category_id: parse_uuid(&row.category_id)?,
        complainant_id: parse_uuid(&row.complainant_id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        case_id: parse_uuid(&row.case_id)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
