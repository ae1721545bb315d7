use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Case;

use super::parse_uuid;

pub fn insert_case(conn: &Connection, case: &Case) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO cases (id, case_reference, patient_id) VALUES (?1, ?2, ?3)",
        params![
            case.id.to_string(),
            case.case_reference,
            case.patient_id.to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_case(conn: &Connection, id: &Uuid) -> Result<Option<Case>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, case_reference, patient_id FROM cases WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    row.map(|(id, case_reference, patient_id)| {
        Ok(Case {
            id: parse_uuid(&id)?,
            case_reference,
            patient_id: parse_uuid(&patient_id)?,
        })
    })
    .transpose()
}

/// List cases, optionally restricted to one patient (exact match).
pub fn list_cases(conn: &Connection, patient_id: Option<&Uuid>) -> Result<Vec<Case>, DatabaseError> {
    let mut cases = Vec::new();

    match patient_id {
        Some(patient_id) => {
            let mut stmt = conn.prepare(
                "SELECT id, case_reference, patient_id FROM cases
                 WHERE patient_id = ?1 ORDER BY rowid",
            )?;
            let rows = stmt.query_map(params![patient_id.to_string()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            for row in rows {
                let (id, case_reference, patient_id) = row?;
                cases.push(Case {
                    id: parse_uuid(&id)?,
                    case_reference,
                    patient_id: parse_uuid(&patient_id)?,
                });
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT id, case_reference, patient_id FROM cases ORDER BY rowid")?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            for row in rows {
                let (id, case_reference, patient_id) = row?;
                cases.push(Case {
                    id: parse_uuid(&id)?,
                    case_reference,
                    patient_id: parse_uuid(&patient_id)?,
                });
            }
        }
    }

    Ok(cases)
}

pub fn count_cases(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM cases", [], |row| row.get(0))?;
    Ok(count)
}
