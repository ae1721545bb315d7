use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Patient;

use super::parse_uuid;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, date_of_birth) VALUES (?1, ?2, ?3)",
        params![patient.id.to_string(), patient.name, patient.date_of_birth],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, date_of_birth FROM patients WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, DateTime<Utc>>(2)?,
                ))
            },
        )
        .optional()?;

    row.map(|(id, name, date_of_birth)| {
        Ok(Patient {
            id: parse_uuid(&id)?,
            name,
            date_of_birth,
        })
    })
    .transpose()
}

/// List patients, optionally filtered by a case-insensitive name match.
pub fn list_patients(conn: &Connection, query: Option<&str>) -> Result<Vec<Patient>, DatabaseError> {
    let mut patients = Vec::new();

    match query {
        Some(q) => {
            let pattern = format!("%{q}%");
            let mut stmt = conn.prepare(
                "SELECT id, name, date_of_birth FROM patients
                 WHERE LOWER(name) LIKE LOWER(?1) ORDER BY rowid",
            )?;
            let rows = stmt.query_map(params![pattern], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, DateTime<Utc>>(2)?,
                ))
            })?;
            for row in rows {
                let (id, name, date_of_birth) = row?;
                patients.push(Patient { id: parse_uuid(&id)?, name, date_of_birth });
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT id, name, date_of_birth FROM patients ORDER BY rowid")?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, DateTime<Utc>>(2)?,
                ))
            })?;
            for row in rows {
                let (id, name, date_of_birth) = row?;
                patients.push(Patient { id: parse_uuid(&id)?, name, date_of_birth });
            }
        }
    }

    Ok(patients)
}

pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}
