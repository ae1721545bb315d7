use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Complainant;

use super::parse_uuid;

pub fn insert_complainant(conn: &Connection, complainant: &Complainant) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO complainants (id, name, email, phone, address_line1, address_line2,
         city, postcode, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            complainant.id.to_string(),
            complainant.name,
            complainant.email,
            complainant.phone,
            complainant.address_line1,
            complainant.address_line2,
            complainant.city,
            complainant.postcode,
            complainant.created_at,
            complainant.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_complainant(conn: &Connection, id: &Uuid) -> Result<Option<Complainant>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, email, phone, address_line1, address_line2, city, postcode,
             created_at, updated_at
             FROM complainants WHERE id = ?1",
            params![id.to_string()],
            complainant_row,
        )
        .optional()?;

    row.map(complainant_from_row).transpose()
}

/// List complainants, optionally filtered by a case-insensitive substring
/// match against name OR email.
pub fn list_complainants(
    conn: &Connection,
    query: Option<&str>,
) -> Result<Vec<Complainant>, DatabaseError> {
    let mut complainants = Vec::new();

    match query {
        Some(q) => {
            let pattern = format!("%{q}%");
            let mut stmt = conn.prepare(
                "SELECT id, name, email, phone, address_line1, address_line2, city, postcode,
                 created_at, updated_at
                 FROM complainants
                 WHERE LOWER(name) LIKE LOWER(?1) OR LOWER(email) LIKE LOWER(?1)
                 ORDER BY rowid",
            )?;
            let rows = stmt.query_map(params![pattern], complainant_row)?;
            for row in rows {
                complainants.push(complainant_from_row(row?)?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, phone, address_line1, address_line2, city, postcode,
                 created_at, updated_at
                 FROM complainants ORDER BY rowid",
            )?;
            let rows = stmt.query_map([], complainant_row)?;
            for row in rows {
                complainants.push(complainant_from_row(row?)?);
            }
        }
    }

    Ok(complainants)
}

/// Update the mutable complainant fields. `updated_at` is refreshed as
/// part of the mutation; `created_at` is left untouched.
pub fn update_complainant(
    conn: &Connection,
    complainant: &Complainant,
) -> Result<DateTime<Utc>, DatabaseError> {
    let updated_at = Utc::now();
    conn.execute(
        "UPDATE complainants SET name = ?2, email = ?3, phone = ?4, address_line1 = ?5,
         address_line2 = ?6, city = ?7, postcode = ?8, updated_at = ?9
         WHERE id = ?1",
        params![
            complainant.id.to_string(),
            complainant.name,
            complainant.email,
            complainant.phone,
            complainant.address_line1,
            complainant.address_line2,
            complainant.city,
            complainant.postcode,
            updated_at,
        ],
    )?;
    Ok(updated_at)
}

// Internal row type for Complainant mapping
struct ComplainantRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    address_line1: String,
    address_line2: Option<String>,
    city: String,
    postcode: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn complainant_row(row: &rusqlite::Row<'_>) -> Result<ComplainantRow, rusqlite::Error> {
    Ok(ComplainantRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        address_line1: row.get(4)?,
        address_line2: row.get(5)?,
        city: row.get(6)?,
        postcode: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn complainant_from_row(row: ComplainantRow) -> Result<Complainant, DatabaseError> {
    Ok(Complainant {
        id: parse_uuid(&row.id)?,
        name: row.name,
        email: row.email,
        phone: row.phone,
        address_line1: row.address_line1,
        address_line2: row.address_line2,
        city: row.city,
        postcode: row.postcode,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
