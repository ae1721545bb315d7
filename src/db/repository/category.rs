use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::ComplaintCategory;

use super::parse_uuid;

pub fn insert_category(conn: &Connection, category: &ComplaintCategory) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO complaint_categories (id, main_category, sub_category) VALUES (?1, ?2, ?3)",
        params![
            category.id.to_string(),
            category.main_category,
            category.sub_category,
        ],
    )?;
    Ok(())
}

pub fn get_category(conn: &Connection, id: &Uuid) -> Result<Option<ComplaintCategory>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, main_category, sub_category FROM complaint_categories WHERE id = ?1",
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

    row.map(|(id, main_category, sub_category)| {
        Ok(ComplaintCategory {
            id: parse_uuid(&id)?,
            main_category,
            sub_category,
        })
    })
    .transpose()
}

/// All categories in insertion order; grouping into the two-level
/// taxonomy happens in `taxonomy::group_categories`.
pub fn list_categories(conn: &Connection) -> Result<Vec<ComplaintCategory>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, main_category, sub_category FROM complaint_categories ORDER BY rowid",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut categories = Vec::new();
    for row in rows {
        let (id, main_category, sub_category) = row?;
        categories.push(ComplaintCategory {
            id: parse_uuid(&id)?,
            main_category,
            sub_category,
        });
    }
    Ok(categories)
}

pub fn count_categories(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM complaint_categories", [], |row| row.get(0))?;
    Ok(count)
}
