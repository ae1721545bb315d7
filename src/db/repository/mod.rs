//! Per-entity SQL access. Identifiers are stored as TEXT and parsed back
//! into `Uuid`s on read; timestamps round-trip as RFC 3339 text.

pub mod case;
pub mod category;
pub mod complainant;
pub mod complaint;
pub mod patient;

use uuid::Uuid;

use super::DatabaseError;

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value)
        .map_err(|e| DatabaseError::ConstraintViolation(format!("malformed id in row: {e}")))
}
