use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The person filing a complaint, distinct from the patient the
/// complaint concerns. Timestamps are server-assigned; `updated_at` is
/// refreshed on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complainant {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub postcode: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
