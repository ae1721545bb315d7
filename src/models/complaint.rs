use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded complaint. All four references are required and validated
/// against the store at intake; the referenced case must belong to the
/// referenced patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: Uuid,
    pub description: String,
    pub category_id: Uuid,
    pub complainant_id: Uuid,
    pub patient_id: Uuid,
    pub case_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
