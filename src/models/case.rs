use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Patient-scoped record that complaints are filed against.
///
/// `case_reference` is the human-readable identifier and is unique
/// store-wide. Every case belongs to exactly one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    pub case_reference: String,
    pub patient_id: Uuid,
}
