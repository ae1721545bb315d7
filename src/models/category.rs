use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Two-level classification tag applied to complaints.
///
/// Categories are shared reference data: no other entity owns them, and
/// the `(main_category, sub_category)` pair is unique store-wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintCategory {
    pub id: Uuid,
    pub main_category: String,
    pub sub_category: String,
}
