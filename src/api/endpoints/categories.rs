//! Complaint category endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::db::repository;
use crate::state::AppState;
use crate::taxonomy::{self, CategoryGroup};

/// `GET /complaint-categories/` — all categories grouped by main
/// category, in first-seen order.
pub async fn grouped(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryGroup>>, ApiError> {
    let conn = state.open_db()?;
    let categories = repository::category::list_categories(&conn)?;
    Ok(Json(taxonomy::group_categories(&categories)))
}
