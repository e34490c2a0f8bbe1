use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::state::AppState;

pub async fn list_promos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let promos = state.promo_repo.list_active().await?;
    Ok(Json(json!({ "success": true, "promos": promos })))
}
