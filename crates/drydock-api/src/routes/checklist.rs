//! Checklist routes.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use drydock_core::requests::ChecklistUpdate;
use drydock_core::responses::ChecklistItemRecord;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::{AppJson, AppPath};

/// Active catalog items in display order.
pub async fn list_checklist_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChecklistItemRecord>>, ApiError> {
    let items = state.service.list_active_checklist_items().await?;
    Ok(Json(items.into_iter().map(ChecklistItemRecord::from).collect()))
}

/// Apply `{"states": {code: bool}}` and return the repair's resulting map.
pub async fn put_repair_checklist(
    State(state): State<AppState>,
    AppPath(repair_uid): AppPath<String>,
    AppJson(update): AppJson<ChecklistUpdate>,
) -> Result<Json<BTreeMap<String, bool>>, ApiError> {
    let entries = state
        .service
        .apply_checklist_states(&repair_uid, &update.states)
        .await?;
    Ok(Json(
        entries
            .into_iter()
            .map(|entry| (entry.code, entry.checked))
            .collect(),
    ))
}
