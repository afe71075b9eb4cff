//! Repair routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use drydock_core::requests::RepairCreate;
use drydock_core::responses::RepairView;
use drydock_db::RepairFilter;
use drydock_db::updates::repair::RepairUpdate;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};

pub async fn create_repair(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RepairCreate>,
) -> Result<(StatusCode, Json<RepairView>), ApiError> {
    let repair = state.service.create_repair(payload).await?;
    let view = state.service.get_repair_view(&repair.repair_uid).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /repairs?hull_id=&date_from=&date_to=&limit=`
pub async fn list_repairs(
    State(state): State<AppState>,
    AppQuery(mut filter): AppQuery<RepairFilter>,
) -> Result<Json<Vec<RepairView>>, ApiError> {
    filter.limit = Some(state.general.effective_limit(filter.limit));
    Ok(Json(state.service.list_repair_views(&filter).await?))
}

pub async fn get_repair(
    State(state): State<AppState>,
    AppPath(repair_uid): AppPath<String>,
) -> Result<Json<RepairView>, ApiError> {
    Ok(Json(state.service.get_repair_view(&repair_uid).await?))
}

pub async fn update_repair(
    State(state): State<AppState>,
    AppPath(repair_uid): AppPath<String>,
    AppJson(update): AppJson<RepairUpdate>,
) -> Result<Json<RepairView>, ApiError> {
    state.service.update_repair(&repair_uid, &update).await?;
    Ok(Json(state.service.get_repair_view(&repair_uid).await?))
}
