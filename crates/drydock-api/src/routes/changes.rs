//! Component and config change routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use drydock_core::entities::{ComponentChange, ConfigChange};
use drydock_core::requests::{ComponentChangeCreate, ConfigChangeCreate};
use drydock_core::responses::OkResponse;
use drydock_db::DatabaseError;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::{AppJson, AppPath};

pub async fn add_component_change(
    State(state): State<AppState>,
    AppPath(repair_uid): AppPath<String>,
    AppJson(change): AppJson<ComponentChangeCreate>,
) -> Result<(StatusCode, Json<ComponentChange>), ApiError> {
    let created = state.service.add_component_change(&repair_uid, &change).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn remove_component_change(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<OkResponse>, ApiError> {
    if state.service.remove_component_change(id).await? {
        Ok(Json(OkResponse::OK))
    } else {
        Err(DatabaseError::not_found("component change", id).into())
    }
}

pub async fn add_config_change(
    State(state): State<AppState>,
    AppPath(repair_uid): AppPath<String>,
    AppJson(change): AppJson<ConfigChangeCreate>,
) -> Result<(StatusCode, Json<ConfigChange>), ApiError> {
    let created = state.service.add_config_change(&repair_uid, &change).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn remove_config_change(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<OkResponse>, ApiError> {
    if state.service.remove_config_change(id).await? {
        Ok(Json(OkResponse::OK))
    } else {
        Err(DatabaseError::not_found("config change", id).into())
    }
}
