use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use axum_macros::debug_handler;
use log::debug;

use crate::{
    error::ApiError,
    model::{AppState, NewProject, Project, Session},
};

#[debug_handler]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let Json(project) = body.map_err(|rejection| {
        debug!("Rejected project body: {}", rejection);
        ApiError::InvalidBody
    })?;

    if project.name.trim().is_empty() {
        return Err(ApiError::Validation("Project name is required"));
    }

    let database = state.database.lock().await;
    let id = database.add_project(session.user_id, &project)?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

#[debug_handler]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let database = state.database.lock().await;
    let projects = database.get_projects_of(session.user_id)?;

    Ok(Json(projects))
}
