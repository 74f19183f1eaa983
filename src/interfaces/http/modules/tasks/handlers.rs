//! Task REST API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{TaskDto, TaskRequest};
use crate::application::TaskService;
use crate::interfaces::http::common::{ApiError, ErrorResponse, IdPath, ValidatedJson};

#[derive(Clone)]
pub struct TaskHandlerState {
    pub task_service: Arc<TaskService>,
}

#[utoipa::path(
    get,
    path = "/v1/tasks",
    tag = "Tasks",
    responses((status = 200, description = "All tasks", body = Vec<TaskDto>))
)]
pub async fn list_tasks(State(state): State<TaskHandlerState>) -> Result<Json<Vec<TaskDto>>, ApiError> {
    let tasks = state.task_service.list().await?;
    Ok(Json(tasks.into_iter().map(TaskDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/v1/tasks/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task details", body = TaskDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_task(
    State(state): State<TaskHandlerState>,
    IdPath(id): IdPath,
) -> Result<Json<TaskDto>, ApiError> {
    Ok(Json(state.task_service.get(id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/v1/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Created", body = TaskDto),
        (status = 422, description = "Rejected", body = ErrorResponse)
    )
)]
pub async fn create_task(
    State(state): State<TaskHandlerState>,
    ValidatedJson(req): ValidatedJson<TaskRequest>,
) -> Result<(StatusCode, Json<TaskDto>), ApiError> {
    let task = state
        .task_service
        .create(req.into())
        .await
        .map_err(ApiError::mapped(StatusCode::UNPROCESSABLE_ENTITY))?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

#[utoipa::path(
    put,
    path = "/v1/tasks/{id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Task ID")),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Updated", body = TaskDto),
        (status = 422, description = "Unknown task or rejected update", body = ErrorResponse)
    )
)]
pub async fn update_task(
    State(state): State<TaskHandlerState>,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<TaskRequest>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state
        .task_service
        .update(id, req.into())
        .await
        .map_err(ApiError::mapped(StatusCode::UNPROCESSABLE_ENTITY))?;
    Ok(Json(task.into()))
}

#[utoipa::path(
    delete,
    path = "/v1/tasks/{id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_task(
    State(state): State<TaskHandlerState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.task_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
