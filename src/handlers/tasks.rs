use axum::extract::{Path, State};
use axum::Json;

use crate::dto::{DeleteResult, TaskDraft, TaskResponse};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::AppState;

/// GET /api/tasks/topic/:topic_id - tasks under a topic, newest first
pub async fn list_by_topic(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(topic_id): Path<i64>,
) -> ApiResult<Vec<TaskResponse>> {
    Ok(ApiResponse::success(state.tasks.list_by_topic(topic_id).await))
}

/// POST /api/tasks/topic/:topic_id - create a task under a topic
pub async fn create_under_topic(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(topic_id): Path<i64>,
    Json(draft): Json<TaskDraft>,
) -> ApiResult<TaskResponse> {
    Ok(ApiResponse::created(state.tasks.create(topic_id, draft).await?))
}

/// GET /api/tasks/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<TaskResponse> {
    Ok(ApiResponse::success(state.tasks.get(id).await?))
}

/// PUT /api/tasks/:id - full replace; omitted status/priority revert to defaults
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    Json(draft): Json<TaskDraft>,
) -> ApiResult<TaskResponse> {
    Ok(ApiResponse::success(state.tasks.update(id, draft).await?))
}

/// DELETE /api/tasks/:id - cascades through todos
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<DeleteResult> {
    let deleted = state.tasks.delete(id).await;
    Ok(ApiResponse::success(DeleteResult { deleted }))
}
