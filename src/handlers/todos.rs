use axum::extract::{Path, State};
use axum::Json;

use crate::dto::{DeleteResult, TodoDraft, TodoResponse};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::AppState;

/// GET /api/todos/task/:task_id - todos under a task, newest first
pub async fn list_by_task(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(task_id): Path<i64>,
) -> ApiResult<Vec<TodoResponse>> {
    Ok(ApiResponse::success(state.todos.list_by_task(task_id).await))
}

/// POST /api/todos/task/:task_id - create a todo under a task
///
/// A draft needs a title or content (each backfills the other); progress is
/// clamped to 0-100 and 100 marks the todo completed.
pub async fn create_under_task(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(task_id): Path<i64>,
    Json(draft): Json<TodoDraft>,
) -> ApiResult<TodoResponse> {
    Ok(ApiResponse::created(state.todos.create(task_id, draft).await?))
}

/// GET /api/todos/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<TodoResponse> {
    Ok(ApiResponse::success(state.todos.get(id).await?))
}

/// PUT /api/todos/:id - full replace with the same normalization as create
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    Json(draft): Json<TodoDraft>,
) -> ApiResult<TodoResponse> {
    Ok(ApiResponse::success(state.todos.update(id, draft).await?))
}

/// DELETE /api/todos/:id
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<DeleteResult> {
    let deleted = state.todos.delete(id).await;
    Ok(ApiResponse::success(DeleteResult { deleted }))
}
