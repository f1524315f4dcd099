use axum::extract::{Path, State};
use axum::Json;

use crate::dto::{DeleteResult, TopicDraft, TopicResponse};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::AppState;

/// GET /api/topics/user/:user_id - topics owned by a user, newest first
pub async fn list_by_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Vec<TopicResponse>> {
    Ok(ApiResponse::success(state.topics.list_by_user(user_id).await))
}

/// POST /api/topics/user/:user_id - create a topic under a user
pub async fn create_under_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<i64>,
    Json(draft): Json<TopicDraft>,
) -> ApiResult<TopicResponse> {
    Ok(ApiResponse::created(state.topics.create(user_id, draft).await?))
}

/// GET /api/topics/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<TopicResponse> {
    Ok(ApiResponse::success(state.topics.get(id).await?))
}

/// PUT /api/topics/:id - full replace of name and description
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    Json(draft): Json<TopicDraft>,
) -> ApiResult<TopicResponse> {
    Ok(ApiResponse::success(state.topics.update(id, draft).await?))
}

/// DELETE /api/topics/:id - cascades through tasks and todos
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<DeleteResult> {
    let deleted = state.topics.delete(id).await;
    Ok(ApiResponse::success(DeleteResult { deleted }))
}
