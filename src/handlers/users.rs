use axum::extract::{Path, State};
use axum::Json;

use crate::dto::{
    AuthData, AuthStatus, DeleteResult, LoginRequest, RegisterRequest, UserResponse, UserUpsert,
};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::AppState;

/// POST /api/users/register - create an account and receive a JWT token
///
/// Public. Validates username length (3-20) and password length (>= 6),
/// rejects duplicate usernames with 409, and on success responds with
/// `{ user, token, expires_in }` so the client can authenticate immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthData> {
    let data = state.users.register(req).await?;
    let message = format!("registered, welcome {}", data.user.username);
    Ok(ApiResponse::with_message(data, message))
}

/// POST /api/users/login - authenticate and receive a JWT token
///
/// Public. Unknown usernames and wrong passwords produce an identical 401
/// so accounts cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthData> {
    let data = state.users.login(req).await?;
    let message = format!("welcome back {}", data.user.username);
    Ok(ApiResponse::with_message(data, message))
}

/// POST /api/users/logout - always succeeds
///
/// Tokens are stateless, so logout is a client-side discard; the server only
/// logs the event.
pub async fn logout(State(state): State<AppState>, user: Option<AuthUser>) -> ApiResult<()> {
    state.users.logout(user.as_ref().map(|u| u.username.as_str()));
    Ok(ApiResponse::with_message((), "logged out"))
}

/// GET /api/users/me - the user record behind the presented token
pub async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<UserResponse> {
    let current = state.users.current_user(&user.username).await?;
    Ok(ApiResponse::success(current))
}

/// GET /api/users/check-auth - non-failing authentication probe
///
/// Any token problem (missing, malformed, expired, deleted subject) yields
/// `authenticated: false` with a reason in the envelope message, never an
/// error status.
pub async fn check_auth(State(state): State<AppState>, user: Option<AuthUser>) -> ApiResult<AuthStatus> {
    let (status, reason) = state
        .users
        .check_auth(user.as_ref().map(|u| u.username.as_str()))
        .await;
    Ok(ApiResponse::with_message(status, reason))
}

/// GET /api/users - list all users, newest first
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> ApiResult<Vec<UserResponse>> {
    Ok(ApiResponse::success(state.users.list().await))
}

/// GET /api/users/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<UserResponse> {
    Ok(ApiResponse::success(state.users.get(id).await?))
}

/// POST /api/users - create a user without issuing a token
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<UserUpsert>,
) -> ApiResult<UserResponse> {
    Ok(ApiResponse::created(state.users.create(req).await?))
}

/// PUT /api/users/:id - full replace of username and password
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UserUpsert>,
) -> ApiResult<UserResponse> {
    Ok(ApiResponse::success(state.users.update(id, req).await?))
}

/// DELETE /api/users/:id - cascades through topics, tasks, and todos
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<DeleteResult> {
    let deleted = state.users.delete(id).await;
    Ok(ApiResponse::success(DeleteResult { deleted }))
}
