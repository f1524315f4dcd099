//! Request and response bodies for the HTTP surface.
//!
//! Entities never cross the wire directly: responses are mapped through the
//! types below, which is what keeps password material out of user payloads
//! and lets the todo response expose the legacy `completed` field as a pure
//! derivation of the stored flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Task, Todo, Topic, User};

// ---- requests ----

// Missing credential fields deserialize to "" and fall into the blank-field
// validation path, matching the envelope used for every other business error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body for POST /api/users and PUT /api/users/{id}.
#[derive(Debug, Deserialize)]
pub struct UserUpsert {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicDraft {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TodoDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_completed: Option<bool>,
    /// Legacy spelling, still accepted on input; reconciled with
    /// `is_completed` before anything is stored.
    pub completed: Option<bool>,
    pub progress: Option<i32>,
    pub note: Option<String>,
}

// ---- responses ----

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Payload of successful register/login responses.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: UserResponse,
    pub token: String,
    pub expires_in: i64,
}

/// Payload of GET /api/users/check-auth; never an error.
#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Topic> for TopicResponse {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            user_id: topic.user_id,
            name: topic.name,
            description: topic.description,
            created_at: topic.created_at,
            updated_at: topic.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            topic_id: task.topic_id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub task_id: i64,
    pub title: String,
    pub content: String,
    pub is_completed: bool,
    /// Mirror of `is_completed`, kept for older clients.
    pub completed: bool,
    pub progress: i32,
    pub note: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            task_id: todo.task_id,
            title: todo.title,
            content: todo.content,
            is_completed: todo.is_completed,
            completed: todo.is_completed,
            progress: todo.progress,
            note: todo.note,
            completed_at: todo.completed_at,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Payload of DELETE responses; `deleted` is false on repeat deletes.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub deleted: bool,
}
