use std::sync::Arc;

use crate::dto::{TaskDraft, TaskResponse};
use crate::models::TaskFields;
use crate::store::Store;

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),
    #[error("topic not found: {0}")]
    TopicNotFound(i64),
    #[error("task not found: {0}")]
    NotFound(i64),
}

/// CRUD over tasks, scoped by the owning topic.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<Store>,
}

impl TaskService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn list_by_topic(&self, topic_id: i64) -> Vec<TaskResponse> {
        self.store
            .tasks_by_topic(topic_id)
            .await
            .into_iter()
            .map(Into::into)
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<TaskResponse, TaskError> {
        self.store
            .task_by_id(id)
            .await
            .map(TaskResponse::from)
            .ok_or(TaskError::NotFound(id))
    }

    pub async fn create(&self, topic_id: i64, draft: TaskDraft) -> Result<TaskResponse, TaskError> {
        let fields = validate(draft)?;
        self.store
            .insert_task(topic_id, fields)
            .await
            .map(Into::into)
            .ok_or(TaskError::TopicNotFound(topic_id))
    }

    pub async fn update(&self, id: i64, draft: TaskDraft) -> Result<TaskResponse, TaskError> {
        let fields = validate(draft)?;
        self.store
            .update_task(id, fields)
            .await
            .map(Into::into)
            .ok_or(TaskError::NotFound(id))
    }

    /// Cascades through the task's todos.
    pub async fn delete(&self, id: i64) -> bool {
        self.store.delete_task(id).await
    }
}

fn validate(draft: TaskDraft) -> Result<TaskFields, TaskError> {
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(TaskError::Validation("task title must not be blank".into()));
    }
    Ok(TaskFields {
        title,
        description: draft.description,
        status: draft.status.filter(|s| !s.trim().is_empty()),
        priority: draft.priority.filter(|s| !s.trim().is_empty()),
        due_date: draft.due_date,
    })
}
