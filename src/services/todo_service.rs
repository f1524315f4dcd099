use std::sync::Arc;

use crate::dto::{TodoDraft, TodoResponse};
use crate::models::TodoFields;
use crate::store::Store;

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("{0}")]
    Validation(String),
    #[error("task not found: {0}")]
    TaskNotFound(i64),
    #[error("todo not found: {0}")]
    NotFound(i64),
}

/// CRUD over todos, scoped by the owning task. The title/content backfill,
/// completion-flag reconciliation, and progress trigger live on the model;
/// this layer contributes the parent check and the one validation rule.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<Store>,
}

impl TodoService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn list_by_task(&self, task_id: i64) -> Vec<TodoResponse> {
        self.store
            .todos_by_task(task_id)
            .await
            .into_iter()
            .map(Into::into)
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<TodoResponse, TodoError> {
        self.store
            .todo_by_id(id)
            .await
            .map(TodoResponse::from)
            .ok_or(TodoError::NotFound(id))
    }

    pub async fn create(&self, task_id: i64, draft: TodoDraft) -> Result<TodoResponse, TodoError> {
        let fields = validate(draft)?;
        self.store
            .insert_todo(task_id, fields)
            .await
            .map(Into::into)
            .ok_or(TodoError::TaskNotFound(task_id))
    }

    pub async fn update(&self, id: i64, draft: TodoDraft) -> Result<TodoResponse, TodoError> {
        let fields = validate(draft)?;
        self.store
            .update_todo(id, fields)
            .await
            .map(Into::into)
            .ok_or(TodoError::NotFound(id))
    }

    pub async fn delete(&self, id: i64) -> bool {
        self.store.delete_todo(id).await
    }
}

fn validate(draft: TodoDraft) -> Result<TodoFields, TodoError> {
    let fields = TodoFields {
        title: draft.title,
        content: draft.content,
        is_completed: draft.is_completed,
        completed: draft.completed,
        progress: draft.progress,
        note: draft.note,
    };
    if fields.is_blank() {
        return Err(TodoError::Validation("todo requires a title or content".into()));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskFields, TopicFields};

    async fn seeded() -> (TodoService, i64) {
        let store = Arc::new(Store::new());
        let user = store.insert_user("alice".into(), "hash".into()).await.unwrap();
        let topic = store
            .insert_topic(user.id, TopicFields { name: "home".into(), description: None })
            .await
            .unwrap();
        let task = store
            .insert_task(topic.id, TaskFields { title: "chores".into(), ..Default::default() })
            .await
            .unwrap();
        (TodoService::new(store), task.id)
    }

    fn titled(title: &str) -> TodoDraft {
        TodoDraft { title: Some(title.into()), ..Default::default() }
    }

    #[tokio::test]
    async fn create_under_missing_task_fails_without_write() {
        let (svc, _) = seeded().await;
        let err = svc.create(404, titled("dishes")).await.unwrap_err();
        assert!(matches!(err, TodoError::TaskNotFound(404)));
        let (_, _, _, todos) = svc.store.counts().await;
        assert_eq!(todos, 0);
    }

    #[tokio::test]
    async fn blank_draft_rejected() {
        let (svc, task_id) = seeded().await;
        let err = svc.create(task_id, TodoDraft::default()).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
    }

    #[tokio::test]
    async fn progress_100_completes_regardless_of_prior_state() {
        let (svc, task_id) = seeded().await;
        let todo = svc.create(task_id, titled("dishes")).await.unwrap();
        assert!(!todo.is_completed);

        let updated = svc
            .update(
                todo.id,
                TodoDraft {
                    title: Some("dishes".into()),
                    is_completed: Some(false),
                    progress: Some(100),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_completed);
        assert!(updated.completed);
        assert_eq!(updated.progress, 100);
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() {
        let (svc, task_id) = seeded().await;
        let todo = svc.create(task_id, titled("dishes")).await.unwrap();
        let updated = svc.update(todo.id, titled("dry dishes")).await.unwrap();
        assert_eq!(updated.created_at, todo.created_at);
        assert!(updated.updated_at >= todo.updated_at);
    }
}
