use std::sync::Arc;

use crate::dto::{TopicDraft, TopicResponse};
use crate::models::TopicFields;
use crate::store::Store;

#[derive(Debug, thiserror::Error)]
pub enum TopicError {
    #[error("{0}")]
    Validation(String),
    #[error("user not found: {0}")]
    UserNotFound(i64),
    #[error("topic not found: {0}")]
    NotFound(i64),
}

/// CRUD over topics, scoped by the owning user.
#[derive(Clone)]
pub struct TopicService {
    store: Arc<Store>,
}

impl TopicService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Newest-first listing; an unknown user simply has no topics.
    pub async fn list_by_user(&self, user_id: i64) -> Vec<TopicResponse> {
        self.store
            .topics_by_user(user_id)
            .await
            .into_iter()
            .map(Into::into)
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<TopicResponse, TopicError> {
        self.store
            .topic_by_id(id)
            .await
            .map(TopicResponse::from)
            .ok_or(TopicError::NotFound(id))
    }

    /// Parent existence is checked atomically with the insert: a missing user
    /// means no write happened.
    pub async fn create(&self, user_id: i64, draft: TopicDraft) -> Result<TopicResponse, TopicError> {
        let fields = validate(draft)?;
        self.store
            .insert_topic(user_id, fields)
            .await
            .map(Into::into)
            .ok_or(TopicError::UserNotFound(user_id))
    }

    pub async fn update(&self, id: i64, draft: TopicDraft) -> Result<TopicResponse, TopicError> {
        let fields = validate(draft)?;
        self.store
            .update_topic(id, fields)
            .await
            .map(Into::into)
            .ok_or(TopicError::NotFound(id))
    }

    /// Cascades through the topic's tasks and their todos.
    pub async fn delete(&self, id: i64) -> bool {
        self.store.delete_topic(id).await
    }
}

fn validate(draft: TopicDraft) -> Result<TopicFields, TopicError> {
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(TopicError::Validation("topic name must not be blank".into()));
    }
    Ok(TopicFields { name, description: draft.description })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> (TopicService, i64) {
        let store = Arc::new(Store::new());
        let user = store.insert_user("alice".into(), "hash".into()).await.unwrap();
        (TopicService::new(store), user.id)
    }

    #[tokio::test]
    async fn create_requires_existing_user() {
        let (svc, _) = seeded().await;
        let err = svc
            .create(999, TopicDraft { name: "home".into(), description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, TopicError::UserNotFound(999)));
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let (svc, user_id) = seeded().await;
        let err = svc
            .create(user_id, TopicDraft { name: "   ".into(), description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, TopicError::Validation(_)));
    }

    #[tokio::test]
    async fn update_is_checked_not_upsert() {
        let (svc, _) = seeded().await;
        let err = svc
            .update(7, TopicDraft { name: "home".into(), description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, TopicError::NotFound(7)));
    }

    #[tokio::test]
    async fn delete_is_idempotent_false() {
        let (svc, user_id) = seeded().await;
        let topic = svc
            .create(user_id, TopicDraft { name: "home".into(), description: None })
            .await
            .unwrap();
        assert!(svc.delete(topic.id).await);
        assert!(!svc.delete(topic.id).await);
    }
}
