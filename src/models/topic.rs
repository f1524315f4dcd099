use chrono::{DateTime, Utc};

/// Top-level grouping under a user. Owns tasks; deleting a topic cascades
/// through its tasks and their todos.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: i64,
    /// Owner; immutable after creation.
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied topic fields, applied on create and full-replace update.
#[derive(Debug, Clone)]
pub struct TopicFields {
    pub name: String,
    pub description: Option<String>,
}

impl Topic {
    pub fn new(id: i64, user_id: i64, fields: TopicFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            name: fields.name,
            description: fields.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, fields: TopicFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.updated_at = now;
    }
}
