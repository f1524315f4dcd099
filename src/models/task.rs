use chrono::{DateTime, Utc};

pub const DEFAULT_STATUS: &str = "not started";
pub const DEFAULT_PRIORITY: &str = "medium";

/// A unit of work under a topic. Status and priority are free text with
/// server-side defaults; owns todos.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: i64,
    /// Owner; immutable after creation.
    pub topic_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied task fields. Omitted status/priority fall back to the
/// defaults on both create and full-replace update.
#[derive(Debug, Clone, Default)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: i64, topic_id: i64, fields: TaskFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            topic_id,
            title: fields.title,
            description: fields.description,
            status: fields.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            priority: fields.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            due_date: fields.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, fields: TaskFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.description = fields.description;
        self.status = fields.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
        self.priority = fields.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string());
        self.due_date = fields.due_date;
        self.updated_at = now;
    }
}
