use chrono::{DateTime, Utc};

/// A concrete step under a task.
///
/// Historically the wire format carried two completion booleans
/// (`is_completed` and a legacy `completed`); only one flag is stored here
/// and the legacy name is derived at the DTO boundary, so the two can never
/// disagree after a write.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: i64,
    /// Owner; immutable after creation.
    pub task_id: i64,
    pub title: String,
    pub content: String,
    pub is_completed: bool,
    /// 0-100. Reaching 100 forces `is_completed` within the same write.
    pub progress: i32,
    pub note: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied todo fields. At least one of `title`/`content` must be
/// non-blank (validated by the service); each backfills the other when
/// missing. Both completion spellings are accepted on input and reconciled,
/// `is_completed` winning when the two are sent together.
#[derive(Debug, Clone, Default)]
pub struct TodoFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_completed: Option<bool>,
    pub completed: Option<bool>,
    pub progress: Option<i32>,
    pub note: Option<String>,
}

impl TodoFields {
    /// True when neither title nor content carries text.
    pub fn is_blank(&self) -> bool {
        fn blank(v: &Option<String>) -> bool {
            v.as_deref().map_or(true, |s| s.trim().is_empty())
        }
        blank(&self.title) && blank(&self.content)
    }

    fn completion_flag(&self) -> bool {
        self.is_completed.or(self.completed).unwrap_or(false)
    }

    /// Resolve title/content backfill. Assumes `!self.is_blank()`.
    fn resolve_text(&self) -> (String, String) {
        let title = self.title.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let content = self.content.as_deref().map(str::trim).filter(|s| !s.is_empty());
        match (title, content) {
            (Some(t), Some(c)) => (t.to_string(), c.to_string()),
            (Some(t), None) => (t.to_string(), t.to_string()),
            (None, Some(c)) => (c.to_string(), c.to_string()),
            (None, None) => (String::new(), String::new()),
        }
    }

    /// Clamp progress into [0,100] and apply the completion trigger: 100%
    /// forces the flag true regardless of what the caller sent.
    fn resolve_completion(&self) -> (bool, i32) {
        let progress = self.progress.unwrap_or(0).clamp(0, 100);
        let flag = self.completion_flag() || progress >= 100;
        (flag, progress)
    }
}

impl Todo {
    pub fn new(id: i64, task_id: i64, fields: TodoFields, now: DateTime<Utc>) -> Self {
        let (title, content) = fields.resolve_text();
        let (is_completed, progress) = fields.resolve_completion();
        Self {
            id,
            task_id,
            title,
            content,
            is_completed,
            progress,
            note: fields.note,
            completed_at: is_completed.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the mutable fields. `completed_at` is stamped when the
    /// completion flag transitions false -> true and cleared on the reverse
    /// transition; an unchanged flag keeps the original timestamp.
    pub fn apply(&mut self, fields: TodoFields, now: DateTime<Utc>) {
        let (title, content) = fields.resolve_text();
        let (is_completed, progress) = fields.resolve_completion();

        if is_completed && !self.is_completed {
            self.completed_at = Some(now);
        } else if !is_completed && self.is_completed {
            self.completed_at = None;
        }

        self.title = title;
        self.content = content;
        self.is_completed = is_completed;
        self.progress = progress;
        self.note = fields.note;
        self.updated_at = now;
    }
}
