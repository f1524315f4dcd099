use chrono::{DateTime, Utc};

/// Account that owns the topic/task/todo tree. The password is stored only
/// as an argon2 PHC string and never leaves the service layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, username: String, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the mutable fields; `updated_at` is refreshed.
    pub fn apply(&mut self, username: String, password_hash: String, now: DateTime<Utc>) {
        self.username = username;
        self.password_hash = password_hash;
        self.updated_at = now;
    }
}
