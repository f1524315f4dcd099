use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Task, TaskFields, Todo, TodoFields, Topic, TopicFields, User};

/// Conflicts surfaced by [`Store::update_user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserUpdateConflict {
    NotFound,
    DuplicateUsername,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    topics: BTreeMap<i64, Topic>,
    tasks: BTreeMap<i64, Task>,
    todos: BTreeMap<i64, Todo>,
    user_seq: i64,
    topic_seq: i64,
    task_seq: i64,
    todo_seq: i64,
}

impl Tables {
    fn delete_task_tree(&mut self, task_id: i64) {
        self.todos.retain(|_, todo| todo.task_id != task_id);
        self.tasks.remove(&task_id);
    }

    fn delete_topic_tree(&mut self, topic_id: i64) {
        let task_ids: Vec<i64> = self
            .tasks
            .values()
            .filter(|t| t.topic_id == topic_id)
            .map(|t| t.id)
            .collect();
        for task_id in task_ids {
            self.delete_task_tree(task_id);
        }
        self.topics.remove(&topic_id);
    }
}

/// Durable key-indexed store for the four entity tables.
///
/// Stands in for the external persistence engine: uniqueness and
/// parent-existence constraints, id assignment, and cascade deletes all
/// execute inside a single write-lock acquisition, so every mutation is one
/// atomic unit from the caller's point of view.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

/// Listing order is newest-first: created_at descending, id descending as the
/// tie-break for same-instant rows.
fn sort_newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, i64)) {
    items.sort_by_key(|item| {
        let (created_at, id) = key(item);
        (std::cmp::Reverse(created_at), std::cmp::Reverse(id))
    });
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row counts per table, for the health endpoint.
    pub async fn counts(&self) -> (usize, usize, usize, usize) {
        let t = self.tables.read().await;
        (t.users.len(), t.topics.len(), t.tasks.len(), t.todos.len())
    }

    // ---- users ----

    /// Insert a new user; `None` when the username is already taken.
    pub async fn insert_user(&self, username: String, password_hash: String) -> Option<User> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.username == username) {
            return None;
        }
        t.user_seq += 1;
        let user = User::new(t.user_seq, username, password_hash, Utc::now());
        t.users.insert(user.id, user.clone());
        Some(user)
    }

    pub async fn user_by_id(&self, id: i64) -> Option<User> {
        self.tables.read().await.users.get(&id).cloned()
    }

    pub async fn user_by_username(&self, username: &str) -> Option<User> {
        let t = self.tables.read().await;
        t.users.values().find(|u| u.username == username).cloned()
    }

    pub async fn list_users(&self) -> Vec<User> {
        let t = self.tables.read().await;
        let mut users: Vec<User> = t.users.values().cloned().collect();
        sort_newest_first(&mut users, |u| (u.created_at, u.id));
        users
    }

    /// Full-replace update; rejects renames onto an existing username.
    pub async fn update_user(
        &self,
        id: i64,
        username: String,
        password_hash: String,
    ) -> Result<User, UserUpdateConflict> {
        let mut t = self.tables.write().await;
        let duplicate = t.users.values().any(|u| u.id != id && u.username == username);
        match t.users.get_mut(&id) {
            None => Err(UserUpdateConflict::NotFound),
            Some(_) if duplicate => Err(UserUpdateConflict::DuplicateUsername),
            Some(user) => {
                user.apply(username, password_hash, Utc::now());
                Ok(user.clone())
            }
        }
    }

    /// Delete a user and every topic, task, and todo it transitively owns.
    pub async fn delete_user(&self, id: i64) -> bool {
        let mut t = self.tables.write().await;
        if t.users.remove(&id).is_none() {
            return false;
        }
        let topic_ids: Vec<i64> = t
            .topics
            .values()
            .filter(|topic| topic.user_id == id)
            .map(|topic| topic.id)
            .collect();
        for topic_id in topic_ids {
            t.delete_topic_tree(topic_id);
        }
        true
    }

    // ---- topics ----

    /// Insert under an existing user; `None` (and no write) when the user is
    /// absent.
    pub async fn insert_topic(&self, user_id: i64, fields: TopicFields) -> Option<Topic> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&user_id) {
            return None;
        }
        t.topic_seq += 1;
        let topic = Topic::new(t.topic_seq, user_id, fields, Utc::now());
        t.topics.insert(topic.id, topic.clone());
        Some(topic)
    }

    pub async fn topic_by_id(&self, id: i64) -> Option<Topic> {
        self.tables.read().await.topics.get(&id).cloned()
    }

    pub async fn topics_by_user(&self, user_id: i64) -> Vec<Topic> {
        let t = self.tables.read().await;
        let mut topics: Vec<Topic> = t
            .topics
            .values()
            .filter(|topic| topic.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut topics, |topic| (topic.created_at, topic.id));
        topics
    }

    pub async fn update_topic(&self, id: i64, fields: TopicFields) -> Option<Topic> {
        let mut t = self.tables.write().await;
        let topic = t.topics.get_mut(&id)?;
        topic.apply(fields, Utc::now());
        Some(topic.clone())
    }

    pub async fn delete_topic(&self, id: i64) -> bool {
        let mut t = self.tables.write().await;
        if !t.topics.contains_key(&id) {
            return false;
        }
        t.delete_topic_tree(id);
        true
    }

    // ---- tasks ----

    pub async fn insert_task(&self, topic_id: i64, fields: TaskFields) -> Option<Task> {
        let mut t = self.tables.write().await;
        if !t.topics.contains_key(&topic_id) {
            return None;
        }
        t.task_seq += 1;
        let task = Task::new(t.task_seq, topic_id, fields, Utc::now());
        t.tasks.insert(task.id, task.clone());
        Some(task)
    }

    pub async fn task_by_id(&self, id: i64) -> Option<Task> {
        self.tables.read().await.tasks.get(&id).cloned()
    }

    pub async fn tasks_by_topic(&self, topic_id: i64) -> Vec<Task> {
        let t = self.tables.read().await;
        let mut tasks: Vec<Task> = t
            .tasks
            .values()
            .filter(|task| task.topic_id == topic_id)
            .cloned()
            .collect();
        sort_newest_first(&mut tasks, |task| (task.created_at, task.id));
        tasks
    }

    pub async fn update_task(&self, id: i64, fields: TaskFields) -> Option<Task> {
        let mut t = self.tables.write().await;
        let task = t.tasks.get_mut(&id)?;
        task.apply(fields, Utc::now());
        Some(task.clone())
    }

    pub async fn delete_task(&self, id: i64) -> bool {
        let mut t = self.tables.write().await;
        if !t.tasks.contains_key(&id) {
            return false;
        }
        t.delete_task_tree(id);
        true
    }

    // ---- todos ----

    pub async fn insert_todo(&self, task_id: i64, fields: TodoFields) -> Option<Todo> {
        let mut t = self.tables.write().await;
        if !t.tasks.contains_key(&task_id) {
            return None;
        }
        t.todo_seq += 1;
        let todo = Todo::new(t.todo_seq, task_id, fields, Utc::now());
        t.todos.insert(todo.id, todo.clone());
        Some(todo)
    }

    pub async fn todo_by_id(&self, id: i64) -> Option<Todo> {
        self.tables.read().await.todos.get(&id).cloned()
    }

    pub async fn todos_by_task(&self, task_id: i64) -> Vec<Todo> {
        let t = self.tables.read().await;
        let mut todos: Vec<Todo> = t
            .todos
            .values()
            .filter(|todo| todo.task_id == task_id)
            .cloned()
            .collect();
        sort_newest_first(&mut todos, |todo| (todo.created_at, todo.id));
        todos
    }

    pub async fn update_todo(&self, id: i64, fields: TodoFields) -> Option<Todo> {
        let mut t = self.tables.write().await;
        let todo = t.todos.get_mut(&id)?;
        todo.apply(fields, Utc::now());
        Some(todo.clone())
    }

    pub async fn delete_todo(&self, id: i64) -> bool {
        self.tables.write().await.todos.remove(&id).is_some()
    }
}
