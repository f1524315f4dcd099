pub mod task_service;
pub mod todo_service;
pub mod topic_service;
pub mod user_service;

pub use task_service::TaskService;
pub use todo_service::TodoService;
pub use topic_service::TopicService;
pub use user_service::UserService;

use std::sync::Arc;

use crate::store::Store;

/// Shared application state handed to every handler. Each service is a thin
/// clone-able facade over the same store.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub topics: TopicService,
    pub tasks: TaskService,
    pub todos: TodoService,
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            users: UserService::new(store.clone()),
            topics: TopicService::new(store.clone()),
            tasks: TaskService::new(store.clone()),
            todos: TodoService::new(store.clone()),
            store,
        }
    }
}
