use std::sync::Arc;

use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use todolist_api::config::{self, Environment};
use todolist_api::handlers::{tasks, todos, topics, users};
use todolist_api::middleware::auth::identity;
use todolist_api::services::AppState;
use todolist_api::store::Store;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up JWT_SECRET, TODO_API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting todolist API in {:?} mode", config.environment);
    if config.environment != Environment::Development && config.uses_placeholder_secret() {
        tracing::warn!("JWT_SECRET is still the development placeholder; configure a real secret");
    }

    let state = AppState::new(Arc::new(Store::new()));
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Todolist API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (token acquisition)
        .merge(public_auth_routes())
        // Everything else runs behind the identity middleware; handlers that
        // need a principal enforce it through the AuthUser extractor
        .merge(protected_routes().layer(axum::middleware::from_fn(identity)))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_auth_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(topic_routes())
        .merge(task_routes())
        .merge(todo_routes())
}

fn user_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        // Session-adjacent endpoints
        .route("/api/users/logout", post(users::logout))
        .route("/api/users/me", get(users::me))
        .route("/api/users/check-auth", get(users::check_auth))
        // User management
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/:id",
            get(users::get_by_id).put(users::update).delete(users::delete),
        )
}

fn topic_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/topics/user/:user_id",
            get(topics::list_by_user).post(topics::create_under_user),
        )
        .route(
            "/api/topics/:id",
            get(topics::get_by_id).put(topics::update).delete(topics::delete),
        )
}

fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tasks/topic/:topic_id",
            get(tasks::list_by_topic).post(tasks::create_under_topic),
        )
        .route(
            "/api/tasks/:id",
            get(tasks::get_by_id).put(tasks::update).delete(tasks::delete),
        )
}

fn todo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/todos/task/:task_id",
            get(todos::list_by_task).post(todos::create_under_task),
        )
        .route(
            "/api/todos/:id",
            get(todos::get_by_id).put(todos::update).delete(todos::delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Todolist API",
            "version": version,
            "description": "Multi-tenant to-do list backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/users/register, /api/users/login (public - token acquisition)",
                "session": "/api/users/logout, /api/users/me, /api/users/check-auth (protected)",
                "users": "/api/users[/:id] (protected)",
                "topics": "/api/topics/user/:user_id, /api/topics/:id (protected)",
                "tasks": "/api/tasks/topic/:topic_id, /api/tasks/:id (protected)",
                "todos": "/api/todos/task/:task_id, /api/todos/:id (protected)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::response::Json<Value> {
    let now = chrono::Utc::now();
    let (users, topics, tasks, todos) = state.store.counts().await;

    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now,
            "entities": {
                "users": users,
                "topics": topics,
                "tasks": tasks,
                "todos": todos,
            }
        }
    }))
}
