//! Mock DummyJSON todo API.
//!
//! Mirrors the public demo backend closely enough for end-to-end tests:
//! reads come from a fixed seed, writes echo a plausible result but are never
//! stored. A todo returned by `POST /todos/add` therefore answers 404 on any
//! later update, toggle or delete, just like the real service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub todo: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub user_id: u32,
}

#[derive(Deserialize)]
pub struct AddTodo {
    pub todo: Option<String>,
    pub completed: Option<bool>,
    #[serde(rename = "userId")]
    pub user_id: Option<u32>,
}

#[derive(Deserialize)]
pub struct PatchTodo {
    pub todo: Option<String>,
    pub completed: Option<bool>,
    #[serde(rename = "userId")]
    pub user_id: Option<u32>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub todos: Vec<Todo>,
    /// When set, every request must carry `Authorization: Bearer <token>`
    pub required_token: Option<String>,
}

type Shared = Arc<MockState>;

/// A handful of todos in the shape DummyJSON serves.
pub fn seed() -> Vec<Todo> {
    [
        (1, "Do something nice for someone you care about", false, 152),
        (2, "Memorize a poem", true, 13),
        (3, "Watch a classic movie", true, 68),
        (4, "Watch a documentary", false, 84),
        (5, "Invest in cryptocurrency", false, 163),
    ]
    .into_iter()
    .map(|(id, todo, completed, user_id)| Todo {
        id,
        todo: todo.to_string(),
        completed,
        user_id,
    })
    .collect()
}

pub fn app() -> Router {
    app_with(MockState {
        todos: seed(),
        required_token: None,
    })
}

pub fn app_with(state: MockState) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/add", post(add_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).patch(update_todo).delete(delete_todo),
        )
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        // The browser app is served from another origin during development
        .layer(CorsLayer::permissive())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("mock todo API listening on http://{}", addr);
    }
    axum::serve(listener, router).await
}

fn message(status: StatusCode, text: String) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn not_found(id: u32) -> Response {
    message(StatusCode::NOT_FOUND, format!("Todo with id '{}' not found", id))
}

fn check_auth(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(token) = &state.required_token else {
        return Ok(());
    };
    let expected = format!("Bearer {}", token);
    let provided = headers.get("authorization").and_then(|v| v.to_str().ok());
    if provided == Some(expected.as_str()) {
        Ok(())
    } else {
        tracing::warn!("rejected request with missing or wrong token");
        Err(message(StatusCode::UNAUTHORIZED, "Invalid/Expired Token!".to_string()))
    }
}

fn find(state: &MockState, id: u32) -> Option<&Todo> {
    state.todos.iter().find(|t| t.id == id)
}

async fn list_todos(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }
    let total = state.todos.len();
    Json(json!({
        "todos": state.todos,
        "total": total,
        "skip": 0,
        "limit": total,
    }))
    .into_response()
}

async fn get_todo(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<u32>) -> Response {
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }
    match find(&state, id) {
        Some(todo) => Json(todo.clone()).into_response(),
        None => not_found(id),
    }
}

async fn add_todo(State(state): State<Shared>, headers: HeaderMap, Json(input): Json<AddTodo>) -> Response {
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }
    let Some(text) = input.todo.filter(|t| !t.trim().is_empty()) else {
        return message(StatusCode::BAD_REQUEST, "Todo is required".to_string());
    };
    let Some(user_id) = input.user_id else {
        return message(StatusCode::BAD_REQUEST, "User id is required".to_string());
    };
    tracing::debug!(todo = %text, "add (not persisted)");
    // Not stored: the id is always one past the seed.
    let todo = Todo {
        id: state.todos.len() as u32 + 1,
        todo: text,
        completed: input.completed.unwrap_or(false),
        user_id,
    };
    (StatusCode::CREATED, Json(todo)).into_response()
}

async fn update_todo(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u32>,
    Json(input): Json<PatchTodo>,
) -> Response {
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }
    let Some(existing) = find(&state, id) else {
        tracing::debug!(id, "update of unknown todo");
        return not_found(id);
    };
    let todo = Todo {
        id,
        todo: input.todo.unwrap_or_else(|| existing.todo.clone()),
        completed: input.completed.unwrap_or(existing.completed),
        user_id: input.user_id.unwrap_or(existing.user_id),
    };
    Json(todo).into_response()
}

async fn delete_todo(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<u32>) -> Response {
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }
    match find(&state, id) {
        Some(todo) => Json(json!({
            "id": todo.id,
            "todo": todo.todo,
            "completed": todo.completed,
            "userId": todo.user_id,
            "isDeleted": true,
        }))
        .into_response(),
        None => not_found(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_serializes_user_id_in_camel_case() {
        let json = serde_json::to_value(&seed()[0]).unwrap();
        assert_eq!(json["userId"], 152);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let todos = seed();
        let mut ids: Vec<_> = todos.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), todos.len());
    }

    #[test]
    fn test_auth_check() {
        let state = MockState {
            todos: Vec::new(),
            required_token: Some("abc".to_string()),
        };
        let mut headers = HeaderMap::new();
        assert!(check_auth(&state, &headers).is_err());
        headers.insert("authorization", "Bearer abc".parse().unwrap());
        assert!(check_auth(&state, &headers).is_ok());
        assert!(check_auth(&MockState::default(), &HeaderMap::new()).is_ok());
    }
}
