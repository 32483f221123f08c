use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, seed, MockState, Todo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn empty(method: &str, uri: &str) -> Request<String> {
    Request::builder().method(method).uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_returns_envelope() {
    let resp = app().oneshot(empty("GET", "/todos")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = body_json(resp).await;
    let todos: Vec<Todo> = serde_json::from_value(body["todos"].clone()).unwrap();
    assert_eq!(todos, seed());
    assert_eq!(body["total"], seed().len());
    assert_eq!(body["skip"], 0);
}

// --- get ---

#[tokio::test]
async fn get_todo_by_id() {
    let resp = app().oneshot(empty("GET", "/todos/2")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.todo, "Memorize a poem");
}

#[tokio::test]
async fn get_missing_todo_returns_404_message() {
    let resp = app().oneshot(empty("GET", "/todos/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Todo with id '999' not found");
}

// --- add ---

#[tokio::test]
async fn add_todo_returns_201_with_next_id() {
    let resp = app()
        .oneshot(json_request("POST", "/todos/add", r#"{"todo":"Buy milk","completed":false,"userId":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, seed().len() as u32 + 1);
    assert_eq!(todo.todo, "Buy milk");
    assert!(!todo.completed);
}

#[tokio::test]
async fn add_todo_is_not_persisted() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/todos/add", r#"{"todo":"Ghost","userId":1}"#))
        .await
        .unwrap();
    let created: Todo = body_json(resp).await;

    let resp = app
        .oneshot(json_request("PATCH", &format!("/todos/{}", created.id), r#"{"completed":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_todo_requires_text_and_user() {
    let resp = app()
        .oneshot(json_request("POST", "/todos/add", r#"{"todo":"  ","userId":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app()
        .oneshot(json_request("POST", "/todos/add", r#"{"todo":"x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update / toggle ---

#[tokio::test]
async fn put_merges_partial_fields() {
    let resp = app()
        .oneshot(json_request("PUT", "/todos/1", r#"{"todo":"Renamed"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.todo, "Renamed");
    assert_eq!(todo.user_id, seed()[0].user_id);
}

#[tokio::test]
async fn patch_flips_completed() {
    let resp = app()
        .oneshot(json_request("PATCH", "/todos/1", r#"{"completed":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert!(todo.completed);
    assert_eq!(todo.todo, seed()[0].todo);
}

// --- delete ---

#[tokio::test]
async fn delete_returns_deleted_flag() {
    let resp = app().oneshot(empty("DELETE", "/todos/3")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["isDeleted"], true);
    assert_eq!(body["id"], 3);
}

#[tokio::test]
async fn delete_missing_returns_404() {
    let resp = app().oneshot(empty("DELETE", "/todos/77")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- auth ---

#[tokio::test]
async fn token_required_when_configured() {
    let app = app_with(MockState {
        todos: seed(),
        required_token: Some("secret".to_string()),
    });
    let resp = app.clone().oneshot(empty("GET", "/todos")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/todos")
        .header(http::header::AUTHORIZATION, "Bearer secret")
        .body(String::new())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
