//! End-to-end flows against the mock DummyJSON server.
//!
//! Starts `mock-server` on a random port and drives the sans-IO client and
//! the cache store over real HTTP, executing requests with ureq the way the
//! browser executes them with fetch.

use std::cell::RefCell;

use chrono::Utc;
use todo_core::{
    settle, ApiConfig, ApiError, CachePolicy, CreateTodo, HttpMethod, HttpRequest, HttpResponse,
    MutationKind, NotificationSink, QueryStatus, TodoClient, TodoStore, ToastLevel,
    TransportFailure, UpdateTodo,
};

#[derive(Default)]
struct RecordingSink {
    messages: RefCell<Vec<(ToastLevel, String)>>,
}

impl NotificationSink for RecordingSink {
    fn notify(&self, level: ToastLevel, message: String) {
        self.messages.borrow_mut().push((level, message));
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_body(builder: ureq::RequestBuilder<ureq::typestate::WithBody>, body: Option<String>) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

/// Execute an `HttpRequest` with ureq, returning 4xx/5xx as data.
fn execute(req: HttpRequest) -> Result<HttpResponse, TransportFailure> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match req.method {
        HttpMethod::Get => with_headers(agent.get(&req.url), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&req.url), &req.headers).call(),
        HttpMethod::Post => send_body(with_headers(agent.post(&req.url), &req.headers), req.body),
        HttpMethod::Put => send_body(with_headers(agent.put(&req.url), &req.headers), req.body),
        HttpMethod::Patch => send_body(with_headers(agent.patch(&req.url), &req.headers), req.body),
    };

    let mut response = result.map_err(|e| TransportFailure::NoResponse(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse::new(status, body))
}

/// Round-trip through the network, folding transport failures into `ApiError`.
fn round_trip(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Ok(execute(req)?)
}

fn start_server(state: mock_server::MockState) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::serve(listener, mock_server::app_with(state)).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn seeded() -> mock_server::MockState {
    mock_server::MockState {
        todos: mock_server::seed(),
        required_token: None,
    }
}

fn setup() -> (TodoClient, TodoStore<RecordingSink>) {
    let base = start_server(seeded());
    let client = TodoClient::new(ApiConfig::new(&base));
    let store = TodoStore::new(RecordingSink::default(), CachePolicy::default());
    (client, store)
}

fn load(client: &TodoClient, store: &mut TodoStore<RecordingSink>) {
    store.begin_fetch();
    let result = round_trip(client.build_list()).and_then(|r| client.parse_list(r));
    store.finish_fetch(result, Utc::now());
}

fn last_message(store: &TodoStore<RecordingSink>) -> Option<(ToastLevel, String)> {
    store.notifier().messages.borrow().last().cloned()
}

#[test]
fn list_populates_cache() {
    let (client, mut store) = setup();
    load(&client, &mut store);

    assert_eq!(store.query_status(), &QueryStatus::Success);
    let ids: Vec<u32> = store.todos().iter().map(|e| e.todo.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(!store.needs_fetch(Utc::now()));
}

#[test]
fn get_returns_single_todo() {
    let (client, _) = setup();
    let todo = round_trip(client.build_get(2))
        .and_then(|r| client.parse_get(r))
        .unwrap();
    assert_eq!(todo.todo, "Memorize a poem");

    let err = round_trip(client.build_get(404))
        .and_then(|r| client.parse_get(r))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn create_then_list_shows_new_todo_first() {
    let (client, mut store) = setup();
    load(&client, &mut store);

    store.begin_create().unwrap();
    let req = client.build_create(&CreateTodo::from_input("X")).unwrap();
    let result = round_trip(req).and_then(|r| client.parse_create(r));
    let key = store.finish_create(result).unwrap();

    let first = &store.todos()[0];
    assert_eq!(first.key, key);
    assert_eq!(first.todo.todo, "X");
    assert!(!first.todo.completed);
    assert_eq!(store.todos().len(), 6);
    assert_eq!(
        last_message(&store),
        Some((ToastLevel::Success, "Todo created successfully".to_string()))
    );
}

#[test]
fn blank_create_fails_locally() {
    let (client, _) = setup();
    let err = client.build_create(&CreateTodo::from_input("   ")).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn toggle_of_unpersisted_todo_flips_and_reports_404() {
    let (client, mut store) = setup();
    load(&client, &mut store);

    store.begin_create().unwrap();
    let req = client.build_create(&CreateTodo::from_input("Ghost")).unwrap();
    let key = store
        .finish_create(round_trip(req).and_then(|r| client.parse_create(r)))
        .unwrap();
    let id = store.get(&key).unwrap().todo.id;

    store.begin_mutation(&key, MutationKind::Toggle).unwrap();
    let req = client.build_toggle(id, true).unwrap();
    let result = round_trip(req).and_then(|r| client.parse_toggle(r));
    let err = store.finish_toggle(&key, true, result).unwrap_err();

    assert!(err.is_not_found());
    assert!(store.get(&key).unwrap().todo.completed);
    let (level, message) = last_message(&store).unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.contains("not found"), "{message}");
}

#[test]
fn toggle_existing_todo_round_trip() {
    let (client, mut store) = setup();
    load(&client, &mut store);
    let entry = store.todos()[0].clone();

    store.begin_mutation(&entry.key, MutationKind::Toggle).unwrap();
    let req = client.build_toggle(entry.todo.id, !entry.todo.completed).unwrap();
    let result = round_trip(req).and_then(|r| client.parse_toggle(r));
    store.finish_toggle(&entry.key, !entry.todo.completed, result).unwrap();

    let after = &store.todos()[0];
    assert_eq!(after.todo.completed, !entry.todo.completed);
    assert_eq!(after.todo.todo, entry.todo.todo);
    assert_eq!(
        last_message(&store),
        Some((ToastLevel::Success, "Todo marked as completed".to_string()))
    );
}

#[test]
fn update_existing_todo_round_trip() {
    let (client, mut store) = setup();
    load(&client, &mut store);
    let entry = store.todos()[3].clone();
    let patch = UpdateTodo::text("Watch two documentaries");

    store.begin_mutation(&entry.key, MutationKind::Update).unwrap();
    let req = client.build_update(entry.todo.id, &patch).unwrap();
    let result = round_trip(req).and_then(|r| client.parse_update(r));
    store.finish_update(&entry.key, &patch, result).unwrap();

    assert_eq!(store.todos()[3].todo.todo, "Watch two documentaries");
    assert_eq!(store.todos()[3].key, entry.key);
}

#[test]
fn delete_existing_todo_round_trip() {
    let (client, mut store) = setup();
    load(&client, &mut store);
    let target = store.todos()[1].clone();

    store.begin_mutation(&target.key, MutationKind::Delete).unwrap();
    let result = round_trip(client.build_delete(target.todo.id)).and_then(|r| client.parse_delete(r));
    store.finish_delete(&target.key, result).unwrap();

    let ids: Vec<u32> = store.todos().iter().map(|e| e.todo.id).collect();
    assert_eq!(ids, vec![1, 3, 4, 5]);
}

#[test]
fn bearer_token_is_sent_and_401_requires_login() {
    let base = start_server(mock_server::MockState {
        todos: mock_server::seed(),
        required_token: Some("secret".to_string()),
    });
    let client = TodoClient::new(ApiConfig::new(&base));

    let response = execute(client.build_list().with_bearer(None)).unwrap();
    assert!(response.requires_login());
    let err = client.parse_list(response).unwrap_err();
    assert_eq!(err.status(), 401);

    let response = execute(client.build_list().with_bearer(Some("secret"))).unwrap();
    assert_eq!(client.parse_list(response).unwrap().len(), 5);
}

#[test]
fn unreachable_server_is_a_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = TodoClient::new(ApiConfig::new(&format!("http://{addr}")));
    let mut store = TodoStore::new(RecordingSink::default(), CachePolicy::default());

    store.begin_fetch();
    let result = settle(execute(client.build_list())).and_then(|r| client.parse_list(r));
    store.finish_fetch(result, Utc::now());

    assert!(matches!(store.query_error(), Some(ApiError::Network { .. })));
    assert!(!store.is_initial_loading());
}
