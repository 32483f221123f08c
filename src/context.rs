//! Application Context
//!
//! Shared state provided via Leptos Context API: the todo cache, the API
//! client and the commands that connect them.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::{
    ApiError, CreateTodo, MutationConflict, MutationKind, TodoClient, TodoKey, TodoStore, UpdateTodo,
};

use crate::api;
use crate::store::ToastSink;

pub type Todos = TodoStore<ToastSink>;

/// Why a UI command did not complete
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Conflict(#[from] MutationConflict),
    #[error("todo {0} is no longer in the list")]
    Missing(TodoKey),
    #[error("application state was disposed")]
    Disposed,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Cached todos with their query and mutation state
    pub todos: RwSignal<Todos>,
    client: StoredValue<TodoClient>,
}

impl AppContext {
    pub fn new(todos: Todos, client: TodoClient) -> Self {
        Self {
            todos: RwSignal::new(todos),
            client: StoredValue::new(client),
        }
    }

    fn store<U>(&self, f: impl FnOnce(&mut Todos) -> U) -> Result<U, CommandError> {
        self.todos.try_update(f).ok_or(CommandError::Disposed)
    }

    fn client(&self) -> TodoClient {
        self.client.get_value()
    }

    // ========================
    // Queries
    // ========================

    /// Fetch the list and replace the cache
    pub async fn reload(self) -> Result<(), CommandError> {
        self.store(|s| s.begin_fetch())?;
        let client = self.client();
        let result = api::send(&client, client.build_list()).await.and_then(|r| client.parse_list(r));
        self.store(|s| s.finish_fetch(result, Utc::now()))?;
        Ok(())
    }

    /// Register a mounted view of the list; its data stays cached while shown.
    pub fn observe(&self) {
        self.todos.update(|s| s.observe());
    }

    pub fn unobserve(&self) {
        let _ = self.todos.try_update(|s| s.unobserve());
    }

    /// Refetch in the background when the cached list is stale.
    /// Unobserved data past the retention window is dropped first.
    pub fn refresh_if_stale(self) {
        let now = Utc::now();
        let due = self
            .todos
            .try_update(|s| {
                s.evict_expired(now);
                s.needs_fetch(now)
            })
            .unwrap_or(false);
        if due {
            log::debug!("[CTX] cache stale, refetching");
            spawn_local(async move {
                let _ = self.reload().await;
            });
        }
    }

    // ========================
    // Mutations
    // ========================

    pub async fn create(self, input: CreateTodo) -> Result<TodoKey, CommandError> {
        let client = self.client();
        let req = client.build_create(&input)?;
        self.store(|s| s.begin_create())??;

        let result = api::send(&client, req).await.and_then(|r| client.parse_create(r));
        Ok(self.store(|s| s.finish_create(result))??)
    }

    pub async fn update(self, key: TodoKey, patch: UpdateTodo) -> Result<(), CommandError> {
        let id = self.todo_id(&key)?;
        let client = self.client();
        let req = client.build_update(id, &patch)?;
        self.store(|s| s.begin_mutation(&key, MutationKind::Update))??;

        let result = api::send(&client, req).await.and_then(|r| client.parse_update(r));
        self.store(|s| s.finish_update(&key, &patch, result))??;
        Ok(())
    }

    /// Flip the completion state of `key`
    pub async fn toggle(self, key: TodoKey) -> Result<(), CommandError> {
        let (id, completed) = self
            .todos
            .with_untracked(|s| s.get(&key).map(|e| (e.todo.id, !e.todo.completed)))
            .ok_or_else(|| CommandError::Missing(key.clone()))?;
        let client = self.client();
        let req = client.build_toggle(id, completed)?;
        self.store(|s| s.begin_mutation(&key, MutationKind::Toggle))??;

        let result = api::send(&client, req).await.and_then(|r| client.parse_toggle(r));
        self.store(|s| s.finish_toggle(&key, completed, result))??;
        Ok(())
    }

    pub async fn delete(self, key: TodoKey) -> Result<(), CommandError> {
        let id = self.todo_id(&key)?;
        let client = self.client();
        self.store(|s| s.begin_mutation(&key, MutationKind::Delete))??;

        let result = api::send(&client, client.build_delete(id)).await.and_then(|r| client.parse_delete(r));
        self.store(|s| s.finish_delete(&key, result))??;
        Ok(())
    }

    /// Apply a new visible order coming from the sortable list
    pub fn reorder(&self, visible: Vec<TodoKey>) {
        self.todos.update(|s| s.apply_reorder(&visible));
    }

    fn todo_id(&self, key: &TodoKey) -> Result<u32, CommandError> {
        self.todos
            .with_untracked(|s| s.get(key).map(|e| e.todo.id))
            .ok_or_else(|| CommandError::Missing(key.clone()))
    }
}

/// Run a command in the background, logging failures.
/// Outcomes the user should see are already reported as toasts by the store.
pub fn run_command<F>(label: &'static str, fut: F)
where
    F: std::future::Future<Output = Result<(), CommandError>> + 'static,
{
    spawn_local(async move {
        if let Err(err) = fut.await {
            log::warn!("[CTX] {} failed: {}", label, err);
        }
    });
}
