//! Todo Cache Store
//!
//! Holds the fetched todo list and applies mutation outcomes to it. The
//! store is a plain object owned by the root component; network calls happen
//! outside and their results are fed to the `finish_*` handlers in the order
//! the responses arrive.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::CachePolicy;
use crate::error::{ApiError, MutationConflict};
use crate::reorder::reconcile;
use crate::schema::{CachedTodo, Todo, TodoKey, UpdateTodo};
use crate::toast::NotificationSink;

/// Lifecycle of the list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(ApiError),
}

/// Lifecycle of a single mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error(ApiError),
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Toggle,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Toggle => "toggle",
            MutationKind::Delete => "delete",
        })
    }
}

pub struct TodoStore<N> {
    entries: Vec<CachedTodo>,
    query: QueryStatus,
    fetched_at: Option<DateTime<Utc>>,
    invalidated: bool,
    policy: CachePolicy,
    create: MutationStatus,
    /// Keys with an update/toggle/delete in flight
    pending: HashMap<TodoKey, MutationKind>,
    /// Mounted views currently showing the list
    observers: usize,
    notifier: N,
}

impl<N: NotificationSink> TodoStore<N> {
    pub fn new(notifier: N, policy: CachePolicy) -> Self {
        Self {
            entries: Vec::new(),
            query: QueryStatus::Idle,
            fetched_at: None,
            invalidated: false,
            policy,
            create: MutationStatus::Idle,
            pending: HashMap::new(),
            observers: 0,
            notifier,
        }
    }

    // ========================
    // Reads
    // ========================

    pub fn todos(&self) -> &[CachedTodo] {
        &self.entries
    }

    pub fn get(&self, key: &TodoKey) -> Option<&CachedTodo> {
        self.entries.iter().find(|e| &e.key == key)
    }

    pub fn query_status(&self) -> &QueryStatus {
        &self.query
    }

    pub fn query_error(&self) -> Option<&ApiError> {
        match &self.query {
            QueryStatus::Error(err) => Some(err),
            _ => None,
        }
    }

    /// First load with nothing to show yet
    pub fn is_initial_loading(&self) -> bool {
        self.query == QueryStatus::Loading && self.entries.is_empty()
    }

    pub fn create_status(&self) -> &MutationStatus {
        &self.create
    }

    pub fn pending(&self, key: &TodoKey) -> Option<MutationKind> {
        self.pending.get(key).copied()
    }

    pub fn is_pending(&self, key: &TodoKey, kind: MutationKind) -> bool {
        self.pending(key) == Some(kind)
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_observed(&self) -> bool {
        self.observers > 0
    }

    /// A view started showing the list; observed data is never evicted.
    pub fn observe(&mut self) {
        self.observers += 1;
    }

    pub fn unobserve(&mut self) {
        self.observers = self.observers.saturating_sub(1);
    }

    // ========================
    // List query
    // ========================

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.fetched_at {
            Some(at) => self.invalidated || now.signed_duration_since(at) >= self.policy.stale_time,
            None => true,
        }
    }

    /// Whether the list should be (re)fetched now. Never while a fetch is running.
    pub fn needs_fetch(&self, now: DateTime<Utc>) -> bool {
        match self.query {
            QueryStatus::Loading => false,
            QueryStatus::Idle | QueryStatus::Error(_) => true,
            QueryStatus::Success => self.is_stale(now),
        }
    }

    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn begin_fetch(&mut self) {
        log::debug!("[STORE] fetching todos");
        self.query = QueryStatus::Loading;
    }

    /// Replace the cached list with a fresh server list.
    ///
    /// Client-only order and synthetic entries are discarded. On failure the
    /// cached entries are kept and the error is recorded.
    pub fn finish_fetch(&mut self, result: Result<Vec<Todo>, ApiError>, now: DateTime<Utc>) {
        match result {
            Ok(todos) => {
                log::info!("[STORE] loaded {} todos", todos.len());
                self.entries = todos.into_iter().map(CachedTodo::fetched).collect();
                self.fetched_at = Some(now);
                self.invalidated = false;
                self.query = QueryStatus::Success;
            }
            Err(err) => {
                log::warn!("[STORE] fetch failed: {}", err);
                self.query = QueryStatus::Error(err);
            }
        }
    }

    /// Drop data older than the retention window when no view shows it and
    /// nothing is in flight.
    pub fn evict_expired(&mut self, now: DateTime<Utc>) -> bool {
        let Some(at) = self.fetched_at else {
            return false;
        };
        let busy = self.is_observed()
            || self.create.is_pending()
            || !self.pending.is_empty()
            || self.query == QueryStatus::Loading;
        if busy || now.signed_duration_since(at) < self.policy.gc_time {
            return false;
        }
        log::debug!("[STORE] evicting {} cached todos", self.entries.len());
        self.entries.clear();
        self.fetched_at = None;
        self.invalidated = false;
        self.query = QueryStatus::Idle;
        true
    }

    // ========================
    // Mutations
    // ========================

    pub fn begin_create(&mut self) -> Result<(), MutationConflict> {
        if self.create.is_pending() {
            log::warn!("[STORE] create already in flight");
            return Err(MutationConflict::CreateInFlight);
        }
        self.create = MutationStatus::Pending;
        Ok(())
    }

    /// Prepend the created todo under a fresh client-local key.
    pub fn finish_create(&mut self, result: Result<Todo, ApiError>) -> Result<TodoKey, ApiError> {
        match result {
            Ok(todo) => {
                let key = self.unique_key(todo.id);
                log::info!("[STORE] created todo {} as {}", todo.id, key);
                self.entries.insert(0, CachedTodo { key: key.clone(), todo });
                self.create = MutationStatus::Success;
                self.notifier.success("Todo created successfully".to_string());
                Ok(key)
            }
            Err(err) => {
                log::warn!("[STORE] create failed: {}", err);
                self.create = MutationStatus::Error(err.clone());
                self.notifier.error(format!("Failed to create todo: {}", err));
                Err(err)
            }
        }
    }

    /// Mark `key` busy. Refused while another mutation on the same key is pending.
    pub fn begin_mutation(&mut self, key: &TodoKey, kind: MutationKind) -> Result<(), MutationConflict> {
        if let Some(current) = self.pending(key) {
            log::warn!("[STORE] {} refused for {}: {} in flight", kind, key, current);
            return Err(MutationConflict::KeyInFlight {
                key: key.clone(),
                kind: current,
            });
        }
        self.pending.insert(key.clone(), kind);
        Ok(())
    }

    pub fn finish_update(
        &mut self,
        key: &TodoKey,
        patch: &UpdateTodo,
        result: Result<Todo, ApiError>,
    ) -> Result<(), ApiError> {
        self.pending.remove(key);
        match result {
            Ok(todo) => {
                self.replace(key, todo);
                self.notifier.success("Todo updated successfully".to_string());
                Ok(())
            }
            Err(err) => {
                if err.is_not_found() {
                    self.patch_local(key, patch);
                }
                self.notifier.error(format!("Failed to update todo: {}", err));
                Err(err)
            }
        }
    }

    pub fn finish_toggle(
        &mut self,
        key: &TodoKey,
        completed: bool,
        result: Result<Todo, ApiError>,
    ) -> Result<(), ApiError> {
        self.pending.remove(key);
        match result {
            Ok(todo) => {
                let state = if todo.completed { "completed" } else { "incomplete" };
                self.replace(key, todo);
                self.notifier.success(format!("Todo marked as {}", state));
                Ok(())
            }
            Err(err) => {
                if err.is_not_found() {
                    let patch = UpdateTodo {
                        completed: Some(completed),
                        ..UpdateTodo::default()
                    };
                    self.patch_local(key, &patch);
                }
                self.notifier.error(format!("Failed to update todo status: {}", err));
                Err(err)
            }
        }
    }

    pub fn finish_delete(&mut self, key: &TodoKey, result: Result<(), ApiError>) -> Result<(), ApiError> {
        self.pending.remove(key);
        match result {
            Ok(()) => {
                self.remove(key);
                self.notifier.success("Todo deleted successfully".to_string());
                Ok(())
            }
            Err(err) => {
                if err.is_not_found() {
                    self.remove(key);
                }
                self.notifier.error(format!("Failed to delete todo: {}", err));
                Err(err)
            }
        }
    }

    // ========================
    // Reorder
    // ========================

    /// Adopt a new relative order for the displayed keys; client-only.
    pub fn apply_reorder(&mut self, visible: &[TodoKey]) {
        log::debug!("[STORE] reorder {} visible todos", visible.len());
        self.entries = reconcile(&self.entries, visible);
    }

    // ========================
    // Helpers
    // ========================

    fn replace(&mut self, key: &TodoKey, todo: Todo) {
        match self.entries.iter_mut().find(|e| &e.key == key) {
            Some(entry) => entry.todo = todo,
            None => log::debug!("[STORE] {} no longer cached", key),
        }
    }

    fn patch_local(&mut self, key: &TodoKey, patch: &UpdateTodo) {
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.key == key) {
            log::info!("[STORE] {} not found on server, applying locally", key);
            entry.todo = patch.apply_to(&entry.todo);
        }
    }

    fn remove(&mut self, key: &TodoKey) {
        if let Some(index) = self.entries.iter().position(|e| &e.key == key) {
            self.entries.remove(index);
        }
    }

    fn unique_key(&self, id: u32) -> TodoKey {
        loop {
            let suffix = Uuid::new_v4().simple().to_string();
            let key = TodoKey::synthetic(id, &suffix[..8]);
            if self.get(&key).is_none() {
                return key;
            }
        }
    }
}
