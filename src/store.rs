//! UI State Store
//!
//! Toast queue held in a reactive store, plus the notification sink the
//! cache store reports through.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{NotificationSink, ToastLevel, ToastQueue};

/// UI-only state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Visible toasts, oldest first
    pub toasts: ToastQueue,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast and schedule its dismissal after its own duration
/// (`DEFAULT_TOAST_MS` when `duration_ms` is `None`)
pub fn store_push_toast(store: &UiStore, level: ToastLevel, message: String, duration_ms: Option<u32>) -> u32 {
    let (id, duration) = {
        let toasts_field = store.toasts();
        let mut toasts = toasts_field.write();
        let toast = toasts.push(level, message, duration_ms);
        (toast.id, toast.duration_ms)
    };

    let store = *store;
    Timeout::new(duration, move || store_dismiss_toast(&store, id)).forget();
    id
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &UiStore, id: u32) {
    store.toasts().write().dismiss(id);
}

/// Notification sink feeding the toast queue
#[derive(Clone, Copy)]
pub struct ToastSink {
    store: UiStore,
}

impl ToastSink {
    pub fn new(store: UiStore) -> Self {
        Self { store }
    }
}

impl NotificationSink for ToastSink {
    fn notify(&self, level: ToastLevel, message: String) {
        log::debug!("[TOAST] {}: {}", level, message);
        store_push_toast(&self.store, level, message, None);
    }
}
