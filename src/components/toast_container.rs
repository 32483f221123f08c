//! Toast Container Component
//!
//! Renders the toast queue from the UI store. Toasts dismiss themselves
//! after their duration or on the close button.

use leptos::prelude::*;
use todo_core::Toast;

use crate::store::{store_dismiss_toast, use_ui_store, UiStateStoreFields};

#[component]
pub fn ToastContainer() -> impl IntoView {
    let store = use_ui_store();
    let toasts = move || store.toasts().read().toasts().to_vec();

    view! {
        <div class="toast-container" aria-live="polite">
            <For
                each=toasts
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("toast toast-{}", toast.level.as_str()) role="status">
                            <span class="toast-message">{toast.message}</span>
                            <button
                                class="toast-close"
                                aria-label="Dismiss notification"
                                on:click=move |_| store_dismiss_toast(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
