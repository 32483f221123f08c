//! Todo Board Frontend App
//!
//! Root component: owns the cache store, provides context and wires the
//! refetch-on-focus behaviour.

use leptos::ev;
use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{ApiConfig, CachePolicy, TodoClient, TodoStore};

use crate::components::{CreateTodoForm, ToastContainer, TodoList};
use crate::context::{run_command, AppContext};
use crate::store::{ToastSink, UiState, UiStore};

#[component]
pub fn App() -> impl IntoView {
    let ui: UiStore = Store::new(UiState::default());
    provide_context(ui);

    let config = ApiConfig::from_build_env();
    log::info!("[APP] using API at {}", config.base_url);
    let todos = TodoStore::new(ToastSink::new(ui), CachePolicy::default());
    let ctx = AppContext::new(todos, TodoClient::new(config));
    provide_context(ctx);

    // Initial load
    run_command("initial load", ctx.reload());

    // Coming back to the tab refreshes stale data
    let handle = window_event_listener(ev::focus, move |_| ctx.refresh_if_stale());
    on_cleanup(move || handle.remove());

    view! {
        <div class="app-layout">
            <main class="main-content">
                <h1>"Todo Board"</h1>
                <CreateTodoForm />
                <TodoList />
            </main>
            <ToastContainer />
        </div>
    }
}
