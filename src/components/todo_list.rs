//! Todo List Component
//!
//! Loading, error and empty states around the filters and the sortable
//! list. Owns the drag-and-drop signals and turns drops into reorders.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, KeyboardMove};
use todo_core::{move_by, move_onto, CachedTodo, TodoKey};

use crate::components::{LoadingSkeleton, SortableTodoList, TodoFilters};
use crate::context::{run_command, AppContext};

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let all = Memo::new(move |_| ctx.todos.with(|s| s.todos().to_vec()));
    let initial_loading = Memo::new(move |_| ctx.todos.with(|s| s.is_initial_loading()));
    let load_error = Memo::new(move |_| ctx.todos.with(|s| s.query_error().map(|e| e.to_string())));

    // Keep the cache while the list is on screen
    ctx.observe();
    on_cleanup(move || ctx.unobserve());

    // Filtered view, pushed up by TodoFilters
    let (visible, set_visible) = signal(Vec::<CachedTodo>::new());

    // Drops and keyboard moves both commit through here
    let commit = move |moved: Vec<CachedTodo>| ctx.reorder(moved.into_iter().map(|e| e.key).collect());

    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |dragged, over| {
        let current = visible.get_untracked();
        let (Some(dragged), Some(over)) = (find_key(&current, &dragged), find_key(&current, &over)) else {
            return;
        };
        if let Some(moved) = move_onto(&current, &dragged, &over) {
            log::debug!("[DND] moved {} onto {}", dragged, over);
            commit(moved);
        }
    });

    let on_move = Callback::new(move |(raw, step): (String, KeyboardMove)| {
        let current = visible.get_untracked();
        let Some(key) = find_key(&current, &raw) else {
            return;
        };
        if let Some(moved) = move_by(&current, &key, step.offset()) {
            log::debug!("[DND] moved {} {:?}", key, step);
            commit(moved);
        }
    });

    let empty_message = move || {
        if all.with(|list| list.is_empty()) {
            load_error.with(|e| e.is_none()).then_some("No todos yet. Add one above!")
        } else if visible.with(|list| list.is_empty()) {
            Some("No todos match your filters.")
        } else {
            None
        }
    };

    view! {
        <section class="todo-list">
            <Show when=move || !initial_loading.get() fallback=|| view! { <LoadingSkeleton /> }>
                {move || load_error.get().map(|msg| view! {
                    <div class="list-error" role="alert">
                        <p>"Failed to load todos: " {msg}</p>
                        <button type="button" on:click=move |_| run_command("retry", ctx.reload())>
                            "Retry"
                        </button>
                    </div>
                })}

                <TodoFilters todos=all on_filter={move |list: Vec<CachedTodo>| set_visible.set(list)} />

                {move || empty_message().map(|msg| view! { <p class="empty-state">{msg}</p> })}

                <SortableTodoList items=visible dnd=dnd on_move=on_move />
            </Show>
        </section>
    }
}

/// Key of the displayed entry whose raw key is `raw`
fn find_key(list: &[CachedTodo], raw: &str) -> Option<TodoKey> {
    list.iter().find(|e| e.key.as_str() == raw).map(|e| e.key.clone())
}
