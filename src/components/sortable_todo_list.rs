//! Sortable Todo List Component
//!
//! Renders the filtered view in display order. Drag state lives in the
//! parent; each row wires its own mouse and keyboard handlers.

use leptos::prelude::*;
use leptos_dragdrop::{DndSignals, KeyboardMove};
use todo_core::CachedTodo;

use crate::components::{DragOverlay, TodoItem};

#[component]
pub fn SortableTodoList(
    items: ReadSignal<Vec<CachedTodo>>,
    dnd: DndSignals,
    /// Alt+arrow reorder request for a row
    on_move: Callback<(String, KeyboardMove)>,
) -> impl IntoView {
    let dragging = move || dnd.dragging_key_read.with(|k| k.is_some());

    view! {
        <ul class=move || if dragging() { "sortable-list is-dragging" } else { "sortable-list" }>
            <For
                each=move || items.get()
                // Re-render a row whenever its visible fields change
                key=|entry| (entry.key.clone(), entry.todo.todo.clone(), entry.todo.completed)
                children=move |entry| view! { <TodoItem entry=entry dnd=dnd on_move=on_move /> }
            />
        </ul>
        <DragOverlay items=items dnd=dnd />
    }
}
