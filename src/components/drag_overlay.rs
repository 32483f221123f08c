//! Drag Overlay Component
//!
//! Copy of the dragged row that follows the pointer. Purely visual.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;
use todo_core::{CachedTodo, Todo};

/// Offset from the pointer so the overlay does not sit under the cursor
const POINTER_OFFSET_PX: i32 = 12;

#[component]
pub fn DragOverlay(items: ReadSignal<Vec<CachedTodo>>, dnd: DndSignals) -> impl IntoView {
    let dragged = Memo::new(move |_| -> Option<Todo> {
        let key = dnd.dragging_key_read.get()?;
        items.with(|list| list.iter().find(|e| e.key.as_str() == key).map(|e| e.todo.clone()))
    });

    let position = move || {
        let (x, y) = dnd.pointer_read.get();
        format!("left: {}px; top: {}px;", x + POINTER_OFFSET_PX, y + POINTER_OFFSET_PX)
    };

    move || {
        dragged.get().map(|todo| view! {
            <div class="drag-overlay" aria-hidden="true" style=position>
                <span class=if todo.completed { "todo-text done" } else { "todo-text" }>{todo.todo}</span>
            </div>
        })
    }
}
