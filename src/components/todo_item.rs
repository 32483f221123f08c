//! Todo Item Component
//!
//! One row of the sortable list: toggle, inline edit, delete with
//! confirmation. Controls are disabled while a mutation on the row is pending.
//! A focused row moves with Alt+ArrowUp / Alt+ArrowDown.

use leptos::html;
use leptos::prelude::*;
use leptos_dragdrop::{
    make_on_item_mouseenter, make_on_keydown, make_on_mousedown, make_on_mouseleave, DndSignals, KeyboardMove,
};
use todo_core::{CachedTodo, MutationKind, UpdateTodo};

use crate::components::DeleteConfirmModal;
use crate::context::{run_command, AppContext};

#[component]
pub fn TodoItem(entry: CachedTodo, dnd: DndSignals, on_move: Callback<(String, KeyboardMove)>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let key = entry.key;
    let raw_key = key.as_str().to_string();
    let text = entry.todo.todo;
    let completed = entry.todo.completed;

    let pending = {
        let key = key.clone();
        Memo::new(move |_| ctx.todos.with(|s| s.pending(&key)))
    };
    let busy = move || pending.get().is_some();
    let deleting = move || pending.get() == Some(MutationKind::Delete);

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(text.clone());
    let (edit_error, set_edit_error) = signal(None::<String>);
    let (confirming, set_confirming) = signal(false);
    let edit_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = edit_ref.get() {
            let _ = input.focus();
        }
    });

    // ========================
    // Handlers
    // ========================

    let toggle = {
        let key = key.clone();
        move || {
            // A drag ends with a click on the row; ignore it
            if dnd.drag_just_ended_read.get_untracked() || pending.get_untracked().is_some() {
                return;
            }
            run_command("toggle", ctx.toggle(key.clone()));
        }
    };

    let save = {
        let key = key.clone();
        let original = text.clone();
        move || {
            if !editing.get_untracked() {
                return;
            }
            let value = draft.get_untracked();
            if value.trim() == original {
                set_editing.set(false);
                return;
            }
            match UpdateTodo::text(&value).validate() {
                Ok(patch) => {
                    set_editing.set(false);
                    set_edit_error.set(None);
                    run_command("update", ctx.update(key.clone(), patch));
                }
                Err(err) => set_edit_error.set(Some(err.message)),
            }
        }
    };

    let cancel_edit = move || {
        set_editing.set(false);
        set_edit_error.set(None);
    };

    let row_class = {
        let raw_key = raw_key.clone();
        move || {
            let mut class = String::from("todo-item");
            if completed { class.push_str(" completed"); }
            if dnd.is_dragging(&raw_key) { class.push_str(" dragging"); }
            if dnd.is_over(&raw_key) { class.push_str(" drop-target"); }
            if busy() { class.push_str(" busy"); }
            class
        }
    };

    let on_confirm_delete = {
        let key = key.clone();
        move |_: ()| {
            set_confirming.set(false);
            run_command("delete", ctx.delete(key.clone()));
        }
    };

    let label_text = text.clone();
    let edit_text = text.clone();
    let edit_label = format!("Edit todo: {}", text);
    let delete_label = format!("Delete todo: {}", text);
    let modal_title = text.clone();

    view! {
        <li
            class=row_class
            tabindex="0"
            aria-label=format!("{} (Alt+Up/Down to reorder)", text)
            on:keydown=make_on_keydown(raw_key.clone(), move |key, step| on_move.run((key, step)))
            on:mousedown=make_on_mousedown(dnd, raw_key.clone())
            on:mouseenter=make_on_item_mouseenter(dnd, raw_key.clone())
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <button
                type="button"
                class=if completed { "toggle-btn checked" } else { "toggle-btn" }
                aria-label=if completed { "Mark as incomplete" } else { "Mark as complete" }
                disabled=busy
                on:click={
                    let toggle = toggle.clone();
                    move |_| toggle()
                }
            >
                {if completed { "✓" } else { "" }}
            </button>

            {move || {
                if editing.get() {
                    let save_on_key = save.clone();
                    let save_on_blur = save.clone();
                    view! {
                        <span class="edit-field">
                            <input
                                type="text"
                                class="edit-input"
                                aria-label="Edit todo"
                                node_ref=edit_ref
                                prop:value=move || draft.get()
                                on:input=move |ev| set_draft.set(event_target_value(&ev))
                                on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                    "Enter" => save_on_key(),
                                    "Escape" => cancel_edit(),
                                    _ => {}
                                }
                                on:blur=move |_| save_on_blur()
                            />
                            {move || edit_error.get().map(|msg| view! {
                                <span class="field-error" role="alert">{msg}</span>
                            })}
                        </span>
                    }.into_any()
                } else {
                    let on_click = toggle.clone();
                    let on_key = toggle.clone();
                    view! {
                        <span
                            class=if completed { "todo-text done" } else { "todo-text" }
                            role="button"
                            tabindex="0"
                            aria-label=format!("Toggle todo: {}", label_text)
                            on:click=move |_| on_click()
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" || ev.key() == " " {
                                    ev.prevent_default();
                                    on_key();
                                }
                            }
                        >
                            {label_text.clone()}
                        </span>
                    }.into_any()
                }
            }}

            <Show when=move || !editing.get()>
                <button
                    type="button"
                    class="edit-btn"
                    aria-label=edit_label.clone()
                    disabled=busy
                    on:click={
                        let original = edit_text.clone();
                        move |_| {
                            set_draft.set(original.clone());
                            set_editing.set(true);
                        }
                    }
                >
                    "Edit"
                </button>
            </Show>

            <button
                type="button"
                class="delete-btn"
                aria-label=delete_label
                disabled=busy
                on:click=move |_| set_confirming.set(true)
            >
                {move || if deleting() { "Deleting..." } else { "Delete" }}
            </button>

            <Show when=move || confirming.get()>
                <DeleteConfirmModal
                    todo_title=modal_title.clone()
                    on_confirm=on_confirm_delete.clone()
                    on_cancel=move |_: ()| set_confirming.set(false)
                />
            </Show>
        </li>
    }
}
