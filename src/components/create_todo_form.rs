//! Create Todo Form Component
//!
//! Text input with inline validation. Blank input never reaches the network.

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::{ApiError, CreateTodo};

use crate::context::{AppContext, CommandError};

#[component]
pub fn CreateTodoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (new_text, set_new_text) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let pending = Memo::new(move |_| ctx.todos.with(|s| s.create_status().is_pending()));

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = CreateTodo::from_input(&new_text.get_untracked());
        if let Err(err) = input.validate() {
            set_error.set(Some(err.message));
            return;
        }
        set_error.set(None);

        spawn_local(async move {
            match ctx.create(input).await {
                Ok(_) => set_new_text.set(String::new()),
                Err(CommandError::Api(ApiError::Validation(err))) => set_error.set(Some(err.message)),
                // Server failures are already toasted by the store
                Err(err) => log::warn!("[FORM] create failed: {}", err),
            }
        });
    };

    view! {
        <form class="create-todo-form" on:submit=create_todo>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="What needs to be done?"
                    aria-label="New todo"
                    aria-invalid=move || if error.get().is_some() { "true" } else { "false" }
                    prop:value=move || new_text.get()
                    disabled=move || pending.get()
                    on:input=move |ev| {
                        set_new_text.set(event_target_value(&ev));
                        if error.get_untracked().is_some() {
                            set_error.set(None);
                        }
                    }
                />
                <button
                    type="submit"
                    disabled=move || pending.get() || new_text.with(|t| t.trim().is_empty())
                >
                    {move || if pending.get() { "Adding..." } else { "Add Todo" }}
                </button>
            </div>
            {move || error.get().map(|msg| view! {
                <p class="field-error" role="alert">{msg}</p>
            })}
        </form>
    }
}
