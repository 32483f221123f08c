//! Delete Confirm Modal Component
//!
//! Confirmation dialog shown before a todo is deleted.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;

/// Modal delete confirmation
///
/// Mount it only while it should be visible. Escape and backdrop clicks
/// cancel; the confirm button takes focus on open.
///
/// # Arguments
/// * `todo_title` - Text of the todo being deleted
/// * `on_confirm` - Callback to execute when user confirms deletion
/// * `on_cancel` - Callback to close the dialog without deleting
#[component]
pub fn DeleteConfirmModal(
    #[prop(into)] todo_title: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_ref = NodeRef::<html::Button>::new();

    Effect::new(move |_| {
        if let Some(button) = confirm_ref.get() {
            let _ = button.focus();
        }
    });

    let handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_cancel.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div
            class="modal-backdrop"
            role="dialog"
            aria-modal="true"
            aria-labelledby="delete-modal-title"
            aria-describedby="delete-modal-description"
            on:click=move |ev| {
                if ev.target() == ev.current_target() {
                    on_cancel.run(());
                }
            }
        >
            <div class="modal" role="document">
                <h2 id="delete-modal-title">"Delete Todo"</h2>
                <p id="delete-modal-description">
                    "Are you sure you want to delete \u{201c}" {todo_title}
                    "\u{201d}? This action cannot be undone."
                </p>
                <div class="modal-actions">
                    <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="confirm-btn danger"
                        node_ref=confirm_ref
                        on:click=move |_| on_confirm.run(())
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
