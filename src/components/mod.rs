//! UI Components
//!
//! Leptos components for the todo board.

mod create_todo_form;
mod delete_confirm_modal;
mod drag_overlay;
mod loading_skeleton;
mod sortable_todo_list;
mod toast_container;
mod todo_filters;
mod todo_item;
mod todo_list;

pub use create_todo_form::CreateTodoForm;
pub use delete_confirm_modal::DeleteConfirmModal;
pub use drag_overlay::DragOverlay;
pub use loading_skeleton::LoadingSkeleton;
pub use sortable_todo_list::SortableTodoList;
pub use toast_container::ToastContainer;
pub use todo_filters::TodoFilters;
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
