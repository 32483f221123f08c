//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for sortable lists in Leptos.
//! Items are identified by string keys; a drag only starts after the pointer
//! travels past a threshold, so plain clicks still reach the element.
//! Alt+ArrowUp / Alt+ArrowDown on a focused item is the keyboard equivalent.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 8;

/// How long `drag_just_ended` stays set, so the trailing click can be ignored
const JUST_ENDED_MS: i32 = 100;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_key_read: ReadSignal<Option<String>>,
    pub dragging_key_write: WriteSignal<Option<String>>,
    /// Item currently under the pointer while dragging
    pub over_key_read: ReadSignal<Option<String>>,
    pub over_key_write: WriteSignal<Option<String>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item key (mousedown but not yet dragging)
    pub pending_key_read: ReadSignal<Option<String>>,
    pub pending_key_write: WriteSignal<Option<String>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    /// Last pointer position, for the overlay
    pub pointer_read: ReadSignal<(i32, i32)>,
    pub pointer_write: WriteSignal<(i32, i32)>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_key_read, dragging_key_write) = signal(None::<String>);
    let (over_key_read, over_key_write) = signal(None::<String>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_key_read, pending_key_write) = signal(None::<String>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    let (pointer_read, pointer_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_key_read,
        dragging_key_write,
        over_key_read,
        over_key_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_key_read,
        pending_key_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        pointer_read,
        pointer_write,
    }
}

impl DndSignals {
    /// Whether `key` is the item being dragged
    pub fn is_dragging(&self, key: &str) -> bool {
        self.dragging_key_read.with(|k| k.as_deref() == Some(key))
    }

    /// Whether `key` is the current drop target
    pub fn is_over(&self, key: &str) -> bool {
        self.over_key_read.with(|k| k.as_deref() == Some(key))
    }
}

/// True once the pointer has moved far enough from the press point.
pub fn exceeds_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_key_write.set(None);
    dnd.over_key_write.set(None);
    dnd.pending_key_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            JUST_ENDED_MS,
        );
        cb.forget();
    }
}

/// Create mousedown handler for a sortable item.
/// Records a pending drag with its start position; presses on form controls are ignored.
pub fn make_on_mousedown(dnd: DndSignals, key: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_key_write.set(Some(key.clone()));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
        dnd.pointer_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Bind document mousemove: tracks the pointer and starts the drag once past the threshold
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_key_read.get_untracked() else {
            return;
        };

        if dnd.dragging_key_read.with_untracked(|k| k.is_none()) {
            let dx = ev.client_x() - dnd.start_x_read.get_untracked();
            let dy = ev.client_y() - dnd.start_y_read.get_untracked();
            if !exceeds_threshold(dx, dy) {
                return;
            }
            dnd.dragging_key_write.set(Some(pending));
        }
        dnd.pointer_write.set((ev.client_x(), ev.client_y()));
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for items (become drop target)
pub fn make_on_item_mouseenter(dnd: DndSignals, key: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_key_read.get_untracked() else {
            return;
        };
        // No dropping on self
        if dragging != key {
            dnd.over_key_write.set(Some(key.clone()));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_key_read.with_untracked(|k| k.is_some()) {
            dnd.over_key_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
/// `on_drop(dragged, over)` fires only for a real drag released over another item.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(String, String) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_key_read.get_untracked();
        let over = dnd.over_key_read.get_untracked();

        dnd.pending_key_write.set(None);
        if dragging.is_none() {
            // Plain click: the element's click handler runs as usual
            return;
        }

        end_drag(&dnd);
        if let (Some(dragged), Some(over)) = (dragging, over) {
            on_drop(dragged, over);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

/// Keyboard reorder step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardMove {
    Up,
    Down,
}

impl KeyboardMove {
    /// Signed index step in display order
    pub fn offset(self) -> isize {
        match self {
            KeyboardMove::Up => -1,
            KeyboardMove::Down => 1,
        }
    }
}

/// Map a key press to a reorder step; only Alt+ArrowUp/ArrowDown count.
pub fn keyboard_move(key: &str, alt: bool) -> Option<KeyboardMove> {
    if !alt {
        return None;
    }
    match key {
        "ArrowUp" => Some(KeyboardMove::Up),
        "ArrowDown" => Some(KeyboardMove::Down),
        _ => None,
    }
}

/// Create keydown handler for a sortable item.
/// Calls `on_move(key, step)` for Alt+arrow presses; typing in inputs is left alone.
pub fn make_on_keydown<F>(key: String, on_move: F) -> impl Fn(web_sys::KeyboardEvent) + Clone + 'static
where
    F: Fn(String, KeyboardMove) + Clone + 'static,
{
    move |ev: web_sys::KeyboardEvent| {
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
        }
        let Some(step) = keyboard_move(&ev.key(), ev.alt_key()) else {
            return;
        };
        ev.prevent_default();
        on_move(key.clone(), step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!exceeds_threshold(0, 0));
        assert!(!exceeds_threshold(8, -8));
        assert!(exceeds_threshold(9, 0));
        assert!(exceeds_threshold(0, -9));
    }

    #[test]
    fn test_keyboard_move_needs_alt_and_arrow() {
        assert_eq!(keyboard_move("ArrowUp", true), Some(KeyboardMove::Up));
        assert_eq!(keyboard_move("ArrowDown", true), Some(KeyboardMove::Down));
        assert_eq!(keyboard_move("ArrowUp", false), None);
        assert_eq!(keyboard_move("ArrowLeft", true), None);
        assert_eq!(KeyboardMove::Up.offset(), -1);
        assert_eq!(KeyboardMove::Down.offset(), 1);
    }
}
