//! Notifications
//!
//! The store reports mutation outcomes through a `NotificationSink` handed to
//! it at construction. The browser sink feeds a `ToastQueue`.

use std::fmt;

/// Auto-dismiss delay when a toast does not ask for its own.
pub const DEFAULT_TOAST_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    /// CSS modifier used by the toast container
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
            ToastLevel::Info => "info",
        }
    }
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives user-facing outcome messages
pub trait NotificationSink {
    fn notify(&self, level: ToastLevel, message: String);

    fn success(&self, message: String) {
        self.notify(ToastLevel::Success, message);
    }

    fn error(&self, message: String) {
        self.notify(ToastLevel::Error, message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub level: ToastLevel,
    pub message: String,
    pub duration_ms: u32,
}

/// Ordered list of visible toasts, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u32,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast. Without an explicit duration it gets `DEFAULT_TOAST_MS`.
    pub fn push(&mut self, level: ToastLevel, message: String, duration_ms: Option<u32>) -> &Toast {
        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            level,
            message,
            duration_ms: duration_ms.unwrap_or(DEFAULT_TOAST_MS),
        };
        self.toasts.push(toast);
        &self.toasts[self.toasts.len() - 1]
    }

    /// Remove a toast; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u32) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::new();
        let a = queue.push(ToastLevel::Success, "a".into(), None).id;
        let b = queue.push(ToastLevel::Error, "b".into(), None).id;
        assert!(b > a);
        assert_eq!(queue.toasts().len(), 2);
    }

    #[test]
    fn test_pushed_toast_carries_its_duration() {
        let mut queue = ToastQueue::new();
        assert_eq!(queue.push(ToastLevel::Info, "default".into(), None).duration_ms, DEFAULT_TOAST_MS);
        let long = queue.push(ToastLevel::Error, "long".into(), Some(12_000)).clone();
        assert_eq!(long.duration_ms, 12_000);
        assert_eq!(queue.toasts()[1], long);
    }

    #[test]
    fn test_dismiss_removes_only_target() {
        let mut queue = ToastQueue::new();
        let a = queue.push(ToastLevel::Info, "a".into(), None).id;
        let b = queue.push(ToastLevel::Info, "b".into(), None).id;
        queue.dismiss(a);
        queue.dismiss(999);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].id, b);
        queue.dismiss(b);
        assert!(queue.is_empty());
    }
}
