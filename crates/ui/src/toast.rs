//! Toast notifications
//!
//! Short messages stacked in a corner of the page. Each toast disappears
//! on click or after the configured timeout.

use std::cell::Cell;
use std::time::Duration;

use buzz_router::Observable;
use tracing::debug;

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Neutral,
    Primary,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    /// CSS modifier class, if any.
    #[must_use]
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::Primary => Some("toast-primary"),
            Self::Success => Some("toast-success"),
            Self::Warning => Some("toast-warning"),
            Self::Error => Some("toast-error"),
        }
    }
}

/// One visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub content: String,
    pub level: ToastLevel,
}

impl Toast {
    /// Class attribute of the toast element.
    #[must_use]
    pub fn classes(&self) -> String {
        match self.level.class() {
            Some(modifier) => format!("toast visible {modifier}"),
            None => "toast visible".to_string(),
        }
    }
}

/// Toast message list.
#[derive(Debug)]
pub struct Toasts {
    messages: Observable<Vec<Toast>>,
    next_id: Cell<u64>,
    timeout: Duration,
}

impl Toasts {
    /// Toasts dismissed after `timeout`; a zero timeout keeps them until
    /// they are clicked.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            messages: Observable::default(),
            next_id: Cell::new(1),
            timeout,
        }
    }

    /// The live message list, oldest first.
    #[must_use]
    pub fn messages(&self) -> Observable<Vec<Toast>> {
        self.messages.clone()
    }

    pub fn message(&self, content: impl Into<String>) -> u64 {
        self.push(content.into(), ToastLevel::Neutral)
    }

    pub fn primary(&self, content: impl Into<String>) -> u64 {
        self.push(content.into(), ToastLevel::Primary)
    }

    pub fn success(&self, content: impl Into<String>) -> u64 {
        self.push(content.into(), ToastLevel::Success)
    }

    pub fn warning(&self, content: impl Into<String>) -> u64 {
        self.push(content.into(), ToastLevel::Warning)
    }

    pub fn error(&self, content: impl Into<String>) -> u64 {
        self.push(content.into(), ToastLevel::Error)
    }

    /// Remove the toast with `id`; unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        dismiss_in(&self.messages, id);
    }

    fn push(&self, content: String, level: ToastLevel) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        debug!(id, ?level, "Showing toast");

        let mut messages = self.messages.get();
        messages.push(Toast { id, content, level });
        self.messages.set(messages);

        if !self.timeout.is_zero() {
            let messages = self.messages.clone();
            let timeout = self.timeout;
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::sleep(timeout).await;
                dismiss_in(&messages, id);
            });
        }
        id
    }
}

fn dismiss_in(messages: &Observable<Vec<Toast>>, id: u64) {
    let mut list = messages.get();
    let before = list.len();
    list.retain(|toast| toast.id != id);
    if list.len() != before {
        messages.set(list);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn given_messages_when_pushed_then_ids_increase_in_order() {
        let toasts = Toasts::new(Duration::ZERO);
        let first = toasts.error("broken");
        let second = toasts.success("fixed");

        assert!(second > first);
        let list = toasts.messages().get();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].content, "broken");
        assert_eq!(list[1].level, ToastLevel::Success);
    }

    #[test]
    fn given_toast_when_dismissed_then_removed() {
        let toasts = Toasts::new(Duration::ZERO);
        let id = toasts.warning("careful");
        toasts.message("note");

        toasts.dismiss(id);
        toasts.dismiss(999);

        let list = toasts.messages().get();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].content, "note");
    }

    #[test]
    fn given_level_then_classes_match_stylesheet() {
        let toast = Toast {
            id: 1,
            content: String::new(),
            level: ToastLevel::Error,
        };
        assert_eq!(toast.classes(), "toast visible toast-error");

        let neutral = Toast {
            level: ToastLevel::Neutral,
            ..toast
        };
        assert_eq!(neutral.classes(), "toast visible");
    }

    #[test]
    fn given_subscriber_when_toast_pushed_then_notified() {
        let toasts = Toasts::new(Duration::ZERO);
        let seen = std::rc::Rc::new(Cell::new(0_usize));
        let sink = std::rc::Rc::clone(&seen);
        let _subscription = toasts
            .messages()
            .subscribe(move |list: &Vec<Toast>| sink.set(list.len()));

        toasts.primary("hello");
        assert_eq!(seen.get(), 1);
    }
}
