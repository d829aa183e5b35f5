//! Minimal single-threaded observable value.
//!
//! The router publishes its navigation state through [`Observable`]s so UI
//! layers can react without the router knowing about any reactive framework.
//! Subscriptions are RAII handles: dropping the [`Subscription`] removes the
//! callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    subscribers: Vec<(u64, Callback<T>)>,
    next_id: u64,
}

/// Shared, observable value. Clones share the same underlying value.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Create an observable holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value and notify every subscriber.
    ///
    /// Callbacks run after the internal borrow is released, so a callback
    /// may read this observable or subscribe to it.
    pub fn set(&self, value: T) {
        let callbacks: Vec<Callback<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner
                .subscribers
                .iter()
                .map(|(_, callback)| Rc::clone(callback))
                .collect()
        };
        let value = self.get();
        for callback in callbacks {
            callback(&value);
        }
    }

    /// Register `callback`, invoked on every subsequent [`Observable::set`].
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.subscribers.push((id, Rc::new(callback)));

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: Clone + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Observable")
                .field("value", &inner.value)
                .field("subscribers", &inner.subscribers.len())
                .finish(),
            Err(_) => f.write_str("Observable(<borrowed>)"),
        }
    }
}

/// Handle returned by [`Observable::subscribe`]; unsubscribes on drop.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the subscription alive for the rest of the program.
    pub fn forget(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn should_notify_subscribers_on_set() {
        let title = Observable::new(String::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = title.subscribe(move |v: &String| sink.borrow_mut().push(v.clone()));

        title.set("Home".to_string());
        title.set("Course".to_string());

        assert_eq!(*seen.borrow(), vec!["Home".to_string(), "Course".to_string()]);
        assert_eq!(title.get(), "Course");
    }

    #[test]
    fn should_stop_notifying_after_subscription_dropped() {
        let loading = Observable::new(false);
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let sub = loading.subscribe(move |_| counter.set(counter.get() + 1));

        loading.set(true);
        drop(sub);
        loading.set(false);

        assert_eq!(count.get(), 1);
        assert_eq!(loading.subscriber_count(), 0);
    }

    #[test]
    fn should_allow_reading_inside_callback() {
        let path = Observable::new("/".to_string());
        let reader = path.clone();
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        let _sub = path.subscribe(move |_| *sink.borrow_mut() = reader.get());

        path.set("/missing".to_string());
        assert_eq!(*seen.borrow(), "/missing");
    }

    #[test]
    fn should_keep_forgotten_subscription() {
        let value = Observable::new(0_u32);
        value.subscribe(|_| {}).forget();
        assert_eq!(value.subscriber_count(), 1);
    }
}
