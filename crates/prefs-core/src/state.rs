//! Observable settings state
//!
//! `SettingsValue<T>` is the single source of truth for one settings record on
//! the UI thread. Views read it, edit dialogs replace it, and subscribers (the
//! persistence writer, re-rendering views) are told about every replacement.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Observer<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// Handle returned by [`SettingsValue::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner<T> {
    value: RefCell<T>,
    observers: RefCell<Vec<(SubscriptionId, Observer<T>)>>,
    next_id: Cell<u64>,
    pending: Cell<Option<T>>,
    notifying: Cell<bool>,
    renotify: Cell<bool>,
}

impl<T> Inner<T> {
    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.observers
            .borrow()
            .iter()
            .any(|(existing, _)| *existing == id)
    }
}

/// Clears the notification flags when a pass ends, including by unwinding.
struct NotifyPass<'a> {
    notifying: &'a Cell<bool>,
    renotify: &'a Cell<bool>,
}

impl<'a> NotifyPass<'a> {
    fn start(notifying: &'a Cell<bool>, renotify: &'a Cell<bool>) -> Self {
        notifying.set(true);
        Self {
            notifying,
            renotify,
        }
    }
}

impl Drop for NotifyPass<'_> {
    fn drop(&mut self) {
        self.notifying.set(false);
        self.renotify.set(false);
    }
}

/// Observable holder of one immutable settings record.
///
/// Cloning the handle shares the same record; use [`SettingsValue::downgrade`]
/// for a non-owning reference.
pub struct SettingsValue<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for SettingsValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> SettingsValue<T> {
    /// Create a holder for the given record.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(initial),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                pending: Cell::new(None),
                notifying: Cell::new(false),
                renotify: Cell::new(false),
            }),
        }
    }

    /// Current record.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current record without cloning it.
    ///
    /// Updates issued from inside `f` are applied once the borrow ends.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let result = f(&self.inner.value.borrow());
        if let Some(next) = self.inner.pending.take() {
            self.update(next);
        }
        result
    }

    /// Replace the held record and notify subscribers before returning.
    ///
    /// An update issued from inside a subscriber is stored immediately; the
    /// subscribers are notified of the latest record once the running pass
    /// finishes. An update issued inside [`SettingsValue::with`] is held until
    /// that borrow ends.
    pub fn update(&self, new: T) {
        match self.inner.value.try_borrow_mut() {
            Ok(mut slot) => *slot = new,
            Err(_) => {
                self.inner.pending.set(Some(new));
                return;
            }
        }

        if self.inner.notifying.get() {
            self.inner.renotify.set(true);
            return;
        }

        let _pass = NotifyPass::start(&self.inner.notifying, &self.inner.renotify);
        loop {
            let snapshot = self.get();
            let observers: Vec<(SubscriptionId, Observer<T>)> = self
                .inner
                .observers
                .borrow()
                .iter()
                .map(|(id, observer)| (*id, Rc::clone(observer)))
                .collect();
            tracing::trace!(observers = observers.len(), "settings value updated");

            for (id, observer) in observers {
                // Skip observers removed earlier in this pass.
                if self.inner.is_subscribed(id) {
                    (&mut *observer.borrow_mut())(&snapshot);
                }
            }

            if !self.inner.renotify.replace(false) {
                break;
            }
        }
    }

    /// Register an observer called with every new record.
    pub fn subscribe(&self, observer: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        let observer: Observer<T> = Rc::new(RefCell::new(observer));
        self.inner.observers.borrow_mut().push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.inner.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Non-owning reference to this holder.
    pub fn downgrade(&self) -> WeakSettingsValue<T> {
        WeakSettingsValue {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles share the same record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + Default + 'static> Default for SettingsValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SettingsValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsValue")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.observers.borrow().len())
            .finish()
    }
}

/// Non-owning reference to a [`SettingsValue`].
pub struct WeakSettingsValue<T> {
    inner: Weak<Inner<T>>,
}

impl<T> Clone for WeakSettingsValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakSettingsValue<T> {
    /// Get a strong handle if the owning scope is still alive.
    pub fn upgrade(&self) -> Option<SettingsValue<T>> {
        self.inner.upgrade().map(|inner| SettingsValue { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FocusSettings;
    use pretty_assertions::assert_eq;
    use std::panic::AssertUnwindSafe;

    #[test]
    fn update_is_visible_to_next_get() {
        let value = SettingsValue::new(FocusSettings::default());
        let updated = FocusSettings::default().with_short_focus_delay(42);

        value.update(updated);

        assert_eq!(value.get(), updated);
    }

    #[test]
    fn subscribers_see_every_update_in_order() {
        let value = SettingsValue::new(0_u64);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        value.subscribe(move |v| sink.borrow_mut().push(*v));

        value.update(1);
        value.update(2);
        value.update(3);

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let value = SettingsValue::new(0_u64);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = value.subscribe(move |_| counter.set(counter.get() + 1));

        value.update(1);
        assert!(value.unsubscribe(id));
        value.update(2);

        assert_eq!(calls.get(), 1);
        assert!(!value.unsubscribe(id));
        assert_eq!(value.subscriber_count(), 0);
    }

    #[test]
    fn observer_can_read_value_during_notification() {
        let value = SettingsValue::new(0_u64);
        let reader = value.downgrade();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        value.subscribe(move |_| {
            if let Some(value) = reader.upgrade() {
                sink.set(value.get());
            }
        });

        value.update(7);

        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn nested_update_wins_and_is_renotified() {
        let value = SettingsValue::new(0_u64);
        let writer = value.downgrade();
        value.subscribe(move |v| {
            if *v == 1 {
                if let Some(value) = writer.upgrade() {
                    value.update(10);
                }
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        value.subscribe(move |v| sink.borrow_mut().push(*v));

        value.update(1);

        assert_eq!(value.get(), 10);
        assert_eq!(*seen.borrow(), vec![1, 10]);
    }

    #[test]
    fn update_inside_with_is_applied_after_the_borrow() {
        let value = SettingsValue::new(FocusSettings::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        value.subscribe(move |s: &FocusSettings| sink.borrow_mut().push(s.global_focus_delay));

        let before = value.with(|s| {
            value.update(s.with_global_focus_delay(1));
            s.global_focus_delay
        });

        assert_eq!(before, 300);
        assert_eq!(value.get().global_focus_delay, 1);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn nested_with_updates_keep_the_last_record() {
        let value = SettingsValue::new(0_u64);

        value.with(|_| {
            value.with(|_| value.update(1));
            value.update(2);
        });

        assert_eq!(value.get(), 2);
    }

    #[test]
    fn notifications_resume_after_observer_panic() {
        let value = SettingsValue::new(0_u64);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        value.subscribe(move |v| {
            counter.set(counter.get() + 1);
            assert_ne!(*v, 1, "observer rejected record");
        });

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| value.update(1)));
        assert!(result.is_err());

        value.update(2);

        assert_eq!(calls.get(), 2);
        assert_eq!(value.get(), 2);
    }

    #[test]
    fn weak_handle_does_not_keep_value_alive() {
        let value = SettingsValue::new(FocusSettings::default());
        let weak = value.downgrade();
        assert!(weak.upgrade().is_some());

        drop(value);

        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn clones_share_the_same_record() {
        let value = SettingsValue::<FocusSettings>::default();
        let other = value.clone();

        other.update(FocusSettings::default().with_global_focus_delay(1));

        assert!(value.ptr_eq(&other));
        assert_eq!(value.with(|s| s.global_focus_delay), 1);
    }
}
