//! Event hub for setting change notifications.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Event name published after every successful `set`.
pub const SETTING_CHANGED: &str = "setting_changed";

/// Event name published after every successful `remove`.
pub const SETTING_REMOVED: &str = "setting_removed";

/// Payload delivered to handlers when a setting changes or is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingEvent {
    /// A setting was written.
    Changed {
        /// Section the setting lives in.
        section: String,
        /// Key of the setting.
        key: String,
        /// The value that was written.
        value: String,
    },
    /// A setting or a whole section was removed.
    Removed {
        /// Section the removal targeted.
        section: String,
        /// The removed key, or `None` when the whole section was removed.
        key: Option<String>,
    },
}

impl SettingEvent {
    /// Build a [`SettingEvent::Changed`] payload.
    pub fn changed(section: &str, key: &str, value: &str) -> Self {
        Self::Changed {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Build a [`SettingEvent::Removed`] payload.
    pub fn removed(section: &str, key: Option<&str>) -> Self {
        Self::Removed {
            section: section.to_string(),
            key: key.map(str::to_string),
        }
    }
}

type Handler = Box<dyn Fn(&SettingEvent) + Send + Sync>;

/// Internal handler registry state.
struct ObservableInner {
    handlers: HashMap<String, Vec<Handler>>,
}

/// Per-instance event hub mapping event names to ordered handler lists.
///
/// Cloning an `Observable` hands out another handle to the same registry, so
/// external code can keep a handle for subscribing while a [`Config`] keeps
/// one for triggering.
///
/// Handler invocation is synchronous and holds the registry lock, so a
/// handler must not subscribe on the same hub from inside its callback.
///
/// [`Config`]: crate::core::Config
///
/// # Examples
///
/// ```rust
/// use observable_config::notify::{Observable, SettingEvent, SETTING_CHANGED};
///
/// let observable = Observable::new();
/// observable.subscribe(SETTING_CHANGED, |event| {
///     println!("changed: {event:?}");
/// });
///
/// observable.trigger(SETTING_CHANGED, &SettingEvent::changed("oracle", "user", "admin"));
/// ```
pub struct Observable {
    inner: Arc<RwLock<ObservableInner>>,
}

impl Observable {
    /// Create a new hub with no registered handlers.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ObservableInner {
                handlers: HashMap::new(),
            })),
        }
    }

    /// Register `handler` for `event`, appending to the handler list.
    ///
    /// Handlers are not de-duplicated: subscribing the same closure twice
    /// invokes it twice per trigger.
    pub fn subscribe<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(&SettingEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.write().expect("handler registry poisoned");
        inner
            .handlers
            .entry(event.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Invoke every handler registered for `event`, in registration order.
    ///
    /// An event with no handlers is a no-op. A panicking handler unwinds
    /// through this call and aborts the remaining invocations.
    pub fn trigger(&self, event: &str, payload: &SettingEvent) {
        let inner = self.inner.read().expect("handler registry poisoned");
        if let Some(handlers) = inner.handlers.get(event) {
            for handler in handlers {
                handler(payload);
            }
        }
    }

    /// Number of handlers registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        let inner = self.inner.read().expect("handler registry poisoned");
        inner.handlers.get(event).map_or(0, Vec::len)
    }
}

impl Default for Observable {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Observable {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribe_and_trigger() {
        let observable = Observable::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = Arc::clone(&counter);
        observable.subscribe(SETTING_CHANGED, move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        let event = SettingEvent::changed("s", "k", "v");
        observable.trigger(SETTING_CHANGED, &event);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        observable.trigger(SETTING_CHANGED, &event);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_trigger_without_handlers_is_noop() {
        let observable = Observable::new();
        observable.trigger("nobody_listens", &SettingEvent::removed("s", None));
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let observable = Observable::new();
        let order = Arc::new(RwLock::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order_clone = Arc::clone(&order);
            observable.subscribe(SETTING_CHANGED, move |_| {
                order_clone.write().unwrap().push(tag);
            });
        }

        observable.trigger(SETTING_CHANGED, &SettingEvent::changed("s", "k", "v"));
        assert_eq!(*order.read().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicate_subscription_fires_twice() {
        let observable = Observable::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let counter_clone = Arc::clone(&counter);
            observable.subscribe(SETTING_CHANGED, move |_| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            });
        }

        observable.trigger(SETTING_CHANGED, &SettingEvent::changed("s", "k", "v"));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_events_are_name_scoped() {
        let observable = Observable::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = Arc::clone(&counter);
        observable.subscribe(SETTING_REMOVED, move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        observable.trigger(SETTING_CHANGED, &SettingEvent::changed("s", "k", "v"));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        observable.trigger(SETTING_REMOVED, &SettingEvent::removed("s", None));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_receives_payload() {
        let observable = Observable::new();
        let seen = Arc::new(RwLock::new(None));

        let seen_clone = Arc::clone(&seen);
        observable.subscribe(SETTING_CHANGED, move |event| {
            *seen_clone.write().unwrap() = Some(event.clone());
        });

        observable.trigger(SETTING_CHANGED, &SettingEvent::changed("oracle", "user", "admin"));
        assert_eq!(
            seen.read().unwrap().clone(),
            Some(SettingEvent::changed("oracle", "user", "admin"))
        );
    }

    #[test]
    fn test_handler_count() {
        let observable = Observable::new();
        assert_eq!(observable.handler_count(SETTING_CHANGED), 0);

        observable.subscribe(SETTING_CHANGED, |_| {});
        observable.subscribe(SETTING_CHANGED, |_| {});
        observable.subscribe(SETTING_REMOVED, |_| {});

        assert_eq!(observable.handler_count(SETTING_CHANGED), 2);
        assert_eq!(observable.handler_count(SETTING_REMOVED), 1);
    }

    #[test]
    fn test_clone_shares_registry() {
        let observable = Observable::new();
        let observable2 = observable.clone();

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        observable.subscribe(SETTING_CHANGED, move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Trigger via the clone.
        observable2.trigger(SETTING_CHANGED, &SettingEvent::changed("s", "k", "v"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
